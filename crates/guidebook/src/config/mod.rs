use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::catalog::SlugRoutePolicy;
use crate::content::{parse_fallback_order, Locale, LocalePreference};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    fn from_env() -> Self {
        Self::from_str(&env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_env();

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig::from_env(environment)?,
            catalog: CatalogConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl TelemetryConfig {
    /// Reads only the logging variables, for commands that never bind a server.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env(AppEnvironment::from_env())
    }

    fn from_env(environment: AppEnvironment) -> Result<Self, ConfigError> {
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => {
                LogFormat::parse(&raw).ok_or(ConfigError::InvalidLogFormat { value: raw })?
            }
            Err(_) if environment == AppEnvironment::Production => LogFormat::Json,
            Err(_) => LogFormat::Compact,
        };
        Ok(Self { log_level, format })
    }
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Catalog source plus the display and routing preferences applied to resolved entities.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub seed_path: Option<PathBuf>,
    pub locales: LocalePreference,
    pub slug_policy: SlugRoutePolicy,
}

impl CatalogConfig {
    /// Reads only the catalog variables, for commands that never bind a server.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    fn from_env() -> Result<Self, ConfigError> {
        let seed_path = env::var("APP_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let raw_locale = env::var("APP_DEFAULT_LOCALE").unwrap_or_else(|_| "es".to_string());
        let preferred =
            Locale::parse(&raw_locale).ok_or(ConfigError::InvalidLocale { value: raw_locale })?;

        let raw_fallback =
            env::var("APP_LOCALE_FALLBACK").unwrap_or_else(|_| "es,en,fr".to_string());
        let fallback_order = parse_fallback_order(&raw_fallback)
            .map_err(|value| ConfigError::InvalidLocale { value })?;

        let raw_policy =
            env::var("APP_SLUG_ROUTE_POLICY").unwrap_or_else(|_| "canonical".to_string());
        let slug_policy = SlugRoutePolicy::parse(&raw_policy)
            .ok_or(ConfigError::InvalidSlugRoutePolicy { value: raw_policy })?;

        Ok(Self {
            seed_path,
            locales: LocalePreference::new(preferred, fallback_order),
            slug_policy,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLocale { value: String },
    InvalidSlugRoutePolicy { value: String },
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLocale { value } => {
                write!(f, "unsupported locale '{value}' (expected es, en or fr)")
            }
            ConfigError::InvalidSlugRoutePolicy { value } => write!(
                f,
                "APP_SLUG_ROUTE_POLICY must be 'canonical' or 'id', got '{value}'"
            ),
            ConfigError::InvalidLogFormat { value } => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'json', got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidLocale { .. }
            | ConfigError::InvalidSlugRoutePolicy { .. }
            | ConfigError::InvalidLogFormat { .. } => None,
        }
    }
}
