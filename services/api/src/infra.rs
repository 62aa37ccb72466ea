use guidebook::catalog::{InMemoryCatalog, ResolutionService};
use guidebook::config::CatalogConfig;
use guidebook::content::Locale;
use guidebook::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the configured seed, or an empty catalog when none is configured.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<InMemoryCatalog, AppError> {
    match &config.seed_path {
        Some(path) => load_catalog_from(path),
        None => {
            warn!("APP_CATALOG_PATH not set; serving an empty catalog");
            Ok(InMemoryCatalog::new())
        }
    }
}

pub(crate) fn load_catalog_from(path: &Path) -> Result<InMemoryCatalog, AppError> {
    Ok(InMemoryCatalog::from_path(path)?)
}

pub(crate) fn build_service(
    catalog: InMemoryCatalog,
    config: &CatalogConfig,
) -> ResolutionService<InMemoryCatalog> {
    ResolutionService::new(Arc::new(catalog))
        .with_locales(config.locales.clone())
        .with_slug_policy(config.slug_policy)
}

pub(crate) fn parse_locale(raw: &str) -> Result<Locale, String> {
    Locale::parse(raw).ok_or_else(|| format!("unsupported locale '{raw}' (expected es, en or fr)"))
}
