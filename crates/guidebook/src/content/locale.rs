use std::fmt;

use serde::{Deserialize, Serialize};

/// Display locales supported by guest manuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Es,
    En,
    Fr,
}

/// Conventional fallback walk used when a host has not configured one.
pub const DEFAULT_FALLBACK: [Locale; 3] = [Locale::Es, Locale::En, Locale::Fr];

impl Locale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Parses a language tag, ignoring case and any region suffix (`en-US`, `fr_CA`).
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let language = normalized.split(['-', '_']).next().unwrap_or("");
        match language {
            "es" => Some(Self::Es),
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    /// Picks the highest-weighted supported language from an `Accept-Language` header.
    ///
    /// Entries with `q=0` are skipped; ties keep header order.
    pub fn from_accept_language(header: &str) -> Option<Self> {
        let mut candidates: Vec<(Self, f32)> = header
            .split(',')
            .filter_map(|entry| {
                let mut parts = entry.split(';');
                let locale = Self::parse(parts.next()?)?;
                let weight = parts
                    .find_map(|param| param.trim().strip_prefix("q="))
                    .and_then(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                (weight > 0.0).then_some((locale, weight))
            })
            .collect();

        // stable sort keeps header order for equal weights
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates.first().map(|(locale, _)| *locale)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a comma separated list such as `es,en,fr`, rejecting unknown entries.
pub fn parse_fallback_order(raw: &str) -> Result<Vec<Locale>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| Locale::parse(entry).ok_or_else(|| entry.to_string()))
        .collect()
}
