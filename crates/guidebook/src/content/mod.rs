//! Locale-aware access to display fields.
//!
//! Names, descriptions and step bodies are stored either as a plain string (legacy rows) or as a
//! map keyed by locale. Everything that renders one of those fields goes through
//! [`LocaleText::text`] or a [`LocalePreference`] so the fallback walk is applied uniformly.

pub mod locale;
pub mod text;

pub use locale::{parse_fallback_order, Locale, DEFAULT_FALLBACK};
pub use text::{LocalePreference, LocaleText};
