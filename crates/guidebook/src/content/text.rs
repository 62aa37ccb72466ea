use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::locale::{Locale, DEFAULT_FALLBACK};

/// Display field stored either as a legacy plain string or as a per-locale map.
///
/// Deserialization is total: a JSON string becomes [`LocaleText::Plain`], an object becomes
/// [`LocaleText::Localized`] keeping only string values, and anything else (null, numbers,
/// arrays) becomes an empty map so lookups degrade to the caller's default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleText {
    Plain(String),
    Localized(BTreeMap<String, String>),
}

impl Default for LocaleText {
    fn default() -> Self {
        Self::Localized(BTreeMap::new())
    }
}

impl LocaleText {
    pub fn plain(value: impl Into<String>) -> Self {
        Self::Plain(value.into())
    }

    pub fn localized<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Localized(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Returns the string to display for `preferred`, walking `fallback_order` when the
    /// preferred entry is missing or empty and returning `default` when nothing matches.
    pub fn text(&self, preferred: Locale, fallback_order: &[Locale], default: &str) -> String {
        match self {
            Self::Plain(value) => value.clone(),
            Self::Localized(entries) => std::iter::once(preferred)
                .chain(fallback_order.iter().copied())
                .find_map(|locale| {
                    entries
                        .get(locale.as_str())
                        .filter(|value| !value.is_empty())
                })
                .cloned()
                .unwrap_or_else(|| default.to_string()),
        }
    }
}

impl From<Value> for LocaleText {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Plain(text),
            Value::Object(map) => Self::Localized(
                map.into_iter()
                    .filter_map(|(key, value)| match value {
                        Value::String(text) => Some((key, text)),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => Self::default(),
        }
    }
}

impl From<&str> for LocaleText {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

impl Serialize for LocaleText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Plain(value) => serializer.serialize_str(value),
            Self::Localized(entries) => entries.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for LocaleText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}

/// Preferred display locale plus the ordered fallback walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalePreference {
    pub preferred: Locale,
    pub fallback_order: Vec<Locale>,
}

impl Default for LocalePreference {
    fn default() -> Self {
        Self {
            preferred: Locale::Es,
            fallback_order: DEFAULT_FALLBACK.to_vec(),
        }
    }
}

impl LocalePreference {
    pub fn new(preferred: Locale, fallback_order: Vec<Locale>) -> Self {
        Self {
            preferred,
            fallback_order,
        }
    }

    /// Same fallback walk with a different preferred locale, e.g. one negotiated per request.
    pub fn with_preferred(&self, preferred: Locale) -> Self {
        Self {
            preferred,
            fallback_order: self.fallback_order.clone(),
        }
    }

    pub fn text(&self, value: &LocaleText) -> String {
        self.text_or(value, "")
    }

    pub fn text_or(&self, value: &LocaleText, default: &str) -> String {
        value.text(self.preferred, &self.fallback_order, default)
    }
}
