use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::LocaleText;

/// Opaque primary key of a property, globally unique and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub String);

/// Opaque key of a zone, unique within its owning property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId(pub String);

impl PropertyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ZoneId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-level rental addressed by `id` or, when assigned, by its globally unique `slug`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: LocaleText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocaleText>,
}

/// Area of a property (kitchen, pool, wifi...) whose slug is unique only among its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: ZoneId,
    pub property_id: PropertyId,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: LocaleText,
    #[serde(default)]
    pub description: LocaleText,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Zone {
    /// Steps in editor order; ties keep insertion order.
    pub fn ordered_steps(&self) -> Vec<&Step> {
        let mut steps: Vec<&Step> = self.steps.iter().collect();
        steps.sort_by_key(|step| step.order);
        steps
    }
}

/// Single instruction card inside a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    #[serde(default)]
    pub title: LocaleText,
    #[serde(default)]
    pub content: LocaleText,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepType {
    Text,
    Image,
    Video,
    Link,
}

impl StepType {
    pub fn label(&self) -> &'static str {
        match self {
            StepType::Text => "TEXT",
            StepType::Image => "IMAGE",
            StepType::Video => "VIDEO",
            StepType::Link => "LINK",
        }
    }
}
