use serde::Serialize;

use super::canonical;
use super::domain::{Property, Step, Zone};
use crate::content::{Locale, LocalePreference};

/// Property with display strings already resolved for one locale preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub canonical_path: String,
}

impl PropertyView {
    pub fn build(property: &Property, locales: &LocalePreference) -> Self {
        Self {
            id: property.id.0.clone(),
            slug: property.slug.clone(),
            name: locales.text(&property.name),
            description: property
                .description
                .as_ref()
                .map(|description| locales.text(description))
                .filter(|description| !description.is_empty()),
            canonical_path: canonical::property_path(property),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneView {
    pub id: String,
    pub property_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub name: String,
    pub description: String,
    pub canonical_path: String,
    pub steps: Vec<StepView>,
}

impl ZoneView {
    pub fn build(property: &Property, zone: &Zone, locales: &LocalePreference) -> Self {
        Self {
            id: zone.id.0.clone(),
            property_id: zone.property_id.0.clone(),
            slug: zone.slug.clone(),
            name: locales.text(&zone.name),
            description: locales.text(&zone.description),
            canonical_path: canonical::zone_path(property, zone),
            steps: zone
                .ordered_steps()
                .into_iter()
                .map(|step| StepView::build(step, locales))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub id: String,
    #[serde(rename = "type")]
    pub step_type: &'static str,
    pub title: String,
    pub content: String,
    pub order: i32,
}

impl StepView {
    pub fn build(step: &Step, locales: &LocalePreference) -> Self {
        Self {
            id: step.id.clone(),
            step_type: step.step_type.label(),
            title: locales.text(&step.title),
            content: locales.text(&step.content),
            order: step.order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPathView {
    pub locale: Locale,
    pub property: PropertyView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<ZoneView>,
}
