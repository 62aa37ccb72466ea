//! Public URL forms for resolved entities.
//!
//! The canonical form prefers the human slug and falls back to the opaque ID. Callers build
//! paths here instead of re-deriving that preference. Every segment is percent-encoded, so a
//! slug containing `/` or non-ASCII text still routes back to the entity it came from.

use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode, CONTROLS};

use super::domain::{Property, Zone};

const PROPERTIES_ROOT: &str = "/properties";

/// Characters that cannot appear raw inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn encode(segment: &str) -> PercentEncode<'_> {
    utf8_percent_encode(segment, PATH_SEGMENT)
}

fn property_segment(property: &Property) -> PercentEncode<'_> {
    encode(property.slug.as_deref().unwrap_or(property.id.as_str()))
}

fn zone_segment(zone: &Zone) -> PercentEncode<'_> {
    encode(zone.slug.as_deref().unwrap_or(zone.id.as_str()))
}

/// `/properties/{slug or id}`
pub fn property_path(property: &Property) -> String {
    format!("{PROPERTIES_ROOT}/{}", property_segment(property))
}

/// `/properties/{property slug or id}/{zone slug or id}`
pub fn zone_path(property: &Property, zone: &Zone) -> String {
    format!(
        "{PROPERTIES_ROOT}/{}/{}",
        property_segment(property),
        zone_segment(zone)
    )
}

/// `/properties/{id}`, ignoring any slug.
pub fn id_property_path(property: &Property) -> String {
    format!("{PROPERTIES_ROOT}/{}", encode(property.id.as_str()))
}

/// `/properties/{property id}/{zone id}`, ignoring any slug.
pub fn id_zone_path(property: &Property, zone: &Zone) -> String {
    format!(
        "{PROPERTIES_ROOT}/{}/{}",
        encode(property.id.as_str()),
        encode(zone.id.as_str())
    )
}

/// Where slug-addressed routes (`/properties/slug/...`) send the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlugRoutePolicy {
    /// Redirect to the canonical, slug-preferring path.
    #[default]
    Canonical,
    /// Redirect to the ID-addressed page.
    Id,
}

impl SlugRoutePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "canonical" | "slug" => Some(Self::Canonical),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    pub fn property_target(&self, property: &Property) -> String {
        match self {
            Self::Canonical => property_path(property),
            Self::Id => id_property_path(property),
        }
    }

    pub fn zone_target(&self, property: &Property, zone: &Zone) -> String {
        match self {
            Self::Canonical => zone_path(property, zone),
            Self::Id => id_zone_path(property, zone),
        }
    }
}
