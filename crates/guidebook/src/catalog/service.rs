use std::sync::Arc;

use super::canonical::{self, SlugRoutePolicy};
use super::domain::{Property, PropertyId, Zone};
use super::repository::{PropertyStore, ZoneStore};
use super::resolver::{PropertyResolver, ResolveError, ZoneResolver};
use super::views::{PropertyView, ResolvedPathView, ZoneView};
use crate::content::{Locale, LocalePreference};

/// Service composing the property and zone resolvers with display preferences.
pub struct ResolutionService<S> {
    properties: PropertyResolver<S>,
    zones: ZoneResolver<S>,
    locales: LocalePreference,
    slug_policy: SlugRoutePolicy,
}

impl<S> ResolutionService<S>
where
    S: PropertyStore + ZoneStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            properties: PropertyResolver::new(store.clone()),
            zones: ZoneResolver::new(store),
            locales: LocalePreference::default(),
            slug_policy: SlugRoutePolicy::default(),
        }
    }

    pub fn with_locales(mut self, locales: LocalePreference) -> Self {
        self.locales = locales;
        self
    }

    pub fn with_slug_policy(mut self, slug_policy: SlugRoutePolicy) -> Self {
        self.slug_policy = slug_policy;
        self
    }

    pub fn locales(&self) -> &LocalePreference {
        &self.locales
    }

    pub fn slug_policy(&self) -> SlugRoutePolicy {
        self.slug_policy
    }

    pub fn resolve_property(&self, identifier: &str) -> Result<Option<Property>, ResolveError> {
        self.properties.resolve(identifier)
    }

    pub fn resolve_zone(
        &self,
        property_id: &PropertyId,
        identifier: &str,
    ) -> Result<Option<Zone>, ResolveError> {
        self.zones.resolve(property_id, identifier)
    }

    /// Resolves one or two path segments. The zone is only looked up once its property resolved.
    pub fn resolve_path(
        &self,
        property_identifier: &str,
        zone_identifier: Option<&str>,
    ) -> Result<PathLookup, ResolveError> {
        let Some(property) = self.properties.resolve(property_identifier)? else {
            return Ok(PathLookup::MissingProperty);
        };

        let zone = match zone_identifier {
            Some(identifier) => match self.zones.resolve(&property.id, identifier)? {
                Some(zone) => Some(zone),
                None => return Ok(PathLookup::MissingZone { property }),
            },
            None => None,
        };

        Ok(PathLookup::Resolved(ResolvedPath { property, zone }))
    }

    /// Display preference for a request, honoring a negotiated locale when one was supplied.
    pub fn preference_for(&self, requested: Option<Locale>) -> LocalePreference {
        match requested {
            Some(locale) => self.locales.with_preferred(locale),
            None => self.locales.clone(),
        }
    }
}

/// Outcome of resolving a property segment and an optional zone segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathLookup {
    Resolved(ResolvedPath),
    MissingProperty,
    MissingZone { property: Property },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub property: Property,
    pub zone: Option<Zone>,
}

impl ResolvedPath {
    pub fn canonical_path(&self) -> String {
        match &self.zone {
            Some(zone) => canonical::zone_path(&self.property, zone),
            None => canonical::property_path(&self.property),
        }
    }

    pub fn redirect_target(&self, policy: SlugRoutePolicy) -> String {
        match &self.zone {
            Some(zone) => policy.zone_target(&self.property, zone),
            None => policy.property_target(&self.property),
        }
    }

    pub fn view(&self, locales: &LocalePreference) -> ResolvedPathView {
        ResolvedPathView {
            locale: locales.preferred,
            property: PropertyView::build(&self.property, locales),
            zone: self
                .zone
                .as_ref()
                .map(|zone| ZoneView::build(&self.property, zone, locales)),
        }
    }
}
