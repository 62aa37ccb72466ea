use std::sync::Arc;

use tracing::{debug, error, warn};

use super::domain::{Property, PropertyId, Zone};
use super::identifier::{classify, IdentifierKind};
use super::repository::{PropertyStore, StoreError, ZoneStore};

/// Resolves a top-level identifier to a property with exactly one indexed lookup.
pub struct PropertyResolver<S> {
    store: Arc<S>,
}

impl<S> PropertyResolver<S>
where
    S: PropertyStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// `Ok(None)` means no property answers to `identifier`; `Err` is reserved for storage faults.
    pub fn resolve(&self, identifier: &str) -> Result<Option<Property>, ResolveError> {
        if identifier.is_empty() {
            return Ok(None);
        }

        let kind = classify(identifier);
        debug!(identifier, ?kind, "resolving property");

        let lookup = match kind {
            IdentifierKind::Id => self.store.property_by_id(identifier),
            IdentifierKind::Slug => self.store.property_by_slug(identifier),
        };

        lookup.map_err(|source| {
            error!(identifier, ?kind, error = %source, "property lookup failed");
            ResolveError::Storage {
                entity: "property",
                identifier: identifier.to_string(),
                source,
            }
        })
    }
}

/// Resolves a zone identifier inside an already-resolved property.
pub struct ZoneResolver<S> {
    store: Arc<S>,
}

impl<S> ZoneResolver<S>
where
    S: ZoneStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Zones owned by a different property are reported as not found.
    pub fn resolve(
        &self,
        property_id: &PropertyId,
        identifier: &str,
    ) -> Result<Option<Zone>, ResolveError> {
        if identifier.is_empty() {
            return Ok(None);
        }

        let kind = classify(identifier);
        debug!(%property_id, identifier, ?kind, "resolving zone");

        let lookup = match kind {
            IdentifierKind::Id => self.store.zone_by_id(property_id, identifier),
            IdentifierKind::Slug => self.store.zone_by_slug(property_id, identifier),
        };

        let zone = lookup.map_err(|source| {
            error!(%property_id, identifier, ?kind, error = %source, "zone lookup failed");
            ResolveError::Storage {
                entity: "zone",
                identifier: identifier.to_string(),
                source,
            }
        })?;

        Ok(zone.filter(|zone| {
            let owned = zone.property_id == *property_id;
            if !owned {
                warn!(
                    %property_id,
                    owner = %zone.property_id,
                    zone_id = %zone.id,
                    "zone store returned a zone owned by another property"
                );
            }
            owned
        }))
    }
}

/// Resolution failures other than "not found".
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("{entity} lookup for '{identifier}' failed: {source}")]
    Storage {
        entity: &'static str,
        identifier: String,
        #[source]
        source: StoreError,
    },
}
