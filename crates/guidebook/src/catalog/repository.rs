use super::domain::{Property, PropertyId, Zone};

/// Read access to properties, backed by unique indexes on `id` and `slug`.
pub trait PropertyStore: Send + Sync {
    fn property_by_id(&self, id: &str) -> Result<Option<Property>, StoreError>;
    fn property_by_slug(&self, slug: &str) -> Result<Option<Property>, StoreError>;
}

/// Read access to zones. Every lookup is scoped to the owning property.
pub trait ZoneStore: Send + Sync {
    fn zone_by_id(&self, property_id: &PropertyId, id: &str) -> Result<Option<Zone>, StoreError>;
    fn zone_by_slug(
        &self,
        property_id: &PropertyId,
        slug: &str,
    ) -> Result<Option<Zone>, StoreError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} '{key}' already exists")]
    Conflict { entity: &'static str, key: String },
    #[error("{entity} '{key}' does not exist")]
    Missing { entity: &'static str, key: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store returned an unexpected shape: {0}")]
    Malformed(String),
}
