use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Deserialize;
use tracing::{info, warn};

use super::domain::{Property, PropertyId, Step, Zone, ZoneId};
use super::identifier::{classify, IdentifierKind};
use super::repository::{PropertyStore, StoreError, ZoneStore};
use crate::content::LocaleText;

#[derive(Debug, Default)]
struct CatalogIndex {
    properties: HashMap<PropertyId, Property>,
    property_slugs: HashMap<String, PropertyId>,
    zones: HashMap<PropertyId, HashMap<ZoneId, Zone>>,
    zone_slugs: HashMap<(PropertyId, String), ZoneId>,
}

/// Thread-safe catalog enforcing the same uniqueness rules as the storage indexes: property
/// IDs and slugs are globally unique, zone IDs and slugs are unique within their property.
///
/// Each write takes the lock once for both the uniqueness check and the insert, so racing
/// writers for one slug leave exactly one winner.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    index: Arc<RwLock<CatalogIndex>>,
}

fn normalize_slug(slug: Option<String>) -> Option<String> {
    slug.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// ID-shaped slugs are stored, but resolvers only ever look them up as IDs.
fn warn_if_id_shaped(entity: &'static str, owner: &str, slug: Option<&str>) {
    if let Some(slug) = slug {
        if classify(slug) == IdentifierKind::Id {
            warn!(
                entity,
                owner,
                slug,
                "slug is shaped like an id and cannot be resolved by slug"
            );
        }
    }
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), properties = catalog.property_count(), "catalog loaded");
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogLoadError> {
        let seed: CatalogSeed = serde_json::from_reader(reader)?;
        Self::from_seed(seed)
    }

    pub fn from_seed(seed: CatalogSeed) -> Result<Self, CatalogLoadError> {
        let catalog = Self::new();
        for property_seed in seed.properties {
            let property_id = PropertyId(property_seed.id);
            catalog.insert_property(Property {
                id: property_id.clone(),
                slug: property_seed.slug,
                name: property_seed.name,
                description: property_seed.description,
            })?;

            for zone_seed in property_seed.zones {
                catalog.insert_zone(Zone {
                    id: ZoneId(zone_seed.id),
                    property_id: property_id.clone(),
                    slug: zone_seed.slug,
                    name: zone_seed.name,
                    description: zone_seed.description,
                    steps: zone_seed.steps,
                })?;
            }
        }
        Ok(catalog)
    }

    pub fn property_count(&self) -> usize {
        self.read().map(|index| index.properties.len()).unwrap_or(0)
    }

    pub fn insert_property(&self, mut property: Property) -> Result<(), StoreError> {
        property.slug = normalize_slug(property.slug.take());
        let mut index = self.write()?;

        if index.properties.contains_key(&property.id) {
            return Err(StoreError::Conflict {
                entity: "property",
                key: property.id.0,
            });
        }
        if let Some(slug) = &property.slug {
            if index.property_slugs.contains_key(slug) {
                return Err(StoreError::Conflict {
                    entity: "property slug",
                    key: slug.clone(),
                });
            }
            index
                .property_slugs
                .insert(slug.clone(), property.id.clone());
        }

        warn_if_id_shaped("property", property.id.as_str(), property.slug.as_deref());
        index.properties.insert(property.id.clone(), property);
        Ok(())
    }

    pub fn insert_zone(&self, mut zone: Zone) -> Result<(), StoreError> {
        zone.slug = normalize_slug(zone.slug.take());
        let mut index = self.write()?;

        if !index.properties.contains_key(&zone.property_id) {
            return Err(StoreError::Missing {
                entity: "property",
                key: zone.property_id.0,
            });
        }

        let id_taken = index
            .zones
            .get(&zone.property_id)
            .is_some_and(|siblings| siblings.contains_key(&zone.id));
        if id_taken {
            return Err(StoreError::Conflict {
                entity: "zone",
                key: format!("{}/{}", zone.property_id, zone.id),
            });
        }

        if let Some(slug) = &zone.slug {
            let key = (zone.property_id.clone(), slug.clone());
            if index.zone_slugs.contains_key(&key) {
                return Err(StoreError::Conflict {
                    entity: "zone slug",
                    key: format!("{}/{}", zone.property_id, slug),
                });
            }
            index.zone_slugs.insert(key, zone.id.clone());
        }

        warn_if_id_shaped("zone", zone.id.as_str(), zone.slug.as_deref());
        index
            .zones
            .entry(zone.property_id.clone())
            .or_default()
            .insert(zone.id.clone(), zone);
        Ok(())
    }

    /// Reassigns (or clears) a property slug. The previous slug stops resolving immediately.
    pub fn assign_property_slug(
        &self,
        id: &PropertyId,
        slug: Option<String>,
    ) -> Result<(), StoreError> {
        let slug = normalize_slug(slug);
        let mut index = self.write()?;

        if let Some(new_slug) = &slug {
            match index.property_slugs.get(new_slug) {
                Some(owner) if owner != id => {
                    return Err(StoreError::Conflict {
                        entity: "property slug",
                        key: new_slug.clone(),
                    });
                }
                _ => {}
            }
        }

        let previous = match index.properties.get_mut(id) {
            Some(property) => std::mem::replace(&mut property.slug, slug.clone()),
            None => {
                return Err(StoreError::Missing {
                    entity: "property",
                    key: id.0.clone(),
                })
            }
        };

        if let Some(previous) = previous {
            index.property_slugs.remove(&previous);
        }
        warn_if_id_shaped("property", id.as_str(), slug.as_deref());
        if let Some(slug) = slug {
            index.property_slugs.insert(slug, id.clone());
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CatalogIndex>, StoreError> {
        self.index
            .read()
            .map_err(|_| StoreError::Unavailable("catalog lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CatalogIndex>, StoreError> {
        self.index
            .write()
            .map_err(|_| StoreError::Unavailable("catalog lock poisoned".to_string()))
    }
}

impl PropertyStore for InMemoryCatalog {
    fn property_by_id(&self, id: &str) -> Result<Option<Property>, StoreError> {
        let index = self.read()?;
        Ok(index.properties.get(&PropertyId(id.to_string())).cloned())
    }

    fn property_by_slug(&self, slug: &str) -> Result<Option<Property>, StoreError> {
        let index = self.read()?;
        Ok(index
            .property_slugs
            .get(slug)
            .and_then(|id| index.properties.get(id))
            .cloned())
    }
}

impl ZoneStore for InMemoryCatalog {
    fn zone_by_id(&self, property_id: &PropertyId, id: &str) -> Result<Option<Zone>, StoreError> {
        let index = self.read()?;
        Ok(index
            .zones
            .get(property_id)
            .and_then(|siblings| siblings.get(&ZoneId(id.to_string())))
            .cloned())
    }

    fn zone_by_slug(
        &self,
        property_id: &PropertyId,
        slug: &str,
    ) -> Result<Option<Zone>, StoreError> {
        let index = self.read()?;
        Ok(index
            .zone_slugs
            .get(&(property_id.clone(), slug.to_string()))
            .and_then(|zone_id| {
                index
                    .zones
                    .get(property_id)
                    .and_then(|siblings| siblings.get(zone_id))
            })
            .cloned())
    }
}

/// JSON document used to seed an [`InMemoryCatalog`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub properties: Vec<PropertySeed>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySeed {
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: LocaleText,
    #[serde(default)]
    pub description: Option<LocaleText>,
    #[serde(default)]
    pub zones: Vec<ZoneSeed>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSeed {
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: LocaleText,
    #[serde(default)]
    pub description: LocaleText,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to open catalog '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog rejected: {0}")]
    Store(#[from] StoreError),
}
