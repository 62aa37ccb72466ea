use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::catalog::domain::{Property, PropertyId, Step, StepType, Zone, ZoneId};
use crate::catalog::repository::{PropertyStore, StoreError, ZoneStore};
use crate::catalog::{resolution_router, InMemoryCatalog, ResolutionService};
use crate::content::LocaleText;

pub(super) const CASA_ID: &str = "clx8k2m9p0000qw3h5f7a1b2c";
pub(super) const LOFT_ID: &str = "clx8k2m9p0001qw3h5f7a1b2c";
pub(super) const CASA_WIFI_ID: &str = "cly1zone00000wifi00000001";
pub(super) const LOFT_WIFI_ID: &str = "cly1zone00000wifi00000002";
pub(super) const CASA_POOL_ID: &str = "cly1zone00000pool00000001";

pub(super) fn casa() -> Property {
    Property {
        id: PropertyId(CASA_ID.to_string()),
        slug: Some("casa-playa".to_string()),
        name: LocaleText::localized([("es", "Casa Playa"), ("en", "Beach House")]),
        description: Some(LocaleText::localized([("es", "Frente al mar")])),
    }
}

pub(super) fn loft() -> Property {
    Property {
        id: PropertyId(LOFT_ID.to_string()),
        slug: None,
        name: LocaleText::plain("Loft Centro"),
        description: None,
    }
}

fn step(id: &str, order: i32, title: LocaleText) -> Step {
    Step {
        id: id.to_string(),
        step_type: StepType::Text,
        title,
        content: LocaleText::default(),
        order,
    }
}

pub(super) fn casa_wifi() -> Zone {
    Zone {
        id: ZoneId(CASA_WIFI_ID.to_string()),
        property_id: PropertyId(CASA_ID.to_string()),
        slug: Some("wifi".to_string()),
        name: LocaleText::plain("Wifi"),
        description: LocaleText::localized([("es", "Red: CasaPlaya"), ("en", "Network: CasaPlaya")]),
        steps: vec![
            step("s2", 2, LocaleText::localized([("es", "Introduce la clave")])),
            step("s1", 1, LocaleText::localized([("en", "Find the router")])),
        ],
    }
}

pub(super) fn loft_wifi() -> Zone {
    Zone {
        id: ZoneId(LOFT_WIFI_ID.to_string()),
        property_id: PropertyId(LOFT_ID.to_string()),
        slug: Some("wifi".to_string()),
        name: LocaleText::plain("Wifi Loft"),
        description: LocaleText::default(),
        steps: Vec::new(),
    }
}

pub(super) fn casa_pool() -> Zone {
    Zone {
        id: ZoneId(CASA_POOL_ID.to_string()),
        property_id: PropertyId(CASA_ID.to_string()),
        slug: None,
        name: LocaleText::localized([("es", "Piscina"), ("fr", "Piscine")]),
        description: LocaleText::default(),
        steps: Vec::new(),
    }
}

pub(super) fn catalog() -> InMemoryCatalog {
    let catalog = InMemoryCatalog::new();
    catalog.insert_property(casa()).expect("casa inserts");
    catalog.insert_property(loft()).expect("loft inserts");
    catalog.insert_zone(casa_wifi()).expect("casa wifi inserts");
    catalog.insert_zone(loft_wifi()).expect("loft wifi inserts");
    catalog.insert_zone(casa_pool()).expect("casa pool inserts");
    catalog
}

pub(super) fn build_service() -> (ResolutionService<InMemoryCatalog>, Arc<InMemoryCatalog>) {
    let store = Arc::new(catalog());
    (ResolutionService::new(store.clone()), store)
}

pub(super) fn router_with_service<S>(service: ResolutionService<S>) -> axum::Router
where
    S: PropertyStore + ZoneStore + 'static,
{
    resolution_router(Arc::new(service))
}

/// Records every lookup and never finds anything.
#[derive(Default)]
pub(super) struct RecordingStore {
    calls: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }
}

impl PropertyStore for RecordingStore {
    fn property_by_id(&self, id: &str) -> Result<Option<Property>, StoreError> {
        self.record(format!("property_by_id:{id}"));
        Ok(None)
    }

    fn property_by_slug(&self, slug: &str) -> Result<Option<Property>, StoreError> {
        self.record(format!("property_by_slug:{slug}"));
        Ok(None)
    }
}

impl ZoneStore for RecordingStore {
    fn zone_by_id(&self, property_id: &PropertyId, id: &str) -> Result<Option<Zone>, StoreError> {
        self.record(format!("zone_by_id:{property_id}:{id}"));
        Ok(None)
    }

    fn zone_by_slug(
        &self,
        property_id: &PropertyId,
        slug: &str,
    ) -> Result<Option<Zone>, StoreError> {
        self.record(format!("zone_by_slug:{property_id}:{slug}"));
        Ok(None)
    }
}

pub(super) struct UnavailableStore;

impl PropertyStore for UnavailableStore {
    fn property_by_id(&self, _id: &str) -> Result<Option<Property>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn property_by_slug(&self, _slug: &str) -> Result<Option<Property>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

impl ZoneStore for UnavailableStore {
    fn zone_by_id(&self, _property_id: &PropertyId, _id: &str) -> Result<Option<Zone>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn zone_by_slug(
        &self,
        _property_id: &PropertyId,
        _slug: &str,
    ) -> Result<Option<Zone>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

/// Holds rows whose stored shape no longer decodes.
pub(super) struct CorruptRowStore;

impl PropertyStore for CorruptRowStore {
    fn property_by_id(&self, id: &str) -> Result<Option<Property>, StoreError> {
        Err(StoreError::Malformed(format!("property {id}: name is not text")))
    }

    fn property_by_slug(&self, slug: &str) -> Result<Option<Property>, StoreError> {
        Err(StoreError::Malformed(format!("property {slug}: name is not text")))
    }
}

impl ZoneStore for CorruptRowStore {
    fn zone_by_id(&self, _property_id: &PropertyId, id: &str) -> Result<Option<Zone>, StoreError> {
        Err(StoreError::Malformed(format!("zone {id}: steps is not a list")))
    }

    fn zone_by_slug(
        &self,
        _property_id: &PropertyId,
        slug: &str,
    ) -> Result<Option<Zone>, StoreError> {
        Err(StoreError::Malformed(format!("zone {slug}: steps is not a list")))
    }
}

/// Resolves properties normally but answers every zone lookup with the loft's wifi zone,
/// ignoring the requested parent.
pub(super) struct LeakyZoneStore {
    pub(super) inner: InMemoryCatalog,
}

impl PropertyStore for LeakyZoneStore {
    fn property_by_id(&self, id: &str) -> Result<Option<Property>, StoreError> {
        self.inner.property_by_id(id)
    }

    fn property_by_slug(&self, slug: &str) -> Result<Option<Property>, StoreError> {
        self.inner.property_by_slug(slug)
    }
}

impl ZoneStore for LeakyZoneStore {
    fn zone_by_id(&self, _property_id: &PropertyId, _id: &str) -> Result<Option<Zone>, StoreError> {
        Ok(Some(loft_wifi()))
    }

    fn zone_by_slug(
        &self,
        _property_id: &PropertyId,
        _slug: &str,
    ) -> Result<Option<Zone>, StoreError> {
        Ok(Some(loft_wifi()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
