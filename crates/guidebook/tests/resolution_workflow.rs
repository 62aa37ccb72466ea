//! End-to-end scenarios for identifier resolution against the bundled sample catalog.
//!
//! Requests go through the public router so classification, scoped zone lookup, canonical
//! paths and locale fallback are exercised together.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use guidebook::catalog::{
    property_path, resolution_router, zone_path, InMemoryCatalog, PathLookup, ResolutionService,
};
use guidebook::content::{Locale, LocalePreference};

const CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures/catalog.json");
const CASA_ID: &str = "clx8k2m9p0000qw3h5f7a1b2c";
const LOFT_ID: &str = "clx8k2m9p0001qw3h5f7a1b2c";

fn service() -> ResolutionService<InMemoryCatalog> {
    let catalog = InMemoryCatalog::from_path(CATALOG).expect("sample catalog loads");
    ResolutionService::new(Arc::new(catalog))
}

fn router() -> axum::Router {
    resolution_router(Arc::new(service()))
}

async fn get(router: axum::Router, uri: &str) -> Response {
    router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn missing_slug_is_404() {
    let response = get(router(), "/api/resolve/property/no-existe").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Property not found" })
    );
}

#[tokio::test]
async fn existing_slug_returns_property_json() {
    let response = get(router(), "/api/resolve/property/casa-playa").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["id"], CASA_ID);
    assert_eq!(body["slug"], "casa-playa");
    assert_eq!(body["name"]["fr"], "Maison de plage");
}

#[tokio::test]
async fn property_without_slug_resolves_by_id_only() {
    let response = get(router(), &format!("/api/resolve/property/{LOFT_ID}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["slug"], Value::Null);
    assert_eq!(body["name"], "Loft Centro");

    let response = get(router(), "/api/resolve/property/loft-centro").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wifi_slug_resolves_separately_under_each_property() {
    let casa = json_body(get(router(), &format!("/api/resolve/zone/{CASA_ID}/wifi")).await).await;
    let loft = json_body(get(router(), &format!("/api/resolve/zone/{LOFT_ID}/wifi")).await).await;

    assert_ne!(casa["id"], loft["id"]);
    assert_eq!(casa["propertyId"], CASA_ID);
    assert_eq!(loft["propertyId"], LOFT_ID);
}

#[tokio::test]
async fn zone_of_another_property_is_404() {
    let response = get(
        router(),
        &format!("/api/resolve/zone/{CASA_ID}/cly1zone00000wifi00000002"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "error": "Zone not found" }));
}

#[tokio::test]
async fn zone_view_orders_steps_and_localizes_text() {
    let request = Request::get("/api/resolve/view/casa-playa/wifi")
        .header(header::ACCEPT_LANGUAGE, "fr-FR")
        .body(Body::empty())
        .unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["property"]["name"], "Maison de plage");
    assert_eq!(body["zone"]["name"], "Wifi");
    // no fr entry, default walk starts with es
    assert_eq!(body["zone"]["description"], "Red y clave");
    assert_eq!(body["zone"]["steps"][0]["title"], "Red");
    assert_eq!(body["zone"]["steps"][0]["content"], "CasaPlaya_5G");
    assert_eq!(body["zone"]["steps"][1]["type"], "TEXT");
}

#[test]
fn canonical_paths_prefer_slugs_with_id_fallback() {
    let service = service().with_locales(LocalePreference::new(Locale::En, vec![Locale::Es]));

    let PathLookup::Resolved(resolved) = service
        .resolve_path(CASA_ID, Some("cly1zone00000pool00000001"))
        .expect("lookup")
    else {
        panic!("pool resolves");
    };
    let zone = resolved.zone.as_ref().expect("zone present");
    assert_eq!(property_path(&resolved.property), "/properties/casa-playa");
    assert_eq!(
        zone_path(&resolved.property, zone),
        "/properties/casa-playa/cly1zone00000pool00000001"
    );
    assert_eq!(service.locales().text(&zone.name), "Piscina");

    let PathLookup::Resolved(resolved) = service
        .resolve_path(LOFT_ID, Some("wifi"))
        .expect("lookup")
    else {
        panic!("loft wifi resolves");
    };
    assert_eq!(resolved.canonical_path(), format!("/properties/{LOFT_ID}/wifi"));
}
