use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tracing::error;

use super::domain::PropertyId;
use super::repository::{PropertyStore, ZoneStore};
use super::resolver::ResolveError;
use super::service::{PathLookup, ResolutionService, ResolvedPath};
use crate::content::Locale;

const PROPERTY_NOT_FOUND: &str = "Property not found";
const ZONE_NOT_FOUND: &str = "Zone not found";
const INTERNAL_ERROR: &str = "Internal server error";

/// Router builder exposing the read-only resolution endpoints.
pub fn resolution_router<S>(service: Arc<ResolutionService<S>>) -> Router
where
    S: PropertyStore + ZoneStore + 'static,
{
    Router::new()
        .route(
            "/api/resolve/property/:identifier",
            get(property_handler::<S>),
        )
        .route(
            "/api/resolve/zone/:property_id/:zone_identifier",
            get(zone_handler::<S>),
        )
        .route(
            "/api/resolve/view/:property_identifier",
            get(property_view_handler::<S>),
        )
        .route(
            "/api/resolve/view/:property_identifier/:zone_identifier",
            get(zone_view_handler::<S>),
        )
        .route("/properties/slug/:slug", get(property_slug_handler::<S>))
        .route(
            "/properties/slug/:slug/:zone_identifier",
            get(zone_slug_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn property_handler<S>(
    State(service): State<Arc<ResolutionService<S>>>,
    Path(identifier): Path<String>,
) -> Response
where
    S: PropertyStore + ZoneStore + 'static,
{
    match service.resolve_property(&identifier) {
        Ok(Some(property)) => (StatusCode::OK, axum::Json(property)).into_response(),
        Ok(None) => not_found(PROPERTY_NOT_FOUND),
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn zone_handler<S>(
    State(service): State<Arc<ResolutionService<S>>>,
    Path((property_id, zone_identifier)): Path<(String, String)>,
) -> Response
where
    S: PropertyStore + ZoneStore + 'static,
{
    match service.resolve_zone(&PropertyId(property_id), &zone_identifier) {
        Ok(Some(zone)) => (StatusCode::OK, axum::Json(zone)).into_response(),
        Ok(None) => not_found(ZONE_NOT_FOUND),
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn property_view_handler<S>(
    State(service): State<Arc<ResolutionService<S>>>,
    Path(property_identifier): Path<String>,
    headers: HeaderMap,
) -> Response
where
    S: PropertyStore + ZoneStore + 'static,
{
    let locales = service.preference_for(requested_locale(&headers));
    lookup_response(service.resolve_path(&property_identifier, None), |resolved| {
        (StatusCode::OK, axum::Json(resolved.view(&locales))).into_response()
    })
}

pub(crate) async fn zone_view_handler<S>(
    State(service): State<Arc<ResolutionService<S>>>,
    Path((property_identifier, zone_identifier)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response
where
    S: PropertyStore + ZoneStore + 'static,
{
    let locales = service.preference_for(requested_locale(&headers));
    lookup_response(
        service.resolve_path(&property_identifier, Some(zone_identifier.as_str())),
        |resolved| (StatusCode::OK, axum::Json(resolved.view(&locales))).into_response(),
    )
}

pub(crate) async fn property_slug_handler<S>(
    State(service): State<Arc<ResolutionService<S>>>,
    Path(slug): Path<String>,
) -> Response
where
    S: PropertyStore + ZoneStore + 'static,
{
    let policy = service.slug_policy();
    lookup_response(service.resolve_path(&slug, None), |resolved| {
        Redirect::temporary(&resolved.redirect_target(policy)).into_response()
    })
}

pub(crate) async fn zone_slug_handler<S>(
    State(service): State<Arc<ResolutionService<S>>>,
    Path((slug, zone_identifier)): Path<(String, String)>,
) -> Response
where
    S: PropertyStore + ZoneStore + 'static,
{
    let policy = service.slug_policy();
    lookup_response(
        service.resolve_path(&slug, Some(zone_identifier.as_str())),
        |resolved| Redirect::temporary(&resolved.redirect_target(policy)).into_response(),
    )
}

fn requested_locale(headers: &HeaderMap) -> Option<Locale> {
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(Locale::from_accept_language)
}

fn lookup_response<F>(lookup: Result<PathLookup, ResolveError>, found: F) -> Response
where
    F: FnOnce(ResolvedPath) -> Response,
{
    match lookup {
        Ok(PathLookup::Resolved(resolved)) => found(resolved),
        Ok(PathLookup::MissingProperty) => not_found(PROPERTY_NOT_FOUND),
        Ok(PathLookup::MissingZone { .. }) => not_found(ZONE_NOT_FOUND),
        Err(err) => internal_error(err),
    }
}

fn not_found(message: &'static str) -> Response {
    (StatusCode::NOT_FOUND, axum::Json(json!({ "error": message }))).into_response()
}

fn internal_error(err: ResolveError) -> Response {
    error!(error = %err, "resolution request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({ "error": INTERNAL_ERROR })),
    )
        .into_response()
}
