//! Property and zone addressing.
//!
//! Every property and zone can be addressed by its opaque storage ID or by a human slug. The
//! classifier picks the lookup mode, the resolvers run exactly one indexed lookup per segment
//! (zones always scoped to their resolved property), and [`canonical`] turns a resolved entity
//! back into its preferred public path.

pub mod canonical;
pub mod domain;
pub mod identifier;
pub mod memory;
pub mod repository;
pub mod resolver;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use canonical::{id_property_path, id_zone_path, property_path, zone_path, SlugRoutePolicy};
pub use domain::{Property, PropertyId, Step, StepType, Zone, ZoneId};
pub use identifier::{classify, IdentifierKind};
pub use memory::{CatalogLoadError, CatalogSeed, InMemoryCatalog, PropertySeed, ZoneSeed};
pub use repository::{PropertyStore, StoreError, ZoneStore};
pub use resolver::{PropertyResolver, ResolveError, ZoneResolver};
pub use router::resolution_router;
pub use service::{PathLookup, ResolutionService, ResolvedPath};
pub use views::{PropertyView, ResolvedPathView, StepView, ZoneView};
