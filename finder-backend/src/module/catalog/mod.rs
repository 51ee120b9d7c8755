///! Creature catalog provider
///!
///! Loads the catalog export from disk, validates it and serves immutable
///! snapshots to the availability engine.

pub mod loader;
pub mod store;

pub use loader::{load_catalog, parse_catalog, Catalog, CatalogError};
pub use store::CatalogStore;
