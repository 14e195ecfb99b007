//! Catalog and history file loading.

mod loader;

pub use loader::{CatalogLoadError, load_catalog, load_history};
