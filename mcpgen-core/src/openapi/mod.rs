//! Normalizes Swagger 2.0 / OpenAPI 3.x documents into an [`EndpointCatalog`].
//!
//! [`EndpointCatalog`]: crate::types::EndpointCatalog

mod info;
mod loader;
mod operations;
mod refs;

pub use info::{SpecFlavor, SpecInfo};
pub use loader::{load_catalog_file, load_catalog_str, parse_openapi_str, LoadedSpec};
