use std::collections::HashSet;
use std::sync::Arc;

use crate::error::CatalogError;
use crate::types::Endpoint;

/// Immutable set of endpoints with unique ids.
///
/// Endpoints are reference counted so compiled steps can share them without copying;
/// nothing hands out mutable access once the catalog is built.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct EndpointCatalog {
    endpoints: Vec<Arc<Endpoint>>,
}

impl EndpointCatalog {
    pub fn new(endpoints: Vec<Endpoint>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::<&str>::new();
        for e in &endpoints {
            if !seen.insert(e.id.as_str()) {
                return Err(CatalogError::DuplicateEndpointId(e.id.clone()));
            }
        }
        Ok(Self {
            endpoints: endpoints.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Endpoint>> {
        self.endpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Linear scan; the compiler builds its own index instead of calling this per step.
    pub fn find(&self, id: &str) -> Option<&Arc<Endpoint>> {
        self.endpoints.iter().find(|e| e.id == id)
    }
}
