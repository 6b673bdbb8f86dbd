use std::sync::Arc;

use axum::http::{header, HeaderMap, HeaderValue};
use discount_core::CodeRegistry;

#[derive(Clone)]
pub struct AppState {
    registry: Arc<dyn CodeRegistry>,
    allowed_origins: Arc<[HeaderValue]>,
}

impl AppState {
    pub fn new(registry: Arc<dyn CodeRegistry>) -> Self {
        Self {
            registry,
            allowed_origins: Arc::from(Vec::new()),
        }
    }

    /// Restricts browser connections to pages served from `origins`.
    pub fn with_allowed_origins(mut self, origins: &[HeaderValue]) -> Self {
        self.allowed_origins = Arc::from(origins);
        self
    }

    /// Returns a handle to the shared registry.
    pub fn registry(&self) -> Arc<dyn CodeRegistry> {
        Arc::clone(&self.registry)
    }

    /// Requests without an `Origin` header come from non-browser clients and
    /// are always admitted.
    pub fn admits_origin(&self, headers: &HeaderMap) -> bool {
        match headers.get(header::ORIGIN) {
            Some(origin) => self.allowed_origins.contains(origin),
            None => true,
        }
    }
}
