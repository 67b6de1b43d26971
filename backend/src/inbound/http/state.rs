//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the storage facade and remain testable against any engine.

use crate::domain::Storage;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub storage: Storage,
}

impl HttpState {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}
