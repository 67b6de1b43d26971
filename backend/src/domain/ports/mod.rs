//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod storage_engine;

#[cfg(test)]
pub use storage_engine::MockStorageEngine;
pub use storage_engine::{EntityMap, StorageEngine, StorageError};
