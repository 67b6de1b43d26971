//! PostgreSQL storage engine using Diesel ORM.
//!
//! Connections come from a `bb8` pool through `diesel-async`. Row structs
//! (`models.rs`) and the table definitions (`schema.rs`) stay private to this
//! module; the rest of the crate only sees [`DieselStorageEngine`] and its
//! construction helpers.
//!
//! # Example
//!
//! ```ignore
//! use hbnb::outbound::persistence::{DbPool, DieselStorageEngine, PoolConfig, SchemaMigrator};
//!
//! let url = "postgres://localhost/hbnb_dev_db";
//! let pool = DbPool::new(&PoolConfig::new(url)).await?;
//! let engine = DieselStorageEngine::new(pool, SchemaMigrator::new(url, false), clock);
//! ```

mod diesel_storage_engine;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_storage_engine::DieselStorageEngine;
pub use migrations::SchemaMigrator;
pub use pool::{DbPool, PoolConfig};
