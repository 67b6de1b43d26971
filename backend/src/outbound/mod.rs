//! Outbound adapters implementing the storage port.
//!
//! - **file_storage**: a JSON document rewritten atomically on every change
//! - **persistence**: PostgreSQL via Diesel ORM
//!
//! Both engines share the cascade and staging helpers from the domain layer
//! and contain no HTTP concerns.

pub mod file_storage;
pub mod persistence;
