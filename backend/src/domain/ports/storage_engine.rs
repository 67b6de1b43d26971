//! Port abstraction for persistence engines and their errors.
use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::entities::{Entity, EntityKind};

use super::define_port_error;

/// Entities keyed by `"Type.id"`.
pub type EntityMap = BTreeMap<String, Entity>;

define_port_error! {
    /// Failures raised by storage engines.
    pub enum StorageError {
        /// The backend could not be reached.
        Connection { message: String } => "storage connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "storage query failed: {message}",
        /// Reading or writing the backing file failed.
        Io { message: String } => "storage i/o failed: {message}",
        /// Persisted data could not be decoded.
        Corrupt { message: String } => "stored data is corrupt: {message}",
        /// A foreign key points at a record that does not exist.
        InvalidReference { field: String, target: String, id: String } =>
            "{field} references missing {target} {id}",
        /// The id is already used by a record of another type.
        IdConflict { id: String, kind: String } => "id {id} is already used by a {kind}",
        /// Another user already holds this email.
        DuplicateEmail { email: String } => "email {email} is already registered",
        /// The record to overwrite is no longer stored.
        NotFound { kind: String, id: String } => "{kind} {id} not found",
        /// The record changed after it was read.
        Stale { kind: String, id: String } => "{kind} {id} was modified concurrently",
    }
}

/// Persistence contract shared by the file and database engines.
///
/// Engines enforce referential integrity, cross-type id uniqueness and the
/// cascade graph from [`EntityKind::dependents`], so callers never see a
/// partially applied commit or delete.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageEngine: Send + Sync {
    /// Every stored entity, optionally restricted to one type.
    async fn all(&self, kind: Option<EntityKind>) -> Result<EntityMap, StorageError>;

    /// Fetch one entity; `None` when the id is unknown.
    async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>, StorageError>;

    /// Stage an entity for the next [`save`](StorageEngine::save).
    ///
    /// Registering the same `"Type.id"` twice keeps the latest version.
    fn register(&self, entity: Entity);

    /// Commit everything staged so far.
    async fn save(&self) -> Result<Vec<Entity>, StorageError>;

    /// Atomically write a batch, returning it with refreshed `updated_at`.
    async fn commit(&self, batch: Vec<Entity>) -> Result<Vec<Entity>, StorageError>;

    /// Overwrite a stored entity read earlier, returning it with a refreshed
    /// `updated_at`.
    ///
    /// `entity` must still carry the `updated_at` it was read with. The write
    /// fails with [`StorageError::NotFound`] when the record has been deleted
    /// and with [`StorageError::Stale`] when another write landed first, so a
    /// deleted record is never brought back.
    async fn update(&self, entity: Entity) -> Result<Entity, StorageError>;

    /// Delete an entity and its dependents. Unknown entities are ignored.
    async fn delete(&self, entity: &Entity) -> Result<(), StorageError>;

    /// Number of stored entities, optionally restricted to one type.
    async fn count(&self, kind: Option<EntityKind>) -> Result<usize, StorageError>;

    /// Re-read persisted state and clear staging.
    async fn reload(&self) -> Result<(), StorageError>;

    /// Release the engine's session and drop staged entities.
    async fn close(&self) -> Result<(), StorageError>;
}
