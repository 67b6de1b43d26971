//! Staging area for entities registered with `new` and not yet saved.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::entities::{Entity, Timestamp};

/// Shape a batch for commit: later versions of the same `"Type.id"` win,
/// parents sort before children and every entity is touched with `now`.
pub fn prepare_batch(batch: Vec<Entity>, now: Timestamp) -> Vec<Entity> {
    let mut latest: BTreeMap<String, Entity> = BTreeMap::new();
    for entity in batch {
        latest.insert(entity.storage_key(), entity);
    }
    let mut prepared: Vec<Entity> = latest.into_values().collect();
    prepared.sort_by_key(|entity| entity.kind().rank());
    for entity in &mut prepared {
        entity.touch(now);
    }
    prepared
}

/// Entities waiting for the next `save`, keyed by `"Type.id"`.
///
/// The lock is never held across an await point.
#[derive(Debug, Default)]
pub struct PendingSet {
    entries: Mutex<BTreeMap<String, Entity>>,
}

impl PendingSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Entity>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stage an entity, replacing any earlier version with the same key.
    pub fn stage(&self, entity: Entity) {
        self.lock().insert(entity.storage_key(), entity);
    }

    /// Staged entities, parents before children.
    pub fn snapshot(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self.lock().values().cloned().collect();
        entities.sort_by_key(|entity| entity.kind().rank());
        entities
    }

    /// Drop entries that still match the committed snapshot.
    ///
    /// Entries re-registered after the snapshot was taken stay staged.
    pub fn settle(&self, committed: &[Entity]) {
        let mut entries = self.lock();
        for entity in committed {
            let key = entity.storage_key();
            if entries.get(&key) == Some(entity) {
                entries.remove(&key);
            }
        }
    }

    /// Forget a staged entity.
    pub fn discard(&self, key: &str) {
        self.lock().remove(key);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
