//! JSON file storage engine.
//!
//! The whole store lives in memory as a `"Type.id" -> entity` map and is
//! mirrored to one JSON document, rewritten atomically after every commit
//! or delete. A tokio mutex serialises readers and writers; memory is only
//! updated once the file write succeeded.

mod atomic_io;
mod integrity;

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use mockable::Clock;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::entities::{Entity, EntityKind, Timestamp};
use crate::domain::ports::{EntityMap, StorageEngine, StorageError};
use crate::domain::{CascadePlan, PendingSet, prepare_batch};

/// File name used when no path is configured.
pub const DEFAULT_FILE_PATH: &str = "file.json";

/// [`StorageEngine`] persisting to a single JSON file.
pub struct FileStorageEngine {
    dir: Arc<Dir>,
    file_name: Utf8PathBuf,
    objects: Mutex<EntityMap>,
    pending: PendingSet,
    clock: Arc<dyn Clock>,
}

impl FileStorageEngine {
    /// Open an engine for `path`. The parent directory must exist; the file
    /// itself is created on the first write.
    ///
    /// The engine starts empty; call [`StorageEngine::reload`] to load the
    /// file.
    pub fn open(path: &Utf8Path, clock: Arc<dyn Clock>) -> Result<Self, StorageError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| StorageError::io(format!("{path} does not name a file")))?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| StorageError::io(format!("cannot open {parent}: {err}")))?;
        Ok(Self {
            dir: Arc::new(dir),
            file_name: Utf8PathBuf::from(file_name),
            objects: Mutex::new(EntityMap::new()),
            pending: PendingSet::new(),
            clock,
        })
    }

    fn now(&self) -> Timestamp {
        Timestamp::from_datetime(self.clock.utc())
    }

    async fn write(&self, objects: &EntityMap) -> Result<(), StorageError> {
        let document: Map<String, Value> = objects
            .iter()
            .map(|(key, entity)| (key.clone(), Value::Object(entity.to_dict())))
            .collect();
        let contents = serde_json::to_vec(&document)
            .map_err(|err| StorageError::io(format!("cannot encode store: {err}")))?;
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        tokio::task::spawn_blocking(move || atomic_io::replace_file(&dir, &file_name, &contents))
            .await
            .map_err(|err| StorageError::io(format!("write task failed: {err}")))?
            .map_err(|err| StorageError::io(format!("cannot write {}: {err}", self.file_name)))?;
        debug!(path = %self.file_name, objects = objects.len(), "store file written");
        Ok(())
    }

    async fn read(&self) -> Result<EntityMap, StorageError> {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        let contents = tokio::task::spawn_blocking(move || dir.read_to_string(&file_name))
            .await
            .map_err(|err| StorageError::io(format!("read task failed: {err}")))?;
        let contents = match contents {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(EntityMap::new()),
            Err(err) => {
                return Err(StorageError::io(format!("cannot read {}: {err}", self.file_name)));
            }
        };
        decode_document(&contents, self.now())
    }
}

fn decode_document(contents: &str, now: Timestamp) -> Result<EntityMap, StorageError> {
    let document: Map<String, Value> = serde_json::from_str(contents)
        .map_err(|err| StorageError::corrupt(format!("store is not a JSON object: {err}")))?;
    let mut objects = EntityMap::new();
    for (key, value) in document {
        let Value::Object(attrs) = value else {
            return Err(StorageError::corrupt(format!("{key} is not an object")));
        };
        let entity = Entity::from_dict(attrs, now)
            .map_err(|err| StorageError::corrupt(format!("{key}: {err}")))?;
        if entity.storage_key() != key {
            return Err(StorageError::corrupt(format!(
                "{key} holds {}",
                entity.storage_key()
            )));
        }
        objects.insert(key, entity);
    }
    Ok(objects)
}

#[async_trait]
impl StorageEngine for FileStorageEngine {
    async fn all(&self, kind: Option<EntityKind>) -> Result<EntityMap, StorageError> {
        let objects = self.objects.lock().await;
        Ok(objects
            .iter()
            .filter(|(_, entity)| kind.is_none_or(|kind| entity.kind() == kind))
            .map(|(key, entity)| (key.clone(), entity.clone()))
            .collect())
    }

    async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>, StorageError> {
        Ok(self.objects.lock().await.get(&kind.storage_key(id)).cloned())
    }

    fn register(&self, entity: Entity) {
        self.pending.stage(entity);
    }

    async fn save(&self) -> Result<Vec<Entity>, StorageError> {
        let staged = self.pending.snapshot();
        if staged.is_empty() {
            return Ok(Vec::new());
        }
        let committed = self.commit(staged.clone()).await?;
        self.pending.settle(&staged);
        Ok(committed)
    }

    async fn commit(&self, batch: Vec<Entity>) -> Result<Vec<Entity>, StorageError> {
        let batch = prepare_batch(batch, self.now());
        let mut objects = self.objects.lock().await;
        integrity::check_batch(&objects, &batch)?;
        let mut next = objects.clone();
        for entity in &batch {
            next.insert(entity.storage_key(), entity.clone());
        }
        self.write(&next).await?;
        *objects = next;
        debug!(count = batch.len(), "batch committed");
        Ok(batch)
    }

    async fn update(&self, entity: Entity) -> Result<Entity, StorageError> {
        let key = entity.storage_key();
        let mut objects = self.objects.lock().await;
        let Some(stored) = objects.get(&key) else {
            return Err(StorageError::not_found(entity.kind().as_str(), entity.id()));
        };
        if stored.updated_at() != entity.updated_at() {
            return Err(StorageError::stale(entity.kind().as_str(), entity.id()));
        }
        let mut entity = entity;
        entity.touch(self.now());
        integrity::check_batch(&objects, std::slice::from_ref(&entity))?;
        let mut next = objects.clone();
        next.insert(key.clone(), entity.clone());
        self.write(&next).await?;
        *objects = next;
        debug!(key = %key, "entity updated");
        Ok(entity)
    }

    async fn delete(&self, entity: &Entity) -> Result<(), StorageError> {
        let key = entity.storage_key();
        let mut objects = self.objects.lock().await;
        self.pending.discard(&key);
        if !objects.contains_key(&key) {
            return Ok(());
        }
        let plan = CascadePlan::collect(entity, &objects);
        let mut next = objects.clone();
        for doomed in plan.storage_keys() {
            next.remove(&doomed);
            self.pending.discard(&doomed);
        }
        let removed_amenities: Vec<&str> = plan.ids(EntityKind::Amenity).collect();
        if !removed_amenities.is_empty() {
            for stored in next.values_mut() {
                if let Entity::Place(place) = stored {
                    for amenity_id in &removed_amenities {
                        place.unlink_amenity(amenity_id);
                    }
                }
            }
        }
        self.write(&next).await?;
        *objects = next;
        debug!(key = %key, removed = plan.len(), "entity deleted");
        Ok(())
    }

    async fn count(&self, kind: Option<EntityKind>) -> Result<usize, StorageError> {
        let objects = self.objects.lock().await;
        Ok(match kind {
            Some(kind) => objects.values().filter(|entity| entity.kind() == kind).count(),
            None => objects.len(),
        })
    }

    async fn reload(&self) -> Result<(), StorageError> {
        let mut objects = self.objects.lock().await;
        let loaded = self.read().await?;
        info!(path = %self.file_name, objects = loaded.len(), "file store loaded");
        *objects = loaded;
        self.pending.clear();
        Ok(())
    }

    async fn close(&self) -> Result<(), StorageError> {
        self.pending.clear();
        debug!(path = %self.file_name, "file store closed");
        Ok(())
    }
}
