//! Shared helpers for integration tests.

use std::sync::Arc;

use camino::Utf8PathBuf;
use hbnb::domain::Storage;
use hbnb::domain::entities::{Entity, EntityKind};
use hbnb::outbound::file_storage::FileStorageEngine;
use mockable::{Clock, DefaultClock};
use serde_json::Value;
use tempfile::TempDir;

/// File-backed storage rooted in a temporary directory.
pub struct FileFixture {
    pub _dir: TempDir,
    pub path: Utf8PathBuf,
    pub storage: Storage,
}

pub fn file_storage() -> FileFixture {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("file.json")).expect("utf8 temp path");
    let storage = open_file_storage(&path);
    FileFixture {
        _dir: dir,
        path,
        storage,
    }
}

pub fn open_file_storage(path: &Utf8PathBuf) -> Storage {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let engine = FileStorageEngine::open(path, Arc::clone(&clock)).expect("engine opens");
    Storage::new(Arc::new(engine), clock)
}

/// Build an entity from a JSON object literal.
pub fn build(storage: &Storage, kind: EntityKind, value: Value) -> Entity {
    let Value::Object(attrs) = value else {
        panic!("expected object");
    };
    storage.build(kind, attrs).expect("entity builds")
}
