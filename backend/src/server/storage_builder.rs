//! Builds the storage facade selected by configuration and loads it.

use std::io;
use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use hbnb::config::{HbnbSettings, StorageKind};
use hbnb::domain::Storage;
use hbnb::domain::ports::StorageEngine;
use hbnb::outbound::file_storage::FileStorageEngine;
use hbnb::outbound::persistence::{DbPool, DieselStorageEngine, PoolConfig, SchemaMigrator};

fn startup_error(err: impl std::fmt::Display) -> io::Error {
    io::Error::other(err.to_string())
}

async fn build_engine(
    settings: &HbnbSettings,
    clock: Arc<dyn Clock>,
) -> io::Result<Arc<dyn StorageEngine>> {
    match settings.storage_kind().map_err(startup_error)? {
        StorageKind::File => {
            let path = settings.file_path();
            info!(%path, "using file storage");
            let engine = FileStorageEngine::open(&path, clock).map_err(startup_error)?;
            Ok(Arc::new(engine))
        }
        StorageKind::Database => {
            let url = settings.database_url().map_err(startup_error)?;
            let reset = settings.is_test_env();
            info!(reset, "using database storage");
            let pool = DbPool::new(&PoolConfig::new(url.as_str()))
                .await
                .map_err(startup_error)?;
            let migrator = SchemaMigrator::new(url, reset);
            Ok(Arc::new(DieselStorageEngine::new(pool, migrator, clock)))
        }
    }
}

/// Open the configured engine and run its initial `reload`.
pub async fn build_storage(settings: &HbnbSettings, clock: Arc<dyn Clock>) -> io::Result<Storage> {
    let engine = build_engine(settings, Arc::clone(&clock)).await?;
    let storage = Storage::new(engine, clock);
    storage.reload().await.map_err(startup_error)?;
    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb::domain::entities::EntityKind;
    use rstest::rstest;
    use serde_json::json;

    fn file_settings(path: &str, type_storage: &str) -> HbnbSettings {
        HbnbSettings {
            type_storage: type_storage.to_owned(),
            file_path: path.to_owned(),
            ..HbnbSettings::default()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn file_storage_loads_the_existing_document() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("store.json");
        let document = json!({
            "State.s1": {
                "__class__": "State",
                "id": "s1",
                "name": "California",
                "created_at": "2017-03-25T02:17:06.000000",
                "updated_at": "2017-03-25T02:17:06.000000"
            }
        });
        std::fs::write(&path, document.to_string()).expect("seed file");
        let settings = file_settings(path.to_str().expect("utf8 path"), "file");

        let storage = build_storage(&settings, Arc::new(mockable::DefaultClock))
            .await
            .expect("storage builds");

        assert!(storage.get(EntityKind::State, "s1").await.expect("lookup").is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_storage_type_fails_startup() {
        let settings = file_settings("file.json", "memory");
        let result = build_storage(&settings, Arc::new(mockable::DefaultClock)).await;
        assert!(result.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn database_storage_requires_credentials() {
        let settings = file_settings("file.json", "db");
        let err = build_storage(&settings, Arc::new(mockable::DefaultClock))
            .await
            .err()
            .expect("missing credentials");
        assert!(err.to_string().contains("DB_USER"));
    }
}
