//! Storage behaviour shared by every engine.
//!
//! The file engine always runs. The PostgreSQL engine runs when
//! `HBNB_TEST_DATABASE_URL` points at a disposable database; its schema is
//! dropped and recreated before the scenario.

use std::sync::Arc;

use hbnb::domain::Storage;
use hbnb::domain::entities::{EntityKind, Place, Review, User};
use hbnb::domain::ports::StorageError;
use hbnb::outbound::persistence::{DbPool, DieselStorageEngine, PoolConfig, SchemaMigrator};
use mockable::{Clock, DefaultClock};
use rstest::rstest;
use serde_json::{Map, Value, json};

mod support;

use support::{build, file_storage, open_file_storage};

const DATABASE_URL_VAR: &str = "HBNB_TEST_DATABASE_URL";

fn changes(value: Value) -> Map<String, Value> {
    let Value::Object(attrs) = value else {
        panic!("expected object");
    };
    attrs
}

async fn seed_graph(storage: &Storage) {
    storage
        .persist(build(storage, EntityKind::State, json!({ "id": "s1", "name": "California" })))
        .await
        .expect("state persists");
    storage
        .persist(build(storage, EntityKind::State, json!({ "id": "s2", "name": "Nevada" })))
        .await
        .expect("state persists");
    storage
        .persist(build(
            storage,
            EntityKind::City,
            json!({ "id": "c1", "state_id": "s1", "name": "San Francisco" }),
        ))
        .await
        .expect("city persists");
    storage
        .persist(build(
            storage,
            EntityKind::User,
            json!({ "id": "u1", "email": "host@hbnb.io", "password": "pwd" }),
        ))
        .await
        .expect("user persists");
    storage
        .persist(build(storage, EntityKind::Amenity, json!({ "id": "a1", "name": "Wifi" })))
        .await
        .expect("amenity persists");
    storage
        .persist(build(
            storage,
            EntityKind::Place,
            json!({
                "id": "p1",
                "city_id": "c1",
                "user_id": "u1",
                "name": "Loft",
                "amenity_ids": ["a1"],
            }),
        ))
        .await
        .expect("place persists");
    storage
        .persist(build(
            storage,
            EntityKind::Review,
            json!({ "id": "r1", "place_id": "p1", "user_id": "u1", "text": "Great" }),
        ))
        .await
        .expect("review persists");
}

async fn run_contract(storage: &Storage) {
    seed_graph(storage).await;

    assert_eq!(storage.count(None).await.expect("count"), 7);
    let mut total = 0;
    for kind in EntityKind::ALL {
        let counted = storage.count(Some(kind)).await.expect("count");
        assert_eq!(counted, storage.all(Some(kind)).await.expect("all").len(), "{kind:?}");
        total += counted;
    }
    assert_eq!(total, 7);
    let place = storage.fetch::<Place>("p1").await.expect("lookup").expect("place");
    assert_eq!(place.amenity_ids, vec!["a1".to_owned()]);

    let clash = storage
        .persist(build(
            storage,
            EntityKind::User,
            json!({ "email": "host@hbnb.io", "password": "other" }),
        ))
        .await;
    assert!(matches!(clash, Err(StorageError::DuplicateEmail { .. })));

    let orphan = storage
        .persist(build(storage, EntityKind::City, json!({ "state_id": "missing", "name": "X" })))
        .await;
    assert!(matches!(orphan, Err(StorageError::InvalidReference { .. })));

    let long_name = "n".repeat(300);
    let long = storage
        .persist(build(storage, EntityKind::State, json!({ "name": long_name.as_str() })))
        .await
        .expect("long names persist");
    let stored = storage
        .get(EntityKind::State, long.id())
        .await
        .expect("lookup")
        .expect("long state exists");
    assert_eq!(stored.to_dict()["name"], json!(long_name));

    let user = storage
        .get(EntityKind::User, "u1")
        .await
        .expect("lookup")
        .expect("user exists");
    let renamed = storage
        .update(user.apply_update(changes(json!({ "first_name": "Ada" })), &[]).expect("applies"))
        .await
        .expect("update succeeds");
    assert!(renamed.updated_at() >= user.updated_at());
    let outdated = user
        .apply_update(changes(json!({ "first_name": "Grace" })), &[])
        .expect("applies");
    if renamed.updated_at() != user.updated_at() {
        assert!(matches!(storage.update(outdated).await, Err(StorageError::Stale { .. })));
    }

    let place = storage
        .get(EntityKind::Place, "p1")
        .await
        .expect("lookup")
        .expect("place exists");
    let edit = place
        .apply_update(changes(json!({ "name": "Attic" })), &[])
        .expect("applies");

    let state = storage
        .get(EntityKind::State, "s1")
        .await
        .expect("lookup")
        .expect("state exists");
    storage.delete(&state).await.expect("delete cascades");

    assert_eq!(
        storage.update(edit).await,
        Err(StorageError::not_found("Place", "p1"))
    );
    assert!(storage.fetch::<Place>("p1").await.expect("lookup").is_none());

    assert!(storage.get(EntityKind::City, "c1").await.expect("lookup").is_none());
    assert!(storage.fetch::<Place>("p1").await.expect("lookup").is_none());
    assert!(storage.fetch::<Review>("r1").await.expect("lookup").is_none());
    assert!(storage.fetch::<User>("u1").await.expect("lookup").is_some());
    assert!(storage.get(EntityKind::Amenity, "a1").await.expect("lookup").is_some());
    assert!(storage.get(EntityKind::State, "s2").await.expect("lookup").is_some());

    storage.reload().await.expect("reload");
    let stats = storage.stats().await.expect("stats");
    assert_eq!(
        (stats.states, stats.cities, stats.users, stats.amenities, stats.places, stats.reviews),
        (2, 0, 1, 1, 0, 0)
    );
}

#[rstest]
#[tokio::test]
async fn file_engine_honours_the_storage_contract() {
    let fixture = file_storage();
    run_contract(&fixture.storage).await;
}

#[rstest]
#[tokio::test]
async fn saved_state_reads_back_with_ordered_timestamps() {
    let fixture = file_storage();
    let state = build(&fixture.storage, EntityKind::State, json!({ "name": "Abuja" }));
    let id = state.id().to_owned();
    fixture.storage.register(state);
    fixture.storage.save().await.expect("save");

    let stored = fixture
        .storage
        .get(EntityKind::State, &id)
        .await
        .expect("lookup")
        .expect("state stored");
    assert_eq!(stored.to_dict()["name"], json!("Abuja"));
    assert!(stored.created_at() <= stored.updated_at());

    fixture.storage.delete(&stored).await.expect("delete");
    assert!(fixture.storage.get(EntityKind::State, &id).await.expect("lookup").is_none());
    fixture.storage.delete(&stored).await.expect("second delete is a no-op");
}

#[rstest]
#[tokio::test]
async fn file_engine_state_survives_a_restart() {
    let fixture = file_storage();
    seed_graph(&fixture.storage).await;
    fixture.storage.close().await.expect("close");

    let reopened = open_file_storage(&fixture.path);
    reopened.reload().await.expect("reload");

    assert_eq!(reopened.count(None).await.expect("count"), 7);
    let user = reopened.fetch::<User>("u1").await.expect("lookup").expect("user");
    assert_eq!(user.email, "host@hbnb.io");
}

#[rstest]
#[tokio::test]
async fn staged_entities_are_written_by_save() {
    let fixture = file_storage();
    let state = build(&fixture.storage, EntityKind::State, json!({ "name": "Oregon" }));
    let id = state.id().to_owned();

    fixture.storage.register(state);
    assert!(fixture.storage.get(EntityKind::State, &id).await.expect("lookup").is_none());

    let written = fixture.storage.save().await.expect("save");
    assert_eq!(written.len(), 1);
    assert!(fixture.storage.get(EntityKind::State, &id).await.expect("lookup").is_some());
    assert!(fixture.storage.save().await.expect("second save").is_empty());
}

#[rstest]
#[tokio::test]
async fn database_engine_honours_the_storage_contract() {
    let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
        eprintln!("{DATABASE_URL_VAR} unset; skipping database contract");
        return;
    };
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let pool = DbPool::new(&PoolConfig::new(url.as_str()))
        .await
        .expect("pool builds");
    let engine = DieselStorageEngine::new(pool, SchemaMigrator::new(url, true), Arc::clone(&clock));
    let storage = Storage::new(Arc::new(engine), clock);
    storage.reload().await.expect("schema resets");

    run_contract(&storage).await;
    storage.close().await.expect("close");
}
