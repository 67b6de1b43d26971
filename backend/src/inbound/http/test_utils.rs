//! Test helpers for HTTP handlers: an app over a file engine in a temp dir.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::{App, test, web};
use camino::Utf8PathBuf;
use serde_json::Value;
use tempfile::TempDir;

use crate::domain::Storage;
use crate::domain::entities::{Amenity, City, Entity, EntityKind, Model, Place, Review, State, User};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::routes::build_app;
use crate::inbound::http::state::HttpState;
use crate::outbound::file_storage::FileStorageEngine;

/// Storage backed by a throwaway JSON file.
pub(crate) struct TestApp {
    _dir: TempDir,
    pub storage: Storage,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path =
            Utf8PathBuf::from_path_buf(dir.path().join("file.json")).expect("utf8 temp path");
        let clock: Arc<dyn mockable::Clock> = Arc::new(mockable::DefaultClock);
        let engine = FileStorageEngine::open(&path, Arc::clone(&clock)).expect("engine opens");
        Self {
            _dir: dir,
            storage: Storage::new(Arc::new(engine), clock),
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        build_app(
            web::Data::new(HttpState::new(self.storage.clone())),
            web::Data::new(HealthState::new()),
        )
    }

    async fn seed<M: Model>(&self, kind: EntityKind, attrs: Value) -> M {
        let Value::Object(attrs) = attrs else {
            panic!("expected object");
        };
        let entity = self.storage.build(kind, attrs).expect("entity builds");
        let stored = self.storage.persist(entity).await.expect("entity persists");
        M::from_entity(stored).expect("same kind")
    }

    pub async fn seed_state(&self, name: &str) -> State {
        self.seed(EntityKind::State, serde_json::json!({ "name": name })).await
    }

    pub async fn seed_city(&self, state_id: &str, name: &str) -> City {
        self.seed(EntityKind::City, serde_json::json!({ "state_id": state_id, "name": name }))
            .await
    }

    pub async fn seed_user(&self, email: &str) -> User {
        self.seed(EntityKind::User, serde_json::json!({ "email": email, "password": "pwd" }))
            .await
    }

    pub async fn seed_amenity(&self, name: &str) -> Amenity {
        self.seed(EntityKind::Amenity, serde_json::json!({ "name": name })).await
    }

    pub async fn seed_place(&self, city_id: &str, user_id: &str, amenity_ids: &[&str]) -> Place {
        self.seed(
            EntityKind::Place,
            serde_json::json!({
                "city_id": city_id,
                "user_id": user_id,
                "name": "Loft",
                "amenity_ids": amenity_ids,
            }),
        )
        .await
    }

    pub async fn seed_review(&self, place_id: &str, user_id: &str) -> Review {
        self.seed(
            EntityKind::Review,
            serde_json::json!({ "place_id": place_id, "user_id": user_id, "text": "Great" }),
        )
        .await
    }

    pub async fn stored(&self, kind: EntityKind, id: &str) -> Option<Entity> {
        self.storage.get(kind, id).await.expect("lookup succeeds")
    }
}

/// Decode a response body as JSON.
pub(crate) async fn read_json<B: MessageBody>(res: ServiceResponse<B>) -> Value {
    let body = test::read_body(res).await;
    serde_json::from_slice(&body).expect("JSON body")
}

