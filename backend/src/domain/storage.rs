//! Storage facade shared by every request handler.
//!
//! [`Storage`] wraps the active [`StorageEngine`] together with a clock and
//! offers typed helpers on top of the engine's untyped contract.

use std::sync::Arc;

use mockable::Clock;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::PlaceSearch;
use crate::domain::entities::{
    Amenity, AttributeError, City, Entity, EntityKind, ForeignKey, Model, Place, Timestamp,
};
use crate::domain::ports::{EntityMap, StorageEngine, StorageError};

/// Per-collection object counts served by `/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub amenities: usize,
    pub cities: usize,
    pub places: usize,
    pub reviews: usize,
    pub states: usize,
    pub users: usize,
}

/// Cloneable handle to the active storage engine.
#[derive(Clone)]
pub struct Storage {
    engine: Arc<dyn StorageEngine>,
    clock: Arc<dyn Clock>,
}

impl Storage {
    pub fn new(engine: Arc<dyn StorageEngine>, clock: Arc<dyn Clock>) -> Self {
        Self { engine, clock }
    }

    /// Current time according to the injected clock.
    pub fn now(&self) -> Timestamp {
        Timestamp::from_datetime(self.clock.utc())
    }

    /// Construct an entity from attributes, stamped with the clock.
    pub fn build(&self, kind: EntityKind, attrs: Map<String, Value>) -> Result<Entity, AttributeError> {
        Entity::from_attributes(kind, attrs, self.now())
    }

    pub async fn all(&self, kind: Option<EntityKind>) -> Result<EntityMap, StorageError> {
        self.engine.all(kind).await
    }

    pub async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>, StorageError> {
        self.engine.get(kind, id).await
    }

    /// Look up an entity by class name; unknown names yield `None`.
    pub async fn get_by_type_name(&self, name: &str, id: &str) -> Result<Option<Entity>, StorageError> {
        match name.parse::<EntityKind>() {
            Ok(kind) => self.get(kind, id).await,
            Err(err) => {
                debug!(error = %err, "lookup with unknown entity type");
                Ok(None)
            }
        }
    }

    pub async fn count(&self, kind: Option<EntityKind>) -> Result<usize, StorageError> {
        self.engine.count(kind).await
    }

    /// Stage an entity for the next [`Storage::save`].
    pub fn register(&self, entity: Entity) {
        self.engine.register(entity);
    }

    pub async fn save(&self) -> Result<Vec<Entity>, StorageError> {
        self.engine.save().await
    }

    /// Commit a single entity and return the stored version.
    pub async fn persist(&self, entity: Entity) -> Result<Entity, StorageError> {
        self.engine
            .commit(vec![entity])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::query("commit returned no entities"))
    }

    /// Overwrite an entity loaded earlier; see [`StorageEngine::update`].
    pub async fn update(&self, entity: Entity) -> Result<Entity, StorageError> {
        self.engine.update(entity).await
    }

    pub async fn delete(&self, entity: &Entity) -> Result<(), StorageError> {
        self.engine.delete(entity).await
    }

    pub async fn reload(&self) -> Result<(), StorageError> {
        self.engine.reload().await
    }

    pub async fn close(&self) -> Result<(), StorageError> {
        self.engine.close().await
    }

    /// Typed lookup.
    pub async fn fetch<M: Model>(&self, id: &str) -> Result<Option<M>, StorageError> {
        Ok(self.get(M::KIND, id).await?.and_then(M::from_entity))
    }

    /// Every entity of one type, oldest first.
    pub async fn list<M: Model>(&self) -> Result<Vec<M>, StorageError> {
        let mut models: Vec<M> = self
            .all(Some(M::KIND))
            .await?
            .into_values()
            .filter_map(M::from_entity)
            .collect();
        models.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(models)
    }

    /// Entities of type `M` whose `key` points at `parent_id`.
    pub async fn children<M: Model>(
        &self,
        key: ForeignKey,
        parent_id: &str,
    ) -> Result<Vec<M>, StorageError> {
        let mut models = Vec::new();
        for model in self.list::<M>().await? {
            let entity: Entity = model.clone().into();
            if entity.foreign_key(key) == Some(parent_id) {
                models.push(model);
            }
        }
        Ok(models)
    }

    /// Amenities linked to `place`, skipping ids that no longer resolve.
    pub async fn amenities_of(&self, place: &Place) -> Result<Vec<Amenity>, StorageError> {
        let mut amenities = Vec::with_capacity(place.amenity_ids.len());
        for id in &place.amenity_ids {
            if let Some(amenity) = self.fetch::<Amenity>(id).await? {
                amenities.push(amenity);
            }
        }
        Ok(amenities)
    }

    pub async fn stats(&self) -> Result<Stats, StorageError> {
        Ok(Stats {
            amenities: self.count(Some(EntityKind::Amenity)).await?,
            cities: self.count(Some(EntityKind::City)).await?,
            places: self.count(Some(EntityKind::Place)).await?,
            reviews: self.count(Some(EntityKind::Review)).await?,
            states: self.count(Some(EntityKind::State)).await?,
            users: self.count(Some(EntityKind::User)).await?,
        })
    }

    pub async fn search_places(&self, criteria: &PlaceSearch) -> Result<Vec<Place>, StorageError> {
        let places = self.list::<Place>().await?;
        if criteria.is_unrestricted() {
            return Ok(places);
        }
        let cities = self.list::<City>().await?;
        Ok(criteria.select(&cities, places))
    }
}
