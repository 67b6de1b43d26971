//! Entity model: the six persisted types and the [`Entity`] sum type.
//!
//! Entities are plain structs with explicit schemas. They are built from JSON
//! attribute maps, rendered back with [`Entity::to_dict`], and carry no
//! knowledge of where they are stored.

mod amenity;
mod city;
mod kind;
mod macros;
mod place;
mod review;
mod state;
mod timestamp;
mod user;

pub(crate) use macros::define_entity;

pub use amenity::Amenity;
pub use city::City;
pub use kind::{Dependent, EntityKind, ForeignKey, UnknownEntityKind};
pub use place::Place;
pub use review::Review;
pub use state::State;
pub use timestamp::{TIME_FORMAT, Timestamp, TimestampError};
pub use user::User;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::ports::define_port_error;

/// Discriminator key added by [`Entity::to_dict`].
pub const CLASS_KEY: &str = "__class__";

/// Attributes every entity carries and clients never set directly.
pub const BASE_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

define_port_error! {
    /// Raised when an attribute map cannot become an entity.
    pub enum AttributeError {
        /// The key is not part of the type's schema.
        UnknownField { kind: String, field: String } => "{kind} has no attribute {field:?}",
        /// A value has the wrong shape or type.
        Invalid { kind: String, message: String } => "invalid {kind} attributes: {message}",
    }
}

/// Typed view shared by the six entity structs.
pub trait Model: Serialize + DeserializeOwned + Clone + Into<Entity> + Send + Sync + 'static {
    /// Type tag for this struct.
    const KIND: EntityKind;
    /// Every attribute name accepted by the schema.
    const FIELDS: &'static [&'static str];

    fn id(&self) -> &str;
    fn created_at(&self) -> Timestamp;
    fn updated_at(&self) -> Timestamp;

    /// Unwrap an [`Entity`] of this type.
    fn from_entity(entity: Entity) -> Option<Self>;
}

/// Any persisted entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    State(State),
    User(User),
    Amenity(Amenity),
    City(City),
    Place(Place),
    Review(Review),
}

/// A foreign key value that must resolve to a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Attribute holding the key.
    pub field: &'static str,
    pub target: EntityKind,
    pub id: String,
}

macro_rules! each_variant {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            Entity::State($inner) => $body,
            Entity::User($inner) => $body,
            Entity::Amenity($inner) => $body,
            Entity::City($inner) => $body,
            Entity::Place($inner) => $body,
            Entity::Review($inner) => $body,
        }
    };
}

impl Entity {
    /// Build an entity from client or stored attributes.
    ///
    /// The `__class__` key is dropped, a missing `id` becomes a fresh UUID
    /// v4 and missing timestamps are set to `now`.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use hbnb::domain::entities::{Entity, EntityKind, Timestamp};
    /// use serde_json::{Map, Value};
    ///
    /// let mut attrs = Map::new();
    /// attrs.insert("name".into(), Value::from("Nevada"));
    /// let now = Timestamp::from_datetime(Utc::now());
    /// let state = Entity::from_attributes(EntityKind::State, attrs, now).expect("valid state");
    /// assert_eq!(state.kind(), EntityKind::State);
    /// assert_eq!(state.created_at(), now);
    /// ```
    pub fn from_attributes(
        kind: EntityKind,
        attrs: Map<String, Value>,
        now: Timestamp,
    ) -> Result<Self, AttributeError> {
        match kind {
            EntityKind::State => decode::<State>(attrs, now),
            EntityKind::User => decode::<User>(attrs, now),
            EntityKind::Amenity => decode::<Amenity>(attrs, now),
            EntityKind::City => decode::<City>(attrs, now),
            EntityKind::Place => decode::<Place>(attrs, now),
            EntityKind::Review => decode::<Review>(attrs, now),
        }
    }

    /// Rebuild an entity from a `to_dict` map, reading the type from `__class__`.
    pub fn from_dict(attrs: Map<String, Value>, now: Timestamp) -> Result<Self, AttributeError> {
        let kind = attrs
            .get(CLASS_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| AttributeError::invalid("object", format!("missing {CLASS_KEY}")))?
            .parse::<EntityKind>()
            .map_err(|err| AttributeError::invalid("object", err.to_string()))?;
        Self::from_attributes(kind, attrs, now)
    }

    pub fn kind(&self) -> EntityKind {
        each_variant!(self, inner => model_kind(inner))
    }

    pub fn id(&self) -> &str {
        each_variant!(self, inner => inner.id.as_str())
    }

    pub fn created_at(&self) -> Timestamp {
        each_variant!(self, inner => inner.created_at)
    }

    pub fn updated_at(&self) -> Timestamp {
        each_variant!(self, inner => inner.updated_at)
    }

    /// `"Type.id"` key.
    pub fn storage_key(&self) -> String {
        self.kind().storage_key(self.id())
    }

    /// Every attribute plus `__class__`, timestamps as ISO-8601 strings.
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut map = each_variant!(self, inner => object(inner));
        map.insert(CLASS_KEY.to_owned(), Value::from(self.kind().as_str()));
        map
    }

    /// Value of `key` if this entity's type carries it.
    pub fn foreign_key(&self, key: ForeignKey) -> Option<&str> {
        match (self, key) {
            (Entity::City(city), ForeignKey::StateId) => Some(&city.state_id),
            (Entity::Place(place), ForeignKey::CityId) => Some(&place.city_id),
            (Entity::Place(place), ForeignKey::UserId) => Some(&place.user_id),
            (Entity::Review(review), ForeignKey::PlaceId) => Some(&review.place_id),
            (Entity::Review(review), ForeignKey::UserId) => Some(&review.user_id),
            _ => None,
        }
    }

    /// Records this entity points at, amenity links included.
    pub fn references(&self) -> Vec<Reference> {
        let mut refs: Vec<Reference> = EntityKind::ALL
            .iter()
            .flat_map(|owner| owner.dependents())
            .filter(|dependent| dependent.kind == self.kind())
            .filter_map(|dependent| {
                self.foreign_key(dependent.foreign_key).map(|id| Reference {
                    field: dependent.foreign_key.column(),
                    target: dependent.foreign_key.target(),
                    id: id.to_owned(),
                })
            })
            .collect();
        if let Entity::Place(place) = self {
            refs.extend(place.amenity_ids.iter().map(|id| Reference {
                field: "amenity_ids",
                target: EntityKind::Amenity,
                id: id.clone(),
            }));
        }
        refs
    }

    /// Refresh `updated_at` and restore the set semantics of amenity links.
    pub fn touch(&mut self, now: Timestamp) {
        each_variant!(self, inner => {
            inner.updated_at = now.max(inner.created_at);
        });
        if let Entity::Place(place) = self {
            place.normalise_amenities();
        }
    }

    /// Apply client-supplied changes, skipping base fields and `ignored` keys.
    ///
    /// The result is validated against the schema like a fresh construction.
    pub fn apply_update(
        &self,
        changes: Map<String, Value>,
        ignored: &[&str],
    ) -> Result<Self, AttributeError> {
        let mut attrs = self.to_dict();
        for (key, value) in changes {
            if key == CLASS_KEY || BASE_FIELDS.contains(&key.as_str()) || ignored.contains(&key.as_str())
            {
                continue;
            }
            attrs.insert(key, value);
        }
        Self::from_attributes(self.kind(), attrs, self.updated_at())
    }
}

fn model_kind<M: Model>(_: &M) -> EntityKind {
    M::KIND
}

fn object<M: Serialize>(model: &M) -> Map<String, Value> {
    match serde_json::to_value(model) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn decode<M: Model>(mut attrs: Map<String, Value>, now: Timestamp) -> Result<Entity, AttributeError> {
    attrs.remove(CLASS_KEY);
    if let Some(field) = attrs.keys().find(|key| !M::FIELDS.contains(&key.as_str())) {
        return Err(AttributeError::unknown_field(M::KIND.as_str(), field.as_str()));
    }
    match attrs.get("id") {
        Some(Value::String(id)) if id.is_empty() => {
            return Err(AttributeError::invalid(M::KIND.as_str(), "id must not be empty"));
        }
        Some(Value::Null) | None => {
            attrs.insert("id".to_owned(), Value::from(Uuid::new_v4().to_string()));
        }
        Some(_) => {}
    }
    for field in ["created_at", "updated_at"] {
        if attrs.get(field).is_none_or(Value::is_null) {
            attrs.insert(field.to_owned(), Value::from(now.to_string()));
        }
    }
    let model: M = serde_json::from_value(Value::Object(attrs))
        .map_err(|err| AttributeError::invalid(M::KIND.as_str(), err.to_string()))?;
    let mut entity: Entity = model.into();
    let updated_at = entity.updated_at();
    entity.touch(updated_at);
    Ok(entity)
}
