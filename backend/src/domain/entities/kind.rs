//! Entity type tags and the relationship graph shared by every engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The six persisted entity types.
///
/// [`EntityKind::ALL`] lists them parents first: inserting a batch in that
/// order never writes a row before the rows it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    State,
    User,
    Amenity,
    City,
    Place,
    Review,
}

/// Raised when a type name does not match any entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity type {0:?}")]
pub struct UnknownEntityKind(pub String);

/// Foreign-key columns that link one entity to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForeignKey {
    StateId,
    CityId,
    UserId,
    PlaceId,
}

/// An owned child type and the key pointing back at its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependent {
    pub kind: EntityKind,
    pub foreign_key: ForeignKey,
}

impl EntityKind {
    /// Every kind, parents before children.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::State,
        EntityKind::User,
        EntityKind::Amenity,
        EntityKind::City,
        EntityKind::Place,
        EntityKind::Review,
    ];

    /// Class name used in storage keys and the `__class__` discriminator.
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityKind::State => "State",
            EntityKind::User => "User",
            EntityKind::Amenity => "Amenity",
            EntityKind::City => "City",
            EntityKind::Place => "Place",
            EntityKind::Review => "Review",
        }
    }

    /// Plural name used by `/stats` and the database tables.
    pub const fn collection(self) -> &'static str {
        match self {
            EntityKind::State => "states",
            EntityKind::User => "users",
            EntityKind::Amenity => "amenities",
            EntityKind::City => "cities",
            EntityKind::Place => "places",
            EntityKind::Review => "reviews",
        }
    }

    /// Position in [`EntityKind::ALL`]; lower ranks never reference higher ones.
    pub fn rank(self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(Self::ALL.len())
    }

    /// Types deleted together with an entity of this kind.
    ///
    /// Amenity links are not listed here: they live on the place and are
    /// removed by the engines whenever the amenity or the place goes away.
    ///
    /// # Examples
    /// ```
    /// use hbnb::domain::entities::{EntityKind, ForeignKey};
    ///
    /// let owned = EntityKind::State.dependents();
    /// assert_eq!(owned.len(), 1);
    /// assert_eq!(owned[0].kind, EntityKind::City);
    /// assert_eq!(owned[0].foreign_key, ForeignKey::StateId);
    /// ```
    pub const fn dependents(self) -> &'static [Dependent] {
        match self {
            EntityKind::State => &[Dependent {
                kind: EntityKind::City,
                foreign_key: ForeignKey::StateId,
            }],
            EntityKind::City => &[Dependent {
                kind: EntityKind::Place,
                foreign_key: ForeignKey::CityId,
            }],
            EntityKind::User => &[
                Dependent {
                    kind: EntityKind::Place,
                    foreign_key: ForeignKey::UserId,
                },
                Dependent {
                    kind: EntityKind::Review,
                    foreign_key: ForeignKey::UserId,
                },
            ],
            EntityKind::Place => &[Dependent {
                kind: EntityKind::Review,
                foreign_key: ForeignKey::PlaceId,
            }],
            EntityKind::Amenity | EntityKind::Review => &[],
        }
    }

    /// Build the `"Type.id"` key used by `all()` and the file store.
    pub fn storage_key(self, id: &str) -> String {
        format!("{}.{id}", self.as_str())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownEntityKind(value.to_owned()))
    }
}

impl ForeignKey {
    /// Attribute name on the owning record.
    pub const fn column(self) -> &'static str {
        match self {
            ForeignKey::StateId => "state_id",
            ForeignKey::CityId => "city_id",
            ForeignKey::UserId => "user_id",
            ForeignKey::PlaceId => "place_id",
        }
    }

    /// Type the key points at.
    pub const fn target(self) -> EntityKind {
        match self {
            ForeignKey::StateId => EntityKind::State,
            ForeignKey::CityId => EntityKind::City,
            ForeignKey::UserId => EntityKind::User,
            ForeignKey::PlaceId => EntityKind::Place,
        }
    }
}
