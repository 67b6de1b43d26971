//! Internal Diesel row structs and their conversions to entities.
//!
//! Rows never leave the persistence adapter; the engine hands out
//! [`Entity`] values only.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::entities::{Amenity, City, Entity, Place, Review, State, Timestamp, User};

use super::schema::{amenities, cities, place_amenity, places, reviews, states, users};

fn ts(value: DateTime<Utc>) -> Timestamp {
    Timestamp::from_datetime(value)
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = states)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StateRow {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = amenities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AmenityRow {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = cities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CityRow {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub state_id: String,
}

/// Place columns; amenity links live in `place_amenity`.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = places)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlaceRow {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub number_rooms: i32,
    pub number_bathrooms: i32,
    pub max_guest: i32,
    pub price_by_night: i32,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub text: String,
    pub place_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = place_amenity)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlaceAmenityRow {
    pub place_id: String,
    pub amenity_id: String,
}

impl From<&State> for StateRow {
    fn from(state: &State) -> Self {
        Self {
            id: state.id.clone(),
            created_at: state.created_at.as_datetime(),
            updated_at: state.updated_at.as_datetime(),
            name: state.name.clone(),
        }
    }
}

impl From<StateRow> for Entity {
    fn from(row: StateRow) -> Self {
        Entity::State(State {
            id: row.id,
            created_at: ts(row.created_at),
            updated_at: ts(row.updated_at),
            name: row.name,
        })
    }
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            created_at: user.created_at.as_datetime(),
            updated_at: user.updated_at.as_datetime(),
            email: user.email.clone(),
            password: user.password.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

impl From<UserRow> for Entity {
    fn from(row: UserRow) -> Self {
        Entity::User(User {
            id: row.id,
            created_at: ts(row.created_at),
            updated_at: ts(row.updated_at),
            email: row.email,
            password: row.password,
            first_name: row.first_name,
            last_name: row.last_name,
        })
    }
}

impl From<&Amenity> for AmenityRow {
    fn from(amenity: &Amenity) -> Self {
        Self {
            id: amenity.id.clone(),
            created_at: amenity.created_at.as_datetime(),
            updated_at: amenity.updated_at.as_datetime(),
            name: amenity.name.clone(),
        }
    }
}

impl From<AmenityRow> for Entity {
    fn from(row: AmenityRow) -> Self {
        Entity::Amenity(Amenity {
            id: row.id,
            created_at: ts(row.created_at),
            updated_at: ts(row.updated_at),
            name: row.name,
        })
    }
}

impl From<&City> for CityRow {
    fn from(city: &City) -> Self {
        Self {
            id: city.id.clone(),
            created_at: city.created_at.as_datetime(),
            updated_at: city.updated_at.as_datetime(),
            name: city.name.clone(),
            state_id: city.state_id.clone(),
        }
    }
}

impl From<CityRow> for Entity {
    fn from(row: CityRow) -> Self {
        Entity::City(City {
            id: row.id,
            created_at: ts(row.created_at),
            updated_at: ts(row.updated_at),
            name: row.name,
            state_id: row.state_id,
        })
    }
}

impl From<&Place> for PlaceRow {
    fn from(place: &Place) -> Self {
        Self {
            id: place.id.clone(),
            created_at: place.created_at.as_datetime(),
            updated_at: place.updated_at.as_datetime(),
            city_id: place.city_id.clone(),
            user_id: place.user_id.clone(),
            name: place.name.clone(),
            description: place.description.clone(),
            number_rooms: place.number_rooms,
            number_bathrooms: place.number_bathrooms,
            max_guest: place.max_guest,
            price_by_night: place.price_by_night,
            latitude: place.latitude,
            longitude: place.longitude,
        }
    }
}

impl PlaceRow {
    /// Rebuild the entity with its links; `amenity_ids` must be sorted.
    pub(crate) fn into_entity(self, amenity_ids: Vec<String>) -> Entity {
        Entity::Place(Place {
            id: self.id,
            created_at: ts(self.created_at),
            updated_at: ts(self.updated_at),
            city_id: self.city_id,
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            number_rooms: self.number_rooms,
            number_bathrooms: self.number_bathrooms,
            max_guest: self.max_guest,
            price_by_night: self.price_by_night,
            latitude: self.latitude,
            longitude: self.longitude,
            amenity_ids,
        })
    }
}

impl From<&Review> for ReviewRow {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.clone(),
            created_at: review.created_at.as_datetime(),
            updated_at: review.updated_at.as_datetime(),
            text: review.text.clone(),
            place_id: review.place_id.clone(),
            user_id: review.user_id.clone(),
        }
    }
}

impl From<ReviewRow> for Entity {
    fn from(row: ReviewRow) -> Self {
        Entity::Review(Review {
            id: row.id,
            created_at: ts(row.created_at),
            updated_at: ts(row.updated_at),
            text: row.text,
            place_id: row.place_id,
            user_id: row.user_id,
        })
    }
}

/// Link rows for every amenity of `place`.
pub(crate) fn links_of(place: &Place) -> impl Iterator<Item = PlaceAmenityRow> + '_ {
    place.amenity_ids.iter().map(|amenity_id| PlaceAmenityRow {
        place_id: place.id.clone(),
        amenity_id: amenity_id.clone(),
    })
}
