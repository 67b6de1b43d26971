//! Places listed for rent and their amenity links.

use super::define_entity;

define_entity! {
    /// A rentable place in a city, hosted by a user.
    pub struct Place {
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
        /// Linked amenities; kept sorted and free of duplicates.
        pub amenity_ids: Vec<String>,
    }
}

impl Place {
    /// Whether `amenity_id` is linked to this place.
    pub fn has_amenity(&self, amenity_id: &str) -> bool {
        self.amenity_ids.iter().any(|id| id == amenity_id)
    }

    /// Link an amenity. Returns `false` when it was already linked.
    pub fn link_amenity(&mut self, amenity_id: &str) -> bool {
        match self.amenity_ids.binary_search_by(|id| id.as_str().cmp(amenity_id)) {
            Ok(_) => false,
            Err(position) => {
                self.amenity_ids.insert(position, amenity_id.to_owned());
                true
            }
        }
    }

    /// Unlink an amenity. Returns `false` when it was not linked.
    pub fn unlink_amenity(&mut self, amenity_id: &str) -> bool {
        let before = self.amenity_ids.len();
        self.amenity_ids.retain(|id| id != amenity_id);
        self.amenity_ids.len() != before
    }

    pub(crate) fn normalise_amenities(&mut self) {
        self.amenity_ids.sort_unstable();
        self.amenity_ids.dedup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Entity, EntityKind, Timestamp};
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use serde_json::{Map, json};

    #[fixture]
    fn place() -> Place {
        let now = Timestamp::from_datetime(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .expect("valid instant"),
        );
        let attrs = match json!({ "name": "Loft", "amenity_ids": ["b", "a", "b"] }) {
            serde_json::Value::Object(map) => map,
            _ => Map::new(),
        };
        let entity = Entity::from_attributes(EntityKind::Place, attrs, now).expect("place builds");
        match entity {
            Entity::Place(place) => place,
            other => panic!("expected place, got {other:?}"),
        }
    }

    #[rstest]
    fn construction_normalises_amenity_ids(place: Place) {
        assert_eq!(place.amenity_ids, vec!["a", "b"]);
    }

    #[rstest]
    fn link_keeps_ids_sorted(mut place: Place) {
        assert!(place.link_amenity("aa"));
        assert!(!place.link_amenity("a"));
        assert_eq!(place.amenity_ids, vec!["a", "aa", "b"]);
    }

    #[rstest]
    fn unlink_reports_missing_links(mut place: Place) {
        assert!(place.unlink_amenity("a"));
        assert!(!place.unlink_amenity("a"));
        assert!(!place.has_amenity("a"));
        assert!(place.has_amenity("b"));
    }
}
