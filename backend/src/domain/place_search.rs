//! Place search criteria and the filter applied to stored places.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::domain::entities::{City, Place};

/// Body of `POST /places_search`.
///
/// Every list is optional; `null` behaves like an absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaceSearch {
    #[serde(default)]
    pub states: Option<Vec<String>>,
    #[serde(default)]
    pub cities: Option<Vec<String>>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
}

fn ids(list: &Option<Vec<String>>) -> &[String] {
    list.as_deref().unwrap_or_default()
}

impl PlaceSearch {
    /// True when no list restricts the search.
    pub fn is_unrestricted(&self) -> bool {
        ids(&self.states).is_empty() && ids(&self.cities).is_empty() && ids(&self.amenities).is_empty()
    }

    /// Filter `places` down to the matches.
    ///
    /// Candidates are the places in cities of the listed states plus places
    /// in the listed cities; with neither list given every place is a
    /// candidate. Candidates must then carry every listed amenity.
    ///
    /// # Examples
    /// ```
    /// use hbnb::domain::PlaceSearch;
    ///
    /// let search = PlaceSearch::default();
    /// assert!(search.select(&[], Vec::new()).is_empty());
    /// ```
    pub fn select(&self, cities: &[City], places: Vec<Place>) -> Vec<Place> {
        let states = ids(&self.states);
        let listed_cities = ids(&self.cities);
        let amenities = ids(&self.amenities);

        let city_scope: Option<BTreeSet<&str>> = if states.is_empty() && listed_cities.is_empty() {
            None
        } else {
            let mut scope: BTreeSet<&str> = listed_cities.iter().map(String::as_str).collect();
            scope.extend(
                cities
                    .iter()
                    .filter(|city| states.contains(&city.state_id))
                    .map(|city| city.id.as_str()),
            );
            Some(scope)
        };

        let mut matches: Vec<Place> = places
            .into_iter()
            .filter(|place| {
                city_scope
                    .as_ref()
                    .is_none_or(|scope| scope.contains(place.city_id.as_str()))
            })
            .filter(|place| amenities.iter().all(|id| place.has_amenity(id)))
            .collect();
        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        matches.dedup_by(|a, b| a.id == b.id);
        matches
    }
}
