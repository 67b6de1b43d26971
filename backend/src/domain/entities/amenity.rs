//! Amenities offered by places.

use super::define_entity;

define_entity! {
    /// A named amenity linked many-to-many with places.
    pub struct Amenity {
        pub name: String,
    }
}
