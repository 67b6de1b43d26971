//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly.

diesel::table! {
    states (id) {
        id -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        name -> Text,
    }
}

diesel::table! {
    /// Registered users; `email` carries a unique constraint.
    users (id) {
        id -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        email -> Text,
        password -> Text,
        first_name -> Text,
        last_name -> Text,
    }
}

diesel::table! {
    amenities (id) {
        id -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        name -> Text,
    }
}

diesel::table! {
    cities (id) {
        id -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        name -> Text,
        state_id -> Text,
    }
}

diesel::table! {
    places (id) {
        id -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        city_id -> Text,
        user_id -> Text,
        name -> Text,
        description -> Text,
        number_rooms -> Int4,
        number_bathrooms -> Int4,
        max_guest -> Int4,
        price_by_night -> Int4,
        latitude -> Float8,
        longitude -> Float8,
    }
}

diesel::table! {
    reviews (id) {
        id -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        text -> Text,
        place_id -> Text,
        user_id -> Text,
    }
}

diesel::table! {
    /// Many-to-many links between places and amenities.
    place_amenity (place_id, amenity_id) {
        place_id -> Text,
        amenity_id -> Text,
    }
}

diesel::joinable!(cities -> states (state_id));
diesel::joinable!(places -> cities (city_id));
diesel::joinable!(places -> users (user_id));
diesel::joinable!(reviews -> places (place_id));
diesel::joinable!(reviews -> users (user_id));
diesel::joinable!(place_amenity -> places (place_id));
diesel::joinable!(place_amenity -> amenities (amenity_id));

diesel::allow_tables_to_appear_in_same_query!(
    states,
    users,
    amenities,
    cities,
    places,
    reviews,
    place_amenity,
);
