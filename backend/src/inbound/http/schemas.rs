//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the JSON each endpoint reads and writes and exist
//! only for documentation.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with stored data.
    #[schema(rename = "conflict")]
    Conflict,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "Missing name")]
    message: String,
    /// Identifier echoed in the `trace-id` response header.
    #[schema(example = "6f1c1c1e-2a52-4c7a-9d3a-0b4b8f0f6b11")]
    trace_id: Option<String>,
    /// Field name and machine-readable reason for validation failures.
    details: Option<serde_json::Value>,
}

/// `GET /status` body.
#[derive(ToSchema)]
#[schema(as = Status)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct StatusSchema {
    #[schema(example = "OK")]
    status: String,
}

/// `GET /stats` body.
#[derive(ToSchema)]
#[schema(as = Stats)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct StatsSchema {
    amenities: u64,
    cities: u64,
    places: u64,
    reviews: u64,
    states: u64,
    users: u64,
}

/// `POST /places_search` body; every list is optional.
#[derive(ToSchema)]
#[schema(as = PlaceSearch)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PlaceSearchSchema {
    states: Option<Vec<String>>,
    cities: Option<Vec<String>>,
    amenities: Option<Vec<String>>,
}

/// OpenAPI schema for [`crate::domain::entities::State`].
#[derive(ToSchema)]
#[schema(as = State)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct StateSchema {
    #[schema(read_only, example = "421a55f4-7d82-47d9-b54c-a76916479545")]
    id: String,
    #[schema(read_only, example = "2017-03-25T02:17:06.000000")]
    created_at: String,
    #[schema(read_only, example = "2017-03-25T02:17:06.000000")]
    updated_at: String,
    #[schema(example = "California")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::entities::City`].
#[derive(ToSchema)]
#[schema(as = City)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CitySchema {
    #[schema(read_only)]
    id: String,
    #[schema(read_only)]
    created_at: String,
    #[schema(read_only)]
    updated_at: String,
    /// Set from the path on create and fixed afterwards.
    #[schema(read_only)]
    state_id: String,
    #[schema(example = "San Francisco")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::entities::Amenity`].
#[derive(ToSchema)]
#[schema(as = Amenity)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct AmenitySchema {
    #[schema(read_only)]
    id: String,
    #[schema(read_only)]
    created_at: String,
    #[schema(read_only)]
    updated_at: String,
    #[schema(example = "Wifi")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::entities::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserSchema {
    #[schema(read_only)]
    id: String,
    #[schema(read_only)]
    created_at: String,
    #[schema(read_only)]
    updated_at: String,
    /// Unique; fixed after creation.
    #[schema(example = "ada@hbnb.io")]
    email: String,
    /// Accepted on write, never returned.
    #[schema(write_only)]
    password: String,
    first_name: String,
    last_name: String,
}

/// OpenAPI schema for [`crate::domain::entities::Place`].
#[derive(ToSchema)]
#[schema(as = Place)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PlaceSchema {
    #[schema(read_only)]
    id: String,
    #[schema(read_only)]
    created_at: String,
    #[schema(read_only)]
    updated_at: String,
    #[schema(read_only)]
    city_id: String,
    user_id: String,
    #[schema(example = "Loft")]
    name: String,
    description: String,
    number_rooms: i32,
    number_bathrooms: i32,
    max_guest: i32,
    price_by_night: i32,
    latitude: f64,
    longitude: f64,
    /// Sorted, de-duplicated amenity ids.
    amenity_ids: Vec<String>,
}

/// OpenAPI schema for [`crate::domain::entities::Review`].
#[derive(ToSchema)]
#[schema(as = Review)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ReviewSchema {
    #[schema(read_only)]
    id: String,
    #[schema(read_only)]
    created_at: String,
    #[schema(read_only)]
    updated_at: String,
    #[schema(read_only)]
    place_id: String,
    user_id: String,
    #[schema(example = "Great location")]
    text: String,
}
