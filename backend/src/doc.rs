//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint and the schema wrappers from
//! `inbound::http::schemas`. The document is served by Swagger UI in debug
//! builds and printed by `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    AmenitySchema, CitySchema, ErrorCodeSchema, ErrorSchema, PlaceSchema, PlaceSearchSchema,
    ReviewSchema, StateSchema, StatsSchema, StatusSchema, UserSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "HBNB API",
        description = "CRUD access to states, cities, amenities, users, places and reviews."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::index::status,
        crate::inbound::http::index::stats,
        crate::inbound::http::states::list_states,
        crate::inbound::http::states::get_state,
        crate::inbound::http::states::create_state,
        crate::inbound::http::states::update_state,
        crate::inbound::http::states::delete_state,
        crate::inbound::http::cities::list_cities,
        crate::inbound::http::cities::get_city,
        crate::inbound::http::cities::create_city,
        crate::inbound::http::cities::update_city,
        crate::inbound::http::cities::delete_city,
        crate::inbound::http::amenities::list_amenities,
        crate::inbound::http::amenities::get_amenity,
        crate::inbound::http::amenities::create_amenity,
        crate::inbound::http::amenities::update_amenity,
        crate::inbound::http::amenities::delete_amenity,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::places::list_places,
        crate::inbound::http::places::get_place,
        crate::inbound::http::places::create_place,
        crate::inbound::http::places::update_place,
        crate::inbound::http::places::delete_place,
        crate::inbound::http::places::search_places,
        crate::inbound::http::place_amenities::list_place_amenities,
        crate::inbound::http::place_amenities::link_amenity,
        crate::inbound::http::place_amenities::unlink_amenity,
        crate::inbound::http::reviews::list_reviews,
        crate::inbound::http::reviews::get_review,
        crate::inbound::http::reviews::create_review,
        crate::inbound::http::reviews::update_review,
        crate::inbound::http::reviews::delete_review,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        StatusSchema,
        StatsSchema,
        StateSchema,
        CitySchema,
        AmenitySchema,
        UserSchema,
        PlaceSchema,
        ReviewSchema,
        PlaceSearchSchema
    )),
    tags(
        (name = "index", description = "Service status and counts"),
        (name = "states", description = "States and their cities"),
        (name = "cities", description = "Cities and their places"),
        (name = "amenities", description = "Amenities offered by places"),
        (name = "users", description = "Hosts and reviewers"),
        (name = "places", description = "Places and place search"),
        (name = "place_amenities", description = "Links between places and amenities"),
        (name = "reviews", description = "Reviews of places"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn every_entity_path_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/status",
            "/api/v1/stats",
            "/api/v1/states/{state_id}/cities",
            "/api/v1/cities/{city_id}/places",
            "/api/v1/places_search",
            "/api/v1/places/{place_id}/amenities/{amenity_id}",
            "/api/v1/reviews/{review_id}",
            "/health/ready",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn place_schema_lists_amenity_ids() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let place = schemas.get("Place").expect("Place schema");
        assert_object_schema_has_field(place, "amenity_ids");
        assert_object_schema_has_field(place, "price_by_night");
    }
}
