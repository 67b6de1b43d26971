//! Route table and application assembly.
//!
//! ```text
//! /api/v1/status, /api/v1/stats
//! /api/v1/states[/{id}]           /api/v1/states/{id}/cities
//! /api/v1/cities/{id}             /api/v1/cities/{id}/places
//! /api/v1/amenities[/{id}]        /api/v1/users[/{id}]
//! /api/v1/places/{id}             /api/v1/places/{id}/reviews
//! /api/v1/places/{id}/amenities[/{amenity_id}]
//! /api/v1/places_search           /api/v1/reviews/{id}
//! /health/ready, /health/live
//! ```

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::{DefaultHeaders, NormalizePath, TrailingSlash};
use actix_web::{App, web};

use crate::Trace;
use crate::inbound::http::error::not_found;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{
    amenities, cities, index, place_amenities, places, reviews, states, users,
};

/// Prefix shared by every entity endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Register every `/api/v1` handler on `cfg`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(index::status)
        .service(index::stats)
        .service(states::list_states)
        .service(states::create_state)
        .service(states::get_state)
        .service(states::update_state)
        .service(states::delete_state)
        .service(cities::list_cities)
        .service(cities::create_city)
        .service(cities::get_city)
        .service(cities::update_city)
        .service(cities::delete_city)
        .service(amenities::list_amenities)
        .service(amenities::create_amenity)
        .service(amenities::get_amenity)
        .service(amenities::update_amenity)
        .service(amenities::delete_amenity)
        .service(users::list_users)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(places::list_places)
        .service(places::create_place)
        .service(places::get_place)
        .service(places::update_place)
        .service(places::delete_place)
        .service(places::search_places)
        .service(place_amenities::list_place_amenities)
        .service(place_amenities::link_amenity)
        .service(place_amenities::unlink_amenity)
        .service(reviews::list_reviews)
        .service(reviews::create_review)
        .service(reviews::get_review)
        .service(reviews::update_review)
        .service(reviews::delete_review);
}

/// Assemble the application: tracing, trailing-slash normalisation, the
/// permissive CORS header, the API scope, health probes and the JSON 404
/// fallback.
///
/// # Examples
/// ```no_run
/// use actix_web::web;
/// use hbnb::inbound::http::health::HealthState;
/// use hbnb::inbound::http::routes::build_app;
/// use hbnb::inbound::http::state::HttpState;
///
/// fn factory(state: HttpState) {
///     let app = build_app(web::Data::new(state), web::Data::new(HealthState::new()));
///     # let _ = app;
/// }
/// ```
pub fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(http_state)
        .app_data(health_state)
        .wrap(DefaultHeaders::new().add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")))
        .wrap(NormalizePath::new(TrailingSlash::Trim))
        .wrap(Trace)
        .service(web::scope(API_PREFIX).configure(configure_api))
        .service(ready)
        .service(live)
        .default_service(web::to(not_found))
}
