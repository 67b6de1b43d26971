//! Links between places and amenities.
//!
//! ```text
//! GET    /api/v1/places/{place_id}/amenities
//! POST   /api/v1/places/{place_id}/amenities/{amenity_id}
//! DELETE /api/v1/places/{place_id}/amenities/{amenity_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde_json::Map;

use crate::domain::ApiResult;
use crate::domain::entities::{Amenity, Entity, Place};
use crate::inbound::http::resources;
use crate::inbound::http::schemas::{AmenitySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

#[utoipa::path(
    get,
    path = "/api/v1/places/{place_id}/amenities",
    params(("place_id" = String, Path, description = "Place identifier")),
    responses(
        (status = 200, description = "Amenities of the place", body = [AmenitySchema]),
        (status = 404, description = "Unknown place", body = ErrorSchema)
    ),
    tags = ["place_amenities"],
    operation_id = "listPlaceAmenities"
)]
#[get("/places/{place_id}/amenities")]
pub async fn list_place_amenities(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let place = resources::load_model::<Place>(&state.storage, &path).await?;
    let amenities = state.storage.amenities_of(&place).await?;
    Ok(HttpResponse::Ok().json(resources::render_all(amenities)))
}

/// Link an amenity; 200 when already linked, 201 when the link is new.
#[utoipa::path(
    post,
    path = "/api/v1/places/{place_id}/amenities/{amenity_id}",
    params(
        ("place_id" = String, Path, description = "Place identifier"),
        ("amenity_id" = String, Path, description = "Amenity identifier")
    ),
    responses(
        (status = 200, description = "Already linked", body = AmenitySchema),
        (status = 201, description = "Linked", body = AmenitySchema),
        (status = 404, description = "Unknown place or amenity", body = ErrorSchema)
    ),
    tags = ["place_amenities"],
    operation_id = "linkPlaceAmenity"
)]
#[post("/places/{place_id}/amenities/{amenity_id}")]
pub async fn link_amenity(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (place_id, amenity_id) = path.into_inner();
    let mut place = resources::load_model::<Place>(&state.storage, &place_id).await?;
    let amenity = resources::load_model::<Amenity>(&state.storage, &amenity_id).await?;
    let rendered = resources::render(&Entity::from(amenity));
    if !place.link_amenity(&amenity_id) {
        return Ok(HttpResponse::Ok().json(rendered));
    }
    state.storage.update(place.into()).await?;
    Ok(HttpResponse::Created().json(rendered))
}

/// Unlink an amenity; 404 when it was not linked.
#[utoipa::path(
    delete,
    path = "/api/v1/places/{place_id}/amenities/{amenity_id}",
    params(
        ("place_id" = String, Path, description = "Place identifier"),
        ("amenity_id" = String, Path, description = "Amenity identifier")
    ),
    responses(
        (status = 200, description = "Unlinked; empty object"),
        (status = 404, description = "Unknown place or amenity, or not linked", body = ErrorSchema)
    ),
    tags = ["place_amenities"],
    operation_id = "unlinkPlaceAmenity"
)]
#[delete("/places/{place_id}/amenities/{amenity_id}")]
pub async fn unlink_amenity(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (place_id, amenity_id) = path.into_inner();
    let mut place = resources::load_model::<Place>(&state.storage, &place_id).await?;
    resources::load_model::<Amenity>(&state.storage, &amenity_id).await?;
    if !place.unlink_amenity(&amenity_id) {
        return Err(resources::not_found());
    }
    state.storage.update(place.into()).await?;
    Ok(HttpResponse::Ok().json(Map::new()))
}
