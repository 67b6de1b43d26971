//! Amenities API handlers.
//!
//! ```text
//! GET    /api/v1/amenities
//! POST   /api/v1/amenities        {"name":"Wifi"}
//! GET    /api/v1/amenities/{id}
//! PUT    /api/v1/amenities/{id}
//! DELETE /api/v1/amenities/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use crate::domain::ApiResult;
use crate::domain::entities::{Amenity, EntityKind};
use crate::inbound::http::resources::{self, CreateRules};
use crate::inbound::http::schemas::{AmenitySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::json_object;

const REQUIRED: &[&str] = &["name"];

#[utoipa::path(
    get,
    path = "/api/v1/amenities",
    responses((status = 200, description = "All amenities", body = [AmenitySchema])),
    tags = ["amenities"],
    operation_id = "listAmenities"
)]
#[get("/amenities")]
pub async fn list_amenities(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    resources::list::<Amenity>(&state.storage).await
}

#[utoipa::path(
    get,
    path = "/api/v1/amenities/{amenity_id}",
    params(("amenity_id" = String, Path, description = "Amenity identifier")),
    responses(
        (status = 200, description = "The amenity", body = AmenitySchema),
        (status = 404, description = "Unknown amenity", body = ErrorSchema)
    ),
    tags = ["amenities"],
    operation_id = "getAmenity"
)]
#[get("/amenities/{amenity_id}")]
pub async fn get_amenity(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resources::show(&state.storage, EntityKind::Amenity, &path).await
}

#[utoipa::path(
    post,
    path = "/api/v1/amenities",
    request_body = AmenitySchema,
    responses(
        (status = 201, description = "Created", body = AmenitySchema),
        (status = 400, description = "Not a JSON, missing or unknown field", body = ErrorSchema)
    ),
    tags = ["amenities"],
    operation_id = "createAmenity"
)]
#[post("/amenities")]
pub async fn create_amenity(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let attrs = json_object(&req, &body)?;
    let rules = CreateRules {
        required: REQUIRED,
        parent: None,
    };
    resources::create(&state.storage, EntityKind::Amenity, attrs, rules).await
}

#[utoipa::path(
    put,
    path = "/api/v1/amenities/{amenity_id}",
    params(("amenity_id" = String, Path, description = "Amenity identifier")),
    request_body = AmenitySchema,
    responses(
        (status = 200, description = "Updated", body = AmenitySchema),
        (status = 400, description = "Not a JSON or unknown field", body = ErrorSchema),
        (status = 404, description = "Unknown amenity", body = ErrorSchema)
    ),
    tags = ["amenities"],
    operation_id = "updateAmenity"
)]
#[put("/amenities/{amenity_id}")]
pub async fn update_amenity(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let changes = json_object(&req, &body)?;
    resources::update(&state.storage, EntityKind::Amenity, &path, changes, &[]).await
}

/// Delete an amenity; places linking it lose the link.
#[utoipa::path(
    delete,
    path = "/api/v1/amenities/{amenity_id}",
    params(("amenity_id" = String, Path, description = "Amenity identifier")),
    responses(
        (status = 200, description = "Deleted; empty object"),
        (status = 404, description = "Unknown amenity", body = ErrorSchema)
    ),
    tags = ["amenities"],
    operation_id = "deleteAmenity"
)]
#[delete("/amenities/{amenity_id}")]
pub async fn delete_amenity(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resources::remove(&state.storage, EntityKind::Amenity, &path).await
}
