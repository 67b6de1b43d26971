//! Reviews API handlers.
//!
//! ```text
//! GET    /api/v1/places/{place_id}/reviews
//! POST   /api/v1/places/{place_id}/reviews  {"user_id":"...","text":"Great"}
//! GET    /api/v1/reviews/{review_id}
//! PUT    /api/v1/reviews/{review_id}
//! DELETE /api/v1/reviews/{review_id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde_json::Value;

use crate::domain::ApiResult;
use crate::domain::entities::{EntityKind, ForeignKey, Place, Review, User};
use crate::inbound::http::resources::{self, CreateRules};
use crate::inbound::http::schemas::{ErrorSchema, ReviewSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_object, require_fields};

const REQUIRED: &[&str] = &["user_id", "text"];
const IMMUTABLE: &[&str] = &["user_id", "place_id"];

#[utoipa::path(
    get,
    path = "/api/v1/places/{place_id}/reviews",
    params(("place_id" = String, Path, description = "Place identifier")),
    responses(
        (status = 200, description = "Reviews of the place", body = [ReviewSchema]),
        (status = 404, description = "Unknown place", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "listReviews"
)]
#[get("/places/{place_id}/reviews")]
pub async fn list_reviews(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let place = resources::load_model::<Place>(&state.storage, &path).await?;
    let reviews = state
        .storage
        .children::<Review>(ForeignKey::PlaceId, &place.id)
        .await?;
    Ok(HttpResponse::Ok().json(resources::render_all(reviews)))
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews/{review_id}",
    params(("review_id" = String, Path, description = "Review identifier")),
    responses(
        (status = 200, description = "The review", body = ReviewSchema),
        (status = 404, description = "Unknown review", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "getReview"
)]
#[get("/reviews/{review_id}")]
pub async fn get_review(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resources::show(&state.storage, EntityKind::Review, &path).await
}

/// Review a place as an existing user.
#[utoipa::path(
    post,
    path = "/api/v1/places/{place_id}/reviews",
    params(("place_id" = String, Path, description = "Place identifier")),
    request_body = ReviewSchema,
    responses(
        (status = 201, description = "Created", body = ReviewSchema),
        (status = 400, description = "Not a JSON, missing or unknown field", body = ErrorSchema),
        (status = 404, description = "Unknown place or user", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "createReview"
)]
#[post("/places/{place_id}/reviews")]
pub async fn create_review(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let attrs = json_object(&req, &body)?;
    let place = resources::load_model::<Place>(&state.storage, &path).await?;
    require_fields(&attrs, &REQUIRED[..1])?;
    if let Some(Value::String(user_id)) = attrs.get("user_id") {
        resources::load_model::<User>(&state.storage, user_id).await?;
    }
    let rules = CreateRules {
        required: REQUIRED,
        parent: Some(("place_id", place.id.as_str())),
    };
    resources::create(&state.storage, EntityKind::Review, attrs, rules).await
}

#[utoipa::path(
    put,
    path = "/api/v1/reviews/{review_id}",
    params(("review_id" = String, Path, description = "Review identifier")),
    request_body = ReviewSchema,
    responses(
        (status = 200, description = "Updated", body = ReviewSchema),
        (status = 400, description = "Not a JSON or unknown field", body = ErrorSchema),
        (status = 404, description = "Unknown review", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "updateReview"
)]
#[put("/reviews/{review_id}")]
pub async fn update_review(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let changes = json_object(&req, &body)?;
    resources::update(&state.storage, EntityKind::Review, &path, changes, IMMUTABLE).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{review_id}",
    params(("review_id" = String, Path, description = "Review identifier")),
    responses(
        (status = 200, description = "Deleted; empty object"),
        (status = 404, description = "Unknown review", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "deleteReview"
)]
#[delete("/reviews/{review_id}")]
pub async fn delete_review(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resources::remove(&state.storage, EntityKind::Review, &path).await
}
