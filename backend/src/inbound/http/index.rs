//! Service status and object counts.
//!
//! ```text
//! GET /api/v1/status  {"status":"OK"}
//! GET /api/v1/stats   {"amenities":1,"cities":2,...}
//! ```

use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::domain::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, StatsSchema, StatusSchema};
use crate::inbound::http::state::HttpState;

#[utoipa::path(
    get,
    path = "/api/v1/status",
    responses((status = 200, description = "Service is up", body = StatusSchema)),
    tags = ["index"],
    operation_id = "status"
)]
#[get("/status")]
pub async fn status() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "OK" }))
}

/// Number of stored objects per collection.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "Object counts", body = StatsSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["index"],
    operation_id = "stats"
)]
#[get("/stats")]
pub async fn stats(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.storage.stats().await?))
}
