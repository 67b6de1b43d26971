//! States API handlers.
//!
//! ```text
//! GET    /api/v1/states
//! POST   /api/v1/states        {"name":"California"}
//! GET    /api/v1/states/{id}
//! PUT    /api/v1/states/{id}   {"name":"Nevada"}
//! DELETE /api/v1/states/{id}
//! ```
//!
//! Deleting a state removes its cities and everything they own.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use crate::domain::ApiResult;
use crate::domain::entities::{EntityKind, State};
use crate::inbound::http::resources::{self, CreateRules};
use crate::inbound::http::schemas::{ErrorSchema, StateSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::json_object;

const REQUIRED: &[&str] = &["name"];

/// List every state.
#[utoipa::path(
    get,
    path = "/api/v1/states",
    responses((status = 200, description = "All states", body = [StateSchema])),
    tags = ["states"],
    operation_id = "listStates"
)]
#[get("/states")]
pub async fn list_states(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    resources::list::<State>(&state.storage).await
}

/// Fetch one state.
#[utoipa::path(
    get,
    path = "/api/v1/states/{state_id}",
    params(("state_id" = String, Path, description = "State identifier")),
    responses(
        (status = 200, description = "The state", body = StateSchema),
        (status = 404, description = "Unknown state", body = ErrorSchema)
    ),
    tags = ["states"],
    operation_id = "getState"
)]
#[get("/states/{state_id}")]
pub async fn get_state(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resources::show(&state.storage, EntityKind::State, &path).await
}

/// Create a state.
#[utoipa::path(
    post,
    path = "/api/v1/states",
    request_body = StateSchema,
    responses(
        (status = 201, description = "Created", body = StateSchema),
        (status = 400, description = "Not a JSON, missing or unknown field", body = ErrorSchema)
    ),
    tags = ["states"],
    operation_id = "createState"
)]
#[post("/states")]
pub async fn create_state(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let attrs = json_object(&req, &body)?;
    let rules = CreateRules {
        required: REQUIRED,
        parent: None,
    };
    resources::create(&state.storage, EntityKind::State, attrs, rules).await
}

/// Update a state.
#[utoipa::path(
    put,
    path = "/api/v1/states/{state_id}",
    params(("state_id" = String, Path, description = "State identifier")),
    request_body = StateSchema,
    responses(
        (status = 200, description = "Updated", body = StateSchema),
        (status = 400, description = "Not a JSON or unknown field", body = ErrorSchema),
        (status = 404, description = "Unknown state", body = ErrorSchema)
    ),
    tags = ["states"],
    operation_id = "updateState"
)]
#[put("/states/{state_id}")]
pub async fn update_state(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let changes = json_object(&req, &body)?;
    resources::update(&state.storage, EntityKind::State, &path, changes, &[]).await
}

/// Delete a state and its cities.
#[utoipa::path(
    delete,
    path = "/api/v1/states/{state_id}",
    params(("state_id" = String, Path, description = "State identifier")),
    responses(
        (status = 200, description = "Deleted; empty object"),
        (status = 404, description = "Unknown state", body = ErrorSchema)
    ),
    tags = ["states"],
    operation_id = "deleteState"
)]
#[delete("/states/{state_id}")]
pub async fn delete_state(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resources::remove(&state.storage, EntityKind::State, &path).await
}
