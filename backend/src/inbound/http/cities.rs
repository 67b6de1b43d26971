//! Cities API handlers.
//!
//! ```text
//! GET    /api/v1/states/{state_id}/cities
//! POST   /api/v1/states/{state_id}/cities  {"name":"San Francisco"}
//! GET    /api/v1/cities/{city_id}
//! PUT    /api/v1/cities/{city_id}
//! DELETE /api/v1/cities/{city_id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use crate::domain::ApiResult;
use crate::domain::entities::{City, EntityKind, ForeignKey, State};
use crate::inbound::http::resources::{self, CreateRules};
use crate::inbound::http::schemas::{CitySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::json_object;

const REQUIRED: &[&str] = &["name"];
/// A city never moves to another state.
const IMMUTABLE: &[&str] = &["state_id"];

/// Cities of a state.
#[utoipa::path(
    get,
    path = "/api/v1/states/{state_id}/cities",
    params(("state_id" = String, Path, description = "State identifier")),
    responses(
        (status = 200, description = "Cities of the state", body = [CitySchema]),
        (status = 404, description = "Unknown state", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "listCities"
)]
#[get("/states/{state_id}/cities")]
pub async fn list_cities(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = resources::load_model::<State>(&state.storage, &path).await?;
    let cities = state
        .storage
        .children::<City>(ForeignKey::StateId, &owner.id)
        .await?;
    Ok(HttpResponse::Ok().json(resources::render_all(cities)))
}

#[utoipa::path(
    get,
    path = "/api/v1/cities/{city_id}",
    params(("city_id" = String, Path, description = "City identifier")),
    responses(
        (status = 200, description = "The city", body = CitySchema),
        (status = 404, description = "Unknown city", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "getCity"
)]
#[get("/cities/{city_id}")]
pub async fn get_city(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resources::show(&state.storage, EntityKind::City, &path).await
}

/// Create a city in a state; `state_id` comes from the path.
#[utoipa::path(
    post,
    path = "/api/v1/states/{state_id}/cities",
    params(("state_id" = String, Path, description = "State identifier")),
    request_body = CitySchema,
    responses(
        (status = 201, description = "Created", body = CitySchema),
        (status = 400, description = "Not a JSON, missing or unknown field", body = ErrorSchema),
        (status = 404, description = "Unknown state", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "createCity"
)]
#[post("/states/{state_id}/cities")]
pub async fn create_city(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let attrs = json_object(&req, &body)?;
    let owner = resources::load_model::<State>(&state.storage, &path).await?;
    let rules = CreateRules {
        required: REQUIRED,
        parent: Some(("state_id", owner.id.as_str())),
    };
    resources::create(&state.storage, EntityKind::City, attrs, rules).await
}

#[utoipa::path(
    put,
    path = "/api/v1/cities/{city_id}",
    params(("city_id" = String, Path, description = "City identifier")),
    request_body = CitySchema,
    responses(
        (status = 200, description = "Updated", body = CitySchema),
        (status = 400, description = "Not a JSON or unknown field", body = ErrorSchema),
        (status = 404, description = "Unknown city", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "updateCity"
)]
#[put("/cities/{city_id}")]
pub async fn update_city(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let changes = json_object(&req, &body)?;
    resources::update(&state.storage, EntityKind::City, &path, changes, IMMUTABLE).await
}

/// Delete a city with its places and their reviews.
#[utoipa::path(
    delete,
    path = "/api/v1/cities/{city_id}",
    params(("city_id" = String, Path, description = "City identifier")),
    responses(
        (status = 200, description = "Deleted; empty object"),
        (status = 404, description = "Unknown city", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "deleteCity"
)]
#[delete("/cities/{city_id}")]
pub async fn delete_city(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resources::remove(&state.storage, EntityKind::City, &path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{TestApp, read_json};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[actix_web::test]
    async fn create_forces_the_path_state() {
        let harness = TestApp::new();
        let california = harness.seed_state("California").await;
        let nevada = harness.seed_state("Nevada").await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/states/{}/cities", california.id))
            .set_json(json!({ "name": "Fresno", "state_id": nevada.id }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(read_json(res).await["state_id"], json!(california.id));
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_state_is_404() {
        let harness = TestApp::new();
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/states/missing/cities")
            .set_json(json!({ "name": "Nowhere" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/v1/states/missing/cities")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn lists_only_the_states_cities() {
        let harness = TestApp::new();
        let california = harness.seed_state("California").await;
        let nevada = harness.seed_state("Nevada").await;
        harness.seed_city(&california.id, "Fresno").await;
        harness.seed_city(&nevada.id, "Reno").await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/states/{}/cities", nevada.id))
            .to_request();
        let body = read_json(test::call_service(&app, req).await).await;
        let names: Vec<&str> = body
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|city| city["name"].as_str())
            .collect();
        assert_eq!(names, ["Reno"]);
    }

    #[rstest]
    #[actix_web::test]
    async fn update_ignores_state_id() {
        let harness = TestApp::new();
        let california = harness.seed_state("California").await;
        let city = harness.seed_city(&california.id, "Fresno").await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/cities/{}", city.id))
            .set_json(json!({ "name": "Sacramento", "state_id": "elsewhere" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = read_json(res).await;
        assert_eq!(body["name"], "Sacramento");
        assert_eq!(body["state_id"], json!(california.id));
    }
}
