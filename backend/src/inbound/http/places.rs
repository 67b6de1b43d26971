//! Places API handlers and place search.
//!
//! ```text
//! GET    /api/v1/cities/{city_id}/places
//! POST   /api/v1/cities/{city_id}/places  {"user_id":"...","name":"Loft"}
//! GET    /api/v1/places/{place_id}
//! PUT    /api/v1/places/{place_id}
//! DELETE /api/v1/places/{place_id}
//! POST   /api/v1/places_search            {"states":[],"cities":[],"amenities":[]}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde_json::Value;

use crate::domain::entities::{City, EntityKind, ForeignKey, Place, User};
use crate::domain::{ApiResult, PlaceSearch};
use crate::inbound::http::resources::{self, CreateRules};
use crate::inbound::http::schemas::{ErrorSchema, PlaceSchema, PlaceSearchSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_body, json_object, require_fields};

const REQUIRED: &[&str] = &["user_id", "name"];
const IMMUTABLE: &[&str] = &["user_id", "city_id"];

#[utoipa::path(
    get,
    path = "/api/v1/cities/{city_id}/places",
    params(("city_id" = String, Path, description = "City identifier")),
    responses(
        (status = 200, description = "Places in the city", body = [PlaceSchema]),
        (status = 404, description = "Unknown city", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "listPlaces"
)]
#[get("/cities/{city_id}/places")]
pub async fn list_places(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let city = resources::load_model::<City>(&state.storage, &path).await?;
    let places = state
        .storage
        .children::<Place>(ForeignKey::CityId, &city.id)
        .await?;
    Ok(HttpResponse::Ok().json(resources::render_all(places)))
}

#[utoipa::path(
    get,
    path = "/api/v1/places/{place_id}",
    params(("place_id" = String, Path, description = "Place identifier")),
    responses(
        (status = 200, description = "The place", body = PlaceSchema),
        (status = 404, description = "Unknown place", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "getPlace"
)]
#[get("/places/{place_id}")]
pub async fn get_place(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resources::show(&state.storage, EntityKind::Place, &path).await
}

/// Create a place in a city, hosted by an existing user.
#[utoipa::path(
    post,
    path = "/api/v1/cities/{city_id}/places",
    params(("city_id" = String, Path, description = "City identifier")),
    request_body = PlaceSchema,
    responses(
        (status = 201, description = "Created", body = PlaceSchema),
        (status = 400, description = "Not a JSON, missing or unknown field", body = ErrorSchema),
        (status = 404, description = "Unknown city, user or amenity", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "createPlace"
)]
#[post("/cities/{city_id}/places")]
pub async fn create_place(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let attrs = json_object(&req, &body)?;
    let city = resources::load_model::<City>(&state.storage, &path).await?;
    require_fields(&attrs, &REQUIRED[..1])?;
    if let Some(Value::String(user_id)) = attrs.get("user_id") {
        resources::load_model::<User>(&state.storage, user_id).await?;
    }
    let rules = CreateRules {
        required: REQUIRED,
        parent: Some(("city_id", city.id.as_str())),
    };
    resources::create(&state.storage, EntityKind::Place, attrs, rules).await
}

/// Update a place; host and city are fixed.
#[utoipa::path(
    put,
    path = "/api/v1/places/{place_id}",
    params(("place_id" = String, Path, description = "Place identifier")),
    request_body = PlaceSchema,
    responses(
        (status = 200, description = "Updated", body = PlaceSchema),
        (status = 400, description = "Not a JSON or unknown field", body = ErrorSchema),
        (status = 404, description = "Unknown place or amenity", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "updatePlace"
)]
#[put("/places/{place_id}")]
pub async fn update_place(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let changes = json_object(&req, &body)?;
    resources::update(&state.storage, EntityKind::Place, &path, changes, IMMUTABLE).await
}

/// Delete a place with its reviews and amenity links.
#[utoipa::path(
    delete,
    path = "/api/v1/places/{place_id}",
    params(("place_id" = String, Path, description = "Place identifier")),
    responses(
        (status = 200, description = "Deleted; empty object"),
        (status = 404, description = "Unknown place", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "deletePlace"
)]
#[delete("/places/{place_id}")]
pub async fn delete_place(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resources::remove(&state.storage, EntityKind::Place, &path).await
}

/// Places in the listed states or cities that offer every listed amenity.
#[utoipa::path(
    post,
    path = "/api/v1/places_search",
    request_body = PlaceSearchSchema,
    responses(
        (status = 200, description = "Matching places", body = [PlaceSchema]),
        (status = 400, description = "Not a JSON or unknown key", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "searchPlaces"
)]
#[post("/places_search")]
pub async fn search_places(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let criteria: PlaceSearch = json_body(&req, &body)?;
    let places = state.storage.search_places(&criteria).await?;
    Ok(HttpResponse::Ok().json(resources::render_all(places)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{TestApp, read_json};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::json;

    fn ids(body: &Value) -> Vec<String> {
        let mut ids: Vec<String> = body
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|place| place["id"].as_str().map(str::to_owned))
            .collect();
        ids.sort();
        ids
    }

    #[rstest]
    #[actix_web::test]
    async fn create_checks_user_before_name() {
        let harness = TestApp::new();
        let state = harness.seed_state("California").await;
        let city = harness.seed_city(&state.id, "Fresno").await;
        let user = harness.seed_user("host@hbnb.io").await;
        let app = test::init_service(harness.app()).await;
        let uri = format!("/api/v1/cities/{}/places", city.id);

        let cases = [
            (json!({ "name": "Loft" }), StatusCode::BAD_REQUEST),
            (json!({ "user_id": "ghost", "name": "Loft" }), StatusCode::NOT_FOUND),
            (json!({ "user_id": user.id }), StatusCode::BAD_REQUEST),
            (json!({ "user_id": user.id, "name": "Loft" }), StatusCode::CREATED),
        ];
        for (body, expected) in cases {
            let req = test::TestRequest::post().uri(&uri).set_json(body).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), expected);
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_amenity_reference_is_404() {
        let harness = TestApp::new();
        let state = harness.seed_state("California").await;
        let city = harness.seed_city(&state.id, "Fresno").await;
        let user = harness.seed_user("host@hbnb.io").await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/cities/{}/places", city.id))
            .set_json(json!({ "user_id": user.id, "name": "Loft", "amenity_ids": ["nope"] }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(res).await["details"]["field"], "amenity_ids");
    }

    #[rstest]
    #[actix_web::test]
    async fn search_unions_states_and_cities_then_filters_amenities() {
        let harness = TestApp::new();
        let california = harness.seed_state("California").await;
        let nevada = harness.seed_state("Nevada").await;
        let fresno = harness.seed_city(&california.id, "Fresno").await;
        let reno = harness.seed_city(&nevada.id, "Reno").await;
        let host = harness.seed_user("host@hbnb.io").await;
        let wifi = harness.seed_amenity("Wifi").await;
        let in_fresno = harness.seed_place(&fresno.id, &host.id, &[wifi.id.as_str()]).await;
        let in_reno = harness.seed_place(&reno.id, &host.id, &[]).await;
        let app = test::init_service(harness.app()).await;

        let search = |body: Value| {
            test::TestRequest::post()
                .uri("/api/v1/places_search")
                .set_json(body)
                .to_request()
        };

        let all = read_json(test::call_service(&app, search(json!({}))).await).await;
        let mut expected = vec![in_fresno.id.clone(), in_reno.id.clone()];
        expected.sort();
        assert_eq!(ids(&all), expected);

        let body = json!({ "states": [california.id], "cities": [reno.id] });
        let united = read_json(test::call_service(&app, search(body)).await).await;
        assert_eq!(ids(&united), expected);

        let body = json!({ "amenities": [wifi.id] });
        let with_wifi = read_json(test::call_service(&app, search(body)).await).await;
        assert_eq!(ids(&with_wifi), vec![in_fresno.id.clone()]);

        let body = json!({ "amenities": ["unknown"] });
        let none = read_json(test::call_service(&app, search(body)).await).await;
        assert!(ids(&none).is_empty());
    }

    #[rstest]
    #[actix_web::test]
    async fn search_rejects_unknown_keys_and_non_json() {
        let harness = TestApp::new();
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/places_search")
            .set_json(json!({ "countries": [] }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/v1/places_search")
            .set_payload("states")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(res).await["message"], "Not a JSON");
    }
}
