//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users
//! POST   /api/v1/users        {"email":"a@b.c","password":"pwd"}
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id}
//! DELETE /api/v1/users/{id}
//! ```
//!
//! Passwords are stored but never rendered.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use crate::domain::ApiResult;
use crate::domain::entities::{EntityKind, User};
use crate::inbound::http::resources::{self, CreateRules};
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::json_object;

const REQUIRED: &[&str] = &["email", "password"];
const IMMUTABLE: &[&str] = &["email"];

#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses((status = 200, description = "All users", body = [UserSchema])),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    resources::list::<User>(&state.storage).await
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user", body = UserSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resources::show(&state.storage, EntityKind::User, &path).await
}

/// Register a user. Emails are unique.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserSchema,
    responses(
        (status = 201, description = "Created", body = UserSchema),
        (status = 400, description = "Not a JSON, missing or unknown field", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let attrs = json_object(&req, &body)?;
    let rules = CreateRules {
        required: REQUIRED,
        parent: None,
    };
    resources::create(&state.storage, EntityKind::User, attrs, rules).await
}

/// Update a user; the email cannot change.
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = String, Path, description = "User identifier")),
    request_body = UserSchema,
    responses(
        (status = 200, description = "Updated", body = UserSchema),
        (status = 400, description = "Not a JSON or unknown field", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{user_id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let changes = json_object(&req, &body)?;
    resources::update(&state.storage, EntityKind::User, &path, changes, IMMUTABLE).await
}

/// Delete a user with their places and reviews.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted; empty object"),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{user_id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    resources::remove(&state.storage, EntityKind::User, &path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{TestApp, read_json};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(json!({ "password": "pwd" }), "Missing email")]
    #[case(json!({ "email": "a@b.c" }), "Missing password")]
    #[actix_web::test]
    async fn required_fields(#[case] body: Value, #[case] message: &str) {
        let harness = TestApp::new();
        let app = test::init_service(harness.app()).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(res).await["message"], message);
    }

    #[rstest]
    #[actix_web::test]
    async fn password_is_never_rendered() {
        let harness = TestApp::new();
        let app = test::init_service(harness.app()).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "email": "a@b.c", "password": "secret", "first_name": "Ada" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created = read_json(res).await;
        assert!(created.get("password").is_none());

        let req = test::TestRequest::get().uri("/api/v1/users").to_request();
        let listed = read_json(test::call_service(&app, req).await).await;
        assert!(listed[0].get("password").is_none());
        assert_eq!(listed[0]["first_name"], "Ada");
    }

    #[rstest]
    #[actix_web::test]
    async fn duplicate_email_conflicts() {
        let harness = TestApp::new();
        harness.seed_user("a@b.c").await;
        let app = test::init_service(harness.app()).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "email": "a@b.c", "password": "pwd" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
    }

    #[rstest]
    #[actix_web::test]
    async fn update_keeps_email() {
        let harness = TestApp::new();
        let user = harness.seed_user("a@b.c").await;
        let app = test::init_service(harness.app()).await;
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/users/{}", user.id))
            .set_json(json!({ "email": "new@b.c", "last_name": "Lovelace" }))
            .to_request();
        let body = read_json(test::call_service(&app, req).await).await;
        assert_eq!(body["email"], "a@b.c");
        assert_eq!(body["last_name"], "Lovelace");
    }

    #[rstest]
    #[actix_web::test]
    async fn wrong_attribute_type_is_rejected() {
        let harness = TestApp::new();
        let user = harness.seed_user("a@b.c").await;
        let app = test::init_service(harness.app()).await;
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/users/{}", user.id))
            .set_json(json!({ "first_name": 42 }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(res).await["details"]["code"], "invalid_attribute");
    }
}
