//! Shared request-body helpers for inbound HTTP adapters.
//!
//! Bodies are read as raw bytes so the adapter decides what counts as JSON:
//! the content type must be `application/json` and the document must be an
//! object. Anything else is rejected before storage is touched.

use actix_web::{HttpMessage, HttpRequest};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::domain::{ApiResult, Error};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    NotJson,
    MissingField,
    InvalidBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotJson => "not_json",
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidBody => "invalid_body",
        }
    }
}

fn not_json() -> Error {
    Error::invalid_request("Not a JSON").with_details(json!({ "code": ErrorCode::NotJson.as_str() }))
}

fn is_json(req: &HttpRequest) -> bool {
    req.content_type().eq_ignore_ascii_case("application/json")
}

/// Decode the body as a non-empty JSON object.
///
/// # Examples
/// ```
/// use actix_web::test::TestRequest;
///
/// let req = TestRequest::post()
///     .insert_header(("content-type", "application/json"))
///     .to_http_request();
/// let attrs = hbnb::inbound::http::validation::json_object(&req, br#"{"name":"Nevada"}"#)
///     .expect("object body");
/// assert_eq!(attrs["name"], "Nevada");
/// ```
pub fn json_object(req: &HttpRequest, body: &[u8]) -> ApiResult<Map<String, Value>> {
    match any_object(req, body)? {
        attrs if attrs.is_empty() => Err(not_json()),
        attrs => Ok(attrs),
    }
}

fn any_object(req: &HttpRequest, body: &[u8]) -> ApiResult<Map<String, Value>> {
    if !is_json(req) {
        return Err(not_json());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(not_json()),
    }
}

/// Decode the body into a typed request, reporting schema mismatches as
/// invalid requests. An empty object is accepted.
pub(crate) fn json_body<T: DeserializeOwned>(req: &HttpRequest, body: &[u8]) -> ApiResult<T> {
    let attrs = any_object(req, body)?;
    serde_json::from_value(Value::Object(attrs)).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "code": ErrorCode::InvalidBody.as_str() }))
    })
}

/// Fail with `Missing <field>` for the first absent key, in `fields` order.
pub(crate) fn require_fields(attrs: &Map<String, Value>, fields: &[&str]) -> ApiResult<()> {
    match fields.iter().find(|field| !attrs.contains_key(**field)) {
        Some(field) => Err(Error::invalid_request(format!("Missing {field}")).with_details(json!({
            "field": field,
            "code": ErrorCode::MissingField.as_str(),
        }))),
        None => Ok(()),
    }
}
