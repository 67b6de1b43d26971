//! JSON error responses for the REST API.
//!
//! Every failure leaves the service as `{ "code", "message", ... }` with the
//! status implied by its [`ErrorCode`]. Internal failures are logged where
//! they are raised and reach the client with a generic message only.

use std::borrow::Cow;

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TRACE_ID_HEADER;

pub use crate::domain::ApiResult;

const INTERNAL_MESSAGE: &str = "Internal server error";

const fn http_status(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The payload a client may see for `error`.
fn public_view(error: &Error) -> Cow<'_, Error> {
    if error.code() != ErrorCode::InternalError {
        return Cow::Borrowed(error);
    }
    let redacted = Error::internal(INTERNAL_MESSAGE);
    Cow::Owned(match error.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        http_status(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(public_view(self).as_ref())
    }
}

/// Framework failures keep their client/server split: 404s stay 404s,
/// other 4xx become invalid requests and the rest are internal.
impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        let status = err.as_response_error().status_code();
        if status == StatusCode::NOT_FOUND {
            Error::not_found("Not found")
        } else if status.is_client_error() {
            debug!(error = %err, %status, "request rejected by actix");
            Error::invalid_request(err.to_string())
        } else {
            error!(error = %err, %status, "actix error promoted to domain error");
            Error::internal(INTERNAL_MESSAGE)
        }
    }
}

/// Fallback for unmatched routes: a JSON 404 naming the path.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found("Not found").with_details(json!({ "path": req.path() })))
}
