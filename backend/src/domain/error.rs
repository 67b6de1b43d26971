//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; the HTTP mapping lives in `inbound::http::error`.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::error;

use crate::domain::entities::AttributeError;
use crate::domain::ports::StorageError;
use crate::middleware::trace::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// The request clashes with data already stored.
    Conflict,
    /// An unexpected error occurred inside the service.
    InternalError,
}

/// Error payload returned to API clients.
///
/// # Examples
/// ```
/// use hbnb::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "Not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error.
    ///
    /// Captures the current trace identifier if one is in scope so the error
    /// payload is correlated automatically.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier captured when the error was raised.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary structured details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use hbnb::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("Missing name")
    ///     .with_details(json!({ "field": "name" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::InvalidReference { field, target, id } => {
                Error::not_found(format!("{target} {id} not found")).with_details(json!({
                    "field": field,
                    "code": "invalid_reference",
                }))
            }
            StorageError::NotFound { .. } => Error::not_found("Not found"),
            StorageError::IdConflict { .. }
            | StorageError::DuplicateEmail { .. }
            | StorageError::Stale { .. } => Error::conflict(err.to_string()),
            StorageError::Connection { .. }
            | StorageError::Query { .. }
            | StorageError::Io { .. }
            | StorageError::Corrupt { .. } => {
                error!(error = %err, "storage operation failed");
                Error::internal(err.to_string())
            }
        }
    }
}

impl From<AttributeError> for Error {
    fn from(err: AttributeError) -> Self {
        match &err {
            AttributeError::UnknownField { field, .. } => Error::invalid_request(err.to_string())
                .with_details(json!({ "field": field, "code": "unknown_field" })),
            AttributeError::Invalid { .. } => Error::invalid_request(err.to_string())
                .with_details(json!({ "code": "invalid_attribute" })),
        }
    }
}
