//! Domain primitives, the storage port and the storage facade.
//!
//! Purpose: define the six HBNB entities, the persistence contract every
//! engine honours, and the transport-agnostic error returned to clients.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable code.
//! - Storage: cloneable facade over the active [`ports::StorageEngine`].
//! - PlaceSearch: criteria for `POST /places_search`.
//! - CascadePlan / PendingSet: helpers shared by the engine adapters.

pub mod cascade;
pub mod entities;
pub mod error;
pub mod pending;
pub mod place_search;
pub mod ports;
pub mod storage;

pub use self::cascade::CascadePlan;
pub use self::error::{Error, ErrorCode};
pub use self::pending::{PendingSet, prepare_batch};
pub use self::place_search::PlaceSearch;
pub use self::storage::{Stats, Storage};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use hbnb::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
