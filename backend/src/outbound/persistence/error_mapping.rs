//! Diesel error mapping onto [`StorageError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::StorageError;

/// Map a Diesel error, logging the driver detail at debug level.
///
/// Messages stay stable; driver text is only logged.
pub(crate) fn map_diesel_error(error: DieselError) -> StorageError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            _,
        ) => StorageError::connection("database connection error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some("users_email_key") =>
        {
            StorageError::duplicate_email(info.details().unwrap_or("email"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            StorageError::query("foreign key violation")
        }
        DieselError::NotFound => StorageError::query("record not found"),
        _ => StorageError::query("database error"),
    }
}
