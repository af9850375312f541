//! Shared Diesel error mapping for the catalogue repositories.
//!
//! Every repository port error has `Connection` and `Query` variants, so the
//! helpers take the two constructors and stay generic over the error type.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error.
pub(super) fn map_basic_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel failures into query or connection errors.
pub(super) fn map_basic_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => query("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error".to_owned())
        }
        _ => query("database error".to_owned()),
    }
}

/// Whether the failure is a unique constraint violation.
pub(super) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Collect row conversions, mapping the first failure through `query`.
pub(super) fn collect_rows<R, T, E>(
    rows: Vec<R>,
    query: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E>
where
    T: TryFrom<R, Error = String>,
{
    rows.into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|message| query(format!("corrupt row: {message}")))
}

/// Convert a Postgres `COUNT(*)` or affected-row count to `u64`.
pub(super) fn as_count<N>(value: N) -> u64
where
    u64: TryFrom<N>,
{
    u64::try_from(value).unwrap_or(0)
}
