//! Shared helpers for the Diesel job repository.
//!
//! Maps pool and Diesel failures onto [`JobRepositoryError`] and builds
//! `ILIKE` patterns that match user input literally.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::JobRepositoryError;

use super::pool::PoolError;

/// Escape character used in generated `ILIKE` patterns.
pub(crate) const LIKE_ESCAPE: char = '\\';

/// Map pool errors to repository connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> JobRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            JobRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors.
///
/// Unique violations become [`JobRepositoryError::Duplicate`]; closed
/// connections become connection errors; everything else is a query error.
pub(crate) fn map_diesel_error(error: DieselError) -> JobRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            JobRepositoryError::duplicate()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            JobRepositoryError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => JobRepositoryError::query(info.message().to_owned()),
        other => JobRepositoryError::query(other.to_string()),
    }
}

/// Build a case-insensitive substring pattern with `%`, `_`, and the escape
/// character matched literally.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_') || ch == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
