//! Error type for catalog store operations.

use crate::executor::ExecError;
use crate::model::RowId;

/// Catalog store error
///
/// The shell shows these to the user and carries on; none of them are fatal.
#[derive(Debug)]
pub enum StoreError {
    /// The database call itself failed
    Database(ExecError),
    /// An update or delete matched no row
    NotFound { table: &'static str, id: RowId },
    /// A returned row could not be decoded into a catalog type
    InvalidRow(String),
    /// The payload was rejected before reaching the store
    Validation(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Database(e) => write!(f, "Database error: {e}"),
            StoreError::NotFound { table, id } => {
                write!(f, "No row with id {id} in {table}")
            }
            StoreError::InvalidRow(msg) => write!(f, "Invalid row: {msg}"),
            StoreError::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ExecError> for StoreError {
    fn from(err: ExecError) -> Self {
        StoreError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound { table: "products", id: 7 };
        assert_eq!(err.to_string(), "No row with id 7 in products");

        let err = StoreError::Validation("product name must not be empty".into());
        assert!(err.to_string().starts_with("Validation error"));

        let err = StoreError::from(ExecError::QueryError("boom".into()));
        assert!(err.to_string().contains("Query error: boom"));
    }
}
