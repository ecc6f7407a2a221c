//! Error types for store operations

use thiserror::Error;

/// Errors that can occur while building or executing store statements
#[derive(Debug, Error)]
pub enum StoreError {
    /// A partial update was requested with no fields to set
    #[error("No data: {0}")]
    EmptyInput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The targeted row does not exist (zero rows returned or affected)
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

impl StoreError {
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Whether the error was caused by the request rather than the store.
    ///
    /// An HTTP layer maps these to 4xx responses.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput(_) | Self::Validation(_) | Self::NotFound(_) | Self::Conflict(_)
        )
    }

    /// Translate constraint violations reported by PostgreSQL into domain errors.
    ///
    /// Anything without a client-side SQLSTATE is passed through as
    /// [`StoreError::Sql`].
    pub(crate) fn from_constraint(err: sqlx::Error, context: &str) -> Self {
        let code = err
            .as_database_error()
            .and_then(|db| db.code())
            .map(|c| c.into_owned());

        code.and_then(|code| Self::from_sqlstate(&code, context))
            .unwrap_or(Self::Sql(err))
    }

    /// Map a SQLSTATE caused by the submitted data to a client error
    ///
    /// - 23505 unique violation: [`StoreError::Conflict`]
    /// - 23503 foreign key violation: [`StoreError::Validation`]
    /// - 23514 check violation: [`StoreError::Validation`]
    /// - 22003 numeric value out of range: [`StoreError::Validation`]
    fn from_sqlstate(code: &str, context: &str) -> Option<Self> {
        match code {
            "23505" => Some(Self::conflict(format!("{}: duplicate key", context))),
            "23503" => Some(Self::validation(format!(
                "{}: referenced row does not exist",
                context
            ))),
            "23514" => Some(Self::validation(format!(
                "{}: value violates a column constraint",
                context
            ))),
            "22003" => Some(Self::validation(format!(
                "{}: numeric value out of range",
                context
            ))),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_message() {
        let err = StoreError::empty_input("update payload has no fields");
        assert_eq!(err.to_string(), "No data: update payload has no fields");
    }

    #[test]
    fn test_client_errors() {
        assert!(StoreError::empty_input("x").is_client_error());
        assert!(StoreError::validation("x").is_client_error());
        assert!(StoreError::not_found("x").is_client_error());
        assert!(StoreError::conflict("x").is_client_error());
        assert!(!StoreError::Connection("x".to_string()).is_client_error());
        assert!(!StoreError::Sql(sqlx::Error::RowNotFound).is_client_error());
    }

    #[test]
    fn test_sqlstate_mapping() {
        assert!(matches!(
            StoreError::from_sqlstate("23505", "c1"),
            Some(StoreError::Conflict(_))
        ));
        for code in ["23503", "23514", "22003"] {
            let err = StoreError::from_sqlstate(code, "c1").unwrap();
            assert!(matches!(err, StoreError::Validation(_)), "{}", code);
            assert!(err.is_client_error());
        }
        assert!(StoreError::from_sqlstate("42P01", "c1").is_none());
    }

    #[test]
    fn test_check_violation_message() {
        let err = StoreError::from_sqlstate("23514", "7").unwrap();
        assert_eq!(
            err.to_string(),
            "Validation error: 7: value violates a column constraint"
        );
    }

    #[test]
    fn test_non_database_error_passes_through() {
        let err = StoreError::from_constraint(sqlx::Error::RowNotFound, "companies");
        assert!(matches!(err, StoreError::Sql(sqlx::Error::RowNotFound)));
    }
}
