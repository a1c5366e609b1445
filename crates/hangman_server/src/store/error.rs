//! Failures raised by a datastore backend.

use derive_more::{Display, Error};
use tracing::instrument;

/// A datastore operation failed. Records where in the crate it was raised.
#[derive(Debug, Clone, Display, Error)]
#[display("Hangman store failure: {} ({}:{})", message, file, line)]
pub struct StoreError {
    /// What went wrong.
    pub message: String,
    /// Line that raised the failure.
    pub line: u32,
    /// Source file that raised the failure.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a failure stamped with the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        let message = match &err {
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                format!("Record already exists: {}", info.message())
            }
            Error::NotFound => "Record not found".to_string(),
            other => format!("SQLite query rejected: {}", other),
        };
        Self::new(message)
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Move history is not a JSON string list: {}", err))
    }
}

impl From<hangman::GameError> for StoreError {
    #[track_caller]
    fn from(err: hangman::GameError) -> Self {
        Self::new(format!("Stored game cannot be resumed: {}", err))
    }
}
