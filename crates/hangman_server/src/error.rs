//! Service-level error kinds surfaced to callers.

use derive_more::{Display, Error};

use crate::store::StoreError;

/// Errors returned by [`crate::HangmanService`] operations.
#[derive(Debug, Clone, Display, Error)]
pub enum ServiceError {
    /// A unique identity is already taken.
    #[display("{message}")]
    Conflict {
        /// Human-readable explanation.
        message: String,
    },

    /// A referenced entity does not exist.
    #[display("{message}")]
    NotFound {
        /// Human-readable explanation.
        message: String,
    },

    /// Malformed or semantically invalid input.
    #[display("{message}")]
    InvalidArgument {
        /// Human-readable explanation.
        message: String,
    },

    /// The datastore failed.
    #[display("{_0}")]
    Storage(StoreError),

    /// The operation could not run to completion.
    #[display("{message}")]
    Internal {
        /// Human-readable explanation.
        message: String,
    },
}

impl ServiceError {
    /// Builds a [`ServiceError::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Builds a [`ServiceError::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Builds a [`ServiceError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Builds a [`ServiceError::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err)
    }
}

impl From<hangman::GameError> for ServiceError {
    fn from(err: hangman::GameError) -> Self {
        Self::invalid_argument(err.to_string())
    }
}
