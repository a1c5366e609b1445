//! Errors raised by game construction and guess validation.

use derive_more::{Display, Error};

/// Reasons a game cannot be created, restored or advanced.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// The target word was empty.
    #[display("Target word cannot be empty.")]
    EmptyTarget,

    /// The guess was neither the whole word nor a single letter.
    #[display("Guess one letter or the whole word each round!")]
    InvalidGuess,

    /// Stored state violates a game invariant.
    #[display("Corrupt game state: {reason}")]
    CorruptState {
        /// What was wrong with the stored state.
        reason: String,
    },
}
