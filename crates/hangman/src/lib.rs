//! Hangman game logic.
//!
//! This crate holds the state of a single hangman game and the rules for
//! applying a guess to it. It performs no I/O: persistence, scoring and
//! transport live in `hangman_server`.
//!
//! # Example
//!
//! ```
//! use hangman::{Game, GuessOutcome};
//!
//! let mut game = Game::new("cat", 5).unwrap();
//! let outcome = game.apply_guess("a").unwrap();
//!
//! assert_eq!(game.revealed_word(), "_a_");
//! assert_eq!(*game.attempts_remaining(), 3);
//! assert_eq!(outcome, GuessOutcome::Miss);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod error;
mod game;
mod outcome;

// Crate-level exports
pub use error::GameError;
pub use game::{Game, GameSnapshot, PLACEHOLDER};
pub use outcome::{GameStatus, GuessOutcome};
