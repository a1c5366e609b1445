//! Result of a single guess and the lifecycle status of a game.

use serde::{Deserialize, Serialize};

/// What happened when a guess was applied.
///
/// The `Display` form is the message returned to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GuessOutcome {
    /// The game had already ended; nothing changed.
    #[strum(serialize = "Game already over!")]
    AlreadyOver,
    /// The last position examined matched the guessed letter.
    #[strum(serialize = "Hit!")]
    Hit,
    /// The last position examined did not match the guessed letter.
    #[strum(serialize = "Miss!")]
    Miss,
    /// This guess won the game.
    #[strum(serialize = "You win!")]
    Won,
    /// This guess exhausted the remaining attempts.
    #[strum(serialize = "Game over!")]
    Lost,
}

impl GuessOutcome {
    /// Returns true if this guess moved the game into a terminal state.
    pub fn ended_game(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Lifecycle status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum GameStatus {
    /// Guesses are still accepted.
    Active,
    /// The target was revealed or guessed outright.
    Won,
    /// Attempts ran out.
    Lost,
}
