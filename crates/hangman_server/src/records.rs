//! Domain records shared by the service layer and every datastore backend.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use hangman::Game;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Registered player.
#[derive(Debug, Clone, PartialEq, Getters, new)]
pub struct User {
    id: i32,
    name: String,
    email: Option<String>,
    wins: i32,
    losses: i32,
    performance: f64,
    created_at: NaiveDateTime,
}

impl User {
    /// Counts one finished game and recomputes the performance metric.
    #[instrument(skip(self), fields(user = %self.name))]
    pub fn record_result(&mut self, won: bool) {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.performance = performance(self.wins, self.losses);
    }
}

/// Win ratio over finished games, `0.0` before any game has finished.
pub fn performance(wins: i32, losses: i32) -> f64 {
    let played = wins + losses;
    if played == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(played)
    }
}

/// Registration data for a new user.
#[derive(Debug, Clone, Getters, new)]
pub struct NewUser {
    name: String,
    email: Option<String>,
}

/// Opaque, URL-safe reference to one stored game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameKey(uuid::Uuid);

impl GameKey {
    /// Mints a fresh key.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Parses a key previously produced by `to_string`. Returns `None` for
    /// anything that is not a well-formed key.
    pub fn parse(raw: &str) -> Option<Self> {
        uuid::Uuid::parse_str(raw).ok().map(Self)
    }
}

impl fmt::Display for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A stored game together with its key and owner.
#[derive(Debug, Clone, PartialEq, Getters, new)]
pub struct GameRecord {
    key: GameKey,
    user_id: i32,
    game: Game,
}

impl GameRecord {
    /// Mutable access to the game for applying guesses.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }
}

/// Completed-game record.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct Score {
    id: i32,
    user_id: i32,
    played_at: NaiveDateTime,
    won: bool,
    guesses: i32,
}

/// Data for appending a score to the ledger.
#[derive(Debug, Clone, Getters, new)]
pub struct NewScore {
    user_id: i32,
    won: bool,
    guesses: i32,
}
