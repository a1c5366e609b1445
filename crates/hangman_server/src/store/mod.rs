//! Storage interfaces for users, games and scores.
//!
//! The service layer only sees these traits. Two backends exist: the SQLite
//! repository in [`crate::db`] and [`MemoryStore`].

mod error;
mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use crate::records::{GameKey, GameRecord, NewScore, NewUser, Score, User};

/// User registry storage.
pub trait UserStore: Send + Sync {
    /// Inserts a user. Fails if the name is already taken.
    fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Looks a user up by unique name.
    fn user_by_name(&self, name: &str) -> Result<Option<User>, StoreError>;

    /// Looks a user up by id.
    fn user_by_id(&self, id: i32) -> Result<Option<User>, StoreError>;

    /// Writes back a user's win/loss counters and performance.
    fn update_user(&self, user: &User) -> Result<(), StoreError>;

    /// All users, performance descending, ties by wins ascending.
    fn users_by_rank(&self) -> Result<Vec<User>, StoreError>;
}

/// Game storage. Each call is atomic for the single game it touches.
pub trait GameStore: Send + Sync {
    /// Inserts a new game.
    fn insert_game(&self, record: &GameRecord) -> Result<(), StoreError>;

    /// Loads a game by key.
    fn game(&self, key: &GameKey) -> Result<Option<GameRecord>, StoreError>;

    /// Overwrites the mutable state of an existing game.
    fn save_game(&self, record: &GameRecord) -> Result<(), StoreError>;

    /// Deletes a game. Returns whether anything was removed.
    fn delete_game(&self, key: &GameKey) -> Result<bool, StoreError>;

    /// Games that are not over, across all users.
    fn active_games(&self) -> Result<Vec<GameRecord>, StoreError>;

    /// Games of one user that are not over.
    fn active_games_for_user(&self, user_id: i32) -> Result<Vec<GameRecord>, StoreError>;
}

/// Append-only score ledger.
pub trait ScoreStore: Send + Sync {
    /// Appends a score.
    fn insert_score(&self, score: NewScore) -> Result<Score, StoreError>;

    /// Every score, oldest first.
    fn scores(&self) -> Result<Vec<Score>, StoreError>;

    /// Scores of one user, oldest first.
    fn scores_for_user(&self, user_id: i32) -> Result<Vec<Score>, StoreError>;

    /// Winning scores by guesses ascending, truncated to `limit` when given.
    fn high_scores(&self, limit: Option<usize>) -> Result<Vec<Score>, StoreError>;
}

/// Everything the service needs from a backend.
pub trait Datastore: UserStore + GameStore + ScoreStore {}

impl<T: UserStore + GameStore + ScoreStore> Datastore for T {}
