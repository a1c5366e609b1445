//! In-memory datastore for tests and ephemeral servers.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, instrument};

use crate::records::{GameKey, GameRecord, NewScore, NewUser, Score, User};
use crate::store::{GameStore, ScoreStore, StoreError, UserStore};

/// Datastore that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    games: HashMap<GameKey, GameRecord>,
    scores: Vec<Score>,
    next_user_id: i32,
    next_score_id: i32,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::new("Memory store lock poisoned"))
    }
}

impl UserStore for MemoryStore {
    #[instrument(skip(self, user), fields(name = %user.name()))]
    fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.lock()?;
        if inner.users.iter().any(|u| u.name() == user.name()) {
            return Err(StoreError::new(format!(
                "User name '{}' already taken",
                user.name()
            )));
        }
        inner.next_user_id += 1;
        let created = User::new(
            inner.next_user_id,
            user.name().clone(),
            user.email().clone(),
            0,
            0,
            0.0,
            Utc::now().naive_utc(),
        );
        inner.users.push(created.clone());
        debug!(user_id = created.id(), "User stored");
        Ok(created)
    }

    fn user_by_name(&self, name: &str) -> Result<Option<User>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.users.iter().find(|u| u.name() == name).cloned())
    }

    fn user_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.users.iter().find(|u| *u.id() == id).cloned())
    }

    fn update_user(&self, user: &User) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let slot = inner
            .users
            .iter_mut()
            .find(|u| u.id() == user.id())
            .ok_or_else(|| StoreError::new(format!("No user with id {}", user.id())))?;
        *slot = user.clone();
        Ok(())
    }

    fn users_by_rank(&self) -> Result<Vec<User>, StoreError> {
        let mut users = self.lock()?.users.clone();
        users.sort_by(|a, b| {
            b.performance()
                .total_cmp(a.performance())
                .then_with(|| a.wins().cmp(b.wins()))
        });
        Ok(users)
    }
}

impl GameStore for MemoryStore {
    #[instrument(skip(self, record), fields(key = %record.key()))]
    fn insert_game(&self, record: &GameRecord) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.games.insert(*record.key(), record.clone());
        Ok(())
    }

    fn game(&self, key: &GameKey) -> Result<Option<GameRecord>, StoreError> {
        Ok(self.lock()?.games.get(key).cloned())
    }

    #[instrument(skip(self, record), fields(key = %record.key()))]
    fn save_game(&self, record: &GameRecord) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        match inner.games.get_mut(record.key()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(StoreError::new(format!("No game with key {}", record.key()))),
        }
    }

    fn delete_game(&self, key: &GameKey) -> Result<bool, StoreError> {
        Ok(self.lock()?.games.remove(key).is_some())
    }

    fn active_games(&self) -> Result<Vec<GameRecord>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .games
            .values()
            .filter(|r| !r.game().game_over())
            .cloned()
            .collect())
    }

    fn active_games_for_user(&self, user_id: i32) -> Result<Vec<GameRecord>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .games
            .values()
            .filter(|r| *r.user_id() == user_id && !r.game().game_over())
            .cloned()
            .collect())
    }
}

impl ScoreStore for MemoryStore {
    #[instrument(skip(self, score), fields(user_id = score.user_id(), won = score.won()))]
    fn insert_score(&self, score: NewScore) -> Result<Score, StoreError> {
        let mut inner = self.lock()?;
        inner.next_score_id += 1;
        let stored = Score::new(
            inner.next_score_id,
            *score.user_id(),
            Utc::now().naive_utc(),
            *score.won(),
            *score.guesses(),
        );
        inner.scores.push(stored.clone());
        Ok(stored)
    }

    fn scores(&self) -> Result<Vec<Score>, StoreError> {
        Ok(self.lock()?.scores.clone())
    }

    fn scores_for_user(&self, user_id: i32) -> Result<Vec<Score>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .scores
            .iter()
            .filter(|s| *s.user_id() == user_id)
            .cloned()
            .collect())
    }

    fn high_scores(&self, limit: Option<usize>) -> Result<Vec<Score>, StoreError> {
        let inner = self.lock()?;
        let mut winners: Vec<Score> = inner.scores.iter().filter(|s| *s.won()).cloned().collect();
        // Stable sort keeps insertion order among equal guess counts.
        winners.sort_by_key(|s| *s.guesses());
        if let Some(limit) = limit {
            winners.truncate(limit);
        }
        Ok(winners)
    }
}
