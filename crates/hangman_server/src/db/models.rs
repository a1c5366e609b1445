//! Database row models and their conversions to domain records.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use hangman::{Game, GameSnapshot};
use tracing::instrument;

use crate::db::schema;
use crate::records::{GameKey, GameRecord, NewScore, NewUser, Score, User};
use crate::store::StoreError;

/// User row.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = schema::users)]
pub struct UserRow {
    id: i32,
    name: String,
    email: Option<String>,
    wins: i32,
    losses: i32,
    performance: f64,
    created_at: NaiveDateTime,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(
            row.id,
            row.name,
            row.email,
            row.wins,
            row.losses,
            row.performance,
            row.created_at,
        )
    }
}

/// Insertable user row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::users)]
pub struct NewUserRow {
    name: String,
    email: Option<String>,
}

impl From<NewUser> for NewUserRow {
    fn from(user: NewUser) -> Self {
        Self {
            name: user.name().clone(),
            email: user.email().clone(),
        }
    }
}

/// Win/loss counters written back after a game ends.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::users)]
pub struct UserStanding {
    wins: i32,
    losses: i32,
    performance: f64,
}

impl From<&User> for UserStanding {
    fn from(user: &User) -> Self {
        Self {
            wins: *user.wins(),
            losses: *user.losses(),
            performance: *user.performance(),
        }
    }
}

/// Game row. Move history is a JSON array of strings.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = schema::games)]
pub struct GameRow {
    id: i32,
    game_key: String,
    user_id: i32,
    target: String,
    revealed_word: String,
    attempts_allowed: i32,
    attempts_remaining: i32,
    game_over: bool,
    won: bool,
    moves: String,
}

impl TryFrom<GameRow> for GameRecord {
    type Error = StoreError;

    #[instrument(skip(row), fields(game_id = row.id))]
    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        let key = GameKey::parse(&row.game_key)
            .ok_or_else(|| StoreError::new(format!("Malformed game key '{}'", row.game_key)))?;
        let moves: Vec<String> = serde_json::from_str(&row.moves)?;
        let game = Game::restore(GameSnapshot {
            target: row.target,
            revealed_word: row.revealed_word,
            attempts_allowed: row.attempts_allowed,
            attempts_remaining: row.attempts_remaining,
            game_over: row.game_over,
            won: row.won,
            moves,
        })?;
        Ok(GameRecord::new(key, row.user_id, game))
    }
}

/// Insertable game row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::games)]
pub struct NewGameRow {
    game_key: String,
    user_id: i32,
    target: String,
    revealed_word: String,
    attempts_allowed: i32,
    attempts_remaining: i32,
    game_over: bool,
    won: bool,
    moves: String,
}

impl TryFrom<&GameRecord> for NewGameRow {
    type Error = StoreError;

    fn try_from(record: &GameRecord) -> Result<Self, Self::Error> {
        let game = record.game();
        Ok(Self {
            game_key: record.key().to_string(),
            user_id: *record.user_id(),
            target: game.target().clone(),
            revealed_word: game.revealed_word().clone(),
            attempts_allowed: *game.attempts_allowed(),
            attempts_remaining: *game.attempts_remaining(),
            game_over: *game.game_over(),
            won: *game.won(),
            moves: serde_json::to_string(game.moves())?,
        })
    }
}

/// Mutable game columns written after each move.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::games)]
pub struct GameProgress {
    revealed_word: String,
    attempts_remaining: i32,
    game_over: bool,
    won: bool,
    moves: String,
}

impl TryFrom<&Game> for GameProgress {
    type Error = StoreError;

    fn try_from(game: &Game) -> Result<Self, Self::Error> {
        Ok(Self {
            revealed_word: game.revealed_word().clone(),
            attempts_remaining: *game.attempts_remaining(),
            game_over: *game.game_over(),
            won: *game.won(),
            moves: serde_json::to_string(game.moves())?,
        })
    }
}

/// Score row.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = schema::scores)]
pub struct ScoreRow {
    id: i32,
    user_id: i32,
    played_at: NaiveDateTime,
    won: bool,
    guesses: i32,
}

impl From<ScoreRow> for Score {
    fn from(row: ScoreRow) -> Self {
        Score::new(row.id, row.user_id, row.played_at, row.won, row.guesses)
    }
}

/// Insertable score row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::scores)]
pub struct NewScoreRow {
    user_id: i32,
    won: bool,
    guesses: i32,
}

impl From<NewScore> for NewScoreRow {
    fn from(score: NewScore) -> Self {
        Self {
            user_id: *score.user_id(),
            won: *score.won(),
            guesses: *score.guesses(),
        }
    }
}
