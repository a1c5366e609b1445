//! Request and response bodies exchanged with clients.

use serde::{Deserialize, Serialize};

use crate::records::{GameRecord, Score, User};

/// Single human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringMessage {
    /// The message.
    pub message: String,
}

impl StringMessage {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of `create_user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    /// Unique display name.
    pub user_name: String,
    /// Contact address.
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `new_game`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGameForm {
    /// Owner of the game.
    pub user_name: String,
    /// Word to guess.
    pub target: String,
    /// Attempts the player starts with.
    pub attempts: i32,
}

/// Body of `make_move`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeMoveForm {
    /// A single letter or the whole word.
    pub guess: String,
}

/// Query of `get_high_scores`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScoreQuery {
    /// Maximum number of scores to return. All winners when absent.
    #[serde(default)]
    pub number_of_results: Option<usize>,
}

/// Player-visible state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameForm {
    /// Key to pass back for this game.
    pub urlsafe_key: String,
    /// Owner of the game.
    pub user_name: String,
    /// Target with unguessed letters masked.
    pub revealed_word: String,
    /// Attempts left.
    pub attempts_remaining: i32,
    /// Whether the game has ended.
    pub game_over: bool,
    /// Whether the game was won.
    pub won: bool,
    /// Outcome of the request.
    pub message: String,
}

impl GameForm {
    /// Builds the form for a game owned by `user_name`.
    pub fn from_record(record: &GameRecord, user_name: &str, message: impl Into<String>) -> Self {
        let game = record.game();
        Self {
            urlsafe_key: record.key().to_string(),
            user_name: user_name.to_string(),
            revealed_word: game.revealed_word().clone(),
            attempts_remaining: *game.attempts_remaining(),
            game_over: *game.game_over(),
            won: *game.won(),
            message: message.into(),
        }
    }
}

/// List of games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameForms {
    /// The games.
    pub items: Vec<GameForm>,
}

/// One completed game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreForm {
    /// Player name.
    pub user_name: String,
    /// Day the game finished, `YYYY-MM-DD`.
    pub date: String,
    /// Whether the game was won.
    pub won: bool,
    /// Guesses consumed.
    pub guesses: i32,
}

impl ScoreForm {
    /// Builds the form for a score belonging to `user_name`.
    pub fn from_score(score: &Score, user_name: &str) -> Self {
        Self {
            user_name: user_name.to_string(),
            date: score.played_at().date().to_string(),
            won: *score.won(),
            guesses: *score.guesses(),
        }
    }
}

/// List of scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreForms {
    /// The scores.
    pub items: Vec<ScoreForm>,
}

/// Public view of a user, as listed in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserForm {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: Option<String>,
    /// Games won.
    pub wins: i32,
    /// Games lost.
    pub losses: i32,
    /// Win ratio.
    pub performance: f64,
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            name: user.name().clone(),
            email: user.email().clone(),
            wins: *user.wins(),
            losses: *user.losses(),
            performance: *user.performance(),
        }
    }
}

/// List of users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserForms {
    /// The users.
    pub items: Vec<UserForm>,
}

/// Move history of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistoryForm {
    /// Moves, oldest first.
    pub moves: Vec<String>,
}
