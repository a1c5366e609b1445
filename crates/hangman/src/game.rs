//! State of one hangman game and the guess-application rules.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{GameError, GameStatus, GuessOutcome};

/// Character shown in place of an unrevealed letter.
pub const PLACEHOLDER: char = '_';

/// One hangman game.
///
/// The revealed word always has as many characters as the target. Once
/// `game_over` is set, [`Game::apply_guess`] no longer mutates anything.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Game {
    /// The secret word.
    target: String,
    /// Player-visible reconstruction of the target.
    revealed_word: String,
    /// Attempts the game started with.
    attempts_allowed: i32,
    /// Attempts left. Goes negative when a losing guess misses several positions.
    attempts_remaining: i32,
    /// Set on the transition to Won or Lost.
    game_over: bool,
    /// Meaningful only once `game_over` is set.
    won: bool,
    /// Chronological move history.
    moves: Vec<String>,
}

/// Plain field-for-field copy of a [`Game`], used to persist and reload it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// The secret word.
    pub target: String,
    /// Player-visible reconstruction of the target.
    pub revealed_word: String,
    /// Attempts the game started with.
    pub attempts_allowed: i32,
    /// Attempts left.
    pub attempts_remaining: i32,
    /// Whether the game has ended.
    pub game_over: bool,
    /// Whether the game was won.
    pub won: bool,
    /// Chronological move history.
    pub moves: Vec<String>,
}

impl Game {
    /// Starts a game with the target fully masked.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EmptyTarget`] if `target` is empty.
    #[instrument(skip(target))]
    pub fn new(target: impl Into<String>, attempts: i32) -> Result<Self, GameError> {
        let target = target.into();
        if target.is_empty() {
            return Err(GameError::EmptyTarget);
        }
        let target_len = target.chars().count();
        let revealed_word = std::iter::repeat_n(PLACEHOLDER, target_len).collect();
        debug!(target_len, "Game created");
        Ok(Self {
            target,
            revealed_word,
            attempts_allowed: attempts,
            attempts_remaining: attempts,
            game_over: false,
            won: false,
            moves: Vec::new(),
        })
    }

    /// Rebuilds a game from stored state.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EmptyTarget`] for an empty target and
    /// [`GameError::CorruptState`] when the revealed word and target differ in
    /// length.
    #[instrument(skip(snapshot))]
    pub fn restore(snapshot: GameSnapshot) -> Result<Self, GameError> {
        if snapshot.target.is_empty() {
            return Err(GameError::EmptyTarget);
        }
        let target_len = snapshot.target.chars().count();
        let revealed_len = snapshot.revealed_word.chars().count();
        if target_len != revealed_len {
            return Err(GameError::CorruptState {
                reason: format!(
                    "revealed word has {revealed_len} characters, target has {target_len}"
                ),
            });
        }
        Ok(Self {
            target: snapshot.target,
            revealed_word: snapshot.revealed_word,
            attempts_allowed: snapshot.attempts_allowed,
            attempts_remaining: snapshot.attempts_remaining,
            game_over: snapshot.game_over,
            won: snapshot.won,
            moves: snapshot.moves,
        })
    }

    /// Copies the game into its storable form.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            target: self.target.clone(),
            revealed_word: self.revealed_word.clone(),
            attempts_allowed: self.attempts_allowed,
            attempts_remaining: self.attempts_remaining,
            game_over: self.game_over,
            won: self.won,
            moves: self.moves.clone(),
        }
    }

    /// Current lifecycle status.
    pub fn status(&self) -> GameStatus {
        match (self.game_over, self.won) {
            (false, _) => GameStatus::Active,
            (true, true) => GameStatus::Won,
            (true, false) => GameStatus::Lost,
        }
    }

    /// Guesses consumed so far.
    pub fn guesses_used(&self) -> i32 {
        self.attempts_allowed.saturating_sub(self.attempts_remaining)
    }

    /// Applies one guess.
    ///
    /// A guess equal to the whole target (case-sensitive) wins outright.
    /// Otherwise the guess must be a single alphabetic character, compared
    /// case-insensitively against every position. Each position that does not
    /// match costs one attempt, so one guess can cost several. The returned
    /// `Hit`/`Miss` reflects the last position examined.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidGuess`] if the guess is neither the whole
    /// target nor a single letter. The game is left untouched in that case.
    #[instrument(skip(self), fields(attempts_remaining = self.attempts_remaining))]
    pub fn apply_guess(&mut self, guess: &str) -> Result<GuessOutcome, GameError> {
        if self.game_over {
            debug!("Guess ignored, game already over");
            return Ok(GuessOutcome::AlreadyOver);
        }

        if guess == self.target {
            self.moves.push("You got the whole word! You win!".to_string());
            self.finish(true);
            return Ok(GuessOutcome::Won);
        }

        let letter = single_letter(guess).ok_or(GameError::InvalidGuess)?;

        let mut round = GuessOutcome::Miss;
        let mut revealed: Vec<char> = self.revealed_word.chars().collect();
        for (slot, target_char) in revealed.iter_mut().zip(self.target.chars()) {
            if same_letter(target_char, letter) {
                *slot = target_char;
                round = GuessOutcome::Hit;
            } else {
                round = GuessOutcome::Miss;
                self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
            }
        }
        self.revealed_word = revealed.into_iter().collect();

        let mut entry = format!("Guess: '{}', Result: '{}'", guess, self.revealed_word);

        if self.revealed_word == self.target {
            entry.push_str(", You win!");
            self.moves.push(entry);
            self.finish(true);
            return Ok(GuessOutcome::Won);
        }

        if self.attempts_remaining < 1 {
            entry.push_str(", Game over!");
            self.moves.push(entry);
            self.finish(false);
            return Ok(GuessOutcome::Lost);
        }

        self.moves.push(entry);
        debug!(
            revealed = %self.revealed_word,
            attempts_remaining = self.attempts_remaining,
            outcome = %round,
            "Guess applied"
        );
        Ok(round)
    }

    fn finish(&mut self, won: bool) {
        self.game_over = true;
        self.won = won;
        info!(
            won,
            guesses_used = self.guesses_used(),
            moves = self.moves.len(),
            "Game finished"
        );
    }
}

/// Returns the guess as a char if it is exactly one alphabetic character.
fn single_letter(guess: &str) -> Option<char> {
    let mut chars = guess.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Some(c),
        _ => None,
    }
}

fn same_letter(a: char, b: char) -> bool {
    a.to_lowercase().eq(b.to_lowercase())
}
