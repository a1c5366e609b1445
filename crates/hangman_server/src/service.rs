//! Hangman business logic layer.
//!
//! Wraps the datastore, cache and job queue behind the operations clients
//! call. All collaborators are injected, so the same service runs against
//! SQLite in production and [`crate::MemoryStore`] in tests.

use std::collections::HashMap;
use std::sync::Arc;

use hangman::{Game, GuessOutcome};
use tracing::{debug, info, instrument, warn};

use crate::cache::{AVERAGE_ATTEMPTS_KEY, StatsCache};
use crate::error::ServiceError;
use crate::forms::{
    GameForm, GameForms, MoveHistoryForm, ScoreForm, ScoreForms, StringMessage, UserForm,
    UserForms,
};
use crate::jobs::{JobQueue, StatsJob};
use crate::records::{GameKey, GameRecord, NewScore, NewUser, Score, User};
use crate::store::{Datastore, StoreError};

const USER_NOT_FOUND: &str = "A User with that name does not exist!";
const GAME_NOT_FOUND: &str = "Game not found!";

/// Service layer for every client-facing operation.
#[derive(Clone)]
pub struct HangmanService {
    store: Arc<dyn Datastore>,
    cache: Arc<dyn StatsCache>,
    jobs: Arc<dyn JobQueue>,
}

impl HangmanService {
    /// Creates a service over the given collaborators.
    pub fn new(
        store: Arc<dyn Datastore>,
        cache: Arc<dyn StatsCache>,
        jobs: Arc<dyn JobQueue>,
    ) -> Self {
        info!("Creating HangmanService");
        Self { store, cache, jobs }
    }

    /// Registers a user with a unique name.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Conflict`] if the name is taken.
    #[instrument(skip(self, email))]
    pub fn create_user(
        &self,
        user_name: &str,
        email: Option<String>,
    ) -> Result<StringMessage, ServiceError> {
        if self.store.user_by_name(user_name)?.is_some() {
            warn!("Duplicate user name rejected");
            return Err(ServiceError::conflict("A User with that name already exists!"));
        }
        let user = self
            .store
            .insert_user(NewUser::new(user_name.to_string(), email))?;
        info!(user_id = user.id(), "User registered");
        Ok(StringMessage::new(format!("User {} created!", user.name())))
    }

    /// Starts a game for a user and schedules a statistics refresh.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] for an unknown user,
    /// [`ServiceError::InvalidArgument`] for an empty target.
    #[instrument(skip(self, target))]
    pub fn new_game(
        &self,
        user_name: &str,
        target: &str,
        attempts: i32,
    ) -> Result<GameForm, ServiceError> {
        let user = self.user(user_name)?;
        let game = Game::new(target, attempts)?;
        let record = GameRecord::new(GameKey::generate(), *user.id(), game);
        self.store.insert_game(&record)?;
        info!(key = %record.key(), "Game created");

        self.jobs.submit(StatsJob::CacheAverageAttempts);
        Ok(GameForm::from_record(
            &record,
            user.name(),
            "Good luck playing Hangman!",
        ))
    }

    /// Deletes a game that has not ended yet.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if the key does not resolve.
    #[instrument(skip(self))]
    pub fn cancel_game(&self, urlsafe_key: &str) -> Result<StringMessage, ServiceError> {
        let record = self.game(urlsafe_key)?;
        if *record.game().game_over() {
            debug!("Refusing to cancel finished game");
            return Ok(StringMessage::new("Game is over, cannot be cancelled!"));
        }
        self.store.delete_game(record.key())?;
        info!(key = %record.key(), "Game cancelled");
        Ok(StringMessage::new(format!("Game {} cancelled!", record.key())))
    }

    /// Returns the current state of a game.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if the key does not resolve.
    #[instrument(skip(self))]
    pub fn get_game(&self, urlsafe_key: &str) -> Result<GameForm, ServiceError> {
        let record = self.game(urlsafe_key)?;
        let owner = self.owner(&record)?;
        Ok(GameForm::from_record(&record, owner.name(), "Time to make a move!"))
    }

    /// Lists a user's games that are still in progress.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] for an unknown user.
    #[instrument(skip(self))]
    pub fn get_user_games(&self, user_name: &str) -> Result<GameForms, ServiceError> {
        let user = self.user(user_name)?;
        let items = self
            .store
            .active_games_for_user(*user.id())?
            .iter()
            .map(|record| GameForm::from_record(record, user.name(), ""))
            .collect::<Vec<_>>();
        debug!(count = items.len(), "Active games listed");
        Ok(GameForms { items })
    }

    /// Applies a guess to a game.
    ///
    /// When the guess ends the game, the score is recorded and the owner's
    /// standing updated after the game itself is saved.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if the key does not resolve,
    /// [`ServiceError::InvalidArgument`] if the guess is neither the whole word
    /// nor a single letter.
    #[instrument(skip(self))]
    pub fn make_move(&self, urlsafe_key: &str, guess: &str) -> Result<GameForm, ServiceError> {
        let mut record = self.game(urlsafe_key)?;
        let mut owner = self.owner(&record)?;

        let outcome = record.game_mut().apply_guess(guess)?;
        match outcome {
            GuessOutcome::AlreadyOver => {}
            GuessOutcome::Hit | GuessOutcome::Miss => self.store.save_game(&record)?,
            GuessOutcome::Won | GuessOutcome::Lost => self.end_game(&record, &mut owner)?,
        }

        info!(
            key = %record.key(),
            outcome = %outcome,
            attempts_remaining = record.game().attempts_remaining(),
            "Move processed"
        );
        Ok(GameForm::from_record(&record, owner.name(), outcome.to_string()))
    }

    /// Lists every recorded score.
    ///
    /// # Errors
    ///
    /// Only datastore failures.
    #[instrument(skip(self))]
    pub fn get_scores(&self) -> Result<ScoreForms, ServiceError> {
        let scores = self.store.scores()?;
        self.score_forms(&scores)
    }

    /// Lists the scores of one user.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] for an unknown user.
    #[instrument(skip(self))]
    pub fn get_user_scores(&self, user_name: &str) -> Result<ScoreForms, ServiceError> {
        let user = self.user(user_name)?;
        let items = self
            .store
            .scores_for_user(*user.id())?
            .iter()
            .map(|score| ScoreForm::from_score(score, user.name()))
            .collect();
        Ok(ScoreForms { items })
    }

    /// Winning scores by fewest guesses, at most `number_of_results` of them.
    ///
    /// # Errors
    ///
    /// Only datastore failures.
    #[instrument(skip(self))]
    pub fn get_high_scores(
        &self,
        number_of_results: Option<usize>,
    ) -> Result<ScoreForms, ServiceError> {
        let scores = self.store.high_scores(number_of_results)?;
        self.score_forms(&scores)
    }

    /// All users by performance descending, ties by wins ascending.
    ///
    /// # Errors
    ///
    /// Only datastore failures.
    #[instrument(skip(self))]
    pub fn get_user_rankings(&self) -> Result<UserForms, ServiceError> {
        let items = self
            .store
            .users_by_rank()?
            .iter()
            .map(UserForm::from)
            .collect();
        Ok(UserForms { items })
    }

    /// Returns the move history of a game, oldest first.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if the key does not resolve.
    #[instrument(skip(self))]
    pub fn get_game_history(&self, urlsafe_key: &str) -> Result<MoveHistoryForm, ServiceError> {
        let record = self.game(urlsafe_key)?;
        Ok(MoveHistoryForm {
            moves: record.game().moves().clone(),
        })
    }

    /// Returns the cached average attempts remaining, or an empty message if
    /// it has never been computed.
    #[instrument(skip(self))]
    pub fn get_average_attempts_remaining(&self) -> StringMessage {
        StringMessage::new(self.cache.get(AVERAGE_ATTEMPTS_KEY).unwrap_or_default())
    }

    /// Persists the finished game, then appends its score and updates the
    /// owner's standing.
    #[instrument(skip_all, fields(key = %record.key(), won = record.game().won()))]
    fn end_game(&self, record: &GameRecord, owner: &mut User) -> Result<(), StoreError> {
        let game = record.game();
        self.store.save_game(record)?;
        self.store.insert_score(NewScore::new(
            *owner.id(),
            *game.won(),
            game.guesses_used(),
        ))?;
        owner.record_result(*game.won());
        self.store.update_user(owner)?;
        info!(
            wins = owner.wins(),
            losses = owner.losses(),
            performance = owner.performance(),
            "Game ended"
        );
        Ok(())
    }

    fn user(&self, user_name: &str) -> Result<User, ServiceError> {
        self.store
            .user_by_name(user_name)?
            .ok_or_else(|| ServiceError::not_found(USER_NOT_FOUND))
    }

    fn game(&self, urlsafe_key: &str) -> Result<GameRecord, ServiceError> {
        let Some(key) = GameKey::parse(urlsafe_key) else {
            debug!("Malformed game key");
            return Err(ServiceError::not_found(GAME_NOT_FOUND));
        };
        self.store
            .game(&key)?
            .ok_or_else(|| ServiceError::not_found(GAME_NOT_FOUND))
    }

    fn owner(&self, record: &GameRecord) -> Result<User, ServiceError> {
        self.store.user_by_id(*record.user_id())?.ok_or_else(|| {
            ServiceError::from(StoreError::new(format!(
                "Game {} references missing user {}",
                record.key(),
                record.user_id()
            )))
        })
    }

    fn score_forms(&self, scores: &[Score]) -> Result<ScoreForms, ServiceError> {
        let mut names: HashMap<i32, String> = HashMap::new();
        let mut items = Vec::with_capacity(scores.len());
        for score in scores {
            let user_id = *score.user_id();
            if !names.contains_key(&user_id) {
                let name = self
                    .store
                    .user_by_id(user_id)?
                    .map(|u| u.name().clone())
                    .unwrap_or_default();
                names.insert(user_id, name);
            }
            let name = names.get(&user_id).map(String::as_str).unwrap_or_default();
            items.push(ScoreForm::from_score(score, name));
        }
        Ok(ScoreForms { items })
    }
}
