//! Hangman server library.
//!
//! # Architecture
//!
//! - **Service**: [`HangmanService`] implements every client operation
//! - **Storage**: [`Datastore`] traits with SQLite and in-memory backends
//! - **Statistics**: [`StatsWorker`] recomputes cached stats from a job queue
//! - **API**: axum [`router`] exposing the service over HTTP/JSON
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hangman_server::{ChannelQueue, HangmanService, MemoryCache, MemoryStore, StatsWorker};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let cache = Arc::new(MemoryCache::new());
//! let (queue, jobs) = ChannelQueue::channel();
//! StatsWorker::new(store.clone(), cache.clone(), jobs).spawn();
//!
//! let service = HangmanService::new(store, cache, Arc::new(queue));
//! service.create_user("alice", None)?;
//! let game = service.new_game("alice", "ferris", 8)?;
//! service.make_move(&game.urlsafe_key, "r")?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod cache;
mod config;
mod db;
mod error;
mod forms;
mod jobs;
mod records;
mod service;
mod store;

// Crate-level exports - HTTP surface
pub use api::{API_PREFIX, ApiError, ErrorResponse, router};

// Crate-level exports - Statistics cache and jobs
pub use cache::{AVERAGE_ATTEMPTS_KEY, MemoryCache, StatsCache};
pub use jobs::{
    ChannelQueue, JobQueue, StatsJob, StatsWorker, cache_average_attempts, spawn_periodic_refresh,
};

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Storage
pub use db::SqliteStore;
pub use records::{GameKey, GameRecord, NewScore, NewUser, Score, User, performance};
pub use store::{Datastore, GameStore, MemoryStore, ScoreStore, StoreError, UserStore};

// Crate-level exports - Service
pub use error::ServiceError;
pub use forms::{
    GameForm, GameForms, HighScoreQuery, MakeMoveForm, MoveHistoryForm, NewGameForm, ScoreForm,
    ScoreForms, StringMessage, UserForm, UserForms, UserRequest,
};
pub use service::HangmanService;
