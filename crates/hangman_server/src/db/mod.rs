//! SQLite persistence for users, games and scores.

mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use repository::SqliteStore;
