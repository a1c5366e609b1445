//! Command-line interface for hangman_server.

use clap::{Parser, Subcommand};

/// Hangman - word-guessing game server
#[derive(Parser, Debug)]
#[command(name = "hangman_server")]
#[command(about = "Hangman game server with REST API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to the TOML config file (defaults apply if it doesn't exist)
        #[arg(short, long, env = "HANGMAN_CONFIG", default_value = "hangman.toml")]
        config: std::path::PathBuf,

        /// Host to bind to
        #[arg(long, env = "HANGMAN_HOST")]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long, env = "HANGMAN_PORT")]
        port: Option<u16>,

        /// Path to the database file (created if it doesn't exist)
        #[arg(long, env = "HANGMAN_DB_PATH")]
        db_path: Option<String>,

        /// Seconds between periodic average-attempts refreshes
        #[arg(long, env = "HANGMAN_STATS_REFRESH_SECS")]
        stats_refresh_secs: Option<u64>,
    },

    /// Apply database migrations and exit
    Migrate {
        /// Path to the database file (created if it doesn't exist)
        #[arg(long, env = "HANGMAN_DB_PATH", default_value = "hangman.db")]
        db_path: String,
    },
}
