//! Key-value cache for precomputed statistics.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::{debug, warn};

/// Cache key holding the formatted average attempts remaining.
pub const AVERAGE_ATTEMPTS_KEY: &str = "MOVES_REMAINING";

/// Best-effort string cache. Reads and writes never fail.
pub trait StatsCache: Send + Sync {
    /// Returns the cached value, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores a value, replacing any previous one.
    fn set(&self, key: &str, value: String);
}

/// Process-local cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        match self.entries.read() {
            Ok(entries) => entries.get(key).cloned(),
            Err(_) => {
                warn!(key, "Cache lock poisoned, treating as miss");
                None
            }
        }
    }

    fn set(&self, key: &str, value: String) {
        match self.entries.write() {
            Ok(mut entries) => {
                debug!(key, value = %value, "Cache updated");
                entries.insert(key.to_string(), value);
            }
            Err(_) => warn!(key, "Cache lock poisoned, dropping write"),
        }
    }
}
