//! Background statistics jobs.
//!
//! The service submits jobs through a [`JobQueue`] and never waits on them.
//! A [`StatsWorker`] drains the queue on its own task and owns recomputation
//! of the cached statistics. Worker failures are logged and dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::cache::{AVERAGE_ATTEMPTS_KEY, StatsCache};
use crate::store::{Datastore, GameStore, StoreError};

/// Work the stats worker knows how to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsJob {
    /// Recompute the average attempts remaining across active games.
    CacheAverageAttempts,
}

/// Fire-and-forget job submission.
pub trait JobQueue: Send + Sync {
    /// Enqueues a job. Never blocks and never fails the caller.
    fn submit(&self, job: StatsJob);
}

/// Queue backed by an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelQueue {
    tx: mpsc::UnboundedSender<StatsJob>,
}

impl ChannelQueue {
    /// Creates a queue and the receiver a [`StatsWorker`] consumes.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<StatsJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl JobQueue for ChannelQueue {
    fn submit(&self, job: StatsJob) {
        if self.tx.send(job).is_err() {
            warn!(?job, "Stats worker gone, job dropped");
        } else {
            debug!(?job, "Job submitted");
        }
    }
}

/// Consumes stats jobs and refreshes the cache.
pub struct StatsWorker {
    store: Arc<dyn Datastore>,
    cache: Arc<dyn StatsCache>,
    jobs: mpsc::UnboundedReceiver<StatsJob>,
}

impl StatsWorker {
    /// Creates a worker over the given store, cache and job receiver.
    pub fn new(
        store: Arc<dyn Datastore>,
        cache: Arc<dyn StatsCache>,
        jobs: mpsc::UnboundedReceiver<StatsJob>,
    ) -> Self {
        Self { store, cache, jobs }
    }

    /// Runs until every queue handle has been dropped.
    ///
    /// Each job touches the datastore synchronously, so it runs on the
    /// blocking pool and the worker awaits it before taking the next.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        info!("Stats worker started");
        while let Some(job) = self.jobs.recv().await {
            let store = Arc::clone(&self.store);
            let cache = Arc::clone(&self.cache);
            let handled =
                tokio::task::spawn_blocking(move || handle(store.as_ref(), cache.as_ref(), job))
                    .await;
            if let Err(e) = handled {
                warn!(?job, error = %e, "Stats job did not complete");
            }
        }
        info!("Stats worker stopped");
    }

    /// Spawns [`StatsWorker::run`] on the current runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

fn handle(store: &dyn Datastore, cache: &dyn StatsCache, job: StatsJob) {
    match job {
        StatsJob::CacheAverageAttempts => {
            if let Err(e) = cache_average_attempts(store, cache) {
                warn!(error = %e, "Average attempts refresh failed");
            }
        }
    }
}

/// Recomputes the average attempts remaining across active games and caches
/// it. With no active games the cache is left as it was.
///
/// Returns the cached message when one was written.
///
/// # Errors
///
/// Returns [`StoreError`] if active games cannot be loaded.
#[instrument(skip_all)]
pub fn cache_average_attempts<S>(
    store: &S,
    cache: &dyn StatsCache,
) -> Result<Option<String>, StoreError>
where
    S: GameStore + ?Sized,
{
    let games = store.active_games()?;
    if games.is_empty() {
        debug!("No active games, cache untouched");
        return Ok(None);
    }

    let total: f64 = games
        .iter()
        .map(|r| f64::from(*r.game().attempts_remaining()))
        .sum();
    let average = total / games.len() as f64;
    let message = format!("The average moves remaining is {:.2}", average);

    info!(count = games.len(), average, "Average attempts recomputed");
    cache.set(AVERAGE_ATTEMPTS_KEY, message.clone());
    Ok(Some(message))
}

/// Submits [`StatsJob::CacheAverageAttempts`] every `every`, starting after
/// the first full interval.
pub fn spawn_periodic_refresh(queue: Arc<dyn JobQueue>, every: Duration) -> JoinHandle<()> {
    info!(seconds = every.as_secs(), "Periodic stats refresh enabled");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // First tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            queue.submit(StatsJob::CacheAverageAttempts);
        }
    })
}
