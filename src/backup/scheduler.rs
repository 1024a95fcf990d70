//! Periodic Backup Scheduler
//!
//! Spawns a background task that saves a snapshot once per period, independent of request
//! traffic. The first save happens one full period after start.
//!
//! A failed save is logged and counted; the schedule keeps going and the next attempt is
//! simply the next tick.

use super::snapshot;
use crate::catalog::table::ProductTable;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Longest supported backup period (one year). Longer periods are clamped to it so
/// deadline arithmetic cannot overflow.
pub const MAX_BACKUP_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Counters describing how periodic backups have gone so far.
#[derive(Debug, Default)]
pub struct BackupStats {
    successes: AtomicU64,
    failures: AtomicU64,
}

impl BackupStats {
    pub fn successes(&self) -> u64 {
        self.successes.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

/// Handle to the running backup task.
///
/// Dropping the handle stops the schedule; call `shutdown` to stop it and wait for an
/// in-flight save to finish.
#[must_use = "the backup schedule stops when its handle is dropped"]
pub struct BackupScheduler {
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
    stats: Arc<BackupStats>,
}

impl BackupScheduler {
    /// Starts saving `table` to `path` every `period`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(table: Arc<ProductTable>, path: PathBuf, period: Duration) -> Self {
        let period = if period.is_zero() {
            tracing::warn!("Backup period of zero requested, using 1s instead");
            Duration::from_secs(1)
        } else if period > MAX_BACKUP_PERIOD {
            tracing::warn!(
                "Backup period of {:?} is too long, using {:?} instead",
                period,
                MAX_BACKUP_PERIOD
            );
            MAX_BACKUP_PERIOD
        } else {
            period
        };

        let stats = Arc::new(BackupStats::default());
        let (stop_tx, stop_rx) = oneshot::channel();

        let handle = {
            let stats = stats.clone();
            tokio::spawn(async move {
                backup_loop(table, path, period, stats, stop_rx).await;
            })
        };

        Self {
            stop: Some(stop_tx),
            handle,
            stats,
        }
    }

    /// Whether the background task is still alive.
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stats(&self) -> Arc<BackupStats> {
        self.stats.clone()
    }

    /// Stops the schedule. A save that is already running completes first.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }

        if let Err(e) = self.handle.await {
            tracing::error!("Backup scheduler task ended abnormally: {}", e);
        }
    }
}

async fn backup_loop(
    table: Arc<ProductTable>,
    path: PathBuf,
    period: Duration,
    stats: Arc<BackupStats>,
    mut stop: oneshot::Receiver<()>,
) {
    tracing::info!(
        "Backup scheduler started: every {:?} to {}",
        period,
        path.display()
    );

    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut stop => break,
            _ = ticker.tick() => run_backup(&table, &path, &stats).await,
        }
    }

    tracing::info!("Backup scheduler stopped");
}

async fn run_backup(table: &Arc<ProductTable>, path: &Path, stats: &BackupStats) {
    let result = {
        let table = table.clone();
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || snapshot::save(&table, &path)).await
    };

    match result {
        Ok(Ok(summary)) => {
            stats.successes.fetch_add(1, Ordering::Relaxed);
            tracing::info!(
                "Backup saved to {} ({} products)",
                path.display(),
                summary.records
            );
        }
        Ok(Err(e)) => {
            stats.failures.fetch_add(1, Ordering::Relaxed);
            tracing::error!("Failed to save backup: {}", e);
        }
        Err(e) => {
            stats.failures.fetch_add(1, Ordering::Relaxed);
            tracing::error!("Backup task panicked: {}", e);
        }
    }
}
