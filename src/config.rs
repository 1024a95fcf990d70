//! Process Configuration
//!
//! Command-line flags, each with an environment variable fallback.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::backup::scheduler::MAX_BACKUP_PERIOD;
use crate::catalog::types::DEFAULT_CAPACITY;

#[derive(Debug, Clone, Parser)]
#[command(name = "product-holder", about = "In-memory product catalog with periodic JSON backups")]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, env = "PRODUCT_HOLDER_BIND", default_value = "0.0.0.0:8082")]
    pub bind: SocketAddr,

    /// Snapshot file restored at startup and rewritten by every backup.
    #[arg(long, env = "PRODUCT_HOLDER_BACKUP_FILE", default_value = "backup/products.json")]
    pub backup_file: PathBuf,

    /// Seconds between periodic backups (at most one year).
    #[arg(
        long,
        env = "PRODUCT_HOLDER_BACKUP_INTERVAL_SECS",
        default_value_t = 3600,
        value_parser = clap::value_parser!(u64).range(1..=MAX_BACKUP_PERIOD.as_secs())
    )]
    pub backup_interval_secs: u64,

    /// Number of product slots. Ids at or above this value are rejected.
    #[arg(long, env = "PRODUCT_HOLDER_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Insert the demo products at startup.
    #[arg(long)]
    pub seed_demo_data: bool,

    /// Skip the backup normally taken on shutdown.
    #[arg(long)]
    pub no_final_backup: bool,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn backup_interval(&self) -> Duration {
        Duration::from_secs(self.backup_interval_secs)
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
