//! Snapshot Backup Module
//!
//! Persists the catalog to a single JSON document and rebuilds it on startup.
//!
//! ## Lifecycle
//! 1. **Restore**: Before serving traffic, `snapshot::load` installs every product from the
//!    last snapshot. A missing file is a normal first run, not an error.
//! 2. **Periodic Save**: `BackupScheduler` calls `snapshot::save` once per period on the
//!    blocking pool. Failures are logged and retried on the next tick.
//! 3. **Final Save**: On shutdown the scheduler is stopped and one last save is taken.
//!
//! ## Submodules
//! - **`snapshot`**: Save/load of the snapshot document.
//! - **`scheduler`**: Background task driving periodic saves.
//! - **`types`**: The on-disk document layout and operation summaries.
//! - **`error`**: Filesystem and decoding failures.

pub mod error;
pub mod scheduler;
pub mod snapshot;
pub mod types;
