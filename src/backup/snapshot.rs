//! Snapshot Save/Load
//!
//! Converts between the table's populated slots and the JSON snapshot document.
//!
//! - `save` scans the table under its shared lock, then replaces the destination file as a
//!   whole (write to a sibling temp file, then rename over the destination). Every save
//!   gets its own temp file, so concurrent saves to one destination do not collide.
//! - `load` parses the document without holding any lock, then installs all records in one
//!   exclusive section. Records whose id does not fit the table are dropped.

use super::error::{SnapshotError, SnapshotResult};
use super::types::{LoadOutcome, RestoreSummary, SaveSummary, SnapshotDocument, SnapshotRecord};
use crate::catalog::table::ProductTable;
use crate::catalog::types::Product;

use chrono::Utc;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TEMP_ID: AtomicU64 = AtomicU64::new(0);

/// Writes every populated product of `table` to `path`, replacing any previous snapshot.
pub fn save(table: &ProductTable, path: &Path) -> SnapshotResult<SaveSummary> {
    let products: Vec<SnapshotRecord> = table
        .populated_records()
        .into_iter()
        .map(SnapshotRecord::from)
        .collect();

    let document = SnapshotDocument {
        timestamp: Utc::now(),
        products,
    };

    let mut data = serde_json::to_vec(&document).map_err(SnapshotError::Encode)?;
    data.push(b'\n');

    replace_file(path, &data)?;

    tracing::debug!(
        "Wrote snapshot with {} products to {}",
        document.products.len(),
        path.display()
    );

    Ok(SaveSummary {
        generated_at: document.timestamp,
        records: document.products.len(),
    })
}

/// Restores products from the snapshot at `path` into `table`.
///
/// A missing file yields `LoadOutcome::Missing`. On a decode error the table is not touched.
pub fn load(table: &ProductTable, path: &Path) -> SnapshotResult<LoadOutcome> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No snapshot at {}", path.display());
            return Ok(LoadOutcome::Missing);
        }
        Err(e) => return Err(SnapshotError::io(path, e)),
    };

    let document: SnapshotDocument =
        serde_json::from_slice(&bytes).map_err(|source| SnapshotError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    let generated_at = document.timestamp;
    let (restored, dropped) = table.restore(document.products.into_iter().map(Product::from));

    if dropped > 0 {
        tracing::warn!(
            "Dropped {} snapshot records with ids beyond table capacity {}",
            dropped,
            table.capacity()
        );
    }

    Ok(LoadOutcome::Restored(RestoreSummary {
        generated_at,
        restored,
        dropped,
    }))
}

/// `<path>.<pid>.<n>.tmp`, unique per save within and across processes.
fn temp_path(path: &Path) -> PathBuf {
    let n = NEXT_TEMP_ID.fetch_add(1, Ordering::Relaxed);
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{}.{}.tmp", std::process::id(), n));
    PathBuf::from(name)
}

fn replace_file(path: &Path, data: &[u8]) -> SnapshotResult<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).map_err(|e| SnapshotError::io(dir, e))?;
    }

    let tmp = temp_path(path);
    let written = write_synced(&tmp, data).and_then(|_| {
        fs::rename(&tmp, path).map_err(|e| SnapshotError::io(path, e))
    });

    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}

fn write_synced(path: &Path, data: &[u8]) -> SnapshotResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)
        .map_err(|e| SnapshotError::io(path, e))?;

    file.write_all(data).map_err(|e| SnapshotError::io(path, e))?;
    file.sync_all().map_err(|e| SnapshotError::io(path, e))
}
