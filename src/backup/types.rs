use crate::catalog::types::Product;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The snapshot file as written to disk.
///
/// ```json
/// { "timestamp": "2025-01-01T12:00:00Z", "products": [ { "id": 1, "name": "...", "price": 10, "sold_amount": 0 } ] }
/// ```
///
/// The document carries no version marker. Unknown fields are ignored when reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotDocument {
    /// When the snapshot was generated (RFC 3339).
    pub timestamp: DateTime<Utc>,
    /// Populated products in id order.
    pub products: Vec<SnapshotRecord>,
}

/// One product entry of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub id: u32,
    pub name: String,
    pub price: u32,
    pub sold_amount: u32,
}

impl From<Product> for SnapshotRecord {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            sold_amount: product.sold_amount,
        }
    }
}

impl From<SnapshotRecord> for Product {
    fn from(record: SnapshotRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            price: record.price,
            sold_amount: record.sold_amount,
        }
    }
}

/// Result of a successful `snapshot::save`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveSummary {
    pub generated_at: DateTime<Utc>,
    pub records: usize,
}

/// Result of a successful `snapshot::load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No snapshot exists yet. The table was left untouched.
    Missing,
    Restored(RestoreSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreSummary {
    /// Timestamp recorded in the snapshot document.
    pub generated_at: DateTime<Utc>,
    /// Records installed into the table.
    pub restored: usize,
    /// Records skipped because their id does not fit the table.
    pub dropped: usize,
}
