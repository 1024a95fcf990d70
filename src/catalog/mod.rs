//! Product Catalog Storage
//!
//! The in-memory store behind the service: a fixed-capacity table of product
//! records addressed directly by their numeric identifier.
//!
//! ## Core Concepts
//! - **Slots**: The table is pre-sized at construction. Slot `n` can only ever hold product `n`.
//! - **Populated**: A slot counts as populated when it holds a product with a non-empty name.
//!   Products whose name was reset to `""` stay in their slot (and are returned by `get`)
//!   but are skipped by `count`, listings and backups.
//! - **Locking**: One table-wide reader/writer lock. Reads share it, every write holds it
//!   exclusively, so writes are totally ordered and never observed half-applied.
//!
//! ## Submodules
//! - **`table`**: `ProductTable`, the lock-guarded slot array and its operations.
//! - **`types`**: The `Product` record and the `ProductPatch` mutation command.
//! - **`error`**: Errors returned by table operations.

pub mod error;
pub mod table;
pub mod types;
