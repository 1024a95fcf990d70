//! Product Holder Library
//!
//! An in-memory product catalog served over HTTP and backed up to a JSON snapshot.
//! The binary (`main.rs`) wires these modules together.
//!
//! ## Modules
//! - **`catalog`**: The fixed-capacity product table. Products are addressed directly by id,
//!   reads share a table-wide lock and writes hold it exclusively.
//! - **`backup`**: Snapshot save/load and the background task that saves periodically.
//! - **`api`**: axum handlers exposing lookups, counts and updates.
//! - **`config`**: Command-line and environment configuration.

pub mod api;
pub mod backup;
pub mod catalog;
pub mod config;
