//! HTTP API Module
//!
//! Exposes the catalog over a small JSON API served by axum.
//!
//! ## Endpoints
//! - `GET /api/v1/product?id=N`: One product. Without `id`, the populated products among
//!   the first `LIST_SCAN_LIMIT` ids.
//! - `GET /api/v1/product/count`: Number of populated products.
//! - `POST /api/v1/product/:id`: Apply a `ProductPatch`, creating the product if needed.
//! - `GET /health`: Liveness probe.
//!
//! ## Submodules
//! - **`handlers`**: Request handlers and the router.
//! - **`protocol`**: Endpoint paths and response bodies.

pub mod handlers;
pub mod protocol;

#[cfg(test)]
mod tests;
