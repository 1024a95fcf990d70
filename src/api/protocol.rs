//! API Protocol
//!
//! Endpoint paths and the JSON bodies returned by the HTTP API.
//! Product bodies are `catalog::types::Product` serialized as-is.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Single product lookup (`?id=`) or listing (no query).
pub const ENDPOINT_PRODUCT: &str = "/api/v1/product";
/// Number of populated products.
pub const ENDPOINT_PRODUCT_COUNT: &str = "/api/v1/product/count";
/// Partial update of one product.
pub const ENDPOINT_PRODUCT_UPDATE: &str = "/api/v1/product/:id";
pub const ENDPOINT_HEALTH: &str = "/health";

/// How many ids the listing endpoint scans.
pub const LIST_SCAN_LIMIT: usize = 1_000;

// --- Data Transfer Objects ---

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: usize,
    /// Time the count was taken (RFC 3339, second precision).
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
