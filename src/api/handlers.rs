use super::protocol::*;
use crate::catalog::error::StorageError;
use crate::catalog::table::ProductTable;
use crate::catalog::types::ProductPatch;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Builds the application router around a shared table.
pub fn router(table: Arc<ProductTable>) -> Router {
    Router::new()
        .route(ENDPOINT_PRODUCT, get(handle_get_product))
        .route(ENDPOINT_PRODUCT_COUNT, get(handle_product_count))
        .route(ENDPOINT_PRODUCT_UPDATE, post(handle_update_product))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(Extension(table))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(body),
    )
        .into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    json_response(status, ErrorResponse::new(message))
}

pub async fn handle_get_product(
    Extension(table): Extension<Arc<ProductTable>>,
    Query(params): Query<ProductQuery>,
) -> Response {
    let id_str = match params.id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return json_response(StatusCode::OK, table.list_populated(LIST_SCAN_LIMIT)),
    };

    let id: u32 = match id_str.parse() {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!("Rejected product id {:?}: {}", id_str, e);
            return error_response(StatusCode::BAD_REQUEST, "Invalid product ID");
        }
    };

    match table.get(id) {
        Some(product) => json_response(StatusCode::OK, product),
        None => {
            tracing::debug!("Product {} not found", id);
            error_response(StatusCode::NOT_FOUND, "Product not found")
        }
    }
}

pub async fn handle_product_count(Extension(table): Extension<Arc<ProductTable>>) -> Response {
    // Full table scan, keep it off the async workers.
    match tokio::task::spawn_blocking(move || table.count()).await {
        Ok(count) => json_response(
            StatusCode::OK,
            CountResponse {
                count,
                timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            },
        ),
        Err(e) => {
            tracing::error!("Count task failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

pub async fn handle_update_product(
    Extension(table): Extension<Arc<ProductTable>>,
    Path(id_str): Path<String>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> Response {
    let id: u32 = match id_str.parse() {
        Ok(id) => id,
        Err(_) => return error_response(StatusCode::BAD_REQUEST, "Invalid product ID"),
    };

    let patch = match body {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            tracing::debug!("Rejected update body for product {}: {}", id, rejection);
            return error_response(StatusCode::BAD_REQUEST, "Invalid product update");
        }
    };

    if patch.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Nothing to update");
    }

    match table.update(id, |product| patch.apply(product)) {
        Ok(product) => {
            tracing::info!("Updated product {}", id);
            json_response(StatusCode::OK, product)
        }
        Err(StorageError::OutOfRange { capacity, .. }) => {
            tracing::warn!("Rejected update of product {} (capacity {})", id, capacity);
            error_response(StatusCode::BAD_REQUEST, "Product ID out of range")
        }
    }
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
