//! API Module Tests
//!
//! Runs the router on an ephemeral local port and drives it over real HTTP.
//!
//! ## Test Scopes
//! - **Lookup**: Status codes and bodies for found, missing and malformed ids.
//! - **Listing & Count**: Only populated products are reported.
//! - **Updates**: Partial patches, out-of-range ids, empty and malformed bodies.

#[cfg(test)]
mod tests {
    use crate::api::handlers::router;
    use crate::api::protocol::{CountResponse, ErrorResponse, HealthResponse};
    use crate::catalog::table::ProductTable;
    use crate::catalog::types::{Product, ProductPatch};
    use reqwest::StatusCode;
    use std::sync::Arc;

    async fn spawn_app(table: Arc<ProductTable>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router(table)).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn seeded_table() -> Arc<ProductTable> {
        let table = Arc::new(ProductTable::with_capacity(2_000));
        table
            .update(1, |p| ProductPatch::listing("Laptop", 75_000).apply(p))
            .unwrap();
        table
            .update(5, |p| ProductPatch::listing("Monitor", 30_000).apply(p))
            .unwrap();
        table
            .update(1_500, |p| ProductPatch::listing("Hidden from listing", 1).apply(p))
            .unwrap();
        table.update(7, |p| p.price = 99).unwrap();
        table
    }

    // ============================================================
    // LOOKUP
    // ============================================================

    #[tokio::test]
    async fn test_get_existing_product() {
        let base = spawn_app(seeded_table()).await;

        let response = reqwest::get(format!("{}/api/v1/product?id=5", base))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
        let product: Product = response.json().await.unwrap();
        assert_eq!(
            product,
            Product {
                id: 5,
                name: "Monitor".to_string(),
                price: 30_000,
                sold_amount: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_get_unnamed_product_is_still_returned() {
        let base = spawn_app(seeded_table()).await;

        let response = reqwest::get(format!("{}/api/v1/product?id=7", base))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let product: Product = response.json().await.unwrap();
        assert_eq!(product.name, "");
        assert_eq!(product.price, 99);
    }

    #[tokio::test]
    async fn test_get_missing_and_out_of_range_product() {
        let base = spawn_app(seeded_table()).await;

        for id in ["2", "2000", "4294967295"] {
            let response = reqwest::get(format!("{}/api/v1/product?id={}", base, id))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND, "id {}", id);
            let body: ErrorResponse = response.json().await.unwrap();
            assert_eq!(body.error, "Product not found");
        }
    }

    #[tokio::test]
    async fn test_get_invalid_id() {
        let base = spawn_app(seeded_table()).await;

        for id in ["abc", "-1", "4294967296"] {
            let response = reqwest::get(format!("{}/api/v1/product?id={}", base, id))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "id {}", id);
            let body: ErrorResponse = response.json().await.unwrap();
            assert_eq!(body.error, "Invalid product ID");
        }
    }

    // ============================================================
    // LISTING & COUNT
    // ============================================================

    #[tokio::test]
    async fn test_list_returns_populated_products_within_scan_window() {
        let base = spawn_app(seeded_table()).await;

        let response = reqwest::get(format!("{}/api/v1/product", base))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let products: Vec<Product> = response.json().await.unwrap();
        let ids: Vec<u32> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[tokio::test]
    async fn test_count_reports_populated_products() {
        let base = spawn_app(seeded_table()).await;

        let response = reqwest::get(format!("{}/api/v1/product/count", base))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: CountResponse = response.json().await.unwrap();
        assert_eq!(body.count, 3);
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_health() {
        let base = spawn_app(Arc::new(ProductTable::with_capacity(4))).await;

        let response = reqwest::get(format!("{}/health", base)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: HealthResponse = response.json().await.unwrap();
        assert_eq!(body.status, "ok");
    }

    // ============================================================
    // UPDATES
    // ============================================================

    #[tokio::test]
    async fn test_update_creates_and_patches_product() {
        let table = seeded_table();
        let base = spawn_app(table.clone()).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/api/v1/product/42", base))
            .json(&serde_json::json!({"name": "Mouse", "price": 8000}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = client
            .post(format!("{}/api/v1/product/42", base))
            .json(&serde_json::json!({"sold_amount": 16000}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let product: Product = response.json().await.unwrap();

        let expected = Product {
            id: 42,
            name: "Mouse".to_string(),
            price: 8_000,
            sold_amount: 16_000,
        };
        assert_eq!(product, expected);
        assert_eq!(table.get(42), Some(expected));
    }

    #[tokio::test]
    async fn test_update_out_of_range() {
        let table = seeded_table();
        let base = spawn_app(table.clone()).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/v1/product/2000", base))
            .json(&serde_json::json!({"name": "Nowhere"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json().await.unwrap();
        assert_eq!(body.error, "Product ID out of range");
        assert_eq!(table.count(), 3);
    }

    #[tokio::test]
    async fn test_update_rejects_empty_patch() {
        let table = seeded_table();
        let base = spawn_app(table.clone()).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/v1/product/3", base))
            .json(&serde_json::json!({}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(table.get(3).is_none());
    }

    #[tokio::test]
    async fn test_update_malformed_body_returns_json_error() {
        let table = seeded_table();
        let base = spawn_app(table.clone()).await;
        let client = reqwest::Client::new();

        let malformed = client
            .post(format!("{}/api/v1/product/3", base))
            .header("content-type", "application/json")
            .body("{\"name\": ")
            .send()
            .await
            .unwrap();
        let wrong_type = client
            .post(format!("{}/api/v1/product/3", base))
            .header("content-type", "text/plain")
            .body("name=Mouse")
            .send()
            .await
            .unwrap();
        let wrong_field_type = client
            .post(format!("{}/api/v1/product/3", base))
            .json(&serde_json::json!({"price": "cheap"}))
            .send()
            .await
            .unwrap();

        for response in [malformed, wrong_type, wrong_field_type] {
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                response
                    .headers()
                    .get("access-control-allow-origin")
                    .unwrap(),
                "*"
            );
            let body: ErrorResponse = response.json().await.unwrap();
            assert_eq!(body.error, "Invalid product update");
        }
        assert!(table.get(3).is_none());
    }

    #[tokio::test]
    async fn test_clearing_name_removes_from_count_but_not_lookup() {
        let table = seeded_table();
        let base = spawn_app(table.clone()).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/api/v1/product/5", base))
            .json(&serde_json::json!({"name": ""}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let count: CountResponse = client
            .get(format!("{}/api/v1/product/count", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(count.count, 2);

        let response = client
            .get(format!("{}/api/v1/product?id=5", base))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
