use clap::Parser;
use product_holder::api::handlers::router;
use product_holder::backup::scheduler::BackupScheduler;
use product_holder::backup::snapshot;
use product_holder::backup::types::LoadOutcome;
use product_holder::catalog::table::ProductTable;
use product_holder::catalog::types::ProductPatch;
use product_holder::config::Config;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .init();

    tracing::info!("Starting product holder");

    // 1. Storage:
    let table = Arc::new(ProductTable::with_capacity(config.capacity));
    tracing::info!("Product table ready with {} slots", table.capacity());

    // 2. Restore last snapshot:
    match snapshot::load(&table, &config.backup_file) {
        Ok(LoadOutcome::Restored(summary)) => tracing::info!(
            "Restored {} products from {} (taken at {})",
            summary.restored,
            config.backup_file.display(),
            summary.generated_at
        ),
        Ok(LoadOutcome::Missing) => tracing::info!(
            "No backup at {}, starting empty",
            config.backup_file.display()
        ),
        Err(e) => tracing::error!("Failed to load backup: {}", e),
    }

    // 3. Periodic backups:
    let scheduler = BackupScheduler::start(
        table.clone(),
        config.backup_file.clone(),
        config.backup_interval(),
    );

    // 4. Demo data:
    if config.seed_demo_data {
        seed_demo_products(&table);
    }

    // 5. HTTP server:
    let app = router(table.clone());
    let listener = tokio::net::TcpListener::bind(config.bind).await?;

    tracing::info!("HTTP server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 6. Shutdown: stop the schedule, then take a final snapshot.
    scheduler.shutdown().await;

    if !config.no_final_backup {
        let path = config.backup_file.clone();
        match tokio::task::spawn_blocking(move || snapshot::save(&table, &path)).await? {
            Ok(summary) => tracing::info!(
                "Final backup saved to {} ({} products)",
                config.backup_file.display(),
                summary.records
            ),
            Err(e) => tracing::error!("Final backup failed: {}", e),
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

const DEMO_PRODUCTS: [(u32, &str, u32); 10] = [
    (1, "Lenovo laptop", 75_000),
    (2, "iPhone smartphone", 90_000),
    (3, "Sony headphones", 15_000),
    (4, "Logitech keyboard", 5_000),
    (5, "Samsung monitor", 30_000),
    (6, "Razer gaming mouse", 8_000),
    (7, "iPad tablet", 60_000),
    (8, "Apple Watch", 40_000),
    (9, "Xiaomi fitness band", 3_000),
    (10, "External hard drive", 7_000),
];

fn seed_demo_products(table: &ProductTable) {
    for (id, name, price) in DEMO_PRODUCTS {
        let patch = ProductPatch::listing(name, price);
        if let Err(e) = table.update(id, |product| patch.apply(product)) {
            tracing::warn!("Skipped demo product {}: {}", id, e);
        }
    }

    tracing::info!("Added {} demo products", DEMO_PRODUCTS.len());
}
