//! Helpers for integration tests.

use diesel_migrations::MigrationHarness;

use product_catalog::MIGRATIONS;
use product_catalog::domain::product::NewProduct;
use pushkind_common::db::{DbPool, establish_connection_pool};

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

/// Product payload with sensible defaults for repository tests.
#[allow(dead_code)]
pub fn new_product(name: &str, price: f64, seller_id: i64, labels: &[&str]) -> NewProduct {
    NewProduct::new(name, price, "general", seller_id)
        .with_stock(5)
        .available(true)
        .with_labels(labels.iter().map(|label| label.to_string()).collect())
}
