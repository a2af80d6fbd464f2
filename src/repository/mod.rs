use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::image::NewProductImage;
use crate::domain::product::{NewProduct, Product, SearchParams};

pub mod product;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i64) -> RepositoryResult<Option<Product>>;
    fn search_products(&self, params: &SearchParams) -> RepositoryResult<Vec<Product>>;
}

/// Write operations over product records.
pub trait ProductWriter {
    /// Insert the product together with its labels.
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn add_product_images(&self, images: &[NewProductImage]) -> RepositoryResult<usize>;
    /// Remove the product along with its labels and image rows.
    fn delete_product(&self, product_id: i64) -> RepositoryResult<()>;
}
