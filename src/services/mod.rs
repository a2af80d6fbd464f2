use std::io;

use pushkind_common::repository::errors::RepositoryError;
use thiserror::Error;

use crate::domain::image::ProductImage;
use crate::domain::product::{NewProduct, Product, SearchParams};

pub mod products;

#[cfg(test)]
pub mod mock;

/// Result type returned by catalog services.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures reported by the catalog service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("product not found")]
    NotFound,
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("image storage error: {0}")]
    Storage(#[from] io::Error),
}

/// Operations the HTTP layer forwards validated requests to.
pub trait ProductService: Send + Sync {
    /// Persist a new product with its role-tagged images and return it with
    /// its assigned identifier.
    fn create_product(
        &self,
        product: NewProduct,
        images: Vec<ProductImage>,
    ) -> ServiceResult<Product>;
    fn get_product(&self, id: i64) -> ServiceResult<Product>;
    fn search_products(&self, params: &SearchParams) -> ServiceResult<Vec<Product>>;
}
