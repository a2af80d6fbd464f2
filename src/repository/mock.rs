use mockall::mock;

use super::{ProductReader, ProductWriter};
use crate::domain::{
    image::NewProductImage,
    product::{NewProduct, Product, SearchParams},
};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i64) -> RepositoryResult<Option<Product>>;
        fn search_products(&self, params: &SearchParams) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn add_product_images(&self, images: &[NewProductImage]) -> RepositoryResult<usize>;
        fn delete_product(&self, product_id: i64) -> RepositoryResult<()>;
    }
}
