use std::io;

use mockall::mock;

use super::{ProductService, ServiceResult};
use crate::domain::{
    image::ProductImage,
    product::{NewProduct, Product, SearchParams},
};
use crate::storage::ImageStorage;

mock! {
    pub ProductService {}

    impl ProductService for ProductService {
        fn create_product(&self, product: NewProduct, images: Vec<ProductImage>) -> ServiceResult<Product>;
        fn get_product(&self, id: i64) -> ServiceResult<Product>;
        fn search_products(&self, params: &SearchParams) -> ServiceResult<Vec<Product>>;
    }
}

mock! {
    pub ImageStorage {}

    impl ImageStorage for ImageStorage {
        fn store(&self, product_id: i64, position: i32, image: &ProductImage) -> io::Result<String>;
    }
}
