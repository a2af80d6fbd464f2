use crate::domain::image::{NewProductImage, ProductImage, StoredImage};
use crate::domain::product::{NewProduct, Product, SearchParams};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ProductService, ServiceError, ServiceResult};
use crate::storage::ImageStorage;

/// Error code reported when creating a product fails.
pub const FAILED_TO_CREATE_PRODUCT: &str = "failed-to-create-product";
/// Error code reported when loading a single product fails.
pub const FAILED_TO_RETRIEVE_PRODUCT: &str = "failed-to-retrieve-product";
/// Error code reported when a product search fails.
pub const FAILED_TO_SEARCH_PRODUCTS: &str = "failed-to-search-products";

/// Catalog service backed by a product repository and an image storage.
pub struct CatalogService<R, S> {
    repo: R,
    storage: S,
}

impl<R, S> CatalogService<R, S> {
    pub fn new(repo: R, storage: S) -> Self {
        Self { repo, storage }
    }
}

impl<R, S> CatalogService<R, S>
where
    R: ProductWriter,
    S: ImageStorage,
{
    fn store_images(
        &self,
        product_id: i64,
        images: &[ProductImage],
    ) -> ServiceResult<Vec<StoredImage>> {
        let mut records = Vec::with_capacity(images.len());
        for (index, image) in images.iter().enumerate() {
            let position = index as i32;
            let url = self.storage.store(product_id, position, image)?;
            records.push(NewProductImage {
                product_id,
                role: image.role,
                file_name: image.file_name.clone(),
                url,
                position,
            });
        }

        self.repo.add_product_images(&records)?;

        Ok(records
            .into_iter()
            .map(|record| StoredImage {
                role: record.role,
                file_name: record.file_name,
                url: record.url,
                position: record.position,
            })
            .collect())
    }
}

impl<R, S> ProductService for CatalogService<R, S>
where
    R: ProductReader + ProductWriter + Send + Sync,
    S: ImageStorage,
{
    fn create_product(
        &self,
        product: NewProduct,
        images: Vec<ProductImage>,
    ) -> ServiceResult<Product> {
        let mut created = self.repo.create_product(&product)?;

        match self.store_images(created.id, &images) {
            Ok(stored) => {
                created.images = stored;
                Ok(created)
            }
            Err(err) => {
                log::error!("Failed to store images for product {}: {err}", created.id);
                if let Err(delete_err) = self.repo.delete_product(created.id) {
                    log::error!(
                        "Failed to roll back product {} after image error: {delete_err}",
                        created.id
                    );
                }
                Err(err)
            }
        }
    }

    fn get_product(&self, id: i64) -> ServiceResult<Product> {
        self.repo
            .get_product_by_id(id)?
            .ok_or(ServiceError::NotFound)
    }

    fn search_products(&self, params: &SearchParams) -> ServiceResult<Vec<Product>> {
        Ok(self.repo.search_products(params)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use chrono::{NaiveDate, NaiveDateTime};
    use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

    use crate::domain::image::ImageRole;
    use crate::repository::mock::{MockProductReader, MockProductWriter};
    use crate::services::mock::MockImageStorage;

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: String::new(),
            price: 10.0,
            category_id: "tools".to_string(),
            seller_id: 3,
            stock: 1,
            is_available: true,
            labels: vec!["sale".to_string()],
            images: Vec::new(),
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn sample_images() -> Vec<ProductImage> {
        vec![
            ProductImage::new(ImageRole::Main, "front.png", b"front".to_vec()),
            ProductImage::new(ImageRole::Extra, "side.png", b"side".to_vec()),
        ]
    }

    struct FakeRepo {
        product_reader: MockProductReader,
        product_writer: MockProductWriter,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                product_reader: MockProductReader::new(),
                product_writer: MockProductWriter::new(),
            }
        }
    }

    impl ProductReader for FakeRepo {
        fn get_product_by_id(&self, id: i64) -> RepositoryResult<Option<Product>> {
            self.product_reader.get_product_by_id(id)
        }

        fn search_products(&self, params: &SearchParams) -> RepositoryResult<Vec<Product>> {
            self.product_reader.search_products(params)
        }
    }

    impl ProductWriter for FakeRepo {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
            self.product_writer.create_product(new_product)
        }

        fn add_product_images(&self, images: &[NewProductImage]) -> RepositoryResult<usize> {
            self.product_writer.add_product_images(images)
        }

        fn delete_product(&self, product_id: i64) -> RepositoryResult<()> {
            self.product_writer.delete_product(product_id)
        }
    }

    #[test]
    fn create_product_stores_images_in_order() {
        let mut repo = FakeRepo::new();
        let mut storage = MockImageStorage::new();

        repo.product_writer
            .expect_create_product()
            .times(1)
            .withf(|product| product.name == "Hammer")
            .returning(|_| Ok(sample_product(5, "Hammer")));
        storage
            .expect_store()
            .times(2)
            .returning(|product_id, position, image| {
                Ok(format!("/images/{product_id}_{position}_{}", image.role))
            });
        repo.product_writer
            .expect_add_product_images()
            .times(1)
            .withf(|images| {
                images.len() == 2
                    && images[0].role == ImageRole::Main
                    && images[0].position == 0
                    && images[1].role == ImageRole::Extra
                    && images[1].position == 1
                    && images.iter().all(|image| image.product_id == 5)
            })
            .returning(|images| Ok(images.len()));
        repo.product_writer.expect_delete_product().times(0);

        let service = CatalogService::new(repo, storage);
        let created = service
            .create_product(NewProduct::new("Hammer", 10.0, "tools", 3), sample_images())
            .expect("expected creation to succeed");

        assert_eq!(created.id, 5);
        assert_eq!(created.images.len(), 2);
        assert_eq!(created.images[0].url, "/images/5_0_main");
        assert_eq!(created.images[1].file_name, "side.png");
    }

    #[test]
    fn create_product_rolls_back_when_storage_fails() {
        let mut repo = FakeRepo::new();
        let mut storage = MockImageStorage::new();

        repo.product_writer
            .expect_create_product()
            .times(1)
            .returning(|_| Ok(sample_product(9, "Saw")));
        storage
            .expect_store()
            .times(1)
            .returning(|_, _, _| Err(io::Error::other("disk full")));
        repo.product_writer.expect_add_product_images().times(0);
        repo.product_writer
            .expect_delete_product()
            .times(1)
            .withf(|product_id| *product_id == 9)
            .returning(|_| Ok(()));

        let service = CatalogService::new(repo, storage);
        let result = service.create_product(NewProduct::new("Saw", 4.0, "tools", 3), sample_images());

        assert!(matches!(result, Err(ServiceError::Storage(_))));
    }

    #[test]
    fn create_product_propagates_repository_errors() {
        let mut repo = FakeRepo::new();
        let mut storage = MockImageStorage::new();

        repo.product_writer
            .expect_create_product()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));
        storage.expect_store().times(0);

        let service = CatalogService::new(repo, storage);
        let result = service.create_product(NewProduct::new("Saw", 4.0, "tools", 3), sample_images());

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }

    #[test]
    fn get_product_maps_missing_rows_to_not_found() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_get_product_by_id()
            .times(1)
            .withf(|id| *id == 77)
            .returning(|_| Ok(None));

        let service = CatalogService::new(repo, MockImageStorage::new());

        assert!(matches!(service.get_product(77), Err(ServiceError::NotFound)));
    }

    #[test]
    fn get_product_returns_stored_product() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_get_product_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_product(id, "Drill"))));

        let service = CatalogService::new(repo, MockImageStorage::new());
        let product = service.get_product(4).expect("expected product");

        assert_eq!(product.id, 4);
        assert_eq!(product.name, "Drill");
    }

    #[test]
    fn search_products_forwards_params() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_search_products()
            .times(1)
            .withf(|params| params.query.as_deref() == Some("drill") && params.limit == 5)
            .returning(|_| Ok(vec![sample_product(1, "Drill"), sample_product(2, "Drill bits")]));

        let service = CatalogService::new(repo, MockImageStorage::new());
        let params = SearchParams {
            query: Some("drill".to_string()),
            limit: 5,
            ..SearchParams::default()
        };

        let products = service.search_products(&params).expect("expected results");

        assert_eq!(products.len(), 2);
    }
}
