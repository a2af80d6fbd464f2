use std::io::{self, Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::image::{ProductImage, RoleTagged, classify_images};
use crate::domain::product::NewProduct;

/// Name given to uploads that arrive without a client file name.
const FALLBACK_FILE_NAME: &str = "upload";

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while decoding a product creation request.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// The `product` field was absent or empty.
    #[error("product data is required")]
    MissingProductData,
    /// The `product` field is not JSON of the expected shape.
    #[error("invalid product data format: {0}")]
    InvalidFormat(#[from] serde_json::Error),
    /// Declarative constraints on the payload were violated.
    #[error("invalid product data: {}", describe_violations(.0))]
    Validation(#[from] ValidationErrors),
    /// The provided name consists of whitespace only.
    #[error("product name cannot be empty")]
    EmptyName,
    /// Neither a main nor a thumbnail image was uploaded.
    #[error("at least one main or thumbnail image is required")]
    MissingPrimaryImage,
    /// An uploaded image could not be read back from its temp file.
    #[error("failed to read uploaded image `{file_name}`: {source}")]
    ImageRead {
        file_name: String,
        #[source]
        source: io::Error,
    },
}

/// JSON payload carried in the `product` field of the creation form.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductPayload {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[validate(required, range(exclusive_min = 0.0))]
    pub price: Option<f64>,
    #[validate(required, length(min = 1))]
    pub category_id: Option<String>,
    #[validate(required, range(min = 1))]
    pub seller_id: Option<i64>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i32,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl CreateProductPayload {
    /// Decode the raw field text, going through a generic JSON value first.
    pub fn parse(raw: &str) -> ProductFormResult<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Validates the payload and converts it into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let name = self.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        Ok(NewProduct::new(
            name,
            self.price.unwrap_or_default(),
            self.category_id.unwrap_or_default(),
            self.seller_id.unwrap_or_default(),
        )
        .with_description(self.description)
        .with_stock(self.stock)
        .available(self.is_available)
        .with_labels(self.labels))
    }
}

#[derive(MultipartForm)]
/// Multipart form submitted to `POST /products`.
pub struct CreateProductForm {
    /// JSON-encoded [`CreateProductPayload`].
    pub product: Option<Text<String>>,
    pub main_images: Vec<TempFile>,
    pub thumbnail_images: Vec<TempFile>,
    pub extra_images: Vec<TempFile>,
}

/// A decoded, validated creation request ready for the service.
#[derive(Debug)]
pub struct ProductSubmission {
    pub product: NewProduct,
    /// Role-tagged images in main, thumbnail, extra order.
    pub images: Vec<ProductImage>,
}

impl CreateProductForm {
    /// Decode the product payload and classify the uploaded images.
    pub fn into_submission(self) -> ProductFormResult<ProductSubmission> {
        let raw = self
            .product
            .map(Text::into_inner)
            .filter(|value| !value.is_empty())
            .ok_or(ProductFormError::MissingProductData)?;

        let product = CreateProductPayload::parse(&raw)?.into_new_product()?;

        if self.main_images.is_empty() && self.thumbnail_images.is_empty() {
            return Err(ProductFormError::MissingPrimaryImage);
        }

        let images = classify_images(self.main_images, self.thumbnail_images, self.extra_images)
            .into_iter()
            .map(read_upload)
            .collect::<ProductFormResult<Vec<_>>>()?;

        Ok(ProductSubmission { product, images })
    }
}

fn read_upload(tagged: RoleTagged<TempFile>) -> ProductFormResult<ProductImage> {
    let RoleTagged { role, item: upload } = tagged;
    let file_name = upload
        .file_name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());

    let mut file = upload.file;
    let mut content = Vec::with_capacity(upload.size);
    if let Err(source) = file.rewind().and_then(|_| file.read_to_end(&mut content)) {
        return Err(ProductFormError::ImageRead { file_name, source });
    }

    let mut image = ProductImage::new(role, file_name, content);
    image.content_type = upload.content_type.map(|mime| mime.to_string());
    Ok(image)
}

/// Render violated constraints as `field: code` pairs sorted by field name.
fn describe_violations(errors: &ValidationErrors) -> String {
    let mut violations: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let codes: Vec<&str> = errors.iter().map(|error| error.code.as_ref()).collect();
            format!("{field}: {}", codes.join(", "))
        })
        .collect();
    violations.sort();
    violations.join("; ")
}
