use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role an uploaded image plays for its product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageRole {
    Main,
    Thumbnail,
    Extra,
}

impl ImageRole {
    /// Stable token used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageRole::Main => "main",
            ImageRole::Thumbnail => "thumbnail",
            ImageRole::Extra => "extra",
        }
    }
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "main" => Ok(ImageRole::Main),
            "thumbnail" => Ok(ImageRole::Thumbnail),
            "extra" => Ok(ImageRole::Extra),
            other => Err(format!("unknown image role `{other}`")),
        }
    }
}

/// An upload paired with the role derived from the form field it arrived in.
#[derive(Debug)]
pub struct RoleTagged<T> {
    pub role: ImageRole,
    pub item: T,
}

/// Merge the three upload groups into one sequence tagged by role.
///
/// Order is main, then thumbnail, then extra; each group keeps its own order.
pub fn classify_images<T>(main: Vec<T>, thumbnail: Vec<T>, extra: Vec<T>) -> Vec<RoleTagged<T>> {
    let tag = |role: ImageRole| move |item: T| RoleTagged { role, item };

    let mut tagged = Vec::with_capacity(main.len() + thumbnail.len() + extra.len());
    tagged.extend(main.into_iter().map(tag(ImageRole::Main)));
    tagged.extend(thumbnail.into_iter().map(tag(ImageRole::Thumbnail)));
    tagged.extend(extra.into_iter().map(tag(ImageRole::Extra)));
    tagged
}

/// Image content submitted together with a new product.
#[derive(Clone, PartialEq)]
pub struct ProductImage {
    pub role: ImageRole,
    /// File name as sent by the client.
    pub file_name: String,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl ProductImage {
    pub fn new(role: ImageRole, file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            role,
            file_name: file_name.into(),
            content_type: None,
            content,
        }
    }

    /// File name prefixed with its role, e.g. `main:front.png`.
    pub fn tagged_name(&self) -> String {
        format!("{}:{}", self.role, self.file_name)
    }
}

impl fmt::Debug for ProductImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductImage")
            .field("role", &self.role)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.content.len())
            .finish()
    }
}

/// Image already persisted for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredImage {
    pub role: ImageRole,
    pub file_name: String,
    /// Public URL the image is served from.
    pub url: String,
    /// Position within the product's upload sequence.
    pub position: i32,
}

/// Image row to be recorded for an existing product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductImage {
    pub product_id: i64,
    pub role: ImageRole,
    pub file_name: String,
    pub url: String,
    pub position: i32,
}
