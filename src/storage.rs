use std::fs;
use std::io;
use std::path::PathBuf;

use crate::domain::image::ProductImage;

/// Backend that keeps uploaded image bytes and hands back a public URL.
pub trait ImageStorage: Send + Sync {
    fn store(&self, product_id: i64, position: i32, image: &ProductImage) -> io::Result<String>;
}

/// Stores images as plain files under `root`, served from `base_url`.
#[derive(Debug, Clone)]
pub struct FileImageStorage {
    root: PathBuf,
    base_url: String,
}

impl FileImageStorage {
    /// Create the storage, making sure the root directory exists.
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl ImageStorage for FileImageStorage {
    fn store(&self, product_id: i64, position: i32, image: &ProductImage) -> io::Result<String> {
        let file_name = format!(
            "{product_id}_{position}_{}_{}",
            image.role,
            sanitize_file_name(&image.file_name)
        );
        fs::write(self.root.join(&file_name), &image.content)?;
        Ok(format!("{}/{}", self.base_url, file_name))
    }
}

/// Keep ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = sanitized.trim_start_matches('.');
    if trimmed.is_empty() {
        "image".to_string()
    } else {
        trimmed.to_string()
    }
}
