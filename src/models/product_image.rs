use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::image::{ImageRole, NewProductImage as DomainNewProductImage, StoredImage};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct ProductImage {
    pub id: i64,
    pub product_id: i64,
    pub role: String,
    pub file_name: String,
    pub url: String,
    pub position: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct NewProductImage<'a> {
    pub product_id: i64,
    pub role: &'a str,
    pub file_name: &'a str,
    pub url: &'a str,
    pub position: i32,
}

impl ProductImage {
    /// Convert into the domain shape, skipping rows with an unknown role.
    pub fn into_stored(self) -> Option<StoredImage> {
        match self.role.parse::<ImageRole>() {
            Ok(role) => Some(StoredImage {
                role,
                file_name: self.file_name,
                url: self.url,
                position: self.position,
            }),
            Err(err) => {
                log::warn!("Skipping image {} of product {}: {err}", self.id, self.product_id);
                None
            }
        }
    }
}

impl<'a> From<&'a DomainNewProductImage> for NewProductImage<'a> {
    fn from(value: &'a DomainNewProductImage) -> Self {
        Self {
            product_id: value.product_id,
            role: value.role.as_str(),
            file_name: value.file_name.as_str(),
            url: value.url.as_str(),
            position: value.position,
        }
    }
}
