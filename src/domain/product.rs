use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::image::StoredImage;

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Identifier assigned by the persistence layer.
    pub id: i64,
    /// Human-readable name of the product.
    pub name: String,
    /// Longer description shown to buyers.
    pub description: String,
    /// Unit price, always positive.
    pub price: f64,
    /// Reference to the owning category.
    pub category_id: String,
    /// Reference to the seller offering the product.
    pub seller_id: i64,
    /// Units currently in stock.
    pub stock: i32,
    /// Whether the product can currently be ordered.
    pub is_available: bool,
    /// Free-text labels attached to the product.
    pub labels: Vec<String>,
    /// Images recorded for the product in upload order.
    pub images: Vec<StoredImage>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product. Carries no identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: String,
    pub seller_id: i64,
    pub stock: i32,
    pub is_available: bool,
    pub labels: Vec<String>,
    /// Timestamp captured when the product payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload with the required details and current timestamp.
    pub fn new(
        name: impl Into<String>,
        price: f64,
        category_id: impl Into<String>,
        seller_id: i64,
    ) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: name.into(),
            description: String::new(),
            price,
            category_id: category_id.into(),
            seller_id,
            stock: 0,
            is_available: false,
            labels: Vec::new(),
            updated_at: now,
        }
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the number of units in stock.
    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    /// Mark the product as available (or not).
    pub fn available(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }

    /// Replace the labels attached to the product.
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }
}

/// Default number of products returned by a search.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Typed, partially populated filter set used to search products.
///
/// Every `Option` left as `None` means "no filter on this field".
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// Free-text term matched against name and description.
    pub query: Option<String>,
    pub category_id: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
    pub seller_id: Option<i64>,
    pub available: Option<bool>,
    /// Products carrying any of these labels match. Empty means no filter.
    pub labels: Vec<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: None,
            category_id: None,
            min_price: None,
            max_price: None,
            seller_id: None,
            available: None,
            labels: Vec::new(),
            sort_by: None,
            sort_dir: None,
            limit: DEFAULT_SEARCH_LIMIT,
            offset: 0,
        }
    }
}

/// Column a search result set can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Price,
    CreatedAt,
}

impl SearchParams {
    /// Resolve the requested sort column, falling back to the identifier.
    pub fn sort_field(&self) -> SortField {
        match self.sort_by.as_deref() {
            Some("name") => SortField::Name,
            Some("price") => SortField::Price,
            Some("created_at") => SortField::CreatedAt,
            _ => SortField::Id,
        }
    }

    /// Whether results should be returned in descending order.
    pub fn is_descending(&self) -> bool {
        self.sort_dir
            .as_deref()
            .map(|dir| dir.eq_ignore_ascii_case("desc"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_search_params_use_pagination_defaults() {
        let params = SearchParams::default();

        assert_eq!(params.limit, DEFAULT_SEARCH_LIMIT);
        assert_eq!(params.offset, 0);
        assert!(params.labels.is_empty());
        assert!(params.available.is_none());
    }

    #[test]
    fn sort_field_falls_back_to_id() {
        let mut params = SearchParams::default();
        assert_eq!(params.sort_field(), SortField::Id);

        params.sort_by = Some("price".to_string());
        assert_eq!(params.sort_field(), SortField::Price);

        params.sort_by = Some("popularity".to_string());
        assert_eq!(params.sort_field(), SortField::Id);
    }

    #[test]
    fn sort_direction_is_case_insensitive() {
        let mut params = SearchParams::default();
        assert!(!params.is_descending());

        params.sort_dir = Some("DESC".to_string());
        assert!(params.is_descending());

        params.sort_dir = Some("asc".to_string());
        assert!(!params.is_descending());
    }
}
