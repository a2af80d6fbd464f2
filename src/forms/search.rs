//! Conversion of loosely typed query-string input into [`SearchParams`].
//!
//! The builder is deliberately permissive: a numeric filter that fails to
//! parse, or that falls outside its domain, is dropped and the field keeps its
//! default. A bad filter never rejects the whole search.

use std::collections::HashMap;
use std::str::FromStr;

use crate::domain::product::SearchParams;

pub const QUERY: &str = "query";
pub const CATEGORY_ID: &str = "category_id";
pub const MIN_PRICE: &str = "min_price";
pub const MAX_PRICE: &str = "max_price";
pub const SELLER_ID: &str = "seller_id";
pub const AVAILABLE: &str = "available";
pub const LABELS: &str = "labels";
pub const SORT_BY: &str = "sort_by";
pub const SORT_DIR: &str = "sort_dir";
pub const LIMIT: &str = "limit";
pub const OFFSET: &str = "offset";

/// Collapse decoded query pairs into a map holding the first value of each key.
pub fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut query = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        query.entry(key).or_insert(value);
    }
    query
}

/// Build search filters from raw query parameters. Never fails.
pub fn build_search_params(query: &HashMap<String, String>) -> SearchParams {
    let value = |key: &str| {
        query
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    };
    let text = |key: &str| value(key).map(str::to_string);

    let mut params = SearchParams {
        query: text(QUERY),
        category_id: text(CATEGORY_ID),
        sort_by: text(SORT_BY),
        sort_dir: text(SORT_DIR),
        ..SearchParams::default()
    };

    if let Some(limit) = parse_where::<i64>(value(LIMIT), |limit| *limit > 0) {
        params.limit = limit as usize;
    }

    if let Some(offset) = parse_where::<i64>(value(OFFSET), |offset| *offset >= 0) {
        params.offset = offset as usize;
    }

    params.min_price = parse_where::<f64>(value(MIN_PRICE), |price| *price >= 0.0);
    params.max_price = parse_where::<f64>(value(MAX_PRICE), |price| *price >= 0.0);
    params.seller_id = parse_where::<i64>(value(SELLER_ID), |id| *id > 0);

    // Any supplied value other than "true"/"1" filters on unavailable products.
    params.available = value(AVAILABLE).map(|raw| raw == "true" || raw == "1");

    if let Some(labels) = value(LABELS) {
        params.labels = labels.split(',').map(str::to_string).collect();
    }

    params
}

/// Parse `raw` and keep it only when `accept` holds.
fn parse_where<T: FromStr>(raw: Option<&str>, accept: impl Fn(&T) -> bool) -> Option<T> {
    raw.and_then(|raw| raw.parse::<T>().ok())
        .filter(|parsed| accept(parsed))
}
