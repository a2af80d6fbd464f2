pub mod products;
pub mod search;
