pub mod config;
pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod storage;

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

/// SQL migrations shipped with the binary and applied on start-up.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();
