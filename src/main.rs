use std::sync::Arc;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use diesel_migrations::MigrationHarness;
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;

use product_catalog::MIGRATIONS;
use product_catalog::config::ServerConfig;
use product_catalog::repository::DieselRepository;
use product_catalog::routes;
use product_catalog::services::ProductService;
use product_catalog::services::products::CatalogService;
use product_catalog::storage::FileImageStorage;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    match pool.get() {
        Ok(mut conn) => {
            if let Err(e) = conn.run_pending_migrations(MIGRATIONS) {
                log::error!("Failed to run database migrations: {e}");
                std::process::exit(1);
            }
            log::info!("Database migrations completed successfully");
        }
        Err(e) => {
            log::error!("Failed to get a connection for migrations: {e}");
            std::process::exit(1);
        }
    }

    let storage = match FileImageStorage::new(&config.images_dir, &config.images_base_url) {
        Ok(storage) => storage,
        Err(e) => {
            log::error!(
                "Failed to prepare image directory {}: {e}",
                config.images_dir.display()
            );
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);
    let service: Arc<dyn ProductService> = Arc::new(CatalogService::new(repo, storage));
    let service = web::Data::from(service);

    let images_dir = config.images_dir.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/images", images_dir.clone()))
            .configure(routes::configure)
            .app_data(service.clone())
    })
    .bind((config.address.as_str(), config.port))?
    .run()
    .await
}
