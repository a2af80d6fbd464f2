use std::env;
use std::path::PathBuf;

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Directory uploaded images are written to.
    pub images_dir: PathBuf,
    /// Public URL prefix under which `images_dir` is served.
    pub images_base_url: String,
}

impl ServerConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("DATABASE_URL").unwrap_or("app.db".to_string());
        let address = lookup("ADDRESS").unwrap_or("127.0.0.1".to_string());
        let port = lookup("PORT")
            .and_then(|port| port.parse::<u16>().ok())
            .unwrap_or(8080);
        let images_dir = lookup("IMAGES_DIR").unwrap_or("./images".to_string());
        let images_base_url = lookup("IMAGES_BASE_URL")
            .unwrap_or_else(|| format!("http://{address}:{port}/images"));

        Self {
            database_url,
            address,
            port,
            images_dir: PathBuf::from(images_dir),
            images_base_url,
        }
    }
}
