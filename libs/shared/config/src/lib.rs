use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directory_url: String,
    pub directory_api_key: String,
    pub bind_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            directory_url: env::var("DIRECTORY_URL")
                .unwrap_or_else(|_| {
                    warn!("DIRECTORY_URL not set, using empty value");
                    String::new()
                }),
            directory_api_key: env::var("DIRECTORY_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("DIRECTORY_API_KEY not set, using empty value");
                    String::new()
                }),
            bind_port: env::var("BIND_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        };

        if !config.is_configured() {
            warn!("Provider directory source not configured - directory starts empty");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.directory_url.is_empty()
    }
}
