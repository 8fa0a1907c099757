// libs/provider-cell/src/services/source.rs
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client,
};
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::models::SourceError;

/// Boundary contract for the external provider directory. The core treats it
/// as read-only and eventually consistent; no transactional guarantee is
/// expected from the source.
#[async_trait]
pub trait ProviderSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Value>, SourceError>;
    async fn fetch_by_category(&self, category: &str) -> Result<Vec<Value>, SourceError>;
}

pub struct HttpProviderSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpProviderSource {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.directory_url.clone(),
            api_key: config.directory_api_key.clone(),
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !self.api_key.is_empty() {
            if let Ok(value) = HeaderValue::from_str(&self.api_key) {
                headers.insert("apikey", value);
            }
        }
        headers
    }

    async fn get_records(&self, path: &str) -> Result<Vec<Value>, SourceError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching directory records from {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Directory source error ({}): {}", status, error_text);
            return Err(SourceError::Http(format!("{}: {}", status, error_text)));
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| SourceError::MalformedPayload(e.to_string()))
    }
}

#[async_trait]
impl ProviderSource for HttpProviderSource {
    async fn fetch_all(&self) -> Result<Vec<Value>, SourceError> {
        self.get_records("/providers").await
    }

    async fn fetch_by_category(&self, category: &str) -> Result<Vec<Value>, SourceError> {
        let path = format!("/providers?category=eq.{}", category);
        self.get_records(&path).await
    }
}
