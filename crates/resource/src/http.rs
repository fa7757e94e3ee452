//! HTTP template source.
//!
//! Fetches template paths relative to a base URL, the way a browser would
//! fetch them from the site origin.

use async_trait::async_trait;
use faintly_traits::{SourceError, TemplateSource};
use log::debug;

#[derive(Debug, Clone)]
pub struct HttpTemplateSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTemplateSource {
    /// Creates a source for templates served under `base_url`
    /// (e.g. `https://main--site--org.aem.page`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Creates a source that shares an existing client.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The absolute URL a template path is fetched from. Paths that are
    /// already absolute URLs are used as they are.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateSource {
    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        let url = self.url_for(path);
        debug!("Fetching template {} from {}", path, url);

        let network_error = |e: reqwest::Error| SourceError::Network {
            path: path.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(&url).send().await.map_err(network_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(network_error)
    }

    fn name(&self) -> &'static str {
        "HttpTemplateSource"
    }
}
