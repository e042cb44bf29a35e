//! HTTP page fetching
//!
//! Retrieves raw markup for a URL with a single unauthenticated GET, and
//! downloads generated image bytes for canvas insertion.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::config::ScrapeConfig;
use crate::errors::InfographicError;

/// Source of page markup and image bytes
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the HTML document at `url`
    async fn fetch_html(&self, url: &str) -> Result<String, InfographicError>;

    /// Download raw bytes (used for generated images)
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, InfographicError>;
}

/// Validate that `url` is an absolute http/https URL
pub fn validate_url(url: &str) -> Result<Url, InfographicError> {
    let parsed = Url::parse(url.trim()).map_err(|_| InfographicError::InvalidUrl(url.to_string()))?;

    if !["http", "https"].contains(&parsed.scheme()) {
        return Err(InfographicError::InvalidUrl(url.to_string()));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(InfographicError::InvalidUrl(url.to_string()));
    }

    Ok(parsed)
}

/// Whether a content-type header value denotes HTML
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

/// reqwest-backed fetcher, one attempt per call, no retries
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new fetcher
    pub fn new(config: &ScrapeConfig) -> Result<Self, InfographicError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| InfographicError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response, InfographicError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| InfographicError::FetchFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_u16().to_string());
            return Err(InfographicError::FetchFailed(status_text));
        }

        Ok(response)
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, InfographicError> {
        let parsed = validate_url(url)?;
        debug!("Fetching page: {}", parsed);

        let response = self.get(&parsed).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !is_html_content_type(&content_type) {
            return Err(InfographicError::UnsupportedContentType(content_type));
        }

        let html = response
            .text()
            .await
            .map_err(|e| InfographicError::FetchFailed(e.to_string()))?;

        info!("Fetched {} bytes of HTML from: {}", html.len(), parsed);
        Ok(html)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, InfographicError> {
        let parsed = validate_url(url)?;
        debug!("Downloading bytes: {}", parsed);

        let response = self.get(&parsed).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| InfographicError::FetchFailed(e.to_string()))?;

        debug!("Downloaded {} bytes from: {}", body.len(), parsed);
        Ok(body)
    }
}
