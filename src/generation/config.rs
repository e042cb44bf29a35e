// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the image-generation backend

use std::env;

/// Model route used when none is configured
pub const DEFAULT_MODEL_ID: &str = "fal-ai/gpt-image-1/text-to-image/byok";

/// fal.ai queue API base
pub const DEFAULT_QUEUE_URL: &str = "https://queue.fal.run";

/// Configuration for the fal.ai queue backend
#[derive(Clone)]
pub struct BackendConfig {
    /// fal.ai API key (`FAL_KEY`)
    pub fal_key: Option<String>,
    /// OpenAI key forwarded to bring-your-own-key models
    pub openai_api_key: Option<String>,
    /// Model route, e.g. `fal-ai/gpt-image-1/text-to-image/byok`
    pub model_id: String,
    /// Queue API base URL
    pub queue_url: String,
    /// Delay between status polls in milliseconds (default: 1000)
    pub poll_interval_ms: u64,
}

impl BackendConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            fal_key: non_empty_var("FAL_KEY"),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            model_id: non_empty_var("FAL_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            queue_url: non_empty_var("FAL_QUEUE_URL")
                .unwrap_or_else(|| DEFAULT_QUEUE_URL.to_string()),
            poll_interval_ms: env::var("FAL_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.model_id.trim().is_empty() {
            return Err("model_id must not be empty".to_string());
        }
        if self.queue_url.trim().is_empty() {
            return Err("queue_url must not be empty".to_string());
        }
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be at least 1".to_string());
        }
        Ok(())
    }

    /// Check if credentials are configured
    pub fn has_credentials(&self) -> bool {
        self.fal_key.is_some()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            fal_key: None,
            openai_api_key: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            queue_url: DEFAULT_QUEUE_URL.to_string(),
            poll_interval_ms: 1000,
        }
    }
}

// Keys stay out of logs
impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("fal_key", &self.fal_key.as_ref().map(|_| "<redacted>"))
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("model_id", &self.model_id)
            .field("queue_url", &self.queue_url)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
