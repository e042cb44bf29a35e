//! Configuration for page fetching
//!
//! Defines the user agent and the bound on the single fetch attempt.

use std::env;

/// Desktop browser user agent sent with every page request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for page fetching
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// User agent header (default: desktop Chrome)
    pub user_agent: String,
    /// Timeout for the single request in seconds (default: 30)
    pub timeout_secs: u64,
}

impl ScrapeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            user_agent: env::var("SCRAPE_USER_AGENT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout_secs: env::var("SCRAPE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}
