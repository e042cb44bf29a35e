// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Orchestrator thresholds and timings

use std::env;

/// Minimum extracted characters for a scraped page to be usable
pub const DEFAULT_MIN_CONTENT_CHARS: usize = 100;

/// How long the add-to-canvas confirmation stays visible
pub const DEFAULT_CANVAS_NOTICE_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Scrapes with fewer characters fail with insufficient content
    pub min_content_chars: usize,
    /// Delay before "Image added to canvas successfully!" is cleared
    pub canvas_notice_ms: u64,
}

impl OrchestratorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            min_content_chars: env::var("MIN_CONTENT_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MIN_CONTENT_CHARS),
            canvas_notice_ms: env::var("CANVAS_NOTICE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CANVAS_NOTICE_MS),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min_content_chars == 0 {
            return Err("min_content_chars must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            min_content_chars: DEFAULT_MIN_CONTENT_CHARS,
            canvas_notice_ms: DEFAULT_CANVAS_NOTICE_MS,
        }
    }
}
