// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Aggregate configuration loaded from the environment

use crate::errors::InfographicError;
use crate::generation::BackendConfig;
use crate::orchestrator::OrchestratorConfig;
use crate::prompt::PromptConfig;
use crate::scrape::ScrapeConfig;

/// Every tunable of the pipeline
#[derive(Debug, Clone, Default)]
pub struct InfographicConfig {
    pub scrape: ScrapeConfig,
    pub prompt: PromptConfig,
    pub backend: BackendConfig,
    pub orchestrator: OrchestratorConfig,
}

impl InfographicConfig {
    /// Load all sections from environment variables
    ///
    /// Call `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self {
            scrape: ScrapeConfig::from_env(),
            prompt: PromptConfig::from_env(),
            backend: BackendConfig::from_env(),
            orchestrator: OrchestratorConfig::from_env(),
        }
    }

    /// Validate every section, naming the first one that is wrong
    pub fn validate(&self) -> Result<(), InfographicError> {
        self.scrape
            .validate()
            .map_err(|e| InfographicError::Config(format!("scrape: {}", e)))?;
        self.prompt
            .validate()
            .map_err(|e| InfographicError::Config(format!("prompt: {}", e)))?;
        self.backend
            .validate()
            .map_err(|e| InfographicError::Config(format!("backend: {}", e)))?;
        self.orchestrator
            .validate()
            .map_err(|e| InfographicError::Config(format!("orchestrator: {}", e)))?;
        Ok(())
    }
}
