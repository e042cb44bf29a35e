// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod config;
pub mod errors;
pub mod generation;
pub mod orchestrator;
pub mod prompt;
pub mod scrape;
pub mod version;


pub use config::InfographicConfig;
pub use errors::InfographicError;
pub use generation::{FalQueueClient, ImageBackend, ImageQuality, ImageSize};
pub use orchestrator::{
    DirectoryHost, GeneratedArtifact, InfographicOrchestrator, InsertionHost, OrchestrationState,
    StatusSnapshot,
};
pub use prompt::{GenerationRequest, PromptSynthesizer};
pub use scrape::{extract_content, DocumentFetcher, HttpFetcher, ScrapedContent};
