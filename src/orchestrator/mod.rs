// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Infographic generation orchestrator
//!
//! Owns the inputs and lifecycle of a generation and exposes them as a
//! progress / error / artifact projection.

pub mod config;
pub mod engine;
pub mod host;
pub mod state;

pub use config::OrchestratorConfig;
pub use engine::InfographicOrchestrator;
pub use host::{DirectoryHost, InsertionHost};
pub use state::{
    CanvasNotice, GeneratedArtifact, GenerationInputs, OrchestrationState, Session,
    StatusSnapshot,
};
