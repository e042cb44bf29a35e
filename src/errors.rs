// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the infographic pipeline
//!
//! Every variant renders as the message shown to the user through the
//! orchestrator's `error` signal.

use thiserror::Error;

/// Message used when a failure carries no text of its own
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate infographic";

/// Errors raised by the fetch, extract, generate and insert stages
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InfographicError {
    /// URL is malformed or uses a scheme other than http/https
    #[error("Invalid URL")]
    InvalidUrl(String),

    /// Page request failed (non-success status or transport error)
    #[error("Failed to fetch content: {0}")]
    FetchFailed(String),

    /// Response was not HTML
    #[error("The URL does not point to a valid HTML page")]
    UnsupportedContentType(String),

    /// Extracted body is shorter than the configured minimum
    #[error("Unable to extract sufficient content from the URL")]
    InsufficientContent {
        /// Characters actually extracted
        found: usize,
        /// Minimum required
        required: usize,
    },

    /// Neither a URL nor custom instructions were supplied
    #[error("Please enter a blog URL or custom prompt")]
    EmptyInput,

    /// Image-generation backend rejected the job or produced no images
    #[error("{0}")]
    BackendError(String),

    /// Host could not take the generated image
    #[error("Failed to add image to canvas")]
    InsertionFailed(String),

    /// A generation is already running on this orchestrator
    #[error("A generation is already in progress")]
    GenerationInProgress,

    /// Add-to-canvas requested without a generated infographic
    #[error("No generated infographic is available")]
    NoArtifact,

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl InfographicError {
    /// Text surfaced through the `error` signal
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }

    /// Short machine-readable kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::FetchFailed(_) => "fetch_failed",
            Self::UnsupportedContentType(_) => "unsupported_content_type",
            Self::InsufficientContent { .. } => "insufficient_content",
            Self::EmptyInput => "empty_input",
            Self::BackendError(_) => "backend_error",
            Self::InsertionFailed(_) => "insertion_failed",
            Self::GenerationInProgress => "generation_in_progress",
            Self::NoArtifact => "no_artifact",
            Self::Config(_) => "config",
        }
    }
}
