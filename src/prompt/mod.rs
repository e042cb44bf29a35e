// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Infographic prompt synthesis
//!
//! Renders scraped content and optional user instructions into a single
//! instruction text for the image-generation backend. No I/O.

pub mod synthesizer;
pub mod template;

pub use synthesizer::{GenerationRequest, PromptConfig, PromptSynthesizer, DEFAULT_MAX_CONTENT_CHARS};
pub use template::{DESIGN_REQUIREMENTS, TRUNCATION_MARKER};
