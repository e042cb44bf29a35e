// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation via the fal.ai queue API

pub mod backend;
pub mod config;
pub mod fal;
pub mod types;

pub use backend::{ImageBackend, StatusCallback};
pub use config::BackendConfig;
pub use fal::FalQueueClient;
pub use types::{
    GeneratedImage, GenerationOutput, ImageGenerationRequest, ImageQuality, ImageSize, QueueStatus,
};
