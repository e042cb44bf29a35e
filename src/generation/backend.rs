// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image-generation backend trait

use async_trait::async_trait;

use super::types::{GenerationOutput, ImageGenerationRequest, QueueStatus};
use crate::errors::InfographicError;

/// Receives every queue status a backend observes
pub type StatusCallback<'a> = dyn Fn(&QueueStatus) + Send + Sync + 'a;

/// Asynchronous text-to-image service
///
/// Implementations submit one job and drive it to completion, reporting each
/// queue status they observe through `on_status` before returning the result.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Run a generation job to completion
    async fn generate(
        &self,
        request: &ImageGenerationRequest,
        on_status: &StatusCallback,
    ) -> Result<GenerationOutput, InfographicError>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
