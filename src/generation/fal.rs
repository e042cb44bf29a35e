// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! fal.ai queue client for text-to-image generation
//!
//! Protocol:
//! 1. `POST {queue_url}/{model_id}` submits the job and returns its status and
//!    response URLs
//! 2. `GET {status_url}` is polled until the job reports `COMPLETED`
//! 3. `GET {response_url}` returns the produced images

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::backend::{ImageBackend, StatusCallback};
use super::config::BackendConfig;
use super::types::{GenerationOutput, ImageGenerationRequest, ImageQuality, ImageSize, QueueStatus};
use crate::errors::InfographicError;

/// Body posted to the queue
#[derive(Debug, Serialize)]
pub struct FalTextToImageInput<'a> {
    pub prompt: &'a str,
    pub image_size: ImageSize,
    pub quality: ImageQuality,
    pub num_images: u32,
    pub background: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<&'a str>,
}

/// Queue acknowledgement for a submitted job
#[derive(Debug, Clone, Deserialize)]
pub struct QueueSubmission {
    pub request_id: String,
    #[serde(default)]
    pub status_url: Option<String>,
    #[serde(default)]
    pub response_url: Option<String>,
}

/// Client for the fal.ai queue REST API
pub struct FalQueueClient {
    client: Client,
    config: BackendConfig,
    auth_header: String,
}

impl FalQueueClient {
    /// Create a new client; fails when no fal.ai key is configured
    pub fn new(config: BackendConfig) -> Result<Self, InfographicError> {
        config.validate().map_err(InfographicError::Config)?;
        let fal_key = config
            .fal_key
            .clone()
            .ok_or_else(|| InfographicError::Config("FAL_KEY is not set".to_string()))?;

        let client = Client::builder()
            .build()
            .map_err(|e| InfographicError::Config(format!("HTTP client: {}", e)))?;

        info!(
            "fal.ai queue client configured: queue={}, model={}",
            config.queue_url, config.model_id
        );

        Ok(Self {
            client,
            auth_header: format!("Key {}", fal_key),
            config,
        })
    }

    pub fn model_id(&self) -> &str {
        &self.config.model_id
    }

    /// Build the JSON body for a request
    pub fn build_input<'a>(&'a self, request: &'a ImageGenerationRequest) -> FalTextToImageInput<'a> {
        FalTextToImageInput {
            prompt: &request.prompt,
            image_size: request.image_size,
            quality: request.quality,
            num_images: request.num_images,
            background: "opaque",
            openai_api_key: self.config.openai_api_key.as_deref(),
        }
    }

    fn submit_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.queue_url.trim_end_matches('/'),
            self.config.model_id.trim_matches('/')
        )
    }

    fn request_url(&self, submission: &QueueSubmission, suffix: &str) -> String {
        format!("{}/requests/{}{}", self.submit_url(), submission.request_id, suffix)
    }

    /// Submit a job to the queue
    pub async fn submit(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<QueueSubmission, InfographicError> {
        let url = self.submit_url();
        debug!("fal.ai submit POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .json(&self.build_input(request))
            .send()
            .await
            .map_err(|e| InfographicError::BackendError(e.to_string()))?;

        let submission: QueueSubmission = Self::checked(response)
            .await?
            .json()
            .await
            .map_err(|e| InfographicError::BackendError(format!("invalid queue response: {}", e)))?;

        info!("fal.ai job queued: request_id={}", submission.request_id);
        Ok(submission)
    }

    /// Fetch the current status of a job
    pub async fn status(&self, submission: &QueueSubmission) -> Result<QueueStatus, InfographicError> {
        let url = submission
            .status_url
            .clone()
            .unwrap_or_else(|| self.request_url(submission, "/status"));

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(|e| InfographicError::BackendError(e.to_string()))?;

        Self::checked(response)
            .await?
            .json()
            .await
            .map_err(|e| InfographicError::BackendError(format!("invalid status response: {}", e)))
    }

    /// Fetch the result of a completed job
    pub async fn result(
        &self,
        submission: &QueueSubmission,
    ) -> Result<GenerationOutput, InfographicError> {
        let url = submission
            .response_url
            .clone()
            .unwrap_or_else(|| self.request_url(submission, ""));

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(|e| InfographicError::BackendError(e.to_string()))?;

        Self::checked(response)
            .await?
            .json()
            .await
            .map_err(|e| InfographicError::BackendError(format!("invalid result response: {}", e)))
    }

    async fn checked(response: Response) -> Result<Response, InfographicError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        Err(InfographicError::BackendError(format!(
            "fal queue returned {}: {}",
            status, text
        )))
    }
}

#[async_trait]
impl ImageBackend for FalQueueClient {
    async fn generate(
        &self,
        request: &ImageGenerationRequest,
        on_status: &StatusCallback,
    ) -> Result<GenerationOutput, InfographicError> {
        request.validate().map_err(InfographicError::BackendError)?;

        let submission = self.submit(request).await?;
        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);
        let mut last_status: Option<QueueStatus> = None;

        loop {
            let status = self.status(&submission).await?;
            if last_status.as_ref() != Some(&status) {
                debug!("fal.ai job {} status: {:?}", submission.request_id, status);
            }
            on_status(&status);

            match status {
                QueueStatus::Completed => break,
                QueueStatus::Unknown => {
                    warn!("fal.ai job {} reported an unknown status", submission.request_id)
                }
                _ => {}
            }
            last_status = Some(status);
            tokio::time::sleep(poll_interval).await;
        }

        let output = self.result(&submission).await?;
        info!(
            "fal.ai job {} completed with {} image(s)",
            submission.request_id,
            output.images.len()
        );
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "fal"
    }
}
