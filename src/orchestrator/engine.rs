// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation pipeline state machine
//!
//! One orchestrator runs at most one generation at a time:
//!
//! ```text
//! Idle ──generate──▶ Running ──ok──▶ Succeeded
//!   ▲                   │
//!   │                   └──err──▶ Failed
//!   └──────reset──── (any state except Running)
//! ```
//!
//! Dropping a `generate` future mid-run moves the state to `Failed`.
//!
//! Observers read the session through [`InfographicOrchestrator::status`] or
//! follow changes with [`InfographicOrchestrator::subscribe`].

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::config::OrchestratorConfig;
use super::host::InsertionHost;
use super::state::{
    CanvasNotice, GeneratedArtifact, GenerationInputs, OrchestrationState, Session,
    StatusSnapshot, CUSTOM_SOURCE, CUSTOM_TITLE, LABEL_ADDED_TO_CANVAS, LABEL_ADDING_TO_CANVAS,
    LABEL_CREATING_PROMPT, LABEL_GENERATING, LABEL_SCRAPING, LABEL_SUBMITTING,
};
use crate::errors::{InfographicError, GENERIC_FAILURE_MESSAGE};
use crate::generation::{ImageBackend, ImageGenerationRequest, ImageQuality, ImageSize, QueueStatus};
use crate::prompt::PromptSynthesizer;
use crate::scrape::{extract_content, DocumentFetcher, ScrapedContent};

enum Admission {
    Started(GenerationInputs),
    Rejected(InfographicError),
}

/// Drives scrape → prompt → generate → (optional) insert
pub struct InfographicOrchestrator {
    fetcher: Arc<dyn DocumentFetcher>,
    backend: Arc<dyn ImageBackend>,
    host: Arc<dyn InsertionHost>,
    synthesizer: PromptSynthesizer,
    config: OrchestratorConfig,
    session: Arc<watch::Sender<Session>>,
}

impl InfographicOrchestrator {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        backend: Arc<dyn ImageBackend>,
        host: Arc<dyn InsertionHost>,
        synthesizer: PromptSynthesizer,
        config: OrchestratorConfig,
    ) -> Self {
        let (session, _) = watch::channel(Session::default());
        Self {
            fetcher,
            backend,
            host,
            synthesizer,
            config,
            session: Arc::new(session),
        }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Current progress / error / artifact
    pub fn status(&self) -> StatusSnapshot {
        self.session.borrow().snapshot()
    }

    pub fn state(&self) -> OrchestrationState {
        self.session.borrow().state.clone()
    }

    pub fn inputs(&self) -> GenerationInputs {
        self.session.borrow().inputs.clone()
    }

    pub fn is_running(&self) -> bool {
        self.session.borrow().state.is_running()
    }

    /// Receiver that is notified on every session change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    pub fn set_url(&self, url: impl Into<String>) {
        let url = url.into();
        self.session.send_modify(|s| s.inputs.url = url);
    }

    pub fn set_custom_prompt(&self, prompt: impl Into<String>) {
        let prompt = prompt.into();
        self.session.send_modify(|s| s.inputs.custom_prompt = prompt);
    }

    pub fn set_size(&self, size: ImageSize) {
        self.session.send_modify(|s| s.inputs.size = size);
    }

    pub fn set_quality(&self, quality: ImageQuality) {
        self.session.send_modify(|s| s.inputs.quality = quality);
    }

    /// Run one generation from the current inputs
    ///
    /// Rejected with [`InfographicError::GenerationInProgress`] while another
    /// generation is running; the running one is not disturbed.
    pub async fn generate(&self) -> Result<GeneratedArtifact, InfographicError> {
        let mut admission = Admission::Rejected(InfographicError::GenerationInProgress);
        self.session.send_if_modified(|s| {
            if s.state.is_running() {
                return false;
            }
            if !s.inputs.has_input() {
                let err = InfographicError::EmptyInput;
                s.reject(err.user_message());
                admission = Admission::Rejected(err);
                return true;
            }
            let label = if s.inputs.url.trim().is_empty() {
                LABEL_CREATING_PROMPT
            } else {
                LABEL_SCRAPING
            };
            admission = Admission::Started(s.inputs.clone());
            s.start(label);
            true
        });

        let inputs = match admission {
            Admission::Started(inputs) => inputs,
            Admission::Rejected(err) => {
                warn!("Generation rejected: {}", err);
                return Err(err);
            }
        };

        let mut guard = RunningGuard::new(Arc::clone(&self.session));
        let outcome = self.run_pipeline(&inputs).await;
        guard.disarm();

        match outcome {
            Ok(artifact) => {
                info!("Infographic generated: {} ({})", artifact.title, artifact.url);
                self.session.send_modify(|s| s.succeed(artifact.clone()));
                Ok(artifact)
            }
            Err(err) => {
                warn!("Infographic generation failed [{}]: {:?}", err.kind(), err);
                self.session.send_modify(|s| s.fail(err.user_message()));
                Err(err)
            }
        }
    }

    async fn run_pipeline(
        &self,
        inputs: &GenerationInputs,
    ) -> Result<GeneratedArtifact, InfographicError> {
        let url = inputs.url.trim();
        let custom_prompt = Some(inputs.custom_prompt.trim()).filter(|p| !p.is_empty());

        let scraped = if url.is_empty() {
            None
        } else {
            Some(self.scrape(url).await?)
        };

        self.relabel(LABEL_CREATING_PROMPT);
        let prompt = self.synthesizer.synthesize(scraped.as_ref(), custom_prompt);
        if prompt.content_truncated() {
            debug!("Page content truncated to {} chars", self.synthesizer.config().max_content_chars);
        }

        self.relabel(LABEL_SUBMITTING);
        let request = ImageGenerationRequest::new(prompt.into_string(), inputs.size, inputs.quality);

        let session = Arc::clone(&self.session);
        let on_status = move |status: &QueueStatus| {
            if matches!(status, QueueStatus::InProgress) {
                session.send_if_modified(|s| s.relabel(LABEL_GENERATING));
            }
        };

        debug!("Submitting prompt to {} backend", self.backend.name());
        let output = self.backend.generate(&request, &on_status).await?;
        let image = output
            .first_image()
            .ok_or_else(|| InfographicError::BackendError("No image generated".to_string()))?;

        let title = scraped
            .map(|content| content.title)
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| CUSTOM_TITLE.to_string());
        let source_url = if url.is_empty() { CUSTOM_SOURCE } else { url };

        Ok(GeneratedArtifact {
            url: image.url.clone(),
            title,
            source_url: source_url.to_string(),
        })
    }

    async fn scrape(&self, url: &str) -> Result<ScrapedContent, InfographicError> {
        let html = self.fetcher.fetch_html(url).await?;
        let content = extract_content(&html);

        let found = content.content_chars();
        let required = self.config.min_content_chars;
        if !content.is_sufficient(required) {
            return Err(InfographicError::InsufficientContent { found, required });
        }

        info!("Scraped {} chars from {}", found, url);
        Ok(content)
    }

    fn relabel(&self, label: &str) {
        self.session.send_if_modified(|s| s.relabel(label));
    }

    /// Return to the initial state: inputs defaulted, nothing shown
    pub fn reset(&self) -> Result<(), InfographicError> {
        let mut result = Ok(());
        self.session.send_if_modified(|s| {
            if s.state.is_running() {
                result = Err(InfographicError::GenerationInProgress);
                return false;
            }
            s.reset();
            true
        });
        result
    }

    /// Download the generated image and insert it into the host document
    ///
    /// Failure leaves the artifact in place and shows
    /// "Failed to add image to canvas".
    pub async fn add_to_canvas(&self) -> Result<(), InfographicError> {
        let mut artifact = None;
        self.session.send_if_modified(|s| {
            let current = s.artifact().cloned();
            match current {
                Some(current) => {
                    s.notify(&current, Some(CanvasNotice::Progress(LABEL_ADDING_TO_CANVAS.to_string())));
                    artifact = Some(current);
                    true
                }
                None => false,
            }
        });
        let artifact = artifact.ok_or(InfographicError::NoArtifact)?;

        let outcome = match self.fetcher.fetch_bytes(&artifact.url).await {
            Ok(image) => self.host.insert_image(image).await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok(()) => {
                info!("Added infographic to canvas: {}", artifact.url);
                let mut stamp = None;
                self.session.send_if_modified(|s| {
                    let shown = s.notify(
                        &artifact,
                        Some(CanvasNotice::Progress(LABEL_ADDED_TO_CANVAS.to_string())),
                    );
                    if shown {
                        stamp = Some(s.notice_stamp);
                    }
                    shown
                });
                if let Some(stamp) = stamp {
                    self.schedule_notice_clear(stamp);
                }
                Ok(())
            }
            Err(err) => {
                warn!("Add to canvas failed: {:?}", err);
                let err = match err {
                    InfographicError::InsertionFailed(_) => err,
                    other => InfographicError::InsertionFailed(other.to_string()),
                };
                self.session.send_if_modified(|s| {
                    s.notify(&artifact, Some(CanvasNotice::Error(err.user_message())))
                });
                Err(err)
            }
        }
    }

    /// Hide the confirmation stamped `stamp` once the notice delay passes
    fn schedule_notice_clear(&self, stamp: u64) {
        let session = Arc::clone(&self.session);
        let delay = Duration::from_millis(self.config.canvas_notice_ms);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            session.send_if_modified(|s| s.clear_notice(stamp));
        });
    }
}

/// Fails a generation whose future is dropped before it finishes
struct RunningGuard {
    session: Arc<watch::Sender<Session>>,
    armed: bool,
}

impl RunningGuard {
    fn new(session: Arc<watch::Sender<Session>>) -> Self {
        Self {
            session,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.session.send_if_modified(|s| {
            if !s.state.is_running() {
                return false;
            }
            warn!("Generation cancelled before completion");
            s.fail(GENERIC_FAILURE_MESSAGE.to_string());
            true
        });
    }
}
