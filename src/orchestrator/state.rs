// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Orchestration state and its two-signal projection

use serde::{Deserialize, Serialize};

use crate::generation::{ImageQuality, ImageSize};

pub const LABEL_SCRAPING: &str = "Scraping blog content...";
pub const LABEL_CREATING_PROMPT: &str = "Creating AI prompt...";
pub const LABEL_SUBMITTING: &str = "Generating infographic with AI...";
pub const LABEL_GENERATING: &str = "AI is generating your infographic...";
pub const LABEL_ADDING_TO_CANVAS: &str = "Adding to canvas...";
pub const LABEL_ADDED_TO_CANVAS: &str = "Image added to canvas successfully!";

/// Artifact title when no page was scraped
pub const CUSTOM_TITLE: &str = "Custom Infographic";
/// Artifact source when no URL was given
pub const CUSTOM_SOURCE: &str = "Custom Prompt";

/// Final product of a successful generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArtifact {
    /// Locator of the produced image
    pub url: String,
    /// Scraped page title, or "Custom Infographic"
    pub title: String,
    /// Input URL, or "Custom Prompt"
    pub source_url: String,
}

/// Lifecycle of one generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OrchestrationState {
    #[default]
    Idle,
    Running(String),
    Succeeded(GeneratedArtifact),
    Failed(String),
}

impl OrchestrationState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }
}

/// Caller-supplied settings for the next generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationInputs {
    pub url: String,
    pub custom_prompt: String,
    pub size: ImageSize,
    pub quality: ImageQuality,
}

impl GenerationInputs {
    /// At least one of URL or custom prompt is non-blank
    pub fn has_input(&self) -> bool {
        !self.url.trim().is_empty() || !self.custom_prompt.trim().is_empty()
    }
}

/// Add-to-canvas feedback shown on top of a succeeded generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasNotice {
    Progress(String),
    Error(String),
}

/// What a UI renders: progress, error and artifact as independent fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub progress: Option<String>,
    pub error: Option<String>,
    pub artifact: Option<GeneratedArtifact>,
}

/// Everything one orchestrator owns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub(crate) inputs: GenerationInputs,
    pub(crate) state: OrchestrationState,
    pub(crate) notice: Option<CanvasNotice>,
    /// Bumped on every notice change, so delayed clears can tell theirs apart
    pub(crate) notice_stamp: u64,
}

impl Session {
    pub fn inputs(&self) -> &GenerationInputs {
        &self.inputs
    }

    pub fn state(&self) -> &OrchestrationState {
        &self.state
    }

    pub fn progress(&self) -> Option<&str> {
        match (&self.state, &self.notice) {
            (OrchestrationState::Running(label), _) => Some(label),
            (OrchestrationState::Succeeded(_), Some(CanvasNotice::Progress(label))) => Some(label),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match (&self.state, &self.notice) {
            (OrchestrationState::Failed(message), _) => Some(message),
            (OrchestrationState::Succeeded(_), Some(CanvasNotice::Error(message))) => Some(message),
            _ => None,
        }
    }

    pub fn artifact(&self) -> Option<&GeneratedArtifact> {
        match &self.state {
            OrchestrationState::Succeeded(artifact) => Some(artifact),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            progress: self.progress().map(str::to_string),
            error: self.error().map(str::to_string),
            artifact: self.artifact().cloned(),
        }
    }

    /// Enter `Running`, dropping any previous artifact, error or notice
    pub(crate) fn start(&mut self, label: &str) {
        self.state = OrchestrationState::Running(label.to_string());
        self.notice = None;
    }

    /// Replace the progress label of a running generation
    pub(crate) fn relabel(&mut self, label: &str) -> bool {
        match &mut self.state {
            OrchestrationState::Running(current) if current != label => {
                *current = label.to_string();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn succeed(&mut self, artifact: GeneratedArtifact) {
        self.state = OrchestrationState::Succeeded(artifact);
        self.notice = None;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.state = OrchestrationState::Failed(message);
        self.notice = None;
    }

    /// Show `message` without discarding a succeeded artifact
    pub(crate) fn reject(&mut self, message: String) {
        match self.artifact().cloned() {
            Some(artifact) => {
                self.notify(&artifact, Some(CanvasNotice::Error(message)));
            }
            None => self.fail(message),
        }
    }

    /// Back to defaults; the notice stamp keeps counting
    pub(crate) fn reset(&mut self) {
        let notice_stamp = self.notice_stamp;
        *self = Session {
            notice_stamp,
            ..Session::default()
        };
    }

    /// Set the canvas notice if `artifact` is still the current result
    pub(crate) fn notify(&mut self, artifact: &GeneratedArtifact, notice: Option<CanvasNotice>) -> bool {
        match &self.state {
            OrchestrationState::Succeeded(current) if current == artifact => {
                self.notice = notice;
                self.notice_stamp += 1;
                true
            }
            _ => false,
        }
    }

    /// Drop the notice if it is still the one stamped `stamp`
    pub(crate) fn clear_notice(&mut self, stamp: u64) -> bool {
        if self.notice.is_none() || self.notice_stamp != stamp {
            return false;
        }
        self.notice = None;
        true
    }
}
