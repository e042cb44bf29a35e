// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Deterministic prompt assembly from scraped content and user instructions

use std::env;
use std::fmt;
use tracing::debug;

use super::template::{
    design_requirements_block, CONTENT_LEAD_IN, CONTENT_SUMMARY_LABEL, CUSTOM_INSTRUCTIONS_LABEL,
    HEADING, STYLE_DIRECTIVE, TRUNCATION_MARKER, USER_ONLY_LEAD_IN,
};
use crate::scrape::ScrapedContent;

/// Default cap on body characters copied into the prompt
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 4000;

/// Configuration for prompt synthesis
#[derive(Debug, Clone)]
pub struct PromptConfig {
    /// Body characters kept before truncation (default: 4000)
    pub max_content_chars: usize,
}

impl PromptConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            max_content_chars: env::var("PROMPT_MAX_CONTENT_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONTENT_CHARS),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_content_chars == 0 {
            return Err("max_content_chars must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
        }
    }
}

/// Rendered prompt text, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    text: String,
    content_truncated: bool,
}

impl GenerationRequest {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Whether the page body was cut at the character cap
    pub fn content_truncated(&self) -> bool {
        self.content_truncated
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Builds infographic prompts
#[derive(Debug, Clone, Default)]
pub struct PromptSynthesizer {
    config: PromptConfig,
}

impl PromptSynthesizer {
    pub fn new(config: PromptConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    /// Render the prompt
    ///
    /// Sections, in order: heading, content block (or the user-only line),
    /// design requirements, custom instructions when non-blank, style.
    pub fn synthesize(
        &self,
        content: Option<&ScrapedContent>,
        user_text: Option<&str>,
    ) -> GenerationRequest {
        let mut text = format!("{}\n\n", HEADING);
        let mut content_truncated = false;

        match content {
            Some(content) => {
                let (body, truncated) =
                    truncate_chars(&content.content, self.config.max_content_chars);
                content_truncated = truncated;

                text.push_str(CONTENT_LEAD_IN);
                text.push_str("\n\n");
                push_field(&mut text, "Title", Some(content.title.as_str()));
                push_field(&mut text, "Description", content.description.as_deref());
                push_field(&mut text, "Author", content.author.as_deref());
                push_field(&mut text, "Date", content.date.as_deref());
                text.push_str(&format!("\n{}\n{}\n\n", CONTENT_SUMMARY_LABEL, body));
            }
            None => {
                text.push_str(USER_ONLY_LEAD_IN);
                text.push_str("\n\n");
            }
        }

        text.push_str(&design_requirements_block());

        if let Some(instructions) = user_text.map(str::trim).filter(|t| !t.is_empty()) {
            text.push_str(&format!("\n{}\n{}\n", CUSTOM_INSTRUCTIONS_LABEL, instructions));
        }

        text.push('\n');
        text.push_str(STYLE_DIRECTIVE);

        debug!(
            "Synthesized prompt: {} chars, content_truncated={}",
            text.chars().count(),
            content_truncated
        );

        GenerationRequest {
            text,
            content_truncated,
        }
    }
}

fn push_field(text: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        text.push_str(&format!("{}: {}\n", label, value));
    }
}

/// Cut `text` to `max_chars` characters, appending the truncation marker
fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER), true),
        None => (text.to_string(), false),
    }
}
