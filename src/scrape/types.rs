// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Extractor output types

use serde::{Deserialize, Serialize};

/// Substantive content pulled out of a web page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedContent {
    /// Page title (`<title>`, else first `<h1>`, else empty)
    pub title: String,
    /// Normalized body text
    pub content: String,
    /// Meta description if present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Author if present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Publish date, kept verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ScrapedContent {
    /// Body length in characters
    pub fn content_chars(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether the body meets the minimum length required to generate from it
    pub fn is_sufficient(&self, min_chars: usize) -> bool {
        !self.content.is_empty() && self.content_chars() >= min_chars
    }
}
