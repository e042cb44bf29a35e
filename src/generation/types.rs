// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request and response types for the image-generation backend

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output dimensions accepted by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1536x1024")]
    Landscape,
    #[default]
    #[serde(rename = "1024x1536")]
    Portrait,
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [Self::Portrait, Self::Square, Self::Landscape];

    /// Wire value, e.g. `"1024x1536"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1024x1024",
            Self::Landscape => "1536x1024",
            Self::Portrait => "1024x1536",
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Self::Square | Self::Portrait => 1024,
            Self::Landscape => 1536,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Square | Self::Landscape => 1024,
            Self::Portrait => 1536,
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = String;

    /// Accepts the wire value or a shape name (`portrait`, `square`, `landscape`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1024x1024" | "square" => Ok(Self::Square),
            "1536x1024" | "landscape" => Ok(Self::Landscape),
            "1024x1536" | "portrait" => Ok(Self::Portrait),
            other => Err(format!(
                "invalid size '{}'; allowed: 1024x1536, 1024x1024, 1536x1024",
                other
            )),
        }
    }
}

/// Rendering quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Low,
    Medium,
    #[default]
    High,
}

impl ImageQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ImageQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!(
                "invalid quality '{}'; allowed: low, medium, high",
                other
            )),
        }
    }
}

/// Job submitted to the image-generation backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub image_size: ImageSize,
    pub quality: ImageQuality,
    pub num_images: u32,
}

impl ImageGenerationRequest {
    /// Single-image request
    pub fn new(prompt: impl Into<String>, image_size: ImageSize, quality: ImageQuality) -> Self {
        Self {
            prompt: prompt.into(),
            image_size,
            quality,
            num_images: 1,
        }
    }

    /// Validate the request fields
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("prompt must not be empty".to_string());
        }
        if self.num_images == 0 {
            return Err("num_images must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Status of a queued backend job
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueStatus {
    InQueue {
        #[serde(default)]
        queue_position: Option<u32>,
    },
    InProgress,
    Completed,
    #[serde(other)]
    Unknown,
}

/// One produced image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Final backend result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutput {
    #[serde(default)]
    pub images: Vec<GeneratedImage>,
}

impl GenerationOutput {
    /// First produced image, if any
    pub fn first_image(&self) -> Option<&GeneratedImage> {
        self.images.first()
    }
}
