// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Host insertion capability
//!
//! The host is whatever document the generated image ends up in. The CLI
//! uses [`DirectoryHost`], which writes images into a folder.

use async_trait::async_trait;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

use crate::errors::InfographicError;

/// Receives generated image bytes and places them in the active document
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InsertionHost: Send + Sync {
    async fn insert_image(&self, image: Bytes) -> Result<(), InfographicError>;
}

/// Writes inserted images into a directory, named by content hash
pub struct DirectoryHost {
    dir: PathBuf,
    last_written: Mutex<Option<PathBuf>>,
}

impl DirectoryHost {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_written: Mutex::new(None),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the most recently written image
    pub fn last_written(&self) -> Option<PathBuf> {
        self.last_written.lock().ok().and_then(|guard| guard.clone())
    }

    /// File name for `image`: `infographic-<hash>.<ext>`
    pub fn file_name_for(image: &[u8]) -> Result<String, InfographicError> {
        let format = image::guess_format(image)
            .map_err(|_| InfographicError::InsertionFailed("unrecognised image data".to_string()))?;
        let extension = format.extensions_str().first().copied().unwrap_or("img");
        let digest = hex::encode(Sha256::digest(image));
        Ok(format!("infographic-{}.{}", &digest[..16], extension))
    }
}

#[async_trait]
impl InsertionHost for DirectoryHost {
    async fn insert_image(&self, image: Bytes) -> Result<(), InfographicError> {
        let file_name = Self::file_name_for(&image)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| InfographicError::InsertionFailed(e.to_string()))?;

        let path = self.dir.join(file_name);
        tokio::fs::write(&path, &image)
            .await
            .map_err(|e| InfographicError::InsertionFailed(e.to_string()))?;

        info!("Saved {} byte image to {}", image.len(), path.display());
        if let Ok(mut last) = self.last_written.lock() {
            *last = Some(path);
        }
        Ok(())
    }
}
