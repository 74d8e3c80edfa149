// SPDX-License-Identifier: GPL-3.0-only

//! Snapshot pipeline
//!
//! ```text
//! CameraFrame (RGBA) → mirror + drop alpha → JPEG → ImagePayload
//! ```
//!
//! Conversion and encoding are CPU-bound and run on the blocking pool so
//! the preview keeps streaming while a photo is taken.

pub mod encoding;
pub mod processing;

use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoError;
use crate::photo::ImagePayload;
use tracing::info;

/// Turns camera frames into encoded stills
#[derive(Debug, Clone, Copy)]
pub struct SnapshotPipeline {
    quality: u8,
}

impl SnapshotPipeline {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Mirror and encode a frame without leaving the current thread
    pub fn snapshot_blocking(&self, frame: &CameraFrame) -> Result<ImagePayload, PhotoError> {
        let image = processing::mirrored_rgb(frame)?;
        let jpeg = encoding::encode_jpeg(&image, self.quality)?;
        Ok(ImagePayload::jpeg(jpeg))
    }

    /// Mirror and encode a frame on the blocking pool
    pub async fn snapshot(&self, frame: CameraFrame) -> Result<ImagePayload, PhotoError> {
        info!(width = frame.width, height = frame.height, "Taking snapshot");
        let pipeline = *self;
        tokio::task::spawn_blocking(move || pipeline.snapshot_blocking(&frame))
            .await
            .map_err(|e| PhotoError::EncodingFailed(format!("Encoding task error: {}", e)))?
    }
}

impl Default for SnapshotPipeline {
    fn default() -> Self {
        Self::new(crate::constants::encoding::JPEG_QUALITY)
    }
}
