// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend
//!
//! ```text
//! DeviceMonitor ──→ select_camera ──→ CameraPipeline ──→ FrameSender
//!                                          │
//!                                   appsink callback
//! ```
//!
//! The pipeline is owned by whoever opened it (the preview subscription or
//! the `snap` command); dropping it stops streaming and releases the device.

pub mod enumeration;
pub mod pipeline;
pub mod types;

pub use enumeration::{enumerate_cameras, select_camera};
pub use pipeline::CameraPipeline;
pub use types::*;

use crate::errors::CameraError;
use tracing::info;

/// Enumerate cameras and open the preferred one
pub fn open_preferred(
    remembered_path: Option<&str>,
    width: u32,
    height: u32,
    frame_sender: FrameSender,
) -> Result<(CameraDevice, CameraPipeline), CameraError> {
    let cameras = enumerate_cameras()?;
    let device = select_camera(&cameras, remembered_path)
        .ok_or(CameraError::NoCameraFound)?
        .clone();
    info!(name = %device.name, location = %device.location, "Opening camera");
    let pipeline = CameraPipeline::start(&device, width, height, frame_sender)?;
    Ok((device, pipeline))
}

/// Open the camera at `index` in enumeration order
pub fn open_index(
    index: usize,
    width: u32,
    height: u32,
    frame_sender: FrameSender,
) -> Result<(CameraDevice, CameraPipeline), CameraError> {
    let cameras = enumerate_cameras()?;
    if cameras.is_empty() {
        return Err(CameraError::NoCameraFound);
    }
    let device = cameras
        .get(index)
        .cloned()
        .ok_or(CameraError::InvalidIndex {
            index,
            available: cameras.len(),
        })?;
    let pipeline = CameraPipeline::start(&device, width, height, frame_sender)?;
    Ok((device, pipeline))
}
