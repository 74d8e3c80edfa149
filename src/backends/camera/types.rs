// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for the camera backend

use std::sync::Arc;
use std::time::Instant;

/// Where a camera is mounted relative to the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraLocation {
    /// Faces the user (selfie camera)
    Front,
    /// Faces away from the user
    Back,
    /// Plugged-in camera (USB webcam)
    External,
    #[default]
    Unknown,
}

impl CameraLocation {
    /// Parse a device property value such as `front` or `back`
    pub fn from_property(value: &str) -> Self {
        let value = value.trim().to_ascii_lowercase();
        if crate::constants::camera::FRONT_LOCATIONS.contains(&value.as_str()) {
            CameraLocation::Front
        } else {
            match value.as_str() {
                "back" | "rear" | "environment" => CameraLocation::Back,
                "external" => CameraLocation::External,
                _ => CameraLocation::Unknown,
            }
        }
    }

    pub fn is_front(&self) -> bool {
        matches!(self, CameraLocation::Front)
    }
}

impl std::fmt::Display for CameraLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraLocation::Front => write!(f, "front"),
            CameraLocation::Back => write!(f, "back"),
            CameraLocation::External => write!(f, "external"),
            CameraLocation::Unknown => write!(f, "unknown"),
        }
    }
}

/// Represents a camera device
#[derive(Debug, Clone)]
pub struct CameraDevice {
    pub name: String,
    /// Stable identifier remembered in the config (device node or PipeWire path)
    pub path: String,
    pub location: CameraLocation,
    /// GStreamer device handle; `None` means let `autovideosrc` choose
    pub(crate) device: Option<gstreamer::Device>,
}

impl CameraDevice {
    /// Device description without a GStreamer handle
    pub fn new(name: impl Into<String>, path: impl Into<String>, location: CameraLocation) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            location,
            device: None,
        }
    }
}

impl PartialEq for CameraDevice {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.name == other.name
    }
}

/// One decoded RGBA frame from the camera
///
/// Rows are tightly packed (`width * 4` bytes each).
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub data: Arc<[u8]>,
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Expected buffer length for the frame dimensions
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.data.len() == self.expected_len()
    }
}

/// Channel the pipeline pushes frames into
pub type FrameSender = futures::channel::mpsc::Sender<CameraFrame>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_parsing() {
        assert_eq!(CameraLocation::from_property("front"), CameraLocation::Front);
        assert_eq!(CameraLocation::from_property(" User "), CameraLocation::Front);
        assert_eq!(CameraLocation::from_property("back"), CameraLocation::Back);
        assert_eq!(CameraLocation::from_property("external"), CameraLocation::External);
        assert_eq!(CameraLocation::from_property("sideways"), CameraLocation::Unknown);
    }

    #[test]
    fn test_frame_validity() {
        let frame = CameraFrame {
            width: 2,
            height: 2,
            data: Arc::from(vec![0u8; 16]),
            captured_at: Instant::now(),
        };
        assert!(frame.is_valid());

        let short = CameraFrame {
            data: Arc::from(vec![0u8; 15]),
            ..frame
        };
        assert!(!short.is_valid());
    }
}
