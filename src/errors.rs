// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the photo booth

use thiserror::Error;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Camera-related errors
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),
    /// Photo capture errors
    #[error("Photo error: {0}")]
    Photo(#[from] PhotoError),
    /// Captioning service errors
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),
    /// Storage/filesystem errors
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Camera acquisition and streaming errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CameraError {
    /// No camera devices found
    #[error("No camera devices found")]
    NoCameraFound,
    /// Requested device index does not exist
    #[error("Camera index {index} out of range ({available} available)")]
    InvalidIndex { index: usize, available: usize },
    /// GStreamer could not be initialized
    #[error("GStreamer initialization failed: {0}")]
    GStreamerInit(String),
    /// Pipeline construction or state change failed
    #[error("Pipeline error: {0}")]
    Pipeline(String),
    /// Access to the device was refused
    #[error("Camera access denied: {0}")]
    PermissionDenied(String),
    /// The stream ended or the device went away
    #[error("Camera disconnected")]
    Disconnected,
}

/// Photo capture errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhotoError {
    /// Frame dimensions do not match its buffer
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),
    /// Encoding failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Captioning service errors
///
/// None of these reach the user; they are logged and replaced by the
/// fallback caption.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptionError {
    /// No API key in the environment
    #[error("No captioning credential configured")]
    MissingCredential,
    /// Transport-level failure (DNS, TLS, timeout)
    #[error("Request failed: {0}")]
    Transport(String),
    /// Service answered with a non-success status
    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// Response body could not be understood
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<gstreamer::glib::Error> for CameraError {
    fn from(err: gstreamer::glib::Error) -> Self {
        if err.matches(gstreamer::ResourceError::NotAuthorized) {
            CameraError::PermissionDenied(err.to_string())
        } else {
            CameraError::Pipeline(err.to_string())
        }
    }
}

impl From<gstreamer::glib::BoolError> for CameraError {
    fn from(err: gstreamer::glib::BoolError) -> Self {
        CameraError::Pipeline(err.to_string())
    }
}

impl From<gstreamer::StateChangeError> for CameraError {
    fn from(err: gstreamer::StateChangeError) -> Self {
        CameraError::Pipeline(err.to_string())
    }
}

impl From<image::ImageError> for PhotoError {
    fn from(err: image::ImageError) -> Self {
        PhotoError::EncodingFailed(err.to_string())
    }
}

impl From<reqwest::Error> for CaptionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CaptionError::Malformed(err.to_string())
        } else {
            CaptionError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_display() {
        let err: AppError = CameraError::NoCameraFound.into();
        assert_eq!(err.to_string(), "Camera error: No camera devices found");

        let err: AppError = CaptionError::Status {
            status: 429,
            body: "quota".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Caption error: Service returned HTTP 429: quota"
        );
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Storage(msg) if msg.contains("read-only")));
    }

    #[test]
    fn test_image_error_maps_to_encoding_failed() {
        let err: PhotoError = image::ImageError::Limits(image::error::LimitError::from_kind(
            image::error::LimitErrorKind::DimensionError,
        ))
        .into();
        assert!(matches!(err, PhotoError::EncodingFailed(_)));
    }

    #[test]
    fn test_invalid_index_message() {
        let err = CameraError::InvalidIndex {
            index: 3,
            available: 1,
        };
        assert_eq!(err.to_string(), "Camera index 3 out of range (1 available)");
    }
}
