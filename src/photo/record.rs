// SPDX-License-Identifier: GPL-3.0-only

//! Photo record and its value types

use chrono::{DateTime, Local};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier of a photo on the wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoId(Uuid);

impl PhotoId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Encoded image bytes plus their MIME type
///
/// Cloning is cheap: the bytes are shared, so the captioner and the card
/// renderer read the same buffer the wall owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    mime_type: &'static str,
    bytes: Arc<[u8]>,
}

impl ImagePayload {
    pub fn new(mime_type: &'static str, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            mime_type,
            bytes: bytes.into(),
        }
    }

    /// JPEG payload, the format every snapshot is encoded as
    pub fn jpeg(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new(crate::constants::encoding::JPEG_MIME, bytes)
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the bytes
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Card position in wall coordinates (top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate by an offset
    pub fn offset(self, offset: Offset) -> Self {
        Self {
            x: self.x + offset.dx,
            y: self.y + offset.dy,
        }
    }
}

/// Relative displacement applied to a position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub dx: f32,
    pub dy: f32,
}

/// One captured photo on the wall
#[derive(Debug, Clone)]
pub struct PhotoRecord {
    pub id: PhotoId,
    pub image: ImagePayload,
    pub captured_at: DateTime<Local>,
    /// Empty until the captioning request resolves or falls back
    pub caption: String,
    pub position: Position,
    /// Tilt in degrees, fixed at creation
    pub rotation: f32,
    /// True from creation until the develop delay has elapsed
    pub is_developing: bool,
}

impl PhotoRecord {
    pub fn has_caption(&self) -> bool {
        !self.caption.is_empty()
    }

    /// Default download file name, `polaroid-<millis>.jpg`
    pub fn download_name(&self) -> String {
        format!(
            "{}-{}.jpg",
            crate::constants::app_info::DOWNLOAD_PREFIX,
            self.captured_at.timestamp_millis()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_payload_clone_shares_bytes() {
        let payload = ImagePayload::jpeg(vec![0xFF, 0xD8, 0xFF]);
        let clone = payload.clone();
        assert!(Arc::ptr_eq(&payload.shared_bytes(), &clone.shared_bytes()));
        assert_eq!(clone.mime_type(), "image/jpeg");
        assert_eq!(clone.len(), 3);
    }

    #[test]
    fn test_position_offset() {
        let pos = Position::new(50.0, 450.0).offset(Offset {
            dx: 12.5,
            dy: -200.0,
        });
        assert_eq!(pos, Position::new(62.5, 250.0));
    }

    #[test]
    fn test_download_name_uses_capture_millis() {
        let captured_at = Local.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let record = PhotoRecord {
            id: PhotoId::new(),
            image: ImagePayload::jpeg(Vec::new()),
            captured_at,
            caption: String::new(),
            position: Position::default(),
            rotation: 0.0,
            is_developing: true,
        };
        assert_eq!(record.download_name(), "polaroid-1700000000123.jpg");
        assert!(!record.has_caption());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = PhotoId::new();
        let b = PhotoId::new();
        assert_ne!(a, b);
    }
}
