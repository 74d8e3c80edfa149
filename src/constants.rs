// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Photo lifecycle timing
///
/// Ejection always fires before development finishes; the single-flight gate
/// opens again together with the end of development.
pub mod lifecycle {
    use super::Duration;

    /// Delay before the freshly captured card slides out of the camera slot
    pub const EJECT_DELAY: Duration = Duration::from_millis(100);

    /// Delay before the card stops developing and the next capture is allowed
    pub const DEVELOP_DELAY: Duration = Duration::from_millis(3000);

    /// How long the full-window flash overlay stays visible
    pub const FLASH_DURATION: Duration = Duration::from_millis(150);
}

/// Card placement and jitter
pub mod placement {
    /// Horizontal origin of a new card (the camera's output slot)
    pub const ORIGIN_X: f32 = 50.0;

    /// Distance from the bottom of the wall to the top of the camera body
    pub const ORIGIN_BOTTOM_OFFSET: f32 = 450.0;

    /// Fallback wall height used before the window size is known
    pub const DEFAULT_WALL_HEIGHT: f32 = 900.0;

    /// Upward travel of a card during ejection
    pub const EJECT_RISE: f32 = 200.0;

    /// Upper bound (exclusive) of the horizontal ejection jitter
    pub const EJECT_JITTER_MAX: f32 = 50.0;

    /// Maximum absolute tilt in degrees (tilt is drawn from `[-MAX, MAX)`)
    pub const MAX_TILT_DEGREES: f32 = 5.0;
}

/// Camera stream settings
pub mod camera {
    /// Preferred capture width
    pub const PREFERRED_WIDTH: u32 = 1280;

    /// Preferred capture height
    pub const PREFERRED_HEIGHT: u32 = 720;

    /// Appsink buffer count (drop old frames beyond this)
    pub const MAX_BUFFERS: u32 = 2;

    /// Pipeline output pixel format
    pub const OUTPUT_FORMAT: &str = "RGBA";

    /// Timeout waiting for the pipeline to stop (seconds)
    pub const STOP_TIMEOUT_SECS: u64 = 2;

    /// Timeout waiting for the pipeline to reach PLAYING (milliseconds)
    pub const STATE_CHANGE_TIMEOUT_MS: u64 = 500;

    /// Log frame statistics every N frames
    pub const FRAME_LOG_INTERVAL: u64 = 120;

    /// Device property values that mark a front-facing camera
    pub const FRONT_LOCATIONS: &[&str] = &["front", "user"];
}

/// Snapshot encoding
pub mod encoding {
    /// Default JPEG quality for snapshots (0-100)
    pub const JPEG_QUALITY: u8 = 90;

    /// MIME type of encoded snapshots
    pub const JPEG_MIME: &str = "image/jpeg";
}

/// Captioning service
pub mod caption {
    /// Default Gemini model
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

    /// Default REST endpoint base
    pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Environment variables holding the service credential, in lookup order
    pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

    /// Instruction sent alongside every image
    pub const PROMPT: &str = "Write a very short, nostalgic, or witty handwritten-style caption \
        (max 4-5 words) for this photo. Do not use quotes. If a person is in it, be \
        complimentary. If it's an object, describe the vibe.";

    /// Caption used when the service answers with no text
    pub const EMPTY_RESPONSE_CAPTION: &str = "Memories...";

    /// Date format of the fallback caption (e.g. `10/17/2026`)
    pub const FALLBACK_DATE_FORMAT: &str = "%-m/%-d/%Y";
}

/// Card and camera body geometry
pub mod ui {
    /// Card width
    pub const CARD_WIDTH: f32 = 240.0;

    /// Card inner padding
    pub const CARD_PADDING: u16 = 12;

    /// Photo area height (4:5 aspect of the inner width)
    pub const CARD_PHOTO_HEIGHT: f32 = 270.0;

    /// Size of the hover controls (delete / download)
    pub const CARD_CONTROL_SIZE: f32 = 32.0;

    /// Caption text size
    pub const CAPTION_TEXT_SIZE: u16 = 18;

    /// Timestamp text size
    pub const TIMESTAMP_TEXT_SIZE: u16 = 10;

    /// Camera body width
    pub const CAMERA_BODY_WIDTH: f32 = 320.0;

    /// Camera body height
    pub const CAMERA_BODY_HEIGHT: f32 = 340.0;

    /// Lens (live preview) diameter
    pub const LENS_SIZE: f32 = 144.0;

    /// Outer size of the shutter button
    pub const SHUTTER_BUTTON_OUTER: f32 = 64.0;

    /// Inner size of the shutter button
    pub const SHUTTER_BUTTON_INNER: f32 = 48.0;

    /// Alpha of the sepia veil drawn over a developing photo
    pub const DEVELOPING_VEIL_ALPHA: f32 = 0.55;

    /// Margin between the camera body and the window edge
    pub const CAMERA_MARGIN: u16 = 40;
}

/// Application metadata
pub mod app_info {
    /// Directory name used under the user's Pictures folder
    pub const PHOTO_DIR_NAME: &str = "photobooth";

    /// Prefix of downloaded photo file names
    pub const DOWNLOAD_PREFIX: &str = "polaroid";
}
