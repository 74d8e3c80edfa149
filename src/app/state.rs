// SPDX-License-Identifier: GPL-3.0-only

//! Application state types

use crate::backends::camera::types::CameraFrame;
use crate::caption::SharedCaptioner;
use crate::config::Config;
use crate::errors::PhotoError;
use crate::photo::{ImagePayload, PhotoId, PhotoWall, WallEvent};
use cosmic::cosmic_config;
use cosmic::iced::Size;
use cosmic::widget::about::About;
use cosmic::widget::image::Handle;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Camera availability as seen by the capture surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CameraState {
    /// Enumerating devices and starting the pipeline
    #[default]
    Starting,
    /// Pipeline is running
    Streaming { name: String },
    /// Acquisition failed; waits for a manual retry
    Failed(String),
}

impl CameraState {
    pub fn is_streaming(&self) -> bool {
        matches!(self, CameraState::Streaming { .. })
    }
}

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// The about page for this app.
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Configuration handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,
    /// Photo records and the capture gate
    pub wall: PhotoWall,
    /// Decoded image handles per photo (created once per capture)
    pub photo_handles: HashMap<PhotoId, Handle>,
    /// Captioning service shared with background tasks
    pub captioner: SharedCaptioner,
    /// Camera pipeline status
    pub camera: CameraState,
    /// Bumped on retry to restart the camera subscription
    pub camera_generation: u64,
    /// Latest raw frame (used for snapshots)
    pub current_frame: Option<Arc<CameraFrame>>,
    /// Latest preview image (mirrored if configured)
    pub preview: Option<Handle>,
    /// Whether a snapshot is being encoded
    pub is_capturing: bool,
    /// Whether the white flash overlay is visible
    pub flash_active: bool,
    /// Theme option labels for the settings dropdown
    pub theme_options: Vec<String>,
}

impl AppModel {
    /// Whether the shutter can be pressed right now
    pub fn can_capture(&self) -> bool {
        !self.is_capturing
            && !self.wall.is_processing()
            && self.camera.is_streaming()
            && self.current_frame.is_some()
    }
}

/// The context page to display in the context drawer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// Messages emitted by the application and its widgets.
///
/// - **UI Navigation**: context pages, external URLs
/// - **Camera**: pipeline status and frames
/// - **Capture**: shutter, snapshot encoding, flash
/// - **Wall**: lifecycle events and card interactions
/// - **Settings**: configuration updates
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository, etc.)
    LaunchUrl(String),
    /// Toggle context drawer page
    ToggleContextPage(ContextPage),

    // ===== Camera =====
    /// Pipeline started for the named device (name, config path)
    CameraReady(String, String),
    /// New frame plus its preview image
    CameraFrame(Arc<CameraFrame>, Handle),
    /// Pipeline could not be started or stopped unexpectedly
    CameraFailed(String),
    /// User asked to try the camera again
    RetryCamera,

    // ===== Capture =====
    /// Shutter pressed
    Capture,
    /// Snapshot encoding finished
    SnapshotReady(Result<ImagePayload, PhotoError>),
    /// Flash overlay timer elapsed
    FlashComplete,

    // ===== Wall =====
    /// Lifecycle effect of a capture resolved
    Wall(WallEvent),
    /// Card dropped at a new position
    PhotoDragEnd(PhotoId, f32, f32),
    /// Card delete control pressed
    DeletePhoto(PhotoId),
    /// Card download control pressed
    DownloadPhoto(PhotoId),
    /// Download finished (saved path, or `None` if cancelled)
    DownloadFinished(Result<Option<PathBuf>, String>),
    /// Photo wall area changed size
    WallResized(Size),

    // ===== Settings =====
    /// Configuration changed on disk
    UpdateConfig(Config),
    /// Toggle mirrored preview
    ToggleMirrorPreview,
    /// Select application theme by dropdown index
    SetAppTheme(usize),
}
