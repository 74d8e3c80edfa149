// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function only dispatches; the handling code lives in
//! the `handlers` submodules grouped by functional domain:
//!
//! - `handlers::camera`: pipeline status, frames, retry
//! - `handlers::capture`: shutter, snapshot encoding, flash
//! - `handlers::wall`: lifecycle events, drag, delete, download
//! - `handlers::system`: URLs, context pages, settings

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),

            // ===== Camera =====
            Message::CameraReady(name, path) => self.handle_camera_ready(name, path),
            Message::CameraFrame(frame, preview) => self.handle_camera_frame(frame, preview),
            Message::CameraFailed(reason) => self.handle_camera_failed(reason),
            Message::RetryCamera => self.handle_retry_camera(),

            // ===== Capture =====
            Message::Capture => self.handle_capture(),
            Message::SnapshotReady(result) => self.handle_snapshot_ready(result),
            Message::FlashComplete => self.handle_flash_complete(),

            // ===== Wall =====
            Message::Wall(event) => self.handle_wall_event(event),
            Message::PhotoDragEnd(id, x, y) => self.handle_photo_drag_end(id, x, y),
            Message::DeletePhoto(id) => self.handle_delete_photo(id),
            Message::DownloadPhoto(id) => self.handle_download_photo(id),
            Message::DownloadFinished(result) => self.handle_download_finished(result),
            Message::WallResized(size) => self.handle_wall_resized(size),

            // ===== Settings =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::ToggleMirrorPreview => self.handle_toggle_mirror_preview(),
            Message::SetAppTheme(index) => self.handle_set_app_theme(index),
        }
    }
}
