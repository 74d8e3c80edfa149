// SPDX-License-Identifier: GPL-3.0-only

//! Camera status handlers

use crate::app::state::{AppModel, CameraState, Message};
use crate::backends::camera::types::CameraFrame;
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use cosmic::widget::image::Handle;
use std::sync::Arc;
use tracing::{error, info, warn};

impl AppModel {
    pub(crate) fn handle_camera_ready(
        &mut self,
        name: String,
        path: String,
    ) -> Task<cosmic::Action<Message>> {
        info!(name = %name, path = %path, "Camera streaming");
        self.camera = CameraState::Streaming { name };

        if self.config.last_camera_path.as_deref() != Some(path.as_str()) {
            self.config.last_camera_path = Some(path);
            if let Some(handler) = self.config_handler.as_ref()
                && let Err(err) = self.config.write_entry(handler)
            {
                error!(?err, "Failed to save last camera");
            }
        }
        Task::none()
    }

    pub(crate) fn handle_camera_frame(
        &mut self,
        frame: Arc<CameraFrame>,
        preview: Handle,
    ) -> Task<cosmic::Action<Message>> {
        self.current_frame = Some(frame);
        self.preview = Some(preview);
        Task::none()
    }

    /// Camera failures stay on screen until the user retries
    pub(crate) fn handle_camera_failed(&mut self, reason: String) -> Task<cosmic::Action<Message>> {
        warn!(reason = %reason, "Camera unavailable");
        self.camera = CameraState::Failed(reason);
        self.current_frame = None;
        self.preview = None;
        Task::none()
    }

    pub(crate) fn handle_retry_camera(&mut self) -> Task<cosmic::Action<Message>> {
        info!("Retrying camera");
        self.camera = CameraState::Starting;
        self.camera_generation = self.camera_generation.wrapping_add(1);
        Task::none()
    }
}
