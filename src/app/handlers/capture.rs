// SPDX-License-Identifier: GPL-3.0-only

//! Capture handlers
//!
//! Shutter press, snapshot encoding and the flash overlay. An accepted
//! snapshot is handed to the wall, whose lifecycle effects come back as
//! [`Message::Wall`].

use crate::app::state::{AppModel, Message};
use crate::constants::lifecycle::FLASH_DURATION;
use crate::errors::PhotoError;
use crate::photo::{ImagePayload, lifecycle};
use crate::pipelines::photo::SnapshotPipeline;
use cosmic::Task;
use cosmic::widget::image::Handle;
use tracing::{debug, error, info};

impl AppModel {
    /// Create a delayed task that sends a message after the specified milliseconds
    pub(crate) fn delay_task(millis: u64, message: Message) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                tokio::time::sleep(tokio::time::Duration::from_millis(millis)).await;
                message
            },
            cosmic::Action::App,
        )
    }

    pub(crate) fn handle_capture(&mut self) -> Task<cosmic::Action<Message>> {
        if !self.can_capture() {
            debug!(
                capturing = self.is_capturing,
                processing = self.wall.is_processing(),
                "Shutter ignored"
            );
            return Task::none();
        }
        let Some(frame) = self.current_frame.clone() else {
            return Task::none();
        };

        info!(width = frame.width, height = frame.height, "Capturing snapshot");
        self.is_capturing = true;
        self.flash_active = true;

        let pipeline = SnapshotPipeline::new(self.config.effective_jpeg_quality());
        let snapshot = Task::perform(
            async move { pipeline.snapshot((*frame).clone()).await },
            |result| cosmic::Action::App(Message::SnapshotReady(result)),
        );
        let flash = Self::delay_task(FLASH_DURATION.as_millis() as u64, Message::FlashComplete);

        Task::batch([snapshot, flash])
    }

    pub(crate) fn handle_snapshot_ready(
        &mut self,
        result: Result<ImagePayload, PhotoError>,
    ) -> Task<cosmic::Action<Message>> {
        self.is_capturing = false;

        let payload = match result {
            Ok(payload) => payload,
            Err(err) => {
                error!(error = %err, "Snapshot failed");
                return Task::none();
            }
        };

        let handle = Handle::from_bytes(payload.bytes().to_vec());
        let Some(ticket) = self.wall.handle_capture(payload) else {
            return Task::none();
        };
        self.photo_handles.insert(ticket.id, handle);

        let effects = lifecycle::schedule(ticket, self.captioner.clone())
            .into_iter()
            .map(|effect| Task::perform(effect, |event| cosmic::Action::App(Message::Wall(event))));
        Task::batch(effects)
    }

    pub(crate) fn handle_flash_complete(&mut self) -> Task<cosmic::Action<Message>> {
        self.flash_active = false;
        Task::none()
    }
}
