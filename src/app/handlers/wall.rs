// SPDX-License-Identifier: GPL-3.0-only

//! Photo wall handlers

use crate::app::state::{AppModel, Message};
use crate::photo::{PhotoId, WallEvent};
use cosmic::Task;
use cosmic::iced::Size;
use std::path::PathBuf;
use tracing::{debug, error, info};

impl AppModel {
    pub(crate) fn handle_wall_event(&mut self, event: WallEvent) -> Task<cosmic::Action<Message>> {
        debug!(?event, "Wall event");
        event.apply(&mut self.wall);
        Task::none()
    }

    pub(crate) fn handle_photo_drag_end(
        &mut self,
        id: PhotoId,
        x: f32,
        y: f32,
    ) -> Task<cosmic::Action<Message>> {
        self.wall.handle_drag_end(id, x, y);
        Task::none()
    }

    pub(crate) fn handle_delete_photo(&mut self, id: PhotoId) -> Task<cosmic::Action<Message>> {
        if self.wall.handle_delete(id) {
            self.photo_handles.remove(&id);
        }
        Task::none()
    }

    pub(crate) fn handle_download_photo(&mut self, id: PhotoId) -> Task<cosmic::Action<Message>> {
        let Some(photo) = self.wall.get(id).cloned() else {
            return Task::none();
        };
        info!(%id, name = %photo.download_name(), "Downloading photo");
        Task::perform(
            async move {
                crate::storage::download(photo)
                    .await
                    .map_err(|err| err.to_string())
            },
            |result| cosmic::Action::App(Message::DownloadFinished(result)),
        )
    }

    pub(crate) fn handle_download_finished(
        &mut self,
        result: Result<Option<PathBuf>, String>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(Some(path)) => info!(path = %path.display(), "Photo saved"),
            Ok(None) => debug!("Download cancelled"),
            Err(err) => error!(error = %err, "Failed to save photo"),
        }
        Task::none()
    }

    pub(crate) fn handle_wall_resized(&mut self, size: Size) -> Task<cosmic::Action<Message>> {
        self.wall.set_wall_height(size.height);
        Task::none()
    }
}
