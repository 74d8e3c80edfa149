// SPDX-License-Identifier: GPL-3.0-only

//! Headless photo booth driver
//!
//! Runs the capture lifecycle on the tokio runtime without a window. Used by
//! the `snap` command and by the integration tests; the GUI drives the same
//! lifecycle futures through its own task system.

use crate::caption::SharedCaptioner;
use crate::photo::{ImagePayload, PhotoId, PhotoWall, Placement, WallEvent, lifecycle};
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Photo wall plus the lifecycle effects still running against it
pub struct Booth {
    wall: PhotoWall,
    captioner: SharedCaptioner,
    effects: JoinSet<WallEvent>,
}

impl Booth {
    pub fn new(captioner: SharedCaptioner, placement: Placement) -> Self {
        Self {
            wall: PhotoWall::new(placement),
            captioner,
            effects: JoinSet::new(),
        }
    }

    pub fn wall(&self) -> &PhotoWall {
        &self.wall
    }

    /// Number of lifecycle effects still outstanding
    pub fn pending(&self) -> usize {
        self.effects.len()
    }

    /// Submit a snapshot; returns the new card's id if the gate was open
    ///
    /// Must be called from within a tokio runtime.
    pub fn capture(&mut self, image: ImagePayload) -> Option<PhotoId> {
        let ticket = self.wall.handle_capture(image)?;
        let id = ticket.id;

        for effect in lifecycle::schedule(ticket, self.captioner.clone()) {
            self.effects.spawn(effect);
        }
        Some(id)
    }

    pub fn drag_end(&mut self, id: PhotoId, x: f32, y: f32) {
        self.wall.handle_drag_end(id, x, y);
    }

    pub fn delete(&mut self, id: PhotoId) -> bool {
        self.wall.handle_delete(id)
    }

    /// Wait for the next lifecycle event and apply it to the wall
    ///
    /// Returns `None` once nothing is outstanding. An effect that panicked
    /// is logged and skipped.
    pub async fn next_event(&mut self) -> Option<WallEvent> {
        loop {
            match self.effects.join_next().await? {
                Ok(event) => {
                    debug!(id = %event.id(), ?event, "Applying lifecycle event");
                    event.clone().apply(&mut self.wall);
                    return Some(event);
                }
                Err(err) => warn!(error = %err, "Lifecycle effect did not finish"),
            }
        }
    }

    /// Drive every outstanding effect to completion
    pub async fn settle(&mut self) {
        while self.next_event().await.is_some() {}
    }
}
