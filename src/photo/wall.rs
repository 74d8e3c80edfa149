// SPDX-License-Identifier: GPL-3.0-only

//! The photo wall: authoritative list of records and the capture gate
//!
//! Every mutation is field-scoped and addressed by id. Mutations for an id
//! that is no longer on the wall are silent no-ops, so late timers and
//! caption responses for deleted cards never resurrect them.

use super::placement::Placement;
use super::record::{ImagePayload, Offset, PhotoId, PhotoRecord, Position};
use crate::constants::placement::DEFAULT_WALL_HEIGHT;
use chrono::{DateTime, Local};
use tracing::{debug, info};

/// Follow-up work owed for an accepted capture
///
/// The caller schedules the ejection and development timers and the
/// caption request, then feeds the results back through
/// [`PhotoWall::apply_ejection`], [`PhotoWall::finish_developing`] and
/// [`PhotoWall::set_caption`].
#[derive(Debug, Clone)]
pub struct CaptureTicket {
    pub id: PhotoId,
    pub image: ImagePayload,
    pub captured_at: DateTime<Local>,
    /// Offset to apply once the eject delay has elapsed
    pub ejection: Offset,
}

/// Ordered collection of photo records plus the single-flight flag
#[derive(Debug)]
pub struct PhotoWall {
    photos: Vec<PhotoRecord>,
    is_processing: bool,
    placement: Placement,
    wall_height: f32,
}

impl Default for PhotoWall {
    fn default() -> Self {
        Self::new(Placement::default())
    }
}

impl PhotoWall {
    pub fn new(placement: Placement) -> Self {
        Self {
            photos: Vec::new(),
            is_processing: false,
            placement,
            wall_height: DEFAULT_WALL_HEIGHT,
        }
    }

    /// Records in insertion order
    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    pub fn get(&self, id: PhotoId) -> Option<&PhotoRecord> {
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// True while a capture is in flight (until its development finishes)
    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    /// Update the wall height used to place new cards
    pub fn set_wall_height(&mut self, height: f32) {
        if height.is_finite() && height > 0.0 {
            self.wall_height = height;
        }
    }

    pub fn wall_height(&self) -> f32 {
        self.wall_height
    }

    /// Accept a new image from the capture surface
    ///
    /// Returns `None` without touching the wall while another capture is in
    /// flight.
    pub fn handle_capture(&mut self, image: ImagePayload) -> Option<CaptureTicket> {
        self.handle_capture_at(image, Local::now())
    }

    /// Same as [`handle_capture`](Self::handle_capture) with an explicit capture time
    pub fn handle_capture_at(
        &mut self,
        image: ImagePayload,
        captured_at: DateTime<Local>,
    ) -> Option<CaptureTicket> {
        if self.is_processing {
            debug!("Capture ignored: previous capture still in flight");
            return None;
        }
        self.is_processing = true;

        let id = PhotoId::new();
        let record = PhotoRecord {
            id,
            image: image.clone(),
            captured_at,
            caption: String::new(),
            position: Placement::origin(self.wall_height),
            rotation: self.placement.tilt(),
            is_developing: true,
        };
        self.photos.push(record);

        info!(id = %id, bytes = image.len(), "Photo added to wall");

        Some(CaptureTicket {
            id,
            image,
            captured_at,
            ejection: self.placement.ejection(),
        })
    }

    /// Slide a card out of the camera slot
    pub fn apply_ejection(&mut self, id: PhotoId, offset: Offset) {
        if let Some(photo) = self.find_mut(id) {
            photo.position = photo.position.offset(offset);
        }
    }

    /// End development of a card and reopen the capture gate
    ///
    /// The gate is released even if the card has been deleted meanwhile.
    pub fn finish_developing(&mut self, id: PhotoId) {
        if let Some(photo) = self.find_mut(id) {
            photo.is_developing = false;
        }
        self.is_processing = false;
        debug!(id = %id, "Development finished");
    }

    /// Set the caption of a card
    pub fn set_caption(&mut self, id: PhotoId, caption: impl Into<String>) {
        match self.find_mut(id) {
            Some(photo) => photo.caption = caption.into(),
            None => debug!(id = %id, "Caption arrived for removed photo"),
        }
    }

    /// Move a card to the position reported at the end of a drag
    pub fn handle_drag_end(&mut self, id: PhotoId, x: f32, y: f32) {
        if let Some(photo) = self.find_mut(id) {
            photo.position = Position::new(x, y);
        }
    }

    /// Remove a card; returns whether anything was removed
    pub fn handle_delete(&mut self, id: PhotoId) -> bool {
        let before = self.photos.len();
        self.photos.retain(|p| p.id != id);
        let removed = self.photos.len() != before;
        if removed {
            info!(id = %id, "Photo deleted");
        }
        removed
    }

    fn find_mut(&mut self, id: PhotoId) -> Option<&mut PhotoRecord> {
        self.photos.iter_mut().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> PhotoWall {
        PhotoWall::new(Placement::seeded(1))
    }

    fn payload() -> ImagePayload {
        ImagePayload::jpeg(vec![0xFF, 0xD8, 0xFF, 0xD9])
    }

    #[test]
    fn test_capture_creates_developing_record_at_origin() {
        let mut wall = wall();
        wall.set_wall_height(1000.0);

        let ticket = wall.handle_capture(payload()).expect("gate open");
        let photo = wall.get(ticket.id).expect("record exists");

        assert!(photo.is_developing);
        assert!(photo.caption.is_empty());
        assert_eq!(photo.position, Position::new(50.0, 550.0));
        assert!((-5.0..5.0).contains(&photo.rotation));
        assert!(wall.is_processing());
    }

    #[test]
    fn test_capture_rejected_while_processing() {
        let mut wall = wall();
        assert!(wall.handle_capture(payload()).is_some());
        assert!(wall.handle_capture(payload()).is_none());
        assert!(wall.handle_capture(payload()).is_none());
        assert_eq!(wall.len(), 1);
    }

    #[test]
    fn test_gate_reopens_after_development() {
        let mut wall = wall();
        let first = wall.handle_capture(payload()).unwrap();
        wall.finish_developing(first.id);
        assert!(!wall.is_processing());
        assert!(wall.handle_capture(payload()).is_some());
        assert_eq!(wall.len(), 2);
    }

    #[test]
    fn test_finish_developing_releases_gate_for_deleted_photo() {
        let mut wall = wall();
        let ticket = wall.handle_capture(payload()).unwrap();
        assert!(wall.handle_delete(ticket.id));
        wall.finish_developing(ticket.id);
        assert!(!wall.is_processing());
        assert!(wall.is_empty());
    }

    #[test]
    fn test_ejection_moves_only_target() {
        let mut wall = wall();
        let a = wall.handle_capture(payload()).unwrap();
        wall.finish_developing(a.id);
        let b = wall.handle_capture(payload()).unwrap();

        let before_a = wall.get(a.id).unwrap().position;
        wall.apply_ejection(b.id, b.ejection);

        assert_eq!(wall.get(a.id).unwrap().position, before_a);
        let moved = wall.get(b.id).unwrap().position;
        assert_eq!(moved.y, before_a.y - 200.0);
        assert!(moved.x >= 50.0 && moved.x < 100.0);
    }

    #[test]
    fn test_drag_end_sets_position_without_clamping() {
        let mut wall = wall();
        let ticket = wall.handle_capture(payload()).unwrap();
        wall.handle_drag_end(ticket.id, -300.0, 12_000.0);

        let photo = wall.get(ticket.id).unwrap();
        assert_eq!(photo.position, Position::new(-300.0, 12_000.0));
        assert!(photo.is_developing, "drag must not touch other fields");
    }

    #[test]
    fn test_caption_is_field_scoped() {
        let mut wall = wall();
        let ticket = wall.handle_capture(payload()).unwrap();
        wall.handle_drag_end(ticket.id, 10.0, 20.0);
        wall.set_caption(ticket.id, "Sunny side up");

        let photo = wall.get(ticket.id).unwrap();
        assert_eq!(photo.caption, "Sunny side up");
        assert_eq!(photo.position, Position::new(10.0, 20.0));
        assert!(photo.is_developing);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut wall = wall();
        let ticket = wall.handle_capture(payload()).unwrap();
        assert!(wall.handle_delete(ticket.id));
        assert!(!wall.handle_delete(ticket.id));
        assert!(wall.is_empty());
    }

    fn filled(count: usize) -> PhotoWall {
        let mut wall = wall();
        for i in 0..count {
            let ticket = wall.handle_capture(payload()).unwrap();
            wall.apply_ejection(ticket.id, ticket.ejection);
            wall.set_caption(ticket.id, format!("card {i}"));
            if i + 1 < count {
                wall.finish_developing(ticket.id);
            }
        }
        wall
    }

    fn assert_same_record(left: &PhotoRecord, right: &PhotoRecord) {
        assert_eq!(left.id, right.id);
        assert_eq!(left.image, right.image);
        assert_eq!(left.captured_at, right.captured_at);
        assert_eq!(left.caption, right.caption);
        assert_eq!(left.position, right.position);
        assert_eq!(left.rotation, right.rotation);
        assert_eq!(left.is_developing, right.is_developing);
    }

    #[test]
    fn test_drag_end_leaves_other_records_unchanged() {
        let mut wall = filled(3);
        let before = wall.photos().to_vec();
        let target = before[1].id;

        wall.handle_drag_end(target, 640.0, 75.0);

        let after = wall.photos();
        assert_eq!(after.len(), before.len());
        for (old, new) in before.iter().zip(after) {
            if old.id == target {
                assert_eq!(new.position, Position::new(640.0, 75.0));
                assert_eq!(new.caption, old.caption);
                assert_eq!(new.rotation, old.rotation);
                assert_eq!(new.is_developing, old.is_developing);
            } else {
                assert_same_record(old, new);
            }
        }
    }

    #[test]
    fn test_delete_removes_exactly_one_record() {
        let mut wall = filled(3);
        let before = wall.photos().to_vec();

        assert!(wall.handle_delete(before[1].id));

        let after = wall.photos();
        assert_eq!(after.len(), before.len() - 1);
        assert!(wall.get(before[1].id).is_none());
        let ids: Vec<_> = after.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![before[0].id, before[2].id]);
        assert_same_record(&before[0], &after[0]);
        assert_same_record(&before[2], &after[1]);
    }

    #[test]
    fn test_mutations_on_missing_id_are_noops() {
        let mut wall = wall();
        let ticket = wall.handle_capture(payload()).unwrap();
        let ghost = PhotoId::new();

        wall.set_caption(ghost, "boo");
        wall.handle_drag_end(ghost, 1.0, 1.0);
        wall.apply_ejection(ghost, ticket.ejection);

        assert_eq!(wall.len(), 1);
        assert!(wall.get(ghost).is_none());
        assert!(wall.get(ticket.id).unwrap().caption.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut wall = wall();
        let mut ids = Vec::new();
        for _ in 0..3 {
            let ticket = wall.handle_capture(payload()).unwrap();
            wall.finish_developing(ticket.id);
            ids.push(ticket.id);
        }
        let order: Vec<_> = wall.photos().iter().map(|p| p.id).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn test_invalid_wall_height_ignored() {
        let mut wall = wall();
        wall.set_wall_height(f32::NAN);
        wall.set_wall_height(-1.0);
        assert_eq!(wall.wall_height(), DEFAULT_WALL_HEIGHT);
    }
}
