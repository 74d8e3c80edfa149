// SPDX-License-Identifier: GPL-3.0-only

//! Timed follow-up effects of an accepted capture
//!
//! ```text
//! handle_capture ──┬── +100ms ──→ Ejected
//!                  ├── +3000ms ─→ Developed (gate reopens)
//!                  └── captioner ─→ Captioned (any time, any order)
//! ```
//!
//! Each effect is an independent future resolving to a [`WallEvent`]. The
//! futures never touch the wall themselves; whoever drives them applies
//! the events on the thread that owns the wall.

use super::record::{Offset, PhotoId};
use super::wall::{CaptureTicket, PhotoWall};
use crate::caption::{SharedCaptioner, caption_or_fallback};
use crate::constants::lifecycle::{DEVELOP_DELAY, EJECT_DELAY};
use futures::FutureExt;
use futures::future::BoxFuture;

/// Result of one lifecycle effect
#[derive(Debug, Clone, PartialEq)]
pub enum WallEvent {
    /// The card has slid out of the camera
    Ejected { id: PhotoId, offset: Offset },
    /// Development is over
    Developed(PhotoId),
    /// Caption resolved (service text or fallback)
    Captioned { id: PhotoId, caption: String },
}

impl WallEvent {
    pub fn id(&self) -> PhotoId {
        match self {
            WallEvent::Ejected { id, .. }
            | WallEvent::Developed(id)
            | WallEvent::Captioned { id, .. } => *id,
        }
    }

    /// Merge this event into the wall
    pub fn apply(self, wall: &mut PhotoWall) {
        match self {
            WallEvent::Ejected { id, offset } => wall.apply_ejection(id, offset),
            WallEvent::Developed(id) => wall.finish_developing(id),
            WallEvent::Captioned { id, caption } => wall.set_caption(id, caption),
        }
    }
}

/// Resolves to [`WallEvent::Ejected`] after the eject delay
pub async fn eject(id: PhotoId, offset: Offset) -> WallEvent {
    tokio::time::sleep(EJECT_DELAY).await;
    WallEvent::Ejected { id, offset }
}

/// Resolves to [`WallEvent::Developed`] after the develop delay
pub async fn develop(id: PhotoId) -> WallEvent {
    tokio::time::sleep(DEVELOP_DELAY).await;
    WallEvent::Developed(id)
}

/// Resolves to [`WallEvent::Captioned`] once the captioner answers or fails
pub async fn caption(captioner: SharedCaptioner, ticket: CaptureTicket) -> WallEvent {
    let caption = caption_or_fallback(captioner, ticket.image, ticket.captured_at).await;
    WallEvent::Captioned {
        id: ticket.id,
        caption,
    }
}

/// All three effects for a ticket, ready to be spawned
pub fn schedule(ticket: CaptureTicket, captioner: SharedCaptioner) -> Vec<BoxFuture<'static, WallEvent>> {
    vec![
        eject(ticket.id, ticket.ejection).boxed(),
        develop(ticket.id).boxed(),
        caption(captioner, ticket).boxed(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caption::Captioner;
    use crate::errors::CaptionError;
    use crate::photo::{ImagePayload, Placement};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct SlowCaptioner(Duration);

    impl Captioner for SlowCaptioner {
        fn caption(&self, _: ImagePayload) -> BoxFuture<'static, Result<String, CaptionError>> {
            let delay = self.0;
            async move {
                tokio::time::sleep(delay).await;
                Ok("Late bloomer".to_string())
            }
            .boxed()
        }
    }

    #[test]
    fn test_apply_routes_by_variant() {
        let mut wall = PhotoWall::new(Placement::seeded(3));
        let ticket = wall.handle_capture(ImagePayload::jpeg(vec![1])).unwrap();
        let start = wall.get(ticket.id).unwrap().position;

        WallEvent::Ejected {
            id: ticket.id,
            offset: ticket.ejection,
        }
        .apply(&mut wall);
        WallEvent::Captioned {
            id: ticket.id,
            caption: "Hi".into(),
        }
        .apply(&mut wall);
        WallEvent::Developed(ticket.id).apply(&mut wall);

        let photo = wall.get(ticket.id).unwrap();
        assert_eq!(photo.position, start.offset(ticket.ejection));
        assert_eq!(photo.caption, "Hi");
        assert!(!photo.is_developing);
        assert!(!wall.is_processing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_arrive_in_timer_order() {
        let mut wall = PhotoWall::new(Placement::seeded(3));
        let ticket = wall.handle_capture(ImagePayload::jpeg(vec![1])).unwrap();
        let id = ticket.id;
        let captioner: SharedCaptioner = Arc::new(SlowCaptioner(Duration::from_secs(5)));

        let (tx, mut rx) = mpsc::unbounded_channel();
        for effect in schedule(ticket, captioner) {
            let tx = tx.clone();
            tokio::spawn(async move {
                let _ = tx.send(effect.await);
            });
        }
        drop(tx);

        let mut order = Vec::new();
        while let Some(event) = rx.recv().await {
            order.push(std::mem::discriminant(&event));
            assert_eq!(event.id(), id);
        }

        assert_eq!(order.len(), 3);
        assert_eq!(
            order[0],
            std::mem::discriminant(&WallEvent::Ejected {
                id,
                offset: Offset::default()
            })
        );
        assert_eq!(order[1], std::mem::discriminant(&WallEvent::Developed(id)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_develop_waits_full_delay() {
        let start = tokio::time::Instant::now();
        let event = develop(PhotoId::new()).await;
        assert!(matches!(event, WallEvent::Developed(_)));
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }
}
