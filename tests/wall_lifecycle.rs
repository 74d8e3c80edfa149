// SPDX-License-Identifier: GPL-3.0-only

//! End-to-end capture lifecycle on a paused clock

use futures::FutureExt;
use futures::future::BoxFuture;
use photobooth::booth::Booth;
use photobooth::caption::{Captioner, fallback_caption};
use photobooth::errors::CaptionError;
use photobooth::photo::{ImagePayload, Placement, WallEvent};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;

/// Captioner double: answers immediately, fails, or waits for the test
enum Scripted {
    Reply(&'static str),
    Fail(CaptionError),
    Gated(Mutex<Option<oneshot::Receiver<Result<String, CaptionError>>>>),
}

impl Scripted {
    fn gated() -> (Self, oneshot::Sender<Result<String, CaptionError>>) {
        let (tx, rx) = oneshot::channel();
        (Scripted::Gated(Mutex::new(Some(rx))), tx)
    }
}

impl Captioner for Scripted {
    fn caption(&self, _image: ImagePayload) -> BoxFuture<'static, Result<String, CaptionError>> {
        match self {
            Scripted::Reply(text) => futures::future::ready(Ok(text.to_string())).boxed(),
            Scripted::Fail(err) => futures::future::ready(Err(err.clone())).boxed(),
            Scripted::Gated(rx) => {
                let rx = rx.lock().unwrap().take().expect("gated captioner used once");
                async move {
                    rx.await
                        .unwrap_or_else(|_| Err(CaptionError::Transport("gate dropped".into())))
                }
                .boxed()
            }
        }
    }
}

fn jpeg() -> ImagePayload {
    ImagePayload::jpeg(vec![0xFF, 0xD8, 0xFF, 0xD9])
}

fn booth(captioner: Scripted) -> Booth {
    Booth::new(Arc::new(captioner), Placement::seeded(42))
}

#[tokio::test(start_paused = true)]
async fn test_capture_ejects_develops_and_captions() {
    let mut booth = booth(Scripted::Reply("  Best friends forever "));
    let id = booth.capture(jpeg()).expect("gate open");

    let origin = booth.wall().get(id).unwrap().position;
    assert!(booth.wall().is_processing());

    booth.settle().await;

    let photo = booth.wall().get(id).unwrap();
    assert_eq!(photo.caption, "Best friends forever");
    assert!(!photo.is_developing);
    assert_eq!(photo.position.y, origin.y - 200.0);
    assert!(photo.position.x >= origin.x && photo.position.x < origin.x + 50.0);
    assert!(!booth.wall().is_processing());
}

#[tokio::test(start_paused = true)]
async fn test_effects_follow_their_delays() {
    let (captioner, release) = Scripted::gated();
    let mut booth = booth(captioner);
    let start = Instant::now();
    let id = booth.capture(jpeg()).unwrap();

    let event = booth.next_event().await.unwrap();
    assert!(matches!(event, WallEvent::Ejected { .. }));
    assert!(start.elapsed() >= Duration::from_millis(100));
    assert!(start.elapsed() < Duration::from_millis(3000));
    assert!(booth.wall().get(id).unwrap().is_developing);

    let event = booth.next_event().await.unwrap();
    assert_eq!(event, WallEvent::Developed(id));
    assert!(start.elapsed() >= Duration::from_millis(3000));

    // Gate reopens while the caption is still outstanding
    assert!(!booth.wall().is_processing());
    assert!(!booth.wall().get(id).unwrap().has_caption());

    release.send(Ok("Late but lovely".into())).unwrap();
    let event = booth.next_event().await.unwrap();
    assert_eq!(
        event,
        WallEvent::Captioned {
            id,
            caption: "Late but lovely".into()
        }
    );
    assert!(booth.next_event().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_failed_caption_shows_capture_date() {
    let mut booth = booth(Scripted::Fail(CaptionError::Status {
        status: 503,
        body: "overloaded".into(),
    }));
    let id = booth.capture(jpeg()).unwrap();
    booth.settle().await;

    let photo = booth.wall().get(id).unwrap();
    assert_eq!(photo.caption, fallback_caption(&photo.captured_at));
}

#[tokio::test(start_paused = true)]
async fn test_missing_key_shows_capture_date() {
    let mut booth = booth(Scripted::Fail(CaptionError::MissingCredential));
    let id = booth.capture(jpeg()).unwrap();
    booth.settle().await;

    let photo = booth.wall().get(id).unwrap();
    assert_eq!(photo.caption, fallback_caption(&photo.captured_at));
}

#[tokio::test(start_paused = true)]
async fn test_empty_answer_becomes_stock_caption() {
    let mut booth = booth(Scripted::Reply("   "));
    let id = booth.capture(jpeg()).unwrap();
    booth.settle().await;

    assert_eq!(booth.wall().get(id).unwrap().caption, "Memories...");
}

#[tokio::test(start_paused = true)]
async fn test_second_capture_rejected_until_developed() {
    let mut booth = booth(Scripted::Reply("One"));
    let first = booth.capture(jpeg()).unwrap();

    assert!(booth.capture(jpeg()).is_none());
    assert_eq!(booth.wall().len(), 1);

    booth.settle().await;
    let second = booth.capture(jpeg()).expect("gate reopened");
    assert_ne!(first, second);
    assert_eq!(booth.wall().len(), 2);

    // Insertion order is preserved
    let ids: Vec<_> = booth.wall().photos().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test(start_paused = true)]
async fn test_delete_during_caption_does_not_resurrect() {
    let (captioner, release) = Scripted::gated();
    let mut booth = booth(captioner);
    let id = booth.capture(jpeg()).unwrap();

    booth.next_event().await.unwrap();
    assert!(booth.delete(id));
    assert!(booth.wall().is_empty());

    release.send(Ok("Too late".into())).unwrap();
    booth.settle().await;

    assert!(booth.wall().is_empty());
    assert!(booth.wall().get(id).is_none());
    assert!(!booth.wall().is_processing());
}

#[tokio::test(start_paused = true)]
async fn test_drag_end_sets_position() {
    let mut booth = booth(Scripted::Reply("Moved"));
    let id = booth.capture(jpeg()).unwrap();
    booth.settle().await;

    booth.drag_end(id, 612.5, 48.0);
    let photo = booth.wall().get(id).unwrap();
    assert_eq!((photo.position.x, photo.position.y), (612.5, 48.0));
    assert_eq!(photo.caption, "Moved");
}
