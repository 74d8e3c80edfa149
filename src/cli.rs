// SPDX-License-Identifier: GPL-3.0-only

//! Command-line commands
//!
//! - `list`: print the detected cameras
//! - `snap`: take one polaroid headlessly and print its caption
//! - `caption`: caption an image file

use futures::StreamExt;
use futures::channel::mpsc;
use photobooth::backends::camera::{self, CameraFrame};
use photobooth::booth::Booth;
use photobooth::caption::{self, caption_or_fallback};
use photobooth::config::Config;
use photobooth::photo::{ImagePayload, Placement};
use photobooth::pipelines::photo::SnapshotPipeline;
use photobooth::storage;
use std::path::PathBuf;
use std::time::Duration;

/// Give up on the first frame after this long
const FIRST_FRAME_TIMEOUT: Duration = Duration::from_secs(5);
/// Let auto-exposure settle before taking the shot
const WARMUP: Duration = Duration::from_millis(500);

/// List all available cameras
pub fn list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    gstreamer::init()?;

    let cameras = camera::enumerate_cameras()?;
    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        println!("  [{}] {} ({})", index, camera.name, camera.location);
        println!("      {}", camera.path);
    }
    Ok(())
}

/// Take one photo, caption it and save it
pub fn snap(camera_index: usize, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    gstreamer::init()?;

    let (_, config) = Config::load(photobooth::app::APP_ID);
    let (width, height) = config.capture_resolution();

    let (sender, receiver) = mpsc::channel(4);
    let (device, pipeline) = camera::open_index(camera_index, width, height, sender)?;
    println!("Using camera: {}", device.name);

    let rt = tokio::runtime::Runtime::new()?;
    let (path, caption) = rt.block_on(async move {
        let frame = wait_for_frame(receiver).await?;
        drop(pipeline);

        let payload = SnapshotPipeline::new(config.effective_jpeg_quality())
            .snapshot(frame)
            .await?;

        let mut booth = Booth::new(caption::from_config(&config), Placement::from_entropy());
        let id = booth
            .capture(payload)
            .ok_or("Capture was rejected")?;
        println!("Developing...");
        booth.settle().await;

        let photo = booth.wall().get(id).ok_or("Photo disappeared")?.clone();
        let path = match output {
            Some(path) if path.is_dir() => storage::default_photo_path(&path, &photo),
            Some(path) => path,
            None => storage::default_photo_path(&storage::photo_dir(), &photo),
        };
        let path = storage::write_photo(path, photo.image.shared_bytes()).await?;
        Ok::<_, Box<dyn std::error::Error>>((path, photo.caption))
    })?;

    println!("Photo saved: {}", path.display());
    println!("Caption: {caption}");
    Ok(())
}

/// Wait for the first good frame after the warm-up period
async fn wait_for_frame(
    mut receiver: mpsc::Receiver<CameraFrame>,
) -> Result<CameraFrame, Box<dyn std::error::Error>> {
    let started = tokio::time::Instant::now();
    let mut latest: Option<CameraFrame> = None;

    loop {
        let remaining = FIRST_FRAME_TIMEOUT.saturating_sub(started.elapsed());
        match tokio::time::timeout(remaining, receiver.next()).await {
            Ok(Some(frame)) if frame.is_valid() => {
                latest = Some(frame);
                if started.elapsed() >= WARMUP {
                    break;
                }
            }
            Ok(Some(_)) => {}
            Ok(None) | Err(_) => break,
        }
    }

    latest.ok_or_else(|| "Failed to capture frame from camera".into())
}

/// Caption an existing image file and print the result
pub fn caption_file(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(&file)?;
    let mime_type = match image::guess_format(&bytes)? {
        image::ImageFormat::Jpeg => "image/jpeg",
        image::ImageFormat::Png => "image/png",
        other => return Err(format!("Unsupported image format: {other:?}").into()),
    };

    let captured_at = std::fs::metadata(&file)
        .and_then(|meta| meta.modified())
        .map(chrono::DateTime::<chrono::Local>::from)
        .unwrap_or_else(|_| chrono::Local::now());

    let (_, config) = Config::load(photobooth::app::APP_ID);
    let captioner = caption::from_config(&config);

    let rt = tokio::runtime::Runtime::new()?;
    let caption = rt.block_on(caption_or_fallback(
        captioner,
        ImagePayload::new(mime_type, bytes),
        captured_at,
    ));

    println!("{caption}");
    Ok(())
}
