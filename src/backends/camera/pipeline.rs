// SPDX-License-Identifier: GPL-3.0-only

//! GStreamer preview pipeline
//!
//! ```text
//! <source> ! videoconvert ! videoscale ! video/x-raw,format=RGBA,width=W,height=H ! appsink
//! ```
//!
//! The appsink callback runs on the GStreamer streaming thread and only
//! pushes frames into a bounded channel; frames are dropped when the
//! receiver falls behind.

use super::types::{CameraDevice, CameraFrame, FrameSender};
use crate::constants::camera::{
    FRAME_LOG_INTERVAL, MAX_BUFFERS, OUTPUT_FORMAT, STATE_CHANGE_TIMEOUT_MS, STOP_TIMEOUT_SECS,
};
use crate::errors::CameraError;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Running camera pipeline; dropping it releases the device
pub struct CameraPipeline {
    pipeline: gstreamer::Pipeline,
    appsink: AppSink,
}

impl CameraPipeline {
    /// Build the pipeline for `device` and start streaming into `frame_sender`
    pub fn start(
        device: &CameraDevice,
        width: u32,
        height: u32,
        frame_sender: FrameSender,
    ) -> Result<Self, CameraError> {
        info!(device = %device.name, width, height, "Creating camera pipeline");
        gstreamer::init().map_err(|e| CameraError::GStreamerInit(e.to_string()))?;

        let source = match &device.device {
            Some(dev) => dev.create_element(Some("source"))?,
            None => gstreamer::ElementFactory::make("autovideosrc")
                .name("source")
                .build()?,
        };
        let convert = gstreamer::ElementFactory::make("videoconvert").build()?;
        let scale = gstreamer::ElementFactory::make("videoscale").build()?;
        let caps = gstreamer::Caps::builder("video/x-raw")
            .field("format", OUTPUT_FORMAT)
            .field("width", width as i32)
            .field("height", height as i32)
            .build();
        let filter = gstreamer::ElementFactory::make("capsfilter")
            .property("caps", &caps)
            .build()?;
        let appsink = AppSink::builder()
            .name("sink")
            .sync(false)
            .max_buffers(MAX_BUFFERS)
            .drop(true)
            .build();

        let pipeline = gstreamer::Pipeline::new();
        let sink: &gstreamer::Element = appsink.upcast_ref();
        pipeline.add_many([&source, &convert, &scale, &filter, sink])?;
        gstreamer::Element::link_many([&source, &convert, &scale, &filter, sink])?;

        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let frame = pull_frame(appsink)?;
                    let mut sender = frame_sender.clone();
                    if let Err(e) = sender.try_send(frame) {
                        if e.is_disconnected() {
                            return Err(gstreamer::FlowError::Eos);
                        }
                        // Channel full: the UI will pick up the next one.
                    }
                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        let this = Self { pipeline, appsink };

        debug!("Setting pipeline to PLAYING state");
        if let Err(e) = this.pipeline.set_state(gstreamer::State::Playing) {
            return Err(this.bus_error().unwrap_or_else(|| e.into()));
        }

        let (result, state, _) = this.pipeline.state(gstreamer::ClockTime::from_mseconds(
            STATE_CHANGE_TIMEOUT_MS,
        ));
        if result.is_err() {
            let err = this
                .bus_error()
                .unwrap_or_else(|| CameraError::Pipeline("failed to reach PLAYING".into()));
            error!(error = %err, "Camera pipeline failed to start");
            return Err(err);
        }
        debug!(state = ?state, "Camera pipeline started");

        Ok(this)
    }

    /// Check the bus for an error or end-of-stream posted since the last poll
    pub fn poll_error(&self) -> Option<CameraError> {
        let bus = self.pipeline.bus()?;
        while let Some(msg) = bus.pop_filtered(&[
            gstreamer::MessageType::Error,
            gstreamer::MessageType::Eos,
        ]) {
            match msg.view() {
                gstreamer::MessageView::Error(err) => {
                    warn!(error = %err.error(), debug = ?err.debug(), "Camera pipeline error");
                    return Some(err.error().into());
                }
                gstreamer::MessageView::Eos(_) => return Some(CameraError::Disconnected),
                _ => {}
            }
        }
        None
    }

    fn bus_error(&self) -> Option<CameraError> {
        self.poll_error()
    }
}

impl Drop for CameraPipeline {
    fn drop(&mut self) {
        debug!("Dropping camera pipeline");
        self.appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());
        if self.pipeline.set_state(gstreamer::State::Null).is_ok() {
            let _ = self
                .pipeline
                .state(gstreamer::ClockTime::from_seconds(STOP_TIMEOUT_SECS));
        }
        info!("Camera released");
    }
}

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Pull one sample and copy it into a tightly packed RGBA frame
fn pull_frame(appsink: &AppSink) -> Result<CameraFrame, gstreamer::FlowError> {
    let frame_start = Instant::now();
    let frame_num = FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);

    let sample = appsink.pull_sample().map_err(|_| gstreamer::FlowError::Eos)?;
    let buffer = sample.buffer().ok_or(gstreamer::FlowError::Error)?;
    let caps = sample.caps().ok_or(gstreamer::FlowError::Error)?;
    let info = VideoInfo::from_caps(caps).map_err(|e| {
        error!(frame = frame_num, error = ?e, "Failed to get video info");
        gstreamer::FlowError::Error
    })?;
    let map = buffer.map_readable().map_err(|_| gstreamer::FlowError::Error)?;

    let data = pack_rows(
        map.as_slice(),
        info.width(),
        info.height(),
        info.stride()[0] as usize,
    )
    .ok_or_else(|| {
        warn!(frame = frame_num, "Short camera buffer, dropping frame");
        gstreamer::FlowError::Error
    })?;

    if frame_num % FRAME_LOG_INTERVAL == 0 {
        debug!(
            frame = frame_num,
            width = info.width(),
            height = info.height(),
            copy_us = frame_start.elapsed().as_micros(),
            "Frame"
        );
    }

    Ok(CameraFrame {
        width: info.width(),
        height: info.height(),
        data,
        captured_at: frame_start,
    })
}

/// Drop per-row padding so rows are exactly `width * 4` bytes
fn pack_rows(src: &[u8], width: u32, height: u32, stride: usize) -> Option<Arc<[u8]>> {
    let row = width as usize * 4;
    let rows = height as usize;
    if stride < row || src.len() < stride * rows.saturating_sub(1) + row {
        return None;
    }
    if stride == row {
        return Some(Arc::from(&src[..row * rows]));
    }
    let mut packed = Vec::with_capacity(row * rows);
    for y in 0..rows {
        let start = y * stride;
        packed.extend_from_slice(&src[start..start + row]);
    }
    Some(Arc::from(packed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_rows_tight() {
        let src: Vec<u8> = (0..16).collect();
        let packed = pack_rows(&src, 2, 2, 8).unwrap();
        assert_eq!(&packed[..], &src[..]);
    }

    #[test]
    fn test_pack_rows_strips_padding() {
        // 1x2 RGBA with 4 bytes of padding per row
        let src = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8];
        let packed = pack_rows(&src, 1, 2, 8).unwrap();
        assert_eq!(&packed[..], &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_pack_rows_rejects_short_buffer() {
        assert!(pack_rows(&[0; 7], 1, 2, 4).is_none());
        assert!(pack_rows(&[0; 16], 2, 2, 4).is_none());
    }
}
