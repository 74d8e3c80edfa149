// SPDX-License-Identifier: GPL-3.0-only

//! Photo Booth - an instant camera for the COSMIC desktop
//!
//! Snapshots from the webcam eject as polaroid cards onto a free-form wall,
//! develop for a few seconds and receive a short caption from a
//! vision-language service.
//!
//! # Architecture
//!
//! - [`photo`]: photo records, the wall and the capture lifecycle
//! - [`caption`]: captioning service client and fallback captions
//! - [`backends`]: camera enumeration and GStreamer capture
//! - [`pipelines`]: frame → mirrored JPEG snapshot
//! - [`booth`]: headless lifecycle driver
//! - [`app`]: COSMIC application and widgets
//! - [`config`], [`storage`], [`errors`], [`constants`], [`i18n`]

pub mod app;
pub mod backends;
pub mod booth;
pub mod caption;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod photo;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use app::{AppModel, Message};
pub use booth::Booth;
pub use caption::{Captioner, SharedCaptioner};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use photo::{PhotoId, PhotoRecord, PhotoWall, WallEvent};
