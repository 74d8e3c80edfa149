// SPDX-License-Identifier: GPL-3.0-only

//! Processing pipelines
//!
//! - [`photo`]: turns a live camera frame into a mirrored JPEG still

pub mod photo;
