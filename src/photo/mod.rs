// SPDX-License-Identifier: GPL-3.0-only

//! Photo wall domain model
//!
//! - [`record`]: the photo record and its value types
//! - [`placement`]: seedable tilt and ejection jitter
//! - [`wall`]: the state owner and single-flight capture gate
//! - [`lifecycle`]: timed ejection, development and captioning effects

pub mod lifecycle;
pub mod placement;
pub mod record;
pub mod wall;

pub use lifecycle::WallEvent;
pub use placement::Placement;
pub use record::{ImagePayload, Offset, PhotoId, PhotoRecord, Position};
pub use wall::{CaptureTicket, PhotoWall};
