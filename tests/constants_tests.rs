// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use photobooth::constants::{lifecycle, placement, ui};
use std::time::Duration;

#[test]
fn test_lifecycle_delays() {
    assert_eq!(lifecycle::EJECT_DELAY, Duration::from_millis(100));
    assert_eq!(lifecycle::DEVELOP_DELAY, Duration::from_millis(3000));
    assert!(lifecycle::FLASH_DURATION < lifecycle::EJECT_DELAY * 2);
}

#[test]
fn test_card_photo_is_four_by_five() {
    let inner = ui::CARD_WIDTH - 2.0 * f32::from(ui::CARD_PADDING);
    assert_eq!(inner / ui::CARD_PHOTO_HEIGHT, 4.0 / 5.0);
}

#[test]
fn test_spawn_point_clears_the_camera() {
    // A fresh card starts inside the camera slot and rises above it
    let rise_to = placement::ORIGIN_BOTTOM_OFFSET + placement::EJECT_RISE;
    assert!(rise_to > ui::CAMERA_BODY_HEIGHT);
}
