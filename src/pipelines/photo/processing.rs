// SPDX-License-Identifier: GPL-3.0-only

//! Frame conversion before encoding

use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoError;
use image::RgbImage;

/// Convert an RGBA frame to RGB, flipped horizontally like a mirror
///
/// The preview is shown mirrored, so the still keeps the same orientation
/// the user saw when pressing the shutter.
pub fn mirrored_rgb(frame: &CameraFrame) -> Result<RgbImage, PhotoError> {
    let mut image = rgba_to_rgb(&frame.data, frame.width, frame.height)?;
    image::imageops::flip_horizontal_in_place(&mut image);
    Ok(image)
}

/// Convert RGBA data to an RGB image (drop alpha channel)
fn rgba_to_rgb(rgba: &[u8], width: u32, height: u32) -> Result<RgbImage, PhotoError> {
    let pixels = width as usize * height as usize;
    if pixels == 0 {
        return Err(PhotoError::InvalidFrame("empty frame".into()));
    }
    if rgba.len() < pixels * 4 {
        return Err(PhotoError::InvalidFrame(format!(
            "RGBA data too small: expected {}, got {}",
            pixels * 4,
            rgba.len()
        )));
    }

    let rgb: Vec<u8> = rgba
        .chunks_exact(4)
        .take(pixels)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| PhotoError::InvalidFrame("buffer does not match dimensions".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    fn frame(width: u32, height: u32, data: Vec<u8>) -> CameraFrame {
        CameraFrame {
            width,
            height,
            data: Arc::from(data),
            captured_at: Instant::now(),
        }
    }

    #[test]
    fn test_mirror_swaps_columns() {
        // 2x1: red then blue
        let f = frame(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]);
        let image = mirrored_rgb(&f).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_short_frame_rejected() {
        let f = frame(2, 2, vec![0; 12]);
        assert!(matches!(mirrored_rgb(&f), Err(PhotoError::InvalidFrame(_))));
    }

    #[test]
    fn test_empty_frame_rejected() {
        let f = frame(0, 0, Vec::new());
        assert!(mirrored_rgb(&f).is_err());
    }
}
