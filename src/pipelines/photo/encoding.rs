// SPDX-License-Identifier: GPL-3.0-only

//! JPEG encoding of snapshots

use crate::errors::PhotoError;
use image::RgbImage;
use tracing::debug;

/// Encode an RGB image as JPEG at the given quality (1-100)
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, PhotoError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);

    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality.clamp(1, 100));
    encoder.encode(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgb8,
    )?;

    debug!(
        width = image.width(),
        height = image.height(),
        quality,
        size = buffer.len(),
        "JPEG encoded"
    );
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_is_jpeg() {
        let image = RgbImage::from_pixel(8, 8, image::Rgb([200, 120, 40]));
        let data = encode_jpeg(&image, 90).unwrap();
        assert_eq!(&data[..2], &[0xFF, 0xD8], "missing SOI marker");
        assert_eq!(image::guess_format(&data).unwrap(), image::ImageFormat::Jpeg);
    }

    #[test]
    fn test_quality_affects_size() {
        let image = RgbImage::from_fn(64, 64, |x, y| image::Rgb([(x * 4) as u8, (y * 4) as u8, 128]));
        let low = encode_jpeg(&image, 10).unwrap();
        let high = encode_jpeg(&image, 100).unwrap();
        assert!(low.len() < high.len());
    }
}
