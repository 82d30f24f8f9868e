//! Frame-buffer adapters around the detector.

use image::{GrayImage, Rgb, RgbImage};

use crate::detector::{DetectError, DetectionResult, PanelDetector};

/// Split an RGB frame into its three planes.
pub fn split_channels(frame: &RgbImage) -> (GrayImage, GrayImage, GrayImage) {
    let (w, h) = frame.dimensions();
    let mut r = GrayImage::new(w, h);
    let mut g = GrayImage::new(w, h);
    let mut b = GrayImage::new(w, h);
    for (x, y, pixel) in frame.enumerate_pixels() {
        r.put_pixel(x, y, image::Luma([pixel[0]]));
        g.put_pixel(x, y, image::Luma([pixel[1]]));
        b.put_pixel(x, y, image::Luma([pixel[2]]));
    }
    (r, g, b)
}

/// Replicate a single-channel image into the three RGB planes, for
/// rendering masks as debug views.
pub fn gray_to_rgb(gray: &GrayImage) -> RgbImage {
    RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0];
        Rgb([v, v, v])
    })
}

/// Wrap a raw interleaved RGB8 buffer as an image, validating that the
/// buffer length matches the claimed dimensions.
pub fn rgb_image_from_slice(width: u32, height: u32, data: &[u8]) -> Result<RgbImage, DetectError> {
    if width == 0 || height == 0 {
        return Err(DetectError::InvalidDimensions { width, height });
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or(DetectError::InvalidDimensions { width, height })?;
    if data.len() != expected {
        return Err(DetectError::InvalidRgbBuffer {
            expected,
            got: data.len(),
        });
    }
    RgbImage::from_raw(width, height, data.to_vec())
        .ok_or(DetectError::InvalidDimensions { width, height })
}

/// Run detection directly on a raw interleaved RGB8 buffer.
pub fn detect_rgb_u8(
    detector: &PanelDetector,
    width: u32,
    height: u32,
    data: &[u8],
) -> Result<DetectionResult, DetectError> {
    let frame = rgb_image_from_slice(width, height, data)?;
    Ok(detector.detect(&frame))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_channels_separates_planes() {
        let mut frame = RgbImage::new(2, 1);
        frame.put_pixel(0, 0, Rgb([10, 20, 30]));
        frame.put_pixel(1, 0, Rgb([40, 50, 60]));
        let (r, g, b) = split_channels(&frame);
        assert_eq!(r.get_pixel(1, 0)[0], 40);
        assert_eq!(g.get_pixel(0, 0)[0], 20);
        assert_eq!(b.get_pixel(1, 0)[0], 60);
    }

    #[test]
    fn slice_length_is_validated() {
        let err = rgb_image_from_slice(4, 4, &[0u8; 10]).unwrap_err();
        assert!(matches!(
            err,
            DetectError::InvalidRgbBuffer {
                expected: 48,
                got: 10
            }
        ));
        assert!(rgb_image_from_slice(0, 4, &[]).is_err());
        assert!(rgb_image_from_slice(4, 4, &[0u8; 48]).is_ok());
    }
}
