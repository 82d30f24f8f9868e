//! Binary mask construction: thresholding, combination and closing.
//!
//! Masks are single-channel 0/255 images. Thresholds follow the binary
//! convention: strictly above the threshold is foreground.

use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology;

use panel_targets_core::Rect;

/// Binary-threshold a grayscale image: pixels strictly above `threshold`
/// become 255, everything else 0.
pub fn threshold_binary(gray: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y)[0] > threshold {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Threshold the signed per-pixel difference `a - b`: the output is 255
/// where the difference is strictly above `threshold`.
///
/// Used for the color mask, where the red-minus-blue plane separates the
/// lit panel color from the background. Both planes must share dimensions.
pub fn channel_diff_mask(a: &GrayImage, b: &GrayImage, threshold: i16) -> GrayImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        let diff = a.get_pixel(x, y)[0] as i16 - b.get_pixel(x, y)[0] as i16;
        if diff > threshold {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Pixel-wise AND of two masks: 255 where both are foreground.
pub fn mask_and(a: &GrayImage, b: &GrayImage) -> GrayImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        if a.get_pixel(x, y)[0] != 0 && b.get_pixel(x, y)[0] != 0 {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Morphological closing (dilate then erode) with an L1-norm structuring
/// element of radius `kernel`. A zero kernel is a no-op copy.
pub fn close_mask(mask: &GrayImage, kernel: u8) -> GrayImage {
    if kernel == 0 {
        return mask.clone();
    }
    morphology::close(mask, Norm::L1, kernel)
}

/// Copy the `roi` region of `gray` into a fresh ROI-sized image, keeping
/// only pixels where `mask` is foreground. `roi` must already be clipped to
/// the image bounds; an empty ROI yields an empty image.
pub fn masked_region(gray: &GrayImage, mask: &GrayImage, roi: Rect) -> GrayImage {
    debug_assert_eq!(gray.dimensions(), mask.dimensions());
    if roi.is_empty() {
        return GrayImage::new(0, 0);
    }
    GrayImage::from_fn(roi.width as u32, roi.height as u32, |x, y| {
        let gx = roi.x as u32 + x;
        let gy = roi.y as u32 + y;
        if mask.get_pixel(gx, gy)[0] != 0 {
            *gray.get_pixel(gx, gy)
        } else {
            Luma([0u8])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_of(values: &[[u8; 3]; 3]) -> GrayImage {
        GrayImage::from_fn(3, 3, |x, y| Luma([values[y as usize][x as usize]]))
    }

    #[test]
    fn threshold_is_strictly_above() {
        let img = gray_of(&[[0, 100, 101], [100, 200, 100], [255, 0, 100]]);
        let mask = threshold_binary(&img, 100);
        assert_eq!(mask.get_pixel(1, 0)[0], 0); // == threshold stays out
        assert_eq!(mask.get_pixel(2, 0)[0], 255);
        assert_eq!(mask.get_pixel(0, 2)[0], 255);
    }

    #[test]
    fn diff_mask_handles_negative_differences() {
        let a = gray_of(&[[200, 10, 90], [0, 0, 0], [0, 0, 0]]);
        let b = gray_of(&[[100, 200, 10], [0, 0, 0], [0, 0, 0]]);
        let mask = channel_diff_mask(&a, &b, 80);
        assert_eq!(mask.get_pixel(0, 0)[0], 255); // 100 > 80
        assert_eq!(mask.get_pixel(1, 0)[0], 0); // -190, no wraparound
        assert_eq!(mask.get_pixel(2, 0)[0], 0); // 80 is not strictly above
    }

    #[test]
    fn and_requires_both_foreground() {
        let a = gray_of(&[[255, 255, 0], [0, 0, 0], [0, 0, 0]]);
        let b = gray_of(&[[255, 0, 255], [0, 0, 0], [0, 0, 0]]);
        let mask = mask_and(&a, &b);
        assert_eq!(mask.get_pixel(0, 0)[0], 255);
        assert_eq!(mask.get_pixel(1, 0)[0], 0);
        assert_eq!(mask.get_pixel(2, 0)[0], 0);
    }

    #[test]
    fn zero_kernel_close_is_identity() {
        let img = gray_of(&[[255, 0, 255], [0, 0, 0], [255, 0, 255]]);
        assert_eq!(close_mask(&img, 0), img);
    }

    #[test]
    fn close_fills_small_gaps() {
        let mut img = GrayImage::new(9, 9);
        for x in 2..=6 {
            for y in 2..=6 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
        img.put_pixel(4, 4, Luma([0u8]));
        let closed = close_mask(&img, 1);
        assert_eq!(closed.get_pixel(4, 4)[0], 255);
    }

    #[test]
    fn masked_region_zeroes_background() {
        let gray = gray_of(&[[10, 20, 30], [40, 50, 60], [70, 80, 90]]);
        let mask = gray_of(&[[255, 0, 255], [0, 255, 0], [0, 0, 0]]);
        let region = masked_region(&gray, &mask, Rect::new(0, 0, 2, 2));
        assert_eq!(region.dimensions(), (2, 2));
        assert_eq!(region.get_pixel(0, 0)[0], 10);
        assert_eq!(region.get_pixel(1, 0)[0], 0);
        assert_eq!(region.get_pixel(1, 1)[0], 50);
    }
}
