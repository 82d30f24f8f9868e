//! Overlay drawing for debug views.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as IpRect;
use nalgebra::Point2;

use panel_targets_core::{Rect, Size};

fn image_bounds(image: &RgbImage) -> Size {
    Size::new(image.width() as i32, image.height() as i32)
}

fn fill_rect(image: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    let rect = rect.clamped_to(image_bounds(image));
    if rect.is_empty() {
        return;
    }
    draw_filled_rect_mut(
        image,
        IpRect::at(rect.x, rect.y).of_size(rect.width as u32, rect.height as u32),
        color,
    );
}

/// Plot every boundary point of a contour as a small dab so the outline
/// stays visible at typical viewing scales.
pub fn draw_contour(image: &mut RgbImage, points: &[Point2<i32>], color: Rgb<u8>) {
    for p in points {
        fill_rect(image, Rect::new(p.x - 1, p.y - 1, 3, 3), color);
    }
}

/// Mark a position with a cross made of two filled bars, `arm` pixels from
/// the center to each tip and `thickness` pixels wide.
pub fn draw_cross(image: &mut RgbImage, at: Point2<i32>, arm: i32, thickness: i32, color: Rgb<u8>) {
    let half = thickness / 2;
    fill_rect(
        image,
        Rect::new(at.x - arm, at.y - half, 2 * arm + 1, thickness),
        color,
    );
    fill_rect(
        image,
        Rect::new(at.x - half, at.y - arm, thickness, 2 * arm + 1),
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    #[test]
    fn cross_paints_center_and_arm_tips() {
        let mut img = RgbImage::new(32, 32);
        draw_cross(&mut img, Point2::new(16, 16), 5, 2, RED);
        assert_eq!(*img.get_pixel(16, 16), RED);
        assert_eq!(*img.get_pixel(11, 16), RED);
        assert_eq!(*img.get_pixel(21, 16), RED);
        assert_eq!(*img.get_pixel(16, 11), RED);
        assert_eq!(*img.get_pixel(16, 21), RED);
        assert_eq!(*img.get_pixel(10, 10), Rgb([0, 0, 0]));
    }

    #[test]
    fn cross_near_edge_is_clipped_not_panicking() {
        let mut img = RgbImage::new(16, 16);
        draw_cross(&mut img, Point2::new(0, 0), 8, 3, RED);
        draw_cross(&mut img, Point2::new(15, 15), 8, 3, RED);
        assert_eq!(*img.get_pixel(0, 0), RED);
        assert_eq!(*img.get_pixel(15, 15), RED);
    }

    #[test]
    fn cross_fully_outside_is_a_noop() {
        let mut img = RgbImage::new(8, 8);
        draw_cross(&mut img, Point2::new(-20, -20), 3, 1, RED);
        assert!(img.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn contour_points_are_dabbed() {
        let mut img = RgbImage::new(16, 16);
        draw_contour(&mut img, &[Point2::new(8, 8)], RED);
        for y in 7..=9 {
            for x in 7..=9 {
                assert_eq!(*img.get_pixel(x, y), RED);
            }
        }
    }
}
