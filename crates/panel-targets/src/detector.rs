//! The detection pipeline: masks, panel selection and target selection for
//! one frame.

use image::{GrayImage, Luma, Rgb, RgbImage};
use log::debug;
use nalgebra::Point2;

use panel_targets_core::Size;
use panel_targets_contour::{
    channel_diff_mask, close_mask, extract_contours, mask_and, masked_region, threshold_binary,
};

use crate::detect::{gray_to_rgb, split_channels};
use crate::element::build_elements;
use crate::panels::{select_panels, SelectPolicy};
use crate::params::{DetectParams, PolicyError};
use crate::render::{draw_contour, draw_cross};
use crate::targets::{select_target, CirclePolicy, PossibleTarget};

const PANEL_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const CIRCLE_COLOR: Rgb<u8> = Rgb([0, 255, 255]);
const TARGET_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Errors the detection surface can report.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error("RGB buffer length mismatch: expected {expected} bytes, got {got}")]
    InvalidRgbBuffer { expected: usize, got: usize },
    #[error("invalid frame dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// One named intermediate image, produced only when debug output is on.
#[derive(Clone, Debug)]
pub struct DebugView {
    pub label: String,
    pub image: RgbImage,
}

/// Detection output for one frame.
#[derive(Clone, Debug, Default)]
pub struct DetectionResult {
    pub targets: Vec<PossibleTarget>,
    pub debug_views: Vec<DebugView>,
}

/// Reusable detector: parameters are validated once here so the per-frame
/// path never fails on configuration.
#[derive(Clone, Debug)]
pub struct PanelDetector {
    params: DetectParams,
    select_policy: SelectPolicy,
    circle_policy: CirclePolicy,
}

impl PanelDetector {
    pub fn new(params: DetectParams) -> Result<Self, DetectError> {
        let select_policy = SelectPolicy::new(
            params.panel_min_area,
            params.panel_max_area,
            params.blank_ratio,
        )?;
        let circle_policy = CirclePolicy::new(params.circle_ratio)?;
        Ok(Self {
            params,
            select_policy,
            circle_policy,
        })
    }

    pub fn params(&self) -> &DetectParams {
        &self.params
    }

    /// Run the full pipeline on one frame.
    ///
    /// Frames with no qualifying panel, or panels with no qualifying circle,
    /// simply contribute nothing to `targets`; detection itself never fails.
    pub fn detect(&self, frame: &RgbImage) -> DetectionResult {
        let mut result = DetectionResult::default();
        let bounds = Size::new(frame.width() as i32, frame.height() as i32);

        let (red, _green, blue) = split_channels(frame);
        let color_mask = channel_diff_mask(&red, &blue, self.params.threshold_color);
        let value_mask = threshold_binary(&red, self.params.threshold_value);
        let closed = close_mask(&mask_and(&color_mask, &value_mask), self.params.close_kernel);

        let set = extract_contours(&closed);
        let elements = build_elements(&set);
        let panels = select_panels(&elements, &set.hierarchy, &self.select_policy);
        debug!(
            "frame {}x{}: {} contours, {} panels",
            frame.width(),
            frame.height(),
            set.len(),
            panels.len()
        );

        if self.params.debug {
            result.push_view("color mask", gray_to_rgb(&color_mask));
            result.push_view("value mask", gray_to_rgb(&value_mask));
            result.push_view("closed mask", gray_to_rgb(&closed));
            let mut view = frame.clone();
            for panel in &panels {
                draw_contour(&mut view, &panel.points, PANEL_COLOR);
            }
            result.push_view("candidate panels", view);
        }

        let gray = image::imageops::grayscale(frame);
        let mut circle_mask_view =
            self.params.debug.then(|| GrayImage::new(frame.width(), frame.height()));
        let mut circles_view = self.params.debug.then(|| frame.clone());

        for panel in &panels {
            let roi = panel.rectangle.bounding_rect().clamped_to(bounds);
            if roi.is_empty() {
                continue;
            }
            let region = masked_region(&gray, &closed, roi);
            let circle_mask = close_mask(
                &threshold_binary(&region, self.params.circle_value),
                self.params.close_kernel,
            );
            let interior = extract_contours(&circle_mask);
            debug!(
                "panel {} roi {:?}: {} interior contours",
                panel.index,
                roi,
                interior.len()
            );

            if let Some(view) = circle_mask_view.as_mut() {
                for (x, y, pixel) in circle_mask.enumerate_pixels() {
                    if pixel[0] != 0 {
                        view.put_pixel(roi.x as u32 + x, roi.y as u32 + y, Luma([255u8]));
                    }
                }
            }
            if let Some(view) = circles_view.as_mut() {
                let origin = roi.top_left();
                for contour in &interior.contours {
                    let shifted: Vec<Point2<i32>> = contour
                        .points
                        .iter()
                        .map(|p| Point2::new(p.x + origin.x, p.y + origin.y))
                        .collect();
                    draw_contour(view, &shifted, CIRCLE_COLOR);
                }
            }

            if let Some(target) =
                select_target(panel, &interior.contours, roi.top_left(), &self.circle_policy)
            {
                result.targets.push(PossibleTarget {
                    panel: panel.clone(),
                    target,
                });
            }
        }

        if self.params.debug {
            if let Some(view) = circles_view {
                result.push_view("candidate circles", view);
            }
            if let Some(view) = circle_mask_view {
                result.push_view("circle mask", gray_to_rgb(&view));
            }
            let mut view = frame.clone();
            for t in &result.targets {
                draw_cross(&mut view, t.target, 10, 3, TARGET_COLOR);
            }
            result.push_view("candidate targets", view);
        }

        debug!("detected {} targets", result.targets.len());
        result
    }
}

impl DetectionResult {
    fn push_view(&mut self, label: &str, image: RgbImage) {
        self.debug_views.push(DebugView {
            label: label.to_string(),
            image,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_errors_surface_at_construction() {
        let params = DetectParams {
            panel_min_area: 3000.0,
            panel_max_area: 1000.0,
            ..DetectParams::default()
        };
        assert!(matches!(
            PanelDetector::new(params).unwrap_err(),
            DetectError::Policy(PolicyError::AreaInterval { .. })
        ));
    }

    #[test]
    fn empty_frame_detects_nothing() {
        let detector = PanelDetector::new(DetectParams::default()).unwrap();
        let result = detector.detect(&RgbImage::new(64, 64));
        assert!(result.targets.is_empty());
        assert!(result.debug_views.is_empty());
    }

    #[test]
    fn debug_views_carry_stable_labels() {
        let params = DetectParams {
            debug: true,
            ..DetectParams::default()
        };
        let detector = PanelDetector::new(params).unwrap();
        let result = detector.detect(&RgbImage::new(32, 32));
        let labels: Vec<&str> = result.debug_views.iter().map(|v| v.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "color mask",
                "value mask",
                "closed mask",
                "candidate panels",
                "candidate circles",
                "circle mask",
                "candidate targets",
            ]
        );
    }
}
