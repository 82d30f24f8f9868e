//! Circular target selection inside one candidate panel.

use log::debug;
use nalgebra::Point2;

use panel_targets_core::{circularity_deviation, contour_centroid};
use panel_targets_contour::ExtractedContour;

use crate::element::Element;
use crate::panels::CandidatePanel;
use crate::params::{checked_ratio, PolicyError};

/// Circularity gate for interior contours, validated on construction.
#[derive(Clone, Copy, Debug)]
pub struct CirclePolicy {
    max_deviation: f64,
}

impl CirclePolicy {
    pub fn new(max_deviation: f64) -> Result<Self, PolicyError> {
        Ok(Self {
            max_deviation: checked_ratio("circle_ratio", max_deviation)?,
        })
    }
}

/// One accepted detection: a qualified panel paired with the pixel position
/// of its aiming circle in frame coordinates.
#[derive(Clone, Debug)]
pub struct PossibleTarget {
    pub panel: Element,
    pub target: Point2<i32>,
}

/// Pick the target circle among the interior contours of one panel.
///
/// Contours whose circularity deviation exceeds the policy's maximum are
/// dropped; among the survivors the one whose centroid lies nearest the
/// panel's own centroid wins. Distances are compared strictly, so an exact
/// tie keeps the first survivor encountered. Returns `None` when nothing
/// survives the gate.
///
/// Interior contours are extracted in a region-of-interest crop, so their
/// centroids are translated by `roi_origin` back into frame coordinates
/// before the distance comparison.
pub fn select_target(
    panel: &CandidatePanel,
    interior: &[ExtractedContour],
    roi_origin: Point2<i32>,
    policy: &CirclePolicy,
) -> Option<Point2<i32>> {
    let mut best: Option<(i64, Point2<i32>)> = None;
    for (index, contour) in interior.iter().enumerate() {
        let center = match contour_centroid(&contour.points) {
            Ok(center) => center,
            Err(err) => {
                debug!("skipping interior contour {index}: {err}");
                continue;
            }
        };
        let deviation = match circularity_deviation(&contour.points) {
            Ok(deviation) => deviation,
            Err(err) => {
                debug!("skipping interior contour {index}: {err}");
                continue;
            }
        };
        if deviation > policy.max_deviation {
            continue;
        }
        let center = Point2::new(center.x + roi_origin.x, center.y + roi_origin.y);
        let dx = (center.x - panel.center.x) as i64;
        let dy = (center.y - panel.center.y) as i64;
        let distance = dx * dx + dy * dy;
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, center));
        }
    }
    best.map(|(_, center)| center)
}
