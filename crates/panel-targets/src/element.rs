//! Per-contour working records for one frame.

use log::debug;
use nalgebra::Point2;

use panel_targets_core::{contour_centroid, HierarchyEntry, RotatedRect};
use panel_targets_contour::{min_area_rotated_rect, ContourSet, RectFeature};

/// Everything the selectors need to know about one contour. Built in a
/// single step from the extraction output and never mutated afterwards;
/// the record lives only as long as the frame's detection.
#[derive(Clone, Debug)]
pub struct Element {
    /// Index of the contour in the frame's extraction output.
    pub index: usize,
    /// Standardized minimum-area-rectangle descriptor (pass-through payload).
    pub feature: RectFeature,
    /// This contour's neighbor references in the containment forest.
    pub relationship: HierarchyEntry,
    /// Minimum-area rotated bounding rectangle.
    pub rectangle: RotatedRect,
    /// Enclosed contour area, non-negative.
    pub area: f64,
    /// Raw boundary points.
    pub points: Vec<Point2<i32>>,
    /// Size of this contour's sibling group (reference counting scheme).
    pub sibling_count: usize,
    /// Size of the first child's sibling group, 0 for childless contours.
    pub child_sibling_count: usize,
    /// Area-weighted centroid, rounded to pixel coordinates.
    pub center: Point2<i32>,
}

/// Build one [`Element`] per extracted contour.
///
/// Contours with no enclosed area have no centroid and cannot take part in
/// selection; they are skipped (their index simply never appears), which
/// keeps a bad speck from failing the whole frame.
pub fn build_elements(set: &ContourSet) -> Vec<Element> {
    let mut elements = Vec::with_capacity(set.len());
    for (index, contour) in set.contours.iter().enumerate() {
        let center = match contour_centroid(&contour.points) {
            Ok(center) => center,
            Err(err) => {
                debug!("skipping contour {index}: {err}");
                continue;
            }
        };
        let Some(&relationship) = set.hierarchy.entry(index) else {
            continue;
        };
        let rectangle = min_area_rotated_rect(&contour.points);
        elements.push(Element {
            index,
            feature: RectFeature::standardize(&rectangle),
            relationship,
            rectangle,
            area: contour.area,
            points: contour.points.clone(),
            sibling_count: set.hierarchy.sibling_group_count(index),
            child_sibling_count: relationship
                .first_child
                .map(|child| set.hierarchy.sibling_group_count(child as usize))
                .unwrap_or(0),
            center,
        });
    }
    elements
}
