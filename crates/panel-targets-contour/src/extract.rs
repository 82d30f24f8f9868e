//! Contour extraction with full containment hierarchy.
//!
//! Border following keeps every boundary pixel (no polyline simplification)
//! and reports parent links for outer borders and holes alike; the flat
//! parent links are rebuilt into the explicit forest from
//! `panel-targets-core`.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use panel_targets_core::{contour_area, ContourHierarchy};

/// Which side of a region a border traces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderKind {
    /// Outline of a foreground region.
    Outer,
    /// Outline of a hole inside a foreground region.
    Hole,
}

/// One extracted contour: ordered boundary pixels plus its enclosed area.
#[derive(Clone, Debug)]
pub struct ExtractedContour {
    pub points: Vec<Point2<i32>>,
    pub border: BorderKind,
    pub area: f64,
}

/// All contours of one mask together with their containment forest.
/// Contour indices in the hierarchy refer to positions in `contours`.
#[derive(Clone, Debug, Default)]
pub struct ContourSet {
    pub contours: Vec<ExtractedContour>,
    pub hierarchy: ContourHierarchy,
}

impl ContourSet {
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }
}

/// Extract every contour of a binary mask (foreground = nonzero) in tree
/// retrieval mode: parents, children and sibling chains are all preserved.
pub fn extract_contours(mask: &GrayImage) -> ContourSet {
    let raw = find_contours::<i32>(mask);
    let parents: Vec<Option<usize>> = raw.iter().map(|c| c.parent).collect();
    let hierarchy = ContourHierarchy::from_parent_links(&parents);

    let contours = raw
        .into_iter()
        .map(|c| {
            let points: Vec<Point2<i32>> =
                c.points.iter().map(|p| Point2::new(p.x, p.y)).collect();
            let area = contour_area(&points);
            ExtractedContour {
                points,
                border: match c.border_type {
                    BorderType::Outer => BorderKind::Outer,
                    BorderType::Hole => BorderKind::Hole,
                },
                area,
            }
        })
        .collect();

    ContourSet {
        contours,
        hierarchy,
    }
}
