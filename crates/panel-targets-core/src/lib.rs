//! Core geometry and contour-hierarchy types for panel target detection.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete image type or contour extractor: contours are
//! plain integer point sequences and the containment hierarchy is an
//! explicit forest over contour indices.

mod hierarchy;
mod logger;
mod moments;
mod rect;

pub use hierarchy::{
    ContourHierarchy, DepthLimit, HierarchyEntry, HierarchyError,
};
pub use logger::init_with_level;
pub use moments::{circularity_deviation, contour_area, contour_centroid, GeometryError};
pub use rect::{Rect, RotatedRect, Size};
