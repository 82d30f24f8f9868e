//! Binary-mask preprocessing and contour extraction.
//!
//! This crate sits between raw image buffers and the purely geometric
//! `panel-targets-core`: it turns color planes into binary masks, closes
//! them morphologically, and extracts contours together with their full
//! containment hierarchy (tree retrieval, every border pixel kept).

mod extract;
mod mask;
mod shape;

pub use extract::{extract_contours, BorderKind, ContourSet, ExtractedContour};
pub use mask::{channel_diff_mask, close_mask, mask_and, masked_region, threshold_binary};
pub use shape::{min_area_rotated_rect, RectFeature};
