//! Detection of circular aiming targets embedded in colored panels.
//!
//! The pipeline thresholds a color frame into a binary mask, extracts
//! contours with their containment hierarchy, qualifies panel-sized blank
//! contours, and then searches each panel's interior for the most central
//! circular contour. [`PanelDetector`] is the entry point; the geometric and
//! contour layers are re-exported for callers that want the pieces.

pub use panel_targets_contour as contour;
pub use panel_targets_core as core;

mod detect;
mod detector;
mod element;
mod panels;
mod params;
mod render;
mod report;
mod targets;

pub use detect::{detect_rgb_u8, gray_to_rgb, rgb_image_from_slice, split_channels};
pub use detector::{DebugView, DetectError, DetectionResult, PanelDetector};
pub use element::{build_elements, Element};
pub use panels::{select_panels, CandidatePanel, SelectPolicy};
pub use params::{DetectParams, PolicyError};
pub use render::{draw_contour, draw_cross};
pub use report::{FrameReport, TargetRecord};
pub use targets::{select_target, CirclePolicy, PossibleTarget};
