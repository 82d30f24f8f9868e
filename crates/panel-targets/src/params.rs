//! Detection configuration and policy validation.

use serde::{Deserialize, Serialize};

/// Caller-configuration mistakes, rejected at the policy-acceptance boundary
/// rather than mid-traversal.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    #[error("invalid panel area interval: min {min} > max {max}")]
    AreaInterval { min: f64, max: f64 },
    #[error("{name} must be a non-negative finite number, got {value}")]
    InvalidRatio { name: &'static str, value: f64 },
}

pub(crate) fn checked_ratio(name: &'static str, value: f64) -> Result<f64, PolicyError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PolicyError::InvalidRatio { name, value });
    }
    Ok(value)
}

/// All tunable knobs of the detection pipeline.
///
/// The defaults are the tuning the detector ships with for the reference
/// footage; real deployments override them per camera and lighting setup.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectParams {
    /// Threshold on the red-minus-blue plane for the color mask.
    pub threshold_color: i16,
    /// Threshold on the red plane for the value mask.
    pub threshold_value: u8,
    /// Radius of the morphological closing kernel; 0 disables closing.
    pub close_kernel: u8,
    /// Inclusive lower bound on a candidate panel's contour area.
    pub panel_min_area: f64,
    /// Inclusive upper bound on a candidate panel's contour area.
    pub panel_max_area: f64,
    /// Maximum circularity deviation for an interior contour to count as a
    /// circle (lower deviation is more circular).
    pub circle_ratio: f64,
    /// Maximum area fraction any descendant contour may cover relative to
    /// its panel; larger interiors mark the panel as already active.
    pub blank_ratio: f64,
    /// Grayscale threshold for the interior circle search.
    pub circle_value: u8,
    /// Produce named intermediate views alongside the detection result.
    pub debug: bool,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            threshold_color: 80,
            threshold_value: 200,
            close_kernel: 4,
            panel_min_area: 1100.0,
            panel_max_area: 2670.0,
            circle_ratio: 3.08,
            blank_ratio: 0.10,
            circle_value: 170,
            debug: false,
        }
    }
}
