//! Serializable per-frame detection records.

use serde::{Deserialize, Serialize};

use crate::targets::PossibleTarget;

/// One detected target, flattened for reporting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetRecord {
    pub panel_index: usize,
    pub panel_center: [i32; 2],
    pub panel_area: f64,
    pub target: [i32; 2],
}

impl From<&PossibleTarget> for TargetRecord {
    fn from(t: &PossibleTarget) -> Self {
        Self {
            panel_index: t.panel.index,
            panel_center: [t.panel.center.x, t.panel.center.y],
            panel_area: t.panel.area,
            target: [t.target.x, t.target.y],
        }
    }
}

/// Detection summary for one frame, identified by the caller's label
/// (a file name or frame number).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub frame: String,
    pub targets: Vec<TargetRecord>,
}

impl FrameReport {
    pub fn new(frame: impl Into<String>, targets: &[PossibleTarget]) -> Self {
        Self {
            frame: frame.into(),
            targets: targets.iter().map(TargetRecord::from).collect(),
        }
    }
}
