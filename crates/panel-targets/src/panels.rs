//! Candidate panel selection.

use std::collections::HashMap;

use panel_targets_core::{ContourHierarchy, DepthLimit};

use crate::element::Element;
use crate::params::{checked_ratio, PolicyError};

/// An [`Element`] that passed the panel-qualification test.
pub type CandidatePanel = Element;

/// Area and blank-ratio policy for panel qualification, validated on
/// construction.
#[derive(Clone, Copy, Debug)]
pub struct SelectPolicy {
    min_area: f64,
    max_area: f64,
    max_blank_ratio: f64,
}

impl SelectPolicy {
    pub fn new(min_area: f64, max_area: f64, max_blank_ratio: f64) -> Result<Self, PolicyError> {
        let min_area = checked_ratio("panel_min_area", min_area)?;
        let max_area = checked_ratio("panel_max_area", max_area)?;
        if min_area > max_area {
            return Err(PolicyError::AreaInterval {
                min: min_area,
                max: max_area,
            });
        }
        Ok(Self {
            min_area,
            max_area,
            max_blank_ratio: checked_ratio("blank_ratio", max_blank_ratio)?,
        })
    }
}

/// Filter the frame's elements down to candidate panels.
///
/// A panel qualifies when its area lies within the policy's closed interval
/// and no descendant contour (any depth) covers more than `max_blank_ratio`
/// of its area; a disproportionately large interior marks a panel that is
/// already lit rather than a pristine target. Pure filter: input order is
/// preserved and repeated runs yield identical output.
pub fn select_panels(
    elements: &[Element],
    hierarchy: &ContourHierarchy,
    policy: &SelectPolicy,
) -> Vec<CandidatePanel> {
    let areas: HashMap<usize, f64> = elements.iter().map(|e| (e.index, e.area)).collect();

    let mut panels = Vec::new();
    for element in elements {
        if element.area < policy.min_area || element.area > policy.max_area {
            continue;
        }
        let blank = hierarchy
            .collect_descendants(element.index, DepthLimit::Unbounded)
            .into_iter()
            .all(|descendant| match areas.get(&descendant) {
                Some(&area) => area / element.area <= policy.max_blank_ratio,
                // Degenerate descendants enclose no area.
                None => true,
            });
        if blank {
            panels.push(element.clone());
        }
    }
    panels
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;
    use panel_targets_core::{HierarchyEntry, RotatedRect};
    use panel_targets_contour::RectFeature;

    fn element(index: usize, area: f64) -> Element {
        let rectangle = RotatedRect {
            center: Point2::new(0.0, 0.0),
            width: 0.0,
            height: 0.0,
            angle: 0.0,
        };
        Element {
            index,
            feature: RectFeature::standardize(&rectangle),
            relationship: HierarchyEntry::default(),
            rectangle,
            area,
            points: Vec::new(),
            sibling_count: 1,
            child_sibling_count: 0,
            center: Point2::new(0, 0),
        }
    }

    fn policy(min: f64, max: f64, blank: f64) -> SelectPolicy {
        SelectPolicy::new(min, max, blank).unwrap()
    }

    #[test]
    fn rejects_invalid_intervals_and_ratios() {
        assert_eq!(
            SelectPolicy::new(100.0, 50.0, 0.1).unwrap_err(),
            PolicyError::AreaInterval {
                min: 100.0,
                max: 50.0
            }
        );
        assert!(SelectPolicy::new(0.0, 10.0, -0.5).is_err());
        assert!(SelectPolicy::new(f64::NAN, 10.0, 0.1).is_err());
    }

    #[test]
    fn area_bounds_are_inclusive() {
        let h = ContourHierarchy::from_parent_links(&[None, None, None, None]);
        let elements = vec![
            element(0, 1100.0),
            element(1, 2670.0),
            element(2, 1099.0),
            element(3, 2671.0),
        ];
        let panels = select_panels(&elements, &h, &policy(1100.0, 2670.0, 0.1));
        let kept: Vec<usize> = panels.iter().map(|p| p.index).collect();
        assert_eq!(kept, vec![0, 1]);
    }

    #[test]
    fn blank_ratio_boundary_is_inclusive() {
        // 0 contains 1; 2 contains 3.
        let h = ContourHierarchy::from_parent_links(&[None, Some(0), None, Some(2)]);
        let elements = vec![
            element(0, 1800.0),
            element(1, 180.0), // exactly 10% of the parent
            element(2, 1800.0),
            element(3, 181.0), // just above
        ];
        let panels = select_panels(&elements, &h, &policy(1100.0, 2670.0, 0.1));
        let kept: Vec<usize> = panels.iter().map(|p| p.index).collect();
        // 1 and 3 are below the minimum area themselves; 2 fails blank ratio.
        assert_eq!(kept, vec![0]);
    }

    #[test]
    fn clean_ring_panel_is_kept() {
        let h = ContourHierarchy::from_parent_links(&[None, Some(0)]);
        let elements = vec![element(0, 1800.0), element(1, 20.0)];
        let panels = select_panels(&elements, &h, &policy(1100.0, 2670.0, 0.1));
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].index, 0);
    }

    #[test]
    fn half_filled_panel_is_rejected() {
        let h = ContourHierarchy::from_parent_links(&[None, Some(0)]);
        let elements = vec![element(0, 1800.0), element(1, 900.0)];
        let panels = select_panels(&elements, &h, &policy(1100.0, 2670.0, 0.1));
        assert!(panels.is_empty());
    }

    #[test]
    fn deeply_nested_fill_is_still_seen() {
        // The oversized contour sits two levels down; only an unbounded
        // descendant walk can reject the panel.
        let h = ContourHierarchy::from_parent_links(&[None, Some(0), Some(1)]);
        let elements = vec![element(0, 1800.0), element(1, 60.0), element(2, 900.0)];
        let panels = select_panels(&elements, &h, &policy(1100.0, 2670.0, 0.1));
        assert!(panels.is_empty());
    }

    #[test]
    fn selection_is_idempotent_and_order_preserving() {
        let h = ContourHierarchy::from_parent_links(&[None, None, None]);
        let elements = vec![element(0, 2000.0), element(1, 1500.0), element(2, 1200.0)];
        let p = policy(1100.0, 2670.0, 0.1);
        let first = select_panels(&elements, &h, &p);
        let second = select_panels(&elements, &h, &p);
        let order: Vec<usize> = first.iter().map(|e| e.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(
            order,
            second.iter().map(|e| e.index).collect::<Vec<usize>>()
        );
    }
}
