//! Spacing rules: grid discipline and gap consistency.
//!
//! Positions and dimensions should sit on the grid; gaps between
//! neighboring elements should reuse a small set of sizes. The pairwise
//! gap scan is O(n²) — fine for the tens-to-hundreds of elements a real
//! scene carries, and it keeps the pass deterministic and allocation-light.

use crate::config::CritiqueConfig;
use crate::id::IdGen;
use crate::model::{Bounds, CanvasElement, Category, DesignIssue, Severity};
use std::collections::HashSet;

/// Run all spacing rules and return the issues in rule order.
#[must_use]
pub fn analyze_spacing(
    elements: &[CanvasElement],
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
) -> Vec<DesignIssue> {
    let mut issues = Vec::new();

    for el in elements {
        check_grid_position(el, cfg, ids, &mut issues);
        check_grid_size(el, cfg, ids, &mut issues);
    }

    check_gap_consistency(elements, cfg, ids, &mut issues);

    issues
}

fn off_grid(v: f32, unit: f32) -> bool {
    v % unit != 0.0
}

fn snap(v: f32, unit: f32) -> f32 {
    (v / unit).round() * unit
}

/// Position not on the grid — mechanically snappable.
fn check_grid_position(
    el: &CanvasElement,
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
    issues: &mut Vec<DesignIssue>,
) {
    let unit = cfg.grid_unit;
    let Bounds { x, y, .. } = el.bounds;
    if off_grid(x, unit) || off_grid(y, unit) {
        issues.push(DesignIssue {
            id: ids.next_id("issue"),
            severity: Severity::Info,
            category: Category::Spacing,
            message: format!("Position ({x}, {y}) is off the {unit}px grid"),
            element_id: Some(el.id),
            suggestion: format!("Snap to ({}, {})", snap(x, unit), snap(y, unit)),
            auto_fixable: true,
        });
    }
}

/// Dimensions not on the grid — reported separately from position so a
/// host can fix one without the other.
fn check_grid_size(
    el: &CanvasElement,
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
    issues: &mut Vec<DesignIssue>,
) {
    let unit = cfg.grid_unit;
    let Bounds { width, height, .. } = el.bounds;
    if off_grid(width, unit) || off_grid(height, unit) {
        issues.push(DesignIssue {
            id: ids.next_id("issue"),
            severity: Severity::Info,
            category: Category::Spacing,
            message: format!("Size {width}×{height} is off the {unit}px grid"),
            element_id: Some(el.id),
            suggestion: format!("Resize to {}×{}", snap(width, unit), snap(height, unit)),
            auto_fixable: true,
        });
    }
}

/// Gap between two boxes along one axis, 0 when they overlap on it.
fn axis_gap(a_start: f32, a_end: f32, b_start: f32, b_end: f32) -> f32 {
    if a_end <= b_start {
        b_start - a_end
    } else if b_end <= a_start {
        a_start - b_end
    } else {
        0.0
    }
}

/// Count the distinct grid-snapped gap sizes between neighboring elements,
/// per direction, and warn when the set sprawls.
fn check_gap_consistency(
    elements: &[CanvasElement],
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
    issues: &mut Vec<DesignIssue>,
) {
    let mut horizontal: Vec<f32> = Vec::new();
    let mut vertical: Vec<f32> = Vec::new();

    for (i, a) in elements.iter().enumerate() {
        for b in &elements[i + 1..] {
            // Horizontal gap only matters while the boxes share vertical extent.
            if a.bounds.y < b.bounds.bottom() && b.bounds.y < a.bounds.bottom() {
                let gap = axis_gap(a.bounds.x, a.bounds.right(), b.bounds.x, b.bounds.right());
                if gap > 0.0 && gap < cfg.gap_scan_limit {
                    horizontal.push(gap);
                }
            }
            if a.bounds.x < b.bounds.right() && b.bounds.x < a.bounds.right() {
                let gap = axis_gap(a.bounds.y, a.bounds.bottom(), b.bounds.y, b.bounds.bottom());
                if gap > 0.0 && gap < cfg.gap_scan_limit {
                    vertical.push(gap);
                }
            }
        }
    }

    for (direction, gaps) in [("horizontal", horizontal), ("vertical", vertical)] {
        let distinct: HashSet<i64> = gaps
            .iter()
            .map(|g| (g / cfg.grid_unit).round() as i64)
            .collect();
        if distinct.len() > cfg.max_gap_variants {
            issues.push(DesignIssue {
                id: ids.next_id("issue"),
                severity: Severity::Warning,
                category: Category::Spacing,
                message: format!(
                    "{} distinct {direction} gap sizes between elements; consistent \
                     spacing uses at most {}",
                    distinct.len(),
                    cfg.max_gap_variants
                ),
                element_id: None,
                suggestion: format!(
                    "Standardize {direction} gaps on a few multiples of {}px",
                    cfg.grid_unit
                ),
                auto_fixable: false,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIds;
    use crate::model::ElementKind;

    fn rect(id: &str, x: f32, y: f32, w: f32, h: f32) -> CanvasElement {
        CanvasElement::new(id, ElementKind::Rect, Bounds::new(x, y, w, h))
    }

    fn run(elements: &[CanvasElement]) -> Vec<DesignIssue> {
        analyze_spacing(elements, &CritiqueConfig::default(), &SequentialIds::new())
    }

    #[test]
    fn off_grid_position_and_size_are_separate_issues() {
        let issues = run(&[rect("box", 13.0, 22.0, 50.0, 50.0)]);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Info));
        assert!(issues.iter().all(|i| i.auto_fixable));
        // Suggestion names the nearest snapped coordinates
        assert!(issues[0].suggestion.contains("(16, 24)"));
        assert!(issues[1].suggestion.contains("48×48"));
    }

    #[test]
    fn on_grid_element_is_clean() {
        assert!(run(&[rect("box", 16.0, 24.0, 48.0, 48.0)]).is_empty());
    }

    #[test]
    fn gap_sprawl_warns_per_direction() {
        // A row of boxes sharing vertical extent with four distinct gaps:
        // 8, 24, 40, 56 — all on-grid so only the consistency rule fires.
        let mut els = vec![rect("a", 0.0, 0.0, 40.0, 40.0)];
        let mut x = 40.0;
        for (i, gap) in [8.0, 24.0, 40.0, 56.0].iter().enumerate() {
            x += gap;
            els.push(rect(&format!("b{i}"), x, 0.0, 40.0, 40.0));
            x += 40.0;
        }
        let issues = run(&els);
        let gap_warnings: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .collect();
        assert_eq!(gap_warnings.len(), 1);
        assert!(gap_warnings[0].message.contains("horizontal"));
        assert_eq!(gap_warnings[0].element_id, None);
    }

    #[test]
    fn consistent_gaps_are_clean() {
        // Column with a uniform 16px gap
        let els = [
            rect("a", 0.0, 0.0, 80.0, 40.0),
            rect("b", 0.0, 56.0, 80.0, 40.0),
            rect("c", 0.0, 112.0, 80.0, 40.0),
        ];
        assert!(run(&els).is_empty());
    }

    #[test]
    fn distant_elements_do_not_count_as_gaps() {
        // 400px apart — beyond the scan limit, unrelated elements
        let els = [
            rect("a", 0.0, 0.0, 40.0, 40.0),
            rect("b", 440.0, 0.0, 40.0, 40.0),
        ];
        assert!(run(&els).is_empty());
    }
}
