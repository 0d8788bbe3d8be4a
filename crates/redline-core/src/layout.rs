//! Layout rules: near-miss alignment and partial overlaps.
//!
//! Alignment compares top-left coordinates only — elements whose edges sit
//! within a few pixels of lining up were almost certainly meant to line
//! up. Center/edge alignment is deliberately not inferred; with no layout
//! intent in the data, raw positions are the only trustworthy signal.

use crate::config::CritiqueConfig;
use crate::id::IdGen;
use crate::model::{CanvasElement, Category, DesignIssue, Severity};

/// Run all layout rules and return the issues in rule order.
#[must_use]
pub fn analyze_layout(
    elements: &[CanvasElement],
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
) -> Vec<DesignIssue> {
    let mut issues = Vec::new();
    check_near_alignment(elements, cfg, ids, &mut issues);
    check_partial_overlaps(elements, cfg, ids, &mut issues);
    issues
}

/// Count pairs whose coordinates differ by at most the tolerance on each
/// axis, and emit one warning per axis (snapping them is mechanical).
fn check_near_alignment(
    elements: &[CanvasElement],
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
    issues: &mut Vec<DesignIssue>,
) {
    let xs: Vec<f32> = elements.iter().map(|el| el.bounds.x).collect();
    let ys: Vec<f32> = elements.iter().map(|el| el.bounds.y).collect();

    for (axis, positions) in [("x", xs), ("y", ys)] {
        let mut near_misses = 0usize;
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                let diff = (a - b).abs();
                if diff > 0.0 && diff <= cfg.near_align_tolerance {
                    near_misses += 1;
                }
            }
        }
        if near_misses > 0 {
            issues.push(DesignIssue {
                id: ids.next_id("issue"),
                severity: Severity::Warning,
                category: Category::Alignment,
                message: format!(
                    "{near_misses} element pair(s) are within {}px of aligning on the \
                     {axis} axis without matching",
                    cfg.near_align_tolerance
                ),
                element_id: None,
                suggestion: format!("Snap the near-aligned elements to a shared {axis} position"),
                auto_fixable: true,
            });
        }
    }
}

/// Overlaps covering neither a sliver nor nearly all of the smaller
/// element look accidental. Full containment (badges, labels on cards) and
/// tiny grazes are left alone.
fn check_partial_overlaps(
    elements: &[CanvasElement],
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
    issues: &mut Vec<DesignIssue>,
) {
    for (i, a) in elements.iter().enumerate() {
        for b in &elements[i + 1..] {
            if !a.bounds.intersects(&b.bounds) {
                continue;
            }
            let overlap = a.bounds.overlap_area(&b.bounds);
            let smaller = a.bounds.area().min(b.bounds.area());
            if smaller <= 0.0 {
                continue;
            }
            let fraction = overlap / smaller;
            if fraction >= cfg.overlap_low && fraction <= cfg.overlap_high {
                issues.push(DesignIssue {
                    id: ids.next_id("issue"),
                    severity: Severity::Info,
                    category: Category::Layout,
                    message: format!(
                        "Elements {} and {} overlap by {:.0}% of the smaller element",
                        a.id,
                        b.id,
                        fraction * 100.0
                    ),
                    element_id: Some(a.id),
                    suggestion: "Separate the elements or commit to full containment".into(),
                    auto_fixable: false,
                });
            }
        }
    }
}
