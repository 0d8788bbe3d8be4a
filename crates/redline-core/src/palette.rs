//! Color palette rules: palette size and near-duplicate colors.
//!
//! Colors are compared as the host declared them, first-seen order, so
//! issue output is deterministic for a given element list.

use crate::color::{Rgb, similarity};
use crate::config::CritiqueConfig;
use crate::id::IdGen;
use crate::model::{CanvasElement, Category, DesignIssue, Severity};

/// Run all palette rules and return the issues in rule order.
#[must_use]
pub fn analyze_palette(
    elements: &[CanvasElement],
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
) -> Vec<DesignIssue> {
    let mut issues = Vec::new();
    let palette = collect_palette(elements);

    if palette.len() > cfg.max_palette_size {
        issues.push(DesignIssue {
            id: ids.next_id("issue"),
            severity: Severity::Warning,
            category: Category::Color,
            message: format!(
                "{} distinct colors in use; cohesive palettes stay at or under {}",
                palette.len(),
                cfg.max_palette_size
            ),
            element_id: None,
            suggestion: "Constrain the palette to a small set of named colors".into(),
            auto_fixable: false,
        });
    }

    check_near_duplicates(&palette, cfg, ids, &mut issues);

    issues
}

/// Distinct fill and stroke strings across the document, in first-seen
/// order. Linear scan keeps order stable; palettes are small.
fn collect_palette(elements: &[CanvasElement]) -> Vec<String> {
    let mut palette: Vec<String> = Vec::new();
    for el in elements {
        for color in [&el.paint.fill, &el.paint.stroke].into_iter().flatten() {
            if !palette.iter().any(|c| c == color) {
                palette.push(color.clone());
            }
        }
    }
    palette
}

/// Pairs of colors that are visually close but not identical usually mean
/// one of them drifted. Deciding which is intended needs a human.
fn check_near_duplicates(
    palette: &[String],
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
    issues: &mut Vec<DesignIssue>,
) {
    for (i, a) in palette.iter().enumerate() {
        for b in &palette[i + 1..] {
            let s = similarity(Rgb::parse_or_black(a), Rgb::parse_or_black(b));
            if s > cfg.similarity_low && s < cfg.similarity_high {
                issues.push(DesignIssue {
                    id: ids.next_id("issue"),
                    severity: Severity::Info,
                    category: Category::Color,
                    message: format!(
                        "Colors {a} and {b} are {:.0}% similar, possibly an unintended variant",
                        s * 100.0
                    ),
                    element_id: None,
                    suggestion: format!("Merge {a} and {b} if the difference is unintentional"),
                    auto_fixable: false,
                });
            }
        }
    }
}
