//! Typography rules: sizes, line heights, measure, and type-scale hygiene.
//!
//! Scans only text elements. Per-element rules reference the offending
//! element; scale-diversity rules are document-level findings.

use crate::config::CritiqueConfig;
use crate::id::IdGen;
use crate::model::{CanvasElement, Category, DesignIssue, Severity, TextAttrs};
use std::collections::HashSet;

/// Run all typography rules and return the issues in rule order.
#[must_use]
pub fn analyze_typography(
    elements: &[CanvasElement],
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
) -> Vec<DesignIssue> {
    let mut issues = Vec::new();

    for el in elements {
        if let Some(text) = el.kind.as_text() {
            check_min_font_size(el, text, cfg, ids, &mut issues);
            check_line_height(el, text, cfg, ids, &mut issues);
            check_line_length(el, text, cfg, ids, &mut issues);
        }
    }

    check_font_family_diversity(elements, cfg, ids, &mut issues);
    check_font_size_diversity(elements, cfg, ids, &mut issues);

    issues
}

/// Body text under the minimum size is hard to read on most displays.
fn check_min_font_size(
    el: &CanvasElement,
    text: &TextAttrs,
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
    issues: &mut Vec<DesignIssue>,
) {
    if text.font_size < cfg.min_font_size {
        issues.push(DesignIssue {
            id: ids.next_id("issue"),
            severity: Severity::Warning,
            category: Category::Typography,
            message: format!(
                "Font size {}px is below the {}px minimum for body text",
                text.font_size, cfg.min_font_size
            ),
            element_id: Some(el.id),
            suggestion: format!("Raise the font size to at least {}px", cfg.min_font_size),
            auto_fixable: true,
        });
    }
}

/// Line height outside the comfortable band. Only fires when the host
/// declared one.
fn check_line_height(
    el: &CanvasElement,
    text: &TextAttrs,
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
    issues: &mut Vec<DesignIssue>,
) {
    let Some(lh) = text.line_height else { return };

    if lh < cfg.line_height_min {
        issues.push(DesignIssue {
            id: ids.next_id("issue"),
            severity: Severity::Info,
            category: Category::Typography,
            message: format!(
                "Line height {lh} is tight; body text reads best at {} or above",
                cfg.line_height_min
            ),
            element_id: Some(el.id),
            suggestion: format!("Raise the line height to {}", cfg.line_height_min),
            auto_fixable: true,
        });
    } else if lh > cfg.line_height_max {
        issues.push(DesignIssue {
            id: ids.next_id("issue"),
            severity: Severity::Info,
            category: Category::Typography,
            message: format!(
                "Line height {lh} is loose; lines drift apart above {}",
                cfg.line_height_max
            ),
            element_id: Some(el.id),
            suggestion: format!("Cap the line height at {}", cfg.line_height_max),
            auto_fixable: true,
        });
    }
}

/// Over-long measure. Characters per line are estimated from the box width
/// and an average glyph width of half the font size.
fn check_line_length(
    el: &CanvasElement,
    text: &TextAttrs,
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
    issues: &mut Vec<DesignIssue>,
) {
    if el.bounds.width <= 0.0 || text.content.is_empty() {
        return;
    }
    let chars_per_line = el.bounds.width / (text.font_size * 0.5);
    if chars_per_line > cfg.max_line_chars {
        issues.push(DesignIssue {
            id: ids.next_id("issue"),
            severity: Severity::Warning,
            category: Category::Typography,
            message: format!(
                "Estimated {:.0} characters per line exceeds the {:.0}-character measure",
                chars_per_line, cfg.max_line_chars
            ),
            element_id: Some(el.id),
            // Requires a container resize — a design decision, not a mechanical fix.
            suggestion: "Narrow the text container or split the content into columns".into(),
            auto_fixable: false,
        });
    }
}

/// Too many font families dilute the visual voice of a document.
fn check_font_family_diversity(
    elements: &[CanvasElement],
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
    issues: &mut Vec<DesignIssue>,
) {
    let families: HashSet<&str> = elements
        .iter()
        .filter_map(|el| el.kind.as_text())
        .map(|t| t.font_family.as_str())
        .collect();

    if families.len() > cfg.max_font_families {
        issues.push(DesignIssue {
            id: ids.next_id("issue"),
            severity: Severity::Warning,
            category: Category::Typography,
            message: format!(
                "{} font families in use; more than {} fragments the design",
                families.len(),
                cfg.max_font_families
            ),
            element_id: None,
            suggestion: format!(
                "Consolidate to at most {} families (e.g. one for headings, one for body)",
                cfg.max_font_families
            ),
            auto_fixable: false,
        });
    }
}

/// A sprawling set of font sizes signals a missing type scale.
fn check_font_size_diversity(
    elements: &[CanvasElement],
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
    issues: &mut Vec<DesignIssue>,
) {
    // Distinctness by exact bit pattern — sizes are host-declared literals.
    let sizes: HashSet<u32> = elements
        .iter()
        .filter_map(|el| el.kind.as_text())
        .map(|t| t.font_size.to_bits())
        .collect();

    if sizes.len() > cfg.max_font_sizes {
        issues.push(DesignIssue {
            id: ids.next_id("issue"),
            severity: Severity::Info,
            category: Category::Typography,
            message: format!(
                "{} distinct font sizes in use; a type scale usually needs at most {}",
                sizes.len(),
                cfg.max_font_sizes
            ),
            element_id: None,
            suggestion: "Adopt a fixed type scale and map each text style onto it".into(),
            auto_fixable: false,
        });
    }
}
