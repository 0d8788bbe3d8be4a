//! Accessibility rules: alt text, touch targets, and WCAG text contrast.
//!
//! Contrast needs a background color, but the element list carries no
//! parent pointers or z-order. The background is recovered geometrically:
//! the smallest filled element fully enclosing the text box. That matches
//! how editors actually stack content and degrades to white (the canvas)
//! when nothing encloses the text.

use crate::color::{Rgb, contrast_ratio};
use crate::config::CritiqueConfig;
use crate::id::IdGen;
use crate::model::{CanvasElement, Category, DesignIssue, ElementKind, Severity, TextAttrs};

/// Run all accessibility rules and return the issues in rule order.
#[must_use]
pub fn analyze_accessibility(
    elements: &[CanvasElement],
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
) -> Vec<DesignIssue> {
    let mut issues = Vec::new();

    for el in elements {
        match &el.kind {
            ElementKind::Image(img) => {
                if img.alt.as_deref().is_none_or(str::is_empty) {
                    issues.push(missing_alt_text(el, ids));
                }
            }
            ElementKind::Rect | ElementKind::Ellipse => {
                check_touch_target(el, cfg, ids, &mut issues);
            }
            ElementKind::Text(text) => {
                check_contrast(el, text, elements, cfg, ids, &mut issues);
            }
            _ => {}
        }
    }

    issues
}

/// Images without alt text are invisible to screen readers. Writing the
/// text needs a human, so this is never auto-fixable.
fn missing_alt_text(el: &CanvasElement, ids: &dyn IdGen) -> DesignIssue {
    DesignIssue {
        id: ids.next_id("issue"),
        severity: Severity::Error,
        category: Category::Accessibility,
        message: "Image is missing alt text".into(),
        element_id: Some(el.id),
        suggestion: "Add alt text describing what the image conveys".into(),
        auto_fixable: false,
    }
}

/// Interactive shapes below the minimum touch target are hard to hit.
fn check_touch_target(
    el: &CanvasElement,
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
    issues: &mut Vec<DesignIssue>,
) {
    let min = cfg.min_touch_target;
    let (w, h) = (el.bounds.width, el.bounds.height);
    if w < min || h < min {
        issues.push(DesignIssue {
            id: ids.next_id("issue"),
            severity: Severity::Warning,
            category: Category::Accessibility,
            message: format!("Target area {w}×{h} is below the {min}×{min} touch minimum"),
            element_id: Some(el.id),
            suggestion: format!("Resize to at least {min}×{min}"),
            auto_fixable: true,
        });
    }
}

/// WCAG contrast check for text with a declared fill.
///
/// Failing AA is an error with both ratios in the message; passing AA but
/// not AAA is informational. Color choice is a design decision, so neither
/// is auto-fixable.
fn check_contrast(
    el: &CanvasElement,
    text: &TextAttrs,
    elements: &[CanvasElement],
    cfg: &CritiqueConfig,
    ids: &dyn IdGen,
    issues: &mut Vec<DesignIssue>,
) {
    let Some(fill) = el.paint.fill.as_deref() else {
        return;
    };
    let foreground = Rgb::parse_or_black(fill);
    let background = resolve_background(el, elements);
    let ratio = contrast_ratio(foreground, background);

    let large = text.font_size >= cfg.large_text_size
        || (text.font_size >= cfg.large_text_bold_size && text.font_weight.is_bold());
    let (required_aa, required_aaa) = if large {
        (cfg.contrast_aa_large, cfg.contrast_aaa_large)
    } else {
        (cfg.contrast_aa_normal, cfg.contrast_aaa_normal)
    };

    if ratio < required_aa {
        issues.push(DesignIssue {
            id: ids.next_id("issue"),
            severity: Severity::Error,
            category: Category::Accessibility,
            message: format!(
                "Text contrast ratio {ratio:.2} is below the required {required_aa:.1} (WCAG AA)"
            ),
            element_id: Some(el.id),
            suggestion: "Darken the text or lighten the background until the ratio clears AA"
                .into(),
            auto_fixable: false,
        });
    } else if ratio < required_aaa {
        issues.push(DesignIssue {
            id: ids.next_id("issue"),
            severity: Severity::Info,
            category: Category::Accessibility,
            message: format!(
                "Text contrast ratio {ratio:.2} passes AA but not AAA ({required_aaa:.1})"
            ),
            element_id: Some(el.id),
            suggestion: "Increase contrast if this text is essential reading".into(),
            auto_fixable: false,
        });
    }
}

/// Effective background: the smallest filled element whose box fully
/// contains `el`, defaulting to the white canvas.
fn resolve_background(el: &CanvasElement, elements: &[CanvasElement]) -> Rgb {
    let mut best: Option<(&CanvasElement, f32)> = None;
    for candidate in elements {
        if candidate.id == el.id || candidate.paint.fill.is_none() {
            continue;
        }
        if candidate.bounds.contains_box(&el.bounds) {
            let area = candidate.bounds.area();
            if best.is_none_or(|(_, best_area)| area < best_area) {
                best = Some((candidate, area));
            }
        }
    }

    match best.and_then(|(c, _)| c.paint.fill.as_deref()) {
        Some(fill) => Rgb::parse_or_black(fill),
        None => Rgb::WHITE,
    }
}
