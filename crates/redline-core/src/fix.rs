//! Auto-fix passes that mutate elements in place.
//!
//! Each pass has a single responsibility and is safe to compose; together
//! they resolve exactly the findings the analyzers mark `auto_fixable`.
//! Everything needing human judgment (contrast, alt text, palette,
//! overlaps) is untouched. All passes are idempotent.

use crate::config::CritiqueConfig;
use crate::model::{CanvasElement, ElementKind};

/// Apply every mechanical fix pass with the given policy.
///
/// Grid snapping runs last: growing a touch target and then snapping keeps
/// the result both on-grid and at or above the minimum, which also makes
/// the composition idempotent.
pub fn apply_auto_fixes(elements: &mut [CanvasElement], cfg: &CritiqueConfig) {
    enforce_min_font_size(elements, cfg.min_font_size);
    clamp_line_height(elements, cfg.line_height_min, cfg.line_height_max);
    enforce_touch_targets(elements, cfg.min_touch_target);
    snap_to_grid(elements, cfg.grid_unit);
}

/// Round every position and dimension to the nearest grid multiple.
pub fn snap_to_grid(elements: &mut [CanvasElement], unit: f32) {
    let snap = |v: f32| (v / unit).round() * unit;
    for el in elements {
        el.bounds.x = snap(el.bounds.x);
        el.bounds.y = snap(el.bounds.y);
        el.bounds.width = snap(el.bounds.width);
        el.bounds.height = snap(el.bounds.height);
    }
}

/// Raise undersized text to the minimum body size.
pub fn enforce_min_font_size(elements: &mut [CanvasElement], min: f32) {
    for el in elements {
        if let ElementKind::Text(text) = &mut el.kind
            && text.font_size < min
        {
            text.font_size = min;
        }
    }
}

/// Clamp declared line heights into the comfortable band. Elements without
/// a declared line height are left alone — inventing one is a design call.
pub fn clamp_line_height(elements: &mut [CanvasElement], lo: f32, hi: f32) {
    for el in elements {
        if let ElementKind::Text(text) = &mut el.kind
            && let Some(lh) = text.line_height
        {
            text.line_height = Some(lh.clamp(lo, hi));
        }
    }
}

/// Grow undersized rect/ellipse hit areas to the touch minimum. Growth is
/// one-sided (width/height only) so the element stays anchored.
pub fn enforce_touch_targets(elements: &mut [CanvasElement], min: f32) {
    for el in elements {
        if matches!(el.kind, ElementKind::Rect | ElementKind::Ellipse) {
            el.bounds.width = el.bounds.width.max(min);
            el.bounds.height = el.bounds.height.max(min);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::critique_document;
    use crate::model::{AnalysisScope, Bounds, TextAttrs};

    #[test]
    fn snapping_clears_spacing_issues() {
        let mut els = vec![CanvasElement::new(
            "box",
            ElementKind::Rect,
            Bounds::new(13.0, 22.0, 50.0, 50.0),
        )];
        snap_to_grid(&mut els, 8.0);
        assert_eq!(els[0].bounds, Bounds::new(16.0, 24.0, 48.0, 48.0));

        let result = critique_document(&els, AnalysisScope::Spacing);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn fixes_are_idempotent() {
        let cfg = CritiqueConfig::default();
        let mut text = CanvasElement::new(
            "caption",
            ElementKind::Text(TextAttrs::new("note", 10.0, "Inter")),
            Bounds::new(3.0, 5.0, 90.0, 21.0),
        );
        if let ElementKind::Text(t) = &mut text.kind {
            t.line_height = Some(2.5);
        }
        let mut els = vec![
            text,
            CanvasElement::new("btn", ElementKind::Rect, Bounds::new(0.0, 0.0, 30.0, 30.0)),
        ];

        apply_auto_fixes(&mut els, &cfg);
        let once = els.clone();
        apply_auto_fixes(&mut els, &cfg);
        assert_eq!(els, once);
    }

    #[test]
    fn fixed_scene_has_no_auto_fixable_issues_left() {
        let cfg = CritiqueConfig::default();
        let mut els = vec![
            CanvasElement::new(
                "caption",
                ElementKind::Text(TextAttrs::new("note", 10.0, "Inter")),
                Bounds::new(3.0, 5.0, 90.0, 21.0),
            ),
            CanvasElement::new("btn", ElementKind::Rect, Bounds::new(0.0, 0.0, 30.0, 30.0)),
        ];
        apply_auto_fixes(&mut els, &cfg);

        let result = critique_document(&els, AnalysisScope::Full);
        let fixable: Vec<_> = result.issues.iter().filter(|i| i.auto_fixable).collect();
        assert!(fixable.is_empty(), "still auto-fixable: {fixable:?}");
    }

    #[test]
    fn judgment_calls_are_untouched() {
        let cfg = CritiqueConfig::default();
        let mut els = vec![
            CanvasElement::new(
                "body",
                ElementKind::Text(TextAttrs::new("hello", 16.0, "Inter")),
                Bounds::new(0.0, 0.0, 200.0, 24.0),
            )
            .with_fill("#cccccc"),
        ];
        let before = els.clone();
        apply_auto_fixes(&mut els, &cfg);
        // Low-contrast fill stays — recoloring is not mechanical
        assert_eq!(els[0].paint, before[0].paint);
    }
}
