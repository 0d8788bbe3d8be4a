//! Critique policy configuration.
//!
//! Every threshold and weight the analyzers consult lives here, so tuning
//! the policy never touches analyzer logic. The defaults encode the
//! shipping rule set; hosts can construct a variant for stricter or looser
//! review passes.

use crate::model::Severity;
use serde::{Deserialize, Serialize};

// ─── Weights ─────────────────────────────────────────────────────────────

/// Contribution of each category to the overall score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub typography: f32,
    pub spacing: f32,
    pub accessibility: f32,
    pub color: f32,
    pub layout: f32,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            typography: 0.20,
            spacing: 0.15,
            accessibility: 0.30,
            color: 0.15,
            layout: 0.20,
        }
    }
}

/// Score penalty per issue, by severity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityWeights {
    pub error: f32,
    pub warning: f32,
    pub info: f32,
}

impl SeverityWeights {
    pub fn for_severity(&self, severity: Severity) -> f32 {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            error: 0.30,
            warning: 0.15,
            info: 0.05,
        }
    }
}

// ─── Config ──────────────────────────────────────────────────────────────

/// Configuration for the critique engine.
///
/// Grouped by analyzer; see field docs for the rule each value feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritiqueConfig {
    // Typography
    /// Body text below this size draws a warning. Default: **14**.
    pub min_font_size: f32,
    /// Comfortable unitless line-height band. Default: **[1.4, 1.8]**.
    pub line_height_min: f32,
    pub line_height_max: f32,
    /// Estimated characters per line above this draws a warning. Default: **75**.
    pub max_line_chars: f32,
    /// Distinct font families tolerated per document. Default: **3**.
    pub max_font_families: usize,
    /// Distinct font sizes tolerated per document. Default: **6**.
    pub max_font_sizes: usize,

    // Spacing
    /// Grid unit in scene units; positions and sizes should be multiples.
    /// Default: **8**.
    pub grid_unit: f32,
    /// Gaps at or beyond this are unrelated elements, not spacing. Default: **200**.
    pub gap_scan_limit: f32,
    /// Distinct (grid-snapped) gap sizes tolerated per direction. Default: **3**.
    pub max_gap_variants: usize,

    // Accessibility
    /// Minimum interactive target edge, per WCAG 2.5.5. Default: **44**.
    pub min_touch_target: f32,
    /// Contrast required for normal / large text at level AA. Defaults: **4.5 / 3.0**.
    pub contrast_aa_normal: f32,
    pub contrast_aa_large: f32,
    /// Contrast required for normal / large text at level AAA. Defaults: **7.0 / 4.5**.
    pub contrast_aaa_normal: f32,
    pub contrast_aaa_large: f32,
    /// Text counts as large at this size, or at `large_text_bold_size` when bold.
    /// Defaults: **18 / 14**.
    pub large_text_size: f32,
    pub large_text_bold_size: f32,

    // Color
    /// Distinct fill/stroke colors tolerated per document. Default: **7**.
    pub max_palette_size: usize,
    /// Pairs with similarity inside this open band look unintentionally
    /// close; at or above the upper bound they count as the same color.
    /// Default: **(0.85, 0.98)**.
    pub similarity_low: f32,
    pub similarity_high: f32,

    // Layout
    /// Elements whose top-left coordinates differ by at most this (but are
    /// not equal) are near-misses. Default: **5**.
    pub near_align_tolerance: f32,
    /// Overlap fraction band (of the smaller element) flagged as possibly
    /// unintentional. Default: **(0.30, 0.90)**.
    pub overlap_low: f32,
    pub overlap_high: f32,

    // Scoring
    pub severity_weights: SeverityWeights,
    pub category_weights: CategoryWeights,
    /// Categories scoring under this get an improvement suggestion. Default: **0.8**.
    pub suggestion_threshold: f32,
}

impl Default for CritiqueConfig {
    fn default() -> Self {
        Self {
            min_font_size: 14.0,
            line_height_min: 1.4,
            line_height_max: 1.8,
            max_line_chars: 75.0,
            max_font_families: 3,
            max_font_sizes: 6,

            grid_unit: 8.0,
            gap_scan_limit: 200.0,
            max_gap_variants: 3,

            min_touch_target: 44.0,
            contrast_aa_normal: 4.5,
            contrast_aa_large: 3.0,
            contrast_aaa_normal: 7.0,
            contrast_aaa_large: 4.5,
            large_text_size: 18.0,
            large_text_bold_size: 14.0,

            max_palette_size: 7,
            similarity_low: 0.85,
            similarity_high: 0.98,

            near_align_tolerance: 5.0,
            overlap_low: 0.30,
            overlap_high: 0.90,

            severity_weights: SeverityWeights::default(),
            category_weights: CategoryWeights::default(),
            suggestion_threshold: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_weights_sum_to_one() {
        let w = CategoryWeights::default();
        let sum = w.typography + w.spacing + w.accessibility + w.color + w.layout;
        assert!((sum - 1.0).abs() < 1e-6, "weights should sum to 1, got {sum}");
    }

    #[test]
    fn severity_weight_lookup() {
        let w = SeverityWeights::default();
        assert!(w.for_severity(Severity::Error) > w.for_severity(Severity::Warning));
        assert!(w.for_severity(Severity::Warning) > w.for_severity(Severity::Info));
    }
}
