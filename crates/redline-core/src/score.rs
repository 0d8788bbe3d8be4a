//! Scoring aggregation: issues → category scores, overall score, WCAG tier.
//!
//! Pure computation over an issue list. Every score is recomputable from
//! the issues and the configured weights; nothing here inspects elements.

use crate::config::CritiqueConfig;
use crate::model::{Category, CategoryScores, DesignIssue, Severity, WcagLevel};
use smallvec::SmallVec;

/// Penalty-based score for one category: `max(0, 1 - Σ severity weight)`.
///
/// Alignment findings fold into the layout category.
#[must_use]
pub fn category_score(issues: &[DesignIssue], category: Category, cfg: &CritiqueConfig) -> f32 {
    let penalty: f32 = issues
        .iter()
        .filter(|i| {
            i.category == category
                || (category == Category::Layout && i.category == Category::Alignment)
        })
        .map(|i| cfg.severity_weights.for_severity(i.severity))
        .sum();
    (1.0 - penalty).max(0.0)
}

/// Compute all five category scores.
#[must_use]
pub fn score_categories(issues: &[DesignIssue], cfg: &CritiqueConfig) -> CategoryScores {
    CategoryScores {
        typography: category_score(issues, Category::Typography, cfg),
        spacing: category_score(issues, Category::Spacing, cfg),
        accessibility: category_score(issues, Category::Accessibility, cfg),
        color: category_score(issues, Category::Color, cfg),
        layout: category_score(issues, Category::Layout, cfg),
    }
}

/// Fixed weighted combination of the category scores.
#[must_use]
pub fn overall_score(scores: &CategoryScores, cfg: &CritiqueConfig) -> f32 {
    let w = &cfg.category_weights;
    w.typography * scores.typography
        + w.spacing * scores.spacing
        + w.accessibility * scores.accessibility
        + w.color * scores.color
        + w.layout * scores.layout
}

/// Strict three-tier ladder over accessibility severities: a single error
/// caps the estimate at A no matter how much else passes.
#[must_use]
pub fn wcag_level(issues: &[DesignIssue]) -> WcagLevel {
    let mut worst = WcagLevel::AAA;
    for issue in issues {
        if issue.category != Category::Accessibility {
            continue;
        }
        match issue.severity {
            Severity::Error => return WcagLevel::A,
            Severity::Warning => worst = WcagLevel::AA,
            Severity::Info => {}
        }
    }
    worst
}

/// One fixed advisory per category scoring under the threshold.
#[must_use]
pub fn build_suggestions(scores: &CategoryScores, cfg: &CritiqueConfig) -> SmallVec<[String; 5]> {
    let t = cfg.suggestion_threshold;
    let mut out = SmallVec::new();
    if scores.typography < t {
        out.push("Tighten the type hierarchy: fewer families, a fixed scale, readable sizes".into());
    }
    if scores.spacing < t {
        out.push("Align positions, sizes, and gaps to the 8pt grid".into());
    }
    if scores.accessibility < t {
        out.push("Fix contrast failures and add alt text to images".into());
    }
    if scores.color < t {
        out.push("Consolidate the palette and merge near-duplicate colors".into());
    }
    if scores.layout < t {
        out.push("Snap near-aligned elements to shared grid lines".into());
    }
    out
}

/// Accessibility issues whose message mentions contrast.
#[must_use]
pub fn count_contrast_issues(issues: &[DesignIssue]) -> usize {
    issues
        .iter()
        .filter(|i| i.category == Category::Accessibility && i.message.contains("contrast"))
        .count()
}

/// Accessibility issues whose message mentions missing alt text.
#[must_use]
pub fn count_alt_text_missing(issues: &[DesignIssue]) -> usize {
    issues
        .iter()
        .filter(|i| i.category == Category::Accessibility && i.message.contains("alt text"))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(category: Category, severity: Severity) -> DesignIssue {
        DesignIssue {
            id: "issue_0".into(),
            severity,
            category,
            message: "test".into(),
            element_id: None,
            suggestion: String::new(),
            auto_fixable: false,
        }
    }

    #[test]
    fn empty_issue_list_scores_perfect() {
        let cfg = CritiqueConfig::default();
        let scores = score_categories(&[], &cfg);
        assert_eq!(scores, CategoryScores::perfect());
        assert!((overall_score(&scores, &cfg) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn penalties_accumulate_by_severity() {
        let cfg = CritiqueConfig::default();
        let issues = [
            issue(Category::Typography, Severity::Error),
            issue(Category::Typography, Severity::Warning),
            issue(Category::Typography, Severity::Info),
        ];
        let s = category_score(&issues, Category::Typography, &cfg);
        assert!((s - 0.5).abs() < 1e-6, "0.30 + 0.15 + 0.05 penalty, got {s}");
    }

    #[test]
    fn score_floors_at_zero() {
        let cfg = CritiqueConfig::default();
        let issues: Vec<_> = (0..5)
            .map(|_| issue(Category::Accessibility, Severity::Error))
            .collect();
        assert_eq!(category_score(&issues, Category::Accessibility, &cfg), 0.0);
    }

    #[test]
    fn adding_an_error_never_raises_the_score() {
        let cfg = CritiqueConfig::default();
        let mut issues = vec![issue(Category::Color, Severity::Info)];
        let before = category_score(&issues, Category::Color, &cfg);
        issues.push(issue(Category::Color, Severity::Error));
        let after = category_score(&issues, Category::Color, &cfg);
        assert!(after <= before);
    }

    #[test]
    fn alignment_counts_toward_layout() {
        let cfg = CritiqueConfig::default();
        let issues = [issue(Category::Alignment, Severity::Warning)];
        let s = category_score(&issues, Category::Layout, &cfg);
        assert!((s - 0.85).abs() < 1e-6);
        // But not toward any other category
        assert_eq!(category_score(&issues, Category::Spacing, &cfg), 1.0);
    }

    #[test]
    fn wcag_ladder() {
        assert_eq!(wcag_level(&[]), WcagLevel::AAA);
        assert_eq!(
            wcag_level(&[issue(Category::Accessibility, Severity::Info)]),
            WcagLevel::AAA
        );
        assert_eq!(
            wcag_level(&[issue(Category::Accessibility, Severity::Warning)]),
            WcagLevel::AA
        );
        assert_eq!(
            wcag_level(&[
                issue(Category::Accessibility, Severity::Warning),
                issue(Category::Accessibility, Severity::Error),
            ]),
            WcagLevel::A
        );
        // Errors in other categories don't move the tier
        assert_eq!(
            wcag_level(&[issue(Category::Typography, Severity::Error)]),
            WcagLevel::AAA
        );
    }

    #[test]
    fn suggestions_follow_low_scores() {
        let cfg = CritiqueConfig::default();
        let scores = CategoryScores {
            typography: 0.5,
            spacing: 0.9,
            accessibility: 0.7,
            color: 1.0,
            layout: 0.79,
        };
        let suggestions = build_suggestions(&scores, &cfg);
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions[0].contains("type hierarchy"));
        assert!(suggestions[1].contains("alt text"));
        assert!(suggestions[2].contains("grid"));
    }

    #[test]
    fn message_derived_counts() {
        let mut contrast = issue(Category::Accessibility, Severity::Error);
        contrast.message = "Text contrast ratio 2.10 is below the required 4.5 (WCAG AA)".into();
        let mut alt = issue(Category::Accessibility, Severity::Error);
        alt.message = "Image is missing alt text".into();
        // Same wording in another category must not count
        let mut decoy = issue(Category::Typography, Severity::Info);
        decoy.message = "contrast".into();

        let issues = [contrast, alt, decoy];
        assert_eq!(count_contrast_issues(&issues), 1);
        assert_eq!(count_alt_text_missing(&issues), 1);
    }
}
