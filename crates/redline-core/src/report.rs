//! Plain-text rendering of a critique result.
//!
//! For headless hosts (CI checks, chat bots, logs) that have no panel to
//! render into. Output is stable for a given result apart from the run ID.

use crate::model::{CritiqueResult, Severity, WcagLevel};
use std::fmt::Write;

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warn ",
        Severity::Info => "info ",
    }
}

fn wcag_label(level: WcagLevel) -> &'static str {
    match level {
        WcagLevel::A => "A",
        WcagLevel::AA => "AA",
        WcagLevel::AAA => "AAA",
    }
}

/// Render a critique result as a compact text report.
#[must_use]
pub fn render_report(result: &CritiqueResult) -> String {
    let mut out = String::with_capacity(1024);

    let _ = writeln!(out, "Design critique {}", result.id);
    let _ = writeln!(
        out,
        "Overall {:.0}% — WCAG {}",
        result.overall_score * 100.0,
        wcag_label(result.wcag_level)
    );
    let _ = writeln!(
        out,
        "  typography {:.0}%  spacing {:.0}%  accessibility {:.0}%  color {:.0}%  layout {:.0}%",
        result.scores.typography * 100.0,
        result.scores.spacing * 100.0,
        result.scores.accessibility * 100.0,
        result.scores.color * 100.0,
        result.scores.layout * 100.0,
    );

    if result.issues.is_empty() {
        let _ = writeln!(out, "\nNo issues found.");
    } else {
        let _ = writeln!(out, "\nIssues ({}):", result.issues.len());
        for issue in &result.issues {
            let _ = write!(out, "  [{}] {}", severity_marker(issue.severity), issue.message);
            if let Some(id) = issue.element_id {
                let _ = write!(out, " ({id})");
            }
            if issue.auto_fixable {
                let _ = write!(out, " [auto-fixable]");
            }
            out.push('\n');
            let _ = writeln!(out, "         fix: {}", issue.suggestion);
        }
    }

    if !result.suggestions.is_empty() {
        let _ = writeln!(out, "\nWhere to focus:");
        for s in &result.suggestions {
            let _ = writeln!(out, "  - {s}");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::critique_document;
    use crate::model::{AnalysisScope, Bounds, CanvasElement, ElementKind, TextAttrs};

    #[test]
    fn clean_scene_reports_no_issues() {
        let report = render_report(&critique_document(&[], AnalysisScope::Full));
        assert!(report.contains("Overall 100%"));
        assert!(report.contains("WCAG AAA"));
        assert!(report.contains("No issues found."));
    }

    #[test]
    fn report_carries_scores_and_findings() {
        // Tiny font + over-long measure: two warnings drop typography to 0.7
        let el = CanvasElement::new(
            "caption",
            ElementKind::Text(TextAttrs::new("note", 10.0, "Inter")),
            Bounds::new(0.0, 0.0, 504.0, 24.0),
        );
        let result = critique_document(&[el], AnalysisScope::Full);
        let report = render_report(&result);

        assert!(report.contains("Issues (2):"));
        assert!(report.contains("[warn ]"));
        assert!(report.contains("(@caption)"));
        assert!(report.contains("[auto-fixable]"));
        assert!(report.contains("fix: Raise the font size"));
        // Typography dipped below the suggestion threshold
        assert!(report.contains("Where to focus:"));
    }
}
