//! Core data model for design critiques.
//!
//! The input is a flat list of `CanvasElement` values — already-parsed
//! visual elements handed over by an editor or canvas host. There is no
//! parent pointer and no authoritative z-order: containment relationships
//! are recovered geometrically where analyzers need them. Elements are
//! immutable inputs; the engine only reads.

use crate::id::ElementId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::time::SystemTime;

// ─── Geometry ────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in scene units. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Check if this box fully contains `other` (edges touching counts).
    pub fn contains_box(&self, other: &Bounds) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// Check if this box intersects `other` on both axes (AABB overlap).
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Overlap area with `other`, 0 when disjoint.
    pub fn overlap_area(&self, other: &Bounds) -> f32 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w > 0.0 && h > 0.0 { w * h } else { 0.0 }
    }
}

// ─── Text attributes ─────────────────────────────────────────────────────

/// Font weight — either a CSS keyword or a numeric 100..900 value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Numeric(u16),
}

impl FontWeight {
    /// Bold for contrast purposes: the `bold` keyword or numeric >= 700.
    pub fn is_bold(&self) -> bool {
        match self {
            FontWeight::Bold => true,
            FontWeight::Numeric(w) => *w >= 700,
            FontWeight::Normal => false,
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Attributes carried only by text elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAttrs {
    pub content: String,
    pub font_size: f32,
    pub font_family: String,
    pub font_weight: FontWeight,
    /// Unitless multiplier (1.5 = 150% of font size). Absent means the
    /// host never declared one; line-height rules skip the element.
    pub line_height: Option<f32>,
    pub letter_spacing: Option<f32>,
    pub text_align: Option<TextAlign>,
}

impl TextAttrs {
    pub fn new(content: impl Into<String>, font_size: f32, font_family: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size,
            font_family: font_family.into(),
            font_weight: FontWeight::Normal,
            line_height: None,
            letter_spacing: None,
            text_align: None,
        }
    }
}

/// Attributes carried only by image elements.
///
/// A missing or empty `alt` is a defect signal, not a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttrs {
    pub src: String,
    pub alt: Option<String>,
}

// ─── Element kinds ───────────────────────────────────────────────────────

/// The element kinds in a critiqued scene.
///
/// Kind-specific payloads live on the variant, so an `alt` on a rect or a
/// `font_size` on an image is unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    Text(TextAttrs),
    Rect,
    Ellipse,
    Image(ImageAttrs),
    Group,
    Line,
    Path,
}

impl ElementKind {
    pub fn as_text(&self) -> Option<&TextAttrs> {
        match self {
            ElementKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageAttrs> {
        match self {
            ElementKind::Image(i) => Some(i),
            _ => None,
        }
    }
}

// ─── Paint ───────────────────────────────────────────────────────────────

/// Paint attributes as the host declared them.
///
/// Colors stay raw strings (`#rgb`, `#rrggbb`, `rgb()`, `rgba()`); parsing
/// happens inside the analyzers with a lenient black fallback, so a typo in
/// one color never fails the whole critique.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaintAttrs {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f32>,
    pub opacity: Option<f32>,
}

// ─── Canvas element ──────────────────────────────────────────────────────

/// A single node in the scene being critiqued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasElement {
    /// Host-assigned ID, unique within the analyzed set.
    pub id: ElementId,
    /// What kind of element this is, with kind-specific attributes.
    pub kind: ElementKind,
    /// Absolute bounding box in scene units.
    pub bounds: Bounds,
    /// Fill / stroke / opacity as declared by the host.
    pub paint: PaintAttrs,
}

impl CanvasElement {
    pub fn new(id: &str, kind: ElementKind, bounds: Bounds) -> Self {
        Self {
            id: ElementId::intern(id),
            kind,
            bounds,
            paint: PaintAttrs::default(),
        }
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.paint.fill = Some(fill.into());
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<String>) -> Self {
        self.paint.stroke = Some(stroke.into());
        self
    }
}

// ─── Issues ──────────────────────────────────────────────────────────────

/// Severity of a finding, ordered by decreasing impact on the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Which critique rule family a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Typography,
    Spacing,
    Accessibility,
    Color,
    Layout,
    Alignment,
    Consistency,
}

/// A single critique finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignIssue {
    /// Freshly minted per issue instance.
    pub id: String,
    pub severity: Severity,
    pub category: Category,
    /// Human-readable description, including offending numeric values
    /// where applicable (e.g. actual vs. required contrast ratio).
    pub message: String,
    /// Back-reference to the offending element. Document-level findings
    /// (palette size, font diversity) carry `None`.
    pub element_id: Option<ElementId>,
    /// Actionable remediation text.
    pub suggestion: String,
    /// True only when the fix is a mechanical attribute change.
    pub auto_fixable: bool,
}

// ─── Analysis scope ──────────────────────────────────────────────────────

/// Which analyzers to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnalysisScope {
    #[default]
    Full,
    Typography,
    Spacing,
    Accessibility,
    Color,
    Layout,
}

// ─── Critique result ─────────────────────────────────────────────────────

/// Estimated WCAG compliance tier, derived from accessibility severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WcagLevel {
    A,
    AA,
    AAA,
}

/// Per-category scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub typography: f32,
    pub spacing: f32,
    pub accessibility: f32,
    pub color: f32,
    pub layout: f32,
}

impl CategoryScores {
    pub const fn perfect() -> Self {
        Self {
            typography: 1.0,
            spacing: 1.0,
            accessibility: 1.0,
            color: 1.0,
            layout: 1.0,
        }
    }
}

/// Aggregate output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritiqueResult {
    /// Unique per run.
    pub id: String,
    pub scores: CategoryScores,
    /// Fixed weighted combination of the category scores.
    pub overall_score: f32,
    /// Insertion order = analyzer execution order, not severity order.
    pub issues: Vec<DesignIssue>,
    /// One advisory per category whose score fell under the threshold.
    pub suggestions: SmallVec<[String; 5]>,
    pub wcag_level: WcagLevel,
    /// Accessibility issues whose message mentions contrast.
    pub contrast_issues: usize,
    /// Accessibility issues whose message mentions missing alt text.
    pub alt_text_missing: usize,
    pub timestamp: SystemTime,
}
