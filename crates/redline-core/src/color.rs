//! Color parsing and colorimetric math for the analyzers.
//!
//! Accepts the color strings hosts actually emit — `#rgb`, `#rrggbb` (plus
//! longer hex with a trailing alpha), and `rgb()` / `rgba()` function
//! notation, parsed with `winnow`. Anything unparseable degrades to black
//! rather than failing: one typo'd color must never abort a critique.

use winnow::ascii::space0;
use winnow::combinator::{alt, opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// Maximum Euclidean distance between two RGB colors, ≈ sqrt(3 × 255²).
/// Kept at two decimals to match the similarity thresholds tuned against it.
const MAX_RGB_DISTANCE: f32 = 441.67;

/// An opaque RGB color. Alpha never enters luminance or similarity, so it
/// is dropped at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color string: `#rgb`, `#rrggbb` (longer hex keeps the first
    /// six digits, discarding alpha), or `rgb()` / `rgba()` notation.
    pub fn parse(s: &str) -> Option<Rgb> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::from_hex_digits(hex);
        }
        let mut input = s;
        rgb_function.parse_next(&mut input).ok()
    }

    /// Lenient variant: unparseable colors are treated as black.
    pub fn parse_or_black(s: &str) -> Rgb {
        Self::parse(s).unwrap_or_else(|| {
            log::trace!("unparseable color {s:?}, treating as black");
            Rgb::BLACK
        })
    }

    fn from_hex_digits(hex: &str) -> Option<Rgb> {
        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Rgb::new(r * 17, g * 17, b * 17))
            }
            // 6 digits, or 8 with a trailing alpha pair we drop.
            6 | 8 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                Some(Rgb::new(r, g, b))
            }
            _ => None,
        }
    }

    /// WCAG relative luminance: linearized sRGB channels combined as
    /// `0.2126 R + 0.7152 G + 0.0722 B`.
    pub fn relative_luminance(&self) -> f32 {
        fn linearize(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }
}

/// WCAG contrast ratio between two colors, in [1, 21].
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f32 {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Perceived similarity in [0, 1]: 1 minus normalized RGB Euclidean distance.
pub fn similarity(a: Rgb, b: Rgb) -> f32 {
    let dr = a.r as f32 - b.r as f32;
    let dg = a.g as f32 - b.g as f32;
    let db = a.b as f32 - b.b as f32;
    let distance = (dr * dr + dg * dg + db * db).sqrt();
    1.0 - distance / MAX_RGB_DISTANCE
}

// ─── rgb() / rgba() parsing ──────────────────────────────────────────────

fn rgb_function(input: &mut &str) -> ModalResult<Rgb> {
    let _ = alt(("rgba", "rgb")).parse_next(input)?;
    let _ = space0.parse_next(input)?;
    let _ = '('.parse_next(input)?;
    let r = channel.parse_next(input)?;
    let _ = separator.parse_next(input)?;
    let g = channel.parse_next(input)?;
    let _ = separator.parse_next(input)?;
    let b = channel.parse_next(input)?;
    // Optional alpha component, parsed and discarded.
    let _ = opt(preceded(separator, decimal)).parse_next(input)?;
    let _ = space0.parse_next(input)?;
    let _ = ')'.parse_next(input)?;
    Ok(Rgb::new(r, g, b))
}

/// One color channel: integer 0..=255 (out-of-range values clamp).
fn channel(input: &mut &str) -> ModalResult<u8> {
    let _ = space0.parse_next(input)?;
    let digits: &str = take_while(1..=3, |c: char| c.is_ascii_digit()).parse_next(input)?;
    let v: u32 = digits
        .parse()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))?;
    Ok(v.min(255) as u8)
}

fn separator(input: &mut &str) -> ModalResult<()> {
    let _ = space0.parse_next(input)?;
    let _ = ','.parse_next(input)?;
    let _ = space0.parse_next(input)?;
    Ok(())
}

/// A non-negative decimal number (alpha values like `0.5` or `.5`).
fn decimal(input: &mut &str) -> ModalResult<f32> {
    let start = *input;
    let _ = take_while(0.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    if input.starts_with('.') {
        *input = &input[1..];
        let _ =
            take_while::<_, _, ContextError>(0.., |c: char| c.is_ascii_digit()).parse_next(input);
    }
    let matched = &start[..start.len() - input.len()];
    matched
        .parse::<f32>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))
}
