//! Font identity and the metrics provider interface.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Roman,
    Italic,
}

/// Identifies one font: size in pixels, weight and style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontKey {
    pub size: u32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl FontKey {
    pub const DEFAULT_SIZE: u32 = 12;

    pub fn new(size: u32, weight: FontWeight, style: FontStyle) -> Self {
        Self {
            size,
            weight,
            style,
        }
    }
}

impl Default for FontKey {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE, FontWeight::Normal, FontStyle::Roman)
    }
}

impl fmt::Display for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weight = match self.weight {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        };
        let style = match self.style {
            FontStyle::Roman => "roman",
            FontStyle::Italic => "italic",
        };
        write!(f, "{}px {weight} {style}", self.size)
    }
}

/// Vertical metrics of a font. All values are positive pixel distances.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Metrics {
    /// Height above the baseline.
    pub ascent: f32,
    /// Depth below the baseline.
    pub descent: f32,
    /// Recommended distance between consecutive baselines.
    pub linespace: f32,
}

/// Source of text measurements for layout.
///
/// Implementations must be deterministic: the same text and key always
/// produce the same width, otherwise layout is not repeatable.
pub trait FontMetrics {
    /// Advance width of `text` in pixels.
    fn measure(&self, text: &str, font: FontKey) -> f32;

    /// Vertical metrics of `font`.
    fn metrics(&self, font: FontKey) -> Metrics;
}

/// Fixed-ratio metrics for when no font file is available, and for tests.
///
/// Every character advances 0.6 × size (0.65 × size when bold). Ascent is
/// 0.9 × size and descent 0.3 × size, so the line spacing is 1.2 × size.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproximateMetrics;

impl ApproximateMetrics {
    const CHAR_WIDTH_RATIO: f32 = 0.6;
    const BOLD_CHAR_WIDTH_RATIO: f32 = 0.65;
    const ASCENT_RATIO: f32 = 0.9;
    const DESCENT_RATIO: f32 = 0.3;
}

impl FontMetrics for ApproximateMetrics {
    fn measure(&self, text: &str, font: FontKey) -> f32 {
        let ratio = match font.weight {
            FontWeight::Normal => Self::CHAR_WIDTH_RATIO,
            FontWeight::Bold => Self::BOLD_CHAR_WIDTH_RATIO,
        };
        text.chars().count() as f32 * font.size as f32 * ratio
    }

    fn metrics(&self, font: FontKey) -> Metrics {
        let size = font.size as f32;
        let ascent = size * Self::ASCENT_RATIO;
        let descent = size * Self::DESCENT_RATIO;
        Metrics {
            ascent,
            descent,
            linespace: ascent + descent,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
