//! Metrics provider backed by a TrueType font file.

use std::path::{Path, PathBuf};

use common::ParseError;

use crate::metrics::{FontKey, FontMetrics, Metrics};
use crate::tables::{advance_width, parse_cmap, CmapFormat4, FontFile, HeadTable, HheaTable, TableTag};

/// Well-known system font paths to try, in preference order.
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans-fonts/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("failed to read font '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed font data: {0}")]
    Parse(#[from] ParseError),
    #[error("no usable system font found")]
    NotFound,
}

/// Measures text with the advance widths of one TrueType face.
///
/// The face is used for every weight and style; only the size scales.
#[derive(Clone, Debug)]
pub struct TrueTypeMetrics {
    units_per_em: f32,
    hhea: HheaTable,
    cmap: CmapFormat4,
    hmtx: Vec<u8>,
}

impl TrueTypeMetrics {
    /// Parse a font held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FontError> {
        let file = FontFile::parse(data)?;
        let head = HeadTable::parse(file.require(TableTag::HEAD, "head table")?)?;
        let hhea = HheaTable::parse(file.require(TableTag::HHEA, "hhea table")?)?;
        let cmap = parse_cmap(file.require(TableTag::CMAP, "cmap table")?)?;
        let hmtx = file.require(TableTag::HMTX, "hmtx table")?.to_vec();

        Ok(Self {
            units_per_em: f32::from(head.units_per_em),
            hhea,
            cmap,
            hmtx,
        })
    }

    /// Load a font from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&data)
    }

    /// Try the well-known system font locations in order.
    pub fn load_system_font() -> Result<Self, FontError> {
        for path in FONT_SEARCH_PATHS {
            if !Path::new(path).exists() {
                continue;
            }
            match Self::load(path) {
                Ok(metrics) => {
                    log::debug!("using system font {path}");
                    return Ok(metrics);
                }
                Err(e) => log::warn!("skipping font {path}: {e}"),
            }
        }
        Err(FontError::NotFound)
    }

    fn scale(&self, font: FontKey) -> f32 {
        font.size as f32 / self.units_per_em
    }
}

impl FontMetrics for TrueTypeMetrics {
    fn measure(&self, text: &str, font: FontKey) -> f32 {
        let units: u32 = text
            .chars()
            .map(|ch| {
                let gid = self.cmap.lookup(ch);
                // An hmtx shorter than advertised measures as zero width.
                advance_width(&self.hmtx, gid, self.hhea.num_h_metrics).map_or(0, u32::from)
            })
            .sum();
        units as f32 * self.scale(font)
    }

    fn metrics(&self, font: FontKey) -> Metrics {
        let scale = self.scale(font);
        let ascent = f32::from(self.hhea.ascender) * scale;
        let descent = -f32::from(self.hhea.descender) * scale;
        Metrics {
            ascent,
            descent,
            linespace: ascent + descent + f32::from(self.hhea.line_gap) * scale,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{FontStyle, FontWeight};
    use crate::tables::tests::{build_font, cmap, head, hhea, hmtx};

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn sample() -> TrueTypeMetrics {
        let data = build_font(&[
            (TableTag::HEAD, head(1000)),
            (TableTag::HHEA, hhea(800, -200, 100, 3)),
            (TableTag::CMAP, cmap()),
            (TableTag::HMTX, hmtx()),
        ]);
        TrueTypeMetrics::from_bytes(&data).unwrap()
    }

    fn key(size: u32) -> FontKey {
        FontKey::new(size, FontWeight::Normal, FontStyle::Roman)
    }

    #[test]
    fn widths_sum_scaled_advances() {
        let m = sample();
        // 'a' = 550 units, 'b' = 600 units, at 10px per 1000 units.
        assert!(approx_eq(m.measure("ab", key(10)), 11.5));
        assert!(approx_eq(m.measure("ab", key(20)), 23.0));
        assert!(approx_eq(m.measure(" ", key(10)), 6.0));
        // Unmapped characters use the .notdef advance.
        assert!(approx_eq(m.measure("€", key(10)), 5.0));
    }

    #[test]
    fn vertical_metrics_from_hhea() {
        let m = sample().metrics(key(10));
        assert!(approx_eq(m.ascent, 8.0));
        assert!(approx_eq(m.descent, 2.0));
        assert!(approx_eq(m.linespace, 11.0));
    }

    #[test]
    fn missing_table_is_reported() {
        let data = build_font(&[(TableTag::HEAD, head(1000)), (TableTag::HHEA, hhea(800, -200, 0, 3))]);
        let err = TrueTypeMetrics::from_bytes(&data).unwrap_err();
        assert!(matches!(err, FontError::Parse(ParseError::Missing("cmap table"))));
    }

    #[test]
    fn unreadable_path_is_io_error() {
        let err = TrueTypeMetrics::load("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err, FontError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/font.ttf"));
    }
}
