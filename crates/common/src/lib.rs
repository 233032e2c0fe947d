//! Shared primitives for the markup renderer.
//!
//! - [`Rect`]: edge-based rectangle in document coordinates
//! - [`Color`]: RGBA colour with the named fills used by the paint stage
//! - [`Cursor`]: big-endian byte reader used by the font table parser
//! - [`ParseError`]: binary parse failures

use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// ParseError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur when decoding binary data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Tried to read past the end of the buffer.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A decoded value is not valid in context.
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
    /// A required table or record is absent.
    #[error("missing {0}")]
    Missing(&'static str),
}

// ─────────────────────────────────────────────────────────────────────────────
// Cursor
// ─────────────────────────────────────────────────────────────────────────────

/// A zero-copy big-endian reader over a byte slice.
///
/// Every sfnt structure is big-endian, so there is no endianness switch.
pub struct Cursor<'a> {
    buf: &'a [u8],
    off: usize,
}

impl<'a> Cursor<'a> {
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, off: 0 }
    }

    /// Start reading at `offset`. Fails if the offset is past the end.
    pub fn at(buf: &'a [u8], offset: usize) -> Result<Self, ParseError> {
        if offset > buf.len() {
            return Err(ParseError::UnexpectedEof);
        }
        Ok(Self { buf, off: offset })
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.off
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.off)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ParseError> {
        let end = self.off.checked_add(n).ok_or(ParseError::UnexpectedEof)?;
        let slice = self.buf.get(self.off..end).ok_or(ParseError::UnexpectedEof)?;
        self.off = end;
        Ok(slice)
    }

    pub fn u16(&mut self) -> Result<u16, ParseError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn i16(&mut self) -> Result<i16, ParseError> {
        let b = self.take(2)?;
        Ok(i16::from_be_bytes([b[0], b[1]]))
    }

    pub fn u32(&mut self) -> Result<u32, ParseError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read a four-byte tag such as `b"hhea"`.
    pub fn tag(&mut self) -> Result<[u8; 4], ParseError> {
        let b = self.take(4)?;
        Ok([b[0], b[1], b[2], b[3]])
    }

    pub fn skip(&mut self, n: usize) -> Result<(), ParseError> {
        self.take(n).map(|_| ())
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("off", &self.off)
            .field("len", &self.buf.len())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// An RGBA color with 8 bits per channel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// X11 `gray`, the fill behind preformatted blocks.
    pub const GRAY: Self = Self::rgb(190, 190, 190);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// The colour's name when it is one of the named constants.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::BLACK => Some("black"),
            Self::GRAY => Some("gray"),
            _ => None,
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rect
// ─────────────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle stored by its edges.
///
/// Draw commands and culling only ever ask for edges, so the rectangle keeps
/// `left/top/right/bottom` rather than an origin and size.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Build from an origin and a size.
    #[inline]
    pub fn from_origin_size(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.bottom - self.top
    }

    /// Shift vertically, e.g. into screen space by subtracting a scroll offset.
    #[inline]
    pub fn translate_y(self, dy: f32) -> Self {
        Self::new(self.left, self.top + dy, self.right, self.bottom + dy)
    }

    /// Does any part of `[top, bottom]` fall inside `[y0, y1]`?
    #[inline]
    pub fn overlaps_band(self, y0: f32, y1: f32) -> bool {
        self.top <= y1 && self.bottom >= y0
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
