//! # Font metrics
//!
//! The layout engine never looks at glyphs; it only asks how wide a word is
//! and how tall a line of a given font is. This crate is that boundary.
//!
//! - `metrics`: [`FontKey`], [`Metrics`], the [`FontMetrics`] provider trait
//!   and the fixed-ratio [`ApproximateMetrics`] provider
//! - `cache`: [`FontCache`], one resolved [`Font`] per key
//! - `tables`: sfnt table directory, `head`, `hhea`, `cmap` and `hmtx`
//! - `truetype`: [`TrueTypeMetrics`], a provider backed by a real font file

pub mod cache;
pub mod metrics;
pub mod tables;
pub mod truetype;

pub use cache::{Font, FontCache};
pub use metrics::{ApproximateMetrics, FontKey, FontMetrics, FontStyle, FontWeight, Metrics};
pub use truetype::{FontError, TrueTypeMetrics};
