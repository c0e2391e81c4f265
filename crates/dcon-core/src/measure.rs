#![forbid(unsafe_code)]

//! Text measurement service.
//!
//! The reflection routine never positions glyphs itself; it asks a
//! [`TextMeasure`] for the rendered extent of a substring and anchors the
//! caret and selection frames at the returned width. Hosts with a real
//! glyph rasterizer implement the trait over their font stack; the built-in
//! [`MonoMetrics`] covers monospaced console fonts, and [`FixedMetrics`]
//! gives deterministic numbers for tests.

use crate::geometry::Extent;
use crate::text_width::display_width;

/// Identifier of a host-registered font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontId(pub u32);

/// Maps a substring to its rendered pixel extent.
///
/// `max_bounds` caps the layout area; the console input line never wraps,
/// so implementations may ignore it for single-line text.
pub trait TextMeasure: Send + Sync {
    /// Measure `text` rendered at `text_size` in font `font`.
    fn measure(&self, text: &str, text_size: f32, font: FontId, max_bounds: Extent) -> Extent;
}

/// Metrics for a monospaced font: every width unit advances by a fixed
/// fraction of the text size, CJK clusters advance two units.
#[derive(Debug, Clone, Copy)]
pub struct MonoMetrics {
    /// Horizontal advance per width unit, as a fraction of text size.
    pub advance_ratio: f32,
    /// Line height as a fraction of text size.
    pub line_height_ratio: f32,
}

impl Default for MonoMetrics {
    fn default() -> Self {
        // Typical terminal-font aspect: glyphs are a little over half as
        // wide as they are tall.
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl TextMeasure for MonoMetrics {
    fn measure(&self, text: &str, text_size: f32, _font: FontId, _max_bounds: Extent) -> Extent {
        let units = display_width(text) as f32;
        Extent::new(
            units * self.advance_ratio * text_size,
            self.line_height_ratio * text_size,
        )
    }
}

/// A measurer with a constant per-unit advance, independent of text size
/// and font. Deterministic; intended for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedMetrics {
    /// Pixels per width unit.
    pub advance: f32,
    /// Pixels per line.
    pub line_height: f32,
}

impl FixedMetrics {
    /// A measurer advancing `advance` pixels per width unit.
    pub const fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::new(10.0, 18.0)
    }
}

impl TextMeasure for FixedMetrics {
    fn measure(&self, text: &str, _text_size: f32, _font: FontId, _max_bounds: Extent) -> Extent {
        if text.is_empty() {
            return Extent::new(0.0, self.line_height);
        }
        Extent::new(display_width(text) as f32 * self.advance, self.line_height)
    }
}
