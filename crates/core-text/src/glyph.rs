//! Glyph metrics contract and the per-character cell representation.
//!
//! The rasterizer is an external collaborator: this crate only needs to know,
//! per character, how far the pen advances and how large the bitmap is. A
//! `GlyphSource` answers that question. Two sources ship here:
//!
//! * `GlyphTable` - explicit map, typically filled once by a font loader
//!   (the editor preloads the ASCII range).
//! * `MonospaceGlyphs` - fixed cell advance scaled by `unicode-width`, used by
//!   the terminal front-end and by tests.
//!
//! Advances are stored in 26.6 fixed point (`advance >> 6` yields pixels), the
//! unit rasterizers report natively.

use std::collections::HashMap;
use unicode_width::UnicodeWidthChar;

/// Metrics of one rasterized glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Horizontal advance in 26.6 subpixel units.
    pub advance: u32,
    pub bearing: (f32, f32),
    pub bitmap_size: (i32, i32),
}

/// Largest whole-pixel advance representable in 26.6 units.
pub const MAX_ADVANCE_PX: u32 = u32::MAX >> 6;

impl GlyphMetrics {
    pub fn new(advance: u32, bearing: (f32, f32), bitmap_size: (i32, i32)) -> Self {
        Self {
            advance,
            bearing,
            bitmap_size,
        }
    }

    /// Metrics with a whole-pixel advance and a square bitmap of the same width.
    pub fn with_advance_px(px: u32) -> Self {
        let px = px.min(MAX_ADVANCE_PX);
        Self {
            advance: px << 6,
            bearing: (0.0, px as f32),
            bitmap_size: (px as i32, px as i32),
        }
    }

    /// Advance in whole pixels.
    pub fn advance_px(&self) -> u32 {
        self.advance >> 6
    }
}

/// Provider of glyph metrics (font collaborator).
pub trait GlyphSource: std::fmt::Debug {
    /// Metrics for `ch`, or `None` when the font has no glyph for it.
    fn lookup(&self, ch: char) -> Option<GlyphMetrics>;

    /// Height in pixels of one logical line.
    fn line_height(&self) -> u32;
}

/// Handle stored in the rendered glyph sequence for a printable character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphHandle {
    pub ch: char,
    pub metrics: GlyphMetrics,
}

impl GlyphHandle {
    pub fn advance_px(&self) -> u32 {
        self.metrics.advance_px()
    }
}

/// One entry of the rendered glyph sequence, parallel to the document.
///
/// `LineBreak` appears exactly where the document holds `'\n'`. `Missing`
/// keeps the sequence aligned for characters the font cannot draw; it carries
/// no metrics and contributes zero width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphCell {
    Glyph(GlyphHandle),
    LineBreak,
    Missing(char),
}

impl GlyphCell {
    pub fn is_line_break(&self) -> bool {
        matches!(self, GlyphCell::LineBreak)
    }

    /// Pixel advance contributed by this cell (zero for breaks and misses).
    pub fn advance_px(&self) -> u32 {
        match self {
            GlyphCell::Glyph(h) => h.advance_px(),
            GlyphCell::LineBreak | GlyphCell::Missing(_) => 0,
        }
    }

    pub fn handle(&self) -> Option<&GlyphHandle> {
        match self {
            GlyphCell::Glyph(h) => Some(h),
            _ => None,
        }
    }
}

/// Explicit character -> metrics map.
#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    entries: HashMap<char, GlyphMetrics>,
    line_height: u32,
}

impl GlyphTable {
    pub fn new(line_height: u32) -> Self {
        Self {
            entries: HashMap::new(),
            line_height,
        }
    }

    pub fn insert(&mut self, ch: char, metrics: GlyphMetrics) {
        // Newlines never carry a glyph.
        if ch != '\n' {
            self.entries.insert(ch, metrics);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Table covering printable ASCII with a fixed pixel advance.
    pub fn ascii(advance_px: u32, line_height: u32) -> Self {
        let mut table = Self::new(line_height);
        for c in (0x20u8..0x7f).map(char::from) {
            table.insert(c, GlyphMetrics::with_advance_px(advance_px));
        }
        table
    }
}

impl FromIterator<(char, GlyphMetrics)> for GlyphTable {
    fn from_iter<I: IntoIterator<Item = (char, GlyphMetrics)>>(iter: I) -> Self {
        let mut table = GlyphTable::new(0);
        for (c, m) in iter {
            table.insert(c, m);
        }
        table
    }
}

impl GlyphTable {
    pub fn with_line_height(mut self, line_height: u32) -> Self {
        self.line_height = line_height;
        self
    }
}

impl GlyphSource for GlyphTable {
    fn lookup(&self, ch: char) -> Option<GlyphMetrics> {
        self.entries.get(&ch).copied()
    }

    fn line_height(&self) -> u32 {
        self.line_height
    }
}

/// Fixed-pitch provider: advance = `cell_advance * display width`.
///
/// Characters without a display width (controls, including `'\t'`) have no
/// glyph; zero-width combining marks get a zero advance.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceGlyphs {
    pub cell_advance: u32,
    pub line_height: u32,
}

impl MonospaceGlyphs {
    pub fn new(cell_advance: u32, line_height: u32) -> Self {
        Self {
            cell_advance,
            line_height,
        }
    }
}

impl GlyphSource for MonospaceGlyphs {
    fn lookup(&self, ch: char) -> Option<GlyphMetrics> {
        if ch == '\n' {
            return None;
        }
        let cells = ch.width()? as u32;
        let px = self.cell_advance.saturating_mul(cells).min(MAX_ADVANCE_PX);
        Some(GlyphMetrics::new(
            px << 6,
            (0.0, self.line_height as f32),
            (px as i32, i32::try_from(self.line_height).unwrap_or(i32::MAX)),
        ))
    }

    fn line_height(&self) -> u32 {
        self.line_height
    }
}
