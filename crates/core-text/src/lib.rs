//! Rope-backed text buffer with a parallel rendered glyph sequence.
//!
//! `Buffer` owns two sequences that always have the same length:
//!
//! * the document (a `ropey::Rope`, addressed by char offset), and
//! * the rendered glyph sequence (`Vec<GlyphCell>`), one cell per char.
//!
//! Every mutation keeps the pair aligned, maintains the coarse size
//! bookkeeping (cumulative advance width, line-height based height) and drops
//! the cached block index. The index is rebuilt on the next query only, so a
//! burst of edits followed by one render pays for a single scan.

use ropey::Rope;
use std::cell::{Cell, OnceCell};
use std::ops::Range;
use std::sync::Arc;

pub mod blocks;
pub mod glyph;

pub use blocks::{Block, BlockIndex};
pub use glyph::{GlyphCell, GlyphHandle, GlyphMetrics, GlyphSource, GlyphTable, MonospaceGlyphs};

/// Document extent in pixels.
///
/// `width` is the sum of all glyph advances in the document (it does not
/// distinguish lines); `height` is one line height per logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct Buffer {
    rope: Rope,
    cells: Vec<GlyphCell>,
    glyphs: Arc<dyn GlyphSource>,
    pub name: String,
    escape_sequences: usize,
    size: PixelSize,
    blocks: OnceCell<BlockIndex>,
    block_rebuilds: Cell<u64>,
}

impl Buffer {
    /// Empty buffer drawing metrics from `glyphs`.
    pub fn new(name: impl Into<String>, glyphs: Arc<dyn GlyphSource>) -> Self {
        let line_height = glyphs.line_height();
        Self {
            rope: Rope::new(),
            cells: Vec::new(),
            glyphs,
            name: name.into(),
            escape_sequences: 0,
            size: PixelSize {
                width: 0,
                height: line_height,
            },
            blocks: OnceCell::new(),
            block_rebuilds: Cell::new(0),
        }
    }

    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(name: impl Into<String>, content: &str, glyphs: Arc<dyn GlyphSource>) -> Self {
        let mut buffer = Self::new(name, glyphs);
        buffer.rope = Rope::from_str(content);
        buffer.cells.reserve(buffer.rope.len_chars());
        for ch in content.chars() {
            let cell = buffer.account_insert(ch);
            buffer.cells.push(cell);
        }
        tracing::debug!(
            target: "text.buffer",
            name = buffer.name.as_str(),
            chars = buffer.cells.len(),
            lines = buffer.escape_sequences + 1,
            "buffer_loaded"
        );
        buffer
    }

    /// Insert `ch` at char offset `at` (`0..=len`).
    ///
    /// Offsets past the end are a caller bug: debug builds assert, release
    /// builds append.
    pub fn insert(&mut self, at: usize, ch: char) {
        let len = self.len();
        debug_assert!(at <= len, "insert at {at} past end {len}");
        let at = at.min(len);
        self.rope.insert_char(at, ch);
        let cell = self.account_insert(ch);
        self.cells.insert(at, cell);
        self.invalidate_blocks();
        tracing::trace!(target: "text.buffer", at, ch = %ch.escape_debug(), "insert");
    }

    /// Remove the char at offset `at`, returning it. No-op (`None`) when
    /// `at >= len`.
    pub fn erase(&mut self, at: usize) -> Option<char> {
        if at >= self.len() {
            tracing::trace!(target: "text.buffer", at, len = self.len(), "erase_out_of_range");
            return None;
        }
        let ch = self.rope.char(at);
        self.rope.remove(at..at + 1);
        let cell = self.cells.remove(at);
        match cell {
            GlyphCell::Glyph(h) => {
                self.size.width = self.size.width.saturating_sub(h.advance_px());
            }
            GlyphCell::LineBreak => {
                self.escape_sequences -= 1;
                self.size.height = self.size.height.saturating_sub(self.line_height());
            }
            GlyphCell::Missing(_) => {}
        }
        self.invalidate_blocks();
        tracing::trace!(target: "text.buffer", at, ch = %ch.escape_debug(), "erase");
        Some(ch)
    }

    /// Append at the end of the document.
    pub fn push_back(&mut self, ch: char) {
        self.insert(self.len(), ch);
    }

    /// Remove the last char, if any.
    pub fn pop_back(&mut self) -> Option<char> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        self.erase(len - 1)
    }

    // Builds the cell for a freshly inserted char and updates size bookkeeping.
    fn account_insert(&mut self, ch: char) -> GlyphCell {
        if ch == '\n' {
            self.escape_sequences += 1;
            self.size.height = self.size.height.saturating_add(self.line_height());
            return GlyphCell::LineBreak;
        }
        match self.glyphs.lookup(ch) {
            Some(metrics) => {
                let handle = GlyphHandle { ch, metrics };
                self.size.width = self.size.width.saturating_add(handle.advance_px());
                GlyphCell::Glyph(handle)
            }
            None => {
                tracing::trace!(target: "text.buffer", ch = %ch.escape_debug(), "glyph_missing");
                GlyphCell::Missing(ch)
            }
        }
    }

    fn invalidate_blocks(&mut self) {
        self.blocks.take();
    }

    /// Number of chars in the document.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Whole document as an owned `String`.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Whole document as a char vector (scanner input).
    pub fn chars(&self) -> Vec<char> {
        self.rope.chars().collect()
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        (idx < self.len()).then(|| self.rope.char(idx))
    }

    /// Text of the char range `range`, clamped to the document.
    pub fn slice(&self, range: Range<usize>) -> String {
        let len = self.len();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    /// Rendered glyph sequence, parallel to the document.
    pub fn cells(&self) -> &[GlyphCell] {
        &self.cells
    }

    /// Number of newline characters in the document.
    pub fn escape_sequence_count(&self) -> usize {
        self.escape_sequences
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    pub fn line_height(&self) -> u32 {
        self.glyphs.line_height()
    }

    pub fn glyphs(&self) -> &Arc<dyn GlyphSource> {
        &self.glyphs
    }

    /// Sum of pixel advances over the char range `range` (clamped).
    pub fn advance_between(&self, range: Range<usize>) -> u32 {
        let end = range.end.min(self.cells.len());
        let start = range.start.min(end);
        self.cells[start..end].iter().map(GlyphCell::advance_px).sum()
    }

    /// Block index for the current document, rebuilt if a mutation
    /// invalidated it since the last query.
    pub fn blocks(&self) -> &BlockIndex {
        self.blocks.get_or_init(|| {
            self.block_rebuilds.set(self.block_rebuilds.get() + 1);
            BlockIndex::build(&self.cells)
        })
    }

    pub fn belonging_block(&self, offset: usize) -> Option<usize> {
        self.blocks().belonging_block(offset)
    }

    pub fn longest_block(&self) -> usize {
        self.blocks().longest_block()
    }

    pub fn block_count(&self) -> usize {
        self.blocks().len()
    }

    /// Text of block `idx` without its newline.
    pub fn block_text(&self, idx: usize) -> Option<String> {
        let b = *self.blocks().get(idx)?;
        Some(self.slice(b.first..b.last))
    }

    /// How many times the block index has been rebuilt.
    pub fn block_rebuilds(&self) -> u64 {
        self.block_rebuilds.get()
    }
}
