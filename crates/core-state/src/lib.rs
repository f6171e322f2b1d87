//! Editor state: the document buffer plus everything derived from it.
//!
//! `EditorState` is the single owner of the `Buffer`, its highlight spans and
//! the per-block selection rectangles. All text mutation goes through
//! `insert`/`erase` here so the derived pieces never drift:
//!
//! * highlight spans are recomputed after each edit batch;
//! * the rectangle arena grows and shrinks with newlines, so
//!   `selection_rects().len() == block_count()` holds between calls;
//! * the dirty status flips to `NeedsSave` on any text change.
//!
//! Renderers only read: `text`, `glyph_cells`, `blocks`, `highlight_spans`,
//! `selection_rects`, `cursor_pixel`.

use core_syntax::{HighlightSpan, Highlighter, LanguageProfile};
use core_text::{Block, Buffer, GlyphCell};
use std::ops::Range;
use std::path::PathBuf;
use tracing::{debug, trace};

pub mod line_ending;
pub mod selection;

pub use line_ending::{LineEnding, NormalizedText, normalize_line_endings};
pub use selection::{
    LayoutMetrics, SelectionRect, SelectionRects, cursor_position, update_selection,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorStatus {
    #[default]
    Normal,
    NeedsSave,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    buffer: Buffer,
    highlighter: Highlighter,
    spans: Vec<HighlightSpan>,
    rects: SelectionRects,
    layout: LayoutMetrics,
    cursor: usize,
    anchor: usize,
    /// Set after an auto-closed `{`; the next newline opens an indented pair.
    pub waiting_for_enter: bool,
    pub status: EditorStatus,
    pub file_name: Option<PathBuf>,
    pub original_line_ending: LineEnding,
}

impl EditorState {
    pub fn new(buffer: Buffer, highlighter: Highlighter, layout: LayoutMetrics) -> Self {
        let rects = SelectionRects::with_len(buffer.block_count());
        let mut state = Self {
            buffer,
            highlighter,
            spans: Vec::new(),
            rects,
            layout,
            cursor: 0,
            anchor: 0,
            waiting_for_enter: false,
            status: EditorStatus::Normal,
            file_name: None,
            original_line_ending: LineEnding::Lf,
        };
        state.rehighlight();
        state.refresh_selection();
        state
    }

    /// State over `buffer` with a layout derived from its glyph provider.
    pub fn with_profile(buffer: Buffer, profile: LanguageProfile) -> Self {
        let layout = LayoutMetrics::for_buffer(&buffer);
        Self::new(buffer, Highlighter::new(profile), layout)
    }

    // ---- read contract ----

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn glyph_cells(&self) -> &[GlyphCell] {
        self.buffer.cells()
    }

    pub fn blocks(&self) -> &[Block] {
        self.buffer.blocks().blocks()
    }

    pub fn block_count(&self) -> usize {
        self.buffer.block_count()
    }

    pub fn highlight_spans(&self) -> &[HighlightSpan] {
        &self.spans
    }

    pub fn selection_rects(&self) -> &SelectionRects {
        &self.rects
    }

    pub fn cursor_pixel(&self) -> (f32, f32) {
        cursor_position(&self.buffer, self.cursor, &self.layout)
    }

    pub fn layout(&self) -> &LayoutMetrics {
        &self.layout
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.status == EditorStatus::NeedsSave
    }

    // ---- cursor / selection ----

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Move the caret. With `extend` the anchor stays put and the selection
    /// grows or shrinks; otherwise the selection collapses onto the caret.
    pub fn set_cursor(&mut self, offset: usize, extend: bool) {
        self.cursor = offset.min(self.buffer.len());
        if !extend {
            self.anchor = self.cursor;
        }
    }

    pub fn select(&mut self, anchor: usize, cursor: usize) {
        let len = self.buffer.len();
        self.anchor = anchor.min(len);
        self.cursor = cursor.min(len);
    }

    /// Non-empty selected range, if any.
    pub fn selection(&self) -> Option<Range<usize>> {
        let (lo, hi) = (self.anchor.min(self.cursor), self.anchor.max(self.cursor));
        (lo < hi).then_some(lo..hi)
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection().map(|r| self.buffer.slice(r))
    }

    /// Recompute the selection rectangles from the current anchor and caret.
    pub fn refresh_selection(&mut self) -> bool {
        update_selection(
            &self.buffer,
            &mut self.rects,
            self.anchor,
            self.cursor,
            &self.layout,
        )
    }

    // ---- mutation ----

    pub fn insert(&mut self, at: usize, ch: char) {
        self.insert_char_raw(at, ch);
        self.after_edit();
    }

    /// Insert `text` starting at `at`; returns the number of chars inserted.
    pub fn insert_str(&mut self, at: usize, text: &str) -> usize {
        let mut n = 0;
        for ch in text.chars() {
            self.insert_char_raw(at + n, ch);
            n += 1;
        }
        if n > 0 {
            self.after_edit();
        }
        n
    }

    pub fn erase(&mut self, at: usize) -> Option<char> {
        let erased = self.erase_raw(at);
        if erased.is_some() {
            self.after_edit();
        }
        erased
    }

    /// Remove `range` (clamped to the document) and return the removed text.
    pub fn erase_range(&mut self, range: Range<usize>) -> String {
        let len = self.buffer.len();
        let (start, end) = (range.start.min(len), range.end.min(len));
        let mut removed = String::new();
        for _ in start..end {
            match self.erase_raw(start) {
                Some(ch) => removed.push(ch),
                None => break,
            }
        }
        if !removed.is_empty() {
            self.after_edit();
        }
        removed
    }

    /// Replace the document wholesale (file load). Cursor and selection reset.
    pub fn replace_buffer(&mut self, buffer: Buffer) {
        self.buffer = buffer;
        self.rects = SelectionRects::with_len(self.buffer.block_count());
        self.cursor = 0;
        self.anchor = 0;
        self.waiting_for_enter = false;
        self.rehighlight();
        self.refresh_selection();
        debug!(
            target: "state.selection",
            blocks = self.rects.len(),
            "buffer_replaced"
        );
    }

    pub fn set_profile(&mut self, profile: LanguageProfile) {
        self.highlighter.set_profile(profile);
        self.rehighlight();
    }

    pub fn set_layout(&mut self, layout: LayoutMetrics) {
        self.layout = layout;
        self.refresh_selection();
    }

    pub fn mark_saved(&mut self) {
        self.status = EditorStatus::Normal;
    }

    pub fn rehighlight(&mut self) {
        self.spans = self.highlighter.highlight(&self.buffer.chars());
    }

    fn insert_char_raw(&mut self, at: usize, ch: char) {
        let at = at.min(self.buffer.len());
        if ch == '\n' {
            let block = self.buffer.belonging_block(at).unwrap_or(0);
            self.rects.insert_at(block + 1);
            trace!(target: "state.selection", at, block, "rect_inserted");
        }
        self.buffer.insert(at, ch);
    }

    fn erase_raw(&mut self, at: usize) -> Option<char> {
        if self.buffer.char_at(at) == Some('\n') {
            let block = self.buffer.belonging_block(at).unwrap_or(0);
            self.rects.remove_at(block + 1);
            trace!(target: "state.selection", at, block, "rect_removed");
        }
        self.buffer.erase(at)
    }

    fn after_edit(&mut self) {
        let len = self.buffer.len();
        self.cursor = self.cursor.min(len);
        self.anchor = self.anchor.min(len);
        self.status = EditorStatus::NeedsSave;
        self.rehighlight();
        debug_assert_eq!(
            self.rects.len(),
            self.buffer.block_count(),
            "selection rects out of step with blocks"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_syntax::TokenClass;
    use core_text::{GlyphSource, MonospaceGlyphs};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn glyphs() -> Arc<dyn GlyphSource> {
        Arc::new(MonospaceGlyphs::new(10, 20))
    }

    fn state(text: &str) -> EditorState {
        EditorState::with_profile(Buffer::from_str("t", text, glyphs()), LanguageProfile::cpp())
    }

    #[test]
    fn new_state_is_clean_and_highlighted() {
        let s = state("int x = 0;");
        assert_eq!(s.status, EditorStatus::Normal);
        assert_eq!(s.highlight_spans().len(), 2);
        assert_eq!(s.highlight_spans()[0].class, TokenClass::KeywordDefault);
        assert_eq!(s.selection_rects().len(), 1);
    }

    #[test]
    fn newline_edits_keep_rects_in_step() {
        let mut s = state("abcd");
        s.insert(2, '\n');
        assert_eq!(s.text(), "ab\ncd");
        assert_eq!(s.selection_rects().len(), 2);
        s.insert(0, '\n');
        s.insert(s.len(), '\n');
        assert_eq!(s.selection_rects().len(), s.block_count());
        assert_eq!(s.erase(0), Some('\n'));
        assert_eq!(s.selection_rects().len(), s.block_count());
        assert!(s.is_dirty());
    }

    #[test]
    fn erase_range_returns_removed_text() {
        let mut s = state("one\ntwo\nthree");
        let removed = s.erase_range(2..9);
        assert_eq!(removed, "e\ntwo\nt");
        assert_eq!(s.text(), "onhree");
        assert_eq!(s.selection_rects().len(), 1);
        assert_eq!(s.erase_range(40..50), "");
    }

    #[test]
    fn selection_maps_to_rects() {
        let mut s = state("ab\ncd");
        s.select(1, 4);
        assert!(s.refresh_selection());
        let widths: Vec<f32> = s
            .selection_rects()
            .as_slice()
            .iter()
            .map(|r| r.width())
            .collect();
        assert_eq!(widths, vec![10.0, 10.0]);
        assert_eq!(s.selected_text().as_deref(), Some("b\nc"));
    }

    #[test]
    fn cursor_clamps_after_shrinking_edit() {
        let mut s = state("abc");
        s.set_cursor(3, false);
        s.erase(2);
        assert_eq!(s.cursor(), 2);
        assert_eq!(s.cursor_pixel(), (20.0, 10.0));
    }

    #[test]
    fn extend_keeps_anchor() {
        let mut s = state("hello");
        s.set_cursor(1, false);
        s.set_cursor(4, true);
        assert_eq!(s.selection(), Some(1..4));
        s.set_cursor(2, false);
        assert_eq!(s.selection(), None);
    }

    #[test]
    fn profile_switch_rehighlights() {
        let mut s = state("# note");
        assert_eq!(s.highlight_spans()[0].class, TokenClass::Preprocessor);
        s.set_profile(LanguageProfile::python());
        assert_eq!(s.highlight_spans()[0].class, TokenClass::Comment);
    }
}
