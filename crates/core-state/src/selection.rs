//! Maps char-offset selections and carets to pixel rectangles.
//!
//! One rectangle exists per block (logical line); a selection lights up the
//! rectangles of the blocks it touches and leaves the rest at zero width.

use core_text::Buffer;
use tracing::trace;

/// Vertical layout of the text area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub line_height: f32,
    /// Offset of the first line from the top of the view.
    pub top_margin: f32,
    /// Left edge of the text label.
    pub origin_x: f32,
}

impl LayoutMetrics {
    pub const DEFAULT_TOP_MARGIN: f32 = 10.0;

    pub fn new(line_height: f32, top_margin: f32, origin_x: f32) -> Self {
        Self {
            line_height,
            top_margin,
            origin_x,
        }
    }

    /// Layout matching the buffer's glyph provider line height.
    pub fn for_buffer(buffer: &Buffer) -> Self {
        Self::new(buffer.line_height() as f32, Self::DEFAULT_TOP_MARGIN, 0.0)
    }

    pub fn line_top(&self, block: usize) -> f32 {
        self.top_margin + self.line_height * block as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionRect {
    /// Top-left corner.
    pub position: (f32, f32),
    /// Width and height.
    pub size: (f32, f32),
}

impl SelectionRect {
    pub fn width(&self) -> f32 {
        self.size.0
    }

    pub fn is_visible(&self) -> bool {
        self.size.0 > 0.0
    }
}

/// Per-block rectangle arena. Never empty: the empty document still has one
/// block and so one rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRects {
    rects: Vec<SelectionRect>,
}

impl Default for SelectionRects {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionRects {
    pub fn new() -> Self {
        Self {
            rects: vec![SelectionRect::default()],
        }
    }

    pub fn with_len(len: usize) -> Self {
        Self {
            rects: vec![SelectionRect::default(); len.max(1)],
        }
    }

    pub fn push(&mut self) {
        self.rects.push(SelectionRect::default());
    }

    /// Insert a fresh rectangle so the one at `idx` and later shift down.
    pub fn insert_at(&mut self, idx: usize) {
        let idx = idx.min(self.rects.len());
        self.rects.insert(idx, SelectionRect::default());
    }

    /// Remove the rectangle at `idx`. The last remaining rectangle is kept.
    pub fn remove_at(&mut self, idx: usize) -> bool {
        if self.rects.len() <= 1 || idx >= self.rects.len() {
            return false;
        }
        self.rects.remove(idx);
        true
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&SelectionRect> {
        self.rects.get(idx)
    }

    pub fn as_slice(&self) -> &[SelectionRect] {
        &self.rects
    }

    /// Zero every width and re-anchor each rectangle on its line.
    pub fn reset_widths(&mut self, layout: &LayoutMetrics) {
        for (i, rect) in self.rects.iter_mut().enumerate() {
            rect.position = (layout.origin_x, layout.line_top(i));
            rect.size = (0.0, layout.line_height);
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = (usize, &SelectionRect)> {
        self.rects.iter().enumerate().filter(|(_, r)| r.is_visible())
    }

    fn set(&mut self, idx: usize, x: f32, width: f32, layout: &LayoutMetrics) {
        if let Some(rect) = self.rects.get_mut(idx) {
            rect.position = (layout.origin_x + x, layout.line_top(idx));
            rect.size = (width, layout.line_height);
        }
    }
}

/// Recompute rectangles for the selection between `from` and `to` (either order).
///
/// Both ends are clamped to `[0, len]`. Returns `false` and leaves `rects`
/// untouched when an end cannot be placed in a block.
pub fn update_selection(
    buffer: &Buffer,
    rects: &mut SelectionRects,
    from: usize,
    to: usize,
    layout: &LayoutMetrics,
) -> bool {
    let len = buffer.len();
    let (lo, hi) = {
        let (a, b) = (from.min(len), to.min(len));
        (a.min(b), a.max(b))
    };
    let (Some(block_start), Some(block_end)) =
        (buffer.belonging_block(lo), buffer.belonging_block(hi))
    else {
        trace!(target: "state.selection", lo, hi, "selection_unresolved");
        return false;
    };

    rects.reset_widths(layout);
    let blocks = buffer.blocks();
    let advance = |first: usize, last: usize| buffer.advance_between(first..last) as f32;

    for idx in block_start..=block_end {
        let Some(block) = blocks.get(idx) else {
            break;
        };
        if idx == block_start {
            let x = advance(block.first, lo);
            let w = advance(lo, block.last.min(hi));
            rects.set(idx, x, w, layout);
        } else if idx == block_end {
            rects.set(idx, 0.0, advance(block.first, hi), layout);
        } else {
            rects.set(idx, 0.0, advance(block.first, block.last), layout);
        }
    }
    trace!(target: "state.selection", lo, hi, block_start, block_end, "selection_updated");
    true
}

/// Pixel position of the caret at `offset` (clamped to `[0, len]`).
pub fn cursor_position(buffer: &Buffer, offset: usize, layout: &LayoutMetrics) -> (f32, f32) {
    let offset = offset.min(buffer.len());
    let block = buffer.belonging_block(offset).unwrap_or(0);
    let line_start = buffer.blocks().get(block).map_or(0, |b| b.first);
    let x = buffer.advance_between(line_start..offset) as f32;
    (layout.origin_x + x, layout.line_top(block))
}
