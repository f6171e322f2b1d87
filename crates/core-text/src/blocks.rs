//! Block index: partition of caret offsets into logical lines.
//!
//! A block is the inclusive caret range `[first, last]` of one line: `first`
//! is the offset of the line's first character and `last` the offset of its
//! terminating newline (or the document length for the final line). Every
//! caret offset in `[0, len]` therefore belongs to exactly one block, an empty
//! line is `[p, p]`, and an empty document is the single block `[0, 0]`.
//!
//! The index is a pure function of the line-break positions in the rendered
//! glyph sequence. `Buffer` caches it and drops the cache on mutation; see
//! `Buffer::blocks`.

use crate::glyph::GlyphCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub first: usize,
    pub last: usize,
}

impl Block {
    pub fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    /// Number of characters on the line (newline excluded).
    pub fn span(&self) -> usize {
        self.last - self.first
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.first <= offset && offset <= self.last
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockIndex {
    blocks: Vec<Block>,
}

impl BlockIndex {
    /// Forward scan over the glyph sequence closing a block at every line
    /// break and at the end of the sequence.
    pub fn build(cells: &[GlyphCell]) -> Self {
        let mut blocks = Vec::with_capacity(1 + cells.len() / 32);
        let mut run_start = 0usize;
        for (i, cell) in cells.iter().enumerate() {
            if cell.is_line_break() {
                blocks.push(Block::new(run_start, i));
                run_start = i + 1;
            }
        }
        blocks.push(Block::new(run_start, cells.len()));
        tracing::trace!(target: "text.blocks", cells = cells.len(), blocks = blocks.len(), "rebuild");
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Never true for an index built from a sequence; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Block> {
        self.blocks.get(idx)
    }

    /// Index of the block containing caret `offset`, `None` past the end.
    pub fn belonging_block(&self, offset: usize) -> Option<usize> {
        // Blocks are sorted and contiguous: the owner is the last block whose
        // `first` does not exceed the offset.
        let idx = self.blocks.partition_point(|b| b.first <= offset);
        if idx == 0 {
            return None;
        }
        let candidate = idx - 1;
        self.blocks[candidate].contains(offset).then_some(candidate)
    }

    /// Index of the widest block by `last - first`; first wins on ties.
    pub fn longest_block(&self) -> usize {
        let mut best = 0usize;
        let mut best_span = None;
        for (i, b) in self.blocks.iter().enumerate() {
            if best_span.is_none_or(|s| b.span() > s) {
                best_span = Some(b.span());
                best = i;
            }
        }
        best
    }
}
