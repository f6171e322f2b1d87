//! Property-based tests for buffer/glyph alignment and the block partition.

use core_text::{Buffer, GlyphCell, GlyphMetrics, GlyphSource, GlyphTable};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Op {
    Insert(usize, char),
    Erase(usize),
}

fn glyphs() -> Arc<dyn GlyphSource> {
    let mut t = GlyphTable::ascii(7, 20);
    t.insert('m', GlyphMetrics::with_advance_px(12));
    Arc::new(t)
}

fn op() -> impl Strategy<Value = Op> {
    // Mix of printable, newline and glyph-less chars ('\t', 'λ').
    let ch = prop_oneof![
        4 => prop::char::range('a', 'z'),
        2 => Just('\n'),
        1 => Just('\t'),
        1 => Just('λ'),
    ];
    prop_oneof![
        (0usize..64, ch).prop_map(|(at, c)| Op::Insert(at, c)),
        (0usize..64).prop_map(Op::Erase),
    ]
}

fn apply(b: &mut Buffer, op: &Op) {
    match *op {
        // Inserts stay within the precondition; erases may overshoot on purpose.
        Op::Insert(at, c) => b.insert(at.min(b.len()), c),
        Op::Erase(at) => {
            b.erase(at);
        }
    }
}

proptest! {
    #[test]
    fn glyph_sequence_tracks_document(ops in prop::collection::vec(op(), 0..80)) {
        let mut b = Buffer::new("p", glyphs());
        for op in &ops {
            apply(&mut b, op);
            prop_assert_eq!(b.cells().len(), b.len());
        }
        let text: Vec<char> = b.chars();
        for (c, cell) in text.iter().zip(b.cells()) {
            prop_assert_eq!(*c == '\n', cell.is_line_break());
        }
        let newlines = text.iter().filter(|c| **c == '\n').count();
        prop_assert_eq!(b.escape_sequence_count(), newlines);
        prop_assert_eq!(b.size().height, 20 * (newlines as u32 + 1));
        let expected_width: u32 = b.cells().iter().map(GlyphCell::advance_px).sum();
        prop_assert_eq!(b.size().width, expected_width);
    }

    #[test]
    fn blocks_partition_every_caret(ops in prop::collection::vec(op(), 0..80)) {
        let mut b = Buffer::new("p", glyphs());
        for op in &ops {
            apply(&mut b, op);
        }
        let newlines = b.chars().iter().filter(|c| **c == '\n').count();
        let blocks = b.blocks().blocks().to_vec();
        prop_assert_eq!(blocks.len(), newlines + 1);
        prop_assert_eq!(blocks[0].first, 0);
        prop_assert_eq!(blocks[blocks.len() - 1].last, b.len());
        for pair in blocks.windows(2) {
            prop_assert!(pair[0].first <= pair[0].last);
            prop_assert_eq!(pair[1].first, pair[0].last + 1);
        }
        for offset in 0..=b.len() {
            let owner = b.belonging_block(offset);
            prop_assert!(owner.is_some());
            let block = blocks[owner.unwrap()];
            prop_assert!(block.first <= offset && offset <= block.last);
        }
        prop_assert_eq!(b.belonging_block(b.len() + 1), None);
    }
}
