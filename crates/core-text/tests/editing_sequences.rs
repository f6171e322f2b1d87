use core_text::{Block, Buffer, GlyphCell, GlyphSource, MonospaceGlyphs};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn mono() -> Arc<dyn GlyphSource> {
    Arc::new(MonospaceGlyphs::new(8, 16))
}

fn block_pairs(b: &Buffer) -> Vec<(usize, usize)> {
    b.blocks().blocks().iter().map(|b| (b.first, b.last)).collect()
}

#[test]
fn typing_a_small_function() {
    let mut b = Buffer::new("f.cpp", mono());
    let src = "int main() {\n\treturn 0;\n}\n";
    for c in src.chars() {
        b.push_back(c);
    }
    assert_eq!(b.text(), src);
    assert_eq!(b.block_count(), 4);
    assert_eq!(block_pairs(&b), vec![(0, 12), (13, 23), (24, 25), (26, 26)]);
    // '\t' has no glyph under the monospace provider.
    assert!(matches!(b.cells()[13], GlyphCell::Missing('\t')));
    assert_eq!(b.longest_block(), 0);
}

#[test]
fn joining_lines_by_erasing_newlines() {
    let mut b = Buffer::from_str("t", "a\n\nb\n", mono());
    assert_eq!(b.block_count(), 4);
    assert_eq!(b.erase(1), Some('\n'));
    assert_eq!(block_pairs(&b), vec![(0, 1), (2, 3), (4, 4)]);
    assert_eq!(b.erase(3), Some('\n'));
    assert_eq!(b.blocks().blocks(), &[Block::new(0, 1), Block::new(2, 3)]);
    assert_eq!(b.text(), "a\nb");
    assert_eq!(b.size().height, 32);
}

#[test]
fn wide_characters_advance_two_cells() {
    let b = Buffer::from_str("t", "a漢b", mono());
    assert_eq!(b.size().width, 32);
    assert_eq!(b.advance_between(0..2), 24);
}

#[test]
fn clone_keeps_independent_state() {
    let mut a = Buffer::from_str("t", "ab", mono());
    let b = a.clone();
    a.insert(1, '\n');
    assert_eq!(a.block_count(), 2);
    assert_eq!(b.block_count(), 1);
    assert_eq!(b.text(), "ab");
}
