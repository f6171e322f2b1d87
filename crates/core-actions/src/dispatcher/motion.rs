//! Caret movement.
//!
//! Without `extend`, a Left/Right press over a selection collapses it onto
//! the corresponding edge instead of moving. Up/Down keep the column offset
//! within the line, clamped to the target line; on the first (last) line
//! they leave the caret where it is.

use super::DispatchResult;
use crate::Motion;
use core_state::EditorState;

pub(crate) fn handle_motion(motion: Motion, extend: bool, state: &mut EditorState) -> DispatchResult {
    let before = (state.cursor(), state.anchor());
    state.waiting_for_enter = false;

    let target = match (motion, extend, state.selection()) {
        (Motion::Left, false, Some(sel)) => sel.start,
        (Motion::Right, false, Some(sel)) => sel.end,
        _ => target_offset(motion, state),
    };
    state.set_cursor(target, extend);

    if before == (state.cursor(), state.anchor()) {
        DispatchResult::clean()
    } else {
        DispatchResult::dirty()
    }
}

fn target_offset(motion: Motion, state: &EditorState) -> usize {
    let cursor = state.cursor();
    let len = state.len();
    let blocks = state.blocks();
    let current = state.buffer().belonging_block(cursor).unwrap_or(0);
    match motion {
        Motion::Left => cursor.saturating_sub(1),
        Motion::Right => (cursor + 1).min(len),
        Motion::LineStart => blocks.get(current).map_or(0, |b| b.first),
        Motion::LineEnd => blocks.get(current).map_or(len, |b| b.last),
        Motion::DocumentStart => 0,
        Motion::DocumentEnd => len,
        Motion::Up | Motion::Down => {
            let Some(block) = blocks.get(current) else {
                return cursor;
            };
            let column = cursor - block.first;
            let next = match motion {
                Motion::Up => current.checked_sub(1),
                _ => Some(current + 1),
            };
            match next.and_then(|i| blocks.get(i)) {
                Some(target) => target.first + column.min(target.span()),
                None => cursor,
            }
        }
    }
}
