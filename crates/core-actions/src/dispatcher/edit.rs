//! Text edit action handling.
//!
//! Typing over an active selection replaces it. An auto-closed `{` arms
//! `waiting_for_enter`; a newline typed while armed opens the pair onto
//! its own lines, and any other edit disarms it.

use super::DispatchResult;
use crate::EditOptions;
use core_state::EditorState;
use tracing::trace;

/// Remove the selected text, leaving the caret at its start.
pub(super) fn delete_selection(state: &mut EditorState) -> bool {
    let Some(sel) = state.selection() else {
        return false;
    };
    let removed = state.erase_range(sel.clone());
    state.set_cursor(sel.start, false);
    trace!(target: "actions.dispatch", op = "delete_selection", start = sel.start, removed = removed.chars().count(), "edit");
    true
}

pub(crate) fn insert_char(c: char, state: &mut EditorState, options: &EditOptions) -> DispatchResult {
    if c == '\n' {
        return newline(state);
    }
    delete_selection(state);
    let at = state.cursor();
    if c == '{' && options.auto_close_braces {
        state.insert_str(at, "{}");
        state.waiting_for_enter = true;
    } else {
        state.insert(at, c);
        state.waiting_for_enter = false;
    }
    state.set_cursor(at + 1, false);
    trace!(target: "actions.dispatch", op = "insert_char", ch = %c.escape_debug(), at, "edit");
    DispatchResult::edited()
}

pub(crate) fn newline(state: &mut EditorState) -> DispatchResult {
    delete_selection(state);
    let at = state.cursor();
    if state.waiting_for_enter {
        state.insert_str(at, "\n\n");
        state.waiting_for_enter = false;
    } else {
        state.insert(at, '\n');
    }
    state.set_cursor(at + 1, false);
    trace!(target: "actions.dispatch", op = "newline", at, "edit");
    DispatchResult::edited()
}

pub(crate) fn tab(state: &mut EditorState, options: &EditOptions) -> DispatchResult {
    delete_selection(state);
    state.waiting_for_enter = false;
    let at = state.cursor();
    let n = state.insert_str(at, &" ".repeat(options.tab_size));
    state.set_cursor(at + n, false);
    if n == 0 {
        return DispatchResult::dirty();
    }
    DispatchResult::edited()
}

pub(crate) fn backspace(state: &mut EditorState) -> DispatchResult {
    state.waiting_for_enter = false;
    if delete_selection(state) {
        return DispatchResult::edited();
    }
    let at = state.cursor();
    if at == 0 {
        return DispatchResult::clean();
    }
    state.erase(at - 1);
    state.set_cursor(at - 1, false);
    trace!(target: "actions.dispatch", op = "backspace", at, "edit");
    DispatchResult::edited()
}

pub(crate) fn delete(state: &mut EditorState) -> DispatchResult {
    state.waiting_for_enter = false;
    if delete_selection(state) {
        return DispatchResult::edited();
    }
    let at = state.cursor();
    match state.erase(at) {
        Some(_) => DispatchResult::edited(),
        None => DispatchResult::clean(),
    }
}

/// Copy the caret's line below itself and move the caret onto the copy.
pub(crate) fn duplicate_line(state: &mut EditorState) -> DispatchResult {
    state.waiting_for_enter = false;
    let cursor = state.cursor();
    let Some(block) = state
        .buffer()
        .belonging_block(cursor)
        .and_then(|i| state.blocks().get(i).copied())
    else {
        return DispatchResult::clean();
    };
    let line = state.buffer().slice(block.first..block.last);
    let mut copy = String::with_capacity(line.len() + 1);
    copy.push('\n');
    copy.push_str(&line);
    state.insert_str(block.last, &copy);
    state.set_cursor(block.last + 1 + (cursor - block.first), false);
    trace!(target: "actions.dispatch", op = "duplicate_line", first = block.first, last = block.last, "edit");
    DispatchResult::edited()
}
