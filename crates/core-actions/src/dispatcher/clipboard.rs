//! Select all / copy / cut / paste.

use super::DispatchResult;
use super::edit::delete_selection;
use crate::Clipboard;
use core_state::EditorState;
use tracing::trace;

pub(crate) fn select_all(state: &mut EditorState) -> DispatchResult {
    let len = state.len();
    if len == 0 {
        return DispatchResult::clean();
    }
    state.waiting_for_enter = false;
    state.select(0, len);
    DispatchResult::dirty()
}

pub(crate) fn copy(state: &mut EditorState, clipboard: &mut dyn Clipboard) -> DispatchResult {
    if let Some(text) = state.selected_text() {
        trace!(target: "actions.dispatch", op = "copy", chars = text.chars().count(), "clipboard");
        clipboard.set_text(&text);
    }
    DispatchResult::clean()
}

pub(crate) fn cut(state: &mut EditorState, clipboard: &mut dyn Clipboard) -> DispatchResult {
    let Some(text) = state.selected_text() else {
        return DispatchResult::clean();
    };
    clipboard.set_text(&text);
    state.waiting_for_enter = false;
    delete_selection(state);
    trace!(target: "actions.dispatch", op = "cut", chars = text.chars().count(), "clipboard");
    DispatchResult::edited()
}

/// Insert clipboard text at the caret; carriage returns are dropped.
pub(crate) fn paste(state: &mut EditorState, clipboard: &mut dyn Clipboard) -> DispatchResult {
    let Some(raw) = clipboard.get_text() else {
        return DispatchResult::clean();
    };
    let text: String = raw.chars().filter(|c| *c != '\r').collect();
    if text.is_empty() {
        return DispatchResult::clean();
    }
    state.waiting_for_enter = false;
    delete_selection(state);
    let at = state.cursor();
    let n = state.insert_str(at, &text);
    state.set_cursor(at + n, false);
    trace!(target: "actions.dispatch", op = "paste", at, chars = n, "clipboard");
    DispatchResult::edited()
}
