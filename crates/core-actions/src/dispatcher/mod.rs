//! Dispatcher applying `Action` to mutable editor state.
//!
//! Sub-modules:
//! * `motion`    - caret movement and selection extension
//! * `edit`      - text mutation (insert/newline/tab/backspace/delete/duplicate)
//! * `clipboard` - select all, copy, cut, paste
//!
//! Every dispatch ends by recomputing the selection rectangles so the
//! renderer always sees rectangles for the current anchor and caret.

use crate::{Action, ActionObserver, Clipboard, EditOptions, io_ops};
use core_state::EditorState;
use tracing::{debug, error, trace};

mod clipboard;
mod edit;
mod motion;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// Something visible changed (text, caret or selection).
    pub dirty: bool,
    /// Document text changed; highlight spans were recomputed.
    pub text_changed: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn dirty() -> Self {
        Self {
            dirty: true,
            text_changed: false,
        }
    }

    pub fn edited() -> Self {
        Self {
            dirty: true,
            text_changed: true,
        }
    }
}

/// Apply an action to editor state.
pub fn dispatch(
    action: Action,
    state: &mut EditorState,
    clipboard: &mut dyn Clipboard,
    options: &EditOptions,
    observers: &[Box<dyn ActionObserver>],
) -> DispatchResult {
    for obs in observers {
        obs.on_action(&action);
    }
    let before = (state.cursor(), state.anchor());

    let result = match action {
        Action::Move { motion, extend } => motion::handle_motion(motion, extend, state),
        Action::InsertChar(c) => edit::insert_char(c, state, options),
        Action::Newline => edit::newline(state),
        Action::Tab => edit::tab(state, options),
        Action::Backspace => edit::backspace(state),
        Action::Delete => edit::delete(state),
        Action::DuplicateLine => edit::duplicate_line(state),
        Action::SelectAll => clipboard::select_all(state),
        Action::Copy => clipboard::copy(state, clipboard),
        Action::Cut => clipboard::cut(state, clipboard),
        Action::Paste => clipboard::paste(state, clipboard),
        Action::Save => save(state),
    };

    if result.dirty || before != (state.cursor(), state.anchor()) {
        state.refresh_selection();
    }
    trace!(
        target: "actions.dispatch",
        ?action,
        cursor = state.cursor(),
        anchor = state.anchor(),
        dirty = result.dirty,
        text_changed = result.text_changed,
        "dispatched"
    );
    result
}

fn save(state: &mut EditorState) -> DispatchResult {
    if !state.is_dirty() {
        debug!(target: "actions.dispatch", "save_skipped_clean");
        return DispatchResult::clean();
    }
    match io_ops::write_file(state, None) {
        Ok(path) => {
            debug!(target: "actions.dispatch", path = %path.display(), "saved");
            DispatchResult::dirty()
        }
        Err(e) => {
            error!(target: "actions.dispatch", error = %e, "save_failed");
            DispatchResult::clean()
        }
    }
}
