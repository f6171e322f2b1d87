//! Editor actions and their dispatch onto `EditorState`.
//!
//! Input handling lives outside this crate: a front end turns key presses
//! into `Action`s and hands them to `dispatch` together with the clipboard
//! and the edit options loaded from configuration.

pub mod clipboard;
pub mod dispatcher;
pub mod io_ops;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use dispatcher::{DispatchResult, dispatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Type a character at the caret, replacing any selection.
    InsertChar(char),
    Newline,
    /// Insert `tab_size` spaces.
    Tab,
    Backspace,
    Delete,
    /// Move the caret; `extend` keeps the anchor so the selection follows.
    Move { motion: Motion, extend: bool },
    SelectAll,
    Copy,
    Cut,
    Paste,
    DuplicateLine,
    /// Write the buffer to its file when it has unsaved changes.
    Save,
}

impl Action {
    pub fn moves(motion: Motion) -> Self {
        Action::Move {
            motion,
            extend: false,
        }
    }

    pub fn extends(motion: Motion) -> Self {
        Action::Move {
            motion,
            extend: true,
        }
    }

    /// Whether this action can change document text.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Action::InsertChar(_)
                | Action::Newline
                | Action::Tab
                | Action::Backspace
                | Action::Delete
                | Action::Cut
                | Action::Paste
                | Action::DuplicateLine
        )
    }
}

/// Editing behaviour switches, normally taken from `core-config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOptions {
    pub tab_size: usize,
    pub auto_close_braces: bool,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            auto_close_braces: true,
        }
    }
}

/// Observer notified before each action is applied.
pub trait ActionObserver {
    fn on_action(&self, action: &Action);
}
