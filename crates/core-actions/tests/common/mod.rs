#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{Action, DispatchResult, EditOptions, MemoryClipboard, dispatch};
use core_state::EditorState;
use core_syntax::LanguageProfile;
use core_text::{Buffer, GlyphSource, MonospaceGlyphs};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::Level;
use tracing::subscriber::with_default;
use tracing_subscriber::fmt::MakeWriter;

pub const CELL: u32 = 10;
pub const LINE: u32 = 20;

pub fn glyphs() -> Arc<dyn GlyphSource> {
    Arc::new(MonospaceGlyphs::new(CELL, LINE))
}

/// Editor fixture bundling state, clipboard and options.
pub struct Session {
    pub state: EditorState,
    pub clipboard: MemoryClipboard,
    pub options: EditOptions,
}

impl Session {
    pub fn new(text: &str, profile: LanguageProfile) -> Self {
        let buffer = Buffer::from_str("session", text, glyphs());
        Self {
            state: EditorState::with_profile(buffer, profile),
            clipboard: MemoryClipboard::new(),
            options: EditOptions::default(),
        }
    }

    pub fn cpp(text: &str) -> Self {
        Self::new(text, LanguageProfile::cpp())
    }

    pub fn run(&mut self, action: Action) -> DispatchResult {
        dispatch(action, &mut self.state, &mut self.clipboard, &self.options, &[])
    }

    pub fn run_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.run(action);
        }
    }

    pub fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            let action = if c == '\n' {
                Action::Newline
            } else {
                Action::InsertChar(c)
            };
            self.run(action);
        }
    }

    pub fn text(&self) -> String {
        self.state.text()
    }

    /// Widths of the selection rectangles, one per line.
    pub fn rect_widths(&self) -> Vec<f32> {
        self.state
            .selection_rects()
            .as_slice()
            .iter()
            .map(|r| r.width())
            .collect()
    }
}

#[derive(Clone)]
struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

struct LockedWriter<'a> {
    guard: MutexGuard<'a, Vec<u8>>,
}

impl Write for LockedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = LockedWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LockedWriter {
            guard: self.inner.lock().expect("log buffer poisoned"),
        }
    }
}

/// Run `f` under a plain-text subscriber and return everything it logged.
pub fn capture_logs<F: FnOnce()>(level: Level, f: F) -> String {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .with_writer(BufferWriter {
            inner: buffer.clone(),
        })
        .finish();
    with_default(subscriber, f);
    let bytes = buffer.lock().expect("log buffer poisoned").clone();
    String::from_utf8(bytes).expect("log output is utf-8")
}
