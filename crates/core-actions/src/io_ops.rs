//! File IO helpers.
//!
//! Synchronous and minimal. Loading normalizes line endings to `\n` and
//! records the original style on the state; saving expands them again.

use core_state::{EditorState, LineEnding, normalize_line_endings};
use core_text::{Buffer, GlyphSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum IoError {
    #[error("buffer has no associated file name")]
    NoFilename,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct OpenedFile {
    pub buffer: Buffer,
    pub file_name: PathBuf,
    pub original_line_ending: LineEnding,
    pub mixed_line_endings: bool,
}

impl std::fmt::Debug for OpenedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenedFile")
            .field("file_name", &self.file_name)
            .field("chars", &self.buffer.len())
            .field("original_line_ending", &self.original_line_ending)
            .field("mixed_line_endings", &self.mixed_line_endings)
            .finish()
    }
}

/// Read `path` into a new buffer with normalized line endings.
pub fn open_file(path: &Path, glyphs: Arc<dyn GlyphSource>) -> Result<OpenedFile, IoError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        error!(target: "io", path = %path.display(), error = %source, "file_open_error");
        IoError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let norm = normalize_line_endings(&content);
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("file");
    let buffer = Buffer::from_str(name, &norm.normalized, glyphs);
    debug!(
        target: "io",
        path = %path.display(),
        chars = buffer.len(),
        line_ending = ?norm.original,
        mixed = norm.mixed,
        "file_opened"
    );
    Ok(OpenedFile {
        buffer,
        file_name: path.to_path_buf(),
        original_line_ending: norm.original,
        mixed_line_endings: norm.mixed,
    })
}

/// Open `path` and make it the state's document, reusing the state's glyph provider.
pub fn load_into(state: &mut EditorState, path: &Path) -> Result<(), IoError> {
    let opened = open_file(path, state.buffer().glyphs().clone())?;
    state.replace_buffer(opened.buffer);
    state.file_name = Some(opened.file_name);
    state.original_line_ending = opened.original_line_ending;
    state.mark_saved();
    Ok(())
}

/// Write the document to `target` (or the state's file name) in its
/// original line-ending style. Clears the dirty status on success.
pub fn write_file(state: &mut EditorState, target: Option<&Path>) -> Result<PathBuf, IoError> {
    let path = match (target, state.file_name.as_ref()) {
        (Some(p), _) => p.to_path_buf(),
        (None, Some(existing)) => existing.clone(),
        (None, None) => return Err(IoError::NoFilename),
    };
    let content = state.original_line_ending.expand(&state.text());
    std::fs::write(&path, content.as_bytes()).map_err(|source| {
        error!(target: "io", path = %path.display(), error = %source, "file_write_error");
        IoError::Write {
            path: path.clone(),
            source,
        }
    })?;
    state.mark_saved();
    debug!(target: "io", path = %path.display(), bytes = content.len(), "file_written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_syntax::LanguageProfile;
    use core_text::MonospaceGlyphs;

    fn glyphs() -> Arc<dyn GlyphSource> {
        Arc::new(MonospaceGlyphs::new(8, 16))
    }

    #[test]
    fn open_file_normalizes_and_sets_metadata() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.cpp");
        {
            let mut f = std::fs::File::create(&path).unwrap();
            write!(f, "line1\r\nline2\nline3\r\n").unwrap();
        }
        let opened = open_file(&path, glyphs()).unwrap();
        assert_eq!(opened.buffer.text(), "line1\nline2\nline3\n");
        assert_eq!(opened.buffer.name, "sample.cpp");
        assert_eq!(opened.original_line_ending, LineEnding::Crlf);
        assert!(opened.mixed_line_endings, "should detect mixed endings");
    }

    #[test]
    fn open_missing_file_reports_path() {
        let err = open_file(Path::new("__missing_quill_file__.txt"), glyphs()).unwrap_err();
        assert!(matches!(err, IoError::Read { .. }));
        assert!(err.to_string().contains("__missing_quill_file__.txt"));
    }

    #[test]
    fn write_file_preserves_original_style() {
        let buffer = Buffer::from_str("t", "a\nb\n", glyphs());
        let mut state = EditorState::with_profile(buffer, LanguageProfile::cpp());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        state.file_name = Some(path.clone());
        state.original_line_ending = LineEnding::Crlf;
        state.insert(0, 'x');
        assert!(state.is_dirty());
        let written_to = write_file(&mut state, None).unwrap();
        assert_eq!(written_to, path);
        assert!(!state.is_dirty(), "dirty cleared after write");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "xa\r\nb\r\n");
    }

    #[test]
    fn trailing_newline_survives_in_the_document() {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in [("with.txt", "a\r\nb\r\n"), ("without.txt", "a\r\nb")] {
            let path = dir.path().join(name);
            std::fs::write(&path, body).unwrap();
            let mut state =
                EditorState::with_profile(Buffer::from_str("t", "", glyphs()), LanguageProfile::cpp());
            load_into(&mut state, &path).unwrap();
            state.insert(0, 'x');
            write_file(&mut state, None).unwrap();
            assert_eq!(std::fs::read_to_string(&path).unwrap(), format!("x{body}"));
        }
    }

    #[test]
    fn write_file_no_filename() {
        let mut state = EditorState::with_profile(Buffer::from_str("t", "x", glyphs()), LanguageProfile::cpp());
        state.insert(1, 'y');
        let res = write_file(&mut state, None);
        assert!(matches!(res, Err(IoError::NoFilename)));
        assert!(state.is_dirty(), "dirty unchanged when no filename");
    }

    #[test]
    fn load_into_replaces_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.py");
        std::fs::write(&path, "a\rb\rc").unwrap();
        let mut state = EditorState::with_profile(Buffer::from_str("t", "old", glyphs()), LanguageProfile::python());
        state.insert(0, 'z');
        load_into(&mut state, &path).unwrap();
        assert_eq!(state.text(), "a\nb\nc");
        assert_eq!(state.selection_rects().len(), 3);
        assert_eq!(state.original_line_ending, LineEnding::Cr);
        assert!(!state.is_dirty());
        assert_eq!(state.file_name.as_deref(), Some(path.as_path()));
    }
}
