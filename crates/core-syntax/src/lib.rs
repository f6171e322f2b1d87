//! Lexical highlighting for the editor core.
//!
//! `Highlighter` turns a document into colored spans according to a
//! `LanguageProfile`; `SpanCursor` replays those spans while a renderer
//! walks the text.

pub mod color;
pub mod highlight;
pub mod profile;

pub use color::Rgba;
pub use highlight::{HighlightSpan, Highlighter, SpanCursor};
pub use profile::{
    HashRule, LanguageProfile, Palette, ProfileKind, ProfileParseError, TokenClass, TokenRules,
};
