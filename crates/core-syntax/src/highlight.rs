//! Single-pass lexical highlighter.
//!
//! Every call rescans the whole document and returns spans sorted by `start`
//! with no overlaps. There is no tokenizer state carried between calls.

use crate::color::Rgba;
use crate::profile::{HashRule, LanguageProfile, TokenClass};
use tracing::trace;

/// Half-open `[start, end)` range of chars sharing one token class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub class: TokenClass,
    pub color: Rgba,
}

impl HighlightSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    profile: LanguageProfile,
}

impl Highlighter {
    pub fn new(profile: LanguageProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    pub fn set_profile(&mut self, profile: LanguageProfile) {
        self.profile = profile;
    }

    pub fn highlight_str(&self, text: &str) -> Vec<HighlightSpan> {
        let chars: Vec<char> = text.chars().collect();
        self.highlight(&chars)
    }

    pub fn highlight(&self, text: &[char]) -> Vec<HighlightSpan> {
        let mut scan = Scan {
            text,
            profile: &self.profile,
            spans: Vec::new(),
        };
        let mut i = 0;
        while i < text.len() {
            i = scan.step(i);
        }
        trace!(
            target: "syntax",
            profile = %self.profile.kind,
            chars = text.len(),
            spans = scan.spans.len(),
            "highlighted"
        );
        scan.spans
    }
}

struct Scan<'a> {
    text: &'a [char],
    profile: &'a LanguageProfile,
    spans: Vec<HighlightSpan>,
}

impl Scan<'_> {
    fn at(&self, i: usize) -> Option<char> {
        self.text.get(i).copied()
    }

    fn push(&mut self, start: usize, end: usize, class: TokenClass) {
        if end > start {
            let color = self.profile.palette.color(class);
            self.spans.push(HighlightSpan {
                start,
                end,
                class,
                color,
            });
        }
    }

    /// Consumes one token (or one plain char) at `i` and returns the next scan position.
    fn step(&mut self, i: usize) -> usize {
        let c = self.text[i];
        let rules = self.profile.rules;

        if c.is_ascii_alphabetic() || c == '_' {
            return self.word(i);
        }
        if c.is_ascii_digit() {
            return self.number(i);
        }
        if rules.slash_comments && c == '/' {
            match self.at(i + 1) {
                Some('/') => return self.line_comment(i),
                Some('*') => return self.block_comment(i),
                _ => {}
            }
        }
        if (c == '"' || c == '\'') && i + 1 < self.text.len() {
            return self.quoted(i, c);
        }
        if c == '#' {
            match rules.hash {
                HashRule::Preprocessor => return self.directive(i),
                HashRule::LineComment => return self.line_comment(i),
                HashRule::None => {}
            }
        }
        i + 1
    }

    fn word(&mut self, start: usize) -> usize {
        let end = self.run_while(start, |c| c.is_ascii_alphanumeric() || c == '_');
        let word: String = self.text[start..end].iter().collect();
        if let Some(class) = self.profile.keyword_class(&word) {
            self.push(start, end, class);
        } else if self.profile.rules.function_calls && self.at(end) == Some('(') {
            self.push(start, end, TokenClass::Function);
        }
        end
    }

    fn number(&mut self, start: usize) -> usize {
        let mut end = self.run_while(start, |c| c.is_ascii_digit());
        if self.at(end) == Some('.') {
            end = self.run_while(end + 1, |c| c.is_ascii_digit());
            if self.profile.rules.numeric_suffixes
                && matches!(self.at(end), Some('f' | 'F' | 'u' | 'U' | 'l' | 'L'))
            {
                end += 1;
            }
        }
        self.push(start, end, TokenClass::NumberLiteral);
        end
    }

    fn line_comment(&mut self, start: usize) -> usize {
        let end = self.line_end(start);
        self.push(start, end, TokenClass::Comment);
        end
    }

    fn block_comment(&mut self, start: usize) -> usize {
        let mut j = start + 2;
        let end = loop {
            match (self.at(j), self.at(j + 1)) {
                (Some('*'), Some('/')) => break j + 2,
                (Some(_), _) => j += 1,
                (None, _) => break self.text.len(),
            }
        };
        self.push(start, end, TokenClass::Comment);
        end
    }

    fn quoted(&mut self, start: usize, quote: char) -> usize {
        let end = match self.text[start + 1..].iter().position(|&c| c == quote) {
            Some(rel) => start + 1 + rel + 1,
            None => self.text.len(),
        };
        self.push(start, end, TokenClass::StringLiteral);
        end
    }

    fn directive(&mut self, start: usize) -> usize {
        let end = self.run_while(start + 1, |c| c != ' ' && c != '\n');
        self.push(start, end, TokenClass::Preprocessor);
        if self.at(end) == Some(' ') && self.at(end + 1) == Some('<') {
            let header_end = self.line_end(end + 1);
            self.push(end + 1, header_end, TokenClass::StringLiteral);
            return header_end;
        }
        end
    }

    fn run_while(&self, from: usize, pred: impl Fn(char) -> bool) -> usize {
        let mut j = from;
        while self.at(j).is_some_and(&pred) {
            j += 1;
        }
        j
    }

    fn line_end(&self, from: usize) -> usize {
        self.run_while(from, |c| c != '\n')
    }
}

/// Walks spans in order while a renderer visits chars left to right.
///
/// Spans are consumed FIFO: the active span switches on at `start` and is
/// dropped once the walk passes `end - 1`.
#[derive(Debug, Clone)]
pub struct SpanCursor<'a> {
    spans: &'a [HighlightSpan],
    next: usize,
}

impl<'a> SpanCursor<'a> {
    pub fn new(spans: &'a [HighlightSpan]) -> Self {
        Self { spans, next: 0 }
    }

    /// Span covering `offset`, if any. Offsets must be visited in increasing order.
    pub fn advance(&mut self, offset: usize) -> Option<&'a HighlightSpan> {
        while let Some(span) = self.spans.get(self.next) {
            if span.end <= offset {
                self.next += 1;
                continue;
            }
            return span.contains(offset).then_some(span);
        }
        None
    }

    pub fn color_at(&mut self, offset: usize, default: Rgba) -> Rgba {
        self.advance(offset).map_or(default, |s| s.color)
    }

    pub fn remaining(&self) -> usize {
        self.spans.len() - self.next
    }
}
