use std::{fmt::Formatter, str::Chars};

use derive_more::Display;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Line(pub usize);

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Col(pub usize);

/// Walks a source string one `char` at a time while keeping track of the
/// line and column of the *next* character.
#[derive(Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    chars: Chars<'a>,
    line: Line,
    col: Col,
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // The remaining source is rarely useful and often huge
        if f.alternate() {
            f.debug_struct("Cursor")
                .field("line", &self.line)
                .field("col", &self.col)
                .field("rest", &self.chars.as_str())
                .finish()
        } else {
            f.debug_struct("Cursor").field("line", &self.line).field("col", &self.col).finish()
        }
    }
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, chars: source.chars(), line: Line(1), col: Col(1) }
    }

    pub fn line(&self) -> Line {
        self.line
    }

    pub fn col(&self) -> Col {
        self.col
    }

    pub fn is_at_end(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    pub fn peek_next(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    /// Source text between `self` (inclusive) and `end` (exclusive).
    pub fn slice_until(&self, end: &Cursor<'a>) -> &'a str {
        assert!(std::ptr::eq(self.source, end.source), "cursors belong to different sources");
        &self.source[self.offset()..end.offset()]
    }

    fn offset(&self) -> usize {
        self.source.len() - self.chars.as_str().len()
    }
}

impl<'a> From<&'a str> for Cursor<'a> {
    fn from(source: &'a str) -> Self {
        Self::new(source)
    }
}

impl Iterator for Cursor<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line.0 += 1;
            self.col = Col(1);
        } else {
            self.col.0 += 1;
        }
        Some(c)
    }
}
