// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source location tracking for PKGBUILD documents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in the source text.
///
/// Lines are 1-indexed, columns count characters from the line start
/// (0-indexed) and offsets are byte offsets from the start of the document.
/// Positions order by line, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    /// The position of the first character of a document.
    pub const START: Position = Position { line: 1, column: 0, offset: 0 };

    #[inline]
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Advance past one character.
    #[inline]
    pub fn next(self, ch: char) -> Self {
        let offset = self.offset + ch.len_utf8();
        if ch == '\n' {
            Self { line: self.line + 1, column: 0, offset }
        } else {
            Self { line: self.line, column: self.column + 1, offset }
        }
    }

    /// Advance past every character of `text`.
    pub fn next_str(self, text: &str) -> Self {
        text.chars().fold(self, Position::next)
    }

    /// Whitespace that fills the gap between `self` and a later position.
    ///
    /// A gap spanning lines renders as newlines followed by the target column
    /// in spaces. Returns an empty string when `to` is not after `self`.
    pub fn blank(self, to: Position) -> String {
        if to.line > self.line {
            let mut out = "\n".repeat(to.line - self.line);
            out.push_str(&" ".repeat(to.column));
            out
        } else if to.line == self.line && to.column > self.column {
            " ".repeat(to.column - self.column)
        } else {
            String::new()
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column + 1)
    }
}

/// A `[begin, end)` range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub begin: Position,
    pub end: Position,
}

impl Span {
    #[inline]
    pub fn new(begin: Position, end: Position) -> Self {
        debug_assert!(begin <= end, "span begin must not exceed end");
        Self { begin, end }
    }

    #[inline]
    pub fn empty(at: Position) -> Self {
        Self { begin: at, end: at }
    }

    /// Span covering `text` when it starts at `begin`.
    #[inline]
    pub fn of(begin: Position, text: &str) -> Self {
        Self { begin, end: begin.next_str(text) }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Returns true if `begin <= pos < end`.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos >= self.begin && pos < self.end
    }

    /// Merge two spans into one that covers both.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span { begin: self.begin.min(other.begin), end: self.end.max(other.end) }
    }

    /// Extract the spanned text from a source that starts at `origin`.
    ///
    /// Returns an empty string if the span is out of bounds or not on valid
    /// UTF-8 character boundaries.
    pub fn slice<'a>(&self, source: &'a str, origin: usize) -> &'a str {
        let (Some(start), Some(end)) =
            (self.begin.offset.checked_sub(origin), self.end.offset.checked_sub(origin))
        else {
            return "";
        };
        source.get(start..end).unwrap_or("")
    }
}

/// Return the text of line `line` (1-indexed), without its newline.
pub fn line_content(source: &str, line: usize) -> &str {
    source.split('\n').nth(line.saturating_sub(1)).unwrap_or("")
}

/// Generate a context snippet showing a position in source text.
///
/// ```text
/// arch=(x86_64 ]
///              ^
/// ```
pub fn context_snippet(source: &str, position: Position, context_chars: usize) -> String {
    let line = line_content(source, position.line);
    let chars: Vec<char> = line.chars().collect();
    let column = position.column.min(chars.len());
    let start = column.saturating_sub(context_chars);
    let end = (column + context_chars + 1).min(chars.len());
    let snippet: String = chars[start..end].iter().collect();
    format!("{}\n{}^", snippet, " ".repeat(column - start))
}

/// Generate a rich diagnostic message with line/column info.
///
/// ```text
/// error: unexpected character ']' at 1:14
///   --> line 1, column 14
///    |
///  1 | arch=(x86_64 ]
///    |              ^
/// ```
pub fn diagnostic_context(source: &str, position: Position, message: &str) -> String {
    let line = line_content(source, position.line);
    format!(
        "error: {}\n  --> line {}, column {}\n   |\n{:>3} | {}\n   | {}^",
        message,
        position.line,
        position.column + 1,
        position.line,
        line,
        " ".repeat(position.column)
    )
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod tests;
