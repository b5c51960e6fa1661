// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the PKGBUILD scanner.

use std::fmt;

use thiserror::Error;

use crate::position::{context_snippet, diagnostic_context, Position};

/// What was still open when the input ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unclosed {
    SingleQuote,
    DoubleQuote,
    Backtick,
    Escape,
    Paren,
    Bracket,
    Brace,
    Name,
    Array,
    FunctionHeader,
    HereDoc,
}

impl fmt::Display for Unclosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            Self::SingleQuote => "single quote",
            Self::DoubleQuote => "double quote",
            Self::Backtick => "backtick",
            Self::Escape => "escape",
            Self::Paren => "parenthesis",
            Self::Bracket => "bracket",
            Self::Brace => "brace",
            Self::Name => "name",
            Self::Array => "array",
            Self::FunctionHeader => "function header",
            Self::HereDoc => "here-document",
        };
        f.write_str(what)
    }
}

/// Assignment shapes outside the declaration grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxIssue {
    /// `name[i]=value`
    Index,
    /// `name+=value`
    Append,
}

impl fmt::Display for SyntaxIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => f.write_str("indexed assignment"),
            Self::Append => f.write_str("append assignment"),
        }
    }
}

/// Errors that abort a scan. All of them are terminal for the scanner.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A character that is not allowed in the current scanner state.
    #[error("unexpected character '{}' at {position}", .ch.escape_debug())]
    InvalidToken { ch: char, position: Position },

    /// The input ended while something was still open.
    #[error("unterminated {unclosed} at {position}")]
    UnterminatedToken { unclosed: Unclosed, position: Position },

    /// A declaration whose shape is not a plain assignment.
    #[error("{issue} to '{name}' is not supported at {position}")]
    InvalidSyntax { name: String, issue: SyntaxIssue, position: Position },
}

impl ScanError {
    pub fn position(&self) -> Position {
        match self {
            Self::InvalidToken { position, .. } => *position,
            Self::UnterminatedToken { position, .. } => *position,
            Self::InvalidSyntax { position, .. } => *position,
        }
    }

    /// Short snippet around the error location.
    pub fn context(&self, input: &str, context_chars: usize) -> String {
        context_snippet(input, self.position(), context_chars)
    }

    /// Rustc-style diagnostic using the default messages.
    pub fn diagnostic(&self, input: &str) -> String {
        self.diagnostic_with(input, &PlainMessages)
    }

    /// Rustc-style diagnostic with caller-supplied messages.
    pub fn diagnostic_with(&self, input: &str, messages: &dyn MessageFormat) -> String {
        diagnostic_context(input, self.position(), &messages.scan_error(self))
    }
}

/// Renders diagnostic messages, e.g. in the user's language.
pub trait MessageFormat {
    fn scan_error(&self, err: &ScanError) -> String;
}

/// English messages, identical to the `Display` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainMessages;

impl MessageFormat for PlainMessages {
    fn scan_error(&self, err: &ScanError) -> String {
        err.to_string()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
