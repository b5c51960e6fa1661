// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Quote contexts and the characters each one must escape.

use serde::{Deserialize, Serialize};

/// Quoting context of a piece of shell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QuoteStyle {
    /// Outside any quotes.
    #[default]
    Unquoted,
    /// Inside `'...'`.
    Single,
    /// Inside `"..."`.
    Double,
}

impl QuoteStyle {
    /// The quote character opening and closing this context.
    pub fn quote_char(self) -> Option<char> {
        match self {
            Self::Unquoted => None,
            Self::Single => Some('\''),
            Self::Double => Some('"'),
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            _ => None,
        }
    }
}

/// Returns true if `ch` cannot appear verbatim in the given context.
pub fn needs_escape(ch: char, style: QuoteStyle) -> bool {
    match style {
        QuoteStyle::Unquoted => matches!(
            ch,
            ' ' | '\t'
                | '\n'
                | '|'
                | '&'
                | ';'
                | '('
                | ')'
                | '<'
                | '>'
                | '*'
                | '?'
                | '['
                | ']'
                | '~'
                | '{'
                | '}'
                | '$'
                | '`'
                | '\''
                | '"'
                | '#'
                | '\\'
        ),
        QuoteStyle::Double => matches!(ch, '$' | '`' | '"' | '\\'),
        QuoteStyle::Single => ch == '\'',
    }
}

/// Returns true if `text` can appear verbatim in the given context.
pub fn is_clean(text: &str, style: QuoteStyle) -> bool {
    !text.chars().any(|c| needs_escape(c, style))
}

/// Escape `text` for the inside of the given context.
///
/// A single quote inside single quotes closes the quote, emits an escaped
/// quote and reopens it.
pub fn escape(text: &str, style: QuoteStyle) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if !needs_escape(ch, style) {
            out.push(ch);
        } else if style == QuoteStyle::Single {
            out.push_str("'\\''");
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}

/// Escape `text` and wrap it in the quotes of the given context.
pub fn quote(text: &str, style: QuoteStyle) -> String {
    let inner = escape(text, style);
    match style.quote_char() {
        Some(q) => format!("{q}{inner}{q}"),
        None => inner,
    }
}

#[cfg(test)]
#[path = "escape_tests.rs"]
mod tests;
