// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Quote and bracket tracking while reading a value word.

use crate::error::Unclosed;
use crate::token::{closing_bracket, is_blank, is_control_operator};

/// Tracks what is open inside a word: a quote, a pending escape and nested
/// brackets (`${...}`, `$(...)`, globs).
#[derive(Debug, Default)]
pub(super) struct Delimiter {
    quote: Option<char>,
    escaped: bool,
    stack: Vec<char>,
}

impl Delimiter {
    /// Nothing is open: an unquoted blank would end the word here.
    pub(super) fn is_closed(&self) -> bool {
        self.quote.is_none() && !self.escaped && self.stack.is_empty()
    }

    /// Account for `ch`. Returns false if `ch` cannot appear at this point.
    pub(super) fn feed(&mut self, ch: char) -> bool {
        if self.escaped {
            self.escaped = false;
            return true;
        }
        match self.quote {
            Some('\'') => {
                if ch == '\'' {
                    self.quote = None;
                }
                true
            }
            Some(q) => {
                if ch == '\\' {
                    self.escaped = true;
                } else if ch == q {
                    self.quote = None;
                }
                true
            }
            None => match ch {
                '\\' => {
                    self.escaped = true;
                    true
                }
                '\'' | '"' | '`' => {
                    self.quote = Some(ch);
                    true
                }
                '(' | '[' | '{' => {
                    self.stack.push(ch);
                    true
                }
                ')' | ']' | '}' => self.stack.pop().and_then(closing_bracket) == Some(ch),
                c if is_control_operator(c) || is_blank(c) => !self.stack.is_empty(),
                _ => true,
            },
        }
    }

    /// What is still open, innermost first.
    pub(super) fn unclosed(&self) -> Option<Unclosed> {
        if self.escaped {
            return Some(Unclosed::Escape);
        }
        match self.quote {
            Some('\'') => return Some(Unclosed::SingleQuote),
            Some('"') => return Some(Unclosed::DoubleQuote),
            Some(_) => return Some(Unclosed::Backtick),
            None => {}
        }
        self.stack.last().map(|open| match open {
            '(' => Unclosed::Paren,
            '[' => Unclosed::Bracket,
            _ => Unclosed::Brace,
        })
    }
}
