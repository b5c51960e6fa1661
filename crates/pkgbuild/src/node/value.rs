// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Values split into literal text and variable references.

use std::iter::Peekable;
use std::str::Chars;

use crate::env::Environ;
use crate::error::{ScanError, Unclosed};
use crate::escape::{escape, QuoteStyle};
use crate::position::Position;
use crate::token::{is_special_parameter, is_valid_variable_char, is_valid_variable_name, is_valid_variable_start};

/// A fragment of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueElement {
    /// Literal text, with the quoting it was written in.
    ///
    /// A backslash-escaped character is as literal as a single-quoted one and
    /// is recorded as [`QuoteStyle::Single`].
    Literal { value: String, quoted: QuoteStyle },
    /// `$name` or `${name}`.
    Reference(String),
    /// Any other expansion (`${v//./_}`, `$(cmd)`, `` `cmd` ``, `$1`), kept
    /// as written.
    Expansion(String),
}

impl ValueElement {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal { value: value.into(), quoted: QuoteStyle::Unquoted }
    }

    pub fn single_quoted(value: impl Into<String>) -> Self {
        Self::Literal { value: value.into(), quoted: QuoteStyle::Single }
    }

    pub fn double_quoted(value: impl Into<String>) -> Self {
        Self::Literal { value: value.into(), quoted: QuoteStyle::Double }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }
}

/// An ordered list of [`ValueElement`]s making up one shell word.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueFormatter {
    elements: Vec<ValueElement>,
}

impl ValueFormatter {
    pub fn new(elements: Vec<ValueElement>) -> Self {
        Self { elements }
    }

    /// Split a raw shell word into fragments.
    pub fn from_word(word: &str) -> Result<Self, ScanError> {
        Self::from_word_at(word, Position::START)
    }

    /// Like [`ValueFormatter::from_word`], reporting errors relative to `begin`.
    pub fn from_word_at(word: &str, begin: Position) -> Result<Self, ScanError> {
        WordParser::new(word, begin).parse()
    }

    pub fn elements(&self) -> &[ValueElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Names of the variables referenced by this value, in order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            ValueElement::Reference(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn has_reference(&self) -> bool {
        self.references().next().is_some()
    }

    /// Substitute references from `env`; unknown names resolve to "".
    ///
    /// Other expansions are left as written.
    pub fn resolve(&self, env: &dyn Environ) -> String {
        let mut out = String::new();
        for element in &self.elements {
            match element {
                ValueElement::Literal { value, .. } => out.push_str(value),
                ValueElement::Reference(name) => out.push_str(env.get(name).as_str()),
                ValueElement::Expansion(raw) => out.push_str(raw),
            }
        }
        out
    }

    /// Render the word in a single quote context.
    ///
    /// Unquoted output escapes shell metacharacters. References and
    /// expansions cannot live inside single quotes, so the quote is closed
    /// around them.
    pub fn format(&self, style: QuoteStyle) -> String {
        match style {
            QuoteStyle::Unquoted => self.elements.iter().map(|e| render_element(e, style)).collect(),
            QuoteStyle::Double => {
                let inner: String = self.elements.iter().map(|e| render_element(e, style)).collect();
                format!("\"{inner}\"")
            }
            QuoteStyle::Single => {
                if self.elements.is_empty() {
                    return "''".to_string();
                }
                let mut out = String::new();
                let mut run: Option<String> = None;
                for element in &self.elements {
                    if let ValueElement::Literal { value, .. } = element {
                        run.get_or_insert_with(String::new).push_str(&escape(value, style));
                        continue;
                    }
                    if let Some(text) = run.take() {
                        out.push_str(&format!("'{text}'"));
                    }
                    out.push_str(&format!("\"{}\"", render_element(element, QuoteStyle::Double)));
                }
                if let Some(text) = run {
                    out.push_str(&format!("'{text}'"));
                }
                out
            }
        }
    }
}

/// Render one fragment inside the given context, without surrounding quotes.
pub(crate) fn render_element(element: &ValueElement, style: QuoteStyle) -> String {
    match element {
        ValueElement::Literal { value, .. } => escape(value, style),
        ValueElement::Reference(name) => format!("${{{name}}}"),
        ValueElement::Expansion(raw) => raw.clone(),
    }
}

struct WordParser<'a> {
    chars: Peekable<Chars<'a>>,
    pos: Position,
    elements: Vec<ValueElement>,
    buf: String,
    buf_style: QuoteStyle,
}

impl<'a> WordParser<'a> {
    fn new(word: &'a str, begin: Position) -> Self {
        Self {
            chars: word.chars().peekable(),
            pos: begin,
            elements: Vec::new(),
            buf: String::new(),
            buf_style: QuoteStyle::Unquoted,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.pos = self.pos.next(ch);
        Some(ch)
    }

    fn unterminated(&self, unclosed: Unclosed) -> ScanError {
        ScanError::UnterminatedToken { unclosed, position: self.pos }
    }

    fn push_literal(&mut self, ch: char, style: QuoteStyle) {
        if !self.buf.is_empty() && self.buf_style != style {
            self.flush();
        }
        self.buf_style = style;
        self.buf.push(ch);
    }

    fn flush(&mut self) {
        if !self.buf.is_empty() {
            let value = std::mem::take(&mut self.buf);
            self.elements.push(ValueElement::Literal { value, quoted: self.buf_style });
        }
    }

    fn push_element(&mut self, element: ValueElement) {
        self.flush();
        self.elements.push(element);
    }

    fn parse(mut self) -> Result<ValueFormatter, ScanError> {
        let mut style = QuoteStyle::Unquoted;
        while let Some(ch) = self.bump() {
            match (style, ch) {
                (QuoteStyle::Single, '\'') => style = QuoteStyle::Unquoted,
                (QuoteStyle::Single, c) => self.push_literal(c, QuoteStyle::Single),
                (QuoteStyle::Unquoted, '\'') => style = QuoteStyle::Single,
                (QuoteStyle::Unquoted, '"') => style = QuoteStyle::Double,
                (QuoteStyle::Double, '"') => style = QuoteStyle::Unquoted,
                (QuoteStyle::Unquoted, '\\') => match self.bump() {
                    None => return Err(self.unterminated(Unclosed::Escape)),
                    Some('\n') => {}
                    Some(c) => self.push_literal(c, QuoteStyle::Single),
                },
                (QuoteStyle::Double, '\\') => match self.bump() {
                    None => return Err(self.unterminated(Unclosed::Escape)),
                    Some('\n') => {}
                    Some(c @ ('$' | '`' | '"' | '\\')) => self.push_literal(c, QuoteStyle::Double),
                    Some(c) => {
                        self.push_literal('\\', QuoteStyle::Double);
                        self.push_literal(c, QuoteStyle::Double);
                    }
                },
                (_, '$') => self.parse_dollar(style)?,
                (_, '`') => self.parse_backtick()?,
                (s, c) => self.push_literal(c, s),
            }
        }
        match style {
            QuoteStyle::Unquoted => {}
            QuoteStyle::Single => return Err(self.unterminated(Unclosed::SingleQuote)),
            QuoteStyle::Double => return Err(self.unterminated(Unclosed::DoubleQuote)),
        }
        self.flush();
        Ok(ValueFormatter { elements: self.elements })
    }

    fn parse_dollar(&mut self, style: QuoteStyle) -> Result<(), ScanError> {
        match self.chars.peek().copied() {
            Some('{') => {
                self.bump();
                let content = self.read_balanced('{', '}', Unclosed::Brace)?;
                if is_valid_variable_name(&content) {
                    self.push_element(ValueElement::Reference(content));
                } else {
                    self.push_element(ValueElement::Expansion(format!("${{{content}}}")));
                }
            }
            Some('(') => {
                self.bump();
                let content = self.read_balanced('(', ')', Unclosed::Paren)?;
                self.push_element(ValueElement::Expansion(format!("$({content})")));
            }
            Some(c) if is_valid_variable_start(c) => {
                let mut name = String::new();
                while let Some(c) = self.chars.peek().copied().filter(|c| is_valid_variable_char(*c)) {
                    self.bump();
                    name.push(c);
                }
                self.push_element(ValueElement::Reference(name));
            }
            Some(c) if is_special_parameter(c) => {
                self.bump();
                self.push_element(ValueElement::Expansion(format!("${c}")));
            }
            _ => self.push_literal('$', style),
        }
        Ok(())
    }

    /// Read up to the matching `close`, skipping quoted text. The opening
    /// character has been consumed; the closing one is consumed but not returned.
    fn read_balanced(&mut self, open: char, close: char, unclosed: Unclosed) -> Result<String, ScanError> {
        let mut content = String::new();
        let mut depth = 1usize;
        let mut quote: Option<char> = None;
        let mut escaped = false;
        loop {
            let Some(ch) = self.bump() else {
                return Err(self.unterminated(unclosed));
            };
            if escaped {
                escaped = false;
            } else if let Some(q) = quote {
                if ch == q {
                    quote = None;
                } else if ch == '\\' && q == '"' {
                    escaped = true;
                }
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '\'' || ch == '"' {
                quote = Some(ch);
            } else if ch == open {
                depth += 1;
            } else if ch == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(content);
                }
            }
            content.push(ch);
        }
    }

    fn parse_backtick(&mut self) -> Result<(), ScanError> {
        let mut raw = String::from("`");
        loop {
            match self.bump() {
                None => return Err(self.unterminated(Unclosed::Backtick)),
                Some('\\') => {
                    raw.push('\\');
                    match self.bump() {
                        Some(c) => raw.push(c),
                        None => return Err(self.unterminated(Unclosed::Backtick)),
                    }
                }
                Some('`') => {
                    raw.push('`');
                    break;
                }
                Some(c) => raw.push(c),
            }
        }
        self.push_element(ValueElement::Expansion(raw));
        Ok(())
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
