// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! PKGBUILD scanner producing one top-level node per call.
//!
//! Each line starts in the line-start state and becomes a blank line, a
//! comment or a declaration. Declarations read their name, then either a
//! value (`=`), an array (`=(`) or a function header and body. Whatever
//! follows on the same line must be whitespace or a comment; a comment turns
//! the declaration into a [`Group`].

mod body;
mod word;

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{ScanError, SyntaxIssue, Unclosed};
use crate::node::{Atom, Element, Function, Group, Node, Value, VarKind, Variable};
use crate::position::{Position, Span};
use crate::token::{is_blank, is_function_name_char, is_space, is_valid_variable_char, is_valid_variable_start};

use word::Delimiter;

/// Which nodes the scanner emits. Every mode runs the same state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Everything, blank lines and comments included.
    #[default]
    Full,
    /// Declarations only, without their trailing comments.
    Fast,
    /// Variable declarations only.
    VarsOnly,
    /// Function declarations only.
    FuncsOnly,
}

impl ScanMode {
    fn select(self, node: Node) -> Option<Node> {
        let keep = match self {
            Self::Full => return Some(node),
            Self::Fast => node.is_declaration(),
            Self::VarsOnly => node.is_variable(),
            Self::FuncsOnly => node.is_function(),
        };
        keep.then(|| node.without_trailing_comment())
    }
}

/// Pull-based scanner over a PKGBUILD source.
///
/// After the first error the scanner is exhausted.
pub struct Scanner<'a> {
    /// The text being scanned.
    input: &'a str,
    /// Peekable iterator over character indices.
    chars: Peekable<CharIndices<'a>>,
    /// Position of the next character.
    pos: Position,
    /// Document offset of the first byte of `input`.
    origin: usize,
    mode: ScanMode,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::starting_at(input, Position::START)
    }

    /// Scan `input` as if it started at `begin` in a larger document.
    pub fn starting_at(input: &'a str, begin: Position) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            pos: begin,
            origin: begin.offset,
            mode: ScanMode::Full,
            done: false,
        }
    }

    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Scan a whole source in [`ScanMode::Full`].
    pub fn scan_all(input: &'a str) -> Result<Vec<Node>, ScanError> {
        Scanner::new(input).collect()
    }

    /// Return the next node, `Ok(None)` at the end of input.
    pub fn scan(&mut self) -> Result<Option<Node>, ScanError> {
        while !self.done {
            match self.scan_node() {
                Ok(Some(node)) => {
                    tracing::trace!(kind = ?node.kind(), begin = %node.begin(), "scanned node");
                    if let Some(node) = self.mode.select(node) {
                        return Ok(Some(node));
                    }
                }
                Ok(None) => self.done = true,
                Err(e) => {
                    self.done = true;
                    return Err(e);
                }
            }
        }
        Ok(None)
    }

    #[inline]
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_second(&self) -> Option<char> {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        lookahead.next().map(|(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        self.pos = self.pos.next(ch);
        Some(ch)
    }

    fn slice(&self, begin: Position, end: Position) -> &'a str {
        Span::new(begin, end).slice(self.input, self.origin)
    }

    fn skip_spaces(&mut self) {
        while self.peek_char().is_some_and(is_space) {
            self.bump();
        }
    }

    fn skip_to_line_end(&mut self) {
        while self.peek_char().is_some_and(|c| c != '\n') {
            self.bump();
        }
    }

    fn bump_newline(&mut self) {
        if self.peek_char() == Some('\n') {
            self.bump();
        }
    }

    fn invalid(&self, ch: char) -> ScanError {
        ScanError::InvalidToken { ch, position: self.pos }
    }

    fn unterminated(&self, unclosed: Unclosed) -> ScanError {
        ScanError::UnterminatedToken { unclosed, position: self.pos }
    }

    fn scan_node(&mut self) -> Result<Option<Node>, ScanError> {
        let begin = self.pos;
        self.skip_spaces();
        match self.peek_char() {
            None if self.pos == begin => Ok(None),
            None => Ok(Some(Node::Blank(Atom::new(self.slice(begin, self.pos), begin)))),
            Some('\n') => {
                let blank = Atom::new(self.slice(begin, self.pos), begin);
                self.bump();
                Ok(Some(Node::Blank(blank)))
            }
            Some('#') => {
                self.skip_to_line_end();
                let comment = Atom::new(self.slice(begin, self.pos), begin);
                self.bump_newline();
                Ok(Some(Node::Comment(comment)))
            }
            Some(c) if is_valid_variable_start(c) => self.scan_declaration(begin).map(Some),
            Some(c) => Err(self.invalid(c)),
        }
    }

    fn scan_declaration(&mut self, begin: Position) -> Result<Node, ScanError> {
        let name_begin = self.pos;
        while self.peek_char().is_some_and(is_valid_variable_char) {
            self.bump();
        }
        if self.peek_char().is_some_and(is_function_name_char) {
            while self.peek_char().is_some_and(|c| is_valid_variable_char(c) || is_function_name_char(c)) {
                self.bump();
            }
            let name = Atom::new(self.slice(name_begin, self.pos), name_begin);
            return match self.peek_char() {
                None => Err(self.unterminated(Unclosed::Name)),
                Some(_) => self.scan_function(begin, name),
            };
        }
        let name = Atom::new(self.slice(name_begin, self.pos), name_begin);
        match self.peek_char() {
            None => Err(self.unterminated(Unclosed::Name)),
            Some('=') => self.scan_variable(begin, name),
            Some('+') if self.peek_second() == Some('=') => Err(ScanError::InvalidSyntax {
                name: name.raw,
                issue: SyntaxIssue::Append,
                position: name_begin,
            }),
            Some('[') => Err(ScanError::InvalidSyntax {
                name: name.raw,
                issue: SyntaxIssue::Index,
                position: name_begin,
            }),
            Some(_) => self.scan_function(begin, name),
        }
    }

    fn scan_variable(&mut self, begin: Position, name: Atom) -> Result<Node, ScanError> {
        self.bump();
        if self.peek_char() == Some('(') {
            self.bump();
            let (elements, close) = self.scan_array()?;
            return self.finish_declaration(begin, |raw, span| {
                Node::Var(Variable { kind: VarKind::Array, name, elements, close: Some(close), raw, span })
            });
        }
        let value = self.scan_word(false)?;
        self.finish_declaration(begin, |raw, span| {
            Node::Var(Variable {
                kind: VarKind::Single,
                name,
                elements: vec![Element::Value(value)],
                close: None,
                raw,
                span,
            })
        })
    }

    /// Read array entries up to and including the closing paren.
    fn scan_array(&mut self) -> Result<(Vec<Element>, Position), ScanError> {
        let mut elements = Vec::new();
        loop {
            self.skip_array_blanks();
            match self.peek_char() {
                None => return Err(self.unterminated(Unclosed::Array)),
                Some(')') => {
                    let close = self.pos;
                    self.bump();
                    return Ok((elements, close));
                }
                Some('#') => {
                    let comment_begin = self.pos;
                    self.skip_to_line_end();
                    let comment = Atom::new(self.slice(comment_begin, self.pos), comment_begin);
                    elements.push(Element::Comment(comment));
                }
                Some(_) => elements.push(Element::Value(self.scan_word(true)?)),
            }
        }
    }

    /// Whitespace and line continuations between array entries.
    fn skip_array_blanks(&mut self) {
        loop {
            match self.peek_char() {
                Some(c) if is_blank(c) => {
                    self.bump();
                }
                Some('\\') if self.peek_second() == Some('\n') => {
                    self.bump();
                    self.bump();
                }
                _ => return,
            }
        }
    }

    /// Read one value word. An unquoted blank ends it, and so does `)` inside
    /// an array.
    fn scan_word(&mut self, in_array: bool) -> Result<Value, ScanError> {
        let begin = self.pos;
        let mut delimiter = Delimiter::default();
        while let Some(ch) = self.peek_char() {
            if delimiter.is_closed() && (is_blank(ch) || (in_array && ch == ')')) {
                break;
            }
            if !delimiter.feed(ch) {
                return Err(self.invalid(ch));
            }
            self.bump();
        }
        if let Some(unclosed) = delimiter.unclosed() {
            return Err(self.unterminated(unclosed));
        }
        Value::new(self.slice(begin, self.pos), begin)
    }

    fn scan_function(&mut self, begin: Position, name: Atom) -> Result<Node, ScanError> {
        let header_begin = self.pos;
        let mut opened = false;
        let mut closed = false;
        loop {
            match self.peek_char() {
                None => return Err(self.unterminated(Unclosed::FunctionHeader)),
                Some(c) if is_blank(c) => {}
                Some('(') if !opened => opened = true,
                Some(')') if opened && !closed => closed = true,
                Some('{') if closed => break,
                Some(c) => return Err(self.invalid(c)),
            }
            self.bump();
        }
        let header = Atom::new(self.slice(header_begin, self.pos), header_begin);
        let body = self.scan_body()?;
        self.finish_declaration(begin, |raw, span| Node::Func(Function { name, header, body, raw, span }))
    }

    /// Consume the rest of the declaration's line: spaces, then an optional
    /// comment, then the newline.
    fn finish_declaration(
        &mut self,
        begin: Position,
        build: impl FnOnce(String, Span) -> Node,
    ) -> Result<Node, ScanError> {
        let decl_end = self.pos;
        self.skip_spaces();
        match self.peek_char() {
            None | Some('\n') => {
                let node = build(self.slice(begin, self.pos).to_string(), Span::new(begin, self.pos));
                self.bump_newline();
                Ok(node)
            }
            Some('#') => {
                let decl = build(self.slice(begin, decl_end).to_string(), Span::new(begin, decl_end));
                let comment_begin = self.pos;
                self.skip_to_line_end();
                let comment = Atom::new(self.slice(comment_begin, self.pos), comment_begin);
                let group = Group::new(decl, comment, self.slice(begin, self.pos));
                self.bump_newline();
                Ok(Node::Group(group))
            }
            Some(c) => Err(self.invalid(c)),
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Node, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scan().transpose()
    }
}

#[cfg(test)]
#[path = "../scanner_tests/mod.rs"]
mod tests;
