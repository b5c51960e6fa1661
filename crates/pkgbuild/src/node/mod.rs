// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Positioned nodes of a PKGBUILD document.
//!
//! Every node knows the span it covers and the raw text of that span. The raw
//! text of a node decoded from source is the source slice itself; composite
//! nodes that get edited re-render their raw text from their children and the
//! gaps between them.

mod value;

pub use value::{ValueElement, ValueFormatter};
pub(crate) use value::render_element;

use crate::diff::PosDiff;
use crate::error::ScanError;
use crate::position::{Position, Span};

/// Leaf text with a position: blank lines, comments, names, bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub(crate) raw: String,
    pub(crate) span: Span,
}

impl Atom {
    pub fn new(raw: impl Into<String>, begin: Position) -> Self {
        let raw = raw.into();
        let span = Span::of(begin, &raw);
        Self { raw, span }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn begin(&self) -> Position {
        self.span.begin
    }

    pub fn end(&self) -> Position {
        self.span.end
    }

    /// Replace the text; the end follows the new text.
    pub(crate) fn set_raw(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
        self.span.end = self.span.begin.next_str(&self.raw);
    }

    /// Move to `begin`; the end follows the text.
    pub(crate) fn move_to(&mut self, begin: Position) {
        self.span = Span::of(begin, &self.raw);
    }

    fn visit_positions_mut(&mut self, f: &mut dyn FnMut(&mut Position)) {
        f(&mut self.span.begin);
        f(&mut self.span.end);
    }
}

/// One word of a variable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub(crate) atom: Atom,
    pub(crate) format: ValueFormatter,
}

impl Value {
    pub fn new(raw: impl Into<String>, begin: Position) -> Result<Self, ScanError> {
        let atom = Atom::new(raw, begin);
        let format = ValueFormatter::from_word_at(&atom.raw, begin)?;
        Ok(Self { atom, format })
    }

    pub(crate) fn from_parts(atom: Atom, format: ValueFormatter) -> Self {
        Self { atom, format }
    }

    pub fn raw(&self) -> &str {
        &self.atom.raw
    }

    pub fn span(&self) -> Span {
        self.atom.span
    }

    pub fn formatter(&self) -> &ValueFormatter {
        &self.format
    }

    /// Replace the written form and re-split it.
    pub(crate) fn set_raw(&mut self, raw: impl Into<String>) -> Result<(), ScanError> {
        let raw = raw.into();
        self.format = ValueFormatter::from_word_at(&raw, self.atom.begin())?;
        self.atom.set_raw(raw);
        Ok(())
    }
}

/// Entry of an array: a value or a comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Value(Value),
    Comment(Atom),
}

impl Element {
    pub fn raw(&self) -> &str {
        match self {
            Self::Value(v) => v.raw(),
            Self::Comment(c) => c.raw(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Value(v) => v.span(),
            Self::Comment(c) => c.span(),
        }
    }

    pub fn begin(&self) -> Position {
        self.span().begin
    }

    pub fn end(&self) -> Position {
        self.span().end
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Comment(_) => None,
        }
    }

    fn atom_mut(&mut self) -> &mut Atom {
        match self {
            Self::Value(v) => &mut v.atom,
            Self::Comment(c) => c,
        }
    }

    pub(crate) fn move_to(&mut self, begin: Position) {
        self.atom_mut().move_to(begin);
    }

    fn shift(&mut self, diff: &PosDiff) {
        self.atom_mut().visit_positions_mut(&mut |p| *p = diff.apply(*p));
    }
}

/// Whether a variable holds one word or a parenthesized list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Single,
    Array,
}

/// `name=value` or `name=(values...)`.
///
/// A single variable always holds exactly one value element, which may be
/// empty. `close` is the position of the closing paren of an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub(crate) kind: VarKind,
    pub(crate) name: Atom,
    pub(crate) elements: Vec<Element>,
    pub(crate) close: Option<Position>,
    pub(crate) raw: String,
    pub(crate) span: Span,
}

impl Variable {
    pub fn name(&self) -> &str {
        &self.name.raw
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }

    pub fn is_array(&self) -> bool {
        self.kind == VarKind::Array
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.elements.iter().filter_map(Element::as_value)
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.elements.iter_mut().filter_map(|e| match e {
            Element::Value(v) => Some(v),
            Element::Comment(_) => None,
        })
    }

    /// Position right after `=` (single) or `(` (array).
    fn value_start(&self) -> Position {
        let eq = self.name.end().next('=');
        match self.kind {
            VarKind::Single => eq,
            VarKind::Array => eq.next('('),
        }
    }

    /// Replace the value list and lay it out compactly after the name.
    pub(crate) fn set_values(&mut self, values: Vec<Value>) {
        self.elements = values.into_iter().map(Element::Value).collect();
        if self.kind == VarKind::Single && self.elements.is_empty() {
            self.elements.push(Element::Value(Value::from_parts(
                Atom::new("", self.value_start()),
                ValueFormatter::default(),
            )));
        }
        self.layout(usize::MAX);
    }

    /// Switch between single and array form, keeping the first value.
    pub(crate) fn convert(&mut self, kind: VarKind) {
        let first = self.values().next().cloned();
        self.kind = kind;
        let values = match (kind, first) {
            (VarKind::Array, Some(v)) if v.raw().is_empty() => Vec::new(),
            (_, Some(v)) => vec![v],
            (_, None) => Vec::new(),
        };
        self.set_values(values);
    }

    /// Place the elements after the name, separated by single spaces.
    ///
    /// Array elements wrap onto a new line aligned after `(` when they would
    /// cross `max_width`. Multi-line values and anything after a comment also
    /// start a new line, and comments that had a line of their own keep one.
    /// A closing paren following a comment goes on its own line at column 0.
    pub(crate) fn layout(&mut self, max_width: usize) {
        let start = self.value_start();
        match self.kind {
            VarKind::Single => {
                let mut p = start;
                for element in &mut self.elements {
                    element.move_to(p);
                    p = element.end();
                }
                self.close = None;
                self.span.end = p;
            }
            VarKind::Array => {
                let indent = start.column;
                let own_line = self.own_line_comments();
                let mut p = start;
                let mut after_comment = false;
                for (i, element) in self.elements.iter_mut().enumerate() {
                    if own_line[i] {
                        p = p.next('\n').next_str(&" ".repeat(indent));
                    } else if i > 0 {
                        let spaced = p.next(' ');
                        let width = element.raw().chars().count();
                        if after_comment || element.raw().contains('\n') || spaced.column + width > max_width {
                            p = p.next('\n').next_str(&" ".repeat(indent));
                        } else {
                            p = spaced;
                        }
                    }
                    element.move_to(p);
                    p = element.end();
                    after_comment = element.is_comment();
                }
                if after_comment {
                    p = p.next('\n');
                }
                self.close = Some(p);
                self.span.end = p.next(')');
            }
        }
        self.render();
    }

    /// Comments that start a line of their own, judged from current positions.
    fn own_line_comments(&self) -> Vec<bool> {
        let mut prev_line = self.name.begin().line;
        self.elements
            .iter()
            .map(|element| {
                let own = element.is_comment() && element.begin().line > prev_line;
                prev_line = element.end().line;
                own
            })
            .collect()
    }

    /// Drop the comment lines inside an array, keeping other whitespace.
    pub(crate) fn remove_comments(&mut self) -> bool {
        let mut removed = false;
        let mut i = 0;
        while i < self.elements.len() {
            if !self.elements[i].is_comment() {
                i += 1;
                continue;
            }
            let prev_end = match i.checked_sub(1) {
                Some(prev) => self.elements[prev].end(),
                None => self.value_start(),
            };
            let diff = PosDiff::new(self.elements[i].end(), prev_end);
            self.elements.remove(i);
            for element in &mut self.elements[i..] {
                element.shift(&diff);
            }
            self.close = self.close.map(|c| diff.apply(c));
            self.span.end = diff.apply(self.span.end);
            removed = true;
        }
        if removed {
            self.render();
        }
        removed
    }

    /// Rewrite each value in place, keeping the line structure. Rewrites that
    /// do not parse as a word are skipped.
    pub(crate) fn requote(&mut self, mut f: impl FnMut(&Value) -> String) -> bool {
        let mut changed = false;
        for i in 0..self.elements.len() {
            let Element::Value(value) = &mut self.elements[i] else {
                continue;
            };
            let raw = f(value);
            if raw == value.raw() {
                continue;
            }
            let old_end = value.atom.end();
            if value.set_raw(raw).is_err() {
                continue;
            }
            let diff = PosDiff::new(old_end, value.atom.end());
            for element in &mut self.elements[i + 1..] {
                element.shift(&diff);
            }
            self.close = self.close.map(|c| diff.apply(c));
            self.span.end = diff.apply(self.span.end);
            changed = true;
        }
        if changed {
            self.render();
        }
        changed
    }

    /// Move the name to the start of the line and re-lay the values.
    pub(crate) fn collapse(&mut self, max_width: usize) {
        for element in &mut self.elements {
            if let Element::Comment(comment) = element {
                let trimmed = comment.raw.trim().to_string();
                comment.set_raw(trimmed);
            }
        }
        self.name.move_to(self.span.begin);
        self.layout(max_width);
    }

    pub(crate) fn render(&mut self) {
        let mut out = String::new();
        let mut p = self.span.begin;
        out.push_str(&p.blank(self.name.begin()));
        out.push_str(&self.name.raw);
        p = self.name.end();
        out.push('=');
        p = p.next('=');
        if self.kind == VarKind::Array {
            out.push('(');
            p = p.next('(');
        }
        for element in &self.elements {
            out.push_str(&p.blank(element.begin()));
            out.push_str(element.raw());
            p = element.end();
        }
        if let Some(close) = self.close {
            out.push_str(&p.blank(close));
            out.push(')');
            p = close.next(')');
        }
        out.push_str(&p.blank(self.span.end));
        self.raw = out;
    }

    fn visit_positions_mut(&mut self, f: &mut dyn FnMut(&mut Position)) {
        self.name.visit_positions_mut(f);
        for element in &mut self.elements {
            element.atom_mut().visit_positions_mut(f);
        }
        if let Some(close) = &mut self.close {
            f(close);
        }
        f(&mut self.span.begin);
        f(&mut self.span.end);
    }
}

/// `name() { body }`.
///
/// `header` holds the text between the name and the opening brace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub(crate) name: Atom,
    pub(crate) header: Atom,
    pub(crate) body: Atom,
    pub(crate) raw: String,
    pub(crate) span: Span,
}

impl Function {
    pub fn name(&self) -> &str {
        &self.name.raw
    }

    /// The braced body, braces included.
    pub fn body(&self) -> &str {
        &self.body.raw
    }

    pub(crate) fn collapse(&mut self) {
        self.name.move_to(self.span.begin);
        self.header.move_to(self.name.end());
        self.header.set_raw("() ");
        self.body.move_to(self.header.end());
        self.span.end = self.body.end();
        self.render();
    }

    pub(crate) fn render(&mut self) {
        let mut out = self.span.begin.blank(self.name.begin());
        out.push_str(&self.name.raw);
        out.push_str(&self.name.end().blank(self.header.begin()));
        out.push_str(&self.header.raw);
        out.push_str(&self.header.end().blank(self.body.begin()));
        out.push_str(&self.body.raw);
        out.push_str(&self.body.end().blank(self.span.end));
        self.raw = out;
    }

    fn visit_positions_mut(&mut self, f: &mut dyn FnMut(&mut Position)) {
        self.name.visit_positions_mut(f);
        self.header.visit_positions_mut(f);
        self.body.visit_positions_mut(f);
        f(&mut self.span.begin);
        f(&mut self.span.end);
    }
}

/// A declaration followed by a comment on the same line.
///
/// `children` always holds the declaration first and the comment second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub(crate) children: Vec<Node>,
    pub(crate) raw: String,
    pub(crate) span: Span,
}

impl Group {
    pub(crate) fn new(declaration: Node, comment: Atom, raw: impl Into<String>) -> Self {
        let span = Span::new(declaration.begin(), comment.end());
        Self { children: vec![declaration, Node::Comment(comment)], raw: raw.into(), span }
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn declaration(&self) -> Option<&Node> {
        self.children.first()
    }

    pub fn comment(&self) -> Option<&Node> {
        self.children.get(1)
    }

    pub(crate) fn render(&mut self) {
        let mut out = String::new();
        let mut p = self.span.begin;
        for child in &self.children {
            out.push_str(&p.blank(child.begin()));
            out.push_str(child.raw());
            p = child.end();
        }
        out.push_str(&p.blank(self.span.end));
        self.raw = out;
    }
}

/// Kind tag of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Blank,
    Comment,
    SingleVar,
    ArrayVar,
    Function,
    Group,
}

/// A top-level unit of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Blank(Atom),
    Comment(Atom),
    Var(Variable),
    Func(Function),
    Group(Group),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Blank(_) => NodeKind::Blank,
            Self::Comment(_) => NodeKind::Comment,
            Self::Var(v) if v.is_array() => NodeKind::ArrayVar,
            Self::Var(_) => NodeKind::SingleVar,
            Self::Func(_) => NodeKind::Function,
            Self::Group(_) => NodeKind::Group,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Blank(a) | Self::Comment(a) => a.span,
            Self::Var(v) => v.span,
            Self::Func(f) => f.span,
            Self::Group(g) => g.span,
        }
    }

    pub fn begin(&self) -> Position {
        self.span().begin
    }

    pub fn end(&self) -> Position {
        self.span().end
    }

    pub fn raw(&self) -> &str {
        match self {
            Self::Blank(a) | Self::Comment(a) => &a.raw,
            Self::Var(v) => &v.raw,
            Self::Func(f) => &f.raw,
            Self::Group(g) => &g.raw,
        }
    }

    /// The variable or function this node declares, looking inside groups.
    pub fn declaration(&self) -> Option<&Node> {
        match self {
            Self::Var(_) | Self::Func(_) => Some(self),
            Self::Group(g) => g.declaration(),
            Self::Blank(_) | Self::Comment(_) => None,
        }
    }

    pub fn is_declaration(&self) -> bool {
        self.declaration().is_some()
    }

    pub fn name(&self) -> Option<&str> {
        match self.declaration()? {
            Self::Var(v) => Some(v.name()),
            Self::Func(f) => Some(f.name()),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self.declaration()? {
            Self::Var(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self.declaration()? {
            Self::Func(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        self.as_variable().is_some()
    }

    pub fn is_function(&self) -> bool {
        self.as_function().is_some()
    }

    /// Visit every position of the node, children before parents.
    pub(crate) fn visit_positions_mut(&mut self, f: &mut dyn FnMut(&mut Position)) {
        match self {
            Self::Blank(a) | Self::Comment(a) => a.visit_positions_mut(f),
            Self::Var(v) => v.visit_positions_mut(f),
            Self::Func(func) => func.visit_positions_mut(f),
            Self::Group(g) => {
                for child in &mut g.children {
                    child.visit_positions_mut(f);
                }
                f(&mut g.span.begin);
                f(&mut g.span.end);
            }
        }
    }

    /// Move the whole node so that it begins at `begin`.
    pub(crate) fn move_to(&mut self, begin: Position) {
        PosDiff::new(self.begin(), begin).propagate(self);
    }

    /// Apply `f` to the declaration, keeping a trailing comment in place
    /// after it. Returns `None` for blank lines and comments.
    pub(crate) fn edit_declaration<R>(&mut self, f: impl FnOnce(&mut Node) -> R) -> Option<R> {
        match self {
            Self::Var(_) | Self::Func(_) => Some(f(self)),
            Self::Group(group) => {
                let (first, rest) = group.children.split_first_mut()?;
                let old_end = first.end();
                let result = f(first);
                let diff = PosDiff::new(old_end, first.end());
                diff.propagate_all(rest.iter_mut());
                group.span.end = diff.apply(group.span.end);
                group.render();
                Some(result)
            }
            Self::Blank(_) | Self::Comment(_) => None,
        }
    }

    /// Apply `f` to the variable this node declares.
    pub(crate) fn edit_variable<R>(&mut self, f: impl FnOnce(&mut Variable) -> R) -> Option<R> {
        if !self.is_variable() {
            return None;
        }
        self.edit_declaration(|node| match node {
            Self::Var(v) => Some(f(v)),
            _ => None,
        })
        .flatten()
    }

    /// Strip indentation, trailing whitespace and redundant spacing.
    pub(crate) fn collapse(&mut self, max_width: usize) {
        match self {
            Self::Blank(a) => a.set_raw(""),
            Self::Comment(a) => {
                let trimmed = a.raw.trim().to_string();
                a.set_raw(trimmed);
            }
            Self::Var(v) => v.collapse(max_width),
            Self::Func(f) => f.collapse(),
            Self::Group(g) => {
                let mut end = g.span.begin;
                for child in &mut g.children {
                    match child {
                        Self::Comment(c) => {
                            let trimmed = c.raw.trim().to_string();
                            c.set_raw(trimmed);
                            c.move_to(end.next(' '));
                            end = c.end();
                        }
                        decl => {
                            decl.move_to(end);
                            decl.collapse(max_width);
                            end = decl.end();
                        }
                    }
                }
                g.span.end = end;
                g.render();
            }
        }
    }

    /// Drop a trailing comment, returning the bare declaration.
    pub(crate) fn without_trailing_comment(self) -> Node {
        match self {
            Self::Group(group) => {
                group.children.into_iter().next().unwrap_or(Self::Blank(Atom::new("", group.span.begin)))
            }
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
