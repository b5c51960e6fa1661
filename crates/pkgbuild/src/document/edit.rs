// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Document mutations.
//!
//! Every mutation shifts the positions of the nodes after the edit, starts a
//! new generation and resynchronizes the name index. Resolved values are
//! recomputed when a variable was touched.

use super::{Document, Entry};
use crate::diff::PosDiff;
use crate::error::ScanError;
use crate::format::{quote_word, Transformation};
use crate::info::InfoId;
use crate::node::{Atom, Node, Value, ValueFormatter, VarKind};
use crate::position::Position;
use crate::scanner::Scanner;
use crate::standard;
use crate::token::{is_valid_function_name, is_valid_variable_name};

impl Document {
    /// Start a new generation after a structural change.
    fn commit(&mut self, values_changed: bool) {
        self.generation += 1;
        self.recompute_infos();
        if values_changed {
            self.recompute_values();
        }
    }

    fn handle_at(&self, index: usize) -> Option<InfoId> {
        self.entries.get(index).map(|e| self.handle(e))
    }

    fn has_trailing_newline(&self) -> bool {
        match self.entries.last() {
            Some(last) => self.end > last.node.end(),
            None => self.end > Position::START,
        }
    }

    /// Shift the entries from `index` on, and the end of input.
    fn shift_from(&mut self, index: usize, diff: PosDiff) {
        if let Some(rest) = self.entries.get_mut(index..) {
            diff.propagate_all(rest.iter_mut().map(|e| &mut e.node));
        }
        self.end = diff.apply(self.end);
    }

    /// Edit the node at `index` in place and shift what follows.
    fn edit_at<R>(&mut self, index: usize, f: impl FnOnce(&mut Node) -> Option<R>) -> Option<R> {
        let entry = self.entries.get_mut(index)?;
        let old_end = entry.node.end();
        let result = f(&mut entry.node)?;
        let diff = PosDiff::new(old_end, entry.node.end());
        self.shift_from(index + 1, diff);
        Some(result)
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Replace the values of a variable.
    ///
    /// `values` are shell words, not literal text: quotes and `$` keep their
    /// shell meaning, so `it's` is an unclosed quote and fails, while
    /// `foo$bar` stores a reference to `bar`. Pass `"it's"` (with the double
    /// quotes) for the literal. The words are re-quoted following the standard
    /// quoting preference of the variable's name.
    ///
    /// Fails for stale handles, functions, unparsable words and several
    /// values for a string variable.
    pub fn set_value(&mut self, id: InfoId, values: &[&str]) -> Option<InfoId> {
        let index = self.index_of(id)?;
        let var = self.entries.get(index)?.node.as_variable()?;
        if !var.is_array() && values.len() > 1 {
            tracing::debug!(name = var.name(), count = values.len(), "string variable takes one value");
            return None;
        }
        let rendered = render_values(values, standard::is_quoted_variable(var.name()), var.is_array())?;
        self.edit_at(index, |node| node.edit_variable(|v| v.set_values(rendered)))?;
        self.commit(true);
        self.handle_at(index)
    }

    /// Turn a string variable into an array holding its value.
    pub fn set_array_var(&mut self, id: InfoId) -> Option<InfoId> {
        self.convert(id, VarKind::Array)
    }

    /// Turn an array variable into a string variable holding its first value.
    pub fn set_string_var(&mut self, id: InfoId) -> Option<InfoId> {
        self.convert(id, VarKind::Single)
    }

    fn convert(&mut self, id: InfoId, kind: VarKind) -> Option<InfoId> {
        let index = self.index_of(id)?;
        if self.entries.get(index)?.node.as_variable()?.kind() == kind {
            return None;
        }
        self.edit_at(index, |node| node.edit_variable(|v| v.convert(kind)))?;
        self.commit(true);
        self.handle_at(index)
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Append a variable declaration.
    ///
    /// `values` are shell words, as for [`Document::set_value`].
    pub fn add_variable(&mut self, name: &str, kind: VarKind, values: &[&str]) -> Option<InfoId> {
        if !is_valid_variable_name(name) || (kind == VarKind::Single && values.len() > 1) {
            tracing::debug!(name, ?kind, "rejected variable");
            return None;
        }
        let rendered = render_values(values, standard::is_quoted_variable(name), kind == VarKind::Array)?;
        let words: Vec<&str> = rendered.iter().map(Value::raw).collect();
        let text = match kind {
            VarKind::Single => format!("{name}={}", words.first().copied().unwrap_or("")),
            VarKind::Array => format!("{name}=({})", words.join(" ")),
        };
        self.add_raw(&text).ok()?.into_iter().next()
    }

    /// Append a function declaration. `body` is the text between the braces,
    /// or a complete braced body.
    pub fn add_function(&mut self, name: &str, body: &str) -> Option<InfoId> {
        if !is_valid_function_name(name) {
            tracing::debug!(name, "rejected function");
            return None;
        }
        let body = body.trim_matches('\n');
        let text = if body.trim_start().starts_with('{') {
            format!("{name}() {}", body.trim())
        } else if body.is_empty() {
            format!("{name}() {{\n}}")
        } else {
            format!("{name}() {{\n{body}\n}}")
        };
        self.add_raw(&text).ok()?.into_iter().next()
    }

    /// Scan `text` and append its nodes. Returns handles to the declarations
    /// it contained.
    pub fn add_raw(&mut self, text: &str) -> Result<Vec<InfoId>, ScanError> {
        self.insert_raw(self.entries.len(), text)
    }

    /// Scan `text` and insert its nodes before node `index`.
    pub fn insert_raw(&mut self, index: usize, text: &str) -> Result<Vec<InfoId>, ScanError> {
        let index = index.min(self.entries.len());
        let at = self.insertion_point(index);
        let nodes = Scanner::starting_at(text, at).collect::<Result<Vec<_>, _>>()?;
        Ok(self.insert_nodes(index, nodes))
    }

    /// Insert an empty line before node `index`.
    pub fn insert_blank(&mut self, index: usize) -> bool {
        if index > self.entries.len() {
            return false;
        }
        let at = self.insertion_point(index);
        self.insert_nodes(index, vec![Node::Blank(Atom::new("", at))]);
        true
    }

    /// Insert a one-line comment before node `index`. A missing `#` is added.
    pub fn insert_comment(&mut self, index: usize, text: &str) -> bool {
        let text = text.trim();
        if index > self.entries.len() || text.contains('\n') {
            return false;
        }
        let text = if text.starts_with('#') { text.to_string() } else { format!("# {text}") };
        let at = self.insertion_point(index);
        self.insert_nodes(index, vec![Node::Comment(Atom::new(text, at))]);
        true
    }

    pub fn add_blank(&mut self) -> bool {
        self.insert_blank(self.entries.len())
    }

    pub fn add_comment(&mut self, text: &str) -> bool {
        self.insert_comment(self.entries.len(), text)
    }

    /// Where a node inserted before `index` begins.
    fn insertion_point(&self, index: usize) -> Position {
        if let Some(next) = self.entries.get(index) {
            return next.node.begin();
        }
        match self.entries.last() {
            Some(last) => last.node.end().next('\n'),
            None => Position::START,
        }
    }

    /// Insert nodes positioned at [`Document::insertion_point`].
    fn insert_nodes(&mut self, index: usize, nodes: Vec<Node>) -> Vec<InfoId> {
        let (Some(first), Some(last)) = (nodes.first(), nodes.last()) else {
            return Vec::new();
        };
        let (begin, last_end) = (first.begin(), last.end());
        let has_variable = nodes.iter().any(Node::is_variable);

        if index < self.entries.len() {
            self.shift_from(index, PosDiff::new(begin, last_end.next('\n')));
        } else if self.entries.is_empty() || self.has_trailing_newline() {
            self.end = last_end.next('\n');
        } else {
            self.end = last_end;
        }

        let added: Vec<Entry> = nodes.into_iter().map(|node| self.entry(node)).collect();
        let declared: Vec<u64> = added.iter().filter(|e| e.node.is_declaration()).map(|e| e.id).collect();
        tracing::debug!(index, nodes = added.len(), "inserted nodes");
        self.entries.splice(index..index, added);
        self.commit(has_variable);
        declared.into_iter().map(|node| InfoId { node, generation: self.generation }).collect()
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Remove a declaration, trailing comment included.
    pub fn remove_info(&mut self, id: InfoId) -> bool {
        match self.index_of(id) {
            Some(index) => self.remove_index(index),
            None => false,
        }
    }

    /// Remove node `index`, whatever its kind.
    pub fn remove_index(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        let trailing = self.has_trailing_newline();
        let removed = self.entries.remove(index);
        let begin = removed.node.begin();

        if let Some(next) = self.entries.get(index) {
            let diff = PosDiff::new(next.node.begin(), begin);
            self.shift_from(index, diff);
        } else {
            self.end = match self.entries.last() {
                Some(prev) if trailing => prev.node.end().next('\n'),
                Some(prev) => prev.node.end(),
                None => Position::START,
            };
        }
        tracing::debug!(index, kind = ?removed.node.kind(), "removed node");
        self.commit(removed.node.is_variable());
        true
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    /// Run transformations left to right over the nodes.
    pub fn format(&mut self, transformations: &[Transformation]) {
        let trailing = self.has_trailing_newline();
        let mut entries = std::mem::take(&mut self.entries);
        for transformation in transformations {
            tracing::debug!(?transformation, nodes = entries.len(), "applying transformation");
            entries = transformation.apply(entries, &mut self.next_id);
        }
        self.end = match entries.last() {
            Some(last) if trailing => last.node.end().next('\n'),
            Some(last) => last.node.end(),
            None => Position::START,
        };
        self.entries = entries;
        self.commit(true);
    }

    /// Run the default pipeline.
    pub fn format_default(&mut self) {
        self.format(&Transformation::defaults());
    }
}

/// Re-quote shell words into values. `None` if a word does not parse.
fn render_values(words: &[&str], prefer_quote: bool, in_array: bool) -> Option<Vec<Value>> {
    words
        .iter()
        .map(|word| {
            let formatter = ValueFormatter::from_word(word).ok()?;
            Value::new(quote_word(&formatter, prefer_quote, in_array), Position::START).ok()
        })
        .collect()
}

#[cfg(test)]
#[path = "edit_tests.rs"]
mod tests;
