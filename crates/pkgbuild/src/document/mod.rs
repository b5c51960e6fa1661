// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A parsed PKGBUILD: its nodes, a name index and resolved values.
//!
//! Decoding keeps every byte of the source, so encoding an unmodified
//! document reproduces it exactly. Mutations live in [`edit`](self) and keep
//! positions, the name index and resolved values in sync.

mod edit;

use std::fmt;
use std::io::{self, Read, Write};

use indexmap::IndexMap;

use crate::env::{self, expand_into, Environ, MapEnviron};
use crate::error::ScanError;
use crate::info::{Info, InfoId, InfoKind};
use crate::node::{Node, VarKind};
use crate::parse_error::ParseError;
use crate::position::Position;
use crate::scanner::{ScanMode, Scanner};

/// A top-level node with an identity that survives edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) id: u64,
    pub(crate) node: Node,
}

/// A PKGBUILD document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    entries: Vec<Entry>,
    /// End of input: after the last node, and its newline if there is one.
    end: Position,
    generation: u64,
    next_id: u64,
    /// Variables visible before the first declaration.
    base: MapEnviron,
    /// Resolved value of every variable after the last declaration.
    values: MapEnviron,
    /// Entry indices of the declarations of each name, in document order.
    names: IndexMap<String, Vec<usize>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a whole PKGBUILD.
    pub fn decode<R: Read>(reader: R) -> Result<Self, ParseError> {
        Self::decode_with(reader, ScanMode::Full, MapEnviron::new())
    }

    /// Like [`Document::decode`], keeping only the nodes `mode` selects.
    pub fn decode_with_mode<R: Read>(reader: R, mode: ScanMode) -> Result<Self, ParseError> {
        Self::decode_with(reader, mode, MapEnviron::new())
    }

    /// Like [`Document::decode`], resolving references against `env` first.
    pub fn decode_with_env<R: Read>(reader: R, env: MapEnviron) -> Result<Self, ParseError> {
        Self::decode_with(reader, ScanMode::Full, env)
    }

    fn decode_with<R: Read>(mut reader: R, mode: ScanMode, env: MapEnviron) -> Result<Self, ParseError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Ok(Self::parse_with(&input, mode, env)?)
    }

    pub fn parse(input: &str) -> Result<Self, ScanError> {
        Self::parse_with(input, ScanMode::Full, MapEnviron::new())
    }

    fn parse_with(input: &str, mode: ScanMode, base: MapEnviron) -> Result<Self, ScanError> {
        let nodes = Scanner::new(input).with_mode(mode).collect::<Result<Vec<_>, _>>()?;
        let end = Position::START.next_str(input);
        tracing::debug!(nodes = nodes.len(), %end, ?mode, "decoded document");

        let mut doc = Self { end, base, ..Self::default() };
        let entries: Vec<_> = nodes.into_iter().map(|node| doc.entry(node)).collect();
        doc.entries = entries;
        doc.recompute_infos();
        doc.recompute_values();
        Ok(doc)
    }

    /// Read only the variables of a PKGBUILD and return its full version.
    pub fn read_version<R: Read>(reader: R) -> Result<String, ParseError> {
        Ok(Self::decode_with_mode(reader, ScanMode::VarsOnly)?.full_version())
    }

    /// Write the document, returning the number of bytes written.
    pub fn encode<W: Write>(&self, mut writer: W) -> io::Result<usize> {
        let text = self.render();
        writer.write_all(text.as_bytes())?;
        Ok(text.len())
    }

    fn render(&self) -> String {
        let mut out = String::new();
        let mut p = Position::START;
        for entry in &self.entries {
            out.push_str(&p.blank(entry.node.begin()));
            out.push_str(entry.node.raw());
            p = entry.node.end();
        }
        out.push_str(&p.blank(self.end));
        out
    }

    fn entry(&mut self, node: Node) -> Entry {
        let id = self.next_id;
        self.next_id += 1;
        Entry { id, node }
    }

    fn handle(&self, entry: &Entry) -> InfoId {
        InfoId { node: entry.id, generation: self.generation }
    }

    fn info_at(&self, index: usize) -> Option<Info<'_>> {
        let entry = self.entries.get(index)?;
        Info::new(self.handle(entry), index, &entry.node)
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|e| &e.node)
    }

    /// Number of top-level nodes, blank lines and comments included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// End of input.
    pub fn end(&self) -> Position {
        self.end
    }

    /// The current generation; it changes with every mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the document starts with comments or blank lines before its
    /// first declaration.
    pub fn has_header(&self) -> bool {
        self.header_len() > 0
    }

    /// Number of leading non-declaration nodes, zero if nothing follows them.
    pub(crate) fn header_len(&self) -> usize {
        header_len(&self.entries)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Declarations of the given kinds, in document order. An empty filter
    /// selects every declaration.
    pub fn infos(&self, kinds: &[InfoKind]) -> Vec<Info<'_>> {
        (0..self.entries.len()).filter_map(|i| self.info_at(i)).filter(|info| info.kind().matches(kinds)).collect()
    }

    /// The last declaration of `name` among the given kinds.
    pub fn info(&self, name: &str, kinds: &[InfoKind]) -> Option<Info<'_>> {
        let indices = self.names.get(name)?;
        indices.iter().rev().filter_map(|&i| self.info_at(i)).find(|info| info.kind().matches(kinds))
    }

    pub fn variables(&self) -> Vec<Info<'_>> {
        self.infos(&[InfoKind::SingleVar, InfoKind::ArrayVar])
    }

    pub fn functions(&self) -> Vec<Info<'_>> {
        self.infos(&[InfoKind::Function])
    }

    pub fn contains_variable(&self, name: &str) -> bool {
        self.info(name, &[InfoKind::SingleVar, InfoKind::ArrayVar]).is_some()
    }

    pub fn contains_function(&self, name: &str) -> bool {
        self.info(name, &[InfoKind::Function]).is_some()
    }

    /// Whether `id` still designates a declaration of this document.
    pub fn contains_info(&self, id: InfoId) -> bool {
        self.index_of(id).is_some()
    }

    /// Node index of the declaration `id`.
    pub fn index_of(&self, id: InfoId) -> Option<usize> {
        if id.generation != self.generation {
            tracing::debug!(?id, generation = self.generation, "rejected stale handle");
            return None;
        }
        let index = self.entries.iter().position(|e| e.id == id.node && e.node.is_declaration());
        if index.is_none() {
            tracing::debug!(?id, "rejected unknown handle");
        }
        index
    }

    pub fn get(&self, id: InfoId) -> Option<Info<'_>> {
        self.info_at(self.index_of(id)?)
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Resolved value of a variable; the first element for arrays, "" when
    /// unset.
    pub fn value(&self, name: &str) -> &str {
        self.values.lookup(name).map(env::Variable::as_str).unwrap_or("")
    }

    /// Resolved values of a variable; a string is a one-element list.
    pub fn array_value(&self, name: &str) -> Vec<String> {
        self.values.lookup(name).map(env::Variable::values).unwrap_or_default()
    }

    /// Whether the variable is set to a non-empty string or array.
    pub fn has_value(&self, name: &str) -> bool {
        self.values.lookup(name).is_some_and(|v| !v.is_empty())
    }

    /// `[epoch:]pkgver-pkgrel`.
    pub fn full_version(&self) -> String {
        let version = format!("{}-{}", self.value("pkgver"), self.value("pkgrel"));
        if self.has_value("epoch") {
            format!("{}:{version}", self.value("epoch"))
        } else {
            version
        }
    }

    /// Every resolved variable, in order of first assignment.
    pub fn environ(&self) -> &MapEnviron {
        &self.values
    }

    // =========================================================================
    // Synchronization
    // =========================================================================

    /// Rebuild the name index from the nodes.
    pub fn recompute_infos(&mut self) {
        self.names.clear();
        for (i, entry) in self.entries.iter().enumerate() {
            if let Some(name) = entry.node.name() {
                self.names.entry(name.to_string()).or_default().push(i);
            }
        }
    }

    /// Resolve every variable in document order, starting from the base
    /// environment. Later declarations see earlier ones.
    pub fn recompute_values(&mut self) {
        let mut env = self.base.clone();
        for entry in &self.entries {
            let Some(var) = entry.node.as_variable() else {
                continue;
            };
            let value = match var.kind() {
                VarKind::Single => env::Variable::String(
                    var.values().next().map(|v| v.formatter().resolve(&env)).unwrap_or_default(),
                ),
                VarKind::Array => {
                    let mut fields = Vec::new();
                    for v in var.values() {
                        expand_into(&env, v.raw(), v.formatter(), &mut fields);
                    }
                    env::Variable::Indexed(fields)
                }
            };
            env.set(var.name(), value);
        }
        self.values = env;
    }
}

/// Number of leading non-declaration entries, zero if no declaration follows.
pub(crate) fn header_len(entries: &[Entry]) -> usize {
    entries.iter().position(|e| e.node.is_declaration()).unwrap_or(0)
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
