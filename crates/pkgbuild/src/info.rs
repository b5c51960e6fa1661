// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only views over the declarations of a document.

use crate::env::{expand_into, Environ};
use crate::node::{Node, NodeKind, Variable};
use crate::position::Position;

/// Handle to a declaration, valid for one generation of its document.
///
/// Every mutation of a document starts a new generation; handles from older
/// generations are rejected and must be fetched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoId {
    pub(crate) node: u64,
    pub(crate) generation: u64,
}

/// Kind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoKind {
    SingleVar,
    ArrayVar,
    Function,
}

impl InfoKind {
    /// Kind of the declaration held by `node`, looking inside groups.
    pub fn of(node: &Node) -> Option<Self> {
        match node.declaration()?.kind() {
            NodeKind::SingleVar => Some(Self::SingleVar),
            NodeKind::ArrayVar => Some(Self::ArrayVar),
            NodeKind::Function => Some(Self::Function),
            NodeKind::Blank | NodeKind::Comment | NodeKind::Group => None,
        }
    }

    /// An empty filter matches every kind.
    pub(crate) fn matches(self, filter: &[InfoKind]) -> bool {
        filter.is_empty() || filter.contains(&self)
    }
}

/// A declaration of a document.
#[derive(Debug, Clone, Copy)]
pub struct Info<'a> {
    id: InfoId,
    index: usize,
    kind: InfoKind,
    name: &'a str,
    node: &'a Node,
}

impl<'a> Info<'a> {
    pub(crate) fn new(id: InfoId, index: usize, node: &'a Node) -> Option<Self> {
        Some(Self { id, index, kind: InfoKind::of(node)?, name: node.name()?, node })
    }

    pub fn id(&self) -> InfoId {
        self.id
    }

    /// Position of the declaration among all nodes of the document.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn kind(&self) -> InfoKind {
        self.kind
    }

    pub fn is_var(&self) -> bool {
        self.kind != InfoKind::Function
    }

    pub fn is_string_var(&self) -> bool {
        self.kind == InfoKind::SingleVar
    }

    pub fn is_array_var(&self) -> bool {
        self.kind == InfoKind::ArrayVar
    }

    pub fn is_func(&self) -> bool {
        self.kind == InfoKind::Function
    }

    /// The node, trailing comment included.
    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn raw(&self) -> &'a str {
        self.node.raw()
    }

    pub fn begin(&self) -> Position {
        self.node.begin()
    }

    pub fn end(&self) -> Position {
        self.node.end()
    }

    fn variable(&self) -> Option<&'a Variable> {
        self.node.as_variable()
    }

    /// The value as written. Array values are joined with spaces; functions
    /// have no value.
    pub fn string_value(&self) -> String {
        self.array_value().join(" ")
    }

    /// The values as written.
    pub fn array_value(&self) -> Vec<&'a str> {
        self.variable().map(|v| v.values().map(|value| value.raw()).collect()).unwrap_or_default()
    }

    /// The value with references substituted from `env`.
    pub fn string_parsed(&self, env: &dyn Environ) -> String {
        self.array_parsed(env).join(" ")
    }

    /// The values with references substituted from `env`. Inside an array,
    /// an unquoted lone reference to an array expands to all of its elements.
    pub fn array_parsed(&self, env: &dyn Environ) -> Vec<String> {
        let mut out = Vec::new();
        match self.variable() {
            Some(var) if var.is_array() => {
                for value in var.values() {
                    expand_into(env, value.raw(), value.formatter(), &mut out);
                }
            }
            Some(var) => out.extend(var.values().map(|value| value.formatter().resolve(env))),
            None => {}
        }
        out
    }

    /// Names of the variables referenced by the value.
    pub fn references(&self) -> Vec<&'a str> {
        self.variable().map(|v| v.values().flat_map(|value| value.formatter().references()).collect()).unwrap_or_default()
    }

    /// The braced body of a function, empty for variables.
    pub fn body(&self) -> &'a str {
        self.node.as_function().map(|f| f.body()).unwrap_or("")
    }
}
