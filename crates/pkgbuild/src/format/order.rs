// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical declaration order.
//!
//! Variables come first, well-known ones in the standard order and unknown
//! ones after them by name, then re-sequenced so that a variable follows the
//! variables its value references. Functions come last: helpers in their
//! original order, then the well-known phases.
//!
//! Comment and blank lines travel with the declaration that follows them.
//! The header and anything after the last declaration stay in place.

use std::collections::HashSet;

use crate::document::{header_len, Entry};
use crate::node::Node;
use crate::standard;

/// A declaration with the lines attached before it.
struct Unit {
    name: String,
    depends: HashSet<String>,
    entries: Vec<Entry>,
}

impl Unit {
    fn new(mut entries: Vec<Entry>) -> Option<Self> {
        let decl = entries.pop()?;
        let name = decl.node.name()?.to_string();
        let depends = references(&decl.node);
        entries.push(decl);
        Some(Self { name, depends, entries })
    }
}

/// Names referenced by a variable's values.
fn references(node: &Node) -> HashSet<String> {
    node.as_variable()
        .map(|var| var.values().flat_map(|v| v.formatter().references()).map(str::to_string).collect())
        .unwrap_or_default()
}

pub(super) fn reorder(mut entries: Vec<Entry>) -> Vec<Entry> {
    let header: Vec<Entry> = entries.drain(..header_len(&entries)).collect();

    let mut variables = Vec::new();
    let mut functions = Vec::new();
    let mut pending = Vec::new();
    for entry in entries {
        let is_declaration = entry.node.is_declaration();
        let is_function = entry.node.is_function();
        pending.push(entry);
        if !is_declaration {
            continue;
        }
        let Some(unit) = Unit::new(std::mem::take(&mut pending)) else {
            continue;
        };
        if is_function {
            functions.push(unit);
        } else {
            variables.push(unit);
        }
    }

    variables.sort_by(|a, b| variable_key(&a.name).cmp(&variable_key(&b.name)));
    let variables = sequence(variables);
    functions.sort_by_key(|unit| standard::function_rank(&unit.name).map_or(0, |rank| rank + 1));

    let mut out = header;
    out.extend(variables.into_iter().chain(functions).flat_map(|unit| unit.entries));
    out.extend(pending);
    out
}

/// Well-known names by rank, then unknown names by name.
fn variable_key(name: &str) -> (usize, &str) {
    match standard::variable_rank(name) {
        Some(rank) => (rank, ""),
        None => (standard::VARIABLES.len(), name),
    }
}

/// Emit each variable after the ones it references, keeping the given order
/// otherwise.
///
/// At each step the first variable whose references are all emitted (or not
/// declared) goes next. A reference cycle leaves no candidate; the first
/// remaining variable is then emitted anyway.
fn sequence(mut remaining: Vec<Unit>) -> Vec<Unit> {
    let mut out = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let next = (0..remaining.len()).find(|&i| is_free(&remaining, i)).unwrap_or_else(|| {
            let cycle: Vec<&str> = remaining.iter().map(|u| u.name.as_str()).collect();
            tracing::warn!(?cycle, "reference cycle between variables, keeping order");
            0
        });
        out.push(remaining.remove(next));
    }
    out
}

/// Whether no other remaining variable declares a name that `remaining[i]`
/// references.
fn is_free(remaining: &[Unit], i: usize) -> bool {
    let unit = &remaining[i];
    !remaining.iter().enumerate().any(|(j, other)| j != i && unit.depends.contains(&other.name))
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
