// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Formatting transformations over the top-level nodes of a document.
//!
//! A transformation takes the node list and returns a new one. Nodes are
//! kept one per line: after a transformation edits, drops or moves nodes,
//! each one is shifted to the line after its predecessor, so
//! transformations compose left to right.

mod config;
mod order;
mod quoting;

use std::collections::HashSet;

pub use config::{ConfigError, FormatConfig};
pub use quoting::{quote_word, QuotePolicy};

use crate::diff::PosDiff;
use crate::document::{header_len, Entry};
use crate::node::{Atom, Node};
use crate::position::Position;

/// Default wrapping width of array values.
pub const DEFAULT_MAX_WIDTH: usize = 80;

/// One step of a formatting pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformation {
    /// Drop the comments and blank lines before the first declaration.
    RemoveHeader,
    /// Keep only the first declaration of each variable and function name.
    RemoveDuplicates,
    /// Drop blank lines. With `keep_first`, a blank line opening the
    /// document survives.
    RemoveBlankLines { keep_first: bool },
    /// Drop comment lines, including the ones inside arrays.
    RemoveComments,
    /// Drop comments that follow a declaration on its line.
    RemoveTrailingComments,
    /// Strip indentation and redundant spacing; wrap arrays at `max_width`.
    CollapseSpaces { max_width: usize },
    /// Re-quote every value.
    FormatQuotes(QuotePolicy),
    /// Canonical declaration order, variables before functions.
    Reorder,
    /// A blank line before each function.
    SeparateFunctions,
}

impl Transformation {
    /// The default pipeline.
    ///
    /// Quotes are normalized before spaces are collapsed so that array
    /// wrapping measures the final width of each value.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::RemoveBlankLines { keep_first: false },
            Self::RemoveComments,
            Self::RemoveTrailingComments,
            Self::FormatQuotes(QuotePolicy::default()),
            Self::CollapseSpaces { max_width: DEFAULT_MAX_WIDTH },
            Self::Reorder,
            Self::SeparateFunctions,
        ]
    }

    /// Transform `entries`. New nodes draw their ids from `next_id`.
    pub(crate) fn apply(&self, mut entries: Vec<Entry>, next_id: &mut u64) -> Vec<Entry> {
        match self {
            Self::RemoveHeader => {
                let len = header_len(&entries);
                entries.drain(..len);
            }
            Self::RemoveDuplicates => {
                let mut seen = HashSet::new();
                entries.retain(|e| match e.node.name() {
                    Some(name) => seen.insert((e.node.is_function(), name.to_string())),
                    None => true,
                });
            }
            Self::RemoveBlankLines { keep_first } => {
                let opening = *keep_first && matches!(entries.first(), Some(e) if matches!(e.node, Node::Blank(_)));
                let mut index = 0;
                entries.retain(|e| {
                    let keep = !matches!(e.node, Node::Blank(_)) || (opening && index == 0);
                    index += 1;
                    keep
                });
            }
            Self::RemoveComments => {
                entries.retain(|e| !matches!(e.node, Node::Comment(_)));
                for entry in &mut entries {
                    entry.node.edit_variable(|v| v.remove_comments());
                }
            }
            Self::RemoveTrailingComments => {
                entries = entries
                    .into_iter()
                    .map(|Entry { id, node }| Entry { id, node: node.without_trailing_comment() })
                    .collect();
            }
            Self::CollapseSpaces { max_width } => {
                for entry in &mut entries {
                    entry.node.collapse(*max_width);
                }
            }
            Self::FormatQuotes(policy) => {
                for entry in &mut entries {
                    format_quotes(&mut entry.node, policy);
                }
            }
            Self::Reorder => entries = order::reorder(entries),
            Self::SeparateFunctions => entries = separate_functions(entries, next_id),
        }
        relayout(&mut entries);
        entries
    }
}

fn format_quotes(node: &mut Node, policy: &QuotePolicy) {
    let Some(var) = node.as_variable() else {
        return;
    };
    let prefer_quote = policy.prefers_quotes(var.name());
    let in_array = var.is_array();
    node.edit_variable(|v| v.requote(|value| quote_word(value.formatter(), prefer_quote, in_array)));
}

fn separate_functions(entries: Vec<Entry>, next_id: &mut u64) -> Vec<Entry> {
    let mut out: Vec<Entry> = Vec::with_capacity(entries.len());
    for entry in entries {
        let after_blank = out.last().map_or(true, |prev| matches!(prev.node, Node::Blank(_)));
        if entry.node.is_function() && !after_blank {
            out.push(Entry { id: *next_id, node: Node::Blank(Atom::new("", Position::START)) });
            *next_id += 1;
        }
        out.push(entry);
    }
    out
}

/// Put the nodes one per line from the start of the document.
///
/// Each node is moved on its own by the difference between its begin and
/// the line after the previous node. A node's positions are consistent
/// among themselves, so one step places all of them.
fn relayout(entries: &mut [Entry]) {
    let mut next = Position::START;
    for entry in entries {
        PosDiff::new(entry.node.begin(), next).propagate(&mut entry.node);
        next = entry.node.end().next('\n');
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
