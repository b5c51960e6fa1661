// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Positional deltas and their propagation through nodes.
//!
//! An edit that changes the end of a node from `old` to `new` shifts every
//! position at or after `old`. [`PosDiff`] captures that shift and
//! [`PosDiff::propagate`] applies it to a whole node tree.

use serde::{Deserialize, Serialize};

use crate::node::Node;
use crate::position::Position;

/// The shift produced by an edit anchored at `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PosDiff {
    pub from: Position,
    pub line: isize,
    pub column: isize,
    pub offset: isize,
}

impl PosDiff {
    /// The delta that moves `old` onto `new`, anchored at `old`.
    pub fn new(old: Position, new: Position) -> Self {
        Self {
            from: old,
            line: delta(old.line, new.line),
            column: delta(old.column, new.column),
            offset: delta(old.offset, new.offset),
        }
    }

    /// A diff that moves `len` bytes of text spanning `lines` newlines,
    /// anchored at a line start.
    pub fn lines(from: Position, lines: isize, offset: isize) -> Self {
        Self { from, line: lines, column: 0, offset }
    }

    pub fn is_nil(&self) -> bool {
        self.line == 0 && self.column == 0 && self.offset == 0
    }

    /// Shift `pos` if it lies at or after the anchor.
    ///
    /// The column delta only applies on the anchor's own line.
    pub fn apply(&self, pos: Position) -> Position {
        if self.is_nil() || pos < self.from {
            return pos;
        }
        let column = if pos.line == self.from.line { self.column } else { 0 };
        Position {
            line: shift(pos.line, self.line),
            column: shift(pos.column, column),
            offset: shift(pos.offset, self.offset),
        }
    }

    /// Apply the diff to every position of `node`, children first.
    pub fn propagate(&self, node: &mut Node) {
        if self.is_nil() {
            return;
        }
        node.visit_positions_mut(&mut |pos| *pos = self.apply(*pos));
    }

    pub fn propagate_all<'a>(&self, nodes: impl IntoIterator<Item = &'a mut Node>) {
        for node in nodes {
            self.propagate(node);
        }
    }

    /// Fold a later edit into a running diff.
    ///
    /// Only valid for positions on lines after both anchors, which is the case
    /// for top-level nodes that follow the edited ones: the column delta is
    /// dropped and the line and offset deltas add up. The earliest anchor is
    /// kept, expressed in the coordinates of the positions not yet shifted.
    pub fn accumulate(&mut self, step: &PosDiff) {
        if step.is_nil() {
            return;
        }
        if self.is_nil() {
            *self = PosDiff { from: step.from, line: step.line, column: 0, offset: step.offset };
        } else {
            self.line += step.line;
            self.offset += step.offset;
        }
    }
}

fn delta(old: usize, new: usize) -> isize {
    if new >= old {
        isize::try_from(new - old).unwrap_or(isize::MAX)
    } else {
        isize::try_from(old - new).map(|d| -d).unwrap_or(isize::MIN)
    }
}

fn shift(value: usize, by: isize) -> usize {
    if by >= 0 {
        value.saturating_add(by.unsigned_abs())
    } else {
        value.saturating_sub(by.unsigned_abs())
    }
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
