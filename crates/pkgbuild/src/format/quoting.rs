// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Quote normalization of value words.
//!
//! A word is a list of fragments. Each fragment can be rendered unquoted,
//! single-quoted or double-quoted depending on its content and on how it was
//! written. Neighbouring fragments that share a quoting choice are rendered
//! inside one pair of quotes; the partition maximizing the sum of squared
//! group lengths wins.

use serde::{Deserialize, Serialize};

use crate::escape::{escape, is_clean, needs_escape, QuoteStyle};
use crate::node::{render_element, ValueElement, ValueFormatter};
use crate::standard;
use crate::token::is_glob_meta;

/// Per-name overrides of the quoting preference.
///
/// Names in neither list follow the standard table: well-known names are
/// quoted unless they are numeric-like, unknown names are quoted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct QuotePolicy {
    pub always: Vec<String>,
    pub never: Vec<String>,
}

impl QuotePolicy {
    pub fn prefers_quotes(&self, name: &str) -> bool {
        if self.never.iter().any(|n| n == name) {
            return false;
        }
        self.always.iter().any(|n| n == name) || standard::is_quoted_variable(name)
    }
}

/// Which quote contexts a fragment (or a run of fragments) can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Quoting {
    pub(crate) quotable: bool,
    pub(crate) unquotable: bool,
    pub(crate) singlequotable: bool,
}

impl Quoting {
    pub(crate) fn of(element: &ValueElement) -> Self {
        match element {
            ValueElement::Literal { value, quoted: QuoteStyle::Unquoted } => {
                let bare = is_bare(value);
                let quotable = !bare || !value.chars().any(is_glob_meta);
                Self { quotable, unquotable: bare, singlequotable: quotable && !value.contains('\'') }
            }
            ValueElement::Literal { value, .. } => Self {
                quotable: true,
                unquotable: is_clean(value, QuoteStyle::Unquoted),
                singlequotable: !value.contains('\''),
            },
            ValueElement::Reference(_) | ValueElement::Expansion(_) => {
                Self { quotable: true, unquotable: false, singlequotable: false }
            }
        }
    }

    pub(crate) fn join(self, other: Self) -> Self {
        Self {
            quotable: self.quotable && other.quotable,
            unquotable: self.unquotable && other.unquotable,
            singlequotable: self.singlequotable && other.singlequotable,
        }
    }

    pub(crate) fn is_nil(self) -> bool {
        !self.quotable && !self.unquotable && !self.singlequotable
    }

    /// The context a run with these capabilities is rendered in.
    fn style(self, prefer_quote: bool) -> QuoteStyle {
        if !self.unquotable || (prefer_quote && self.quotable) {
            if self.singlequotable {
                QuoteStyle::Single
            } else {
                QuoteStyle::Double
            }
        } else {
            QuoteStyle::Unquoted
        }
    }
}

/// Unquoted text that stays one word when written verbatim: metacharacters
/// other than globs are absent and brackets balance.
fn is_bare(value: &str) -> bool {
    let mut depth = 0usize;
    for ch in value.chars() {
        match ch {
            '[' | '{' => depth += 1,
            ']' | '}' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            '*' | '?' | '~' => {}
            c if needs_escape(c, QuoteStyle::Unquoted) => return false,
            _ => {}
        }
    }
    depth == 0
}

/// A run of fragments `start..=end` sharing one quoting decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Group {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) quoting: Quoting,
}

impl Group {
    pub(crate) fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Sum of squared group lengths.
pub(crate) fn score(groups: &[Group]) -> usize {
    groups.iter().map(|g| g.len() * g.len()).sum()
}

/// Partition `quotings` into contiguous runs with a non-empty joined
/// capability, maximizing [`score`].
pub(crate) fn partition(quotings: &[Quoting]) -> Vec<Group> {
    let n = quotings.len();
    if n == 0 {
        return Vec::new();
    }

    // joined[i][j]: capabilities of the run i..=j
    let mut joined = vec![vec![Quoting::default(); n]; n];
    for i in 0..n {
        joined[i][i] = quotings[i];
        for j in i + 1..n {
            joined[i][j] = joined[i][j - 1].join(quotings[j]);
        }
    }

    // best[i]: best score for the first i fragments, start[i]: where its last run begins
    let mut best: Vec<Option<usize>> = vec![None; n + 1];
    let mut start = vec![0; n + 1];
    best[0] = Some(0);
    for i in 1..=n {
        for j in 0..i {
            let (Some(prefix), false) = (best[j], joined[j][i - 1].is_nil()) else {
                continue;
            };
            let size = i - j;
            let candidate = prefix + size * size;
            let better = match best[i] {
                Some(b) => candidate > b,
                None => true,
            };
            if better {
                best[i] = Some(candidate);
                start[i] = j;
            }
        }
    }

    let mut groups = Vec::new();
    let mut i = n;
    while i > 0 {
        let j = start[i];
        groups.push(Group { start: j, end: i - 1, quoting: joined[j][i - 1] });
        i = j;
    }
    groups.reverse();
    groups
}

/// Render one fragment inside `style`.
fn convert(element: &ValueElement, style: QuoteStyle) -> String {
    match element {
        ValueElement::Literal { value, quoted: QuoteStyle::Unquoted } if style == QuoteStyle::Unquoted => {
            value.clone()
        }
        ValueElement::Literal { value, .. } => escape(value, style),
        other => render_element(other, style),
    }
}

/// Re-render a word with normalized quoting.
///
/// `prefer_quote` quotes every run that can be quoted; otherwise runs are
/// quoted only when they must be. An empty word becomes `''` when quoting is
/// preferred or when it is an array element, which would vanish otherwise.
pub fn quote_word(value: &ValueFormatter, prefer_quote: bool, in_array: bool) -> String {
    if value.is_empty() {
        return if prefer_quote || in_array { "''".to_string() } else { String::new() };
    }
    let elements = value.elements();
    let quotings: Vec<_> = elements.iter().map(Quoting::of).collect();

    let mut out = String::new();
    for group in partition(&quotings) {
        let style = group.quoting.style(prefer_quote);
        let q = style.quote_char().map(String::from).unwrap_or_default();
        out.push_str(&q);
        for element in &elements[group.start..=group.end] {
            out.push_str(&convert(element, style));
        }
        out.push_str(&q);
    }
    out
}

#[cfg(test)]
#[path = "quoting_tests.rs"]
mod tests;
