// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node spans and source reconstruction from positions.

use proptest::prelude::*;

use crate::node::Node;
use crate::position::{Position, Span};
use crate::scanner::Scanner;

fn spans(input: &str) -> Vec<((usize, usize), (usize, usize))> {
    Scanner::scan_all(input)
        .unwrap()
        .iter()
        .map(|n| ((n.begin().line, n.begin().column), (n.end().line, n.end().column)))
        .collect()
}

/// Rebuild the source from node raws and the gaps between their positions.
fn rebuild(nodes: &[Node], end: Position) -> String {
    let mut out = String::new();
    let mut p = Position::START;
    for node in nodes {
        out.push_str(&p.blank(node.begin()));
        out.push_str(node.raw());
        p = node.end();
    }
    out.push_str(&p.blank(end));
    out
}

#[test]
fn spans_of_consecutive_lines() {
    assert_eq!(spans("a=1\n\nb=(x\n y)\n"), vec![((1, 0), (1, 3)), ((2, 0), (2, 0)), ((3, 0), (4, 3))]);
}

#[test]
fn span_slices_back_to_raw() {
    let input = "# c\npkgdesc='x y' # d\nbuild() {\n  :\n}\n";
    for node in Scanner::scan_all(input).unwrap() {
        assert_eq!(node.span().slice(input, 0), node.raw());
    }
}

#[test]
fn value_positions_point_into_the_source() {
    let input = "depends=(\n  'glibc'\n  zlib\n)\n";
    let nodes = Scanner::scan_all(input).unwrap();
    let var = nodes[0].as_variable().unwrap();
    for value in var.values() {
        assert_eq!(value.span().slice(input, 0), value.raw());
    }
    let second = var.values().nth(1).unwrap();
    assert_eq!(second.span().begin, Position::new(3, 2, 22));
}

#[test]
fn starting_at_offsets_every_position() {
    let begin = Position::new(5, 0, 40);
    let nodes: Vec<_> = Scanner::starting_at("a=1\nb=2", begin).collect::<Result<_, _>>().unwrap();
    assert_eq!(nodes[1].begin(), Position::new(6, 0, 44));
    assert_eq!(nodes[1].span(), Span::new(Position::new(6, 0, 44), Position::new(6, 3, 47)));
}

#[test]
fn position_after_scanning_is_end_of_input() {
    let mut scanner = Scanner::new("a=1\n");
    while let Some(node) = scanner.next() {
        node.unwrap();
    }
    assert_eq!(scanner.position(), Position::new(2, 0, 4));
}

fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("  ".to_string()),
        "# [a-z ]{0,8}",
        "[a-z]{1,6}=[a-z0-9.]{0,6}",
        "[a-z]{1,6}='[a-z ]{0,6}'  ",
        "[a-z]{1,6}=\\( *[a-z]{1,4} +\"[a-z ]{0,4}\" *\\) # [a-z]{0,4}",
        "[a-z]{1,6}=\\(\n  [a-z]{1,4}\n  # [a-z]{1,3}\n  [a-z]{1,4}\n\\)",
        "[a-z]{1,6}\\(\\) \\{\n  [a-z ]{0,8}\n\\}",
    ]
}

proptest! {
    #[test]
    fn positions_reconstruct_the_source(lines in prop::collection::vec(line(), 0..12), trailing in any::<bool>()) {
        let mut input = lines.join("\n");
        if trailing && !input.is_empty() {
            input.push('\n');
        }
        let nodes = Scanner::scan_all(&input).unwrap();
        let end = Position::START.next_str(&input);
        prop_assert_eq!(rebuild(&nodes, end), input);
    }
}
