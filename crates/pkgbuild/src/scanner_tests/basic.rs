// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-level structure: blanks, comments, single variables and groups.

use crate::node::{Node, NodeKind};
use crate::scanner::Scanner;

scan_tests! {
    empty_input: "" => [],
    lone_newline: "\n" => [NodeKind::Blank],
    spaces_only: "   " => [NodeKind::Blank],
    comment_line: "# Maintainer: someone\n" => [NodeKind::Comment],
    indented_comment: "  # note\n" => [NodeKind::Comment],
    single_var: "pkgname=foo\n" => [NodeKind::SingleVar],
    single_var_without_newline: "pkgname=foo" => [NodeKind::SingleVar],
    empty_single_var: "pkgdesc=\n" => [NodeKind::SingleVar],
    var_then_blank_then_var: "a=1\n\nb=2\n" => [NodeKind::SingleVar, NodeKind::Blank, NodeKind::SingleVar],
    var_with_comment_is_group: "pkgrel=1 # bump\n" => [NodeKind::Group],
    indented_var: "  pkgver=1.0\n" => [NodeKind::SingleVar],
    crlf_lines: "a=1\r\nb=2\r\n" => [NodeKind::SingleVar, NodeKind::SingleVar],
}

raw_tests! {
    raw_of_single_var: "pkgname=foo\n" => ["pkgname=foo"],
    raw_keeps_trailing_spaces: "pkgname=foo  \n" => ["pkgname=foo  "],
    raw_of_blank_is_its_spaces: "  \n" => ["  "],
    raw_of_comment_includes_indent: "  # x\n" => ["  # x"],
    raw_of_group: "pkgrel=1   # bump\n" => ["pkgrel=1   # bump"],
    raw_of_indented_var: "  pkgver=1.0\n" => ["  pkgver=1.0"],
    raw_of_quoted_value_with_spaces: "pkgdesc='a b  c'\n" => ["pkgdesc='a b  c'"],
    raw_of_expansion_with_spaces: "x=${y// /_}\n" => ["x=${y// /_}"],
}

#[test]
fn single_var_holds_one_value() {
    let nodes = Scanner::scan_all("pkgdesc='A tool'\n").unwrap();
    let var = nodes[0].as_variable().unwrap();
    assert_eq!(var.name(), "pkgdesc");
    let values: Vec<_> = var.values().map(|v| v.raw()).collect();
    assert_eq!(values, vec!["'A tool'"]);
}

#[test]
fn empty_single_var_holds_empty_value() {
    let nodes = Scanner::scan_all("pkgdesc=\n").unwrap();
    let var = nodes[0].as_variable().unwrap();
    let values: Vec<_> = var.values().map(|v| v.raw()).collect();
    assert_eq!(values, vec![""]);
}

#[test]
fn group_children_are_declaration_then_comment() {
    let nodes = Scanner::scan_all("pkgrel=1 # bump\n").unwrap();
    let Node::Group(group) = &nodes[0] else {
        panic!("expected group, got {:?}", nodes[0]);
    };
    assert_eq!(group.declaration().map(Node::raw), Some("pkgrel=1"));
    assert_eq!(group.comment().map(Node::raw), Some("# bump"));
    assert_eq!(nodes[0].name(), Some("pkgrel"));
}

#[test]
fn group_declaration_excludes_spaces_before_comment() {
    let nodes = Scanner::scan_all("a=1    # c").unwrap();
    let decl = nodes[0].declaration().unwrap();
    assert_eq!(decl.raw(), "a=1");
    assert_eq!(decl.end().column, 3);
}

#[test]
fn value_formatter_splits_references() {
    let nodes = Scanner::scan_all("source=\"$pkgname-$pkgver.tar.gz\"\n").unwrap();
    let var = nodes[0].as_variable().unwrap();
    let refs: Vec<_> = var.values().flat_map(|v| v.formatter().references()).collect();
    assert_eq!(refs, vec!["pkgname", "pkgver"]);
}

#[test]
fn iterator_yields_nodes_then_stops() {
    let mut scanner = Scanner::new("a=1\nb=2");
    assert!(matches!(scanner.next(), Some(Ok(_))));
    assert!(matches!(scanner.next(), Some(Ok(_))));
    assert!(scanner.next().is_none());
    assert!(scanner.next().is_none());
}
