// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Array declarations: values, comments, continuations and nesting.

use crate::node::{Element, NodeKind};
use crate::scanner::Scanner;

fn array_raws(input: &str) -> Vec<String> {
    let nodes = Scanner::scan_all(input).unwrap();
    let var = nodes[0].as_variable().unwrap();
    var.elements().iter().map(|e| e.raw().to_string()).collect()
}

scan_tests! {
    empty_array: "arch=()\n" => [NodeKind::ArrayVar],
    one_line_array: "arch=('x86_64' 'aarch64')\n" => [NodeKind::ArrayVar],
    multiline_array: "depends=(\n  'a'\n  'b'\n)\n" => [NodeKind::ArrayVar],
    array_with_comment_after: "arch=(any) # portable\n" => [NodeKind::Group],
    array_then_var: "arch=(any)\npkgrel=1\n" => [NodeKind::ArrayVar, NodeKind::SingleVar],
}

raw_tests! {
    raw_of_multiline_array: "depends=(\n  'a'\n  'b'\n)\n" => ["depends=(\n  'a'\n  'b'\n)"],
    raw_of_array_with_inner_comment: "x=(a # first\n  b)\n" => ["x=(a # first\n  b)"],
}

#[test]
fn elements_are_split_on_blanks() {
    assert_eq!(array_raws("arch=('x86_64' 'aarch64')"), vec!["'x86_64'", "'aarch64'"]);
}

#[test]
fn quoted_blanks_stay_inside_the_value() {
    assert_eq!(array_raws("optdepends=('foo: does things' bar)"), vec!["'foo: does things'", "bar"]);
}

#[test]
fn comments_inside_arrays_are_elements() {
    let nodes = Scanner::scan_all("depends=(\n  a # needed\n  # b\n  c\n)\n").unwrap();
    let var = nodes[0].as_variable().unwrap();
    let kinds: Vec<_> = var.elements().iter().map(Element::is_comment).collect();
    assert_eq!(kinds, vec![false, true, true, false]);
    assert_eq!(var.elements()[1].raw(), "# needed");
}

#[test]
fn hash_inside_a_word_is_not_a_comment() {
    assert_eq!(array_raws("source=(foo#bar)"), vec!["foo#bar"]);
}

#[test]
fn line_continuations_separate_values() {
    assert_eq!(array_raws("x=(a \\\n  b)"), vec!["a", "b"]);
}

#[test]
fn brace_expansion_is_one_value() {
    assert_eq!(array_raws("source=(file.{c,h} 'x y')"), vec!["file.{c,h}", "'x y'"]);
}

#[test]
fn command_substitution_may_contain_blanks_and_parens() {
    assert_eq!(array_raws("x=($(ls -1 | sort) b)"), vec!["$(ls -1 | sort)", "b"]);
}

#[test]
fn close_paren_position_is_recorded() {
    let nodes = Scanner::scan_all("x=(a\n)").unwrap();
    let var = nodes[0].as_variable().unwrap();
    assert_eq!(var.close.map(|p| (p.line, p.column)), Some((2, 0)));
    assert_eq!(nodes[0].end().column, 1);
}

#[test]
fn paren_right_after_a_value_closes_the_array() {
    assert_eq!(array_raws("arch=(any)"), vec!["any"]);
}
