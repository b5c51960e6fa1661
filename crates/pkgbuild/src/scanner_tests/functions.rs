// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Function declarations and their opaque bodies.

use crate::node::NodeKind;
use crate::scanner::Scanner;

fn body(input: &str) -> String {
    let nodes = Scanner::scan_all(input).unwrap();
    nodes[0].as_function().unwrap().body().to_string()
}

scan_tests! {
    simple_function: "build() {\n  make\n}\n" => [NodeKind::Function],
    spaced_header: "build ( ) {\n  make\n}\n" => [NodeKind::Function],
    brace_on_next_line: "build()\n{\n  make\n}\n" => [NodeKind::Function],
    one_line_function: "check() { :; }\n" => [NodeKind::Function],
    function_with_comment_after: "package() { :; } # done\n" => [NodeKind::Group],
    split_package_function: "package_foo-docs() {\n  :\n}\n" => [NodeKind::Function],
    function_between_vars: "a=1\nbuild() {\n  make\n}\nb=2\n" => [
        NodeKind::SingleVar,
        NodeKind::Function,
        NodeKind::SingleVar,
    ],
}

raw_tests! {
    raw_of_function: "build() {\n  make\n}\n" => ["build() {\n  make\n}"],
}

#[test]
fn name_and_body_are_split() {
    let nodes = Scanner::scan_all("package() {\n  install -Dm644 x y\n}\n").unwrap();
    let func = nodes[0].as_function().unwrap();
    assert_eq!(func.name(), "package");
    assert_eq!(func.body(), "{\n  install -Dm644 x y\n}");
}

#[test]
fn nested_braces_are_balanced() {
    let input = "build() {\n  if true; then { echo; }; fi\n  echo ${x}\n}\n";
    assert_eq!(body(input), "{\n  if true; then { echo; }; fi\n  echo ${x}\n}");
}

#[test]
fn quoted_braces_do_not_count() {
    assert_eq!(body("f() {\n  echo '}' \"}\" \\}\n}"), "{\n  echo '}' \"}\" \\}\n}");
}

#[test]
fn braces_in_comments_do_not_count() {
    assert_eq!(body("f() {\n  # }\n  :\n}"), "{\n  # }\n  :\n}");
}

#[test]
fn hash_inside_a_word_is_not_a_comment() {
    assert_eq!(body("f() { echo ${#arr[@]}; }"), "{ echo ${#arr[@]}; }");
}

#[test]
fn here_string_is_not_a_heredoc() {
    assert_eq!(body("f() { cat <<< \"}\"; }"), "{ cat <<< \"}\"; }");
}

#[test]
fn function_name_may_contain_dashes() {
    let nodes = Scanner::scan_all("package_python-foo.bar() { :; }\n").unwrap();
    assert_eq!(nodes[0].name(), Some("package_python-foo.bar"));
}
