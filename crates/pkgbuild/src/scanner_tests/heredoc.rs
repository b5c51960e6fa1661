// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Here-documents inside function bodies.

use crate::error::{ScanError, Unclosed};
use crate::scanner::Scanner;

fn body(input: &str) -> String {
    let nodes = Scanner::scan_all(input).unwrap();
    nodes[0].as_function().unwrap().body().to_string()
}

#[test]
fn heredoc_lines_are_opaque() {
    let input = "package() {\n  cat <<EOF\n}\n'\nEOF\n}\n";
    assert_eq!(body(input), "{\n  cat <<EOF\n}\n'\nEOF\n}");
}

#[test]
fn quoted_delimiter() {
    let input = "package() {\n  cat <<'END' > x\n$unexpanded }\nEND\n}\n";
    assert_eq!(body(input), "{\n  cat <<'END' > x\n$unexpanded }\nEND\n}");
}

#[test]
fn dash_delimiter_strips_tabs() {
    let input = "package() {\n\tcat <<-EOF\n\t}\n\tEOF\n}\n";
    assert_eq!(body(input), "{\n\tcat <<-EOF\n\t}\n\tEOF\n}");
}

#[test]
fn two_heredocs_on_one_line() {
    let input = "f() {\n  cat <<A <<B\n}\nA\n}\nB\n}\n";
    assert_eq!(body(input), "{\n  cat <<A <<B\n}\nA\n}\nB\n}");
}

#[test]
fn heredoc_after_comment_line() {
    let input = "f() {\n  cat <<A # note\n}\nA\n}";
    assert_eq!(body(input), "{\n  cat <<A # note\n}\nA\n}");
}

scan_error_tests! {
    unterminated_heredoc: "f() {\n  cat <<EOF\n}\n" => ScanError::UnterminatedToken { unclosed: Unclosed::HereDoc, .. },
}
