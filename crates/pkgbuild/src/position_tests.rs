// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn next_advances_column_and_offset() {
    let p = Position::START.next('a');
    assert_eq!(p, Position::new(1, 1, 1));
}

#[test]
fn next_newline_resets_column() {
    let p = Position::START.next_str("ab").next('\n');
    assert_eq!(p, Position::new(2, 0, 3));
}

#[test]
fn next_counts_utf8_bytes_in_offset() {
    let p = Position::START.next('é');
    assert_eq!(p.column, 1);
    assert_eq!(p.offset, 2);
}

#[test]
fn ordering_is_line_then_column() {
    assert!(Position::new(1, 9, 9) < Position::new(2, 0, 10));
    assert!(Position::new(2, 1, 11) < Position::new(2, 3, 13));
    assert!(Position::new(3, 0, 20) > Position::new(2, 40, 19));
}

#[test]
fn default_is_start() {
    assert_eq!(Position::default(), Position::START);
}

#[test]
fn display_is_one_indexed_column() {
    assert_eq!(Position::new(3, 4, 20).to_string(), "3:5");
}

#[yare::parameterized(
    same_position = { Position::new(1, 4, 4), Position::new(1, 4, 4), "" },
    same_line     = { Position::new(1, 4, 4), Position::new(1, 7, 7), "   " },
    next_line     = { Position::new(1, 4, 4), Position::new(2, 0, 5), "\n" },
    indented      = { Position::new(1, 4, 4), Position::new(3, 2, 8), "\n\n  " },
    backwards     = { Position::new(2, 4, 9), Position::new(1, 0, 0), "" },
)]
fn blank_between(from: Position, to: Position, expected: &str) {
    assert_eq!(from.blank(to), expected);
}

#[test]
fn span_of_covers_text() {
    let span = Span::of(Position::START, "ab\ncd");
    assert_eq!(span.end, Position::new(2, 2, 5));
}

#[test]
fn span_contains() {
    let span = Span::new(Position::new(1, 2, 2), Position::new(1, 5, 5));
    assert!(!span.contains(Position::new(1, 1, 1)));
    assert!(span.contains(Position::new(1, 2, 2)));
    assert!(span.contains(Position::new(1, 4, 4)));
    assert!(!span.contains(Position::new(1, 5, 5)));
}

#[test]
fn span_merge() {
    let a = Span::new(Position::new(1, 0, 0), Position::new(1, 3, 3));
    let b = Span::new(Position::new(2, 0, 4), Position::new(2, 2, 6));
    let merged = a.merge(b);
    assert_eq!(merged.begin, a.begin);
    assert_eq!(merged.end, b.end);
}

#[yare::parameterized(
    from_start    = { "pkgname=foo", 0, 0, 7, "pkgname" },
    with_origin   = { "pkgver=1", 10, 17, 18, "1" },
    out_of_bounds = { "hi", 0, 10, 20, "" },
    before_origin = { "hi", 5, 0, 1, "" },
)]
fn span_slice(source: &str, origin: usize, start: usize, end: usize, expected: &str) {
    let span = Span::new(Position::new(1, start, start), Position::new(1, end, end));
    assert_eq!(span.slice(source, origin), expected);
}

#[test]
fn line_content_picks_line() {
    let source = "a=1\nb=2\nc=3";
    assert_eq!(line_content(source, 2), "b=2");
    assert_eq!(line_content(source, 9), "");
}

#[test]
fn context_snippet_points_at_column() {
    let source = "arch=(x86_64 ]";
    let snippet = context_snippet(source, Position::new(1, 13, 13), 3);
    assert_eq!(snippet, "64 ]\n   ^");
}

#[test]
fn diagnostic_context_shows_line_and_caret() {
    let source = "pkgname=foo\narch=(x86_64 ]";
    let diag = diagnostic_context(source, Position::new(2, 13, 25), "unexpected character ']'");
    assert!(diag.starts_with("error: unexpected character ']'"));
    assert!(diag.contains("line 2, column 14"));
    assert!(diag.contains("  2 | arch=(x86_64 ]"));
    assert!(diag.ends_with(&format!("| {}^", " ".repeat(13))));
}
