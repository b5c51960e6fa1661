// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan failures and the positions they report.

use crate::error::{ScanError, SyntaxIssue, Unclosed};
use crate::position::Position;
use crate::scanner::Scanner;

// =============================================================================
// Unterminated constructs
// =============================================================================

scan_error_tests! {
    name_at_eof: "pkgname" => ScanError::UnterminatedToken { unclosed: Unclosed::Name, .. },
    open_single_quote: "pkgdesc='abc" => ScanError::UnterminatedToken { unclosed: Unclosed::SingleQuote, .. },
    open_double_quote: "pkgdesc=\"abc" => ScanError::UnterminatedToken { unclosed: Unclosed::DoubleQuote, .. },
    open_backtick: "x=`date" => ScanError::UnterminatedToken { unclosed: Unclosed::Backtick, .. },
    trailing_backslash: "x=abc\\" => ScanError::UnterminatedToken { unclosed: Unclosed::Escape, .. },
    open_parameter_expansion: "x=${y" => ScanError::UnterminatedToken { unclosed: Unclosed::Brace, .. },
    open_command_substitution: "x=$(ls" => ScanError::UnterminatedToken { unclosed: Unclosed::Paren, .. },
    open_array: "arch=(x86_64" => ScanError::UnterminatedToken { unclosed: Unclosed::Array, .. },
    open_quote_in_array: "arch=('x86_64" => ScanError::UnterminatedToken { unclosed: Unclosed::SingleQuote, .. },
    open_function_header: "build(" => ScanError::UnterminatedToken { unclosed: Unclosed::FunctionHeader, .. },
    open_function_body: "build() {\n  make\n" => ScanError::UnterminatedToken { unclosed: Unclosed::Brace, .. },
    open_quote_in_body: "build() {\n  echo 'x\n}\n" => ScanError::UnterminatedToken { unclosed: Unclosed::SingleQuote, .. },
}

// =============================================================================
// Invalid characters
// =============================================================================

scan_error_tests! {
    digit_at_line_start: "1x=2" => ScanError::InvalidToken { ch: '1', .. },
    second_word_after_value: "pkgname=a b" => ScanError::InvalidToken { ch: 'b', .. },
    unquoted_semicolon: "x=a;b" => ScanError::InvalidToken { ch: ';', .. },
    unquoted_pipe: "x=a|b" => ScanError::InvalidToken { ch: '|', .. },
    stray_close_paren: "x=a)" => ScanError::InvalidToken { ch: ')', .. },
    command_after_name: "make install" => ScanError::InvalidToken { ch: 'i', .. },
    text_after_array: "arch=(any) x" => ScanError::InvalidToken { ch: 'x', .. },
    header_without_brace: "build() make" => ScanError::InvalidToken { ch: 'm', .. },
    dashed_name_assignment: "pkg-name=foo" => ScanError::InvalidToken { ch: '=', .. },
}

// =============================================================================
// Unsupported assignment shapes
// =============================================================================

scan_error_tests! {
    append_assignment: "depends+=(foo)" => ScanError::InvalidSyntax { issue: SyntaxIssue::Append, .. },
    indexed_assignment: "source[0]=foo" => ScanError::InvalidSyntax { issue: SyntaxIssue::Index, .. },
}

#[test]
fn invalid_syntax_reports_the_name() {
    let err = Scanner::scan_all("a=1\ndepends+=(foo)").unwrap_err();
    assert_eq!(
        err,
        ScanError::InvalidSyntax {
            name: "depends".to_string(),
            issue: SyntaxIssue::Append,
            position: Position::new(2, 0, 4),
        }
    );
}

#[test]
fn invalid_token_position_points_at_the_character() {
    let err = Scanner::scan_all("pkgname=a b").unwrap_err();
    assert_eq!(err.position(), Position::new(1, 10, 10));
}

#[test]
fn unterminated_position_is_end_of_input() {
    let err = Scanner::scan_all("x='ab\ncd").unwrap_err();
    assert_eq!(err.position(), Position::new(2, 2, 8));
}

#[test]
fn scanner_is_exhausted_after_an_error() {
    let mut scanner = Scanner::new("a=1\n1\nb=2\n");
    assert!(matches!(scanner.next(), Some(Ok(_))));
    assert!(matches!(scanner.next(), Some(Err(ScanError::InvalidToken { .. }))));
    assert!(scanner.next().is_none());
}

#[test]
fn diagnostic_points_at_the_error() {
    let input = "pkgname=foo\npkgver=1 2\n";
    let err = Scanner::scan_all(input).unwrap_err();
    let diagnostic = err.diagnostic(input);
    assert!(diagnostic.contains("pkgver=1 2"), "{diagnostic}");
    assert!(diagnostic.contains("unexpected character '2'"), "{diagnostic}");
}
