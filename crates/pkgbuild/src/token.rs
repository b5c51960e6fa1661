// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Character classes shared by the scanner and the value model.

/// Horizontal whitespace. `\r` is included so CRLF input scans.
pub(crate) fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r')
}

/// Any whitespace, including newlines.
pub(crate) fn is_blank(ch: char) -> bool {
    is_space(ch) || ch == '\n'
}

pub(crate) fn is_valid_variable_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub(crate) fn is_valid_variable_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Names start with `[a-zA-Z_]` and contain only `[a-zA-Z0-9_]`.
pub fn is_valid_variable_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_valid_variable_start(c) => {}
        _ => return false,
    }
    chars.all(is_valid_variable_char)
}

/// Characters a function name may carry beyond a variable name's, as in
/// `package_foo-docs()`.
pub(crate) fn is_function_name_char(ch: char) -> bool {
    matches!(ch, '-' | '.' | '+')
}

/// Function names start like variable names and may also contain `-`, `.`
/// and `+`.
pub fn is_valid_function_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_valid_variable_start(c) => {}
        _ => return false,
    }
    chars.all(|c| is_valid_variable_char(c) || is_function_name_char(c))
}

/// Single-character special parameters (`$@`, `$1`, ...).
pub(crate) fn is_special_parameter(ch: char) -> bool {
    matches!(ch, '@' | '*' | '#' | '?' | '-' | '$' | '!') || ch.is_ascii_digit()
}

/// Characters that end a command when unquoted.
pub(crate) fn is_control_operator(ch: char) -> bool {
    matches!(ch, ';' | '|' | '&' | '<' | '>')
}

/// Characters that trigger pathname or brace expansion when unquoted.
pub(crate) fn is_glob_meta(ch: char) -> bool {
    matches!(ch, '*' | '?' | '[' | '{' | '~')
}

/// The closing counterpart of an opening bracket.
pub(crate) fn closing_bracket(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
