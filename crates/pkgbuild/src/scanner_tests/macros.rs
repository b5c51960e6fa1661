// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative test generators for the scanner.

/// Generate node-kind tests.
///
/// # Example
///
/// ```ignore
/// scan_tests! {
///     empty_input: "" => [],
///     one_var: "a=1\n" => [NodeKind::SingleVar],
/// }
/// ```
macro_rules! scan_tests {
    ($($name:ident: $input:expr => [$($kind:expr),* $(,)?]),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let nodes = Scanner::scan_all($input).expect(concat!("failed to scan: ", $input));
                let expected: Vec<NodeKind> = vec![$($kind),*];
                let actual: Vec<_> = nodes.iter().map(|n| n.kind()).collect();
                assert_eq!(actual, expected, "input: {:?}", $input);
            }
        )*
    };
}

/// Generate raw-text tests: the raw text of every scanned node.
///
/// # Example
///
/// ```ignore
/// raw_tests! {
///     trailing_spaces: "a=1  \n" => ["a=1  "],
/// }
/// ```
macro_rules! raw_tests {
    ($($name:ident: $input:expr => [$($raw:expr),* $(,)?]),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let nodes = Scanner::scan_all($input).expect(concat!("failed to scan: ", $input));
                let expected: Vec<&str> = vec![$($raw),*];
                let actual: Vec<_> = nodes.iter().map(|n| n.raw()).collect();
                assert_eq!(actual, expected, "input: {:?}", $input);
            }
        )*
    };
}

/// Generate scan error tests.
///
/// # Example
///
/// ```ignore
/// scan_error_tests! {
///     open_quote: "a='x" => ScanError::UnterminatedToken { unclosed: Unclosed::SingleQuote, .. },
/// }
/// ```
macro_rules! scan_error_tests {
    ($($name:ident: $input:expr => $error:pat),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let result = Scanner::scan_all($input);
                assert!(
                    matches!(result, Err($error)),
                    "expected error {:?} for input {:?}, got {:?}",
                    stringify!($error), $input, result
                );
            }
        )*
    };
}

// Macros are exported via #[macro_use] in mod.rs
