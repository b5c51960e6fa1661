// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pkgbuild: parse, query, edit and format PKGBUILD files without losing a
//! byte of the original text.

pub mod checks;
pub mod diff;
pub mod document;
pub mod env;
pub mod error;
pub mod escape;
pub mod format;
pub mod info;
pub mod node;
pub mod parse_error;
pub mod position;
pub mod scanner;
pub mod standard;
pub mod token;

pub use diff::PosDiff;
pub use document::Document;
pub use env::{Environ, MapEnviron};
pub use error::{MessageFormat, PlainMessages, ScanError, SyntaxIssue, Unclosed};
pub use escape::QuoteStyle;
pub use format::{quote_word, ConfigError, FormatConfig, QuotePolicy, Transformation};
pub use info::{Info, InfoId, InfoKind};
pub use node::{Node, NodeKind, ValueElement, ValueFormatter, VarKind};
pub use parse_error::ParseError;
pub use position::{Position, Span};
pub use scanner::{ScanMode, Scanner};
pub use token::{is_valid_function_name, is_valid_variable_name};
