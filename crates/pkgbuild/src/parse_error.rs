// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors returned when decoding a document.

use thiserror::Error;

use crate::error::ScanError;
use crate::position::Position;

/// Decoding failed. No partial document is ever returned.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Location of a scan error; `None` for I/O failures.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Scan(err) => Some(err.position()),
            Self::Io(_) => None,
        }
    }

    /// Rustc-style diagnostic for scan errors, the plain message otherwise.
    pub fn diagnostic(&self, input: &str) -> String {
        match self {
            Self::Scan(err) => err.diagnostic(input),
            Self::Io(err) => format!("error: {err}"),
        }
    }
}
