// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural checks over a document, for linting.

use crate::document::Document;
use crate::info::{Info, InfoKind};
use crate::standard;

/// Required declarations a document lacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingVariables {
    /// Required variables without a declaration, in standard order.
    pub names: Vec<&'static str>,
    /// No checksum variable is declared at all.
    pub checksums: bool,
}

impl MissingVariables {
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && !self.checksums
    }
}

pub fn missing_variables(doc: &Document) -> MissingVariables {
    MissingVariables {
        names: standard::REQUIRED_VARIABLES.iter().copied().filter(|name| !doc.contains_variable(name)).collect(),
        checksums: !standard::CHECKSUM_VARIABLES.iter().any(|name| doc.contains_variable(name)),
    }
}

pub fn missing_functions(doc: &Document) -> Vec<&'static str> {
    standard::REQUIRED_FUNCTIONS.iter().copied().filter(|name| !doc.contains_function(name)).collect()
}

/// A well-known name declared with the wrong kind.
#[derive(Debug, Clone)]
pub struct BadKind<'a> {
    pub info: Info<'a>,
    pub expected: InfoKind,
}

/// Kind a well-known name must be declared with. `pkgname` may be either a
/// string or an array (split packages).
fn expected_kind(name: &str, actual: InfoKind) -> Option<InfoKind> {
    if standard::is_standard_function(name) {
        Some(InfoKind::Function)
    } else if name == "pkgname" && actual != InfoKind::Function {
        Some(actual)
    } else if standard::is_array_variable(name) {
        Some(InfoKind::ArrayVar)
    } else if standard::is_standard_variable(name) {
        Some(InfoKind::SingleVar)
    } else {
        None
    }
}

/// Declarations of well-known names whose kind disagrees with the standard.
pub fn bad_standard(doc: &Document) -> Vec<BadKind<'_>> {
    doc.infos(&[])
        .into_iter()
        .filter_map(|info| {
            let expected = expected_kind(info.name(), info.kind())?;
            (expected != info.kind()).then_some(BadKind { info, expected })
        })
        .collect()
}

/// Variables whose values all expand to empty strings.
pub fn empty(doc: &Document) -> Vec<Info<'_>> {
    doc.variables()
        .into_iter()
        .filter(|info| info.array_parsed(doc.environ()).iter().all(String::is_empty))
        .collect()
}

/// Whether `pkgrel` is exactly `1`. False when it is unset.
pub fn is_pkgrel_clean(doc: &Document) -> bool {
    doc.value("pkgrel") == "1"
}

/// Whether `arch` is exactly `(x86_64)`. False when it is unset.
pub fn is_arch_clean(doc: &Document) -> bool {
    matches!(doc.array_value("arch").as_slice(), [arch] if arch == "x86_64")
}

const DEPENDS: [&str; 3] = ["depends", "makedepends", "checkdepends"];

/// Whether the package declares any runtime, build or check dependency.
pub fn has_depends(doc: &Document) -> bool {
    DEPENDS.iter().any(|name| !doc.array_value(name).is_empty())
}

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;
