// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Well-known PKGBUILD variables and functions.
//!
//! The order of [`VARIABLES`] and [`FUNCTIONS`] is the canonical declaration
//! order used when reordering a document.

/// Well-known variables, in canonical order.
pub const VARIABLES: &[&str] = &[
    "pkgbase",
    "pkgname",
    "pkgver",
    "pkgrel",
    "epoch",
    "pkgdesc",
    "arch",
    "url",
    "license",
    "groups",
    "depends",
    "makedepends",
    "checkdepends",
    "optdepends",
    "provides",
    "conflicts",
    "replaces",
    "backup",
    "options",
    "install",
    "changelog",
    "source",
    "noextract",
    "cksums",
    "md5sums",
    "sha1sums",
    "sha256sums",
    "b2sums",
];

/// Variables every PKGBUILD must declare.
pub const REQUIRED_VARIABLES: &[&str] = &["pkgname", "pkgver", "pkgrel", "pkgdesc", "arch", "url", "license"];

/// Variables that may hold source checksums. One of them is expected.
pub const CHECKSUM_VARIABLES: &[&str] = &["cksums", "md5sums", "sha1sums", "sha256sums", "b2sums"];

const ARRAY_VARIABLES: &[&str] = &[
    "arch",
    "license",
    "groups",
    "depends",
    "makedepends",
    "checkdepends",
    "optdepends",
    "provides",
    "conflicts",
    "replaces",
    "backup",
    "options",
    "source",
    "noextract",
    "cksums",
    "md5sums",
    "sha1sums",
    "sha256sums",
    "b2sums",
];

const QUOTED_VARIABLES: &[&str] = &[
    "pkgdesc",
    "arch",
    "url",
    "license",
    "groups",
    "depends",
    "makedepends",
    "checkdepends",
    "optdepends",
    "provides",
    "conflicts",
    "replaces",
    "backup",
    "install",
    "changelog",
    "source",
    "noextract",
    "cksums",
    "md5sums",
    "sha1sums",
    "sha256sums",
    "b2sums",
];

/// Well-known functions, in canonical order.
pub const FUNCTIONS: &[&str] = &["prepare", "build", "check", "package"];

/// Functions every PKGBUILD must declare.
pub const REQUIRED_FUNCTIONS: &[&str] = &["package"];

pub fn is_standard_variable(name: &str) -> bool {
    VARIABLES.contains(&name)
}

pub fn is_required_variable(name: &str) -> bool {
    REQUIRED_VARIABLES.contains(&name)
}

/// Whether the variable is declared as an array by convention.
pub fn is_array_variable(name: &str) -> bool {
    ARRAY_VARIABLES.contains(&name)
}

/// Whether values of `name` should be quoted. Unknown names are quoted.
pub fn is_quoted_variable(name: &str) -> bool {
    QUOTED_VARIABLES.contains(&name) || !is_standard_variable(name)
}

pub fn is_checksum_variable(name: &str) -> bool {
    CHECKSUM_VARIABLES.contains(&name)
}

pub fn is_standard_function(name: &str) -> bool {
    FUNCTIONS.contains(&name)
}

pub fn is_required_function(name: &str) -> bool {
    REQUIRED_FUNCTIONS.contains(&name)
}

/// Rank of a well-known variable in [`VARIABLES`].
pub fn variable_rank(name: &str) -> Option<usize> {
    VARIABLES.iter().position(|v| *v == name)
}

/// Rank of a well-known function in [`FUNCTIONS`].
pub fn function_rank(name: &str) -> Option<usize> {
    FUNCTIONS.iter().position(|f| *f == name)
}

#[cfg(test)]
#[path = "standard_tests.rs"]
mod tests;
