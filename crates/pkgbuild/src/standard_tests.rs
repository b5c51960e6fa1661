// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use yare::parameterized;

use super::*;

#[parameterized(
    pkgname = { "pkgname", false },
    pkgver = { "pkgver", false },
    pkgrel = { "pkgrel", false },
    epoch = { "epoch", false },
    options = { "options", false },
    pkgdesc = { "pkgdesc", true },
    arch = { "arch", true },
    sha256sums = { "sha256sums", true },
    unknown = { "_commit", true },
)]
fn quoted_variables(name: &str, quoted: bool) {
    assert_eq!(is_quoted_variable(name), quoted);
}

#[test]
fn required_variables_are_standard() {
    assert!(REQUIRED_VARIABLES.iter().all(|v| is_standard_variable(v)));
}

#[test]
fn checksum_variables_are_arrays() {
    assert!(CHECKSUM_VARIABLES.iter().all(|v| is_array_variable(v) && is_checksum_variable(v)));
}

#[test]
fn ranks_follow_canonical_order() {
    assert_eq!(variable_rank("pkgbase"), Some(0));
    assert!(variable_rank("pkgname") < variable_rank("depends"));
    assert_eq!(variable_rank("_commit"), None);
    assert_eq!(function_rank("package"), Some(3));
    assert_eq!(function_rank("helper"), None);
}

#[test]
fn package_is_the_only_required_function() {
    assert!(is_required_function("package"));
    assert!(is_standard_function("build"));
    assert!(!is_required_function("build"));
}

#[test]
fn single_valued_variables_are_not_arrays() {
    for name in ["pkgname", "pkgver", "pkgrel", "epoch", "pkgdesc", "url", "install", "changelog"] {
        assert!(!is_array_variable(name), "{name}");
    }
}
