// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use yare::parameterized;

use super::*;
use crate::document::Document;
use crate::format::Transformation;

fn reordered(input: &str) -> String {
    let mut doc = Document::parse(input).unwrap();
    doc.format(&[Transformation::Reorder]);
    doc.to_string()
}

#[parameterized(
    standard_order = { "pkgver=1\npkgname=foo\n", "pkgname=foo\npkgver=1\n" },
    unknown_after_standard = { "_z=1\nsource=(x)\n_a=2\n", "source=(x)\n_a=2\n_z=1\n" },
    already_sorted = { "pkgname=foo\npkgver=1\npkgrel=1\n", "pkgname=foo\npkgver=1\npkgrel=1\n" },
    reference_moves_later = { "a=\"$b\"\nb=\"1\"\n", "b=\"1\"\na=\"$b\"\n" },
    unknown_before_referencing_standard = {
        "source=(\"$_url/x\")\npkgname=foo\n_url=https://x.org\n",
        "pkgname=foo\n_url=https://x.org\nsource=(\"$_url/x\")\n"
    },
    undeclared_reference_is_ignored = { "pkgver=$_v\npkgname=foo\n", "pkgname=foo\npkgver=$_v\n" },
)]
fn variables(input: &str, expected: &str) {
    assert_eq!(reordered(input), expected);
}

#[test]
fn functions_follow_variables() {
    let input = "package() {\n  :\n}\n_helper() {\n  :\n}\npkgname=foo\nbuild() {\n  :\n}\nprepare() {\n  :\n}\n";
    assert_eq!(
        reordered(input),
        "pkgname=foo\n_helper() {\n  :\n}\nprepare() {\n  :\n}\nbuild() {\n  :\n}\npackage() {\n  :\n}\n"
    );
}

#[test]
fn helpers_keep_their_order() {
    let input = "_b() {\n  :\n}\nbuild() {\n  :\n}\n_a() {\n  :\n}\n";
    assert_eq!(reordered(input), "_b() {\n  :\n}\n_a() {\n  :\n}\nbuild() {\n  :\n}\n");
}

#[test]
fn leading_lines_travel_with_declaration() {
    let input = "# Maintainer: me\n\npkgver=1\n# the name\n\npkgname=foo\n# dangling\n";
    assert_eq!(reordered(input), "# Maintainer: me\n\n# the name\n\npkgname=foo\npkgver=1\n# dangling\n");
}

#[test]
fn reference_cycle_terminates() {
    let input = "_b=\"$_a\"\n_a=\"$_b\"\n_c=1\n";
    let out = reordered(input);
    assert_eq!(out, "_c=1\n_a=\"$_b\"\n_b=\"$_a\"\n");
    assert_eq!(reordered(&out), out);
}

#[test]
fn reorder_is_idempotent() {
    let input = "depends=(\"$_dep\")\n_dep=x\npkgver=\"${_base}.1\"\n_base=2\npkgname=foo\n";
    let once = reordered(input);
    assert_eq!(once, "pkgname=foo\n_base=2\npkgver=\"${_base}.1\"\n_dep=x\ndepends=(\"$_dep\")\n");
    assert_eq!(reordered(&once), once);
}

#[test]
fn positions_are_relaid() {
    let mut doc = Document::parse("pkgver=1\npkgname=foo\n").unwrap();
    doc.format(&[Transformation::Reorder]);
    let info = doc.info("pkgver", &[]).unwrap();
    assert_eq!(info.begin().line, 2);
    assert_eq!(info.begin().offset, 12);
}

// =============================================================================
// Keys
// =============================================================================

#[test]
fn variable_key_ranks_standard_before_unknown() {
    assert!(variable_key("pkgbase") < variable_key("pkgname"));
    assert!(variable_key("b2sums") < variable_key("_a"));
    assert!(variable_key("_a") < variable_key("_b"));
}
