// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan modes filter the same node stream.

use yare::parameterized;

use crate::node::NodeKind;
use crate::scanner::{ScanMode, Scanner};

const SOURCE: &str = "\
# Maintainer: someone

pkgname=foo # the name
arch=(any)

build() {
  make
}
package() { :; } # install
";

fn kinds(mode: ScanMode) -> Vec<NodeKind> {
    Scanner::new(SOURCE)
        .with_mode(mode)
        .map(|node| node.map(|n| n.kind()))
        .collect::<Result<_, _>>()
        .unwrap()
}

#[parameterized(
    full = { ScanMode::Full, &[
        NodeKind::Comment,
        NodeKind::Blank,
        NodeKind::Group,
        NodeKind::ArrayVar,
        NodeKind::Blank,
        NodeKind::Function,
        NodeKind::Group,
    ] },
    fast = { ScanMode::Fast, &[NodeKind::SingleVar, NodeKind::ArrayVar, NodeKind::Function, NodeKind::Function] },
    vars_only = { ScanMode::VarsOnly, &[NodeKind::SingleVar, NodeKind::ArrayVar] },
    funcs_only = { ScanMode::FuncsOnly, &[NodeKind::Function, NodeKind::Function] },
)]
fn mode_selects_nodes(mode: ScanMode, expected: &[NodeKind]) {
    assert_eq!(kinds(mode), expected);
}

#[test]
fn default_mode_is_full() {
    assert_eq!(ScanMode::default(), ScanMode::Full);
}

#[test]
fn fast_mode_still_reports_errors() {
    let result: Result<Vec<_>, _> = Scanner::new("a=1\nb='x").with_mode(ScanMode::Fast).collect();
    assert!(result.is_err());
}
