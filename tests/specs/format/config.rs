//! Formatter configuration specs
//!
//! Verify a project's `pkgbuild-fmt.toml` selects and tunes the pipeline.

use crate::prelude::*;

const INPUT: &str = "# Maintainer: me\n\npkgver=1.0   # upstream\npkgname=foo\nurl=https://example.org\n";

/// Without a configuration file the defaults apply.
#[test]
fn defaults_without_file() {
    let project = Project::with_pkgbuild(INPUT);
    assert_eq!(project.config(), FormatConfig::default());
    assert_eq!(project.format(), "pkgname=foo\npkgver=1.0\nurl='https://example.org'\n");
}

/// Disabled steps leave their concern alone.
#[test]
fn disabled_steps() {
    let project = Project::with_pkgbuild(INPUT);
    project.file(
        FORMAT_CONFIG,
        r#"
remove-comments = false
remove-trailing-comments = false
remove-blank-lines = false
reorder = false
"#,
    );
    assert_eq!(
        project.format(),
        "# Maintainer: me\n\npkgver=1.0 # upstream\npkgname=foo\nurl='https://example.org'\n"
    );
}

/// Quoting overrides win over the standard preferences.
#[test]
fn quoting_overrides() {
    let project = Project::with_pkgbuild(INPUT);
    project.file(FORMAT_CONFIG, "[quoting]\nalways = [\"pkgver\"]\nnever = [\"url\"]\n");
    assert_eq!(project.format(), "pkgname=foo\npkgver='1.0'\nurl=https://example.org\n");
}

/// A zero width is rejected before anything is formatted.
#[test]
fn zero_width_is_rejected() {
    let err = FormatConfig::from_toml_str("max-width = 0\n").unwrap_err();
    assert_eq!(err.to_string(), "max-width must be positive");
}

/// Unknown value types are reported as configuration errors.
#[test]
fn malformed_config_is_rejected() {
    let err = FormatConfig::from_toml_str("reorder = \"yes\"\n").unwrap_err();
    assert!(err.to_string().starts_with("invalid format configuration"), "{err}");
}
