//! Decoding specs
//!
//! Verify PKGBUILDs read from disk expose their declarations and values,
//! and are written back byte for byte.

use crate::prelude::*;

/// Simple variables resolve and compose the full version.
#[test]
fn reads_name_and_version() {
    let project = Project::with_pkgbuild("pkgname=foo\npkgver=1.0\npkgrel=1\n");
    let doc = project.load();
    assert_eq!(doc.value("pkgname"), "foo");
    assert_eq!(doc.full_version(), "1.0-1");
}

/// An untouched document is saved exactly as it was read.
#[test]
fn save_without_changes_is_verbatim() {
    let input = "# Maintainer: me\n\npkgname='foo'   # name\nsource=(\n  \"a\" # first\n  b\n)\n\n\nbuild() {\n  make\n}";
    let project = Project::with_pkgbuild(input);
    let doc = project.load();
    project.save(&doc);
    similar_asserts::assert_eq!(project.pkgbuild(), input);
}

/// Leading comments and blanks form a header; the first declaration sits
/// on line 4.
#[test]
fn three_line_header() {
    let project = Project::with_pkgbuild("# Maintainer: me\n# Contributor: you\n\npkgname=foo\n");
    let doc = project.load();
    assert!(doc.has_header());
    assert_eq!(doc.info("pkgname", &[]).unwrap().begin().line, 4);
}

/// A missing file surfaces as an I/O error without a position.
#[test]
fn missing_file_is_io_error() {
    let project = Project::empty();
    let err = project.try_load().unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
    assert_eq!(err.position(), None);
}

/// An unterminated quote aborts decoding at the end of the input.
#[test]
fn unterminated_quote_is_reported() {
    let input = "pkgname=foo\npkgdesc=\"open\n";
    let project = Project::with_pkgbuild(input);
    let err = project.try_load().unwrap_err();
    assert_eq!(err.position(), Some(Position::new(3, 0, input.len())));

    let diagnostic = err.diagnostic(input);
    assert!(diagnostic.contains("error: unterminated"), "{diagnostic}");
}

/// Commands other than assignments and function definitions are rejected.
#[test]
fn top_level_command_is_rejected() {
    let project = Project::with_pkgbuild("pkgname=foo\necho hello\n");
    let err = project.try_load().unwrap_err();
    assert!(matches!(err, ParseError::Scan(_)));
}

/// `read_version` needs no more than the variables.
#[test]
fn read_version_from_file() {
    let project = Project::with_pkgbuild("pkgname=foo\nepoch=1\npkgver=2.3\npkgrel=4\npackage() {\n  :\n}\n");
    let file = std::fs::File::open(project.path().join(PKGBUILD)).unwrap();
    assert_eq!(Document::read_version(file).unwrap(), "1:2.3-4");
}
