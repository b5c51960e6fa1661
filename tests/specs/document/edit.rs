//! Editing specs
//!
//! Verify edits made through declaration handles land in the saved file
//! and leave everything else untouched.

use crate::prelude::*;

const BASE: &str = r#"# Maintainer: me

pkgname=foo
pkgver=1.0  # upstream
pkgrel=3
arch=(i686 x86_64 x86_64)

package() {
  make DESTDIR="$pkgdir" install
}
"#;

/// Replacing an array's values quotes them by convention.
#[test]
fn set_arch_to_single_value() {
    let project = Project::with_pkgbuild(BASE);
    let saved = project.edit(|doc| {
        let arch = doc.info("arch", &[]).unwrap().id();
        doc.set_value(arch, &["x86_64"]).unwrap();
    });
    assert!(saved.contains("\narch=('x86_64')\n"));
    assert_eq!(project.load().array_value("arch"), ["x86_64"]);
}

/// A version bump keeps trailing comments and the rest of the file.
#[test]
fn bump_version() {
    let project = Project::with_pkgbuild(BASE);
    project.edit(|doc| {
        let pkgver = doc.info("pkgver", &[]).unwrap().id();
        doc.set_value(pkgver, &["1.1"]).unwrap();
        let pkgrel = doc.info("pkgrel", &[]).unwrap().id();
        doc.set_value(pkgrel, &["1"]).unwrap();
    });
    similar_asserts::assert_eq!(
        project.pkgbuild(),
        BASE.replace("pkgver=1.0  #", "pkgver=1.1  #").replace("pkgrel=3", "pkgrel=1")
    );
    assert_eq!(project.load().full_version(), "1.1-1");
}

/// A handle from before an edit no longer resolves.
#[test]
fn stale_handle_after_edit() {
    let project = Project::with_pkgbuild(BASE);
    let mut doc = project.load();
    let pkgrel = doc.info("pkgrel", &[]).unwrap().id();
    let pkgver = doc.info("pkgver", &[]).unwrap().id();

    let fresh = doc.set_value(pkgver, &["2"]).unwrap();
    assert!(doc.get(fresh).is_some());
    assert!(!doc.contains_info(pkgrel));
    assert!(doc.set_value(pkgrel, &["2"]).is_none());
    assert!(!doc.remove_info(pkgrel));
    assert_eq!(doc.value("pkgrel"), "3");
}

/// New declarations go at the end; positions stay consistent for reloads.
#[test]
fn add_declarations() {
    let project = Project::with_pkgbuild(BASE);
    let saved = project.edit(|doc| {
        doc.add_variable("depends", VarKind::Array, &["glibc"]).unwrap();
        doc.add_blank();
        doc.add_function("check", "make test").unwrap();
    });
    assert!(saved.ends_with("}\ndepends=('glibc')\n\ncheck() {\nmake test\n}\n"), "{saved}");

    let doc = project.load();
    assert!(doc.contains_function("check"));
    assert_eq!(doc.array_value("depends"), ["glibc"]);
}

/// Raw text is scanned in place, comments included.
#[test]
fn insert_raw_after_header() {
    let project = Project::with_pkgbuild(BASE);
    project.edit(|doc| {
        let index = doc.info("pkgname", &[]).unwrap().index();
        doc.insert_raw(index, "pkgbase=foo-git # split").unwrap();
    });
    let doc = project.load();
    assert_eq!(doc.info("pkgbase", &[]).unwrap().begin().line, 3);
    assert_eq!(doc.info("pkgname", &[]).unwrap().begin().line, 4);
}

/// Invalid raw text leaves the document unchanged.
#[test]
fn insert_raw_rejects_invalid_text() {
    let project = Project::with_pkgbuild(BASE);
    let mut doc = project.load();
    let generation = doc.generation();
    assert!(doc.add_raw("depends=(a\n").is_err());
    assert_eq!(doc.generation(), generation);
    assert_eq!(doc.to_string(), BASE);
}

/// Removing a declaration closes the gap.
#[test]
fn remove_declaration() {
    let project = Project::with_pkgbuild(BASE);
    project.edit(|doc| {
        let arch = doc.info("arch", &[]).unwrap().id();
        assert!(doc.remove_info(arch));
    });
    let doc = project.load();
    assert!(!doc.contains_variable("arch"));
    assert_eq!(doc.info("package", &[]).unwrap().begin().line, 7);
}

/// Converting between string and array keeps the values.
#[test]
fn convert_kind() {
    let project = Project::with_pkgbuild("pkgname=foo\nlicense=MIT\n");
    let saved = project.edit(|doc| {
        let license = doc.info("license", &[]).unwrap().id();
        doc.set_array_var(license).unwrap();
    });
    assert_eq!(saved, "pkgname=foo\nlicense=(MIT)\n");
    assert!(project.load().info("license", &[InfoKind::ArrayVar]).is_some());
}
