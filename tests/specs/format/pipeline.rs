//! Formatting specs
//!
//! Verify the default pipeline produces canonical PKGBUILDs and is stable.

use crate::prelude::*;

/// Duplicates are dropped when the configuration asks for it; the first
/// declaration wins.
#[test]
fn dedup_keeps_first() {
    let project = Project::with_pkgbuild("pkgname=foo\ndepends=(a)\npkgver=1\ndepends=(b)\n");
    project.file(FORMAT_CONFIG, "remove-duplicates = true\n");
    project.format();

    let doc = project.load();
    assert_eq!(doc.infos(&[InfoKind::ArrayVar]).len(), 1);
    assert_eq!(doc.array_value("depends"), ["a"]);
}

/// Stripping the header moves the first declaration to line 1.
#[test]
fn header_strip() {
    let project = Project::with_pkgbuild("# Maintainer: me\n# Contributor: you\n\npkgname=foo\n");
    project.file(FORMAT_CONFIG, "remove-header = true\nremove-comments = false\n");
    assert_eq!(project.format(), "pkgname=foo\n");
    assert_eq!(project.load().info("pkgname", &[]).unwrap().begin().line, 1);
}

/// A variable is emitted after the variable it references.
#[test]
fn referenced_variable_comes_first() {
    assert_formats_to("a=\"$b\"\nb=\"1\"\n", "b='1'\na=\"${b}\"\n");
}

/// A full messy PKGBUILD becomes canonical.
#[test]
fn canonical_layout() {
    assert_formats_to(
        r#"# Maintainer: me

build() {
    cd "$srcdir/$pkgname-$pkgver"
    make
}
package()   {
    make DESTDIR="$pkgdir" install
}
url="https://example.org"   # homepage
license=("MIT")
pkgrel=1


pkgname="foo"
pkgver=1.0
arch=(x86_64)
source=("$pkgname-$pkgver.tar.gz"
        foo.patch)
sha256sums=('SKIP'     # tarball
            'SKIP')
depends=(glibc "$_extra")
_extra=openssl
"#,
        r#"pkgname=foo
pkgver=1.0
pkgrel=1
arch=('x86_64')
url='https://example.org'
license=('MIT')
source=("${pkgname}-${pkgver}.tar.gz" 'foo.patch')
sha256sums=('SKIP' 'SKIP')
_extra='openssl'
depends=('glibc' "${_extra}")

build() {
    cd "$srcdir/$pkgname-$pkgver"
    make
}

package() {
    make DESTDIR="$pkgdir" install
}
"#,
    );
}

/// Long arrays wrap under the opening parenthesis.
#[test]
fn long_arrays_wrap() {
    let project = Project::with_pkgbuild("makedepends=(cmake ninja python-sphinx qt6-tools)\n");
    project.file(FORMAT_CONFIG, "max-width = 30\n");
    let wrapped = project.format();
    similar_asserts::assert_eq!(wrapped, "makedepends=('cmake' 'ninja'\n             'python-sphinx'\n             'qt6-tools')\n");
    similar_asserts::assert_eq!(project.format(), wrapped);
}

/// Values survive formatting unchanged.
#[test]
fn values_are_preserved() {
    let input = "pkgname=foo\npkgdesc=\"It's a \\\"tool\\\"\"\n_v=2\npkgver=${_v}.1\noptdepends=('bar: for \"baz\" support')\n";
    let before = Project::with_pkgbuild(input).load();
    let project = Project::with_pkgbuild(input);
    project.format();
    let after = project.load();

    for name in ["pkgname", "pkgdesc", "_v", "pkgver"] {
        assert_eq!(after.value(name), before.value(name), "{name}");
    }
    assert_eq!(after.array_value("optdepends"), before.array_value("optdepends"));
}
