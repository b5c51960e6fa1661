//! Tests using real-world PKGBUILD shapes.
//!
//! Verify split packages, VCS sources and shell-heavy functions load,
//! round trip and pass the structural checks.

use crate::prelude::*;
use pkgbuild::checks;

const SPLIT: &str = r#"# Maintainer: Jane Doe <jane@example.org>
# Contributor: John Roe <john@example.org>

pkgbase=python-foo
pkgname=('python-foo' 'python-foo-docs')
_name=${pkgbase#python-}
pkgver=2.4.1
pkgrel=1
pkgdesc="Foo bindings for Python"
arch=('any')
url="https://github.com/example/${_name}"
license=('Apache-2.0')
makedepends=('python-build' 'python-installer' 'python-wheel')
checkdepends=('python-pytest')
source=("$pkgname-$pkgver.tar.gz::$url/archive/v$pkgver.tar.gz"
        'fix-tests.patch')
sha256sums=('SKIP'
            'SKIP')

prepare() {
  cd "$_name-$pkgver"
  patch -Np1 -i ../fix-tests.patch
}

build() {
  cd "$_name-$pkgver"
  python -m build --wheel --no-isolation
  cat > docs.txt <<'EOF'
Generated docs } with a brace
EOF
}

check() {
  cd "$_name-$pkgver"
  pytest -k 'not network'
}

package_python-foo() {
  depends=('python')
  cd "$_name-$pkgver"
  python -m installer --destdir="$pkgdir" dist/*.whl
}

package_python-foo-docs() {
  install -Dm644 "$_name-$pkgver/docs.txt" -t "$pkgdir/usr/share/doc/$pkgbase"
}
"#;

const VCS: &str = r#"pkgname=tool-git
pkgver=r123.abcdef0
pkgrel=1
pkgdesc='A tool (git)'
arch=('x86_64' 'aarch64')
url='https://example.org/tool'
license=('MIT')
depends=('glibc')
makedepends=('git' 'cargo')
provides=("${pkgname%-git}")
conflicts=("${pkgname%-git}")
source=("git+$url.git")
b2sums=('SKIP')

pkgver() {
  cd "${pkgname%-git}"
  printf "r%s.%s" "$(git rev-list --count HEAD)" "$(git rev-parse --short=7 HEAD)"
}

package() {
  cd "${pkgname%-git}"
  install -Dm755 "target/release/tool" "$pkgdir/usr/bin/tool"
}
"#;

/// A split package round trips and exposes its declarations.
#[test]
fn split_package_round_trips() {
    let project = Project::with_pkgbuild(SPLIT);
    let doc = project.load();
    project.save(&doc);
    similar_asserts::assert_eq!(project.pkgbuild(), SPLIT);

    assert_eq!(doc.array_value("pkgname"), ["python-foo", "python-foo-docs"]);
    assert_eq!(doc.array_value("sha256sums").len(), 2);
    assert_eq!(doc.functions().len(), 5);
    assert!(doc.info("package_python-foo", &[InfoKind::Function]).is_some());
    assert!(doc.info("build", &[]).unwrap().body().contains("Generated docs } with a brace"));
}

/// References resolve against earlier declarations.
#[test]
fn split_package_values() {
    let doc = Project::with_pkgbuild(SPLIT).load();
    assert_eq!(doc.value("pkgdesc"), "Foo bindings for Python");
    assert_eq!(doc.array_value("source")[1], "fix-tests.patch");
    assert_eq!(doc.full_version(), "2.4.1-1");
}

/// A split package has no plain `package()`; that is the only structural
/// finding.
#[test]
fn split_package_checks() {
    let doc = Project::with_pkgbuild(SPLIT).load();
    assert!(checks::missing_variables(&doc).is_empty());
    assert_eq!(checks::missing_functions(&doc), ["package"]);
    assert!(checks::bad_standard(&doc).is_empty());
    assert!(!checks::is_arch_clean(&doc));
    assert!(checks::is_pkgrel_clean(&doc));
    assert!(checks::has_depends(&doc));
}

/// A VCS package with a `pkgver()` function.
#[test]
fn vcs_package() {
    let project = Project::with_pkgbuild(VCS);
    let doc = project.load();
    assert_eq!(doc.to_string(), VCS);
    assert!(doc.contains_variable("pkgver"));
    assert!(doc.contains_function("pkgver"));
    assert!(!checks::is_arch_clean(&doc));
    assert!(checks::is_pkgrel_clean(&doc));
    assert!(checks::has_depends(&doc));
    assert!(checks::missing_variables(&doc).is_empty());
}

/// Variables-only decoding skips function bodies.
#[test]
fn vars_only_skips_functions() {
    let project = Project::with_pkgbuild(VCS);
    let file = std::fs::File::open(project.path().join(PKGBUILD)).unwrap();
    let doc = Document::decode_with_mode(file, pkgbuild::ScanMode::VarsOnly).unwrap();
    assert!(doc.functions().is_empty());
    assert_eq!(doc.variables().len(), 13);
}
