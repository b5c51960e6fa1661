//! Test helpers for behavioral specifications.
//!
//! Provides a scratch project holding a PKGBUILD and an optional formatter
//! configuration.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};

pub use pkgbuild::{Document, FormatConfig, InfoKind, ParseError, Position, ScanError, Transformation, VarKind};

/// File name of the build script inside a project.
pub const PKGBUILD: &str = "PKGBUILD";

/// File name of the formatter configuration inside a project.
pub const FORMAT_CONFIG: &str = "pkgbuild-fmt.toml";

/// Route library logs to the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    /// Create an empty project
    pub fn empty() -> Self {
        init_tracing();
        Self { dir: tempfile::tempdir().unwrap() }
    }

    /// Create a project holding the given PKGBUILD
    pub fn with_pkgbuild(content: &str) -> Self {
        let project = Self::empty();
        project.file(PKGBUILD, content);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(path.as_ref())
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.join(path)).unwrap()
    }

    pub fn pkgbuild(&self) -> String {
        self.read(PKGBUILD)
    }

    pub fn try_load(&self) -> Result<Document, ParseError> {
        Document::decode(File::open(self.join(PKGBUILD))?)
    }

    /// Decode the PKGBUILD, which must be valid
    pub fn load(&self) -> Document {
        self.try_load().unwrap()
    }

    /// Encode `doc` over the PKGBUILD
    pub fn save(&self, doc: &Document) {
        let file = File::create(self.join(PKGBUILD)).unwrap();
        doc.encode(file).unwrap();
    }

    /// The project's formatter configuration, or the defaults
    pub fn config(&self) -> FormatConfig {
        let path = self.join(FORMAT_CONFIG);
        if !path.exists() {
            return FormatConfig::default();
        }
        FormatConfig::from_toml_str(&self.read(FORMAT_CONFIG)).unwrap()
    }

    /// Format the PKGBUILD in place with the project's configuration and
    /// return the result
    pub fn format(&self) -> String {
        let mut doc = self.load();
        doc.format(&self.config().pipeline());
        self.save(&doc);
        self.pkgbuild()
    }

    /// Load, apply `edit`, save, and return the new PKGBUILD
    pub fn edit(&self, edit: impl FnOnce(&mut Document)) -> String {
        let mut doc = self.load();
        edit(&mut doc);
        self.save(&doc);
        self.pkgbuild()
    }
}

/// Assert that formatting `input` with the default configuration yields
/// `expected`, and that formatting again changes nothing.
pub fn assert_formats_to(input: &str, expected: &str) {
    let project = Project::with_pkgbuild(input);
    similar_asserts::assert_eq!(project.format(), expected);
    similar_asserts::assert_eq!(project.format(), expected);
}
