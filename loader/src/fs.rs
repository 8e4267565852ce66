//! Filesystem access used by detection and resolution.

use camino::Utf8Path;

/// Existence checks and text reads.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    /// Whether `path` exists.
    fn exists(&self, path: &Utf8Path) -> bool;

    /// Read `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, including invalid UTF-8.
    fn read_to_string(&self, path: &Utf8Path) -> std::io::Result<String>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Utf8Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Utf8Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}
