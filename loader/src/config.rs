//! Loader configuration: which library to load and where to look for it.
//!
//! The configuration is built in code. Target detection and resolution are
//! automatic; nothing here is read from files or the environment.

use camino::{Utf8Path, Utf8PathBuf};
use directories_next::ProjectDirs;

use crate::error::{LoaderError, Result};

/// Library identifier used when none is given.
pub const DEFAULT_LIBRARY: &str = "longbridge";

/// Directory name that holds installed packages under each ancestor.
pub const PACKAGES_DIR: &str = "node_modules";

/// Identifies the binding to load and the places it may come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    library: String,
    module_dir: Utf8PathBuf,
    package_roots: Vec<Utf8PathBuf>,
}

impl LoaderConfig {
    /// Configure `library` with bundled artefacts in `module_dir`.
    ///
    /// Package roots are the `node_modules` directories of `module_dir` and
    /// each of its ancestors, nearest first.
    #[must_use]
    pub fn new(library: impl Into<String>, module_dir: impl Into<Utf8PathBuf>) -> Self {
        let module_dir = module_dir.into();
        let package_roots = ancestor_package_roots(&module_dir);
        Self {
            library: library.into(),
            module_dir,
            package_roots,
        }
    }

    /// Configure `library` for the running executable.
    ///
    /// The module directory is the directory holding the executable, and the
    /// per-user package root is appended after the ancestor roots.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::ModuleDirUnavailable`] when the executable path
    /// cannot be determined or is not valid UTF-8.
    pub fn for_current_exe(library: &str) -> Result<Self> {
        let exe = std::env::current_exe().map_err(|e| LoaderError::ModuleDirUnavailable {
            reason: e.to_string(),
        })?;
        let exe = Utf8PathBuf::from_path_buf(exe).map_err(|path| {
            LoaderError::ModuleDirUnavailable {
                reason: format!("executable path is not valid UTF-8: {}", path.display()),
            }
        })?;
        let module_dir = exe
            .parent()
            .ok_or_else(|| LoaderError::ModuleDirUnavailable {
                reason: format!("executable path {exe} has no parent directory"),
            })?
            .to_owned();

        let config = Self::new(library, module_dir);
        Ok(match global_package_root(library) {
            Some(root) => config.with_package_root(root),
            None => config,
        })
    }

    /// Append a package root searched after the existing ones.
    #[must_use]
    pub fn with_package_root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.package_roots.push(root.into());
        self
    }

    /// Replace the package search roots.
    #[must_use]
    pub fn with_package_roots(mut self, roots: Vec<Utf8PathBuf>) -> Self {
        self.package_roots = roots;
        self
    }

    /// Return the library identifier.
    #[must_use]
    pub fn library(&self) -> &str {
        &self.library
    }

    /// Return the directory holding bundled artefacts.
    #[must_use]
    pub fn module_dir(&self) -> &Utf8Path {
        &self.module_dir
    }

    /// Return the package search roots in search order.
    #[must_use]
    pub fn package_roots(&self) -> &[Utf8PathBuf] {
        &self.package_roots
    }
}

fn ancestor_package_roots(module_dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    module_dir
        .ancestors()
        .filter(|dir| dir.file_name() != Some(PACKAGES_DIR))
        .map(|dir| dir.join(PACKAGES_DIR))
        .collect()
}

/// Per-user package root, `<data dir>/packages`, if the platform has one.
#[must_use]
pub fn global_package_root(library: &str) -> Option<Utf8PathBuf> {
    let dirs = ProjectDirs::from("", "", library)?;
    let root = dirs.data_dir().join("packages");
    Utf8PathBuf::from_path_buf(root).ok()
}
