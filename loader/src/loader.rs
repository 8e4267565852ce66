//! Loading binding libraries into the process.
//!
//! [`ModuleLoader`] is the module-loading primitive the resolver drives.
//! [`DylibLoader`] implements it with `libloading`, resolving packages
//! through the configured package roots.

use camino::{Utf8Path, Utf8PathBuf};
use libloading::Library;
use log::debug;

use crate::error::CandidateLoadError;
use crate::exports::{EXPORTS_SYMBOL, ExportTable, ExportsFn};
use crate::fs::FileSystem;
use crate::package::resolve_package;

/// A loaded binding: its export table and the library that backs it.
#[derive(Debug)]
pub struct NativeModule {
    exports: ExportTable,
    path: Option<Utf8PathBuf>,
    // Keeps every exported address valid; must outlive `exports`.
    _library: Option<Library>,
}

impl NativeModule {
    /// A module that is not backed by a loaded library.
    #[must_use]
    pub fn from_exports(exports: ExportTable) -> Self {
        Self {
            exports,
            path: None,
            _library: None,
        }
    }

    fn from_library(exports: ExportTable, library: Library, path: Utf8PathBuf) -> Self {
        Self {
            exports,
            path: Some(path),
            _library: Some(library),
        }
    }

    /// Return the exported symbols.
    #[must_use]
    pub const fn exports(&self) -> &ExportTable {
        &self.exports
    }

    /// Return the file the module was loaded from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }
}

/// Loads a binding from a file or from an installed package.
#[cfg_attr(test, mockall::automock)]
pub trait ModuleLoader {
    /// Load the library at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`CandidateLoadError`] when the file cannot be opened or
    /// does not satisfy the export contract.
    fn load_file(&self, path: &Utf8Path) -> Result<NativeModule, CandidateLoadError>;

    /// Resolve `package` and load the artefact it provides.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateLoadError::PackageNotFound`] when the package is
    /// not installed, or any error [`ModuleLoader::load_file`] returns.
    fn load_package(&self, package: &str) -> Result<NativeModule, CandidateLoadError>;
}

/// [`ModuleLoader`] backed by the platform dynamic linker.
#[derive(Clone, Copy)]
pub struct DylibLoader<'a> {
    fs: &'a dyn FileSystem,
    package_roots: &'a [Utf8PathBuf],
}

impl<'a> DylibLoader<'a> {
    /// Create a loader that resolves packages under `package_roots`.
    #[must_use]
    pub const fn new(fs: &'a dyn FileSystem, package_roots: &'a [Utf8PathBuf]) -> Self {
        Self { fs, package_roots }
    }
}

impl ModuleLoader for DylibLoader<'_> {
    fn load_file(&self, path: &Utf8Path) -> Result<NativeModule, CandidateLoadError> {
        debug!("opening native binding {path}");
        // SAFETY: opening a binding runs its initialisers. Binding artefacts
        // are built for this loader and are trusted to be sound.
        let library =
            unsafe { Library::new(path.as_std_path()) }.map_err(|e| CandidateLoadError::Open {
                path: path.to_owned(),
                reason: e.to_string(),
            })?;

        let exports = {
            // SAFETY: `ExportsFn` is the signature fixed by the export contract.
            let entry = unsafe { library.get::<ExportsFn>(EXPORTS_SYMBOL.as_bytes()) }.map_err(
                |_| CandidateLoadError::MissingExports {
                    path: path.to_owned(),
                    symbol: EXPORTS_SYMBOL.to_owned(),
                },
            )?;
            let mut len = 0_usize;
            // SAFETY: the entry point takes an out-pointer for the length and
            // returns a table that lives as long as `library`.
            let table = unsafe { entry(&raw mut len) };
            // SAFETY: the contract guarantees `len` valid entries behind `table`.
            unsafe { ExportTable::from_raw(table, len) }.map_err(|e| {
                CandidateLoadError::MalformedExports {
                    path: path.to_owned(),
                    reason: e.to_string(),
                }
            })?
        };

        debug!("{path} exports {} symbols", exports.len());
        Ok(NativeModule::from_library(exports, library, path.to_owned()))
    }

    fn load_package(&self, package: &str) -> Result<NativeModule, CandidateLoadError> {
        let path = resolve_package(self.fs, self.package_roots, package)?;
        debug!("package {package} provides {path}");
        self.load_file(&path)
    }
}
