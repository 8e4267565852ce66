//! The write-once, process-wide native binding.
//!
//! [`load_binding`] runs the three stages (detect, list candidates, resolve)
//! against injected collaborators. [`NativeBinding`] stores the outcome the
//! first time it is asked for and hands out the same module, or the same
//! error, on every later call.

use std::sync::OnceLock;

use log::debug;

use crate::candidate::candidates;
use crate::config::LoaderConfig;
use crate::detect::detect_target;
use crate::error::{LoaderError, Result};
use crate::fs::{FileSystem, StdFileSystem};
use crate::loader::{DylibLoader, ModuleLoader, NativeModule};
use crate::naming::BindingName;
use crate::platform::{HostPlatform, Platform};
use crate::resolver::resolve;

/// Observable lifecycle of a [`NativeBinding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// Resolution has not run.
    Uninitialized,
    /// A module was loaded.
    Loaded,
    /// Resolution failed; the binding stays unusable.
    Failed,
}

/// Holds the result of the one resolution for its owner's lifetime.
#[derive(Debug, Default)]
pub struct NativeBinding {
    cell: OnceLock<Result<NativeModule>>,
}

impl NativeBinding {
    /// Create an unresolved binding.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Return the module, running `load` if nothing has been resolved yet.
    ///
    /// `load` runs at most once per binding, even with concurrent callers.
    /// A failure is stored like a success and returned on every call.
    ///
    /// # Errors
    ///
    /// Returns the stored [`LoaderError`] when resolution failed.
    pub fn get_or_load<F>(&self, load: F) -> std::result::Result<&NativeModule, &LoaderError>
    where
        F: FnOnce() -> Result<NativeModule>,
    {
        self.cell.get_or_init(load).as_ref()
    }

    /// Return the module if it has already been loaded.
    #[must_use]
    pub fn get(&self) -> Option<&NativeModule> {
        self.cell.get().and_then(|result| result.as_ref().ok())
    }

    /// Return the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> BindingState {
        match self.cell.get() {
            None => BindingState::Uninitialized,
            Some(Ok(_)) => BindingState::Loaded,
            Some(Err(_)) => BindingState::Failed,
        }
    }
}

/// Detect the target, list its candidates and load the first that works.
///
/// # Errors
///
/// Returns [`LoaderError::UnsupportedPlatform`] before any load attempt when
/// the host has no published binding, or
/// [`LoaderError::ResolutionExhausted`] when no candidate loads.
pub fn load_binding(
    config: &LoaderConfig,
    platform: &dyn Platform,
    fs: &dyn FileSystem,
    loader: &dyn ModuleLoader,
) -> Result<NativeModule> {
    debug!("detecting target for {}", config.library());
    let target = detect_target(platform, fs)?;

    let name = BindingName::new(config.library(), target);
    let sources = candidates(config.module_dir(), &name);
    debug!(
        "resolving {} for {target} from {}",
        config.library(),
        config.module_dir()
    );
    resolve(target, &sources, fs, loader)
}

/// Load `library` for the running process with the production collaborators.
///
/// # Errors
///
/// As [`load_binding`], plus [`LoaderError::ModuleDirUnavailable`] when the
/// executable's directory cannot be determined.
pub fn load_host_binding(library: &str) -> Result<NativeModule> {
    let config = LoaderConfig::for_current_exe(library)?;
    load_config_binding(&config)
}

/// Load the binding described by `config` with the production collaborators.
///
/// # Errors
///
/// As [`load_binding`].
pub fn load_config_binding(config: &LoaderConfig) -> Result<NativeModule> {
    let fs = StdFileSystem;
    let loader = DylibLoader::new(&fs, config.package_roots());
    load_binding(config, &HostPlatform, &fs, &loader)
}
