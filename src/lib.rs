//! Longbridge native binding.
//!
//! The first call into this crate detects the host target, loads the
//! matching prebuilt `longbridge` library and keeps it for the rest of the
//! process. Every symbol the library exports is available through
//! [`exports`] and [`symbol`] under its own name. If no binding can be
//! loaded, every call returns the same error.

use longbridge_loader::binding::{NativeBinding, load_host_binding};
use longbridge_loader::config::DEFAULT_LIBRARY;

pub use longbridge_loader::binding::BindingState;
pub use longbridge_loader::error::LoaderError;
pub use longbridge_loader::exports::{Export, ExportTable};
pub use longbridge_loader::loader::NativeModule;

static BINDING: NativeBinding = NativeBinding::new();

/// Return the process-wide binding, loading it on first use.
///
/// # Errors
///
/// Returns the [`LoaderError`] from the one resolution attempt when the
/// host is unsupported or no candidate loaded.
pub fn binding() -> Result<&'static NativeModule, &'static LoaderError> {
    BINDING.get_or_load(|| load_host_binding(DEFAULT_LIBRARY))
}

/// Return every symbol the binding exports.
///
/// # Errors
///
/// As [`binding`].
pub fn exports() -> Result<&'static ExportTable, &'static LoaderError> {
    binding().map(NativeModule::exports)
}

/// Look up one exported symbol by its exact name.
///
/// # Errors
///
/// As [`binding`].
pub fn symbol(name: &str) -> Result<Option<Export>, &'static LoaderError> {
    exports().map(|table| table.get(name))
}

/// Return whether the binding has been resolved, and how.
#[must_use]
pub fn state() -> BindingState {
    BINDING.state()
}
