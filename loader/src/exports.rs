//! The export contract between a native binding and this loader.
//!
//! A binding library exports one entry point, [`EXPORTS_SYMBOL`], with the
//! C signature
//!
//! ```c
//! typedef struct { const char *name; const void *value; } RawExport;
//! const RawExport *longbridge_native_exports(size_t *len);
//! ```
//!
//! The returned array lives as long as the library stays loaded. Its entries
//! are copied into an [`ExportTable`] keyed by name; the loader never looks
//! at what a value points to.

use std::collections::BTreeMap;
use std::ffi::{CStr, c_char, c_void};

use thiserror::Error;

/// Entry point every binding library must export.
pub const EXPORTS_SYMBOL: &str = "longbridge_native_exports";

/// One `(name, value)` pair as laid out by the binding.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawExport {
    /// NUL-terminated UTF-8 symbol name.
    pub name: *const c_char,
    /// Address of the exported item.
    pub value: *const c_void,
}

/// Signature of [`EXPORTS_SYMBOL`].
pub type ExportsFn = unsafe extern "C" fn(len: *mut usize) -> *const RawExport;

/// Address of one exported item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Export(*const c_void);

// SAFETY: an `Export` is an opaque address into a library that stays loaded
// for the life of the owning module. This crate never dereferences it.
unsafe impl Send for Export {}
// SAFETY: as above.
unsafe impl Sync for Export {}

impl Export {
    /// Wrap a raw address.
    #[must_use]
    pub const fn from_ptr(ptr: *const c_void) -> Self {
        Self(ptr)
    }

    /// Return the raw address.
    #[must_use]
    pub const fn as_ptr(self) -> *const c_void {
        self.0
    }
}

/// Ways an exported table can break the contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportTableError {
    /// A null table pointer came with a non-zero length.
    #[error("null export table with length {len}")]
    NullTable {
        /// The reported length.
        len: usize,
    },

    /// An entry has a null name.
    #[error("entry {index} has a null name")]
    NullName {
        /// Position of the entry.
        index: usize,
    },

    /// An entry name is not UTF-8.
    #[error("entry {index} has a name that is not valid UTF-8")]
    InvalidName {
        /// Position of the entry.
        index: usize,
    },

    /// Two entries share a name.
    #[error("symbol {name} is exported more than once")]
    Duplicate {
        /// The repeated name.
        name: String,
    },
}

/// Exported symbols of a loaded binding, by exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportTable {
    symbols: BTreeMap<String, Export>,
}

impl ExportTable {
    /// Build a table from named exports.
    ///
    /// # Errors
    ///
    /// Returns [`ExportTableError::Duplicate`] if a name repeats.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, ExportTableError>
    where
        I: IntoIterator<Item = (S, Export)>,
        S: Into<String>,
    {
        let mut symbols = BTreeMap::new();
        for (name, export) in entries {
            let name = name.into();
            if symbols.contains_key(&name) {
                return Err(ExportTableError::Duplicate { name });
            }
            symbols.insert(name, export);
        }
        Ok(Self { symbols })
    }

    /// Copy a table laid out by a binding.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportTableError`] for a null table, a null or non-UTF-8
    /// name, or a repeated name.
    ///
    /// # Safety
    ///
    /// When `table` is non-null it must point to `len` initialised entries,
    /// and every non-null `name` must point to a NUL-terminated string. All
    /// of them must stay valid for the duration of the call.
    pub unsafe fn from_raw(table: *const RawExport, len: usize) -> Result<Self, ExportTableError> {
        if len == 0 {
            return Ok(Self::default());
        }
        if table.is_null() {
            return Err(ExportTableError::NullTable { len });
        }

        // SAFETY: the caller guarantees `len` entries behind a non-null `table`.
        let raw = unsafe { std::slice::from_raw_parts(table, len) };
        let mut entries = Vec::with_capacity(len);
        for (index, entry) in raw.iter().enumerate() {
            if entry.name.is_null() {
                return Err(ExportTableError::NullName { index });
            }
            // SAFETY: non-null names are NUL-terminated per the caller contract.
            let name = unsafe { CStr::from_ptr(entry.name) }
                .to_str()
                .map_err(|_| ExportTableError::InvalidName { index })?;
            entries.push((name.to_owned(), Export::from_ptr(entry.value)));
        }
        Self::from_entries(entries)
    }

    /// Look up one export by its exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Export> {
        self.symbols.get(name).copied()
    }

    /// Whether `name` is exported.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Exported names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    /// All `(name, export)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Export)> {
        self.symbols.iter().map(|(name, export)| (name.as_str(), *export))
    }

    /// Number of exports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether nothing is exported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
