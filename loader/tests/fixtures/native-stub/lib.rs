//! Minimal native binding used by the loader integration tests.
//!
//! Exports `Config`, `Decimal` and `sleep` through
//! `longbridge_native_exports`. Each value is also exported as a plain data
//! symbol so tests can check the addresses handed out by the table.

use std::ffi::{c_char, c_void};

/// Marker present in every build, so the library always has an export.
#[unsafe(no_mangle)]
pub extern "C" fn native_stub_marker() -> u32 {
    1
}

#[cfg(not(feature = "without-exports"))]
mod exports {
    use super::{c_char, c_void};

    #[repr(C)]
    pub struct RawExport {
        name: *const c_char,
        value: *const c_void,
    }

    struct Table([RawExport; 3]);

    // SAFETY: the table is immutable and only points at immutable statics.
    unsafe impl Sync for Table {}

    #[unsafe(no_mangle)]
    pub static NATIVE_STUB_CONFIG: u64 = 11;

    #[unsafe(no_mangle)]
    pub static NATIVE_STUB_DECIMAL: u64 = 22;

    #[unsafe(no_mangle)]
    pub static NATIVE_STUB_SLEEP: u64 = 33;

    static TABLE: Table = Table([
        RawExport {
            name: c"Config".as_ptr(),
            value: (&raw const NATIVE_STUB_CONFIG).cast(),
        },
        RawExport {
            name: c"Decimal".as_ptr(),
            value: (&raw const NATIVE_STUB_DECIMAL).cast(),
        },
        RawExport {
            name: c"sleep".as_ptr(),
            value: (&raw const NATIVE_STUB_SLEEP).cast(),
        },
    ]);

    /// # Safety
    ///
    /// `len` must be null or valid for a write.
    #[unsafe(no_mangle)]
    pub unsafe extern "C" fn longbridge_native_exports(len: *mut usize) -> *const RawExport {
        if !len.is_null() {
            // SAFETY: checked non-null; the caller provides a writable slot.
            unsafe { len.write(TABLE.0.len()) };
        }
        TABLE.0.as_ptr()
    }
}
