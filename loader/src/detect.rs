//! Target detection from the running process.
//!
//! Detection reads the OS and architecture from the [`Platform`], rejects any
//! pair without a published binding before touching the filesystem, and on
//! Linux settles the libc flavour with a two-tier probe:
//!
//! 1. If the platform produces a [`DiagnosticReport`](crate::platform::DiagnosticReport),
//!    a glibc runtime version means `gnu`; its absence means `musl`.
//! 2. Otherwise `/usr/bin/ldd` is read as text: a `musl` mention means
//!    `musl`, anything else `gnu`.
//!
//! Any uncertainty in the second tier, including a failed read for whatever
//! reason, classifies the host as `musl`.

use camino::Utf8Path;
use log::{debug, trace};

use crate::error::{LoaderError, Result};
use crate::fs::FileSystem;
use crate::platform::Platform;
use crate::target::{Arch, Libc, Os, TargetTriple, is_supported_pair};

/// System binary read when no runtime report is available.
pub const LDD_PATH: &str = "/usr/bin/ldd";

/// Substring identifying a musl-based `ldd`.
const MUSL_MARKER: &str = "musl";

/// Detect the binding target of the running process.
///
/// # Errors
///
/// Returns [`LoaderError::UnsupportedPlatform`] when the OS, architecture or
/// libc combination has no published binding.
pub fn detect_target(platform: &dyn Platform, fs: &dyn FileSystem) -> Result<TargetTriple> {
    let os_name = platform.os();
    let arch_name = platform.arch();
    trace!("detect_target: host reports os={os_name} arch={arch_name}");

    let unsupported = || LoaderError::UnsupportedPlatform {
        os: os_name.clone(),
        arch: arch_name.clone(),
        libc: None,
    };

    let os = Os::from_host(&os_name).ok_or_else(unsupported)?;
    let arch = Arch::from_host(&arch_name).ok_or_else(unsupported)?;
    if !is_supported_pair(os, arch) {
        return Err(unsupported());
    }

    let libc = (os == Os::Linux).then(|| detect_libc(platform, fs));
    let target = TargetTriple::new(os, arch, libc)?;
    debug!("detected binding target {target}");
    Ok(target)
}

/// Classify the C library of a Linux host.
#[must_use]
pub fn detect_libc(platform: &dyn Platform, fs: &dyn FileSystem) -> Libc {
    if let Some(report) = platform.report() {
        return match report.glibc_version_runtime {
            Some(version) => {
                trace!("detect_libc: runtime report has glibc {version}");
                Libc::Gnu
            }
            None => {
                trace!("detect_libc: runtime report has no glibc version");
                Libc::Musl
            }
        };
    }

    match fs.read_to_string(Utf8Path::new(LDD_PATH)) {
        Ok(text) if text.contains(MUSL_MARKER) => Libc::Musl,
        Ok(_) => Libc::Gnu,
        Err(e) => {
            debug!("could not read {LDD_PATH} ({e}); assuming musl");
            Libc::Musl
        }
    }
}
