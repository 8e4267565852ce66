//! Host platform information.
//!
//! The [`Platform`] trait is the seam between target detection and the
//! running process, so detection can be exercised with any host.

/// Structured runtime report consulted for libc detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticReport {
    /// Runtime glibc version, present only when the process runs on glibc.
    pub glibc_version_runtime: Option<String>,
}

/// Source of OS, architecture and runtime report for the current process.
#[cfg_attr(test, mockall::automock)]
pub trait Platform {
    /// OS name, spelled as `std::env::consts::OS`.
    fn os(&self) -> String;

    /// CPU architecture, spelled as `std::env::consts::ARCH`.
    fn arch(&self) -> String;

    /// Structured runtime report, or `None` when the host cannot produce one.
    fn report(&self) -> Option<DiagnosticReport>;
}

/// The running process.
///
/// A report is available when the binary was built for the GNU or musl
/// environment. GNU builds carry the runtime glibc version; musl builds
/// report none.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl Platform for HostPlatform {
    fn os(&self) -> String {
        std::env::consts::OS.to_owned()
    }

    fn arch(&self) -> String {
        std::env::consts::ARCH.to_owned()
    }

    fn report(&self) -> Option<DiagnosticReport> {
        host_report()
    }
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn host_report() -> Option<DiagnosticReport> {
    // SAFETY: glibc returns a pointer to a static NUL-terminated string.
    let version = unsafe { std::ffi::CStr::from_ptr(libc::gnu_get_libc_version()) };
    Some(DiagnosticReport {
        glibc_version_runtime: Some(version.to_string_lossy().into_owned()),
    })
}

#[cfg(all(target_os = "linux", target_env = "musl"))]
fn host_report() -> Option<DiagnosticReport> {
    Some(DiagnosticReport::default())
}

#[cfg(not(all(target_os = "linux", any(target_env = "gnu", target_env = "musl"))))]
fn host_report() -> Option<DiagnosticReport> {
    None
}
