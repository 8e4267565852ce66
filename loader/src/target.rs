//! Supported target triples for prebuilt native bindings.
//!
//! Each binding artefact is published for one (os, arch, libc) combination.
//! The combinations live in a fixed table; anything outside it is rejected at
//! construction time with [`LoaderError::UnsupportedPlatform`].

use crate::error::{LoaderError, Result};
use serde::Serialize;
use std::fmt;

/// Operating systems that have at least one published binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    /// Android.
    Android,
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    Macos,
    /// FreeBSD.
    Freebsd,
    /// Linux.
    Linux,
}

impl Os {
    /// Parse the OS name reported by the host (`std::env::consts::OS`).
    #[must_use]
    pub fn from_host(value: &str) -> Option<Self> {
        match value {
            "android" => Some(Self::Android),
            "windows" => Some(Self::Windows),
            "macos" => Some(Self::Macos),
            "freebsd" => Some(Self::Freebsd),
            "linux" => Some(Self::Linux),
            _ => None,
        }
    }

    /// Return the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Windows => "windows",
            Self::Macos => "macos",
            Self::Freebsd => "freebsd",
            Self::Linux => "linux",
        }
    }
}

/// CPU architectures that have at least one published binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// 64-bit ARM (`aarch64`).
    Arm64,
    /// 32-bit ARM.
    Arm,
    /// 64-bit x86 (`x86_64`).
    X64,
    /// 32-bit x86.
    Ia32,
}

impl Arch {
    /// Parse the architecture reported by the host (`std::env::consts::ARCH`).
    ///
    /// Both the Rust spellings and the short names are accepted.
    #[must_use]
    pub fn from_host(value: &str) -> Option<Self> {
        match value {
            "aarch64" | "arm64" => Some(Self::Arm64),
            "arm" => Some(Self::Arm),
            "x86_64" | "x64" => Some(Self::X64),
            "x86" | "ia32" => Some(Self::Ia32),
            _ => None,
        }
    }

    /// Return the canonical short name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arm64 => "arm64",
            Self::Arm => "arm",
            Self::X64 => "x64",
            Self::Ia32 => "ia32",
        }
    }
}

/// C library flavour; only meaningful on Linux.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Libc {
    /// GNU libc.
    Gnu,
    /// musl libc.
    Musl,
}

impl Libc {
    /// Return the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gnu => "gnu",
            Self::Musl => "musl",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Libc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct SupportedTarget {
    os: Os,
    arch: Arch,
    libc: Option<Libc>,
    tag: &'static str,
}

/// The published binding matrix. Tags are the names the artefacts ship under.
const SUPPORTED_TARGETS: &[SupportedTarget] = &[
    SupportedTarget {
        os: Os::Android,
        arch: Arch::Arm64,
        libc: None,
        tag: "android-arm64",
    },
    SupportedTarget {
        os: Os::Android,
        arch: Arch::Arm,
        libc: None,
        tag: "android-arm-eabi",
    },
    SupportedTarget {
        os: Os::Windows,
        arch: Arch::X64,
        libc: None,
        tag: "win32-x64-msvc",
    },
    SupportedTarget {
        os: Os::Windows,
        arch: Arch::Ia32,
        libc: None,
        tag: "win32-ia32-msvc",
    },
    SupportedTarget {
        os: Os::Windows,
        arch: Arch::Arm64,
        libc: None,
        tag: "win32-arm64-msvc",
    },
    SupportedTarget {
        os: Os::Macos,
        arch: Arch::X64,
        libc: None,
        tag: "darwin-x64",
    },
    SupportedTarget {
        os: Os::Macos,
        arch: Arch::Arm64,
        libc: None,
        tag: "darwin-arm64",
    },
    SupportedTarget {
        os: Os::Freebsd,
        arch: Arch::X64,
        libc: None,
        tag: "freebsd-x64",
    },
    SupportedTarget {
        os: Os::Linux,
        arch: Arch::X64,
        libc: Some(Libc::Gnu),
        tag: "linux-x64-gnu",
    },
    SupportedTarget {
        os: Os::Linux,
        arch: Arch::X64,
        libc: Some(Libc::Musl),
        tag: "linux-x64-musl",
    },
    SupportedTarget {
        os: Os::Linux,
        arch: Arch::Arm64,
        libc: Some(Libc::Gnu),
        tag: "linux-arm64-gnu",
    },
    SupportedTarget {
        os: Os::Linux,
        arch: Arch::Arm64,
        libc: Some(Libc::Musl),
        tag: "linux-arm64-musl",
    },
    SupportedTarget {
        os: Os::Linux,
        arch: Arch::Arm,
        libc: Some(Libc::Gnu),
        tag: "linux-arm-gnueabihf",
    },
];

/// Whether any published binding exists for the (os, arch) pair.
///
/// Used to reject a platform before libc probing runs.
#[must_use]
pub fn is_supported_pair(os: Os, arch: Arch) -> bool {
    SUPPORTED_TARGETS
        .iter()
        .any(|t| t.os == os && t.arch == arch)
}

/// A validated target from the supported binding matrix.
///
/// # Examples
///
/// ```
/// use longbridge_loader::target::{Arch, Libc, Os, TargetTriple};
///
/// let target = TargetTriple::new(Os::Linux, Arch::X64, Some(Libc::Musl))
///     .expect("supported target");
/// assert_eq!(target.platform_tag(), "linux-x64-musl");
/// assert_eq!(target.library_extension(), ".so");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetTriple {
    os: Os,
    arch: Arch,
    libc: Option<Libc>,
    tag: &'static str,
}

impl TargetTriple {
    /// Validate a combination against the supported set.
    ///
    /// `libc` must be `Some` for Linux and `None` elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::UnsupportedPlatform`] when the combination has
    /// no published binding.
    pub fn new(os: Os, arch: Arch, libc: Option<Libc>) -> Result<Self> {
        SUPPORTED_TARGETS
            .iter()
            .find(|t| t.os == os && t.arch == arch && t.libc == libc)
            .map(|t| Self {
                os,
                arch,
                libc,
                tag: t.tag,
            })
            .ok_or_else(|| LoaderError::UnsupportedPlatform {
                os: os.as_str().to_owned(),
                arch: arch.as_str().to_owned(),
                libc: libc.map(|l| l.as_str().to_owned()),
            })
    }

    /// Return every supported target, in table order.
    pub fn supported() -> impl Iterator<Item = Self> {
        SUPPORTED_TARGETS.iter().map(|t| Self {
            os: t.os,
            arch: t.arch,
            libc: t.libc,
            tag: t.tag,
        })
    }

    /// Return the operating system.
    #[must_use]
    pub const fn os(&self) -> Os {
        self.os
    }

    /// Return the CPU architecture.
    #[must_use]
    pub const fn arch(&self) -> Arch {
        self.arch
    }

    /// Return the C library flavour (Linux only).
    #[must_use]
    pub const fn libc(&self) -> Option<Libc> {
        self.libc
    }

    /// Return the dash-separated tag the artefacts are published under.
    #[must_use]
    pub const fn platform_tag(&self) -> &'static str {
        self.tag
    }

    /// Return the native loadable-library suffix for this target.
    ///
    /// Unlike a `#[cfg(target_os)]` check this depends on the triple, so
    /// names for other targets can be computed on any host.
    #[must_use]
    pub const fn library_extension(&self) -> &'static str {
        match self.os {
            Os::Windows => ".dll",
            Os::Macos => ".dylib",
            Os::Android | Os::Freebsd | Os::Linux => ".so",
        }
    }
}

impl fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag)
    }
}

impl Serialize for TargetTriple {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag)
    }
}
