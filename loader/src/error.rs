//! Error types for target detection and binding resolution.
//!
//! [`CandidateLoadError`] describes why one candidate could not be loaded.
//! Those errors are collected by the resolver and only ever surface folded
//! into [`LoaderError::ResolutionExhausted`].

use crate::candidate::CandidateSource;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Fatal errors that leave the native binding unusable.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The host (os, arch[, libc]) has no published binding.
    #[error("unsupported platform: os {os}, architecture {arch}{}", libc_suffix(.libc))]
    UnsupportedPlatform {
        /// OS name as reported by the host.
        os: String,
        /// Architecture name as reported by the host.
        arch: String,
        /// C library flavour, when it took part in the decision.
        libc: Option<String>,
    },

    /// Neither candidate produced a loaded module.
    #[error("{}", exhausted_message(.target, .primary))]
    ResolutionExhausted {
        /// Platform tag of the target that was resolved.
        target: String,
        /// The most specific underlying load error, if one was captured.
        primary: Option<CandidateLoadError>,
        /// Every failed attempt, in candidate order.
        attempts: Vec<FailedAttempt>,
    },

    /// The directory holding bundled artefacts could not be determined.
    #[error("could not determine the module directory: {reason}")]
    ModuleDirUnavailable {
        /// Description of the failure.
        reason: String,
    },
}

fn libc_suffix(libc: &Option<String>) -> String {
    libc.as_deref()
        .map(|l| format!(", libc {l}"))
        .unwrap_or_default()
}

fn exhausted_message(target: &str, primary: &Option<CandidateLoadError>) -> String {
    match primary {
        Some(err) => format!("failed to load native binding for {target}: {err}"),
        None => format!("failed to load native binding for {target}"),
    }
}

/// Why a single candidate failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandidateLoadError {
    /// The dynamic linker rejected the file.
    #[error("could not open {path}: {reason}")]
    Open {
        /// Path of the library.
        path: Utf8PathBuf,
        /// Message reported by the dynamic linker.
        reason: String,
    },

    /// The library does not export the binding's symbol table.
    #[error("{path} does not export {symbol}")]
    MissingExports {
        /// Path of the library.
        path: Utf8PathBuf,
        /// The entry point that was looked up.
        symbol: String,
    },

    /// The exported symbol table violates the export contract.
    #[error("malformed export table in {path}: {reason}")]
    MalformedExports {
        /// Path of the library.
        path: Utf8PathBuf,
        /// Description of the violation.
        reason: String,
    },

    /// No search root contains the package.
    #[error("package {package} not found (searched {})", join_paths(.searched))]
    PackageNotFound {
        /// The package that was looked up.
        package: String,
        /// Roots searched, in order.
        searched: Vec<Utf8PathBuf>,
    },

    /// The package manifest could not be read or parsed.
    #[error("invalid package manifest {path}: {reason}")]
    InvalidManifest {
        /// Path of the manifest.
        path: Utf8PathBuf,
        /// Description of the failure.
        reason: String,
    },
}

impl CandidateLoadError {
    /// Whether the candidate was found and then failed to load.
    ///
    /// A missing package is the least specific outcome; every other
    /// variant carries an actual load failure.
    #[must_use]
    pub const fn is_load_failure(&self) -> bool {
        !matches!(self, Self::PackageNotFound { .. })
    }
}

fn join_paths(paths: &[Utf8PathBuf]) -> String {
    if paths.is_empty() {
        return "no roots".to_owned();
    }
    paths
        .iter()
        .map(|path| path.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A candidate that did not yield a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    /// The candidate that was tried.
    pub source: CandidateSource,
    /// Whether the candidate existed when it was checked.
    pub existed: bool,
    /// The captured load error; `None` when the candidate was absent.
    pub error: Option<CandidateLoadError>,
}

/// Result type alias using [`LoaderError`].
pub type Result<T> = std::result::Result<T, LoaderError>;
