//! Candidate artefact locations for a resolved target.
//!
//! The order is fixed: the file bundled next to the module first, the
//! installable package second. [`candidates`] returns an array of two so
//! the count cannot drift.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::fmt;

use crate::naming::BindingName;

/// Where a candidate comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CandidateKind {
    /// A file bundled in the module directory.
    LocalFile,
    /// A separately installed per-target package.
    InstallablePackage,
}

/// How a candidate is located.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Locator {
    /// Filesystem path of a bundled artefact.
    Path(Utf8PathBuf),
    /// Package identifier resolved through the package search roots.
    Package(String),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{path}"),
            Self::Package(name) => f.write_str(name),
        }
    }
}

/// One place the binding may be loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSource {
    kind: CandidateKind,
    locator: Locator,
}

impl CandidateSource {
    /// A bundled file at `path`.
    #[must_use]
    pub const fn local_file(path: Utf8PathBuf) -> Self {
        Self {
            kind: CandidateKind::LocalFile,
            locator: Locator::Path(path),
        }
    }

    /// An installable package called `name`.
    #[must_use]
    pub const fn package(name: String) -> Self {
        Self {
            kind: CandidateKind::InstallablePackage,
            locator: Locator::Package(name),
        }
    }

    /// Return the candidate kind.
    #[must_use]
    pub const fn kind(&self) -> CandidateKind {
        self.kind
    }

    /// Return the locator.
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CandidateKind::LocalFile => write!(f, "local file {}", self.locator),
            CandidateKind::InstallablePackage => write!(f, "package {}", self.locator),
        }
    }
}

/// Build the ordered candidates for `name`, bundled file first.
#[must_use]
pub fn candidates(module_dir: &Utf8Path, name: &BindingName<'_>) -> [CandidateSource; 2] {
    [
        CandidateSource::local_file(module_dir.join(name.file_name())),
        CandidateSource::package(name.package_name()),
    ]
}
