//! Resolution of installable per-target packages to artefact paths.
//!
//! A package named `longbridge-linux-x64-gnu` is installed as a directory of
//! that name under one of the package roots, holding a `package.json` whose
//! `main` field names the binding artefact. Roots are searched in order and
//! the first directory with a manifest wins.

use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use serde::Deserialize;

use crate::error::CandidateLoadError;
use crate::fs::FileSystem;

/// Manifest file expected in every package directory.
pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Deserialize)]
struct PackageManifest {
    main: Option<String>,
}

/// Find the artefact provided by `package`.
///
/// # Errors
///
/// Returns [`CandidateLoadError::PackageNotFound`] when no root holds the
/// package, or [`CandidateLoadError::InvalidManifest`] when the manifest
/// cannot be read, is not valid JSON, or has no `main` entry.
pub fn resolve_package(
    fs: &dyn FileSystem,
    roots: &[Utf8PathBuf],
    package: &str,
) -> Result<Utf8PathBuf, CandidateLoadError> {
    for root in roots {
        let package_dir = root.join(package);
        let manifest_path = package_dir.join(MANIFEST_FILE);
        if !fs.exists(&manifest_path) {
            trace!("resolve_package: no {package} under {root}");
            continue;
        }
        let main = read_main(fs, &manifest_path)?;
        return Ok(package_dir.join(main));
    }

    Err(CandidateLoadError::PackageNotFound {
        package: package.to_owned(),
        searched: roots.to_vec(),
    })
}

fn read_main(fs: &dyn FileSystem, manifest_path: &Utf8Path) -> Result<String, CandidateLoadError> {
    let invalid = |reason: String| CandidateLoadError::InvalidManifest {
        path: manifest_path.to_owned(),
        reason,
    };

    let contents = fs
        .read_to_string(manifest_path)
        .map_err(|e| invalid(e.to_string()))?;
    let manifest: PackageManifest =
        serde_json::from_str(&contents).map_err(|e| invalid(e.to_string()))?;

    match manifest.main {
        Some(main) if !main.trim().is_empty() => Ok(main),
        _ => Err(invalid("missing \"main\" entry".to_owned())),
    }
}
