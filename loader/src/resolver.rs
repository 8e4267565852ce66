//! Ordered load attempts over the candidates of one target.
//!
//! The bundled file is tried only if it exists. The package is tried only if
//! the bundled file was absent or failed to load. Every failure is kept; when
//! both candidates fail the caller gets one
//! [`LoaderError::ResolutionExhausted`] that leads with the most specific
//! underlying error.

use log::{debug, warn};

use crate::candidate::{CandidateSource, Locator};
use crate::error::{CandidateLoadError, FailedAttempt, LoaderError, Result};
use crate::fs::FileSystem;
use crate::loader::{ModuleLoader, NativeModule};
use crate::target::TargetTriple;

/// Outcome of trying one candidate.
#[derive(Debug)]
pub enum LoadAttemptResult {
    /// The candidate loaded.
    Loaded(NativeModule),
    /// The bundled file does not exist; nothing was loaded.
    Absent,
    /// The candidate could not be loaded.
    Failed(CandidateLoadError),
}

/// Try a single candidate.
pub fn attempt(
    candidate: &CandidateSource,
    fs: &dyn FileSystem,
    loader: &dyn ModuleLoader,
) -> LoadAttemptResult {
    let result = match candidate.locator() {
        Locator::Path(path) => {
            if !fs.exists(path) {
                return LoadAttemptResult::Absent;
            }
            loader.load_file(path)
        }
        Locator::Package(package) => loader.load_package(package),
    };
    match result {
        Ok(module) => LoadAttemptResult::Loaded(module),
        Err(e) => LoadAttemptResult::Failed(e),
    }
}

/// Load the first candidate that works.
///
/// # Errors
///
/// Returns [`LoaderError::ResolutionExhausted`] when no candidate loads.
pub fn resolve(
    target: TargetTriple,
    candidates: &[CandidateSource; 2],
    fs: &dyn FileSystem,
    loader: &dyn ModuleLoader,
) -> Result<NativeModule> {
    let mut failures = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        debug!("trying {candidate}");
        match attempt(candidate, fs, loader) {
            LoadAttemptResult::Loaded(module) => {
                debug!("loaded native binding for {target} from {candidate}");
                return Ok(module);
            }
            LoadAttemptResult::Absent => {
                debug!("{candidate} does not exist");
                failures.push(FailedAttempt {
                    source: candidate.clone(),
                    existed: false,
                    error: None,
                });
            }
            LoadAttemptResult::Failed(error) => {
                warn!("{candidate} failed to load: {error}");
                failures.push(FailedAttempt {
                    source: candidate.clone(),
                    existed: error.is_load_failure(),
                    error: Some(error),
                });
            }
        }
    }

    Err(LoaderError::ResolutionExhausted {
        target: target.platform_tag().to_owned(),
        primary: primary_error(&failures),
        attempts: failures,
    })
}

/// Pick the error to surface: the first real load failure in candidate
/// order, otherwise the first captured error.
fn primary_error(failures: &[FailedAttempt]) -> Option<CandidateLoadError> {
    let mut captured = failures.iter().filter_map(|f| f.error.as_ref());
    captured
        .clone()
        .find(|e| e.is_load_failure())
        .or_else(|| captured.next())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::candidates;
    use crate::exports::{Export, ExportTable};
    use crate::fs::MockFileSystem;
    use crate::loader::MockModuleLoader;
    use crate::naming::BindingName;
    use crate::target::{Arch, Libc, Os};
    use camino::{Utf8Path, Utf8PathBuf};
    use rstest::{fixture, rstest};

    const LOCAL: &str = "/opt/app/longbridge.linux-x64-gnu.so";
    const PACKAGE: &str = "longbridge-linux-x64-gnu";

    #[fixture]
    fn target() -> TargetTriple {
        TargetTriple::new(Os::Linux, Arch::X64, Some(Libc::Gnu)).expect("valid")
    }

    fn sources(target: TargetTriple) -> [CandidateSource; 2] {
        candidates(
            Utf8Path::new("/opt/app"),
            &BindingName::new("longbridge", target),
        )
    }

    fn local_exists(exists: bool) -> MockFileSystem {
        let mut fs = MockFileSystem::new();
        fs.expect_exists()
            .withf(|path| path.as_str() == LOCAL)
            .times(1)
            .return_const(exists);
        fs
    }

    fn module(names: &[&str]) -> NativeModule {
        let exports = ExportTable::from_entries(
            names
                .iter()
                .map(|name| (*name, Export::from_ptr(std::ptr::null()))),
        )
        .expect("unique names");
        NativeModule::from_exports(exports)
    }

    fn corrupt_local() -> CandidateLoadError {
        CandidateLoadError::Open {
            path: Utf8PathBuf::from(LOCAL),
            reason: "invalid ELF header".to_owned(),
        }
    }

    fn package_missing() -> CandidateLoadError {
        CandidateLoadError::PackageNotFound {
            package: PACKAGE.to_owned(),
            searched: vec![Utf8PathBuf::from("/opt/app/node_modules")],
        }
    }

    #[rstest]
    fn loaded_local_file_short_circuits(target: TargetTriple) {
        let fs = local_exists(true);
        let mut loader = MockModuleLoader::new();
        loader
            .expect_load_file()
            .withf(|path| path.as_str() == LOCAL)
            .times(1)
            .return_once(|_| Ok(module(&["Config"])));
        loader.expect_load_package().never();

        let loaded = resolve(target, &sources(target), &fs, &loader).expect("loaded");

        assert!(loaded.exports().contains("Config"));
    }

    #[rstest]
    fn absent_local_file_falls_back_to_package(target: TargetTriple) {
        let fs = local_exists(false);
        let mut loader = MockModuleLoader::new();
        loader.expect_load_file().never();
        loader
            .expect_load_package()
            .withf(|package| package == PACKAGE)
            .times(1)
            .return_once(|_| Ok(module(&["QuoteContext"])));

        let loaded = resolve(target, &sources(target), &fs, &loader).expect("loaded");

        assert!(loaded.exports().contains("QuoteContext"));
    }

    #[rstest]
    fn failed_local_file_still_tries_package(target: TargetTriple) {
        let fs = local_exists(true);
        let mut loader = MockModuleLoader::new();
        loader
            .expect_load_file()
            .times(1)
            .return_once(|_| Err(corrupt_local()));
        loader
            .expect_load_package()
            .times(1)
            .return_once(|_| Ok(module(&["TradeContext"])));

        let loaded = resolve(target, &sources(target), &fs, &loader).expect("package loaded");

        assert!(loaded.exports().contains("TradeContext"));
    }

    #[rstest]
    fn exhausted_error_leads_with_local_load_failure(target: TargetTriple) {
        let fs = local_exists(true);
        let mut loader = MockModuleLoader::new();
        loader
            .expect_load_file()
            .times(1)
            .return_once(|_| Err(corrupt_local()));
        loader
            .expect_load_package()
            .times(1)
            .return_once(|_| Err(package_missing()));

        let err = resolve(target, &sources(target), &fs, &loader).expect_err("both fail");

        assert!(err.to_string().contains("invalid ELF header"), "{err}");
        match err {
            LoaderError::ResolutionExhausted {
                target: tag,
                primary,
                attempts,
            } => {
                assert_eq!(tag, "linux-x64-gnu");
                assert_eq!(primary, Some(corrupt_local()));
                assert_eq!(attempts.len(), 2);
                assert!(attempts.iter().all(|a| a.error.is_some()));
                assert!(attempts.first().is_some_and(|a| a.existed));
            }
            other => panic!("expected ResolutionExhausted, got {other:?}"),
        }
    }

    #[rstest]
    fn absent_file_and_missing_package_surface_package_error(target: TargetTriple) {
        let fs = local_exists(false);
        let mut loader = MockModuleLoader::new();
        loader.expect_load_file().never();
        loader
            .expect_load_package()
            .times(1)
            .return_once(|_| Err(package_missing()));

        let err = resolve(target, &sources(target), &fs, &loader).expect_err("nothing loads");

        match err {
            LoaderError::ResolutionExhausted {
                primary, attempts, ..
            } => {
                assert!(
                    matches!(primary, Some(CandidateLoadError::PackageNotFound { .. })),
                    "unexpected primary error: {primary:?}"
                );
                assert!(attempts.iter().all(|a| !a.existed));
            }
            other => panic!("expected ResolutionExhausted, got {other:?}"),
        }
    }

    #[test]
    fn primary_prefers_load_failure_over_missing_package() {
        let failures = [
            FailedAttempt {
                source: CandidateSource::package(PACKAGE.to_owned()),
                existed: false,
                error: Some(package_missing()),
            },
            FailedAttempt {
                source: CandidateSource::local_file(Utf8PathBuf::from(LOCAL)),
                existed: true,
                error: Some(corrupt_local()),
            },
        ];

        assert_eq!(primary_error(&failures), Some(corrupt_local()));
    }

    #[test]
    fn primary_is_none_without_captured_errors() {
        let failures = [FailedAttempt {
            source: CandidateSource::local_file(Utf8PathBuf::from(LOCAL)),
            existed: false,
            error: None,
        }];

        assert_eq!(primary_error(&failures), None);
    }
}
