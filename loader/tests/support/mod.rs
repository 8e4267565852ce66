//! Test support for loading real binding libraries.
//!
//! The `native-stub` fixture crate is compiled once per test binary into
//! Cargo's integration-test scratch directory.

use camino::{Utf8Path, Utf8PathBuf};
use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::process::Command;
use std::sync::OnceLock;

/// Which build of the fixture library to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubBuild {
    /// Exports `Config`, `Decimal` and `sleep` through the export table.
    WithExports,
    /// Has no export-table entry point.
    WithoutExports,
}

impl StubBuild {
    fn dir_name(self) -> &'static str {
        match self {
            Self::WithExports => "with-exports",
            Self::WithoutExports => "without-exports",
        }
    }
}

/// Names exported by [`StubBuild::WithExports`], with the data symbol that
/// backs each one and its value.
pub const STUB_EXPORTS: [(&str, &str, u64); 3] = [
    ("Config", "NATIVE_STUB_CONFIG", 11),
    ("Decimal", "NATIVE_STUB_DECIMAL", 22),
    ("sleep", "NATIVE_STUB_SLEEP", 33),
];

/// Returns the path of the built fixture library, building it on first use.
pub fn native_stub(build: StubBuild) -> &'static Utf8Path {
    static WITH_EXPORTS: OnceLock<Utf8PathBuf> = OnceLock::new();
    static WITHOUT_EXPORTS: OnceLock<Utf8PathBuf> = OnceLock::new();

    let cell = match build {
        StubBuild::WithExports => &WITH_EXPORTS,
        StubBuild::WithoutExports => &WITHOUT_EXPORTS,
    };
    cell.get_or_init(|| build_stub(build))
}

fn build_stub(build: StubBuild) -> Utf8PathBuf {
    let manifest =
        Utf8Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/native-stub/Cargo.toml");
    let target_dir = Utf8Path::new(env!("CARGO_TARGET_TMPDIR"))
        .join("native-stub")
        .join(build.dir_name());

    let mut cmd = Command::new(env!("CARGO"));
    cmd.args([
        "build",
        "--quiet",
        "--manifest-path",
        manifest.as_str(),
        "--target-dir",
        target_dir.as_str(),
    ]);
    if build == StubBuild::WithoutExports {
        cmd.args(["--features", "without-exports"]);
    }
    let output = cmd.output().expect("failed to run cargo for native-stub");
    assert!(
        output.status.success(),
        "building native-stub failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let library = target_dir
        .join("debug")
        .join(format!("{DLL_PREFIX}native_stub{DLL_SUFFIX}"));
    assert!(library.exists(), "missing fixture library {library}");
    library
}
