//! Output formatting for the diagnostics CLI.
//!
//! Every report has a human-readable and a JSON rendering.

use serde::Serialize;

use crate::candidate::CandidateSource;
use crate::loader::NativeModule;
use crate::target::TargetTriple;

/// Format the ordered candidates for human-readable output.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use longbridge_loader::candidate::candidates;
/// use longbridge_loader::naming::BindingName;
/// use longbridge_loader::output::format_candidates_human;
/// use longbridge_loader::target::{Arch, Os, TargetTriple};
///
/// let target = TargetTriple::new(Os::Macos, Arch::Arm64, None).expect("valid");
/// let sources = candidates(Utf8Path::new("/opt/app"), &BindingName::new("longbridge", target));
/// let text = format_candidates_human(target, &sources);
/// assert!(text.contains("1. local file /opt/app/longbridge.darwin-arm64.dylib"));
/// ```
#[must_use]
pub fn format_candidates_human(target: TargetTriple, candidates: &[CandidateSource]) -> String {
    let mut output = format!("Candidates for {target}:\n");
    for (index, candidate) in candidates.iter().enumerate() {
        output.push_str(&format!("  {}. {candidate}\n", index + 1));
    }
    output
}

/// Format the ordered candidates as JSON.
#[must_use]
pub fn format_candidates_json(target: TargetTriple, candidates: &[CandidateSource]) -> String {
    let report = CandidatesJson {
        target,
        candidates,
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_owned())
}

/// Format a loaded module for human-readable output.
#[must_use]
pub fn format_module_human(library: &str, module: &NativeModule) -> String {
    let exports = module.exports();
    let origin = module
        .path()
        .map_or_else(String::new, |path| format!(" from {path}"));
    let mut output = format!(
        "Loaded {library}{origin} ({} exported symbols)\n",
        exports.len()
    );
    for name in exports.names() {
        output.push_str(&format!("  {name}\n"));
    }
    output
}

/// Format a loaded module as JSON.
#[must_use]
pub fn format_module_json(library: &str, module: &NativeModule) -> String {
    let report = ModuleJson {
        library,
        path: module.path().map(|path| path.as_str()),
        symbols: module.exports().names().collect(),
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_owned())
}

#[derive(Debug, Serialize)]
struct CandidatesJson<'a> {
    target: TargetTriple,
    candidates: &'a [CandidateSource],
}

#[derive(Debug, Serialize)]
struct ModuleJson<'a> {
    library: &'a str,
    path: Option<&'a str>,
    symbols: Vec<&'a str>,
}
