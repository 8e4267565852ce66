//! Artefact naming policy for bundled binding files and per-target packages.
//!
//! A bundled file is named `<library>.<platform tag><ext>`, for example
//! `longbridge.linux-x64-gnu.so`. The matching installable package is
//! `<library>-<platform tag>`, for example `longbridge-linux-x64-gnu`.

use crate::target::TargetTriple;

/// Names of the artefacts that provide one library for one target.
///
/// # Examples
///
/// ```
/// use longbridge_loader::naming::BindingName;
/// use longbridge_loader::target::{Arch, Os, TargetTriple};
///
/// let target = TargetTriple::new(Os::Windows, Arch::X64, None).expect("valid");
/// let name = BindingName::new("longbridge", target);
/// assert_eq!(name.file_name(), "longbridge.win32-x64-msvc.dll");
/// assert_eq!(name.package_name(), "longbridge-win32-x64-msvc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingName<'a> {
    library: &'a str,
    target: TargetTriple,
}

impl<'a> BindingName<'a> {
    /// Create the names for `library` on `target`.
    #[must_use]
    pub const fn new(library: &'a str, target: TargetTriple) -> Self {
        Self { library, target }
    }

    /// File name of the bundled artefact.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "{}.{}{}",
            self.library,
            self.target.platform_tag(),
            self.target.library_extension()
        )
    }

    /// Name of the installable per-target package.
    #[must_use]
    pub fn package_name(&self) -> String {
        format!("{}-{}", self.library, self.target.platform_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{Arch, Libc, Os};
    use rstest::rstest;

    #[rstest]
    #[case::linux_musl(
        Os::Linux,
        Arch::Arm64,
        Some(Libc::Musl),
        "longbridge.linux-arm64-musl.so",
        "longbridge-linux-arm64-musl"
    )]
    #[case::linux_armhf(
        Os::Linux,
        Arch::Arm,
        Some(Libc::Gnu),
        "longbridge.linux-arm-gnueabihf.so",
        "longbridge-linux-arm-gnueabihf"
    )]
    #[case::macos(
        Os::Macos,
        Arch::X64,
        None,
        "longbridge.darwin-x64.dylib",
        "longbridge-darwin-x64"
    )]
    #[case::android(
        Os::Android,
        Arch::Arm64,
        None,
        "longbridge.android-arm64.so",
        "longbridge-android-arm64"
    )]
    fn names_follow_platform_tag(
        #[case] os: Os,
        #[case] arch: Arch,
        #[case] libc: Option<Libc>,
        #[case] file: &str,
        #[case] package: &str,
    ) {
        let target = TargetTriple::new(os, arch, libc).expect("valid");
        let name = BindingName::new("longbridge", target);
        assert_eq!(name.file_name(), file);
        assert_eq!(name.package_name(), package);
    }

    #[test]
    fn library_identifier_prefixes_both_names() {
        let target = TargetTriple::new(Os::Freebsd, Arch::X64, None).expect("valid");
        let name = BindingName::new("quotes", target);
        assert!(name.file_name().starts_with("quotes."));
        assert!(name.package_name().starts_with("quotes-"));
    }
}
