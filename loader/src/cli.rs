//! CLI argument definitions for the binding loader diagnostics tool.
//!
//! The tool runs the same detection and resolution the library performs at
//! start-up and reports each stage, which makes it easy to see why a host
//! picks (or fails to pick) a binding.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::config::{DEFAULT_LIBRARY, LoaderConfig, global_package_root};
use crate::error::LoaderError;

/// Inspect native binding resolution for this host.
#[derive(Parser, Debug)]
#[command(name = "longbridge-loader")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Show the detected target:\n",
    "    $ longbridge-loader target\n\n",
    "  Show where the binding would be loaded from:\n",
    "    $ longbridge-loader candidates --module-dir ./dist\n\n",
    "  Load the binding and list its exports as JSON:\n",
    "    $ longbridge-loader load --json",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Library identifier used to name artefacts and packages.
    #[arg(long, global = true, value_name = "NAME", default_value = DEFAULT_LIBRARY)]
    pub library: String,

    /// Directory holding bundled artefacts [default: executable directory].
    #[arg(long, global = true, value_name = "DIR")]
    pub module_dir: Option<Utf8PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the detected platform tag.
    Target,

    /// List the candidate locations in the order they are tried.
    Candidates(FormatArgs),

    /// Load the binding and list its exported symbols.
    Load(FormatArgs),
}

/// Output format selection.
#[derive(Args, Debug, Clone, Default)]
pub struct FormatArgs {
    /// Output JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Build the loader configuration the command runs against.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::ModuleDirUnavailable`] when no module
    /// directory was given and the executable's directory is unknown.
    pub fn loader_config(&self) -> Result<LoaderConfig, LoaderError> {
        let Some(module_dir) = &self.module_dir else {
            return LoaderConfig::for_current_exe(&self.library);
        };
        let config = LoaderConfig::new(self.library.as_str(), module_dir.clone());
        Ok(match global_package_root(&self.library) {
            Some(root) => config.with_package_root(root),
            None => config,
        })
    }
}

/// Errors reported by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Detection or resolution failed.
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// Writing the report failed.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
