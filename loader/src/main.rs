//! Binding loader diagnostics entrypoint.
//!
//! Runs target detection and binding resolution the way the library does at
//! start-up and prints what each stage decided.

use clap::Parser;
use std::io::Write;

use longbridge_loader::binding::load_config_binding;
use longbridge_loader::candidate::candidates;
use longbridge_loader::cli::{Cli, CliError, Command};
use longbridge_loader::detect::detect_target;
use longbridge_loader::fs::StdFileSystem;
use longbridge_loader::naming::BindingName;
use longbridge_loader::output::{
    format_candidates_human, format_candidates_json, format_module_human, format_module_json,
};
use longbridge_loader::platform::HostPlatform;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let exit_code = exit_code_for_run_result(run(&cli, &mut stdout), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<(), CliError> {
    let config = cli.loader_config()?;

    let report = match &cli.command {
        Command::Target => detect_target(&HostPlatform, &StdFileSystem)?
            .platform_tag()
            .to_owned(),
        Command::Candidates(args) => {
            let target = detect_target(&HostPlatform, &StdFileSystem)?;
            let name = BindingName::new(config.library(), target);
            let sources = candidates(config.module_dir(), &name);
            if args.json {
                format_candidates_json(target, &sources)
            } else {
                format_candidates_human(target, &sources)
            }
        }
        Command::Load(args) => {
            let module = load_config_binding(&config)?;
            if args.json {
                format_module_json(config.library(), &module)
            } else {
                format_module_human(config.library(), &module)
            }
        }
    };

    writeln!(stdout, "{}", report.trim_end()).map_err(|source| CliError::WriteFailed { source })
}

fn exit_code_for_run_result(result: Result<(), CliError>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; ignore write failures.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use longbridge_loader::error::LoaderError;

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let err = CliError::Loader(LoaderError::UnsupportedPlatform {
            os: "haiku".to_owned(),
            arch: "x86_64".to_owned(),
            libc: None,
        });

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("unsupported platform: os haiku"));
    }

    #[test]
    fn candidates_for_explicit_module_dir_start_with_local_file() {
        let cli = Cli::parse_from(["longbridge-loader", "--module-dir", "/srv/app", "candidates"]);
        let mut stdout = Vec::new();

        match run(&cli, &mut stdout) {
            Ok(()) => {
                let text = String::from_utf8(stdout).expect("stdout was not UTF-8");
                assert!(text.contains("1. local file /srv/app/longbridge."), "{text}");
                assert!(text.contains("2. package longbridge-"), "{text}");
            }
            // Hosts without a published binding stop at detection.
            Err(CliError::Loader(LoaderError::UnsupportedPlatform { .. })) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
