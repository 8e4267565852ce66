//! Native binding loader for longbridge.
//!
//! The longbridge binding ships one prebuilt shared library per supported
//! target. This crate works out which target the running process is, finds
//! the matching artefact (bundled next to the executable, or installed as a
//! per-target package) and loads it, exposing the library's export table.
//!
//! # Modules
//!
//! - [`binding`] - Write-once process binding and the load pipeline
//! - [`candidate`] - Ordered candidate locations for a target
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Library identity and search locations
//! - [`detect`] - OS, architecture and libc detection
//! - [`error`] - Fatal and per-candidate error types
//! - [`exports`] - The export contract and export table
//! - [`fs`] - Filesystem abstraction
//! - [`loader`] - Dynamic library loading
//! - [`naming`] - Artefact and package naming policy
//! - [`output`] - Human and JSON report formatting
//! - [`package`] - Installed package resolution
//! - [`platform`] - Host platform information
//! - [`resolver`] - Ordered load attempts and error aggregation
//! - [`target`] - The supported target matrix

pub mod binding;
pub mod candidate;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod exports;
pub mod fs;
pub mod loader;
pub mod naming;
pub mod output;
pub mod package;
pub mod platform;
pub mod resolver;
pub mod target;
