//! Vela pipeline plugin for building static sites with Hugo.
//!
//! The plugin resolves its settings from flags, environment variables and
//! mounted parameter files, optionally installs a specific engine build,
//! checks that every configured path exists and then runs the engine.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`command`] - Deterministic engine argument assembly
//! - [`config`] - Layered setting resolution
//! - [`error`] - Top-level error type and exit codes
//! - [`fs`] - Filesystem capability used by validation and installation
//! - [`install`] - Engine download, verification and installation
//! - [`logging`] - Log level parsing and subscriber set-up
//! - [`plugin`] - Validation and execution of a configured build
//! - [`release`] - Release asset naming, download, checksums and extraction
//! - [`runner`] - Engine process execution
//! - [`settings`] - Settings records and path validation
//! - [`version`] - Engine version parsing and platform naming

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod fs;
pub mod install;
pub mod logging;
pub mod plugin;
pub mod release;
pub mod runner;
pub mod settings;
pub mod version;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
