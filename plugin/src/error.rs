//! Top-level error type for a plugin run.
//!
//! Each stage has its own error enum; [`PluginError`] gathers them so the
//! binary can report any failure and pick an exit code.

use crate::config::ConfigError;
use crate::install::InstallError;
use crate::runner::ExecError;
use crate::settings::PathError;
use thiserror::Error;

/// Exit code for failures inside the plugin itself.
pub const INTERNAL_FAILURE_EXIT_CODE: i32 = 2;

/// Exit code when the engine was terminated by a signal.
pub const SIGNAL_EXIT_CODE: i32 = 1;

/// Errors that can occur during a plugin run.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A setting held an unusable value.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Installing the requested engine build failed.
    #[error(transparent)]
    Install(#[from] InstallError),

    /// A configured path is missing or of the wrong kind.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The engine could not be run or reported failure.
    #[error(transparent)]
    Exec(#[from] ExecError),
}

impl PluginError {
    /// The process exit code to report for this error.
    ///
    /// The engine's own status is passed through so pipelines see the same
    /// code they would get running it directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use vela_hugo::error::PluginError;
    /// use vela_hugo::settings::PathError;
    ///
    /// let err = PluginError::from(PathError::MissingConfigDirectory);
    /// assert_eq!(err.exit_code(), 2);
    /// ```
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exec(ExecError::Exit { code, .. }) => code.unwrap_or(SIGNAL_EXIT_CODE),
            Self::Config(_) | Self::Install(_) | Self::Path(_) | Self::Exec(_) => {
                INTERNAL_FAILURE_EXIT_CODE
            }
        }
    }
}

/// Convenience result type for plugin runs.
pub type Result<T> = std::result::Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingKey;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use std::io;

    #[rstest]
    #[case::engine_status(Some(3), 3)]
    #[case::signal(None, SIGNAL_EXIT_CODE)]
    fn engine_exit_is_passed_through(#[case] code: Option<i32>, #[case] expected: i32) {
        let err = PluginError::from(ExecError::Exit {
            program: Utf8PathBuf::from("/bin/hugo"),
            code,
        });
        assert_eq!(err.exit_code(), expected);
    }

    #[test]
    fn spawn_failure_is_internal() {
        let err = PluginError::from(ExecError::Spawn {
            program: Utf8PathBuf::from("/bin/hugo"),
            source: io::Error::from(io::ErrorKind::NotFound),
        });
        assert_eq!(err.exit_code(), INTERNAL_FAILURE_EXIT_CODE);
    }

    #[test]
    fn config_failure_is_internal_and_readable() {
        let err = PluginError::from(ConfigError::InvalidBool {
            key: SettingKey::Draft,
            value: "maybe".to_owned(),
        });
        assert_eq!(err.exit_code(), INTERNAL_FAILURE_EXIT_CODE);
        assert_eq!(err.to_string(), "invalid boolean for draft: \"maybe\"");
    }

    #[test]
    fn path_failure_message_is_preserved() {
        let err = PluginError::from(PathError::NotFound {
            which: crate::settings::PathKind::CacheDirectory,
            path: Utf8PathBuf::from("cache"),
        });
        assert_eq!(err.to_string(), "no cache directory found @ cache");
    }
}
