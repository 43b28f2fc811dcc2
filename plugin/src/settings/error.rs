//! Errors raised while validating configured paths.

use crate::fs::EntryKind;
use camino::Utf8PathBuf;
use std::fmt;
use thiserror::Error;

/// The configured setting a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// `config.cache_directory`
    CacheDirectory,
    /// `config.directory`
    ConfigDirectory,
    /// `config.file`, joined onto the config directory.
    ConfigFile,
    /// `config.content_directory`
    ContentDirectory,
    /// `config.layout_directory`
    LayoutDirectory,
    /// `config.source_directory`
    SourceDirectory,
    /// `theme.directory`
    ThemeDirectory,
    /// `theme.name`, joined onto the theme directory.
    Theme,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CacheDirectory => "cache directory",
            Self::ConfigDirectory => "config directory",
            Self::ConfigFile => "config",
            Self::ContentDirectory => "content directory",
            Self::LayoutDirectory => "layout directory",
            Self::SourceDirectory => "source directory",
            Self::ThemeDirectory => "theme directory",
            Self::Theme => "theme",
        };
        f.write_str(name)
    }
}

/// Errors arising from path validation.
#[derive(Debug, Error)]
pub enum PathError {
    /// A config file was named but no config directory was configured.
    #[error("no config directory provided")]
    MissingConfigDirectory,

    /// The configured path does not exist.
    #[error("no {which} found @ {path}")]
    NotFound {
        /// The setting the path came from.
        which: PathKind,
        /// The path that was checked.
        path: Utf8PathBuf,
    },

    /// The configured path exists but is the wrong kind of entry.
    #[error("{which} @ {path} is not a {expected}")]
    WrongKind {
        /// The setting the path came from.
        which: PathKind,
        /// The path that was checked.
        path: Utf8PathBuf,
        /// The kind of entry the setting requires.
        expected: EntryKind,
    },

    /// Inspecting the path failed for a reason other than absence.
    #[error("unable to inspect {which} @ {path}")]
    Io {
        /// The setting the path came from.
        which: PathKind,
        /// The path that was checked.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl PathError {
    /// The setting that failed validation, when one is known.
    #[must_use]
    pub fn which(&self) -> Option<PathKind> {
        match self {
            Self::MissingConfigDirectory => Some(PathKind::ConfigDirectory),
            Self::NotFound { which, .. }
            | Self::WrongKind { which, .. }
            | Self::Io { which, .. } => Some(*which),
        }
    }
}
