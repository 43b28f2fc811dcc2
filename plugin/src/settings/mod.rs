//! Settings records consumed by the plugin and their path validation.
//!
//! Each record is plain data. Validation lives in free functions that take
//! an injected [`FileSystem`](crate::fs::FileSystem):
//!
//! - [`validate_paths`] checks [`PathSettings`].
//! - [`validate_theme`] checks [`ThemeSettings`].
//!
//! [`BuildSettings`] needs no validation.

mod build;
mod error;
mod paths;
mod theme;

pub use build::BuildSettings;
pub use error::{PathError, PathKind};
pub use paths::{PathSettings, validate_paths};
pub use theme::{DEFAULT_THEME_DIRECTORY, ThemeSettings, validate_theme};

use crate::fs::{EntryKind, FileSystem};
use camino::Utf8Path;
use std::io;

/// Require that `path` exists as an entry of the `expected` kind.
fn require(
    fs: &dyn FileSystem,
    which: PathKind,
    path: &Utf8Path,
    expected: EntryKind,
) -> Result<(), PathError> {
    log::trace!("checking {which} @ {path}");
    match fs.stat(path) {
        Ok(kind) if kind == expected => Ok(()),
        Ok(_) => Err(PathError::WrongKind {
            which,
            path: path.to_owned(),
            expected,
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(PathError::NotFound {
            which,
            path: path.to_owned(),
        }),
        Err(source) => Err(PathError::Io {
            which,
            path: path.to_owned(),
            source,
        }),
    }
}

/// Like [`require`], but skips empty settings.
fn require_if_set(
    fs: &dyn FileSystem,
    which: PathKind,
    value: &str,
    expected: EntryKind,
) -> Result<(), PathError> {
    if value.is_empty() {
        return Ok(());
    }
    require(fs, which, Utf8Path::new(value), expected)
}
