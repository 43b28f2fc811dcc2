//! Filesystem locations handed to the engine.

use super::{PathError, PathKind, require, require_if_set};
use crate::fs::{EntryKind, FileSystem};
use camino::Utf8Path;

/// Directory and file settings for the engine.
///
/// Empty strings mean "not configured"; the engine then applies its own
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSettings {
    /// Filesystem path to the cache directory.
    pub cache_dir: String,
    /// Filesystem path to the content directory.
    pub content_dir: String,
    /// Filesystem path to the config directory.
    pub config_dir: String,
    /// Targeted build environment in the config directory.
    pub environment: String,
    /// Config file name(s) in the config directory, comma separated.
    pub config_file: String,
    /// Filesystem path to the layout directory.
    pub layout_dir: String,
    /// Filesystem path the engine writes the site to.
    pub output_dir: String,
    /// Filesystem path the engine reads the site from.
    pub source_dir: String,
}

impl PathSettings {
    /// Iterate over the configured config file names.
    ///
    /// The engine accepts a comma-separated list; blank entries are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use vela_hugo::settings::PathSettings;
    ///
    /// let settings = PathSettings {
    ///     config_file: "config.toml, extra.toml".to_owned(),
    ///     ..PathSettings::default()
    /// };
    /// let files: Vec<_> = settings.config_files().collect();
    /// assert_eq!(files, ["config.toml", "extra.toml"]);
    /// ```
    pub fn config_files(&self) -> impl Iterator<Item = &str> {
        self.config_file
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Verify that every configured path exists.
///
/// Checks run in a fixed order (cache, config, content, layout, source) and
/// stop at the first failure. Output directory and environment are not
/// checked: the engine creates the former and the latter is a name.
///
/// # Errors
///
/// Returns [`PathError::MissingConfigDirectory`] when a config file is
/// named without a config directory, [`PathError::NotFound`] or
/// [`PathError::WrongKind`] when a path is absent or of the wrong kind, and
/// [`PathError::Io`] when the filesystem query itself fails.
pub fn validate_paths(fs: &dyn FileSystem, settings: &PathSettings) -> Result<(), PathError> {
    log::trace!("validating config configuration");

    require_if_set(
        fs,
        PathKind::CacheDirectory,
        &settings.cache_dir,
        EntryKind::Directory,
    )?;
    validate_config_files(fs, settings)?;
    require_if_set(
        fs,
        PathKind::ContentDirectory,
        &settings.content_dir,
        EntryKind::Directory,
    )?;
    require_if_set(
        fs,
        PathKind::LayoutDirectory,
        &settings.layout_dir,
        EntryKind::Directory,
    )?;
    require_if_set(
        fs,
        PathKind::SourceDirectory,
        &settings.source_dir,
        EntryKind::Directory,
    )
}

fn validate_config_files(fs: &dyn FileSystem, settings: &PathSettings) -> Result<(), PathError> {
    if settings.config_file.is_empty() {
        return Ok(());
    }
    if settings.config_dir.is_empty() {
        return Err(PathError::MissingConfigDirectory);
    }

    let directory = Utf8Path::new(&settings.config_dir);
    require(
        fs,
        PathKind::ConfigDirectory,
        directory,
        EntryKind::Directory,
    )?;

    for name in settings.config_files() {
        require(
            fs,
            PathKind::ConfigFile,
            &directory.join(name),
            EntryKind::File,
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
