//! Theme selection.

use super::{PathError, PathKind, require, require_if_set};
use crate::fs::{EntryKind, FileSystem};
use camino::{Utf8Path, Utf8PathBuf};

/// Directory searched for themes when none is configured.
pub const DEFAULT_THEME_DIRECTORY: &str = "themes";

/// Which theme the engine should use and where to find it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeSettings {
    /// Name of the theme inside the theme directory.
    pub name: String,
    /// Filesystem path to the theme directory.
    pub directory: String,
}

impl ThemeSettings {
    /// The theme directory, falling back to [`DEFAULT_THEME_DIRECTORY`].
    #[must_use]
    pub fn effective_directory(&self) -> &Utf8Path {
        if self.directory.is_empty() {
            Utf8Path::new(DEFAULT_THEME_DIRECTORY)
        } else {
            Utf8Path::new(&self.directory)
        }
    }

    /// The path of the named theme, or `None` when no theme is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use vela_hugo::settings::ThemeSettings;
    ///
    /// let theme = ThemeSettings {
    ///     name: "docsy".to_owned(),
    ///     ..ThemeSettings::default()
    /// };
    /// assert_eq!(theme.theme_path().unwrap(), "themes/docsy");
    /// ```
    #[must_use]
    pub fn theme_path(&self) -> Option<Utf8PathBuf> {
        if self.name.is_empty() {
            None
        } else {
            Some(self.effective_directory().join(&self.name))
        }
    }
}

/// Verify that the configured theme can be found.
///
/// A configured theme directory must exist whether or not a theme name is
/// set. A theme name must resolve to a directory under the configured (or
/// default) theme directory.
///
/// # Errors
///
/// Returns [`PathError::NotFound`], [`PathError::WrongKind`] or
/// [`PathError::Io`] for the first check that fails.
pub fn validate_theme(fs: &dyn FileSystem, settings: &ThemeSettings) -> Result<(), PathError> {
    log::trace!("validating theme configuration");

    require_if_set(
        fs,
        PathKind::ThemeDirectory,
        &settings.directory,
        EntryKind::Directory,
    )?;

    match settings.theme_path() {
        Some(path) => require(fs, PathKind::Theme, &path, EntryKind::Directory),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemoryFileSystem;
    use rstest::rstest;

    fn theme(name: &str, directory: &str) -> ThemeSettings {
        ThemeSettings {
            name: name.to_owned(),
            directory: directory.to_owned(),
        }
    }

    #[test]
    fn empty_theme_settings_are_valid() {
        validate_theme(&MemoryFileSystem::new(), &ThemeSettings::default())
            .expect("nothing to check");
    }

    #[rstest]
    #[case::default_directory("docsy", "", "themes/docsy")]
    #[case::custom_directory("docsy", "/site/themes", "/site/themes/docsy")]
    fn existing_theme_is_valid(#[case] name: &str, #[case] directory: &str, #[case] path: &str) {
        let fs = MemoryFileSystem::new().with_dir(path);
        validate_theme(&fs, &theme(name, directory)).expect("theme exists");
    }

    #[test]
    fn missing_theme_in_default_directory_fails() {
        let fs = MemoryFileSystem::new().with_dir("themes/ananke");

        let err = validate_theme(&fs, &theme("docsy", "")).expect_err("theme is missing");
        assert_eq!(err.to_string(), "no theme found @ themes/docsy");
    }

    #[test]
    fn missing_theme_directory_is_checked_before_theme() {
        let err = validate_theme(&MemoryFileSystem::new(), &theme("docsy", "/site/themes"))
            .expect_err("directory is missing");
        assert!(matches!(
            err,
            PathError::NotFound {
                which: PathKind::ThemeDirectory,
                ..
            }
        ));
    }

    #[test]
    fn theme_directory_is_checked_without_a_name() {
        let err = validate_theme(&MemoryFileSystem::new(), &theme("", "/site/themes"))
            .expect_err("directory is missing");
        assert_eq!(err.which(), Some(PathKind::ThemeDirectory));
    }

    #[test]
    fn theme_path_is_none_without_name() {
        assert!(theme("", "themes").theme_path().is_none());
    }
}
