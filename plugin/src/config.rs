//! Layered plugin configuration.
//!
//! Each setting is looked up, in order, from:
//!
//! 1. its command-line flag;
//! 2. the `PARAMETER_<KEY>` environment variable (pipeline `parameters:`);
//! 3. the `HUGO_<KEY>` environment variable;
//! 4. the file `<root>/parameters/hugo/<key>`;
//! 5. the file `<root>/secrets/hugo/<key>`;
//! 6. its built-in default.
//!
//! Blank values at any layer count as unset and file contents are trimmed.
//! The config directory is the exception: a flag or environment variable
//! given as blank clears its default.
//! The bundled engine version is the exception: it comes from
//! `--hugo.default_version` or the image's `PLUGIN_HUGO_VERSION` variable.

use crate::cli::Cli;
use crate::install::InstallLayout;
use crate::plugin::Plugin;
use crate::settings::{BuildSettings, PathSettings, ThemeSettings};
use crate::version::DEFAULT_ENGINE_VERSION;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::io;
use thiserror::Error;

/// Directory the Vela worker mounts parameter and secret files under.
pub const VELA_ROOT: &str = "/vela";

/// Environment variable naming the engine version baked into the image.
pub const BUNDLED_VERSION_VAR: &str = "PLUGIN_HUGO_VERSION";

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_CONFIG_DIRECTORY: &str = "config";
const DEFAULT_BINARY: &str = "/bin/hugo";
const SCRATCH_DIR_NAME: &str = "download";

/// A configurable setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// `--log.level`
    LogLevel,
    /// `--hugo.extended`
    Extended,
    /// `--hugo.version`
    Version,
    /// `--hugo.default_version`
    DefaultVersion,
    /// `--hugo.binary`
    Binary,
    /// `--build.base_url`
    BaseUrl,
    /// `--build.draft`
    Draft,
    /// `--build.expired`
    Expired,
    /// `--build.future`
    Future,
    /// `--config.cache_directory`
    CacheDirectory,
    /// `--config.content_directory`
    ContentDirectory,
    /// `--config.directory`
    ConfigDirectory,
    /// `--config.environment`
    Environment,
    /// `--config.file`
    ConfigFile,
    /// `--config.layout_directory`
    LayoutDirectory,
    /// `--config.output_directory`
    OutputDirectory,
    /// `--config.source_directory`
    SourceDirectory,
    /// `--theme.name`
    ThemeName,
    /// `--theme.directory`
    ThemeDirectory,
}

impl SettingKey {
    /// Every setting, in flag order.
    pub const ALL: [Self; 19] = [
        Self::LogLevel,
        Self::Extended,
        Self::Version,
        Self::DefaultVersion,
        Self::Binary,
        Self::BaseUrl,
        Self::Draft,
        Self::Expired,
        Self::Future,
        Self::CacheDirectory,
        Self::ContentDirectory,
        Self::ConfigDirectory,
        Self::Environment,
        Self::ConfigFile,
        Self::LayoutDirectory,
        Self::OutputDirectory,
        Self::SourceDirectory,
        Self::ThemeName,
        Self::ThemeDirectory,
    ];

    /// The key used in environment variable and file names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LogLevel => "log_level",
            Self::Extended => "extended",
            Self::Version => "version",
            Self::DefaultVersion => "default_version",
            Self::Binary => "binary",
            Self::BaseUrl => "base_url",
            Self::Draft => "draft",
            Self::Expired => "expired",
            Self::Future => "future",
            Self::CacheDirectory => "cache_directory",
            Self::ContentDirectory => "content_directory",
            Self::ConfigDirectory => "config_directory",
            Self::Environment => "environment",
            Self::ConfigFile => "config_file",
            Self::LayoutDirectory => "layout_directory",
            Self::OutputDirectory => "output_directory",
            Self::SourceDirectory => "source_directory",
            Self::ThemeName => "theme_name",
            Self::ThemeDirectory => "theme_directory",
        }
    }

    /// Environment variables consulted for this setting, highest priority
    /// first.
    ///
    /// # Examples
    ///
    /// ```
    /// use vela_hugo::config::SettingKey;
    ///
    /// assert_eq!(
    ///     SettingKey::BaseUrl.env_vars(),
    ///     ["PARAMETER_BASE_URL", "HUGO_BASE_URL"]
    /// );
    /// ```
    #[must_use]
    pub fn env_vars(self) -> Vec<String> {
        if self == Self::DefaultVersion {
            return vec![BUNDLED_VERSION_VAR.to_owned()];
        }
        let suffix = self.name().to_ascii_uppercase();
        vec![format!("PARAMETER_{suffix}"), format!("HUGO_{suffix}")]
    }

    /// Whether mounted parameter and secret files are consulted.
    #[must_use]
    pub const fn reads_files(self) -> bool {
        !matches!(self, Self::DefaultVersion)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors arising from configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A boolean setting holds something other than a boolean.
    #[error("invalid boolean for {key}: {value:?}")]
    InvalidBool {
        /// The setting.
        key: SettingKey,
        /// The rejected value.
        value: String,
    },
}

/// Environment variables and mounted files a setting can come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSources {
    root: Utf8PathBuf,
}

impl Default for ValueSources {
    fn default() -> Self {
        Self::new(VELA_ROOT)
    }
}

impl ValueSources {
    /// Read files beneath `root` instead of [`VELA_ROOT`].
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the pipeline parameter file for `key`.
    #[must_use]
    pub fn parameter_path(&self, key: SettingKey) -> Utf8PathBuf {
        self.root.join("parameters/hugo").join(key.name())
    }

    /// Path of the secret file for `key`.
    #[must_use]
    pub fn secret_path(&self, key: SettingKey) -> Utf8PathBuf {
        self.root.join("secrets/hugo").join(key.name())
    }

    /// The first non-blank value for `key` from the environment or files.
    #[must_use]
    pub fn lookup(&self, key: SettingKey) -> Option<String> {
        let from_env = key
            .env_vars()
            .into_iter()
            .find_map(|var| std::env::var(&var).ok().and_then(non_blank));
        if from_env.is_some() || !key.reads_files() {
            return from_env;
        }
        self.lookup_files(key)
    }

    /// Like [`lookup`](Self::lookup), except that an environment variable
    /// set to a blank value is returned as `Some("")` instead of falling
    /// through to files and defaults.
    #[must_use]
    pub fn lookup_explicit(&self, key: SettingKey) -> Option<String> {
        let from_env = key
            .env_vars()
            .into_iter()
            .find_map(|var| std::env::var(&var).ok())
            .map(|value| value.trim().to_owned());
        if from_env.is_some() || !key.reads_files() {
            return from_env;
        }
        self.lookup_files(key)
    }

    fn lookup_files(&self, key: SettingKey) -> Option<String> {
        read_value_file(&self.parameter_path(key))
            .or_else(|| read_value_file(&self.secret_path(key)))
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn read_value_file(path: &Utf8Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => non_blank(contents.trim().to_owned()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            log::warn!("ignoring unreadable setting file {path}: {err}");
            None
        }
    }
}

/// Parse a boolean setting.
///
/// Accepts `true/false`, `1/0`, `yes/no`, `on/off`, `t/f` and `y/n` in any
/// case.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBool`] for anything else.
///
/// # Examples
///
/// ```
/// use vela_hugo::config::{SettingKey, parse_bool};
///
/// assert_eq!(parse_bool(SettingKey::Draft, "Yes"), Ok(true));
/// assert!(parse_bool(SettingKey::Draft, "maybe").is_err());
/// ```
pub fn parse_bool(key: SettingKey, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Ok(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_owned(),
        }),
    }
}

/// Fully resolved plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    /// Requested log level, unparsed.
    pub log_level: String,
    /// Whether the extended engine binary is wanted.
    pub extended: bool,
    /// Requested engine version; empty for the bundled one.
    pub version: String,
    /// Engine version bundled with the image.
    pub default_version: String,
    /// Path of the engine binary.
    pub binary: Utf8PathBuf,
    /// Content selection options.
    pub build: BuildSettings,
    /// Filesystem locations.
    pub paths: PathSettings,
    /// Theme selection.
    pub theme: ThemeSettings,
}

impl PluginConfig {
    /// Resolve every setting from `cli`, then `sources`, then defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBool`] when a boolean setting does not
    /// parse.
    pub fn resolve(cli: &Cli, sources: &ValueSources) -> Result<Self, ConfigError> {
        let layers = Layers { cli, sources };

        Ok(Self {
            log_level: layers.string_or(SettingKey::LogLevel, DEFAULT_LOG_LEVEL),
            extended: layers.boolean(SettingKey::Extended)?,
            version: layers.string(SettingKey::Version),
            default_version: layers.string_or(SettingKey::DefaultVersion, DEFAULT_ENGINE_VERSION),
            binary: Utf8PathBuf::from(layers.string_or(SettingKey::Binary, DEFAULT_BINARY)),
            build: BuildSettings {
                base_url: layers.string(SettingKey::BaseUrl),
                include_drafts: layers.boolean(SettingKey::Draft)?,
                include_expired: layers.boolean(SettingKey::Expired)?,
                include_future: layers.boolean(SettingKey::Future)?,
            },
            paths: PathSettings {
                cache_dir: layers.string(SettingKey::CacheDirectory),
                content_dir: layers.string(SettingKey::ContentDirectory),
                config_dir: layers
                    .explicit_or(SettingKey::ConfigDirectory, DEFAULT_CONFIG_DIRECTORY),
                environment: layers.string(SettingKey::Environment),
                config_file: layers.string(SettingKey::ConfigFile),
                layout_dir: layers.string(SettingKey::LayoutDirectory),
                output_dir: layers.string(SettingKey::OutputDirectory),
                source_dir: layers.string(SettingKey::SourceDirectory),
            },
            theme: ThemeSettings {
                name: layers.string(SettingKey::ThemeName),
                directory: layers.string(SettingKey::ThemeDirectory),
            },
        })
    }

    /// Whether the install step should run: a version was asked for or the
    /// extended binary is wanted.
    #[must_use]
    pub fn wants_install(&self) -> bool {
        !self.version.trim().is_empty() || self.extended
    }

    /// Install paths for the configured binary.
    ///
    /// Archives are unpacked into a `download` directory next to the binary.
    #[must_use]
    pub fn install_layout(&self) -> InstallLayout {
        let scratch_dir = self
            .binary
            .parent()
            .map_or_else(|| Utf8PathBuf::from(SCRATCH_DIR_NAME), |parent| {
                parent.join(SCRATCH_DIR_NAME)
            });
        InstallLayout {
            binary: self.binary.clone(),
            scratch_dir,
        }
    }

    /// The plugin described by this configuration.
    #[must_use]
    pub fn plugin(&self) -> Plugin {
        Plugin {
            build: self.build.clone(),
            paths: self.paths.clone(),
            theme: self.theme.clone(),
            binary: self.binary.clone(),
        }
    }
}

struct Layers<'a> {
    cli: &'a Cli,
    sources: &'a ValueSources,
}

impl Layers<'_> {
    fn lookup(&self, key: SettingKey) -> Option<String> {
        let value = self
            .cli
            .flag(key)
            .map(str::to_owned)
            .and_then(non_blank)
            .or_else(|| self.sources.lookup(key));
        // Values may come from secrets; only the key is logged.
        if value.is_some() {
            log::trace!("{key} is set");
        }
        value
    }

    /// A flag or environment variable given as blank overrides `default`.
    fn explicit_or(&self, key: SettingKey, default: &str) -> String {
        let value = match self.cli.flag(key) {
            Some(flag) => Some(flag.trim().to_owned()),
            None => self.sources.lookup_explicit(key),
        };
        if value.is_some() {
            log::trace!("{key} is set");
        }
        value.unwrap_or_else(|| default.to_owned())
    }

    fn string(&self, key: SettingKey) -> String {
        self.lookup(key).unwrap_or_default()
    }

    fn string_or(&self, key: SettingKey, default: &str) -> String {
        self.lookup(key).unwrap_or_else(|| default.to_owned())
    }

    fn boolean(&self, key: SettingKey) -> Result<bool, ConfigError> {
        self.lookup(key)
            .map_or(Ok(false), |value| parse_bool(key, &value))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
