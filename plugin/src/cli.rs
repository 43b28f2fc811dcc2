//! CLI argument definitions for the plugin.
//!
//! Every setting is an optional long flag named the way pipeline authors
//! know it (`--build.draft`, `--config.directory`, ...). Flags only carry
//! raw strings: [`crate::config`] layers them over environment variables
//! and mounted parameter files, then parses and applies defaults.

use crate::config::SettingKey;
use clap::Parser;

/// Build a static site with Hugo inside a Vela pipeline.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "vela-hugo")]
#[command(version, about)]
#[command(after_help = concat!(
    "Every option can also be set through PARAMETER_<KEY> or HUGO_<KEY>\n",
    "environment variables, or files under /vela/parameters/hugo/<key> and\n",
    "/vela/secrets/hugo/<key>, e.g. PARAMETER_DRAFT=true.\n\n",
    "Docs: https://go-vela.github.io/docs/plugins/registry/pipeline/hugo",
))]
pub struct Cli {
    /// Log level: trace, debug, info, warn, error, fatal or panic [default: info].
    #[arg(long = "log.level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Use the extended engine binary.
    #[arg(long = "hugo.extended", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub extended: Option<String>,

    /// Engine version to install, e.g. 0.110.0.
    #[arg(id = "hugo_version", long = "hugo.version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Engine version bundled with the image [default: $PLUGIN_HUGO_VERSION].
    #[arg(long = "hugo.default_version", value_name = "VERSION")]
    pub default_version: Option<String>,

    /// Path of the engine binary [default: /bin/hugo].
    #[arg(long = "hugo.binary", value_name = "PATH")]
    pub binary: Option<String>,

    /// Hostname (and path) to the root, e.g. https://example.com/.
    #[arg(long = "build.base_url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Include content marked as draft.
    #[arg(long = "build.draft", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub draft: Option<String>,

    /// Include expired content.
    #[arg(long = "build.expired", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub expired: Option<String>,

    /// Include content with a publish date in the future.
    #[arg(long = "build.future", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub future: Option<String>,

    /// Filesystem path to the cache directory.
    #[arg(long = "config.cache_directory", value_name = "DIR")]
    pub cache_directory: Option<String>,

    /// Filesystem path to the content directory.
    #[arg(long = "config.content_directory", value_name = "DIR")]
    pub content_directory: Option<String>,

    /// Filesystem path to the config directory [default: config].
    #[arg(long = "config.directory", value_name = "DIR")]
    pub config_directory: Option<String>,

    /// Build environment to use from the config directory.
    #[arg(long = "config.environment", value_name = "NAME")]
    pub environment: Option<String>,

    /// Config file name(s) in the config directory, comma separated.
    #[arg(long = "config.file", value_name = "FILE")]
    pub config_file: Option<String>,

    /// Filesystem path to the layout directory.
    #[arg(long = "config.layout_directory", value_name = "DIR")]
    pub layout_directory: Option<String>,

    /// Filesystem path to write the site to.
    #[arg(long = "config.output_directory", value_name = "DIR")]
    pub output_directory: Option<String>,

    /// Filesystem path to read the site from.
    #[arg(long = "config.source_directory", value_name = "DIR")]
    pub source_directory: Option<String>,

    /// Name of the theme in the theme directory.
    #[arg(long = "theme.name", value_name = "NAME")]
    pub theme_name: Option<String>,

    /// Filesystem path to the theme directory.
    #[arg(long = "theme.directory", value_name = "DIR")]
    pub theme_directory: Option<String>,
}

impl Cli {
    /// The value given on the command line for `key`, if any.
    #[must_use]
    pub fn flag(&self, key: SettingKey) -> Option<&str> {
        let value = match key {
            SettingKey::LogLevel => &self.log_level,
            SettingKey::Extended => &self.extended,
            SettingKey::Version => &self.version,
            SettingKey::DefaultVersion => &self.default_version,
            SettingKey::Binary => &self.binary,
            SettingKey::BaseUrl => &self.base_url,
            SettingKey::Draft => &self.draft,
            SettingKey::Expired => &self.expired,
            SettingKey::Future => &self.future,
            SettingKey::CacheDirectory => &self.cache_directory,
            SettingKey::ContentDirectory => &self.content_directory,
            SettingKey::ConfigDirectory => &self.config_directory,
            SettingKey::Environment => &self.environment,
            SettingKey::ConfigFile => &self.config_file,
            SettingKey::LayoutDirectory => &self.layout_directory,
            SettingKey::OutputDirectory => &self.output_directory,
            SettingKey::SourceDirectory => &self.source_directory,
            SettingKey::ThemeName => &self.theme_name,
            SettingKey::ThemeDirectory => &self.theme_directory,
        };
        value.as_deref()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
