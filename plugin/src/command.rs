//! Engine command-line assembly.
//!
//! Flags are emitted in a fixed order and only when their setting is
//! non-empty (or true), so the same settings always produce the same argv.

use crate::settings::{BuildSettings, PathSettings, ThemeSettings};

/// Subcommand that prints the engine version.
const VERSION_SUBCOMMAND: &str = "version";

/// Arguments for the engine build.
///
/// # Examples
///
/// ```
/// use vela_hugo::command::build_args;
/// use vela_hugo::settings::{BuildSettings, PathSettings, ThemeSettings};
///
/// let build = BuildSettings {
///     include_drafts: true,
///     ..BuildSettings::default()
/// };
/// let paths = PathSettings {
///     output_dir: "public".to_owned(),
///     ..PathSettings::default()
/// };
/// let args = build_args(&build, &paths, &ThemeSettings::default());
/// assert_eq!(args, ["--buildDrafts", "--destination=public"]);
/// ```
#[must_use]
pub fn build_args(
    build: &BuildSettings,
    paths: &PathSettings,
    theme: &ThemeSettings,
) -> Vec<String> {
    let mut args = ArgList::default();

    args.value("baseURL", &build.base_url);
    args.switch("buildDrafts", build.include_drafts);
    args.switch("buildExpired", build.include_expired);
    args.switch("buildFuture", build.include_future);
    args.value("cacheDir", &paths.cache_dir);
    args.value("config", &paths.config_file);
    args.value("configDir", &paths.config_dir);
    args.value("contentDir", &paths.content_dir);
    args.value("environment", &paths.environment);
    args.value("layoutDir", &paths.layout_dir);
    args.value("destination", &paths.output_dir);
    args.value("source", &paths.source_dir);
    args.value("theme", &theme.name);
    args.value("themesDir", &theme.directory);

    args.0
}

/// Arguments for the version probe.
#[must_use]
pub fn version_args() -> Vec<String> {
    vec![VERSION_SUBCOMMAND.to_owned()]
}

#[derive(Default)]
struct ArgList(Vec<String>);

impl ArgList {
    fn value(&mut self, flag: &str, value: &str) {
        if !value.is_empty() {
            self.0.push(format!("--{flag}={value}"));
        }
    }

    fn switch(&mut self, flag: &str, enabled: bool) {
        if enabled {
            self.0.push(format!("--{flag}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn all_settings() -> (BuildSettings, PathSettings, ThemeSettings) {
        (
            BuildSettings {
                base_url: "https://example.com/".to_owned(),
                include_drafts: true,
                include_expired: true,
                include_future: true,
            },
            PathSettings {
                cache_dir: "cache".to_owned(),
                content_dir: "content".to_owned(),
                config_dir: "config".to_owned(),
                environment: "production".to_owned(),
                config_file: "config.toml".to_owned(),
                layout_dir: "layouts".to_owned(),
                output_dir: "public".to_owned(),
                source_dir: "site".to_owned(),
            },
            ThemeSettings {
                name: "docsy".to_owned(),
                directory: "themes".to_owned(),
            },
        )
    }

    #[test]
    fn every_flag_in_order() {
        let (build, paths, theme) = all_settings();
        assert_eq!(
            build_args(&build, &paths, &theme),
            [
                "--baseURL=https://example.com/",
                "--buildDrafts",
                "--buildExpired",
                "--buildFuture",
                "--cacheDir=cache",
                "--config=config.toml",
                "--configDir=config",
                "--contentDir=content",
                "--environment=production",
                "--layoutDir=layouts",
                "--destination=public",
                "--source=site",
                "--theme=docsy",
                "--themesDir=themes",
            ]
        );
    }

    #[test]
    fn empty_settings_produce_no_flags() {
        let args = build_args(
            &BuildSettings::default(),
            &PathSettings::default(),
            &ThemeSettings::default(),
        );
        assert!(args.is_empty());
    }

    #[rstest]
    #[case::drafts(|b: &mut BuildSettings, _: &mut PathSettings| b.include_drafts = true, "--buildDrafts")]
    #[case::future(|b: &mut BuildSettings, _: &mut PathSettings| b.include_future = true, "--buildFuture")]
    #[case::cache(|_: &mut BuildSettings, p: &mut PathSettings| p.cache_dir = "/tmp/cache".to_owned(), "--cacheDir=/tmp/cache")]
    #[case::environment(|_: &mut BuildSettings, p: &mut PathSettings| p.environment = "staging".to_owned(), "--environment=staging")]
    fn single_setting_yields_single_flag(
        #[case] set: fn(&mut BuildSettings, &mut PathSettings),
        #[case] expected: &str,
    ) {
        let mut build = BuildSettings::default();
        let mut paths = PathSettings::default();
        set(&mut build, &mut paths);
        assert_eq!(
            build_args(&build, &paths, &ThemeSettings::default()),
            [expected]
        );
    }

    #[test]
    fn values_are_not_shell_quoted() {
        let paths = PathSettings {
            source_dir: "my site; rm -rf /".to_owned(),
            ..PathSettings::default()
        };
        let args = build_args(&BuildSettings::default(), &paths, &ThemeSettings::default());
        assert_eq!(args, ["--source=my site; rm -rf /"]);
    }

    #[test]
    fn version_probe_args() {
        assert_eq!(version_args(), ["version"]);
    }
}
