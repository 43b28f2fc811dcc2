//! The plugin: validated settings plus the engine invocation.

use crate::command::{build_args, version_args};
use crate::fs::FileSystem;
use crate::runner::{CommandRunner, EngineCommand, ExecError};
use crate::settings::{
    BuildSettings, PathError, PathSettings, ThemeSettings, validate_paths, validate_theme,
};
use camino::Utf8PathBuf;

/// Everything needed to run one engine build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    /// Content selection options.
    pub build: BuildSettings,
    /// Filesystem locations.
    pub paths: PathSettings,
    /// Theme selection.
    pub theme: ThemeSettings,
    /// Path of the engine binary.
    pub binary: Utf8PathBuf,
}

impl Plugin {
    /// Verify that every configured path exists.
    ///
    /// # Errors
    ///
    /// Returns the first [`PathError`] raised by [`validate_paths`] or
    /// [`validate_theme`], in that order.
    pub fn validate(&self, fs: &dyn FileSystem) -> Result<(), PathError> {
        log::trace!("validating plugin configuration");
        validate_paths(fs, &self.paths)?;
        validate_theme(fs, &self.theme)
    }

    /// The build invocation.
    #[must_use]
    pub fn command(&self) -> EngineCommand {
        EngineCommand::new(
            self.binary.clone(),
            build_args(&self.build, &self.paths, &self.theme),
        )
    }

    /// The version probe invocation.
    #[must_use]
    pub fn version_command(&self) -> EngineCommand {
        EngineCommand::new(self.binary.clone(), version_args())
    }

    /// Print the engine version, then build the site.
    ///
    /// # Errors
    ///
    /// Returns the first [`ExecError`]; the build is not attempted when the
    /// version probe fails.
    pub fn exec(&self, runner: &dyn CommandRunner) -> Result<(), ExecError> {
        log::trace!("running plugin with provided configuration");
        runner.run(&self.version_command())?;
        runner.run(&self.command())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PathKind;
    use crate::test_utils::{ExpectedRun, MemoryFileSystem, StubRunner};

    fn plugin() -> Plugin {
        Plugin {
            build: BuildSettings {
                include_drafts: true,
                ..BuildSettings::default()
            },
            paths: PathSettings {
                content_dir: "content".to_owned(),
                ..PathSettings::default()
            },
            theme: ThemeSettings {
                name: "docsy".to_owned(),
                directory: String::new(),
            },
            binary: Utf8PathBuf::from("/bin/hugo"),
        }
    }

    #[test]
    fn exec_probes_version_then_builds() {
        let runner = StubRunner::new(vec![
            ExpectedRun::success(&["version"]),
            ExpectedRun::success(&["--buildDrafts", "--contentDir=content", "--theme=docsy"]),
        ]);

        plugin().exec(&runner).expect("exec");

        runner.assert_finished();
        assert!(
            runner
                .received()
                .iter()
                .all(|command| command.program == "/bin/hugo")
        );
    }

    #[test]
    fn failed_version_probe_skips_build() {
        let runner = StubRunner::new(vec![ExpectedRun::failure(
            &["version"],
            ExecError::Exit {
                program: Utf8PathBuf::from("/bin/hugo"),
                code: Some(127),
            },
        )]);

        let err = plugin().exec(&runner).expect_err("probe fails");

        assert_eq!(err.exit_code(), Some(127));
        runner.assert_finished();
    }

    #[test]
    fn build_failure_is_returned() {
        let runner = StubRunner::new(vec![
            ExpectedRun::success(&["version"]),
            ExpectedRun::failure(
                &["--buildDrafts", "--contentDir=content", "--theme=docsy"],
                ExecError::Exit {
                    program: Utf8PathBuf::from("/bin/hugo"),
                    code: Some(255),
                },
            ),
        ]);

        let err = plugin().exec(&runner).expect_err("build fails");
        assert_eq!(err.exit_code(), Some(255));
    }

    #[test]
    fn validate_checks_paths_before_theme() {
        let fs = MemoryFileSystem::new();
        let err = plugin().validate(&fs).expect_err("nothing exists");
        assert_eq!(err.which(), Some(PathKind::ContentDirectory));
    }

    #[test]
    fn validate_checks_theme() {
        let fs = MemoryFileSystem::new().with_dir("content");
        let err = plugin().validate(&fs).expect_err("theme missing");
        assert_eq!(err.which(), Some(PathKind::Theme));
    }

    #[test]
    fn validate_accepts_complete_site() {
        let fs = MemoryFileSystem::new()
            .with_dir("content")
            .with_dir("themes/docsy");
        plugin().validate(&fs).expect("valid");
    }
}
