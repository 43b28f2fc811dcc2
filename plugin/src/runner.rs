//! Engine process execution.
//!
//! The engine writes its own progress to the pipeline log, so commands run
//! with inherited stdio and only the exit status is inspected.

use camino::Utf8PathBuf;
use std::fmt;
use std::io;
use std::process::{Command, Stdio};
use thiserror::Error;

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    /// Path of the executable.
    pub program: Utf8PathBuf,
    /// Arguments, passed verbatim without shell interpretation.
    pub args: Vec<String>,
}

impl EngineCommand {
    /// Create a command running `program` with `args`.
    #[must_use]
    pub fn new(program: impl Into<Utf8PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Errors arising from running a command.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The process could not be started.
    #[error("unable to start {program}: {source}")]
    Spawn {
        /// The program that failed to start.
        program: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The process exited unsuccessfully.
    #[error("{program} exited with {}", ExitDescription(.code))]
    Exit {
        /// The program that failed.
        program: Utf8PathBuf,
        /// The exit code, or `None` when terminated by a signal.
        code: Option<i32>,
    },
}

impl ExecError {
    /// The exit code reported by the process, if it exited normally.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exit { code, .. } => *code,
            Self::Spawn { .. } => None,
        }
    }
}

struct ExitDescription<'a>(&'a Option<i32>);

impl fmt::Display for ExitDescription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "status {code}"),
            None => write!(f, "a signal"),
        }
    }
}

/// Runs engine commands.
pub trait CommandRunner {
    /// Run `command` to completion.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::Spawn`] if the process cannot start and
    /// [`ExecError::Exit`] if it exits with a non-zero status.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use vela_hugo::runner::{CommandRunner, EngineCommand, SystemCommandRunner};
    ///
    /// let command = EngineCommand::new("/bin/hugo", vec!["version".to_owned()]);
    /// SystemCommandRunner.run(&command)?;
    /// # Ok::<(), vela_hugo::runner::ExecError>(())
    /// ```
    fn run(&self, command: &EngineCommand) -> Result<(), ExecError>;
}

/// Runs commands on the host with inherited stdin, stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, command: &EngineCommand) -> Result<(), ExecError> {
        log::debug!("running {command}");
        let status = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ExecError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ExecError::Exit {
                program: command.program.clone(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_command_line() {
        let command = EngineCommand::new(
            "/bin/hugo",
            vec!["--buildDrafts".to_owned(), "--source=site".to_owned()],
        );
        assert_eq!(command.to_string(), "/bin/hugo --buildDrafts --source=site");
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let temp = tempfile::tempdir().expect("temp dir");
        let program = Utf8PathBuf::try_from(temp.path().join("absent")).expect("UTF-8 path");
        let err = SystemCommandRunner
            .run(&EngineCommand::new(program, Vec::new()))
            .expect_err("missing program");
        assert!(matches!(err, ExecError::Spawn { .. }));
        assert_eq!(err.exit_code(), None);
    }

    #[cfg(unix)]
    #[test]
    fn successful_program_succeeds() {
        SystemCommandRunner
            .run(&EngineCommand::new("/bin/sh", vec!["-c".to_owned(), "exit 0".to_owned()]))
            .expect("exit 0");
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_is_reported() {
        let err = SystemCommandRunner
            .run(&EngineCommand::new("/bin/sh", vec!["-c".to_owned(), "exit 3".to_owned()]))
            .expect_err("exit 3");
        assert_eq!(err.exit_code(), Some(3));
        assert!(err.to_string().contains("status 3"));
    }

    #[test]
    fn signal_is_described() {
        let err = ExecError::Exit {
            program: Utf8PathBuf::from("/bin/hugo"),
            code: None,
        };
        assert_eq!(err.to_string(), "/bin/hugo exited with a signal");
    }
}
