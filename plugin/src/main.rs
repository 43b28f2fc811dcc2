//! Vela Hugo plugin entrypoint.
//!
//! Resolves settings, installs a specific engine build when asked to,
//! validates the configured paths and runs the engine.

use clap::Parser;
use std::io::Write;
use vela_hugo::cli::Cli;
use vela_hugo::config::{PluginConfig, ValueSources};
use vela_hugo::error::Result;
use vela_hugo::fs::OsFileSystem;
use vela_hugo::install::{InstallOutcome, Installer};
use vela_hugo::logging;
use vela_hugo::runner::SystemCommandRunner;

const CODE_URL: &str = "https://github.com/go-vela/vela-hugo";
const DOCS_URL: &str = "https://go-vela.github.io/docs/plugins/registry/pipeline/hugo";
const REGISTRY_URL: &str = "https://hub.docker.com/r/target/vela-hugo";

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &ValueSources::default(), &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, sources: &ValueSources, stderr: &mut dyn Write) -> Result<()> {
    let config = PluginConfig::resolve(cli, sources)?;

    if let Err(err) = logging::init(logging::parse_level(&config.log_level)) {
        write_stderr_line(stderr, err);
    }
    log_banner();

    if config.wants_install() {
        let installer = Installer::system().with_layout(config.install_layout());
        match installer.install(config.extended, &config.version, &config.default_version)? {
            InstallOutcome::UsingBundled { version } => {
                log::info!("using bundled engine version {version}");
            }
            InstallOutcome::Installed { version, url } => {
                log::debug!("installed engine version {version} from {url}");
            }
        }
    }

    let plugin = config.plugin();
    plugin.validate(&OsFileSystem)?;
    plugin.exec(&SystemCommandRunner)?;
    Ok(())
}

fn log_banner() {
    log::info!(
        "Vela Hugo Plugin {} code={CODE_URL} docs={DOCS_URL} registry={REGISTRY_URL}",
        env!("CARGO_PKG_VERSION")
    );
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, &err);
            err.exit_code()
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use vela_hugo::error::PluginError;
    use vela_hugo::runner::ExecError;
    use vela_hugo::settings::PathError;

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_validation_error() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(
            Err(PluginError::from(PathError::MissingConfigDirectory)),
            &mut stderr,
        );
        assert_eq!(exit_code, 2);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert_eq!(stderr_text, "no config directory provided\n");
    }

    #[test]
    fn exit_code_for_run_result_passes_engine_status_through() {
        let err = PluginError::from(ExecError::Exit {
            program: Utf8PathBuf::from("/bin/hugo"),
            code: Some(255),
        });
        let mut stderr = Vec::new();
        assert_eq!(exit_code_for_run_result(Err(err), &mut stderr), 255);
    }

    #[test]
    fn write_stderr_line_appends_newline() {
        let mut stderr = Vec::new();
        write_stderr_line(&mut stderr, "hello");
        assert_eq!(stderr, b"hello\n");
    }
}
