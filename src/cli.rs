use std::{
    env,
    path::PathBuf,
    process::{Command, ExitCode},
};

use anyhow::{Context, Result};
use clap::Parser;
use envguard::{DotenvFile, Environment, FailureHandler, Guard, Layered, ProcessEnv, Report};

use crate::config;

/// The default log level.
///
/// 2 corresponds to the level INFO.
const DEFAULT_LOG_LEVEL: usize = 2;

/// Fail unless the required environment variables are set and non-empty
///
/// Variables are looked up in the process environment first and then in the env file.
#[derive(Parser)]
#[command(version)]
pub struct Cli {
    /// Silence all output
    #[arg(short, long)]
    quiet: bool,
    /// Verbose mode (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Env file to load instead of ./.env
    ///
    /// Defaults to `$ENVGUARD_ENV_FILE` if that is set.
    #[arg(short, long, value_name = "PATH")]
    env_file: Option<PathBuf>,
    /// Do not load any env file
    #[arg(long, conflicts_with = "env_file")]
    no_env_file: bool,
    /// Report missing variables as an error instead of exiting from the check
    #[arg(long)]
    no_exit: bool,
    /// Names of the required variables
    ///
    /// Names listed in `$ENVGUARD_REQUIRED` (comma-separated) are added to these.
    #[arg(value_name = "NAME")]
    names: Vec<String>,
    /// Command to run once all variables are present
    #[arg(last = true, value_name = "COMMAND")]
    command: Vec<String>,
}

impl Cli {
    pub fn init(module: &str) -> ExitCode {
        let cli = Self::parse();

        let _ = stderrlog::new()
            .module(module)
            .show_level(false)
            .quiet(cli.quiet)
            .verbosity(DEFAULT_LOG_LEVEL + usize::from(cli.verbose))
            .init();

        match cli.call() {
            Ok(code) => code,
            Err(err) => {
                // When at least one -v is added, the source of the error is also printed.
                if DEFAULT_LOG_LEVEL + usize::from(cli.verbose) >= 3 {
                    log::error!("{err:#}");
                } else {
                    log::error!("{err}");
                }
                ExitCode::FAILURE
            }
        }
    }

    fn call(&self) -> Result<ExitCode> {
        let env_file = self.load_env_file()?;

        let mut required = self.names.clone();
        required.extend(config::required_from_env());
        if required.is_empty() {
            log::warn!("No required variables given");
        }

        let on_failure = if self.no_exit {
            FailureHandler::Raise
        } else {
            FailureHandler::Terminate
        };

        let env = Layered::new(ProcessEnv, &env_file);
        // Diagnostics stay on stderr so stdout belongs to the command.
        let guard = Guard::new(env).on_failure(on_failure).report(Report::Log);
        // The guard has already reported the missing variables.
        if guard.check(&required).is_err() {
            return Ok(ExitCode::FAILURE);
        }

        match self.command.split_first() {
            Some((program, args)) => run(program, args, &env_file),
            None => Ok(ExitCode::SUCCESS),
        }
    }

    fn load_env_file(&self) -> Result<DotenvFile> {
        if self.no_env_file {
            return Ok(DotenvFile::default());
        }

        if let Some(path) = self.env_file.clone().or_else(config::env_file_from_env) {
            let file = DotenvFile::from_path(&path)
                .with_context(|| format!("Failed to read env file {}", path.display()))?;
            log::debug!("Loaded {}", path.display());
            return Ok(file);
        }

        let directory = env::current_dir().context("Failed to determine current directory")?;
        let file = DotenvFile::find(&directory).with_context(|| {
            format!(
                "Failed to read env file {}",
                DotenvFile::path_in(&directory).display()
            )
        })?;

        match file {
            Some(file) => {
                log::debug!("Loaded {}", file.path().display());
                Ok(file)
            }
            None => Ok(DotenvFile::default()),
        }
    }
}

/// Run `program` with the entries of `env_file` that the process environment does not set.
fn run(program: &str, args: &[String], env_file: &DotenvFile) -> Result<ExitCode> {
    let mut command = Command::new(program);
    command.args(args);
    for (key, value) in env_file.iter() {
        if ProcessEnv.var(key).is_none() {
            command.env(key, value);
        }
    }

    log::debug!("Running {program}");
    let status = command
        .status()
        .with_context(|| format!("Failed to execute {program}"))?;

    // Killed by a signal or an exit code that does not fit into u8.
    Ok(status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .map_or(ExitCode::FAILURE, ExitCode::from))
}
