use std::process;

use crate::{environment::Environment, error::MissingVariablesError};

/// Exit status used when the guard terminates the process.
pub const EXIT_STATUS: i32 = 1;

const SUCCESS_MESSAGE: &str = "All required environment variables are present";

/// Options accepted by [`crate::check`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GuardOptions {
    /// Return an error instead of exiting the process.
    pub throw_on_error: bool,
}

/// What the guard does once it has found missing variables.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FailureHandler {
    /// Exit the process with [`EXIT_STATUS`].
    #[default]
    Terminate,
    /// Hand a [`MissingVariablesError`] back to the caller.
    Raise,
}

impl From<GuardOptions> for FailureHandler {
    fn from(options: GuardOptions) -> Self {
        if options.throw_on_error {
            Self::Raise
        } else {
            Self::Terminate
        }
    }
}

/// Where the guard writes its diagnostics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// Success on stdout, missing variables on stderr.
    #[default]
    Console,
    /// Through the `log` facade. The installed logger decides where they end up.
    Log,
}

/// Checks that required variables are set to a non-empty value in an [`Environment`].
#[derive(Debug, Clone)]
pub struct Guard<E> {
    env: E,
    on_failure: FailureHandler,
    report: Report,
}

impl<E: Environment> Guard<E> {
    /// Create a guard that terminates the process when variables are missing.
    #[must_use]
    pub fn new(env: E) -> Self {
        Self {
            env,
            on_failure: FailureHandler::default(),
            report: Report::default(),
        }
    }

    #[must_use]
    pub fn with_options(env: E, options: GuardOptions) -> Self {
        Self::new(env).on_failure(options.into())
    }

    #[must_use]
    pub fn on_failure(mut self, handler: FailureHandler) -> Self {
        self.on_failure = handler;
        self
    }

    #[must_use]
    pub fn report(mut self, report: Report) -> Self {
        self.report = report;
        self
    }

    /// Collect the names from `required` that are unset or set to the empty string.
    ///
    /// Order follows `required`. A name that appears twice is reported twice. Values made
    /// up only of whitespace count as set.
    pub fn missing<I, S>(&self, required: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        required
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                match self.env.var(name) {
                    Some(value) if !value.is_empty() => None,
                    Some(_) => {
                        log::debug!("{name} is set but empty");
                        Some(name.to_string())
                    }
                    None => {
                        log::debug!("{name} is not set");
                        Some(name.to_string())
                    }
                }
            })
            .collect()
    }

    /// Check that every variable in `required` is set and non-empty.
    ///
    /// With [`FailureHandler::Terminate`] this exits the process instead of returning an
    /// error.
    pub fn check<I, S>(&self, required: I) -> Result<(), MissingVariablesError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let missing = self.missing(required);
        if missing.is_empty() {
            match self.report {
                Report::Console => println!("{SUCCESS_MESSAGE}"),
                Report::Log => log::info!("{SUCCESS_MESSAGE}"),
            }
            return Ok(());
        }

        let err = MissingVariablesError::new(missing);
        match self.report {
            Report::Console => eprintln!("{err}"),
            Report::Log => log::error!("{err}"),
        }

        match self.on_failure {
            FailureHandler::Raise => Err(err),
            FailureHandler::Terminate => process::exit(EXIT_STATUS),
        }
    }
}
