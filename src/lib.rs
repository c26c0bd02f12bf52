//! Fail fast when required environment variables are missing.
//!
//! ```no_run
//! use envguard::GuardOptions;
//!
//! // Exits the process with status 1 if either variable is unset or empty.
//! envguard::check(["PORT", "DB_URL"], GuardOptions::default()).ok();
//!
//! // Returns an error instead.
//! let result = envguard::check(["SECRET"], GuardOptions { throw_on_error: true });
//! if let Err(err) = result {
//!     eprintln!("{err}");
//! }
//! ```

mod dotenv;
mod environment;
mod error;
mod guard;

pub use dotenv::DotenvFile;
pub use environment::{Environment, Layered, ProcessEnv};
pub use error::MissingVariablesError;
pub use guard::{EXIT_STATUS, FailureHandler, Guard, GuardOptions, Report};

/// Check `required` against the environment of the current process.
///
/// Unless `options.throw_on_error` is set, missing variables terminate the process with
/// [`EXIT_STATUS`]. The missing names are written to stderr and success to stdout.
pub fn check<I, S>(required: I, options: GuardOptions) -> Result<(), MissingVariablesError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Guard::with_options(ProcessEnv, options).check(required)
}
