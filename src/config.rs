use std::{env, path::PathBuf};

/// Comma-separated list of variable names that are always required.
pub const REQUIRED_VAR: &str = "ENVGUARD_REQUIRED";

/// Path to the env file loaded when `--env-file` is not given.
pub const ENV_FILE_VAR: &str = "ENVGUARD_ENV_FILE";

/// Read the names listed in `ENVGUARD_REQUIRED`.
pub fn required_from_env() -> Vec<String> {
    env::var(REQUIRED_VAR)
        .map(|list| split_names(&list))
        .unwrap_or_default()
}

/// Read the env file path configured via `ENVGUARD_ENV_FILE`.
///
/// An empty value counts as unset.
pub fn env_file_from_env() -> Option<PathBuf> {
    env::var_os(ENV_FILE_VAR)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}
