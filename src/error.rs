use thiserror::Error;

/// One or more required environment variables are unset or empty.
///
/// The names are kept in the order they were requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required environment variables: {}", .missing.join(", "))]
pub struct MissingVariablesError {
    missing: Vec<String>,
}

impl MissingVariablesError {
    pub(crate) fn new(missing: Vec<String>) -> Self {
        Self { missing }
    }

    #[must_use]
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    #[must_use]
    pub fn into_missing(self) -> Vec<String> {
        self.missing
    }
}
