use std::{
    collections::BTreeMap,
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::environment::Environment;

/// Variables read from a `.env` file.
///
/// Loading a file never touches the environment of the current process. Combine it with
/// [`crate::ProcessEnv`] through [`crate::Layered`] to check both.
#[derive(Debug, Default, Clone)]
pub struct DotenvFile {
    path: PathBuf,
    vars: BTreeMap<String, String>,
}

impl DotenvFile {
    const FILENAME: &'static str = ".env";

    /// Parse the file at `path`.
    ///
    /// When a key appears more than once, the last value wins.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, dotenvy::Error> {
        let path = path.as_ref();
        let mut vars = BTreeMap::new();
        for entry in dotenvy::from_path_iter(path)? {
            let (key, value) = entry?;
            vars.insert(key, value);
        }
        log::debug!("Read {} variables from {}", vars.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            vars,
        })
    }

    /// Load `.env` from `directory` if it exists.
    pub fn find(directory: impl AsRef<Path>) -> Result<Option<Self>, dotenvy::Error> {
        match Self::from_path(Self::path_in(directory)) {
            Ok(file) => Ok(Some(file)),
            Err(err) if err.not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    #[must_use]
    pub fn path_in(directory: impl AsRef<Path>) -> PathBuf {
        directory.as_ref().join(Self::FILENAME)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Environment for DotenvFile {
    fn var(&self, key: &str) -> Option<OsString> {
        self.vars.var(key)
    }
}
