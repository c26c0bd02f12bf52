use std::{
    collections::{BTreeMap, HashMap},
    env,
    ffi::OsString,
};

/// A read-only view of environment variables.
///
/// Returning `None` means the variable is not set at all. An empty value is returned as an
/// empty string so callers can tell the two apart.
pub trait Environment {
    fn var(&self, key: &str) -> Option<OsString>;
}

/// The environment of the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<OsString> {
        // Keys that `set_var` would reject can never be set.
        if key.is_empty() || key.contains(['=', '\0']) {
            return None;
        }
        env::var_os(key)
    }
}

impl<S: std::hash::BuildHasher> Environment for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<OsString> {
        self.get(key).map(OsString::from)
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<OsString> {
        self.get(key).map(OsString::from)
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<OsString> {
        (**self).var(key)
    }
}

/// Look a variable up in `primary` first and only fall back to `fallback` when it is unset.
///
/// A variable that is set to the empty string in `primary` still shadows `fallback`.
#[derive(Debug, Clone)]
pub struct Layered<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> Layered<P, F> {
    #[must_use]
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Environment, F: Environment> Environment for Layered<P, F> {
    fn var(&self, key: &str) -> Option<OsString> {
        self.primary.var(key).or_else(|| self.fallback.var(key))
    }
}
