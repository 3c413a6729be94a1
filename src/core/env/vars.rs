use super::EnvError;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::env;
use std::ffi::{OsStr, OsString};

/// The interpreter's environment. Children receive a copy of it at spawn
/// time; the process environment itself is never written.
///
/// Entries are kept as raw OS strings so variables that are not valid UTF-8
/// still reach children byte for byte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvVarManager {
    vars: BTreeMap<OsString, OsString>,
}

impl EnvVarManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the manager from the environment this process was started with.
    pub fn from_process() -> Self {
        Self {
            vars: env::vars_os().collect(),
        }
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() || name.contains('=') || name.contains('\0') || value.contains('\0') {
            return Err(EnvError::InvalidName);
        }

        self.vars.insert(OsString::from(name), OsString::from(value));
        Ok(())
    }

    /// Looks up a variable whose value is valid UTF-8.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(OsStr::new(name)).and_then(|v| v.to_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Substitutes a whole-token `$NAME` reference. Unset names expand to
    /// the empty string; tokens without a leading `$` come back untouched.
    /// Non-UTF-8 values are rendered lossily.
    pub fn expand_token<'a>(&'a self, token: &'a str) -> Cow<'a, str> {
        match token.strip_prefix('$') {
            Some(name) => self
                .vars
                .get(OsStr::new(name))
                .map(|v| v.to_string_lossy())
                .unwrap_or(Cow::Borrowed("")),
            None => Cow::Borrowed(token),
        }
    }
}
