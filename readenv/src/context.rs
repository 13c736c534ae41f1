//! Per-read resolution context

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::coerce::{self, FromRaw};
use crate::dotenv;
use crate::error::{ReadEnvError, Result};
use crate::field::Field;
use crate::read::ReadOptions;
use crate::source::{self, Lookup};

/// Everything needed to resolve fields during one read.
///
/// Holds the secrets directory, the parsed dotenv file and a snapshot of the
/// process environment taken when the context was created. None of it
/// changes while fields are resolved.
#[derive(Clone)]
pub struct Context {
    default_files_location: PathBuf,
    dotenv: HashMap<String, String>,
    env: HashMap<String, String>,
}

impl Context {
    /// Build a context from read options and the current process environment.
    ///
    /// A dotenv path that does not exist is ignored. A dotenv file that
    /// exists is parsed completely before any field is resolved.
    pub fn new(options: &ReadOptions) -> Result<Self> {
        let dotenv = match options.get_dotenv_path() {
            Some(path) if path.exists() => {
                let vars = dotenv::from_path(path)?;
                tracing::debug!(path = %path.display(), count = vars.len(), "loaded dotenv file");
                vars
            }
            Some(path) => {
                tracing::debug!(path = %path.display(), "dotenv file not found, skipping");
                HashMap::new()
            }
            None => HashMap::new(),
        };

        Ok(Self::from_parts(
            options.get_default_files_location(),
            dotenv,
            snapshot_env(),
        ))
    }

    /// Build a context from explicit parts, without touching the process.
    pub fn from_parts(
        default_files_location: impl Into<PathBuf>,
        dotenv: HashMap<String, String>,
        env: HashMap<String, String>,
    ) -> Self {
        Self {
            default_files_location: default_files_location.into(),
            dotenv,
            env,
        }
    }

    pub fn default_files_location(&self) -> &Path {
        &self.default_files_location
    }

    pub fn dotenv_var(&self, key: &str) -> Option<&str> {
        self.dotenv.get(key).map(String::as_str)
    }

    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// Probe the sources of `field` without converting anything.
    pub fn lookup(&self, field: &Field) -> Lookup {
        let lookup = source::resolve(field, self);
        match &lookup {
            Lookup::Found(resolved) => {
                tracing::debug!(field = field.name(), source = %resolved.source, "resolved field");
            }
            Lookup::NotFound { .. } => {
                tracing::debug!(field = field.name(), "no value found");
            }
        }
        lookup
    }

    /// Resolve a field that must have a value.
    pub fn required<T: FromRaw>(&self, field: &Field) -> Result<T> {
        match self.lookup(field) {
            Lookup::Found(resolved) => coerce::coerce(field.name(), &resolved.raw),
            Lookup::NotFound { searched } => Err(missing(field, searched)),
        }
    }

    /// Resolve a required field with a custom converter.
    pub fn required_with<T, E, F>(&self, field: &Field, converter: F) -> Result<T>
    where
        F: FnOnce(&str) -> std::result::Result<T, E>,
        E: fmt::Display,
    {
        match self.lookup(field) {
            Lookup::Found(resolved) => coerce::coerce_with(field.name(), &resolved.raw, converter),
            Lookup::NotFound { searched } => Err(missing(field, searched)),
        }
    }

    /// Resolve a field that may be absent.
    pub fn optional<T: FromRaw>(&self, field: &Field) -> Result<Option<T>> {
        match self.lookup(field) {
            Lookup::Found(resolved) => coerce::coerce(field.name(), &resolved.raw).map(Some),
            Lookup::NotFound { .. } => Ok(None),
        }
    }

    /// Resolve a field that may be absent, with a custom converter.
    pub fn optional_with<T, E, F>(&self, field: &Field, converter: F) -> Result<Option<T>>
    where
        F: FnOnce(&str) -> std::result::Result<T, E>,
        E: fmt::Display,
    {
        match self.lookup(field) {
            Lookup::Found(resolved) => {
                coerce::coerce_with(field.name(), &resolved.raw, converter).map(Some)
            }
            Lookup::NotFound { .. } => Ok(None),
        }
    }

    /// Resolve a field, falling back to `default` when no source has it.
    ///
    /// `default` is only evaluated when it is needed.
    pub fn with_default<T, D>(&self, field: &Field, default: D) -> Result<T>
    where
        T: FromRaw,
        D: FnOnce() -> T,
    {
        Ok(self.optional(field)?.unwrap_or_else(default))
    }

    /// Resolve a field with a custom converter, falling back to `default`.
    pub fn with_default_with<T, E, F, D>(&self, field: &Field, converter: F, default: D) -> Result<T>
    where
        F: FnOnce(&str) -> std::result::Result<T, E>,
        E: fmt::Display,
        D: FnOnce() -> T,
    {
        Ok(self.optional_with(field, converter)?.unwrap_or_else(default))
    }
}

impl fmt::Debug for Context {
    // Values may be secrets; only show which keys are known.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dotenv_keys: Vec<_> = self.dotenv.keys().collect();
        dotenv_keys.sort();
        f.debug_struct("Context")
            .field("default_files_location", &self.default_files_location)
            .field("dotenv_keys", &dotenv_keys)
            .field("env_vars", &self.env.len())
            .finish()
    }
}

fn missing(field: &Field, searched: Vec<PathBuf>) -> ReadEnvError {
    ReadEnvError::missing(field.name(), field.get_env_name(), searched)
}

/// Copy the process environment, skipping entries that are not valid UTF-8.
fn snapshot_env() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
