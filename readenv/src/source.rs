//! Source resolution for a single field
//!
//! Sources are probed in a fixed order and the first one that yields a value
//! wins:
//!
//! 1. The field's explicit `file_path`, if set
//! 2. Otherwise the file in the secrets directory (`file_location/file_name`)
//! 3. The dotenv mapping
//! 4. The process environment
//!
//! A file that is missing or unreadable is skipped, never an error.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::context::Context;
use crate::field::Field;

/// Where a raw value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The field's explicit `file_path`
    FilePath(PathBuf),
    /// A file in the secrets directory
    SecretsFile(PathBuf),
    /// A key of the dotenv file
    Dotenv(String),
    /// A process environment variable
    Environment(String),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FilePath(path) => write!(f, "file '{}'", path.display()),
            Self::SecretsFile(path) => write!(f, "secrets file '{}'", path.display()),
            Self::Dotenv(key) => write!(f, "dotenv key '{}'", key),
            Self::Environment(key) => write!(f, "environment variable '{}'", key),
        }
    }
}

/// A raw, not yet converted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub raw: String,
    pub source: Source,
}

/// Outcome of probing every source of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Resolved),
    /// No source had a value; `searched` lists the probed files.
    NotFound { searched: Vec<PathBuf> },
}

/// Probe the sources of `field` in precedence order.
pub fn resolve(field: &Field, ctx: &Context) -> Lookup {
    let mut searched = Vec::new();

    if field.uses_file() {
        let explicit = field.get_file_path().map(Path::to_path_buf);
        let path = explicit
            .clone()
            .unwrap_or_else(|| field.secrets_file_path(ctx.default_files_location()));
        if let Some(raw) = read_file(field, &path) {
            let source = match explicit {
                Some(_) => Source::FilePath(path),
                None => Source::SecretsFile(path),
            };
            return Lookup::Found(Resolved { raw, source });
        }
        searched.push(path);
    }

    let dotenv_key = field.get_dotenv_name();
    if let Some(raw) = ctx.dotenv_var(&dotenv_key) {
        return Lookup::Found(Resolved {
            raw: raw.to_string(),
            source: Source::Dotenv(dotenv_key),
        });
    }
    tracing::trace!(field = field.name(), key = %dotenv_key, "not in dotenv");

    if field.uses_env() {
        let env_key = field.get_env_name();
        if let Some(raw) = ctx.env_var(&env_key) {
            return Lookup::Found(Resolved {
                raw: raw.to_string(),
                source: Source::Environment(env_key),
            });
        }
        tracing::trace!(field = field.name(), key = %env_key, "not in environment");
    }

    Lookup::NotFound { searched }
}

/// Read a value file, trimming surrounding whitespace.
fn read_file(field: &Field, path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Some(contents.trim().to_string()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::trace!(field = field.name(), path = %path.display(), "file not found");
            None
        }
        Err(e) => {
            tracing::debug!(
                field = field.name(),
                path = %path.display(),
                error = %e,
                "skipping unreadable file"
            );
            None
        }
    }
}
