//! Entry points for reading a configuration

use std::path::{Path, PathBuf};

use crate::context::Context;
use crate::error::Result;
use crate::field::Field;

/// Secrets directory used when no other location is configured.
pub const DEFAULT_FILES_LOCATION: &str = "/run/secrets";

/// A configuration that can be read from files, a dotenv file and the environment.
///
/// Usually implemented with `#[derive(ReadEnv)]`. A manual implementation
/// resolves each field through the [`Context`] in declaration order:
///
/// ```rust
/// use readenv::{Context, Field, ReadEnv};
///
/// struct Config {
///     host: String,
///     port: u16,
/// }
///
/// impl ReadEnv for Config {
///     fn fields() -> Vec<Field> {
///         vec![Field::new("host"), Field::new("port")]
///     }
///
///     fn from_context(ctx: &Context) -> readenv::Result<Self> {
///         Ok(Self {
///             host: ctx.required(&Field::new("host"))?,
///             port: ctx.with_default(&Field::new("port"), || 8080)?,
///         })
///     }
/// }
///
/// # fn main() -> anyhow::Result<()> {
/// # let env = [("HOST".to_string(), "localhost".to_string())].into_iter().collect();
/// # let ctx = Context::from_parts("/nonexistent", Default::default(), env);
/// let config = Config::from_context(&ctx)?;
/// assert_eq!(config.host, "localhost");
/// assert_eq!(config.port, 8080);
/// # Ok(())
/// # }
/// ```
pub trait ReadEnv: Sized {
    /// Field descriptors in declaration order.
    fn fields() -> Vec<Field>;

    /// Resolve every field against `ctx`, stopping at the first error.
    fn from_context(ctx: &Context) -> Result<Self>;
}

/// Options for a single read.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    dotenv_path: Option<PathBuf>,
    default_files_location: PathBuf,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            dotenv_path: None,
            default_files_location: PathBuf::from(DEFAULT_FILES_LOCATION),
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also read values from this dotenv file, if it exists.
    pub fn dotenv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_path = Some(path.into());
        self
    }

    /// Look for secrets files in this directory instead of `/run/secrets`.
    pub fn default_files_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.default_files_location = location.into();
        self
    }

    pub fn get_dotenv_path(&self) -> Option<&Path> {
        self.dotenv_path.as_deref()
    }

    pub fn get_default_files_location(&self) -> &Path {
        &self.default_files_location
    }
}

/// Read `T` with the default options: no dotenv file, secrets in `/run/secrets`.
///
/// # Errors
///
/// - A required field has no value in any source
/// - A value cannot be converted into its field type
pub fn read<T: ReadEnv>() -> Result<T> {
    read_with(&ReadOptions::default())
}

/// Read `T` with explicit options.
///
/// # Errors
///
/// - The dotenv file exists but cannot be read or parsed
/// - A required field has no value in any source
/// - A value cannot be converted into its field type
pub fn read_with<T: ReadEnv>(options: &ReadOptions) -> Result<T> {
    let ctx = Context::new(options)?;
    T::from_context(&ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ReadOptions::default();
        assert_eq!(options.get_dotenv_path(), None);
        assert_eq!(
            options.get_default_files_location(),
            Path::new("/run/secrets")
        );
    }

    #[test]
    fn test_options_builder() {
        let options = ReadOptions::new()
            .dotenv_path(".env.local")
            .default_files_location("/var/secrets");
        assert_eq!(options.get_dotenv_path(), Some(Path::new(".env.local")));
        assert_eq!(
            options.get_default_files_location(),
            Path::new("/var/secrets")
        );
    }
}
