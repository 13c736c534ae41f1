//! Error types for configuration loading

use std::path::PathBuf;

use crate::dotenv::ParseError;

/// Errors that can occur when reading a configuration.
///
/// Resolution is fail-fast: the first field that cannot be resolved, in
/// declaration order, aborts the whole read with one of these variants.
#[derive(Debug, thiserror::Error)]
pub enum ReadEnvError {
    /// A required field was not found in any source.
    ///
    /// Occurs when a non-optional field has no default value and neither a
    /// file, the dotenv file nor the environment provided a value.
    #[error("Field '{field}' is required but no value was found (environment variable '{env_name}', files: {})", display_paths(.searched))]
    Missing {
        /// Name of the struct field
        field: String,
        /// Environment variable that was looked up
        env_name: String,
        /// Files that were probed, in probe order
        searched: Vec<PathBuf>,
    },

    /// The raw value could not be converted into the field's type.
    ///
    /// Covers both built-in coercion and custom converter functions.
    #[error("Failed to convert value '{raw}' of field '{field}' into {type_name}: {message}")]
    Conversion {
        /// Name of the struct field
        field: String,
        /// Raw string obtained from the source
        raw: String,
        /// Fully qualified type name that conversion was attempted for
        type_name: String,
        /// Error message from the parser or converter
        message: String,
    },

    /// The dotenv file contains invalid syntax.
    #[error("Failed to parse dotenv file '{}': {source}", .path.display())]
    DotenvParse {
        /// Path of the dotenv file
        path: PathBuf,
        /// Location and reason of the failure
        source: ParseError,
    },

    /// The dotenv file exists but could not be read.
    #[error("Failed to read dotenv file '{}': {source}", .path.display())]
    DotenvRead {
        /// Path of the dotenv file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = ReadEnvError> = std::result::Result<T, E>;

impl ReadEnvError {
    /// Create a conversion error (used by macro-generated code)
    #[doc(hidden)]
    pub fn conversion<T>(
        field: impl Into<String>,
        raw: impl Into<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::Conversion {
            field: field.into(),
            raw: raw.into(),
            type_name: std::any::type_name::<T>().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a missing value error (used by macro-generated code)
    #[doc(hidden)]
    pub fn missing(
        field: impl Into<String>,
        env_name: impl Into<String>,
        searched: Vec<PathBuf>,
    ) -> Self {
        Self::Missing {
            field: field.into(),
            env_name: env_name.into(),
            searched,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "none".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
