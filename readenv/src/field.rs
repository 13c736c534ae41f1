//! Field descriptors

use std::path::{Path, PathBuf};

/// Describes where the value of one configuration field comes from.
///
/// Built by the derive macro, or by hand when implementing
/// [`ReadEnv`](crate::ReadEnv) manually:
///
/// ```rust
/// use readenv::Field;
///
/// let field = Field::new("db_password")
///     .env_name("PGPASSWORD")
///     .file_location("/etc/app/secrets");
///
/// assert_eq!(field.get_env_name(), "PGPASSWORD");
/// assert_eq!(field.get_file_name(), "db_password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    env_name: Option<String>,
    dotenv_name: Option<String>,
    file_name: Option<String>,
    file_location: Option<PathBuf>,
    file_path: Option<PathBuf>,
    use_env: bool,
    use_file: bool,
}

impl Field {
    /// Create a descriptor using the default naming conventions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            env_name: None,
            dotenv_name: None,
            file_name: None,
            file_location: None,
            file_path: None,
            use_env: true,
            use_file: true,
        }
    }

    /// Override the environment variable name.
    pub fn env_name(mut self, env_name: impl Into<String>) -> Self {
        self.env_name = Some(env_name.into());
        self
    }

    /// Override the name looked up in the dotenv file.
    pub fn dotenv_name(mut self, dotenv_name: impl Into<String>) -> Self {
        self.dotenv_name = Some(dotenv_name.into());
        self
    }

    /// Override the file name inside the secrets directory.
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Override the secrets directory for this field.
    pub fn file_location(mut self, file_location: impl Into<PathBuf>) -> Self {
        self.file_location = Some(file_location.into());
        self
    }

    /// Read this field from an exact path instead of the secrets directory.
    pub fn file_path(mut self, file_path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    /// Enable or disable the process environment as a source.
    pub fn use_env(mut self, use_env: bool) -> Self {
        self.use_env = use_env;
        self
    }

    /// Enable or disable file sources.
    pub fn use_file(mut self, use_file: bool) -> Self {
        self.use_file = use_file;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Environment variable name; defaults to the uppercased field name.
    pub fn get_env_name(&self) -> String {
        self.env_name
            .clone()
            .unwrap_or_else(|| self.name.to_uppercase())
    }

    /// Dotenv key; defaults to the environment variable name.
    pub fn get_dotenv_name(&self) -> String {
        self.dotenv_name
            .clone()
            .unwrap_or_else(|| self.get_env_name())
    }

    /// File name in the secrets directory; defaults to the lowercased field name.
    pub fn get_file_name(&self) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| self.name.to_lowercase())
    }

    pub fn get_file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Secrets file path: `file_location` (or `default_location`) joined with the file name.
    pub fn secrets_file_path(&self, default_location: &Path) -> PathBuf {
        self.file_location
            .as_deref()
            .unwrap_or(default_location)
            .join(self.get_file_name())
    }

    pub fn uses_env(&self) -> bool {
        self.use_env
    }

    pub fn uses_file(&self) -> bool {
        self.use_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let field = Field::new("Api_Key");
        assert_eq!(field.get_env_name(), "API_KEY");
        assert_eq!(field.get_dotenv_name(), "API_KEY");
        assert_eq!(field.get_file_name(), "api_key");
        assert_eq!(field.get_file_path(), None);
        assert!(field.uses_env());
        assert!(field.uses_file());
    }

    #[test]
    fn test_dotenv_name_follows_env_name_override() {
        let field = Field::new("cache_url").env_name("REDIS_URL");
        assert_eq!(field.get_dotenv_name(), "REDIS_URL");

        let field = field.dotenv_name("LOCAL_REDIS_URL");
        assert_eq!(field.get_env_name(), "REDIS_URL");
        assert_eq!(field.get_dotenv_name(), "LOCAL_REDIS_URL");
    }

    #[test]
    fn test_secrets_file_path() {
        let field = Field::new("username");
        assert_eq!(
            field.secrets_file_path(Path::new("/run/secrets")),
            PathBuf::from("/run/secrets/username")
        );

        let field = field.file_location("/etc/app").file_name("user.txt");
        assert_eq!(
            field.secrets_file_path(Path::new("/run/secrets")),
            PathBuf::from("/etc/app/user.txt")
        );
    }
}
