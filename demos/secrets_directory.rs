//! Secrets directory example: files win over environment variables

use readenv::{ReadEnv, ReadOptions};
use std::fs;

#[derive(Debug, ReadEnv)]
struct Config {
    // <secrets>/api_key
    pub api_key: String,

    // <secrets>/db_password.txt
    #[readenv(file_name = "db_password.txt")]
    pub database_password: String,

    // Never read from a file
    #[readenv(no_file)]
    pub database_host: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("readenv=debug")),
        )
        .init();

    let secrets = tempfile::tempdir()?;
    fs::write(secrets.path().join("api_key"), "super_secret_api_key_12345\n")?;
    fs::write(secrets.path().join("db_password.txt"), "db_password_67890\n")?;

    // Shadowed by the secrets file
    std::env::set_var("API_KEY", "local-development-key");
    std::env::set_var("DATABASE_PASSWORD", "local-password");
    std::env::set_var("DATABASE_HOST", "localhost");

    let config = Config::read_with(&ReadOptions::new().default_files_location(secrets.path()))?;

    println!("Configuration loaded from files:");
    println!("  API Key: {}", config.api_key);
    println!("  Database Password: {}", config.database_password);
    println!("  Database Host: {}", config.database_host);

    Ok(())
}
