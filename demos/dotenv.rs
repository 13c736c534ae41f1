//! Dotenv example: a .env file takes precedence over the environment

use readenv::{ReadEnv, ReadOptions};
use std::fs;

#[derive(Debug, ReadEnv)]
#[readenv(prefix = "APP_")]
struct Config {
    pub name: String, // APP_NAME

    #[readenv(default = 8080)]
    pub port: u16, // APP_PORT

    // Multiline values need quotes in the .env file
    pub banner: Option<String>, // APP_BANNER

    #[readenv(converter = "readenv::convert::list")]
    pub allowed_hosts: Vec<String>, // APP_ALLOWED_HOSTS
}

fn main() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let dotenv = dir.path().join(".env");
    fs::write(
        &dotenv,
        r#"# Local overrides
APP_NAME=my-application
APP_PORT=9090 # not the default
APP_BANNER="Welcome
to my-application"
export APP_ALLOWED_HOSTS=localhost, 127.0.0.1
"#,
    )?;

    // Loses against the .env file
    std::env::set_var("APP_NAME", "from-environment");

    let options = ReadOptions::new()
        .dotenv_path(&dotenv)
        .default_files_location(dir.path());
    let config = Config::read_with(&options)?;

    println!("Configuration loaded:");
    println!("  Name: {}", config.name);
    println!("  Port: {}", config.port);
    println!("  Banner: {:?}", config.banner);
    println!("  Allowed Hosts: {:?}", config.allowed_hosts);

    Ok(())
}
