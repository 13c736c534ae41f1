//! Basic example: environment variables with optional and default fields

use readenv::ReadEnv;

#[derive(Debug, ReadEnv)]
struct Config {
    // USERNAME, or /run/secrets/username
    pub username: String,

    // None unless DEBUG is set
    pub debug: Option<String>,

    #[readenv(default = 5)]
    pub workers: i64,

    #[readenv(default)]
    pub verbose: bool,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("USERNAME", "alice");
    std::env::set_var("VERBOSE", "yes");

    let config = Config::read()?;

    println!("Configuration loaded:");
    println!("  Username: {}", config.username);
    println!("  Debug: {:?}", config.debug);
    println!("  Workers: {}", config.workers);
    println!("  Verbose: {}", config.verbose);

    Ok(())
}
