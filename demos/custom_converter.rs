//! Example demonstrating converter functions

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDateTime;
use readenv::ReadEnv;

// Converter for ISO-8601 timestamps without offset
fn iso8601(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
}

// Converter for durations written in seconds, e.g. "30s"
fn seconds(raw: &str) -> anyhow::Result<Duration> {
    let secs = raw
        .strip_suffix('s')
        .ok_or_else(|| anyhow::anyhow!("expected a value like '30s'"))?;
    Ok(Duration::from_secs(secs.parse()?))
}

#[derive(Debug, ReadEnv)]
struct Config {
    #[readenv(converter = "iso8601")]
    pub release_date: NaiveDateTime,

    #[readenv(converter = "seconds", default = Duration::from_secs(10))]
    pub timeout: Duration,

    // Uses readenv::convert::json (JSON format)
    #[readenv(converter = "readenv::convert::json")]
    pub labels: Option<HashMap<String, String>>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("RELEASE_DATE", "2024-01-01T00:00:00");
    std::env::set_var("TIMEOUT", "30s");
    std::env::set_var("LABELS", r#"{"team":"platform","tier":"backend"}"#);

    let config = Config::read()?;

    println!("Configuration loaded:");
    println!("  Release Date: {}", config.release_date);
    println!("  Timeout: {:?}", config.timeout);
    println!("  Labels: {:?}", config.labels);

    // An invalid value is reported with the field and the target type
    std::env::set_var("RELEASE_DATE", "yesterday");
    if let Err(e) = Config::read() {
        println!("Expected error: {}", e);
    }

    Ok(())
}
