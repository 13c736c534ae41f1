//! Integration tests

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use readenv::{Context, Field, ReadEnv, ReadEnvError, ReadOptions};
use serial_test::serial;
use tempfile::TempDir;

#[derive(Debug, ReadEnv)]
struct BasicConfig {
    pub username: String,
    pub debug: Option<String>,
    #[readenv(default = 5)]
    pub workers: i64,
}

#[derive(Debug, ReadEnv)]
struct TwoRequired {
    pub first_required: String,
    pub second_required: String,
}

#[derive(Debug, ReadEnv)]
struct TimestampConfig {
    #[readenv(converter = "iso8601")]
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, ReadEnv)]
#[readenv(prefix = "APP_")]
struct PrefixedConfig {
    pub name: String,
    #[readenv(env_name = "SHARED_PORT")]
    pub port: u16,
}

#[derive(Debug, ReadEnv)]
struct ConverterConfig {
    #[readenv(converter = "readenv::convert::json")]
    pub tags: Vec<String>,

    #[readenv(converter = "readenv::convert::list")]
    pub ports: Option<Vec<u16>>,

    #[readenv(converter = "readenv::convert::list", default = vec![1, 2])]
    pub levels: Vec<u8>,
}

#[derive(Debug, ReadEnv)]
struct DefaultsConfig {
    #[readenv(default)]
    pub verbose: bool,

    #[readenv(default = "fallback".to_string())]
    pub mode: Option<String>,

    #[readenv(default = "127.0.0.1:8080".to_string())]
    pub server_addr: String,
}

#[derive(Debug, ReadEnv)]
#[readenv(prefix = "SVC_")]
struct AllAttributesConfig {
    #[readenv(env_name = "DATABASE_URL", dotenv_name = "LOCAL_DATABASE_URL")]
    pub db_url: String,

    #[readenv(file_location = "/nonexistent/svc", file_name = "password.txt")]
    pub password: String,

    // Relative to the package root, where cargo runs tests
    #[readenv(file_path = "tests/fixtures/api_token", no_env)]
    pub api_token: String,

    #[readenv(no_file, default = 3)]
    pub retries: u8,
}

#[derive(Debug, ReadEnv)]
struct FilePathConfig {
    #[readenv(file_path = "tests/fixtures/api_token")]
    pub api_token: String,

    #[readenv(file_path = "tests/fixtures/absent_token")]
    pub fallback_token: String,
}

fn iso8601(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
}

fn secrets_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn options(dir: &Path) -> ReadOptions {
    ReadOptions::new().default_files_location(dir)
}

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn clear(vars: &[&str]) {
    for var in vars {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_environment_with_optional_and_default() {
    clear(&["USERNAME", "DEBUG", "WORKERS"]);
    env::set_var("USERNAME", "alice");
    let dir = secrets_dir();

    let config = BasicConfig::read_with(&options(dir.path())).unwrap();
    assert_eq!(config.username, "alice");
    assert_eq!(config.debug, None);
    assert_eq!(config.workers, 5);

    env::remove_var("USERNAME");
}

#[test]
#[serial]
fn test_secrets_file_overrides_environment() {
    clear(&["USERNAME", "DEBUG", "WORKERS"]);
    env::set_var("USERNAME", "alice");
    let dir = secrets_dir();
    fs::write(dir.path().join("username"), "bob\n").unwrap();

    let config = BasicConfig::read_with(&options(dir.path())).unwrap();
    assert_eq!(config.username, "bob");

    env::remove_var("USERNAME");
}

#[test]
#[serial]
fn test_dotenv_overrides_environment() {
    clear(&["USERNAME", "DEBUG", "WORKERS"]);
    env::set_var("USERNAME", "alice");
    env::set_var("WORKERS", "3");
    let dir = secrets_dir();
    let dotenv = dir.path().join(".env");
    fs::write(&dotenv, "# local settings\nUSERNAME=carol\nDEBUG=\"yes\nplease\"\n").unwrap();

    let config = BasicConfig::read_with(&options(dir.path()).dotenv_path(&dotenv)).unwrap();
    assert_eq!(config.username, "carol");
    assert_eq!(config.debug.as_deref(), Some("yes\nplease"));
    assert_eq!(config.workers, 3);

    clear(&["USERNAME", "WORKERS"]);
}

#[test]
#[serial]
fn test_missing_dotenv_file_is_ignored() {
    clear(&["USERNAME", "DEBUG", "WORKERS"]);
    env::set_var("USERNAME", "alice");
    let dir = secrets_dir();

    let config =
        BasicConfig::read_with(&options(dir.path()).dotenv_path(dir.path().join("absent.env")))
            .unwrap();
    assert_eq!(config.username, "alice");

    env::remove_var("USERNAME");
}

#[test]
#[serial]
fn test_malformed_dotenv_fails_before_fields() {
    clear(&["FIRST_REQUIRED", "SECOND_REQUIRED"]);
    let dir = secrets_dir();
    let dotenv = dir.path().join(".env");
    fs::write(&dotenv, "FIRST_REQUIRED=1\nthis line is broken\n").unwrap();

    let result = TwoRequired::read_with(&options(dir.path()).dotenv_path(&dotenv));
    match result {
        Err(ReadEnvError::DotenvParse { source, .. }) => assert_eq!(source.line, 2),
        other => panic!("Expected DotenvParse error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_missing_required_reports_first_field() {
    clear(&["FIRST_REQUIRED", "SECOND_REQUIRED"]);
    let dir = secrets_dir();

    match TwoRequired::read_with(&options(dir.path())) {
        Err(ReadEnvError::Missing {
            field,
            env_name,
            searched,
        }) => {
            assert_eq!(field, "first_required");
            assert_eq!(env_name, "FIRST_REQUIRED");
            assert_eq!(searched, vec![dir.path().join("first_required")]);
        }
        other => panic!("Expected Missing error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_conversion_error() {
    clear(&["USERNAME", "DEBUG", "WORKERS"]);
    env::set_var("USERNAME", "alice");
    env::set_var("WORKERS", "five");
    let dir = secrets_dir();

    match BasicConfig::read_with(&options(dir.path())) {
        Err(ReadEnvError::Conversion {
            field,
            raw,
            type_name,
            ..
        }) => {
            assert_eq!(field, "workers");
            assert_eq!(raw, "five");
            assert!(type_name.contains("i64"));
        }
        other => panic!("Expected Conversion error, got {:?}", other),
    }

    clear(&["USERNAME", "WORKERS"]);
}

#[test]
#[serial]
fn test_custom_converter_timestamp() {
    env::set_var("TIMESTAMP", "2024-01-01T00:00:00");
    let dir = secrets_dir();

    let config = TimestampConfig::read_with(&options(dir.path())).unwrap();
    let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(config.timestamp, expected);

    env::set_var("TIMESTAMP", "yesterday");
    let result = TimestampConfig::read_with(&options(dir.path()));
    assert!(matches!(
        result,
        Err(ReadEnvError::Conversion { ref field, .. }) if field == "timestamp"
    ));

    env::remove_var("TIMESTAMP");
}

#[test]
#[serial]
fn test_prefix_and_explicit_env_name() {
    clear(&["APP_NAME", "NAME", "SHARED_PORT", "APP_SHARED_PORT"]);
    env::set_var("APP_NAME", "svc");
    env::set_var("SHARED_PORT", "9000");
    let dir = secrets_dir();

    let config = PrefixedConfig::read_with(&options(dir.path())).unwrap();
    assert_eq!(config.name, "svc");
    assert_eq!(config.port, 9000);

    clear(&["APP_NAME", "SHARED_PORT"]);
}

#[test]
#[serial]
fn test_snapshot_ignores_later_env_changes() {
    clear(&["USERNAME", "DEBUG", "WORKERS"]);
    env::set_var("USERNAME", "before");
    let dir = secrets_dir();
    let ctx = Context::new(&options(dir.path())).unwrap();
    env::set_var("USERNAME", "after");

    let config = BasicConfig::from_context(&ctx).unwrap();
    assert_eq!(config.username, "before");

    env::remove_var("USERNAME");
}

#[test]
fn test_converters_with_explicit_context() {
    let dir = secrets_dir();
    let env: HashMap<String, String> = [
        ("TAGS", r#"["prod","api"]"#),
        ("PORTS", "80, 443"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let ctx = Context::from_parts(dir.path(), HashMap::new(), env);

    let config = ConverterConfig::from_context(&ctx).unwrap();
    assert_eq!(config.tags, vec!["prod", "api"]);
    assert_eq!(config.ports, Some(vec![80, 443]));
    assert_eq!(config.levels, vec![1, 2]);
}

#[test]
fn test_defaults_with_explicit_context() {
    let dir = secrets_dir();
    let ctx = Context::from_parts(dir.path(), HashMap::new(), HashMap::new());

    let config = DefaultsConfig::from_context(&ctx).unwrap();
    assert!(!config.verbose);
    assert_eq!(config.mode.as_deref(), Some("fallback"));
    assert_eq!(config.server_addr, "127.0.0.1:8080");
}

#[test]
fn test_secrets_file_feeds_optional_field() {
    let dir = secrets_dir();
    fs::write(dir.path().join("mode"), "  strict \n").unwrap();
    fs::write(dir.path().join("verbose"), "on").unwrap();
    let ctx = Context::from_parts(dir.path(), HashMap::new(), HashMap::new());

    let config = DefaultsConfig::from_context(&ctx).unwrap();
    assert!(config.verbose);
    assert_eq!(config.mode.as_deref(), Some("strict"));
}

#[test]
fn test_fields_in_declaration_order() {
    let fields = PrefixedConfig::fields();
    assert_eq!(
        fields,
        vec![
            Field::new("name").env_name("APP_NAME"),
            Field::new("port").env_name("SHARED_PORT"),
        ]
    );

    let names: Vec<_> = BasicConfig::fields()
        .iter()
        .map(|f| f.name().to_string())
        .collect();
    assert_eq!(names, vec!["username", "debug", "workers"]);
}

#[test]
fn test_fields_carry_every_attribute() {
    assert_eq!(
        AllAttributesConfig::fields(),
        vec![
            Field::new("db_url")
                .env_name("DATABASE_URL")
                .dotenv_name("LOCAL_DATABASE_URL"),
            Field::new("password")
                .env_name("SVC_PASSWORD")
                .file_name("password.txt")
                .file_location("/nonexistent/svc"),
            Field::new("api_token")
                .env_name("SVC_API_TOKEN")
                .file_path("tests/fixtures/api_token")
                .use_env(false),
            Field::new("retries").env_name("SVC_RETRIES").use_file(false),
        ]
    );
}

#[test]
fn test_every_attribute_with_explicit_context() {
    let dir = secrets_dir();
    // Ignored: retries is no_file
    fs::write(dir.path().join("retries"), "9").unwrap();

    let dotenv = vars(&[("LOCAL_DATABASE_URL", "postgres://local/db")]);
    let env = vars(&[
        ("DATABASE_URL", "postgres://env/db"),
        ("SVC_PASSWORD", "pw"),
        ("SVC_API_TOKEN", "from-env"),
        ("SVC_RETRIES", "7"),
    ]);
    let ctx = Context::from_parts(dir.path(), dotenv, env);

    let config = AllAttributesConfig::from_context(&ctx).unwrap();
    assert_eq!(config.db_url, "postgres://local/db");
    assert_eq!(config.password, "pw");
    assert_eq!(config.api_token, "from-file");
    assert_eq!(config.retries, 7);
}

#[test]
fn test_file_path_wins_over_dotenv_and_environment() {
    let dir = secrets_dir();
    // file_path supersedes the secrets directory, even when this file exists
    fs::write(dir.path().join("fallback_token"), "from-secrets").unwrap();

    let dotenv = vars(&[
        ("API_TOKEN", "from-dotenv"),
        ("FALLBACK_TOKEN", "from-dotenv"),
    ]);
    let env = vars(&[("API_TOKEN", "from-env"), ("FALLBACK_TOKEN", "from-env")]);
    let ctx = Context::from_parts(dir.path(), dotenv, env);

    let config = FilePathConfig::from_context(&ctx).unwrap();
    assert_eq!(config.api_token, "from-file");
    assert_eq!(config.fallback_token, "from-dotenv");
}
