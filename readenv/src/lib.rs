//! Declarative configuration from secret files, dotenv files and the environment
//!
//! `readenv` fills a struct from four kinds of sources. For every field the
//! first source that has a value wins:
//!
//! 1. An explicit file path (`#[readenv(file_path = "...")]`)
//! 2. A file named after the field in the secrets directory (`/run/secrets` by
//!    default, as used by Docker and Kubernetes secrets)
//! 3. A `.env` file, if one was given
//! 4. The process environment
//!
//! The raw string is then converted into the field type. `Option<T>` fields
//! become `None` when no source has a value; fields with a default use it;
//! every other field is required.
//!
//! # Example
//!
//! ```rust
//! use readenv::ReadEnv;
//!
//! #[derive(Debug, ReadEnv)]
//! struct Config {
//!     // USERNAME, or /run/secrets/username
//!     pub username: String,
//!
//!     // None when not set anywhere
//!     pub debug: Option<String>,
//!
//!     #[readenv(default = 5)]
//!     pub workers: i64,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("USERNAME", "alice");
//! #     std::env::remove_var("DEBUG");
//! #     std::env::remove_var("WORKERS");
//! let config = Config::read()?;
//! #     assert_eq!(config.username, "alice");
//! #     assert_eq!(config.debug, None);
//! #     assert_eq!(config.workers, 5);
//! #     Ok(())
//! # }
//! ```
//!
//! # Value Parsing
//!
//! Built-in conversion ([`FromRaw`]) covers strings, integers, floats,
//! `char`, `PathBuf`, IP and socket addresses and booleans. Booleans accept
//! `true/false`, `1/0`, `yes/no` and `on/off`, case-insensitively.
//!
//! Any other type is read with a converter, a function
//! `fn(&str) -> Result<T, E>` where `E: Display`:
//! - JSON: `#[readenv(converter = "readenv::convert::json")]`
//! - Comma-separated: `#[readenv(converter = "readenv::convert::list")]`
//! - Custom: any function of the right shape
//!
//! # Attributes
//!
//! ## `#[readenv(default = value)]` / `#[readenv(default)]`
//!
//! Value used when no source has one; the bare form uses `Default::default()`.
//!
//! ```rust
//! # use readenv::ReadEnv;
//! #[derive(ReadEnv)]
//! struct Config {
//!     #[readenv(default = "127.0.0.1:8080".to_string())]
//!     pub server_addr: String,
//!
//!     #[readenv(default = 10)]
//!     pub max_connections: u32,
//!
//!     #[readenv(default)]
//!     pub enable_tls: bool,
//! }
//! ```
//!
//! ## Names and locations
//!
//! ```rust
//! # use readenv::ReadEnv;
//! #[derive(ReadEnv)]
//! #[readenv(prefix = "APP_")]
//! struct Config {
//!     // APP_LOG_LEVEL
//!     #[readenv(default = "info".to_string())]
//!     pub log_level: String,
//!
//!     // REDIS_URL, not APP_REDIS_URL
//!     #[readenv(env_name = "REDIS_URL")]
//!     pub cache_url: String,
//!
//!     // LOCAL_DB in the dotenv file, APP_DB in the environment
//!     #[readenv(dotenv_name = "LOCAL_DB")]
//!     pub db: String,
//!
//!     // /etc/app/tls/key.pem, never the environment
//!     #[readenv(file_location = "/etc/app/tls", file_name = "key.pem", no_env)]
//!     pub tls_key: Option<String>,
//!
//!     // exactly this file, then dotenv and environment
//!     #[readenv(file_path = "/var/run/app/token")]
//!     pub token: String,
//! }
//! ```

mod coerce;
mod context;
pub mod convert;
pub mod dotenv;
mod error;
mod field;
mod read;
mod source;

pub use coerce::FromRaw;
pub use context::Context;
pub use error::{ReadEnvError, Result};
pub use field::Field;
pub use read::{read, read_with, ReadEnv, ReadOptions, DEFAULT_FILES_LOCATION};
pub use readenv_derive::ReadEnv;
pub use source::{Lookup, Resolved, Source};
