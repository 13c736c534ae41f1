//! Ready-made converter functions
//!
//! Use with `#[readenv(converter = "...")]`:
//!
//! ```rust
//! use readenv::ReadEnv;
//!
//! #[derive(Debug, ReadEnv)]
//! struct Config {
//!     #[readenv(converter = "readenv::convert::json")]
//!     pub replicas: Vec<String>,
//!
//!     #[readenv(converter = "readenv::convert::list")]
//!     pub ports: Vec<u16>,
//! }
//! ```

use serde::de::DeserializeOwned;

use crate::coerce::FromRaw;

/// Parse the raw value as JSON.
pub fn json<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Parse a comma-separated list, converting each trimmed item.
///
/// An empty or whitespace-only value yields an empty list.
pub fn list<T: FromRaw>(raw: &str) -> Result<Vec<T>, String> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .enumerate()
        .map(|(i, item)| T::from_raw(item.trim()).map_err(|e| format!("item {}: {}", i, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_json() {
        let tags: Vec<String> = json(r#"["prod","api"]"#).unwrap();
        assert_eq!(tags, vec!["prod", "api"]);

        let map: HashMap<String, u32> = json(r#"{"a": 1}"#).unwrap();
        assert_eq!(map["a"], 1);

        assert!(json::<Vec<String>>("not json").is_err());
    }

    #[test]
    fn test_list() {
        let ports: Vec<u16> = list("80, 443 ,8080").unwrap();
        assert_eq!(ports, vec![80, 443, 8080]);

        let empty: Vec<String> = list("  ").unwrap();
        assert!(empty.is_empty());

        let err = list::<u16>("80,http").unwrap_err();
        assert!(err.starts_with("item 1:"));
    }
}
