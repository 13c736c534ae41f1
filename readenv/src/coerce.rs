//! Conversion of raw strings into field types

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::num::{NonZeroU16, NonZeroU32, NonZeroU64, NonZeroUsize};
use std::path::PathBuf;

use crate::error::ReadEnvError;

/// Types that can be built from a raw configuration string.
///
/// Implemented for the common primitives. Other types are read with a
/// converter function (`#[readenv(converter = "path")]`).
pub trait FromRaw: Sized {
    /// Convert `raw`, returning a human readable message on failure.
    fn from_raw(raw: &str) -> Result<Self, String>;
}

impl FromRaw for String {
    fn from_raw(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

impl FromRaw for bool {
    fn from_raw(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err("expected one of true/false, 1/0, yes/no, on/off".to_string()),
        }
    }
}

macro_rules! from_raw_via_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromRaw for $ty {
                fn from_raw(raw: &str) -> Result<Self, String> {
                    raw.trim().parse::<$ty>().map_err(|e| e.to_string())
                }
            }
        )*
    };
}

from_raw_via_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char,
    NonZeroU16, NonZeroU32, NonZeroU64, NonZeroUsize,
    IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr,
);

impl FromRaw for PathBuf {
    fn from_raw(raw: &str) -> Result<Self, String> {
        Ok(PathBuf::from(raw))
    }
}

/// Convert a raw value with the built-in rules for `T`.
pub fn coerce<T: FromRaw>(field: &str, raw: &str) -> Result<T, ReadEnvError> {
    T::from_raw(raw).map_err(|message| ReadEnvError::conversion::<T>(field, raw, message))
}

/// Convert a raw value with a custom converter function.
pub fn coerce_with<T, E, F>(field: &str, raw: &str, converter: F) -> Result<T, ReadEnvError>
where
    F: FnOnce(&str) -> Result<T, E>,
    E: std::fmt::Display,
{
    converter(raw).map_err(|e| ReadEnvError::conversion::<T>(field, raw, e))
}
