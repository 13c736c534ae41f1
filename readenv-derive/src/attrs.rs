//! Attribute parsing for `#[readenv(...)]` annotations.
//!
//! This module extracts and validates configuration attributes from the
//! struct and its fields during macro expansion.

use syn::{Attribute, Field, LitStr};

/// Parsed `#[readenv(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Environment variable name override; the struct prefix is not applied.
    pub env_name: Option<String>,

    /// Dotenv key override; defaults to the environment variable name.
    pub dotenv_name: Option<String>,

    /// File name inside the secrets directory.
    pub file_name: Option<String>,

    /// Secrets directory override for this field.
    pub file_location: Option<String>,

    /// Exact file path, superseding `file_location` and `file_name`.
    pub file_path: Option<String>,

    /// Default value strategy:
    /// - `None`: no default
    /// - `Some(None)`: use `Default::default()`
    /// - `Some(Some(expr))`: use explicit expression as default value
    pub default: Option<Option<syn::Expr>>,

    /// Converter function path (e.g., `"readenv::convert::json"`).
    ///
    /// When specified, bypasses `FromRaw` and uses this function instead.
    pub converter: Option<syn::Path>,

    /// Skip the process environment.
    pub no_env: bool,

    /// Skip the explicit file path and the secrets directory.
    pub no_file: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[readenv(...)]` attributes from a struct field.
    ///
    /// Attributes of other macros are left alone; unknown keys inside
    /// `#[readenv(...)]` are an error.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in readenv_attrs(&field.attrs) {
            attr.parse_nested_meta(|meta| {
                let path = &meta.path;

                if path.is_ident("env_name") {
                    attrs.env_name = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if path.is_ident("dotenv_name") {
                    attrs.dotenv_name = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if path.is_ident("file_name") {
                    attrs.file_name = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if path.is_ident("file_location") {
                    attrs.file_location = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if path.is_ident("file_path") {
                    attrs.file_path = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if path.is_ident("default") {
                    if meta.input.peek(syn::Token![=]) {
                        // default = value - explicit value
                        let expr: syn::Expr = meta.value()?.parse()?;
                        attrs.default = Some(Some(expr));
                    } else {
                        // default - use Default::default()
                        attrs.default = Some(None);
                    }
                } else if path.is_ident("converter") {
                    let func = meta.value()?.parse::<LitStr>()?;
                    attrs.converter = Some(func.parse()?);
                } else if path.is_ident("no_env") {
                    attrs.no_env = true;
                } else if path.is_ident("no_file") {
                    attrs.no_file = true;
                } else {
                    return Err(meta.error("unsupported readenv attribute"));
                }
                Ok(())
            })?;
        }

        Ok(attrs)
    }
}

/// Parsed `#[readenv(...)]` attributes from the struct itself.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prepended to every derived environment variable name.
    pub prefix: String,
}

impl StructAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in readenv_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("prefix") {
                    parsed.prefix = meta.value()?.parse::<LitStr>()?.value();
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level readenv attribute"))
            })?;
        }

        Ok(parsed)
    }
}

fn readenv_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("readenv"))
}
