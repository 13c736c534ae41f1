//! Parser for `.env` files
//!
//! Supported syntax:
//!
//! ```text
//! # full-line comment
//! export HOST=localhost       # trailing comment
//! PORT = 8080
//! GREETING="multi
//! line value with a # inside"
//! LITERAL='no $escapes\here'
//! ```
//!
//! Unquoted values run up to the first `#` and are trimmed; quote a value
//! to keep a literal `#`. Double-quoted values may span lines and
//! understand `\"` and `\\`. Single-quoted values are taken literally.
//! A name assigned twice keeps the last value.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::ReadEnvError;

/// Reason a dotenv entry was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The line is neither blank, a comment nor a `KEY=VALUE` assignment.
    MissingEquals,
    /// The key is empty or contains characters other than `[A-Za-z0-9_.-]`.
    InvalidKey,
    /// A quoted value has no closing quote before the end of input.
    UnterminatedQuote,
    /// Something other than a comment follows the closing quote.
    TrailingCharacters,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::MissingEquals => "expected KEY=VALUE",
            Self::InvalidKey => "invalid variable name",
            Self::UnterminatedQuote => "unterminated quoted value",
            Self::TrailingCharacters => "unexpected characters after closing quote",
        };
        f.write_str(reason)
    }
}

/// Malformed dotenv syntax.
///
/// Only the line number and the reason are kept; the offending text is
/// never included as it may contain secrets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line where the offending entry starts
    pub line: usize,
    /// What was wrong with it
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// Parse dotenv text into a name to value mapping.
pub fn parse(text: &str) -> Result<HashMap<String, String>, ParseError> {
    let mut vars = HashMap::new();
    let mut lines = text.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let line_no = index + 1;
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line
            .strip_prefix("export ")
            .map(str::trim_start)
            .unwrap_or(line);

        let (key, rest) = line
            .split_once('=')
            .ok_or(ParseError::new(line_no, ParseErrorKind::MissingEquals))?;
        let key = key.trim();
        if !is_valid_key(key) {
            return Err(ParseError::new(line_no, ParseErrorKind::InvalidKey));
        }

        let rest = rest.trim_start();
        let value = match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let (value, tail) = read_quoted(&rest[1..], quote, &mut lines)
                    .ok_or(ParseError::new(line_no, ParseErrorKind::UnterminatedQuote))?;
                let tail = tail.trim_start();
                if !(tail.is_empty() || tail.starts_with('#')) {
                    return Err(ParseError::new(line_no, ParseErrorKind::TrailingCharacters));
                }
                value
            }
            _ => strip_comment(rest).trim().to_string(),
        };

        vars.insert(key.to_string(), value);
    }

    Ok(vars)
}

/// Read and parse a dotenv file.
pub fn from_path(path: impl AsRef<Path>) -> Result<HashMap<String, String>, ReadEnvError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ReadEnvError::DotenvRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text).map_err(|source| ReadEnvError::DotenvParse {
        path: path.to_path_buf(),
        source,
    })
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Cut an unquoted value at its comment, if any.
fn strip_comment(value: &str) -> &str {
    value.split_once('#').map_or(value, |(before, _)| before)
}

/// Consume a quoted value starting right after the opening quote.
///
/// Pulls further lines from `lines` until the closing quote is found and
/// returns the value together with whatever follows the closing quote on
/// its line. `None` means the input ended first.
fn read_quoted<'a, I>(first: &'a str, quote: char, lines: &mut I) -> Option<(String, &'a str)>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut value = String::new();
    let mut current = first;

    loop {
        let mut chars = current.char_indices();
        while let Some((i, c)) = chars.next() {
            if c == quote {
                return Some((value, &current[i + c.len_utf8()..]));
            }
            if c == '\\' && quote == '"' {
                match chars.clone().next() {
                    Some((_, next @ ('"' | '\\'))) => {
                        value.push(next);
                        chars.next();
                    }
                    _ => value.push(c),
                }
                continue;
            }
            value.push(c);
        }

        let (_, next) = lines.next()?;
        value.push('\n');
        current = next;
    }
}
