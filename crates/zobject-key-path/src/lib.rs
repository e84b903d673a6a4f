//! Dotted key paths for ZObject trees.
//!
//! A key path addresses a value inside a ZObject by listing the keys (and
//! list indices) to descend through, joined with dots: `"Z2K2.Z12K1.1.Z11K2"`.
//! The empty string addresses the root.
//!
//! # Example
//!
//! ```
//! use zobject_key_path::{parse_key_path, format_key_path, get};
//!
//! let path = parse_key_path("Z2K2.Z11K2");
//! assert_eq!(path, vec!["Z2K2".to_string(), "Z11K2".to_string()]);
//! assert_eq!(format_key_path(&path), "Z2K2.Z11K2");
//!
//! let doc = serde_json::json!({"Z1K1": "Z2", "Z2K2": {"Z1K1": "Z11", "Z11K2": "hi"}});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!("hi")));
//! ```

use serde_json::Value;
use std::borrow::Cow;
use thiserror::Error;

pub mod types;
pub use types::{classify_step, key_owner, Path, PathStep, StepKind};

pub mod validate;
pub use validate::{validate_key_path, validate_path, ValidationError};

/// Separator between path steps.
pub const SEPARATOR: char = '.';

/// Parse a dotted key path into path steps.
///
/// # Example
///
/// ```
/// use zobject_key_path::parse_key_path;
///
/// assert_eq!(parse_key_path(""), Vec::<String>::new());
/// assert_eq!(parse_key_path("Z2K2"), vec!["Z2K2"]);
/// assert_eq!(parse_key_path("Z2K2.0.K1"), vec!["Z2K2", "0", "K1"]);
/// ```
pub fn parse_key_path(key_path: &str) -> Vec<String> {
    if key_path.is_empty() {
        return Vec::new();
    }
    key_path.split(SEPARATOR).map(str::to_string).collect()
}

/// Format path steps into a dotted key path.
///
/// # Example
///
/// ```
/// use zobject_key_path::format_key_path;
///
/// assert_eq!(format_key_path(&[]), "");
/// assert_eq!(format_key_path(&["Z2K2".to_string(), "1".to_string()]), "Z2K2.1");
/// ```
pub fn format_key_path(path: &[String]) -> String {
    path.join(".")
}

/// Convert a key path string to a path.
pub fn to_path<'a>(key_path: impl Into<Cow<'a, str>>) -> Vec<String> {
    parse_key_path(&key_path.into())
}

/// Check if a path points to the root value.
pub fn is_root(path: &[String]) -> bool {
    path.is_empty()
}

/// Check if `parent` path strictly contains the `child` path.
///
/// # Example
///
/// ```
/// use zobject_key_path::{is_child, parse_key_path};
///
/// assert!(is_child(&parse_key_path("Z2K2"), &parse_key_path("Z2K2.Z11K1")));
/// assert!(!is_child(&parse_key_path("Z2K2.Z11K1"), &parse_key_path("Z2K2")));
/// ```
pub fn is_child(parent: &[String], child: &[String]) -> bool {
    parent.len() < child.len() && child.starts_with(parent)
}

/// Check if two paths are equal.
pub fn is_path_equal(p1: &[String], p2: &[String]) -> bool {
    p1 == p2
}

/// Get the parent path of a given path.
///
/// # Errors
///
/// Returns an error if the path has no parent (is empty/root).
pub fn parent(path: &[String]) -> Result<Vec<String>, KeyPathError> {
    match path.split_last() {
        Some((_, rest)) => Ok(rest.to_vec()),
        None => Err(KeyPathError::NoParent),
    }
}

/// Append one step to a path.
pub fn child(path: &[String], step: impl Into<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(path.len() + 1);
    out.extend_from_slice(path);
    out.push(step.into());
    out
}

/// Check if a string represents a valid non-negative integer list index.
///
/// # Example
///
/// ```
/// use zobject_key_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("K1"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Get a value from a JSON document by path.
///
/// Returns `None` if the path doesn't exist.
pub fn get<'a>(val: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) => {
                if !is_valid_index(step) {
                    return None;
                }
                arr.get(step.parse::<usize>().ok()?)?
            }
            Value::Object(map) => map.get(step)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get a mutable reference to a value in a JSON document by path.
pub fn get_mut<'a>(val: &'a mut Value, path: &[String]) -> Option<&'a mut Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) => {
                if !is_valid_index(step) {
                    return None;
                }
                arr.get_mut(step.parse::<usize>().ok()?)?
            }
            Value::Object(map) => map.get_mut(step)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Look up a value by a key path string, validating the path first.
///
/// # Errors
///
/// - `KeyPathError::Invalid` - if the key path is malformed
/// - `KeyPathError::NotFound` - if no value lives at the path
pub fn find_by_key_path<'a>(key_path: &str, val: &'a Value) -> Result<&'a Value, KeyPathError> {
    validate_key_path(key_path)?;
    get(val, &parse_key_path(key_path)).ok_or_else(|| KeyPathError::NotFound(key_path.to_string()))
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyPathError {
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error("NO_PARENT")]
    NoParent,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
