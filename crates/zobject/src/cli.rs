//! Core logic of the command-line tools:
//! - `zobject-form`    : convert a ZObject between canonical, normal and hybrid form
//! - `zobject-errors`  : summarize an error (or the error of a response) as JSON
//! - `zobject-key-path`: look up a dotted key path in a document
//!
//! The binaries read stdin, call into here and print the result.

use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use zobject_key_path::{find_by_key_path, KeyPathError};

use crate::canonical::{to_canonical, to_hybrid, to_normal};
use crate::constants::Z_RESPONSE_ENVELOPE;
use crate::error_tree::{extract_error_tree, extract_response_error};
use crate::value::{ZObject, ZObjectError};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    ZObject(#[from] ZObjectError),
    #[error(transparent)]
    KeyPath(#[from] KeyPathError),
    #[error("Unknown form: {0}")]
    UnknownForm(String),
    #[error("Not an error or a response carrying one")]
    NoError,
}

/// Log to stderr, filtered by `RUST_LOG`, so stdout stays machine-readable.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

// ── zobject-form ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Form {
    #[default]
    Canonical,
    Normal,
    Hybrid,
}

impl FromStr for Form {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "canonical" => Ok(Form::Canonical),
            "normal" => Ok(Form::Normal),
            "hybrid" => Ok(Form::Hybrid),
            other => Err(CliError::UnknownForm(other.to_string())),
        }
    }
}

impl Form {
    pub fn convert(self, value: &ZObject) -> ZObject {
        match self {
            Form::Canonical => to_canonical(value),
            Form::Normal => to_normal(value),
            Form::Hybrid => to_hybrid(value),
        }
    }
}

/// Convert a ZObject JSON document to `form`, pretty-printed.
pub fn convert_form(json: &str, form: Form) -> Result<String, CliError> {
    let value = ZObject::try_from(serde_json::from_str::<Value>(json)?)?;
    Ok(serde_json::to_string_pretty(&form.convert(&value))?)
}

// ── zobject-errors ────────────────────────────────────────────────────────

/// Summarize a `Z5` error, or the error in a `Z22` response's metadata.
pub fn extract_errors(json: &str) -> Result<String, CliError> {
    let value = ZObject::try_from(serde_json::from_str::<Value>(json)?)?;
    let is_response =
        to_canonical(&value).type_of().and_then(ZObject::as_reference) == Some(Z_RESPONSE_ENVELOPE);
    let summary = if is_response {
        extract_response_error(&value)
    } else {
        extract_error_tree(&value)
    };
    let summary = summary.ok_or(CliError::NoError)?;
    Ok(serde_json::to_string_pretty(&summary)?)
}

// ── zobject-key-path ──────────────────────────────────────────────────────

/// Look up a dotted key path; the empty path is the whole document.
pub fn lookup_key_path(json: &str, key_path: &str) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(json)?;
    let found = find_by_key_path(key_path, &doc)?;
    Ok(serde_json::to_string_pretty(found)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn forms_parse() {
        assert_eq!("canonical".parse::<Form>().unwrap(), Form::Canonical);
        assert_eq!("Normal".parse::<Form>().unwrap(), Form::Normal);
        assert_eq!("hybrid".parse::<Form>().unwrap(), Form::Hybrid);
        assert!(matches!("compact".parse::<Form>(), Err(CliError::UnknownForm(f)) if f == "compact"));
    }

    #[test]
    fn convert_to_each_form() {
        let hybrid = r#"{"Z1K1":"Z6","Z6K1":"x"}"#;
        assert_eq!(parsed(&convert_form(hybrid, Form::Canonical).unwrap()), parsed(r#""x""#));
        assert_eq!(parsed(&convert_form(r#""x""#, Form::Hybrid).unwrap()), parsed(hybrid));
        assert_eq!(
            parsed(&convert_form(r#"["Z6"]"#, Form::Normal).unwrap()),
            parsed(r#"{"Z1K1":{"Z1K1":{"Z1K1":"Z9","Z9K1":"Z7"},"Z7K1":{"Z1K1":"Z9","Z9K1":"Z881"},"Z881K1":{"Z1K1":"Z9","Z9K1":"Z6"}}}"#)
        );
    }

    #[test]
    fn convert_rejects_bad_input() {
        assert!(matches!(convert_form("{", Form::Canonical), Err(CliError::Json(_))));
        assert!(matches!(convert_form("[1]", Form::Canonical), Err(CliError::ZObject(_))));
    }

    #[test]
    fn errors_from_error_and_response() {
        let error = r#"{"Z1K1":"Z5","Z5K1":"Z500","Z5K2":{"Z1K1":"Z500","Z500K1":"oops"}}"#;
        let out = parsed(&extract_errors(error).unwrap());
        assert_eq!(out["errorType"], "Z500");
        assert_eq!(out["stringArgs"][0]["value"], "oops");

        let response = format!(
            r#"{{"Z1K1":"Z22","Z22K1":{{"Z1K1":"Z9","Z9K1":"Z24"}},"Z22K2":{{"Z1K1":{{"Z1K1":"Z7","Z7K1":"Z883","Z883K1":"Z6","Z883K2":"Z1"}},"K1":[{{"Z1K1":"Z7","Z7K1":"Z882","Z882K1":"Z6","Z882K2":"Z1"}},{{"Z1K1":{{"Z1K1":"Z7","Z7K1":"Z882","Z882K1":"Z6","Z882K2":"Z1"}},"K1":"errors","K2":{error}}}]}}}}"#
        );
        assert_eq!(parsed(&extract_errors(&response).unwrap())["errorType"], "Z500");

        assert!(matches!(extract_errors(r#""Z6""#), Err(CliError::NoError)));
    }

    #[test]
    fn key_path_lookup() {
        let doc = r#"{"Z1K1":"Z2","Z2K2":["Z6","a","b"]}"#;
        assert_eq!(parsed(&lookup_key_path(doc, "Z2K2.2").unwrap()), parsed(r#""b""#));
        assert_eq!(parsed(&lookup_key_path(doc, "").unwrap()), parsed(doc));
        assert!(matches!(lookup_key_path(doc, "Z2K3"), Err(CliError::KeyPath(_))));
    }
}
