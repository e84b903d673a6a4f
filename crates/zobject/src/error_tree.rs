//! Error extraction for display.
//!
//! An error (`Z5`) carries its error type in `Z5K1` and its details in
//! `Z5K2`, usually a record whose fields are strings or further errors. The
//! extractor turns that into an [`ErrorSummary`] tree: string fields become
//! arguments, nested errors (alone or as a `["Z5", ...]` list) become
//! children and everything else is dropped.

use serde::Serialize;
use tracing::debug;

use crate::canonical::to_canonical;
use crate::constants::{
    K1, K2, RESPONSE_ERRORS_KEY, Z_ERROR, Z_ERROR_TYPE, Z_ERROR_VALUE, Z_OBJECT_TYPE,
    Z_RESPONSE_ENVELOPE, Z_RESPONSE_ENVELOPE_METADATA, Z_STRING, Z_STRING_VALUE,
};
use crate::value::ZObject;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSummary {
    pub error_type: String,
    pub children: Vec<ErrorSummary>,
    pub string_args: Vec<StringArg>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringArg {
    pub key: String,
    pub value: String,
}

/// Summarize an error, or `None` if `value` is not a `Z5` with a
/// referenced error type.
///
/// # Example
///
/// ```
/// use zobject::{extract_error_tree, ZObject};
///
/// let error = ZObject::from_json_str(r#"{
///     "Z1K1": "Z5",
///     "Z5K1": "Z507",
///     "Z5K2": {"Z1K1": "Z507", "Z507K1": "Z10001"}
/// }"#).unwrap();
/// let summary = extract_error_tree(&error).unwrap();
/// assert_eq!(summary.error_type, "Z507");
/// assert_eq!(summary.string_args[0].key, "Z507K1");
/// ```
pub fn extract_error_tree(value: &ZObject) -> Option<ErrorSummary> {
    extract(&to_canonical(value))
}

/// Summarize the error a function-call response carries in the `"errors"`
/// entry of its metadata map.
pub fn extract_response_error(response: &ZObject) -> Option<ErrorSummary> {
    let response = to_canonical(response);
    if response.type_of()?.as_reference()? != Z_RESPONSE_ENVELOPE {
        return None;
    }
    let metadata = response.get(Z_RESPONSE_ENVELOPE_METADATA)?;
    let pairs = metadata.get(K1)?.as_list()?;
    let error = pairs
        .iter()
        .skip(1)
        .find(|pair| pair.get(K1).and_then(ZObject::as_str) == Some(RESPONSE_ERRORS_KEY))?
        .get(K2)?;
    extract(error)
}

fn extract(value: &ZObject) -> Option<ErrorSummary> {
    if !is_error(value) {
        return None;
    }
    let Some(error_type) = value.get(Z_ERROR_TYPE).and_then(ZObject::as_reference) else {
        debug!(error = %value, "error without a referenced type");
        return None;
    };
    let mut summary = ErrorSummary {
        error_type: error_type.to_string(),
        children: Vec::new(),
        string_args: Vec::new(),
    };

    if let Some(details) = value.get(Z_ERROR_VALUE) {
        match details.as_record() {
            Some(fields) if !is_error(details) && string_of(details).is_none() => {
                for (key, field) in fields {
                    if key != Z_OBJECT_TYPE {
                        classify(key, field, &mut summary);
                    }
                }
            }
            _ => classify(Z_ERROR_VALUE, details, &mut summary),
        }
    }
    Some(summary)
}

fn classify(key: &str, value: &ZObject, summary: &mut ErrorSummary) {
    if let Some(s) = string_of(value) {
        summary.string_args.push(StringArg { key: key.to_string(), value: s.to_string() });
        return;
    }
    match value {
        ZObject::Record(_) => summary.children.extend(extract(value)),
        ZObject::List(items) => {
            if items.first().and_then(ZObject::as_reference) == Some(Z_ERROR) {
                summary.children.extend(items.iter().skip(1).filter_map(extract));
            }
        }
        ZObject::Leaf(_) | ZObject::Reference(_) => {}
    }
}

fn is_error(value: &ZObject) -> bool {
    value.type_of().and_then(ZObject::as_reference) == Some(Z_ERROR)
}

/// Text of a bare string, or of a String record kept explicit because its
/// text is reference-shaped.
fn string_of(value: &ZObject) -> Option<&str> {
    match value {
        ZObject::Leaf(s) | ZObject::Reference(s) => Some(s),
        ZObject::Record(fields) if fields.len() == 2 => {
            if fields.get(Z_OBJECT_TYPE)?.as_reference()? != Z_STRING {
                return None;
            }
            fields.get(Z_STRING_VALUE)?.as_str()
        }
        _ => None,
    }
}
