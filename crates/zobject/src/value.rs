//! The ZObject value model.
//!
//! A ZObject is a tagged recursive union of scalars, lists and keyed records.
//! The same logical value can be written in three shapes (canonical, normal
//! and hybrid, see [`crate::canonical`]); this type can hold any of them,
//! because all three are made of the same four building blocks.
//!
//! | Variant     | JSON                       |
//! |-------------|----------------------------|
//! | `Leaf`      | string, not reference-shaped |
//! | `Reference` | string matching `Z[1-9][0-9]*` or `Z0` |
//! | `List`      | array                      |
//! | `Record`    | object (insertion ordered) |

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::constants::{
    is_reference_shaped, Z_OBJECT_TYPE, Z_REFERENCE, Z_REFERENCE_ID, Z_STRING, Z_STRING_VALUE,
};

/// Ordered fields of a record.
pub type Fields = IndexMap<String, ZObject>;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZObjectError {
    /// JSON numbers, booleans and `null` have no ZObject counterpart.
    #[error("unsupported JSON {found} at {path:?}")]
    UnsupportedJson { path: String, found: &'static str },
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}

// ── ZObject ───────────────────────────────────────────────────────────────

/// A ZObject value in any serialization form.
///
/// Bare strings are classified on the way in: build them with
/// [`ZObject::string`] (or `From<&str>`) so that `Leaf` never holds a
/// reference-shaped string and equal JSON always means equal values.
///
/// A hand-built `Leaf` or `Reference` must agree with
/// [`is_reference_shaped`]. Nothing downstream keeps the tag of a
/// mismatched one: JSON output and the row store both read the text back
/// through [`ZObject::string`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum ZObject {
    Leaf(String),
    Reference(String),
    List(Vec<ZObject>),
    Record(Fields),
}

impl ZObject {
    /// Classify a bare string as `Reference` or `Leaf`.
    pub fn string(s: impl Into<String>) -> Self {
        let s = s.into();
        if is_reference_shaped(&s) {
            ZObject::Reference(s)
        } else {
            ZObject::Leaf(s)
        }
    }

    /// Build a record from `(key, value)` pairs, keeping their order.
    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ZObject)>,
    {
        ZObject::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Explicit String record: `{Z1K1: "Z6", Z6K1: s}`.
    pub fn string_record(s: impl Into<String>) -> Self {
        ZObject::record([
            (Z_OBJECT_TYPE, ZObject::Reference(Z_STRING.to_string())),
            (Z_STRING_VALUE, ZObject::string(s)),
        ])
    }

    /// Explicit Reference record: `{Z1K1: "Z9", Z9K1: id}`.
    pub fn reference_record(id: impl Into<String>) -> Self {
        ZObject::record([
            (Z_OBJECT_TYPE, ZObject::Reference(Z_REFERENCE.to_string())),
            (Z_REFERENCE_ID, ZObject::string(id)),
        ])
    }

    /// The empty reference `{Z1K1: "Z9", Z9K1: ""}`, a slot still to be filled.
    pub fn empty_reference() -> Self {
        ZObject::reference_record("")
    }

    /// The string content of a `Leaf` or `Reference`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ZObject::Leaf(s) | ZObject::Reference(s) => Some(s),
            _ => None,
        }
    }

    /// The id of a bare `Reference`.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            ZObject::Reference(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ZObject]> {
        match self {
            ZObject::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Fields> {
        match self {
            ZObject::Record(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Fields> {
        match self {
            ZObject::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Field `key` of a record.
    pub fn get(&self, key: &str) -> Option<&ZObject> {
        self.as_record().and_then(|fields| fields.get(key))
    }

    /// The declared type (`Z1K1`) of a record.
    pub fn type_of(&self) -> Option<&ZObject> {
        self.get(Z_OBJECT_TYPE)
    }

    /// True for `{Z1K1: "Z9", Z9K1: ""}` in any form.
    pub fn is_empty_reference(&self) -> bool {
        let Some(fields) = self.as_record() else {
            return false;
        };
        fields.len() == 2
            && fields.get(Z_OBJECT_TYPE).and_then(ZObject::as_reference) == Some(Z_REFERENCE)
            && fields.get(Z_REFERENCE_ID).and_then(ZObject::as_str) == Some("")
    }

    /// Convert to a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            ZObject::Leaf(s) | ZObject::Reference(s) => Value::String(s.clone()),
            ZObject::List(items) => Value::Array(items.iter().map(ZObject::to_json).collect()),
            ZObject::Record(fields) => {
                let mut map = Map::with_capacity(fields.len());
                for (k, v) in fields {
                    map.insert(k.clone(), v.to_json());
                }
                Value::Object(map)
            }
        }
    }

    /// Parse a JSON text into a ZObject.
    pub fn from_json_str(json: &str) -> Result<Self, ZObjectError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| ZObjectError::InvalidJson(e.to_string()))?;
        ZObject::try_from(&value)
    }
}

fn from_json_at(value: &Value, path: &mut Vec<String>) -> Result<ZObject, ZObjectError> {
    let found = match value {
        Value::String(s) => return Ok(ZObject::string(s.as_str())),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                path.push(i.to_string());
                out.push(from_json_at(item, path)?);
                path.pop();
            }
            return Ok(ZObject::List(out));
        }
        Value::Object(map) => {
            let mut fields = Fields::with_capacity(map.len());
            for (k, v) in map {
                path.push(k.clone());
                fields.insert(k.clone(), from_json_at(v, path)?);
                path.pop();
            }
            return Ok(ZObject::Record(fields));
        }
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
    };
    Err(ZObjectError::UnsupportedJson {
        path: zobject_key_path::format_key_path(path),
        found,
    })
}

impl TryFrom<&Value> for ZObject {
    type Error = ZObjectError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        from_json_at(value, &mut Vec::new())
    }
}

impl TryFrom<Value> for ZObject {
    type Error = ZObjectError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        ZObject::try_from(&value)
    }
}

impl From<ZObject> for Value {
    fn from(z: ZObject) -> Self {
        z.to_json()
    }
}

impl From<&str> for ZObject {
    fn from(s: &str) -> Self {
        ZObject::string(s)
    }
}

impl From<String> for ZObject {
    fn from(s: String) -> Self {
        ZObject::string(s)
    }
}

impl From<Vec<ZObject>> for ZObject {
    fn from(items: Vec<ZObject>) -> Self {
        ZObject::List(items)
    }
}

impl fmt::Display for ZObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
