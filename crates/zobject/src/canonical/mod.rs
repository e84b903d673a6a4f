//! Conversion between the three serialization forms of a ZObject.
//!
//! | Form      | Strings and references        | Lists              | Used for            |
//! |-----------|-------------------------------|--------------------|---------------------|
//! | canonical | bare strings                  | bare arrays        | persistence, network |
//! | normal    | explicit `Z6` / `Z9` records  | `K1`/`K2` chains   | evaluation          |
//! | hybrid    | explicit `Z6` / `Z9` records  | bare arrays        | the editing layer   |
//!
//! Every conversion accepts input in any form (producers are not consistent
//! about which one they emit) and is idempotent on its own output. None of
//! them fail: a shape that is not recognized is carried through with its
//! children converted.

pub mod hybrid;
pub mod normal;
pub mod typed_list;

pub use hybrid::to_hybrid;
pub use normal::to_normal;

use serde_json::Value;
use tracing::debug;

use crate::constants::{
    is_reference_shaped, Z_OBJECT_TYPE, Z_PERSISTENT_OBJECT_ID, Z_QUOTE, Z_REFERENCE,
    Z_REFERENCE_ID, Z_STRING, Z_STRING_VALUE,
};
use crate::value::{Fields, ZObject};

/// Convert a value to canonical form.
///
/// # Example
///
/// ```
/// use zobject::{to_canonical, ZObject};
///
/// let hybrid = ZObject::from_json_str(
///     r#"[{"Z1K1":"Z9","Z9K1":"Z6"},{"Z1K1":"Z6","Z6K1":"a"}]"#,
/// ).unwrap();
/// assert_eq!(to_canonical(&hybrid).to_string(), r#"["Z6","a"]"#);
/// ```
pub fn to_canonical(value: &ZObject) -> ZObject {
    match value {
        ZObject::Leaf(_) | ZObject::Reference(_) => value.clone(),
        ZObject::List(items) => ZObject::List(items.iter().map(to_canonical).collect()),
        ZObject::Record(fields) => canonical_record(fields),
    }
}

fn canonical_record(fields: &Fields) -> ZObject {
    let Some(declared_type) = fields.get(Z_OBJECT_TYPE) else {
        return ZObject::Record(canonical_fields(fields, None));
    };
    let type_ = to_canonical(declared_type);
    if type_.as_reference() == Some(Z_QUOTE) {
        return quoted(fields, type_);
    }

    match type_.as_reference() {
        Some(Z_STRING) => {
            if let Some(s) = terminal_of(fields, Z_STRING_VALUE) {
                // Keep reference-shaped text explicit, or it would come back as a reference.
                return if is_reference_shaped(&s) {
                    ZObject::string_record(s)
                } else {
                    ZObject::Leaf(s)
                };
            }
        }
        Some(Z_REFERENCE) => {
            if let Some(id) = terminal_of(fields, Z_REFERENCE_ID) {
                return if !id.is_empty() && is_reference_shaped(&id) {
                    ZObject::Reference(id)
                } else {
                    ZObject::reference_record(id)
                };
            }
        }
        _ => {}
    }

    if let Some(element_type) = typed_list::list_element_type(&type_) {
        if typed_list::is_list_node(fields) {
            return ZObject::List(typed_list::unroll(fields, element_type, to_canonical));
        }
    }

    ZObject::Record(canonical_fields(fields, Some(type_)))
}

fn canonical_fields(fields: &Fields, type_: Option<ZObject>) -> Fields {
    let mut type_ = type_;
    let mut out = Fields::with_capacity(fields.len());
    for (key, value) in fields {
        let converted = match key.as_str() {
            Z_OBJECT_TYPE => match type_.take() {
                Some(t) => t,
                None => to_canonical(value),
            },
            Z_PERSISTENT_OBJECT_ID => persistent_id(value, to_canonical),
            _ => to_canonical(value),
        };
        out.insert(key.clone(), converted);
    }
    out
}

/// `Z2K1` always holds a String, even when its text looks like a reference
/// or arrives wrapped in a `Z9` record.
pub(crate) fn persistent_id(value: &ZObject, convert: fn(&ZObject) -> ZObject) -> ZObject {
    match terminal_string(value) {
        Some(id) if is_reference_shaped(&id) => ZObject::string_record(id),
        Some(text) => convert(&ZObject::Leaf(text)),
        None => convert(value),
    }
}

/// Copy a Quote through with only its type converted: the payload is opaque.
pub(crate) fn quoted(fields: &Fields, type_: ZObject) -> ZObject {
    let mut out = fields.clone();
    out.insert(Z_OBJECT_TYPE.to_string(), type_);
    ZObject::Record(out)
}

/// The bare string of a `Z6`/`Z9` record whose only other key is `value_key`.
///
/// The value may itself be wrapped once more (`Z6K1: {Z1K1: Z6, Z6K1: "x"}`),
/// which some producers emit; that is unwrapped too.
pub(crate) fn terminal_of(fields: &Fields, value_key: &str) -> Option<String> {
    if fields.len() != 2 {
        return None;
    }
    terminal_string(fields.get(value_key)?)
}

fn terminal_string(value: &ZObject) -> Option<String> {
    match value {
        ZObject::Leaf(s) | ZObject::Reference(s) => Some(s.clone()),
        ZObject::Record(fields) => {
            match to_canonical(fields.get(Z_OBJECT_TYPE)?).as_reference()? {
                Z_STRING => terminal_of(fields, Z_STRING_VALUE),
                Z_REFERENCE => terminal_of(fields, Z_REFERENCE_ID),
                _ => None,
            }
        }
        ZObject::List(_) => None,
    }
}

// ── JSON entry points ─────────────────────────────────────────────────────

fn convert_json(value: &Value, convert: fn(&ZObject) -> ZObject) -> Option<Value> {
    if value.is_null() {
        return None;
    }
    match ZObject::try_from(value) {
        Ok(z) => Some(convert(&z).to_json()),
        Err(e) => {
            debug!(error = %e, "not a ZObject, passing through unchanged");
            Some(value.clone())
        }
    }
}

/// [`to_canonical`] over JSON. `null` yields `None`; JSON outside the ZObject
/// grammar is returned unchanged.
pub fn canonicalize_json(value: &Value) -> Option<Value> {
    convert_json(value, to_canonical)
}

/// [`to_hybrid`] over JSON, with the same posture as [`canonicalize_json`].
pub fn hybridize_json(value: &Value) -> Option<Value> {
    convert_json(value, to_hybrid)
}

/// [`to_normal`] over JSON, with the same posture as [`canonicalize_json`].
pub fn normalize_json(value: &Value) -> Option<Value> {
    convert_json(value, to_normal)
}
