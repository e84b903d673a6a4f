//! Hybrid form: explicit `Z6`/`Z9` records, lists kept as bare arrays.
//!
//! This is the shape the editing layer works on. Lists stay arrays so items
//! can be spliced by index; it is never persisted.

use crate::constants::{
    Z_OBJECT_TYPE, Z_PERSISTENT_OBJECT_ID, Z_QUOTE, Z_REFERENCE, Z_REFERENCE_ID, Z_STRING,
    Z_STRING_VALUE,
};
use crate::value::{Fields, ZObject};

use super::{persistent_id, quoted, terminal_of, to_canonical, typed_list};

/// Convert a value to hybrid form.
///
/// Bare strings become explicit records (classified by the reference shape),
/// records are converted field by field, normal-form typed lists are
/// flattened into arrays and Quote payloads are left alone. The terminal
/// positions `Z6K1` and `Z9K1` and the `Z1K1` of a `Z6`/`Z9` record stay bare.
///
/// # Example
///
/// ```
/// use zobject::{to_hybrid, ZObject};
///
/// let canonical = ZObject::from_json_str(r#"["Z6","a"]"#).unwrap();
/// assert_eq!(
///     to_hybrid(&canonical).to_string(),
///     r#"[{"Z1K1":"Z9","Z9K1":"Z6"},{"Z1K1":"Z6","Z6K1":"a"}]"#
/// );
/// ```
pub fn to_hybrid(value: &ZObject) -> ZObject {
    match value {
        ZObject::Leaf(s) => ZObject::string_record(s.clone()),
        ZObject::Reference(id) => ZObject::reference_record(id.clone()),
        ZObject::List(items) => ZObject::List(items.iter().map(to_hybrid).collect()),
        ZObject::Record(fields) => hybrid_record(fields),
    }
}

fn hybrid_record(fields: &Fields) -> ZObject {
    let Some(declared_type) = fields.get(Z_OBJECT_TYPE) else {
        return ZObject::Record(explicit_fields(fields, to_hybrid));
    };
    let canonical_type = to_canonical(declared_type);

    match canonical_type.as_reference() {
        Some(Z_STRING) => {
            if let Some(s) = terminal_of(fields, Z_STRING_VALUE) {
                return ZObject::string_record(s);
            }
        }
        Some(Z_REFERENCE) => {
            if let Some(id) = terminal_of(fields, Z_REFERENCE_ID) {
                return ZObject::reference_record(id);
            }
        }
        Some(Z_QUOTE) => return quoted(fields, to_hybrid(declared_type)),
        _ => {}
    }

    if let Some(element_type) = typed_list::list_element_type(&canonical_type) {
        if typed_list::is_list_node(fields) {
            return ZObject::List(typed_list::unroll(fields, element_type, to_hybrid));
        }
    }

    ZObject::Record(explicit_fields(fields, to_hybrid))
}

/// Convert every field of a record with `convert`, keeping `Z2K1` a String.
pub(crate) fn explicit_fields(fields: &Fields, convert: fn(&ZObject) -> ZObject) -> Fields {
    fields
        .iter()
        .map(|(key, value)| {
            let converted = match key.as_str() {
                Z_PERSISTENT_OBJECT_ID => persistent_id(value, convert),
                _ => convert(value),
            };
            (key.clone(), converted)
        })
        .collect()
}
