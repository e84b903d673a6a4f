//! Normal form: every value explicit, lists as `K1`/`K2` chains.

use crate::constants::{
    K1, K2, Z_OBJECT, Z_OBJECT_TYPE, Z_QUOTE, Z_REFERENCE, Z_REFERENCE_ID, Z_STRING,
    Z_STRING_VALUE,
};
use crate::value::{Fields, ZObject};

use super::hybrid::explicit_fields;
use super::{quoted, terminal_of, to_canonical, typed_list};

/// Convert a value to normal form.
///
/// Like [`to_hybrid`](super::to_hybrid), except that each list `[T, a, b]`
/// becomes a chain of nodes typed `{Z1K1: Z7, Z7K1: Z881, Z881K1: T}` (itself
/// written in normal form). The last node carries `K1` and no `K2`; an empty
/// list is a single node with neither.
pub fn to_normal(value: &ZObject) -> ZObject {
    match value {
        ZObject::Leaf(s) => ZObject::string_record(s.clone()),
        ZObject::Reference(id) => ZObject::reference_record(id.clone()),
        ZObject::List(items) => normal_list(items),
        ZObject::Record(fields) => normal_record(fields),
    }
}

fn normal_list(items: &[ZObject]) -> ZObject {
    // A list without its element type entry is malformed; treat it as a list of Z1.
    let (element_type, rest) = match items.split_first() {
        Some((first, rest)) => (to_canonical(first), rest),
        None => (ZObject::Reference(Z_OBJECT.to_string()), items),
    };
    let node_type = to_normal(&typed_list::typed_list_type(element_type));

    let mut tail: Option<ZObject> = None;
    for item in rest.iter().rev() {
        let mut node = Fields::with_capacity(3);
        node.insert(Z_OBJECT_TYPE.to_string(), node_type.clone());
        node.insert(K1.to_string(), to_normal(item));
        if let Some(next) = tail.take() {
            node.insert(K2.to_string(), next);
        }
        tail = Some(ZObject::Record(node));
    }
    tail.unwrap_or_else(|| ZObject::record([(Z_OBJECT_TYPE, node_type)]))
}

fn normal_record(fields: &Fields) -> ZObject {
    let Some(declared_type) = fields.get(Z_OBJECT_TYPE) else {
        return ZObject::Record(explicit_fields(fields, to_normal));
    };
    match to_canonical(declared_type).as_reference() {
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
        Some(Z_QUOTE) => return quoted(fields, to_normal(declared_type)),
        _ => {}
    }
    ZObject::Record(explicit_fields(fields, to_normal))
}
