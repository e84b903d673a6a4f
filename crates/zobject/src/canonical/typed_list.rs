//! Generic type descriptors and the normal-form typed list chain.
//!
//! A generic type is written as a function call that produces the type:
//!
//! ```text
//! {Z1K1: "Z7", Z7K1: "Z881", Z881K1: "Z6"}          list of strings
//! {Z1K1: "Z7", Z7K1: "Z882", Z882K1: .., Z882K2: ..} pair
//! {Z1K1: "Z7", Z7K1: "Z883", Z883K1: .., Z883K2: ..} map
//! ```
//!
//! Under the normal form a list `[T, a, b]` becomes a right-leaning chain of
//! nodes typed by the list type: `{Z1K1: <list of T>, K1: a, K2: {Z1K1: <list of T>, K1: b}}`.

use crate::constants::{
    K1, K2, Z_FUNCTION_CALL, Z_FUNCTION_CALL_FUNCTION, Z_OBJECT_TYPE, Z_TYPED_LIST,
    Z_TYPED_LIST_TYPE, Z_TYPED_MAP, Z_TYPED_MAP_TYPE1, Z_TYPED_MAP_TYPE2, Z_TYPED_PAIR,
    Z_TYPED_PAIR_TYPE1, Z_TYPED_PAIR_TYPE2,
};
use crate::value::{Fields, ZObject};

/// Canonical function-call type invoking the built-in generic `function`
/// with `args` as its keyed arguments.
pub fn generic_type<'a, I>(function: &str, args: I) -> ZObject
where
    I: IntoIterator<Item = (&'a str, ZObject)>,
{
    let mut fields = Fields::new();
    fields.insert(Z_OBJECT_TYPE.to_string(), ZObject::Reference(Z_FUNCTION_CALL.to_string()));
    fields.insert(
        Z_FUNCTION_CALL_FUNCTION.to_string(),
        ZObject::Reference(function.to_string()),
    );
    for (key, arg) in args {
        fields.insert(key.to_string(), arg);
    }
    ZObject::Record(fields)
}

/// `{Z1K1: Z7, Z7K1: Z881, Z881K1: element_type}`
pub fn typed_list_type(element_type: ZObject) -> ZObject {
    generic_type(Z_TYPED_LIST, [(Z_TYPED_LIST_TYPE, element_type)])
}

/// `{Z1K1: Z7, Z7K1: Z882, Z882K1: first, Z882K2: second}`
pub fn typed_pair_type(first: ZObject, second: ZObject) -> ZObject {
    generic_type(
        Z_TYPED_PAIR,
        [(Z_TYPED_PAIR_TYPE1, first), (Z_TYPED_PAIR_TYPE2, second)],
    )
}

/// `{Z1K1: Z7, Z7K1: Z883, Z883K1: key, Z883K2: value}`
pub fn typed_map_type(key: ZObject, value: ZObject) -> ZObject {
    generic_type(Z_TYPED_MAP, [(Z_TYPED_MAP_TYPE1, key), (Z_TYPED_MAP_TYPE2, value)])
}

/// The generic function a canonical function-call type invokes, e.g. `"Z881"`.
pub fn generic_function(canonical_type: &ZObject) -> Option<&str> {
    let fields = canonical_type.as_record()?;
    if fields.get(Z_OBJECT_TYPE)?.as_reference()? != Z_FUNCTION_CALL {
        return None;
    }
    fields.get(Z_FUNCTION_CALL_FUNCTION)?.as_reference()
}

/// Element type of a canonical typed-list type, if it is one.
pub fn list_element_type(canonical_type: &ZObject) -> Option<&ZObject> {
    if generic_function(canonical_type)? != Z_TYPED_LIST {
        return None;
    }
    canonical_type.get(Z_TYPED_LIST_TYPE)
}

/// True when a record carries nothing but the list node keys.
pub(crate) fn is_list_node(fields: &Fields) -> bool {
    fields.keys().all(|k| k == Z_OBJECT_TYPE || k == K1 || k == K2)
}

/// Flatten a `K1`/`K2` chain into an array whose first entry is the element
/// type, converting every entry with `convert`.
///
/// The tail is followed as long as `K2` holds a record. A tail that is
/// already a bare array (`[T, ...]`) is spliced in without its type entry.
pub(crate) fn unroll<F>(head: &Fields, element_type: &ZObject, convert: F) -> Vec<ZObject>
where
    F: Fn(&ZObject) -> ZObject,
{
    let mut items = vec![convert(element_type)];
    let mut node = head;
    loop {
        if let Some(item) = node.get(K1) {
            items.push(convert(item));
        }
        match node.get(K2) {
            Some(ZObject::Record(next)) => node = next,
            Some(ZObject::List(rest)) => {
                items.extend(rest.iter().skip(1).map(&convert));
                break;
            }
            _ => break,
        }
    }
    items
}
