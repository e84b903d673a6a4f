//! Type definitions and where the factory looks them up.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::debug;

use crate::canonical::to_canonical;
use crate::constants::{
    Z_KEY, Z_KEY_ID, Z_KEY_TYPE, Z_OBJECT_TYPE, Z_PERSISTENT_OBJECT, Z_PERSISTENT_OBJECT_VALUE,
    Z_STRING_VALUE, Z_TYPE, Z_TYPE_IDENTITY, Z_TYPE_KEYS,
};
use crate::value::ZObject;

/// One declared key of a type: its id (`Z11K1`, `Z10001K2`, ...) and the
/// type of the value it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDefinition {
    pub id: String,
    pub value_type: ZObject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    /// `Z4K1`: a reference for named types, a function call for generics.
    pub identity: ZObject,
    pub keys: Vec<KeyDefinition>,
}

impl TypeDefinition {
    pub fn new<I>(identity: impl Into<ZObject>, keys: I) -> Self
    where
        I: IntoIterator<Item = (String, ZObject)>,
    {
        Self {
            identity: identity.into(),
            keys: keys
                .into_iter()
                .map(|(id, value_type)| KeyDefinition { id, value_type })
                .collect(),
        }
    }

    /// Read a definition out of a `Z4` type, or a `Z2` persistent object
    /// wrapping one, in any form. Keys that are not well-formed `Z3`
    /// records are skipped.
    pub fn from_zobject(value: &ZObject) -> Option<Self> {
        let value = to_canonical(value);
        let type_object = match value.type_of()?.as_reference()? {
            Z_TYPE => &value,
            Z_PERSISTENT_OBJECT => value.get(Z_PERSISTENT_OBJECT_VALUE)?,
            _ => return None,
        };
        if type_object.type_of()?.as_reference()? != Z_TYPE {
            return None;
        }

        let identity = type_object.get(Z_TYPE_IDENTITY)?.clone();
        Some(Self { identity, keys: key_definitions_of(type_object) })
    }

    /// The id a registry files this definition under, if it is named.
    pub fn id(&self) -> Option<&str> {
        self.identity.as_reference()
    }
}

/// Keys declared in the `Z4K2` list of a canonical `Z4`.
pub(crate) fn key_definitions_of(type_object: &ZObject) -> Vec<KeyDefinition> {
    match type_object.get(Z_TYPE_KEYS).and_then(ZObject::as_list) {
        Some(items) => items.iter().skip(1).filter_map(key_definition).collect(),
        None => Vec::new(),
    }
}

fn key_definition(key: &ZObject) -> Option<KeyDefinition> {
    if key.get(Z_OBJECT_TYPE)?.as_reference()? != Z_KEY {
        return None;
    }
    let id = key_id(key.get(Z_KEY_ID)?)?;
    let value_type = key.get(Z_KEY_TYPE)?.clone();
    Some(KeyDefinition { id, value_type })
}

/// `Z3K2` in canonical form: a bare string, or an explicit String record
/// when the id happens to look like a reference.
fn key_id(value: &ZObject) -> Option<String> {
    match value {
        ZObject::Leaf(s) | ZObject::Reference(s) => Some(s.clone()),
        ZObject::Record(_) => value.get(Z_STRING_VALUE)?.as_str().map(str::to_string),
        ZObject::List(_) => None,
    }
}

/// Source of type definitions for the factory.
///
/// Lookups are synchronous against whatever is already cached. Ids that are
/// not cached can be handed to [`request_fetch`](Self::request_fetch); the
/// factory never waits for the result.
pub trait TypeRegistry {
    fn lookup_type_definition(&self, id: &str) -> Option<&TypeDefinition>;

    /// Ask for `ids` to be loaded for a later build.
    fn request_fetch(&self, _ids: &[String]) {}
}

/// A registry over a map, recording every fetch request it receives.
#[derive(Debug, Default)]
pub struct InMemoryTypeRegistry {
    types: HashMap<String, TypeDefinition>,
    fetch_requests: RefCell<Vec<Vec<String>>>,
}

impl InMemoryTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, definition: TypeDefinition) {
        self.types.insert(id.into(), definition);
    }

    /// Parse and file a stored `Z2`/`Z4` object under its identity.
    /// Returns the id it was filed under.
    pub fn insert_zobject(&mut self, value: &ZObject) -> Option<String> {
        let definition = TypeDefinition::from_zobject(value)?;
        let id = definition.id()?.to_string();
        self.types.insert(id.clone(), definition);
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Every batch passed to `request_fetch` so far, oldest first.
    pub fn fetch_requests(&self) -> Vec<Vec<String>> {
        self.fetch_requests.borrow().clone()
    }
}

impl TypeRegistry for InMemoryTypeRegistry {
    fn lookup_type_definition(&self, id: &str) -> Option<&TypeDefinition> {
        self.types.get(id)
    }

    fn request_fetch(&self, ids: &[String]) {
        debug!(?ids, "fetch requested");
        self.fetch_requests.borrow_mut().push(ids.to_vec());
    }
}
