//! Type-skeleton factory: the empty value a user starts from after picking
//! a type for a field.
//!
//! The factory walks the type's declared keys depth first, building one empty
//! value per key from that key's type. Built-in types get hard-coded
//! skeletons, generic types (typed list, pair and map) get their own shapes
//! and types the registry does not know get a record holding only `Z1K1`.
//!
//! Type graphs may be recursive: a type can hold a list of itself, or two
//! types can each hold the other. The factory keeps the types on the current
//! construction path and, when a key would re-enter one of them, fills that
//! key with an empty reference instead. The same type may still appear in
//! sibling branches.

mod builtins;
pub mod registry;

pub use registry::{InMemoryTypeRegistry, KeyDefinition, TypeDefinition, TypeRegistry};

use std::collections::HashSet;

use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::canonical::{to_canonical, typed_list};
use crate::constants::{
    K1, K2, PLACEHOLDER_ZID, Z_FUNCTION, Z_FUNCTION_IDENTITY, Z_OBJECT, Z_OBJECT_TYPE,
    Z_PERSISTENT_OBJECT, Z_PERSISTENT_OBJECT_VALUE, Z_TYPE, Z_TYPED_LIST, Z_TYPED_LIST_TYPE,
    Z_TYPED_MAP, Z_TYPED_MAP_TYPE1, Z_TYPED_MAP_TYPE2, Z_TYPED_PAIR, Z_TYPED_PAIR_TYPE1,
    Z_TYPED_PAIR_TYPE2, Z_TYPE_IDENTITY,
};
use crate::value::{Fields, ZObject};

use self::builtins::builtin_default;
use self::registry::key_definitions_of;

#[derive(Debug, Clone, Default)]
pub struct FactoryOptions {
    /// Language placed in new monolingual strings and stringsets; without
    /// one they get an empty reference.
    pub user_language: Option<String>,
}

/// State of a single build: the construction path and the unknown ids
/// met so far.
#[derive(Default)]
struct Build {
    path: HashSet<String>,
    missing: IndexSet<String>,
}

pub struct Factory<'a, R: TypeRegistry + ?Sized> {
    registry: &'a R,
    options: FactoryOptions,
}

impl<'a, R: TypeRegistry + ?Sized> Factory<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self::with_options(registry, FactoryOptions::default())
    }

    pub fn with_options(registry: &'a R, options: FactoryOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &FactoryOptions {
        &self.options
    }

    /// The empty value of `type_`, in canonical form.
    ///
    /// `type_` is a type id, a generic function-call type or an inline `Z4`,
    /// in any form. Every id the registry could not resolve is passed to one
    /// [`TypeRegistry::request_fetch`] call once the value is built.
    ///
    /// # Example
    ///
    /// ```
    /// use zobject::factory::{Factory, InMemoryTypeRegistry};
    /// use zobject::ZObject;
    ///
    /// let registry = InMemoryTypeRegistry::new();
    /// let factory = Factory::new(&registry);
    /// assert_eq!(
    ///     factory.build_default(&ZObject::from("Z12")).to_string(),
    ///     r#"{"Z1K1":"Z12","Z12K1":["Z11"]}"#
    /// );
    /// ```
    pub fn build_default(&self, type_: &ZObject) -> ZObject {
        let mut build = Build::default();
        let value = self.build(&to_canonical(type_), &mut build);
        self.flush(build);
        value
    }

    /// A new persistent object (`Z2`) whose value is the empty value of
    /// `payload_type`. A new type or function names itself with the
    /// placeholder id.
    pub fn build_persistent_object(&self, payload_type: &ZObject) -> ZObject {
        let mut build = Build::default();
        let payload_type = to_canonical(payload_type);
        let mut payload = self.build(&payload_type, &mut build);
        self.flush(build);

        let identity_key = match payload_type.as_reference() {
            Some(Z_TYPE) => Some(Z_TYPE_IDENTITY),
            Some(Z_FUNCTION) => Some(Z_FUNCTION_IDENTITY),
            _ => None,
        };
        if let (Some(key), Some(fields)) = (identity_key, payload.as_record_mut()) {
            fields.insert(key.to_string(), ZObject::Reference(PLACEHOLDER_ZID.to_string()));
        }

        let mut object = builtin_default(Z_PERSISTENT_OBJECT, &self.options)
            .unwrap_or_else(|| ZObject::Record(Fields::new()));
        if let Some(fields) = object.as_record_mut() {
            fields.insert(Z_PERSISTENT_OBJECT_VALUE.to_string(), payload);
        }
        object
    }

    fn flush(&self, build: Build) {
        if build.missing.is_empty() {
            return;
        }
        let ids: Vec<String> = build.missing.into_iter().collect();
        debug!(?ids, "requesting unknown types");
        self.registry.request_fetch(&ids);
    }

    fn build(&self, type_: &ZObject, build: &mut Build) -> ZObject {
        match type_ {
            ZObject::Reference(id) => self.build_named(id, type_, build),
            ZObject::Record(fields) => match fields.get(Z_OBJECT_TYPE).and_then(ZObject::as_reference) {
                Some(Z_TYPE) => self.build_inline(type_, build),
                Some(_) if typed_list::generic_function(type_).is_some() => {
                    self.build_generic(type_, build)
                }
                // Function calls to user functions and anything else.
                _ => ZObject::record([(Z_OBJECT_TYPE, type_.clone())]),
            },
            ZObject::Leaf(_) | ZObject::List(_) => {
                debug!(type_ = %type_, "not a type, using an empty reference");
                ZObject::empty_reference()
            }
        }
    }

    fn build_named(&self, id: &str, type_: &ZObject, build: &mut Build) -> ZObject {
        if let Some(value) = builtin_default(id, &self.options) {
            return value;
        }
        let any = || ZObject::Reference(Z_OBJECT.to_string());
        let generic = match id {
            Z_TYPED_LIST => Some(typed_list::typed_list_type(any())),
            Z_TYPED_PAIR => Some(typed_list::typed_pair_type(any(), any())),
            Z_TYPED_MAP => Some(typed_list::typed_map_type(any(), any())),
            _ => None,
        };
        if let Some(generic) = generic {
            // A generic named without arguments works over Z1.
            return self.build_generic(&generic, build);
        }
        let Some(definition) = self.registry.lookup_type_definition(id) else {
            debug!(id, "unknown type");
            if id != PLACEHOLDER_ZID {
                build.missing.insert(id.to_string());
            }
            return ZObject::record([(Z_OBJECT_TYPE, type_.clone())]);
        };
        self.build_keyed(id.to_string(), type_, &definition.keys, build)
    }

    fn build_inline(&self, type_: &ZObject, build: &mut Build) -> ZObject {
        let keys = key_definitions_of(type_);
        self.build_keyed(type_.to_string(), type_, &keys, build)
    }

    /// `{Z1K1: type_, <key>: <empty value of the key's type>, ...}`, with
    /// `path_key` on the construction path while the keys are built.
    fn build_keyed(
        &self,
        path_key: String,
        type_: &ZObject,
        keys: &[KeyDefinition],
        build: &mut Build,
    ) -> ZObject {
        build.path.insert(path_key.clone());
        let mut fields = Fields::with_capacity(keys.len() + 1);
        fields.insert(Z_OBJECT_TYPE.to_string(), type_.clone());
        for key in keys {
            let value = self.build_guarded(&to_canonical(&key.value_type), build);
            fields.insert(key.id.clone(), value);
        }
        build.path.remove(&path_key);
        ZObject::Record(fields)
    }

    /// Build `type_` unless it is already being built further up the path.
    fn build_guarded(&self, type_: &ZObject, build: &mut Build) -> ZObject {
        let path_key = match type_ {
            ZObject::Reference(id) => id.clone(),
            _ => type_.to_string(),
        };
        if build.path.contains(&path_key) {
            trace!(type_ = %path_key, "cycle, using an empty reference");
            return ZObject::empty_reference();
        }
        self.build(type_, build)
    }

    fn build_generic(&self, type_: &ZObject, build: &mut Build) -> ZObject {
        let arg = |key: &str| {
            type_
                .get(key)
                .cloned()
                .unwrap_or_else(|| ZObject::Reference(Z_OBJECT.to_string()))
        };
        match typed_list::generic_function(type_) {
            Some(Z_TYPED_LIST) => ZObject::List(vec![arg(Z_TYPED_LIST_TYPE)]),
            Some(Z_TYPED_PAIR) => {
                let first = self.build_guarded(&arg(Z_TYPED_PAIR_TYPE1), build);
                let second = self.build_guarded(&arg(Z_TYPED_PAIR_TYPE2), build);
                ZObject::record([
                    (Z_OBJECT_TYPE, type_.clone()),
                    (K1, first),
                    (K2, second),
                ])
            }
            Some(Z_TYPED_MAP) => {
                let pair_type =
                    typed_list::typed_pair_type(arg(Z_TYPED_MAP_TYPE1), arg(Z_TYPED_MAP_TYPE2));
                ZObject::record([
                    (Z_OBJECT_TYPE, type_.clone()),
                    (K1, ZObject::List(vec![pair_type])),
                ])
            }
            _ => ZObject::record([(Z_OBJECT_TYPE, type_.clone())]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn z(v: Value) -> ZObject {
        ZObject::try_from(v).unwrap()
    }

    fn key(id: &str, value_type: &str) -> (String, ZObject) {
        (id.to_string(), ZObject::from(value_type))
    }

    fn registry(types: &[(&str, Vec<(String, ZObject)>)]) -> InMemoryTypeRegistry {
        let mut registry = InMemoryTypeRegistry::new();
        for (id, keys) in types {
            registry.insert(*id, TypeDefinition::new(*id, keys.clone()));
        }
        registry
    }

    fn build(registry: &InMemoryTypeRegistry, type_: Value) -> Value {
        Factory::new(registry).build_default(&z(type_)).to_json()
    }

    #[test]
    fn self_reference_becomes_empty_reference() {
        let r = registry(&[("Z10001", vec![key("Z10001K1", "Z10001")])]);
        assert_eq!(
            build(&r, json!("Z10001")),
            json!({"Z1K1": "Z10001", "Z10001K1": {"Z1K1": "Z9", "Z9K1": ""}})
        );
    }

    #[test]
    fn mutual_reference_breaks_on_reentry() {
        let r = registry(&[
            ("Z10001", vec![key("Z10001K1", "Z10002")]),
            ("Z10002", vec![key("Z10002K1", "Z10001"), key("Z10002K2", "Z6")]),
        ]);
        assert_eq!(
            build(&r, json!("Z10001")),
            json!({
                "Z1K1": "Z10001",
                "Z10001K1": {
                    "Z1K1": "Z10002",
                    "Z10002K1": {"Z1K1": "Z9", "Z9K1": ""},
                    "Z10002K2": ""
                }
            })
        );
    }

    #[test]
    fn sibling_reuse_is_not_a_cycle() {
        let r = registry(&[
            ("Z10001", vec![key("Z10001K1", "Z10002"), key("Z10001K2", "Z10002")]),
            ("Z10002", vec![key("Z10002K1", "Z11")]),
        ]);
        let inner = json!({"Z1K1": "Z10002", "Z10002K1": {"Z1K1": "Z11", "Z11K1": {"Z1K1": "Z9", "Z9K1": ""}, "Z11K2": ""}});
        assert_eq!(
            build(&r, json!("Z10001")),
            json!({"Z1K1": "Z10001", "Z10001K1": inner, "Z10001K2": inner})
        );
    }

    #[test]
    fn list_of_self_terminates_without_guard() {
        let list_of_self = typed_list::typed_list_type("Z10001".into());
        let mut r = InMemoryTypeRegistry::new();
        r.insert(
            "Z10001",
            TypeDefinition::new("Z10001", [("Z10001K1".to_string(), list_of_self)]),
        );
        assert_eq!(
            build(&r, json!("Z10001")),
            json!({"Z1K1": "Z10001", "Z10001K1": ["Z10001"]})
        );
    }

    #[test]
    fn pair_of_self_is_guarded() {
        let pair = typed_list::typed_pair_type("Z10001".into(), "Z6".into());
        let mut r = InMemoryTypeRegistry::new();
        r.insert("Z10001", TypeDefinition::new("Z10001", [("Z10001K1".to_string(), pair.clone())]));
        assert_eq!(
            build(&r, json!("Z10001")),
            json!({
                "Z1K1": "Z10001",
                "Z10001K1": {
                    "Z1K1": pair.to_json(),
                    "K1": {"Z1K1": "Z9", "Z9K1": ""},
                    "K2": ""
                }
            })
        );
    }

    #[test]
    fn generic_types() {
        let r = InMemoryTypeRegistry::new();
        assert_eq!(build(&r, json!({"Z1K1": "Z7", "Z7K1": "Z881", "Z881K1": "Z6"})), json!(["Z6"]));

        let map = json!({"Z1K1": "Z7", "Z7K1": "Z883", "Z883K1": "Z6", "Z883K2": "Z1"});
        assert_eq!(
            build(&r, map.clone()),
            json!({
                "Z1K1": map,
                "K1": [{"Z1K1": "Z7", "Z7K1": "Z882", "Z882K1": "Z6", "Z882K2": "Z1"}]
            })
        );

        let call = json!({"Z1K1": "Z7", "Z7K1": "Z10050", "Z10050K1": "Z6"});
        assert_eq!(build(&r, call.clone()), json!({"Z1K1": call}));
    }

    #[test]
    fn bare_generics_default_to_objects() {
        let r = InMemoryTypeRegistry::new();
        let empty = json!({"Z1K1": "Z9", "Z9K1": ""});
        let pair_type = json!({"Z1K1": "Z7", "Z7K1": "Z882", "Z882K1": "Z1", "Z882K2": "Z1"});

        assert_eq!(build(&r, json!("Z881")), json!(["Z1"]));
        assert_eq!(
            build(&r, json!("Z882")),
            json!({"Z1K1": pair_type, "K1": empty, "K2": empty})
        );
        assert_eq!(
            build(&r, json!("Z883")),
            json!({
                "Z1K1": {"Z1K1": "Z7", "Z7K1": "Z883", "Z883K1": "Z1", "Z883K2": "Z1"},
                "K1": [pair_type]
            })
        );
        assert!(r.fetch_requests().is_empty());
    }

    #[test]
    fn accepts_hybrid_types() {
        let r = InMemoryTypeRegistry::new();
        assert_eq!(build(&r, json!({"Z1K1": "Z9", "Z9K1": "Z6"})), json!(""));
    }

    #[test]
    fn inline_type_literal() {
        let r = InMemoryTypeRegistry::new();
        let inline = json!({
            "Z1K1": "Z4",
            "Z4K1": {"Z1K1": "Z7", "Z7K1": "Z10060"},
            "Z4K2": ["Z3", {"Z1K1": "Z3", "Z3K1": "Z6", "Z3K2": "K1"}],
            "Z4K3": "Z101"
        });
        assert_eq!(build(&r, inline.clone()), json!({"Z1K1": inline, "K1": ""}));
    }

    #[test]
    fn unknown_types_are_fetched_once_per_build() {
        let r = registry(&[(
            "Z10001",
            vec![key("Z10001K1", "Z10099"), key("Z10001K2", "Z10098"), key("Z10001K3", "Z10099")],
        )]);
        assert_eq!(
            build(&r, json!("Z10001")),
            json!({
                "Z1K1": "Z10001",
                "Z10001K1": {"Z1K1": "Z10099"},
                "Z10001K2": {"Z1K1": "Z10098"},
                "Z10001K3": {"Z1K1": "Z10099"}
            })
        );
        assert_eq!(
            r.fetch_requests(),
            vec![vec!["Z10099".to_string(), "Z10098".to_string()]]
        );

        build(&r, json!("Z6"));
        assert_eq!(r.fetch_requests().len(), 1);
    }

    #[test]
    fn persistent_object_wraps_payload() {
        let r = InMemoryTypeRegistry::new();
        let factory = Factory::new(&r);
        let object = factory.build_persistent_object(&ZObject::from("Z4")).to_json();
        assert_eq!(object["Z1K1"], json!("Z2"));
        assert_eq!(object["Z2K1"], json!({"Z1K1": "Z6", "Z6K1": "Z0"}));
        assert_eq!(object["Z2K2"]["Z4K1"], json!("Z0"));
        assert_eq!(object["Z2K2"]["Z4K2"], json!(["Z3"]));

        let object = factory.build_persistent_object(&ZObject::from("Z6")).to_json();
        assert_eq!(object["Z2K2"], json!(""));
    }

    #[test]
    fn user_language_reaches_nested_strings() {
        let r = registry(&[("Z10001", vec![key("Z10001K1", "Z11")])]);
        let options = FactoryOptions { user_language: Some("Z1003".into()) };
        let value = Factory::with_options(&r, options).build_default(&z(json!("Z10001")));
        assert_eq!(value.to_json()["Z10001K1"]["Z11K1"], json!("Z1003"));
    }
}
