//! Hard-coded empty values of the built-in types, in canonical form.

use crate::constants::*;
use crate::value::ZObject;

use super::FactoryOptions;

fn r(id: &str) -> ZObject {
    ZObject::Reference(id.to_string())
}

fn empty_string() -> ZObject {
    ZObject::Leaf(String::new())
}

fn empty_list(element_type: &str) -> ZObject {
    ZObject::List(vec![r(element_type)])
}

fn typed<'a>(type_id: &str, fields: impl IntoIterator<Item = (&'a str, ZObject)>) -> ZObject {
    ZObject::record(std::iter::once((Z_OBJECT_TYPE, r(type_id))).chain(fields))
}

fn language(options: &FactoryOptions) -> ZObject {
    match &options.user_language {
        Some(lang) => ZObject::string(lang.as_str()),
        None => ZObject::empty_reference(),
    }
}

fn multilingual_string() -> ZObject {
    typed(Z_MULTILINGUAL_STRING, [(Z_MULTILINGUAL_STRING_VALUE, empty_list(Z_MONOLINGUAL_STRING))])
}

fn multilingual_stringset() -> ZObject {
    typed(
        Z_MULTILINGUAL_STRINGSET,
        [(Z_MULTILINGUAL_STRINGSET_VALUE, empty_list(Z_MONOLINGUAL_STRINGSET))],
    )
}

fn empty_call() -> ZObject {
    typed(Z_FUNCTION_CALL, [(Z_FUNCTION_CALL_FUNCTION, ZObject::empty_reference())])
}

/// Empty value of a built-in type, or `None` when `type_id` is not one.
pub(super) fn builtin_default(type_id: &str, options: &FactoryOptions) -> Option<ZObject> {
    let value = match type_id {
        Z_OBJECT | Z_REFERENCE => ZObject::empty_reference(),
        Z_STRING => empty_string(),
        Z_PERSISTENT_OBJECT => typed(
            Z_PERSISTENT_OBJECT,
            [
                (Z_PERSISTENT_OBJECT_ID, ZObject::string_record(PLACEHOLDER_ZID)),
                (Z_PERSISTENT_OBJECT_VALUE, empty_string()),
                (Z_PERSISTENT_OBJECT_LABEL, multilingual_string()),
                (Z_PERSISTENT_OBJECT_ALIASES, multilingual_stringset()),
                (Z_PERSISTENT_OBJECT_DESCRIPTION, multilingual_string()),
            ],
        ),
        Z_KEY => typed(
            Z_KEY,
            [
                (Z_KEY_TYPE, ZObject::empty_reference()),
                (Z_KEY_ID, empty_string()),
                (Z_KEY_LABEL, multilingual_string()),
            ],
        ),
        Z_TYPE => typed(
            Z_TYPE,
            [
                (Z_TYPE_IDENTITY, ZObject::empty_reference()),
                (Z_TYPE_KEYS, empty_list(Z_KEY)),
                (Z_TYPE_VALIDATOR, ZObject::empty_reference()),
            ],
        ),
        Z_FUNCTION_CALL => empty_call(),
        Z_FUNCTION => typed(
            Z_FUNCTION,
            [
                (Z_FUNCTION_ARGUMENTS, empty_list(Z_ARGUMENT_DECLARATION)),
                (Z_FUNCTION_RETURN_TYPE, ZObject::empty_reference()),
                (Z_FUNCTION_TESTERS, empty_list(Z_TESTER)),
                (Z_FUNCTION_IMPLEMENTATIONS, empty_list(Z_IMPLEMENTATION)),
                (Z_FUNCTION_IDENTITY, ZObject::empty_reference()),
            ],
        ),
        Z_MONOLINGUAL_STRING => typed(
            Z_MONOLINGUAL_STRING,
            [
                (Z_MONOLINGUAL_STRING_LANGUAGE, language(options)),
                (Z_MONOLINGUAL_STRING_VALUE, empty_string()),
            ],
        ),
        Z_MULTILINGUAL_STRING => multilingual_string(),
        Z_IMPLEMENTATION => typed(
            Z_IMPLEMENTATION,
            [(Z_IMPLEMENTATION_FUNCTION, ZObject::empty_reference())],
        ),
        Z_CODE => typed(
            Z_CODE,
            [(Z_CODE_LANGUAGE, ZObject::empty_reference()), (Z_CODE_CODE, empty_string())],
        ),
        Z_ARGUMENT_DECLARATION => typed(
            Z_ARGUMENT_DECLARATION,
            [
                (Z_ARGUMENT_TYPE, ZObject::empty_reference()),
                (Z_ARGUMENT_KEY, empty_string()),
                (Z_ARGUMENT_LABEL, multilingual_string()),
            ],
        ),
        Z_ARGUMENT_REFERENCE => typed(
            Z_ARGUMENT_REFERENCE,
            [(Z_ARGUMENT_REFERENCE_KEY, empty_string())],
        ),
        Z_TESTER => typed(
            Z_TESTER,
            [
                (Z_TESTER_FUNCTION, ZObject::empty_reference()),
                (Z_TESTER_CALL, empty_call()),
                (Z_TESTER_VALIDATION, empty_call()),
            ],
        ),
        Z_MONOLINGUAL_STRINGSET => typed(
            Z_MONOLINGUAL_STRINGSET,
            [
                (Z_MONOLINGUAL_STRINGSET_LANGUAGE, language(options)),
                (Z_MONOLINGUAL_STRINGSET_VALUE, empty_list(Z_STRING)),
            ],
        ),
        Z_MULTILINGUAL_STRINGSET => multilingual_stringset(),
        Z_BOOLEAN => typed(Z_BOOLEAN, [(Z_BOOLEAN_IDENTITY, ZObject::empty_reference())]),
        Z_QUOTE => typed(Z_QUOTE, [(Z_QUOTE_VALUE, ZObject::empty_reference())]),
        _ => return None,
    };
    Some(value)
}
