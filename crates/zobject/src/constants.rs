//! Well-known ZIDs and keys.
//!
//! Only the identifiers the core itself dispatches on are listed here. Every
//! other type is looked up through a [`TypeRegistry`](crate::TypeRegistry).

use std::sync::OnceLock;

use regex::Regex;

// ── Types ─────────────────────────────────────────────────────────────────

/// Placeholder id of an object that has not been persisted yet.
///
/// Not a persisted object, but accepted wherever a reference is expected so
/// that a fresh `Z2K1` survives form conversions.
pub const PLACEHOLDER_ZID: &str = "Z0";

pub const Z_OBJECT: &str = "Z1";
pub const Z_PERSISTENT_OBJECT: &str = "Z2";
pub const Z_KEY: &str = "Z3";
pub const Z_TYPE: &str = "Z4";
pub const Z_ERROR: &str = "Z5";
pub const Z_STRING: &str = "Z6";
pub const Z_FUNCTION_CALL: &str = "Z7";
pub const Z_FUNCTION: &str = "Z8";
pub const Z_REFERENCE: &str = "Z9";
pub const Z_MONOLINGUAL_STRING: &str = "Z11";
pub const Z_MULTILINGUAL_STRING: &str = "Z12";
pub const Z_IMPLEMENTATION: &str = "Z14";
pub const Z_CODE: &str = "Z16";
pub const Z_ARGUMENT_DECLARATION: &str = "Z17";
pub const Z_ARGUMENT_REFERENCE: &str = "Z18";
pub const Z_TESTER: &str = "Z20";
pub const Z_RESPONSE_ENVELOPE: &str = "Z22";
pub const Z_MONOLINGUAL_STRINGSET: &str = "Z31";
pub const Z_MULTILINGUAL_STRINGSET: &str = "Z32";
pub const Z_BOOLEAN: &str = "Z40";
pub const Z_QUOTE: &str = "Z99";
pub const Z_TYPED_LIST: &str = "Z881";
pub const Z_TYPED_PAIR: &str = "Z882";
pub const Z_TYPED_MAP: &str = "Z883";

// ── Keys ──────────────────────────────────────────────────────────────────

pub const Z_OBJECT_TYPE: &str = "Z1K1";
pub const Z_PERSISTENT_OBJECT_ID: &str = "Z2K1";
pub const Z_PERSISTENT_OBJECT_VALUE: &str = "Z2K2";
pub const Z_PERSISTENT_OBJECT_LABEL: &str = "Z2K3";
pub const Z_PERSISTENT_OBJECT_ALIASES: &str = "Z2K4";
pub const Z_PERSISTENT_OBJECT_DESCRIPTION: &str = "Z2K5";
pub const Z_KEY_TYPE: &str = "Z3K1";
pub const Z_KEY_ID: &str = "Z3K2";
pub const Z_KEY_LABEL: &str = "Z3K3";
pub const Z_TYPE_IDENTITY: &str = "Z4K1";
pub const Z_TYPE_KEYS: &str = "Z4K2";
pub const Z_TYPE_VALIDATOR: &str = "Z4K3";
pub const Z_ERROR_TYPE: &str = "Z5K1";
pub const Z_ERROR_VALUE: &str = "Z5K2";
pub const Z_STRING_VALUE: &str = "Z6K1";
pub const Z_FUNCTION_CALL_FUNCTION: &str = "Z7K1";
pub const Z_FUNCTION_ARGUMENTS: &str = "Z8K1";
pub const Z_FUNCTION_RETURN_TYPE: &str = "Z8K2";
pub const Z_FUNCTION_TESTERS: &str = "Z8K3";
pub const Z_FUNCTION_IMPLEMENTATIONS: &str = "Z8K4";
pub const Z_FUNCTION_IDENTITY: &str = "Z8K5";
pub const Z_REFERENCE_ID: &str = "Z9K1";
pub const Z_MONOLINGUAL_STRING_LANGUAGE: &str = "Z11K1";
pub const Z_MONOLINGUAL_STRING_VALUE: &str = "Z11K2";
pub const Z_MULTILINGUAL_STRING_VALUE: &str = "Z12K1";
pub const Z_IMPLEMENTATION_FUNCTION: &str = "Z14K1";
pub const Z_CODE_LANGUAGE: &str = "Z16K1";
pub const Z_CODE_CODE: &str = "Z16K2";
pub const Z_ARGUMENT_TYPE: &str = "Z17K1";
pub const Z_ARGUMENT_KEY: &str = "Z17K2";
pub const Z_ARGUMENT_LABEL: &str = "Z17K3";
pub const Z_ARGUMENT_REFERENCE_KEY: &str = "Z18K1";
pub const Z_TESTER_FUNCTION: &str = "Z20K1";
pub const Z_TESTER_CALL: &str = "Z20K2";
pub const Z_TESTER_VALIDATION: &str = "Z20K3";
pub const Z_RESPONSE_ENVELOPE_VALUE: &str = "Z22K1";
pub const Z_RESPONSE_ENVELOPE_METADATA: &str = "Z22K2";
pub const Z_MONOLINGUAL_STRINGSET_LANGUAGE: &str = "Z31K1";
pub const Z_MONOLINGUAL_STRINGSET_VALUE: &str = "Z31K2";
pub const Z_MULTILINGUAL_STRINGSET_VALUE: &str = "Z32K1";
pub const Z_BOOLEAN_IDENTITY: &str = "Z40K1";
pub const Z_QUOTE_VALUE: &str = "Z99K1";
pub const Z_TYPED_LIST_TYPE: &str = "Z881K1";
pub const Z_TYPED_PAIR_TYPE1: &str = "Z882K1";
pub const Z_TYPED_PAIR_TYPE2: &str = "Z882K2";
pub const Z_TYPED_MAP_TYPE1: &str = "Z883K1";
pub const Z_TYPED_MAP_TYPE2: &str = "Z883K2";

/// Head of a normal-form typed list node, and first element of a pair.
pub const K1: &str = "K1";
/// Tail of a normal-form typed list node, and second element of a pair.
pub const K2: &str = "K2";

/// Metadata key under which a function-call response reports its error.
pub const RESPONSE_ERRORS_KEY: &str = "errors";

// ── Shapes ────────────────────────────────────────────────────────────────

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Z[1-9][0-9]*$").unwrap())
}

/// True when `s` has the shape of a reference: a persisted ZID such as
/// `"Z6"` or `"Z10001"`, or the [`PLACEHOLDER_ZID`].
///
/// # Example
///
/// ```
/// use zobject::is_reference_shaped;
///
/// assert!(is_reference_shaped("Z6"));
/// assert!(is_reference_shaped("Z0"));
/// assert!(!is_reference_shaped("Z01"));
/// assert!(!is_reference_shaped("Z6K1"));
/// assert!(!is_reference_shaped(""));
/// ```
pub fn is_reference_shaped(s: &str) -> bool {
    s == PLACEHOLDER_ZID || reference_regex().is_match(s)
}

/// True for a key owned by a persisted type, e.g. `"Z11K1"`.
pub fn is_global_key(key: &str) -> bool {
    zobject_key_path::key_owner(key).is_some()
}

/// True for a positional key of a generic type, e.g. `"K1"`.
pub fn is_local_key(key: &str) -> bool {
    zobject_key_path::classify_step(key) == Some(zobject_key_path::StepKind::LocalKey)
}

/// The type that owns a global key: `"Z11K1"` → `Some("Z11")`.
pub fn key_owner_type(key: &str) -> Option<&str> {
    zobject_key_path::key_owner(key)
}
