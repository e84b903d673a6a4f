//! Type definitions for key paths.

/// A step in a key path: an object key (`"Z11K1"`, `"K1"`) or a decimal
/// list index (`"2"`).
pub type PathStep = String;

/// A key path.
pub type Path = Vec<PathStep>;

/// What a single path step addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// A key owned by a persisted type, e.g. `Z11K1`.
    GlobalKey,
    /// A positional key of a generic type, e.g. `K1`.
    LocalKey,
    /// A list position, e.g. `0`.
    Index,
}

/// Classify a path step. Returns `None` for steps outside the key grammar.
///
/// # Example
///
/// ```
/// use zobject_key_path::{classify_step, StepKind};
///
/// assert_eq!(classify_step("Z11K1"), Some(StepKind::GlobalKey));
/// assert_eq!(classify_step("K2"), Some(StepKind::LocalKey));
/// assert_eq!(classify_step("3"), Some(StepKind::Index));
/// assert_eq!(classify_step("Z11"), None);
/// ```
pub fn classify_step(step: &str) -> Option<StepKind> {
    if crate::is_valid_index(step) {
        return Some(StepKind::Index);
    }
    if let Some(rest) = step.strip_prefix('K') {
        return is_positive_integer(rest).then_some(StepKind::LocalKey);
    }
    key_owner(step).map(|_| StepKind::GlobalKey)
}

/// Return the type id that owns a global key: `"Z11K1"` → `"Z11"`.
///
/// # Example
///
/// ```
/// use zobject_key_path::key_owner;
///
/// assert_eq!(key_owner("Z11K1"), Some("Z11"));
/// assert_eq!(key_owner("K1"), None);
/// assert_eq!(key_owner("Z11"), None);
/// ```
pub fn key_owner(step: &str) -> Option<&str> {
    let rest = step.strip_prefix('Z')?;
    let k = rest.find('K')?;
    let (zid_digits, key_digits) = (&rest[..k], &rest[k + 1..]);
    if is_positive_integer(zid_digits) && is_positive_integer(key_digits) {
        Some(&step[..k + 1])
    } else {
        None
    }
}

/// Non-empty ASCII digits without a leading zero, and not zero itself.
pub(crate) fn is_positive_integer(s: &str) -> bool {
    let bytes = s.as_bytes();
    !bytes.is_empty() && bytes[0] != b'0' && bytes.iter().all(|b| b.is_ascii_digit())
}
