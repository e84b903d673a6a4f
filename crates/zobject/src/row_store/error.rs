use thiserror::Error;
use zobject_key_path::ValidationError;

use super::RowId;

/// Contract violations of structural edits. These point at a caller bug
/// (a stale id, a path that does not exist) and are never swallowed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowStoreError {
    #[error("row {0} not found")]
    RowNotFound(RowId),
    #[error("row {0} is not an array")]
    NotAnArray(RowId),
    #[error("row {0} is not a terminal")]
    NotATerminal(RowId),
    #[error("row {0} is not an item of an array")]
    NotAListItem(RowId),
    #[error("the root row cannot be removed")]
    RemoveRoot,
    #[error("row {0} holds the element type of its list")]
    ListTypeEntry(RowId),
    #[error("no item at index {index} of row {parent}")]
    ItemNotFound { parent: RowId, index: usize },
    #[error("shifting keys of row {parent} from {from} by {offset} leaves a negative index")]
    InvalidOffset { parent: RowId, from: usize, offset: i64 },
    #[error("key {key:?} already taken under row {parent}")]
    KeyCollision { parent: RowId, key: String },
    #[error("nothing at key path {path:?} below row {from}")]
    PathNotFound { from: RowId, path: String },
    #[error(transparent)]
    InvalidKeyPath(#[from] ValidationError),
}
