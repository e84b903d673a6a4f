//! Flat row store backing the editor.
//!
//! A ZObject tree is kept as an arena of rows. Every node of the tree is one
//! row holding its id, its key within the parent, the parent's id and either
//! a terminal string or a marker saying it is an object or an array. Rows are
//! addressed by id so that UI components can hold on to a node while the
//! document around it changes; ids are never reused within a store.
//!
//! Array children are keyed `"0"`, `"1"`, ... and index `0` holds the list's
//! element type. Object children keep the order they were inserted in.
//!
//! # Example
//!
//! ```
//! use zobject::row_store::RowStore;
//! use zobject::ZObject;
//!
//! let value = ZObject::from_json_str(r#"{"Z1K1":"Z11","Z11K1":"Z1002","Z11K2":"hi"}"#).unwrap();
//! let store = RowStore::from_value(&value);
//! let row = store.get_row_by_key_path(&["Z11K2"], store.root_id().unwrap()).unwrap();
//! assert_eq!(store.to_value(row.id).unwrap(), ZObject::from("hi"));
//! ```

mod error;
mod invariants;
mod lists;
mod query;

pub use error::RowStoreError;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::value::{Fields, ZObject};

// ── Rows ──────────────────────────────────────────────────────────────────

/// Stable identifier of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a row holds: a terminal string, or the kind of container whose
/// children are the rows pointing at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowValue {
    Object,
    Array,
    Terminal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: RowId,
    /// Key within the parent; `None` only for the root.
    pub key: Option<String>,
    pub parent: Option<RowId>,
    pub value: RowValue,
}

impl Row {
    pub fn is_object(&self) -> bool {
        matches!(self.value, RowValue::Object)
    }

    pub fn is_array(&self) -> bool {
        matches!(self.value, RowValue::Array)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.value, RowValue::Terminal(_))
    }

    /// The text of a terminal row.
    pub fn terminal(&self) -> Option<&str> {
        match &self.value {
            RowValue::Terminal(s) => Some(s),
            _ => None,
        }
    }

    /// The key read as an array index.
    pub fn index(&self) -> Option<usize> {
        self.key.as_deref()?.parse().ok()
    }
}

/// Options for [`RowStore::splice_value`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SpliceOptions {
    /// Add the value as a new last item of the target array instead of
    /// replacing the target.
    pub append: bool,
}

// ── Store ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct RowStore {
    rows: BTreeMap<RowId, Row>,
    /// Child ids per parent, in insertion order.
    children: HashMap<RowId, Vec<RowId>>,
    root: Option<RowId>,
    next_id: u64,
}

impl RowStore {
    /// An empty store with no root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten `value` into a fresh store. The root gets id 0.
    pub fn from_value(value: &ZObject) -> Self {
        let mut store = Self::new();
        let root = store.insert_tree(value, None, None);
        store.root = Some(root);
        store
    }

    pub fn root_id(&self) -> Option<RowId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, by ascending id.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    /// The id the next inserted row will receive.
    pub fn next_row_id(&self) -> RowId {
        RowId(self.next_id)
    }

    pub fn get_row_by_id(&self, id: RowId) -> Option<&Row> {
        self.rows.get(&id)
    }

    fn row(&self, id: RowId) -> Result<&Row, RowStoreError> {
        self.rows.get(&id).ok_or(RowStoreError::RowNotFound(id))
    }

    fn row_mut(&mut self, id: RowId) -> Result<&mut Row, RowStoreError> {
        self.rows.get_mut(&id).ok_or(RowStoreError::RowNotFound(id))
    }

    /// Children of a row. Array children come sorted by index, object
    /// children in insertion order. Unknown ids and terminals have none.
    pub fn get_children_by_parent_row_id(&self, parent: RowId) -> Vec<&Row> {
        let Some(ids) = self.children.get(&parent) else {
            return Vec::new();
        };
        let mut rows: Vec<&Row> = ids.iter().filter_map(|id| self.rows.get(id)).collect();
        if self.rows.get(&parent).is_some_and(Row::is_array) {
            rows.sort_by_key(|row| row.index().unwrap_or(usize::MAX));
        }
        rows
    }

    fn child_by_key(&self, parent: RowId, key: &str) -> Option<&Row> {
        self.children
            .get(&parent)?
            .iter()
            .filter_map(|id| self.rows.get(id))
            .find(|row| row.key.as_deref() == Some(key))
    }

    /// Walk `path` down from row `from`, one child key per step.
    pub fn get_row_by_key_path<S: AsRef<str>>(&self, path: &[S], from: RowId) -> Option<&Row> {
        let mut row = self.rows.get(&from)?;
        for step in path {
            row = self.child_by_key(row.id, step.as_ref())?;
        }
        Some(row)
    }

    /// [`get_row_by_key_path`](Self::get_row_by_key_path) for a dotted key
    /// path such as `"Z2K2.Z12K1.1"`.
    pub fn get_row_by_key_path_str(
        &self,
        key_path: &str,
        from: RowId,
    ) -> Result<Option<&Row>, RowStoreError> {
        zobject_key_path::validate_key_path(key_path)?;
        let path = zobject_key_path::parse_key_path(key_path);
        Ok(self.get_row_by_key_path(&path, from))
    }

    // ── Reconstruction ────────────────────────────────────────────────────

    /// Rebuild the subtree rooted at `id` as a value, in the form it was
    /// inserted in. Terminals are classified again with [`ZObject::string`].
    pub fn to_value(&self, id: RowId) -> Result<ZObject, RowStoreError> {
        let row = self.row(id)?;
        Ok(match &row.value {
            RowValue::Terminal(s) => ZObject::string(s.as_str()),
            RowValue::Array => {
                let mut items = Vec::new();
                for child in self.get_children_by_parent_row_id(id) {
                    items.push(self.to_value(child.id)?);
                }
                ZObject::List(items)
            }
            RowValue::Object => {
                let mut fields = Fields::new();
                for child in self.get_children_by_parent_row_id(id) {
                    let key = child.key.clone().unwrap_or_default();
                    fields.insert(key, self.to_value(child.id)?);
                }
                ZObject::Record(fields)
            }
        })
    }

    /// The whole document, or `None` for an empty store.
    pub fn root_value(&self) -> Option<ZObject> {
        self.to_value(self.root?).ok()
    }

    // ── Structural edits ──────────────────────────────────────────────────

    /// Replace the subtree at `id` with `value`, or with `append` set, add
    /// `value` as the last item of the array at `id`.
    ///
    /// On replace the row keeps its id, key and parent; its descendants are
    /// discarded and rebuilt with fresh ids. Returns the id of the row now
    /// holding `value`.
    pub fn splice_value(
        &mut self,
        id: RowId,
        value: &ZObject,
        options: SpliceOptions,
    ) -> Result<RowId, RowStoreError> {
        let row = self.row(id)?;
        if options.append {
            if !row.is_array() {
                return Err(RowStoreError::NotAnArray(id));
            }
            let key = self.next_index(id).to_string();
            debug!(parent = %id, key = %key, "appending list item");
            return Ok(self.insert_tree(value, Some(key), Some(id)));
        }

        debug!(row = %id, "replacing subtree");
        self.drop_descendants(id);
        self.row_mut(id)?.value = row_value_of(value);
        self.insert_children(value, id);
        Ok(id)
    }

    /// Remove the row and all of its descendants. Sibling keys are left as
    /// they are; reindex a list with [`shift_keys`](Self::shift_keys) or
    /// [`recalculate_list_keys`](Self::recalculate_list_keys).
    pub fn remove_subtree(&mut self, id: RowId) -> Result<(), RowStoreError> {
        let row = self.row(id)?;
        let Some(parent) = row.parent else {
            return Err(RowStoreError::RemoveRoot);
        };
        debug!(row = %id, parent = %parent, "removing subtree");
        self.drop_descendants(id);
        self.rows.remove(&id);
        if let Some(siblings) = self.children.get_mut(&parent) {
            siblings.retain(|sibling| *sibling != id);
        }
        Ok(())
    }

    /// Remove every child of a row, keeping the row itself.
    pub fn remove_children(&mut self, id: RowId) -> Result<(), RowStoreError> {
        self.row(id)?;
        self.drop_descendants(id);
        Ok(())
    }

    /// Add `offset` to the index key of every child of the array `parent`
    /// whose index is at least `from_index`.
    ///
    /// Fails without changing anything when an index would go negative or
    /// land on the key of a child outside the shifted range.
    pub fn shift_keys(
        &mut self,
        parent: RowId,
        from_index: usize,
        offset: i64,
    ) -> Result<(), RowStoreError> {
        if !self.row(parent)?.is_array() {
            return Err(RowStoreError::NotAnArray(parent));
        }
        let mut moved = Vec::new();
        let mut fixed = Vec::new();
        for child in self.get_children_by_parent_row_id(parent) {
            match child.index() {
                Some(index) if index >= from_index => moved.push((child.id, index)),
                Some(index) => fixed.push(index),
                None => {}
            }
        }

        let mut updates = Vec::with_capacity(moved.len());
        for (id, index) in moved {
            let shifted = i64::try_from(index)
                .ok()
                .and_then(|i| i.checked_add(offset))
                .and_then(|i| usize::try_from(i).ok())
                .ok_or(RowStoreError::InvalidOffset { parent, from: from_index, offset })?;
            if fixed.contains(&shifted) {
                return Err(RowStoreError::KeyCollision { parent, key: shifted.to_string() });
            }
            updates.push((id, shifted));
        }

        tracing::trace!(parent = %parent, from_index, offset, "shifting list keys");
        for (id, index) in updates {
            self.row_mut(id)?.key = Some(index.to_string());
        }
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// One past the highest index key under `parent`.
    fn next_index(&self, parent: RowId) -> usize {
        self.get_children_by_parent_row_id(parent)
            .iter()
            .filter_map(|row| row.index())
            .max()
            .map_or(0, |max| max + 1)
    }

    fn alloc_id(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert_tree(&mut self, value: &ZObject, key: Option<String>, parent: Option<RowId>) -> RowId {
        let id = self.alloc_id();
        self.rows.insert(id, Row { id, key, parent, value: row_value_of(value) });
        if let Some(parent) = parent {
            self.children.entry(parent).or_default().push(id);
        }
        self.insert_children(value, id);
        id
    }

    fn insert_children(&mut self, value: &ZObject, id: RowId) {
        match value {
            ZObject::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.insert_tree(item, Some(index.to_string()), Some(id));
                }
            }
            ZObject::Record(fields) => {
                for (key, field) in fields {
                    self.insert_tree(field, Some(key.clone()), Some(id));
                }
            }
            ZObject::Leaf(_) | ZObject::Reference(_) => {}
        }
    }

    fn drop_descendants(&mut self, id: RowId) {
        let mut stack = self.children.remove(&id).unwrap_or_default();
        while let Some(child) = stack.pop() {
            self.rows.remove(&child);
            if let Some(grandchildren) = self.children.remove(&child) {
                stack.extend(grandchildren);
            }
        }
    }
}

fn row_value_of(value: &ZObject) -> RowValue {
    match value {
        ZObject::Leaf(s) | ZObject::Reference(s) => RowValue::Terminal(s.clone()),
        ZObject::List(_) => RowValue::Array,
        ZObject::Record(_) => RowValue::Object,
    }
}
