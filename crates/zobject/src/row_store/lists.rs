//! List editing on array rows. Index `0` of every list is its element type
//! and is never moved, removed or cleared by these operations.

use tracing::debug;

use super::{Row, RowId, RowStore, RowStoreError};

impl RowStore {
    fn array(&self, id: RowId) -> Result<&Row, RowStoreError> {
        let row = self.row(id)?;
        if row.is_array() {
            Ok(row)
        } else {
            Err(RowStoreError::NotAnArray(id))
        }
    }

    fn item_at(&self, parent: RowId, index: usize) -> Result<RowId, RowStoreError> {
        self.child_by_key(parent, &index.to_string())
            .map(|row| row.id)
            .ok_or(RowStoreError::ItemNotFound { parent, index })
    }

    /// Items of the list at `id`, without the element type entry.
    pub fn get_list_items(&self, id: RowId) -> Vec<&Row> {
        self.get_children_by_parent_row_id(id)
            .into_iter()
            .filter(|row| row.index() != Some(0))
            .collect()
    }

    /// Remove a list item and close the gap it leaves.
    pub fn remove_list_item(&mut self, id: RowId) -> Result<(), RowStoreError> {
        let row = self.row(id)?;
        let index = row.index().ok_or(RowStoreError::NotAListItem(id))?;
        let parent = row.parent.ok_or(RowStoreError::NotAListItem(id))?;
        if !self.row(parent)?.is_array() {
            return Err(RowStoreError::NotAListItem(id));
        }
        if index == 0 {
            return Err(RowStoreError::ListTypeEntry(id));
        }
        self.remove_subtree(id)?;
        self.shift_keys(parent, index + 1, -1)
    }

    /// Swap the item at `index` with the one `offset` places away.
    pub fn move_list_item(
        &mut self,
        parent: RowId,
        index: usize,
        offset: i64,
    ) -> Result<(), RowStoreError> {
        self.array(parent)?;
        let item = self.item_at(parent, index)?;
        if index == 0 {
            return Err(RowStoreError::ListTypeEntry(item));
        }
        let target = i64::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(offset))
            .and_then(|i| usize::try_from(i).ok())
            .ok_or(RowStoreError::InvalidOffset { parent, from: index, offset })?;
        let other = self.item_at(parent, target)?;
        if target == 0 {
            return Err(RowStoreError::ListTypeEntry(other));
        }

        debug!(parent = %parent, index, target, "moving list item");
        self.row_mut(item)?.key = Some(target.to_string());
        self.row_mut(other)?.key = Some(index.to_string());
        Ok(())
    }

    /// Remove every item of a list, keeping its element type.
    pub fn clear_list(&mut self, id: RowId) -> Result<(), RowStoreError> {
        self.array(id)?;
        let items: Vec<RowId> = self.get_list_items(id).iter().map(|row| row.id).collect();
        debug!(list = %id, removed = items.len(), "clearing list");
        for item in items {
            self.remove_subtree(item)?;
        }
        Ok(())
    }

    /// Rewrite the keys of an array's children to `0..n`, keeping their
    /// current relative order.
    pub fn recalculate_list_keys(&mut self, id: RowId) -> Result<(), RowStoreError> {
        self.array(id)?;
        let ordered: Vec<RowId> = self
            .get_children_by_parent_row_id(id)
            .iter()
            .map(|row| row.id)
            .collect();
        for (index, child) in ordered.iter().enumerate() {
            self.row_mut(*child)?.key = Some(index.to_string());
        }
        self.children.insert(id, ordered);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row_store::SpliceOptions;
    use crate::value::ZObject;
    use serde_json::{json, Value};

    fn store(v: Value) -> RowStore {
        RowStore::from_value(&ZObject::try_from(v).unwrap())
    }

    fn root_json(s: &RowStore) -> Value {
        s.root_value().unwrap().to_json()
    }

    fn item(s: &RowStore, index: &str) -> RowId {
        s.get_row_by_key_path(&[index], RowId(0)).unwrap().id
    }

    #[test]
    fn remove_list_item_reindexes() {
        let mut s = store(json!(["Z6", "a", "b", "c"]));
        s.remove_list_item(item(&s, "2")).unwrap();
        assert_eq!(root_json(&s), json!(["Z6", "a", "c"]));
        assert!(s.validate_invariants().is_ok());
    }

    #[test]
    fn remove_list_item_guards_type_and_non_items() {
        let mut s = store(json!({"Z1K1": "Z12", "Z12K1": ["Z11"]}));
        let list = s.get_row_by_key_path(&["Z12K1"], RowId(0)).unwrap().id;
        let type_entry = s.get_row_by_key_path(&["Z12K1", "0"], RowId(0)).unwrap().id;
        assert_eq!(s.remove_list_item(type_entry), Err(RowStoreError::ListTypeEntry(type_entry)));
        assert_eq!(s.remove_list_item(list), Err(RowStoreError::NotAListItem(list)));
    }

    #[test]
    fn move_swaps_neighbours() {
        let mut s = store(json!(["Z6", "a", "b", "c"]));
        s.move_list_item(RowId(0), 1, 1).unwrap();
        assert_eq!(root_json(&s), json!(["Z6", "b", "a", "c"]));
        s.move_list_item(RowId(0), 3, -2).unwrap();
        assert_eq!(root_json(&s), json!(["Z6", "c", "a", "b"]));
    }

    #[test]
    fn move_never_touches_the_type_entry() {
        let mut s = store(json!(["Z6", "a", "b"]));
        let type_entry = item(&s, "0");
        assert_eq!(
            s.move_list_item(RowId(0), 1, -1),
            Err(RowStoreError::ListTypeEntry(type_entry))
        );
        assert_eq!(
            s.move_list_item(RowId(0), 0, 1),
            Err(RowStoreError::ListTypeEntry(type_entry))
        );
        assert_eq!(
            s.move_list_item(RowId(0), 2, 1),
            Err(RowStoreError::ItemNotFound { parent: RowId(0), index: 3 })
        );
        assert_eq!(
            s.move_list_item(RowId(0), 1, -5),
            Err(RowStoreError::InvalidOffset { parent: RowId(0), from: 1, offset: -5 })
        );
        assert_eq!(root_json(&s), json!(["Z6", "a", "b"]));
    }

    #[test]
    fn clear_keeps_element_type() {
        let mut s = store(json!(["Z6", "a", "b"]));
        s.clear_list(RowId(0)).unwrap();
        assert_eq!(root_json(&s), json!(["Z6"]));
        let id = s
            .splice_value(RowId(0), &ZObject::from("c"), SpliceOptions { append: true })
            .unwrap();
        assert_eq!(s.get_row_by_id(id).unwrap().key.as_deref(), Some("1"));
    }

    #[test]
    fn recalculate_closes_gaps() {
        let mut s = store(json!(["Z6", "a", "b", "c", "d"]));
        s.remove_subtree(item(&s, "1")).unwrap();
        s.remove_subtree(item(&s, "3")).unwrap();
        assert!(s.validate_invariants().is_err());
        s.recalculate_list_keys(RowId(0)).unwrap();
        assert_eq!(root_json(&s), json!(["Z6", "b", "d"]));
        assert!(s.validate_invariants().is_ok());
    }

    #[test]
    fn list_ops_require_arrays() {
        let mut s = store(json!({"Z1K1": "Z6", "Z6K1": "x"}));
        assert_eq!(s.clear_list(RowId(0)), Err(RowStoreError::NotAnArray(RowId(0))));
        assert_eq!(s.recalculate_list_keys(RowId(0)), Err(RowStoreError::NotAnArray(RowId(0))));
        assert_eq!(s.move_list_item(RowId(0), 1, 1), Err(RowStoreError::NotAnArray(RowId(0))));
    }
}
