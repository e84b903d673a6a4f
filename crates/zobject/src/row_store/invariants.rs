use std::collections::HashSet;

use super::{RowStore, RowValue};

impl RowStore {
    /// Check the structural invariants of the store.
    ///
    /// Every row but the root has a live object or array parent that lists
    /// it; sibling keys are unique; array children are keyed exactly
    /// `0..n`; every row is reachable from the root; no id is at or past
    /// the next id to be issued.
    pub fn validate_invariants(&self) -> Result<(), String> {
        let Some(root) = self.root else {
            if self.rows.is_empty() {
                return Ok(());
            }
            return Err("rows present without a root".to_string());
        };
        let root_row = self.rows.get(&root).ok_or("root row missing")?;
        if root_row.parent.is_some() || root_row.key.is_some() {
            return Err(format!("root row {root} has a parent or key"));
        }

        for (id, row) in &self.rows {
            if row.id != *id {
                return Err(format!("row stored under {id} claims id {}", row.id));
            }
            if id.0 >= self.next_id {
                return Err(format!("row id {id} not below next id {}", self.next_id));
            }
            if *id == root {
                continue;
            }
            let parent_id = row.parent.ok_or(format!("row {id} has no parent"))?;
            let parent = self
                .rows
                .get(&parent_id)
                .ok_or(format!("row {id} points at missing parent {parent_id}"))?;
            if matches!(parent.value, RowValue::Terminal(_)) {
                return Err(format!("row {id} is a child of terminal {parent_id}"));
            }
            if row.key.is_none() {
                return Err(format!("row {id} has no key"));
            }
            if !self.children.get(&parent_id).is_some_and(|c| c.contains(id)) {
                return Err(format!("row {id} not listed under parent {parent_id}"));
            }
        }

        for (parent_id, child_ids) in &self.children {
            let mut keys = HashSet::new();
            for child_id in child_ids {
                let child = self
                    .rows
                    .get(child_id)
                    .ok_or(format!("parent {parent_id} lists missing row {child_id}"))?;
                if child.parent != Some(*parent_id) {
                    return Err(format!("row {child_id} listed under {parent_id} but points elsewhere"));
                }
                if !keys.insert(child.key.as_deref()) {
                    return Err(format!("duplicate key {:?} under {parent_id}", child.key));
                }
            }
            if self.rows.get(parent_id).is_some_and(|p| p.is_array()) {
                let mut indices: Vec<Option<usize>> = self
                    .get_children_by_parent_row_id(*parent_id)
                    .iter()
                    .map(|row| row.index())
                    .collect();
                indices.sort();
                let expected: Vec<Option<usize>> = (0..indices.len()).map(Some).collect();
                if indices != expected {
                    return Err(format!("array {parent_id} keys are not contiguous: {indices:?}"));
                }
            }
        }

        let mut reachable = 0usize;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            reachable += 1;
            if let Some(children) = self.children.get(&id) {
                stack.extend(children.iter().copied());
            }
        }
        if reachable != self.rows.len() {
            return Err(format!(
                "{} rows stored, {reachable} reachable from root",
                self.rows.len()
            ));
        }
        Ok(())
    }
}
