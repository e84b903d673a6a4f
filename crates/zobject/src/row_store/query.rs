//! Typed reads and leaf edits over rows.

use tracing::{debug, warn};
use zobject_key_path::format_key_path;

use crate::canonical::{to_canonical, typed_list};
use crate::constants::{
    is_reference_shaped, Z_OBJECT, Z_OBJECT_TYPE, Z_REFERENCE, Z_REFERENCE_ID, Z_STRING,
    Z_STRING_VALUE,
};
use crate::value::ZObject;

use super::{RowId, RowStore, RowStoreError, RowValue, SpliceOptions};

impl RowStore {
    pub fn get_key_of_row(&self, id: RowId) -> Option<&str> {
        self.rows.get(&id)?.key.as_deref()
    }

    /// The canonical type of the value at a row.
    ///
    /// A terminal is a String or a Reference depending on its shape, an array
    /// is a typed list of its element type and an object has whatever its
    /// `Z1K1` says. Objects without `Z1K1` have no type.
    pub fn get_type_of_row(&self, id: RowId) -> Option<ZObject> {
        let row = self.rows.get(&id)?;
        match &row.value {
            RowValue::Terminal(s) if is_reference_shaped(s) => {
                Some(ZObject::Reference(Z_REFERENCE.to_string()))
            }
            RowValue::Terminal(_) => Some(ZObject::Reference(Z_STRING.to_string())),
            RowValue::Array => {
                let element_type = match self.child_by_key(id, "0") {
                    Some(first) => to_canonical(&self.to_value(first.id).ok()?),
                    None => ZObject::Reference(Z_OBJECT.to_string()),
                };
                Some(typed_list::typed_list_type(element_type))
            }
            RowValue::Object => {
                let type_row = self.child_by_key(id, Z_OBJECT_TYPE)?;
                Some(to_canonical(&self.to_value(type_row.id).ok()?))
            }
        }
    }

    /// Text of a non-reference terminal, or the `Z6K1` of a String record.
    pub fn get_string_value(&self, id: RowId) -> Option<String> {
        self.terminal_through(id, Z_STRING, Z_STRING_VALUE)
    }

    /// Id held by a reference-shaped terminal, or the `Z9K1` of a
    /// Reference record.
    pub fn get_reference_value(&self, id: RowId) -> Option<String> {
        self.terminal_through(id, Z_REFERENCE, Z_REFERENCE_ID)
    }

    fn terminal_through(&self, id: RowId, type_id: &str, value_key: &str) -> Option<String> {
        let row = self.rows.get(&id)?;
        match &row.value {
            RowValue::Terminal(s) => {
                let is_reference = is_reference_shaped(s);
                (is_reference == (type_id == Z_REFERENCE)).then(|| s.clone())
            }
            RowValue::Object if self.get_type_of_row(id)?.as_reference()? == type_id => {
                let value_row = self.child_by_key(id, value_key)?;
                value_row.terminal().map(str::to_string)
            }
            _ => None,
        }
    }

    /// Overwrite the text of a terminal row.
    pub fn set_terminal_value(
        &mut self,
        id: RowId,
        value: impl Into<String>,
    ) -> Result<(), RowStoreError> {
        let row = self.row_mut(id)?;
        if !row.is_terminal() {
            return Err(RowStoreError::NotATerminal(id));
        }
        row.value = RowValue::Terminal(value.into());
        debug!(row = %id, "terminal value set");
        Ok(())
    }

    /// Splice `value` into the row `path` leads to from `from`.
    pub fn set_value_by_key_path<S: AsRef<str>>(
        &mut self,
        from: RowId,
        path: &[S],
        value: &ZObject,
    ) -> Result<RowId, RowStoreError> {
        let Some(target) = self.get_row_by_key_path(path, from).map(|row| row.id) else {
            let path: Vec<String> = path.iter().map(|s| s.as_ref().to_string()).collect();
            let path = format_key_path(&path);
            warn!(from = %from, path = %path, "key path not found");
            return Err(RowStoreError::PathNotFound { from, path });
        };
        self.splice_value(target, value, SpliceOptions::default())
    }
}
