//! Editing core for ZObjects, the typed JSON documents of a multilingual
//! function wiki.
//!
//! - [`value`]: the ZObject value model and its JSON mapping
//! - [`canonical`]: conversion between canonical, normal and hybrid form
//! - [`row_store`]: flat, id-addressed row store the editor mutates
//! - [`factory`]: empty values ("skeletons") for a chosen type
//! - [`error_tree`]: error records turned into a renderable tree
//! - [`cli`]: logic behind the `zobject-*` binaries
//!
//! # Example
//!
//! ```
//! use zobject::{to_canonical, to_hybrid, ZObject};
//!
//! let canonical = ZObject::from_json_str(r#"["Z6","a","b"]"#).unwrap();
//! assert_eq!(to_canonical(&to_hybrid(&canonical)), canonical);
//! ```

pub mod canonical;
pub mod cli;
pub mod constants;
pub mod error_tree;
pub mod factory;
pub mod row_store;
pub mod value;

pub use canonical::{
    canonicalize_json, hybridize_json, normalize_json, to_canonical, to_hybrid, to_normal,
};
pub use constants::{is_reference_shaped, PLACEHOLDER_ZID};
pub use error_tree::{extract_error_tree, extract_response_error, ErrorSummary, StringArg};
pub use factory::{
    Factory, FactoryOptions, InMemoryTypeRegistry, KeyDefinition, TypeDefinition, TypeRegistry,
};
pub use row_store::{Row, RowId, RowStore, RowStoreError, RowValue, SpliceOptions};
pub use value::{Fields, ZObject, ZObjectError};
