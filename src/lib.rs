//! JSON Schema backward-compatibility checking
//!
//! Determines whether a changed JSON Schema is still safe for consumers of
//! the original schema. Both documents are treated as generic JSON trees;
//! the structural diff between them is computed with the `json-patch` crate
//! and every resulting edit operation is classified as breaking or
//! non-breaking against a configurable policy.
//!
//! ## Rules at a glance
//!
//! - Removing or moving a node is breaking, unless it loosens a constraint
//!   (a `required` entry, a `minItems` bound) or the node is explicitly
//!   deprecated.
//! - Replacing a value is breaking, unless it lowers `minItems` or only
//!   touches documentation (`description`, examples).
//! - Adding a node is safe under `properties`/`definitions`, breaking when
//!   it lands in a `required` list, and policy-dependent for new `anyOf`
//!   alternatives and `enum` values.
//!
//! ## Example
//!
//! ```
//! use json_schema_compat::{compare_schemas, CompatConfig};
//! use serde_json::json;
//!
//! let original = json!({
//!     "properties": { "id": { "type": "string" } }
//! });
//! let changed = json!({
//!     "properties": {
//!         "id": { "type": "string" },
//!         "name": { "type": "string" }
//!     }
//! });
//!
//! let result = compare_schemas(&original, &changed, &CompatConfig::default());
//! assert!(result.valid);
//! ```

pub mod compat;
pub mod config;
pub mod error;
mod path;
pub mod validator;

pub use compat::{classify, ChangeKind, ValidationResult, Violation};
pub use config::CompatConfig;
pub use error::{CompatError, Result};
pub use validator::{
    assert_compatible, assert_files_compatible, compare_schema_files, compare_schemas,
};
