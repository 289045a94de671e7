//! Comparison entry points
//!
//! Thin I/O layer over the classifier: diff two in-memory trees, or load a
//! pair of schema files first. All classification logic lives in
//! [`crate::compat`].

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::compat::{classify, ValidationResult};
use crate::config::CompatConfig;
use crate::error::{CompatError, Result};

/// Compare two in-memory schema trees.
///
/// Computes the structural diff with [`json_patch::diff`] and classifies
/// every operation. Neither tree is mutated; the call never fails — an
/// incompatible pair is an ordinary [`ValidationResult`] with
/// `valid = false`.
pub fn compare_schemas(
    original: &Value,
    changed: &Value,
    config: &CompatConfig,
) -> ValidationResult {
    let patch = json_patch::diff(original, changed);
    debug!(operations = patch.0.len(), "computed structural diff");
    classify(original, &patch.0, config)
}

/// Compare two schema files, each containing a UTF-8 JSON Schema document.
///
/// Fails with [`CompatError::ReadFile`] or [`CompatError::ParseFile`] when
/// a file is missing or not valid JSON; otherwise delegates to
/// [`compare_schemas`].
pub fn compare_schema_files(
    original: impl AsRef<Path>,
    changed: impl AsRef<Path>,
    config: &CompatConfig,
) -> Result<ValidationResult> {
    let original = load_schema(original.as_ref())?;
    let changed = load_schema(changed.as_ref())?;
    Ok(compare_schemas(&original, &changed, config))
}

/// Variant of [`compare_schemas`] that fails on incompatibility.
///
/// Returns `Err(CompatError::Incompatible)` enumerating every violation
/// when the changed schema is not backward compatible.
pub fn assert_compatible(original: &Value, changed: &Value, config: &CompatConfig) -> Result<()> {
    compare_schemas(original, changed, config).into_result()
}

/// Variant of [`compare_schema_files`] that fails on incompatibility.
pub fn assert_files_compatible(
    original: impl AsRef<Path>,
    changed: impl AsRef<Path>,
    config: &CompatConfig,
) -> Result<()> {
    compare_schema_files(original, changed, config)?.into_result()
}

fn load_schema(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|source| CompatError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CompatError::ParseFile {
        path: path.display().to_string(),
        source,
    })
}
