//! Compatibility classification over structural diff operations
//!
//! The core of the crate: given the original schema tree and the JSON-Patch
//! operations that turn it into the changed tree, decide per operation
//! whether existing consumers of the schema could break. Accepted
//! operations are skipped silently; rejected ones become [`Violation`]s.
//!
//! Classification runs in two phases. The main pass dispatches on the
//! operation kind and applies the exemption rules. When reordering of
//! `anyOf` alternatives is allowed, operations inside such lists are only
//! provisionally accepted: the identities they remove and insert are
//! tracked, and a reconciliation pass converts every removed identity that
//! was not re-inserted elsewhere into a violation.

use std::fmt;

use json_patch::PatchOperation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::CompatConfig;
use crate::error::{CompatError, Result};
use crate::path::{
    is_any_of_entry, is_doc_only, is_enum_entry, is_min_items, last_segment, parent_segment,
    within_any_of,
};

/// The kind of schema change a violation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A node was added where additions are not tolerated
    Addition,
    /// A node consumers may depend on was removed
    Removal,
    /// A node was relocated
    Move,
    /// A value (type, constraint, constant) was changed
    Replacement,
}

impl ChangeKind {
    /// Human description used in formatted violation messages.
    pub fn description(&self) -> &'static str {
        match self {
            ChangeKind::Addition => {
                "an additional required property, or disallowed property or field"
            }
            ChangeKind::Removal => "a missing property or field",
            ChangeKind::Move => "a moved property or field",
            ChangeKind::Replacement => "a change to a field value",
        }
    }
}

/// A single breaking change detected between two schema versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Kind of the rejected edit operation
    pub kind: ChangeKind,
    /// JSON Pointer path of the affected node
    pub path: String,
}

impl Violation {
    fn new(kind: ChangeKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Detected {}. Path - \"{}\"",
            self.kind.description(),
            self.path
        )
    }
}

/// Outcome of a compatibility check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the changed schema is backward compatible
    pub valid: bool,
    /// Every breaking change, in detection order
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }

    /// Formatted message per violation, in detection order.
    pub fn errors(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Convert into a `Result`, failing with [`CompatError::Incompatible`]
    /// when any violation was detected.
    pub fn into_result(self) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(CompatError::Incompatible(self.errors().join("\n")))
        }
    }
}

/// Reorder bookkeeping, scoped to a single classification call.
///
/// `removed` pairs each provisionally accepted removal with the violation
/// to emit should its identity not resurface; `inserted` collects every
/// identity that appeared at a new position.
#[derive(Default)]
struct ReorderTracker {
    removed: Vec<(Value, Violation)>,
    inserted: Vec<Value>,
}

/// Classify every edit operation against the policy in `config`.
///
/// `original` is the pre-change tree; it is only read, never mutated, and
/// is consulted to resolve pre-change values (`minItems` baselines, `$ref`
/// targets of removed `anyOf` entries). Operations of a kind other than
/// add/remove/replace/move are ignored.
pub fn classify(
    original: &Value,
    operations: &[PatchOperation],
    config: &CompatConfig,
) -> ValidationResult {
    let mut violations = Vec::new();
    let mut tracker = ReorderTracker::default();

    for operation in operations {
        match operation {
            PatchOperation::Remove(op) => classify_removal(
                original,
                &op.path,
                ChangeKind::Removal,
                config,
                &mut violations,
                &mut tracker,
            ),
            PatchOperation::Move(op) => classify_removal(
                original,
                &op.path,
                ChangeKind::Move,
                config,
                &mut violations,
                &mut tracker,
            ),
            PatchOperation::Replace(op) => classify_replacement(
                original,
                &op.path,
                &op.value,
                config,
                &mut violations,
                &mut tracker,
            ),
            PatchOperation::Add(op) => {
                classify_addition(&op.path, &op.value, config, &mut violations, &mut tracker)
            }
            // copy and test cannot drop a guarantee; kinds introduced by
            // newer diff implementations are treated the same way.
            _ => {}
        }
    }

    if config.allow_reorder {
        for (identity, violation) in tracker.removed {
            if !tracker.inserted.contains(&identity) {
                debug!(path = %violation.path, "removed alternative never re-inserted");
                violations.push(violation);
            }
        }
    }

    ValidationResult::from_violations(violations)
}

/// Shared rule for `remove` and `move`: breaking unless the operation
/// loosens a constraint, targets a deprecated item, or (with reordering
/// allowed) drops an `anyOf` entry that may have moved elsewhere.
fn classify_removal(
    original: &Value,
    path: &str,
    kind: ChangeKind,
    config: &CompatConfig,
    violations: &mut Vec<Violation>,
    tracker: &mut ReorderTracker,
) {
    if parent_segment(path) == "required" || is_min_items(path) {
        debug!(%path, "removal loosens a constraint, accepted");
        return;
    }

    if is_deprecated_node(original, path, config) {
        debug!(%path, "removal of deprecated item, accepted");
        return;
    }

    if config.allow_reorder && is_any_of_entry(path) {
        if let Some(node) = original.pointer(path) {
            tracker
                .removed
                .push((alternative_identity(node), Violation::new(kind, path)));
            return;
        }
    }

    violations.push(Violation::new(kind, path));
}

/// `replace` rule: breaking unless it lowers (or keeps) a `minItems`
/// bound, only touches documentation, or sits inside an `anyOf` list with
/// reordering allowed, in which case it is deferred to reconciliation.
fn classify_replacement(
    original: &Value,
    path: &str,
    new_value: &Value,
    config: &CompatConfig,
    violations: &mut Vec<Violation>,
    tracker: &mut ReorderTracker,
) {
    let old_value = original.pointer(path);

    if is_min_items(path) && loosens_min_items(old_value, new_value) {
        debug!(%path, "minItems did not increase, accepted");
        return;
    }

    if is_doc_only(path) {
        debug!(%path, "documentation-only replacement, accepted");
        return;
    }

    if config.allow_reorder && within_any_of(path) {
        tracker.removed.push((
            old_value.cloned().unwrap_or(Value::Null),
            Violation::new(ChangeKind::Replacement, path),
        ));
        tracker.inserted.push(new_value.clone());
        return;
    }

    violations.push(Violation::new(ChangeKind::Replacement, path));
}

/// `add` rule: a new `required` entry is always breaking; new nodes under
/// `properties`/`definitions` are always safe; everything else depends on
/// the policy flags.
fn classify_addition(
    path: &str,
    value: &Value,
    config: &CompatConfig,
    violations: &mut Vec<Violation>,
    tracker: &mut ReorderTracker,
) {
    let parent = parent_segment(path);

    if parent == "required" {
        violations.push(Violation::new(ChangeKind::Addition, path));
        return;
    }

    if parent == "properties" || parent == "definitions" {
        debug!(%path, "new optional property or definition, accepted");
        return;
    }

    if is_any_of_entry(path) {
        if config.allow_reorder {
            tracker.inserted.push(alternative_identity(value));
            return;
        }
        if config.allow_new_one_of {
            debug!(%path, "new alternative allowed by policy");
            return;
        }
    }

    if is_enum_entry(path) && config.allow_new_enum_value {
        debug!(%path, "new enum value allowed by policy");
        return;
    }

    if is_doc_only(path) {
        debug!(%path, "documentation-only addition, accepted");
        return;
    }

    violations.push(Violation::new(ChangeKind::Addition, path));
}

/// Resolve the identifier of the node at `path` against the deprecated-item
/// set. An `anyOf` entry is identified by the final segment of its `$ref`
/// target; any other node by its leaf path segment.
fn is_deprecated_node(original: &Value, path: &str, config: &CompatConfig) -> bool {
    if config.deprecated_items.is_empty() {
        return false;
    }

    if is_any_of_entry(path) {
        original
            .pointer(path)
            .and_then(|node| node.get("$ref"))
            .and_then(Value::as_str)
            .map(|target| config.is_deprecated(last_segment(target)))
            .unwrap_or(false)
    } else {
        config.is_deprecated(last_segment(path))
    }
}

/// `minItems` may stay or decrease, judged against the pre-change baseline.
fn loosens_min_items(old_value: Option<&Value>, new_value: &Value) -> bool {
    match (old_value.and_then(Value::as_f64), new_value.as_f64()) {
        (Some(old), Some(new)) => new <= old,
        _ => false,
    }
}

/// Identity used to match a reordered alternative: its `$ref` target when
/// it has one, otherwise the entry value itself.
fn alternative_identity(value: &Value) -> Value {
    value.get("$ref").cloned().unwrap_or_else(|| value.clone())
}
