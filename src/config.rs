//! Compatibility policy configuration

use serde::{Deserialize, Serialize};

/// Policy flags controlling which schema changes are tolerated.
///
/// The default is the most restrictive policy: every flag off, no
/// deprecated items. A configuration is built once per comparison call and
/// never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompatConfig {
    /// New `anyOf` alternatives are non-breaking.
    pub allow_new_one_of: bool,

    /// New `enum` values are non-breaking.
    pub allow_new_enum_value: bool,

    /// Replacements and additions inside `anyOf` lists are reconciled as
    /// reorderings rather than flagged outright.
    pub allow_reorder: bool,

    /// Identifiers whose removal or move is always non-breaking.
    pub deprecated_items: Vec<String>,
}

impl CompatConfig {
    /// Create the default (strict) configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Permit new `anyOf` alternatives
    pub fn with_new_one_of(mut self) -> Self {
        self.allow_new_one_of = true;
        self
    }

    /// Permit new `enum` values
    pub fn with_new_enum_values(mut self) -> Self {
        self.allow_new_enum_value = true;
        self
    }

    /// Reconcile `anyOf` reorderings instead of flagging them
    pub fn with_reorder(mut self) -> Self {
        self.allow_reorder = true;
        self
    }

    /// Exempt the named identifiers from removal and move breakage
    pub fn with_deprecated_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deprecated_items
            .extend(items.into_iter().map(Into::into));
        self
    }

    pub(crate) fn is_deprecated(&self, name: &str) -> bool {
        self.deprecated_items.iter().any(|item| item == name)
    }
}
