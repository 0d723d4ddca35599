//! Widget identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Process-unique, stable widget identifier.
///
/// Generated ids have the form `w<n>` and are never reused within a tree.
/// Custom ids are accepted when they satisfy [`is_valid_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    pub(crate) fn generated(counter: u64) -> Self {
        Self(format!("w{}", counter))
    }

    pub(crate) fn custom(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WidgetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check a custom id against the HTML `id` grammar.
///
/// The first character must be a letter; the rest may be letters, digits,
/// `-`, `.`, `_` or `:`.
pub fn is_valid_id(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_alphabetic() || ch.is_ascii_digit() || matches!(ch, '-' | '.' | '_' | ':'))
}
