//! Variant tags select the life-cycle adapter for a widget.

use std::borrow::Cow;
use std::fmt;

/// Behavioral category of a widget. Immutable once the widget exists.
///
/// The set is open: applications may register adapters for their own tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantTag(Cow<'static, str>);

impl VariantTag {
    pub const SHELL: VariantTag = VariantTag(Cow::Borrowed("shell"));
    pub const LIST: VariantTag = VariantTag(Cow::Borrowed("list"));
    pub const COMBO: VariantTag = VariantTag(Cow::Borrowed("combo"));
    pub const TOOL_BAR: VariantTag = VariantTag(Cow::Borrowed("toolBar"));
    pub const TOOL_ITEM: VariantTag = VariantTag(Cow::Borrowed("toolItem"));

    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    /// Tag usable in `const` items.
    pub const fn from_static(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
