use super::props::{ENABLED, ITEMS, SELECTION, TOOL_TIP, VISIBLE};
use crate::lifecycle::{PropertyDef, PropertyStore};
use crate::widget::Widget;

/// Properties every control carries. Variants append them after their own.
pub fn control_properties() -> Vec<PropertyDef> {
    vec![
        PropertyDef::new(ENABLED, true),
        PropertyDef::new(VISIBLE, true),
        PropertyDef::new(TOOL_TIP, ""),
    ]
}

pub(crate) fn items(widget: &Widget) -> &[String] {
    widget.get_strings(ITEMS).unwrap_or(&[])
}

pub(crate) fn selection_index(widget: &Widget) -> i64 {
    widget.get_int(SELECTION).unwrap_or(-1)
}

/// Clamp a client-sent index into `items`, `-1` meaning no selection.
pub(crate) fn normalize_index(index: i64, items: &[String]) -> i64 {
    if index >= 0 && (index as usize) < items.len() {
        index
    } else {
        -1
    }
}

/// Whether the item list differs from the snapshot. The client resets its
/// selection when items are replaced, so a kept selection must be re-sent.
pub(crate) fn items_changed(widget: &Widget, store: &PropertyStore) -> bool {
    match store.get_preserved(widget.id(), ITEMS) {
        Some(previous) => previous.as_strings() != Some(items(widget)),
        None => true,
    }
}
