//! Snapshot of the values last communicated to the client.

use std::collections::HashMap;

use crate::widget::{Value, WidgetId};

/// Preserved values keyed by (widget, property).
///
/// Filled from the live widgets right after a message was built, so it
/// holds exactly what the client was sent. The next cycle takes it out of
/// the display, diffs against it and replaces it wholesale once its own
/// message is built. Later mutation of the live widgets never affects it.
#[derive(Debug, Default)]
pub struct PropertyStore {
    values: HashMap<(WidgetId, String), Value>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the value of one property.
    pub fn preserve(&mut self, widget: &WidgetId, property: &str, value: Value) {
        self.values
            .insert((widget.clone(), property.to_string()), value);
    }

    /// The snapshotted value, or `None` if nothing was preserved.
    ///
    /// `None` means the widget is new to the client and the current value
    /// must be rendered unconditionally.
    pub fn get_preserved(&self, widget: &WidgetId, property: &str) -> Option<&Value> {
        self.values.get(&(widget.clone(), property.to_string()))
    }

    pub fn has_snapshot(&self, widget: &WidgetId) -> bool {
        self.values.keys().any(|(id, _)| id == widget)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
