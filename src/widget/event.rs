//! Events synthesized from request parameters.

use std::fmt;

use serde::Serialize;

use super::id::WidgetId;
use super::value::Value;

/// Kind of event a widget can fire and a client can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EventKind {
    Selection,
    DefaultSelection,
    Modify,
}

impl EventKind {
    /// Name used in `listen` operations.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Selection => "Selection",
            Self::DefaultSelection => "DefaultSelection",
            Self::Modify => "Modify",
        }
    }

    /// Synthetic property name under which listener presence is preserved.
    pub fn listener_property(&self) -> &'static str {
        match self {
            Self::Selection => "SelectionListener",
            Self::DefaultSelection => "DefaultSelectionListener",
            Self::Modify => "ModifyListener",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event queued during the read phase and delivered once during the
/// process-action phase of the same cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: WidgetId,
    pub kind: EventKind,
    pub payload: Value,
}

impl Event {
    pub fn new(source: WidgetId, kind: EventKind) -> Self {
        Self {
            source,
            kind,
            payload: Value::Null,
        }
    }

    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = payload.into();
        self
    }
}
