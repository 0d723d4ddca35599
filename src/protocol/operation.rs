//! Protocol operations and their JSON encoding.
//!
//! Each operation serializes as a tagged array:
//!
//! ```text
//! ["create",  id, type, { "parent": pid, ...props }]
//! ["set",     id, { prop: value }]
//! ["listen",  id, { Event: bool }]
//! ["call",    id, method, { "args": [...] }]
//! ["destroy", id]
//! ```

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::widget::{EventKind, Value, WidgetId};

/// Ordered property list. Serializes as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyList(Vec<(String, Value)>);

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.0.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for PropertyList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// One atomic instruction for the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Create {
        target: WidgetId,
        widget_type: String,
        parent: Option<WidgetId>,
        properties: PropertyList,
    },
    Set {
        target: WidgetId,
        property: String,
        value: Value,
    },
    Listen {
        target: WidgetId,
        event: EventKind,
        enabled: bool,
    },
    Call {
        target: WidgetId,
        method: String,
        args: Vec<Value>,
    },
    Destroy {
        target: WidgetId,
    },
}

impl Operation {
    pub fn target(&self) -> &WidgetId {
        match self {
            Operation::Create { target, .. }
            | Operation::Set { target, .. }
            | Operation::Listen { target, .. }
            | Operation::Call { target, .. }
            | Operation::Destroy { target } => target,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            Operation::Create { .. } => "create",
            Operation::Set { .. } => "set",
            Operation::Listen { .. } => "listen",
            Operation::Call { .. } => "call",
            Operation::Destroy { .. } => "destroy",
        }
    }
}

struct Single<'a, V: Serialize>(&'a str, &'a V);

impl<V: Serialize> Serialize for Single<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}

struct CreateProperties<'a> {
    parent: Option<&'a WidgetId>,
    properties: &'a PropertyList,
}

impl Serialize for CreateProperties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.properties.len() + usize::from(self.parent.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(parent) = self.parent {
            map.serialize_entry("parent", parent)?;
        }
        for (name, value) in &self.properties.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Operation::Create {
                target,
                widget_type,
                parent,
                properties,
            } => {
                let mut seq = serializer.serialize_seq(Some(4))?;
                seq.serialize_element(self.action())?;
                seq.serialize_element(target)?;
                seq.serialize_element(widget_type)?;
                seq.serialize_element(&CreateProperties {
                    parent: parent.as_ref(),
                    properties,
                })?;
                seq.end()
            }
            Operation::Set {
                target,
                property,
                value,
            } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element(self.action())?;
                seq.serialize_element(target)?;
                seq.serialize_element(&Single(property, value))?;
                seq.end()
            }
            Operation::Listen {
                target,
                event,
                enabled,
            } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element(self.action())?;
                seq.serialize_element(target)?;
                seq.serialize_element(&Single(event.as_str(), enabled))?;
                seq.end()
            }
            Operation::Call {
                target,
                method,
                args,
            } => {
                let mut seq = serializer.serialize_seq(Some(4))?;
                seq.serialize_element(self.action())?;
                seq.serialize_element(target)?;
                seq.serialize_element(method)?;
                seq.serialize_element(&Single("args", args))?;
                seq.end()
            }
            Operation::Destroy { target } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(self.action())?;
                seq.serialize_element(target)?;
                seq.end()
            }
        }
    }
}
