//! Cycle-scoped message builder.
//!
//! The builder tracks which targets exist on the client so every
//! operation for an id lands after that id's `create` and before its
//! `destroy`. Once finalized, no further operation is accepted.

use std::collections::HashSet;

use serde::Serialize;

use super::operation::{Operation, PropertyList};
use crate::lifecycle::ProtocolError;
use crate::widget::{EventKind, Value, WidgetId};

/// Cycle metadata sent with every message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageHead {
    pub display: String,
    pub request_counter: u64,
}

/// Finalized, immutable operation sequence of one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    head: MessageHead,
    operations: Vec<Operation>,
}

impl Message {
    pub fn head(&self) -> &MessageHead {
        &self.head
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Operations targeting `id`, in emission order.
    pub fn operations_for<'a>(&'a self, id: &'a WidgetId) -> impl Iterator<Item = &'a Operation> {
        self.operations.iter().filter(move |op| op.target() == id)
    }

    pub fn find_create(&self, id: &WidgetId) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| matches!(op, Operation::Create { target, .. } if target == id))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Accumulates operations for one cycle.
#[derive(Debug)]
pub struct MessageBuilder {
    head: MessageHead,
    operations: Vec<Operation>,
    live: HashSet<WidgetId>,
    destroyed: HashSet<WidgetId>,
    finalized: bool,
}

impl MessageBuilder {
    /// `existing` are the ids the client already knows from earlier cycles.
    pub fn new(head: MessageHead, existing: impl IntoIterator<Item = WidgetId>) -> Self {
        Self {
            head,
            operations: Vec::new(),
            live: existing.into_iter().collect(),
            destroyed: HashSet::new(),
            finalized: false,
        }
    }

    fn ensure_open(&self) -> Result<(), ProtocolError> {
        if self.finalized {
            return Err(ProtocolError::AlreadyFinalized);
        }
        Ok(())
    }

    fn ensure_live(&self, target: &WidgetId) -> Result<(), ProtocolError> {
        if self.destroyed.contains(target) {
            return Err(ProtocolError::TargetDestroyed(target.clone()));
        }
        if !self.live.contains(target) {
            return Err(ProtocolError::UnknownTarget(target.clone()));
        }
        Ok(())
    }

    pub fn create(
        &mut self,
        target: &WidgetId,
        widget_type: &str,
        parent: Option<&WidgetId>,
        properties: PropertyList,
    ) -> Result<(), ProtocolError> {
        self.ensure_open()?;
        if self.live.contains(target) || self.destroyed.contains(target) {
            return Err(ProtocolError::DuplicateCreate(target.clone()));
        }
        if let Some(parent) = parent {
            self.ensure_live(parent)?;
        }
        self.live.insert(target.clone());
        self.operations.push(Operation::Create {
            target: target.clone(),
            widget_type: widget_type.to_string(),
            parent: parent.cloned(),
            properties,
        });
        Ok(())
    }

    pub fn set(
        &mut self,
        target: &WidgetId,
        property: &str,
        value: Value,
    ) -> Result<(), ProtocolError> {
        self.ensure_open()?;
        self.ensure_live(target)?;
        self.operations.push(Operation::Set {
            target: target.clone(),
            property: property.to_string(),
            value,
        });
        Ok(())
    }

    pub fn listen(
        &mut self,
        target: &WidgetId,
        event: EventKind,
        enabled: bool,
    ) -> Result<(), ProtocolError> {
        self.ensure_open()?;
        self.ensure_live(target)?;
        self.operations.push(Operation::Listen {
            target: target.clone(),
            event,
            enabled,
        });
        Ok(())
    }

    pub fn call(
        &mut self,
        target: &WidgetId,
        method: &str,
        args: Vec<Value>,
    ) -> Result<(), ProtocolError> {
        self.ensure_open()?;
        self.ensure_live(target)?;
        self.operations.push(Operation::Call {
            target: target.clone(),
            method: method.to_string(),
            args,
        });
        Ok(())
    }

    pub fn destroy(&mut self, target: &WidgetId) -> Result<(), ProtocolError> {
        self.ensure_open()?;
        self.ensure_live(target)?;
        self.live.remove(target);
        self.destroyed.insert(target.clone());
        self.operations.push(Operation::Destroy {
            target: target.clone(),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Seal the builder and hand out the message.
    pub fn finalize(&mut self) -> Result<Message, ProtocolError> {
        self.ensure_open()?;
        self.finalized = true;
        Ok(Message {
            head: self.head.clone(),
            operations: std::mem::take(&mut self.operations),
        })
    }
}
