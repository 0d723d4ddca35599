//! Per-widget listener registry.
//!
//! Listeners are registered by application code. The dispatcher only
//! invokes them; it never stores them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::event::{Event, EventKind};
use super::id::WidgetId;
use super::tree::WidgetTree;
use crate::lifecycle::ListenerError;

/// Callback invoked for events of the kind it was registered for.
///
/// Listeners receive the whole tree so they can observe and mutate any
/// widget, not only the event source.
pub trait Listener: Send + Sync {
    fn handle_event(&self, event: &Event, tree: &mut WidgetTree) -> Result<(), ListenerError>;
}

impl<F> Listener for F
where
    F: Fn(&Event, &mut WidgetTree) -> Result<(), ListenerError> + Send + Sync,
{
    fn handle_event(&self, event: &Event, tree: &mut WidgetTree) -> Result<(), ListenerError> {
        self(event, tree)
    }
}

/// Handle returned on registration, used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

#[derive(Default)]
pub struct ListenerRegistry {
    listeners: HashMap<(WidgetId, EventKind), Vec<(ListenerHandle, Arc<dyn Listener>)>>,
    next_handle: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        widget: &WidgetId,
        kind: EventKind,
        listener: impl Listener + 'static,
    ) -> ListenerHandle {
        self.next_handle += 1;
        let handle = ListenerHandle(self.next_handle);
        self.listeners
            .entry((widget.clone(), kind))
            .or_default()
            .push((handle, Arc::new(listener)));
        handle
    }

    pub fn remove(&mut self, widget: &WidgetId, kind: EventKind, handle: ListenerHandle) -> bool {
        let key = (widget.clone(), kind);
        let Some(entries) = self.listeners.get_mut(&key) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|(h, _)| *h != handle);
        let removed = entries.len() != before;
        if entries.is_empty() {
            self.listeners.remove(&key);
        }
        removed
    }

    pub fn has_listeners(&self, widget: &WidgetId, kind: EventKind) -> bool {
        self.listeners
            .get(&(widget.clone(), kind))
            .is_some_and(|entries| !entries.is_empty())
    }

    /// Listeners for one event, in registration order.
    ///
    /// Returned as owned handles so the caller holds no borrow on the
    /// registry while listeners run.
    pub fn listeners_for(&self, widget: &WidgetId, kind: EventKind) -> Vec<Arc<dyn Listener>> {
        self.listeners
            .get(&(widget.clone(), kind))
            .map(|entries| entries.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default()
    }

    /// Drop every listener of the given widgets.
    pub fn purge(&mut self, widgets: &[WidgetId]) {
        if widgets.is_empty() {
            return;
        }
        self.listeners.retain(|(id, _), _| !widgets.contains(id));
    }

    /// Drop listeners of widgets that are no longer part of `tree`.
    pub fn purge_missing(&mut self, tree: &WidgetTree) {
        self.listeners.retain(|(id, _), _| tree.contains(id));
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("registrations", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &Event, _: &mut WidgetTree) -> Result<(), ListenerError> {
        Ok(())
    }

    #[test]
    fn add_and_remove() {
        let mut registry = ListenerRegistry::new();
        let id = WidgetId::custom("list");
        assert!(!registry.has_listeners(&id, EventKind::Selection));

        let handle = registry.add(&id, EventKind::Selection, noop);
        assert!(registry.has_listeners(&id, EventKind::Selection));
        assert!(!registry.has_listeners(&id, EventKind::Modify));

        assert!(registry.remove(&id, EventKind::Selection, handle));
        assert!(!registry.has_listeners(&id, EventKind::Selection));
        assert!(!registry.remove(&id, EventKind::Selection, handle));
    }

    #[test]
    fn purge_drops_all_kinds() {
        let mut registry = ListenerRegistry::new();
        let id = WidgetId::custom("combo");
        registry.add(&id, EventKind::Selection, noop);
        registry.add(&id, EventKind::Modify, noop);

        registry.purge(std::slice::from_ref(&id));
        assert!(!registry.has_listeners(&id, EventKind::Selection));
        assert!(!registry.has_listeners(&id, EventKind::Modify));
    }
}
