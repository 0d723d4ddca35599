//! The per-session UI root.

use super::event::EventKind;
use super::id::WidgetId;
use super::listener::{Listener, ListenerHandle, ListenerRegistry};
use super::tree::{TreeError, WidgetSpec, WidgetTree};
use crate::lifecycle::PropertyStore;

/// A session's widget tree together with its listeners.
///
/// Outlives individual cycles; mutated by exactly one cycle at a time.
/// Also keeps the values last delivered to the client, which the next
/// cycle diffs against.
#[derive(Debug)]
pub struct Display {
    id: String,
    tree: WidgetTree,
    listeners: ListenerRegistry,
    request_counter: u64,
    rendered: PropertyStore,
}

impl Display {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tree: WidgetTree::new(),
            listeners: ListenerRegistry::new(),
            request_counter: 0,
            rendered: PropertyStore::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }

    /// Borrow tree and listeners at the same time.
    pub(crate) fn parts_mut(&mut self) -> (&mut WidgetTree, &mut ListenerRegistry) {
        (&mut self.tree, &mut self.listeners)
    }

    pub fn request_counter(&self) -> u64 {
        self.request_counter
    }

    pub(crate) fn next_request(&mut self) -> u64 {
        self.request_counter += 1;
        self.request_counter
    }

    /// Values the client held after the last delivered message.
    pub fn rendered(&self) -> &PropertyStore {
        &self.rendered
    }

    pub(crate) fn take_rendered(&mut self) -> PropertyStore {
        std::mem::take(&mut self.rendered)
    }

    pub(crate) fn set_rendered(&mut self, store: PropertyStore) {
        self.rendered = store;
    }

    pub fn create(
        &mut self,
        parent: Option<&WidgetId>,
        spec: WidgetSpec,
    ) -> Result<WidgetId, TreeError> {
        self.tree.create(parent, spec)
    }

    /// Destroy a widget subtree and drop its listeners.
    pub fn destroy(&mut self, id: &WidgetId) -> Result<(), TreeError> {
        let removed = self.tree.destroy(id)?;
        self.listeners.purge(&removed);
        Ok(())
    }

    pub fn add_listener(
        &mut self,
        widget: &WidgetId,
        kind: EventKind,
        listener: impl Listener + 'static,
    ) -> ListenerHandle {
        self.listeners.add(widget, kind, listener)
    }
}
