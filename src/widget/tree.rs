//! Arena-backed widget tree.
//!
//! Ownership is top-down: the tree owns every widget, a widget refers to its
//! parent by id only. Destroying a widget removes its whole subtree and, if
//! the subtree root was already rendered, records it as a pending disposal
//! for the next render phase.

use std::collections::HashMap;

use thiserror::Error;

use super::id::{is_valid_id, WidgetId};
use super::value::Value;
use super::variant::VariantTag;

/// Errors raised by structural tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Parent widget '{0}' does not exist")]
    UnknownParent(WidgetId),

    #[error("Widget '{0}' does not exist")]
    UnknownWidget(WidgetId),

    #[error("Widget id '{0}' is already in use")]
    DuplicateId(String),

    #[error("The widget id contains illegal characters: {0}")]
    InvalidId(String),
}

/// A server-held UI node.
#[derive(Debug, Clone)]
pub struct Widget {
    id: WidgetId,
    variant: VariantTag,
    style: Vec<String>,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    properties: HashMap<String, Value>,
    initialized: bool,
}

impl Widget {
    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    pub fn variant(&self) -> &VariantTag {
        &self.variant
    }

    pub fn style(&self) -> &[String] {
        &self.style
    }

    pub fn has_style(&self, flag: &str) -> bool {
        self.style.iter().any(|s| s == flag)
    }

    pub fn parent(&self) -> Option<&WidgetId> {
        self.parent.as_ref()
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// Whether a `Create` for this widget has been delivered to the client.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_strings(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(Value::as_strings)
    }

    /// Set a property, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.properties.insert(name.into(), value.into())
    }
}

/// Parameters for creating a widget.
#[derive(Debug, Clone)]
pub struct WidgetSpec {
    variant: VariantTag,
    style: Vec<String>,
    custom_id: Option<String>,
}

impl WidgetSpec {
    pub fn new(variant: VariantTag) -> Self {
        Self {
            variant,
            style: Vec::new(),
            custom_id: None,
        }
    }

    pub fn with_style(mut self, flag: impl Into<String>) -> Self {
        self.style.push(flag.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.custom_id = Some(id.into());
        self
    }
}

/// The live widget tree of one display.
#[derive(Debug, Default)]
pub struct WidgetTree {
    widgets: HashMap<WidgetId, Widget>,
    roots: Vec<WidgetId>,
    next_id: u64,
    disposed: Vec<WidgetId>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a widget under `parent` (or as a root when `None`).
    pub fn create(
        &mut self,
        parent: Option<&WidgetId>,
        spec: WidgetSpec,
    ) -> Result<WidgetId, TreeError> {
        if let Some(parent) = parent {
            if !self.widgets.contains_key(parent) {
                return Err(TreeError::UnknownParent(parent.clone()));
            }
        }

        let id = match spec.custom_id {
            Some(custom) => {
                if !is_valid_id(&custom) {
                    return Err(TreeError::InvalidId(custom));
                }
                let id = WidgetId::custom(custom);
                if self.widgets.contains_key(&id) {
                    return Err(TreeError::DuplicateId(id.as_str().to_string()));
                }
                id
            }
            None => self.next_generated_id(),
        };

        let widget = Widget {
            id: id.clone(),
            variant: spec.variant,
            style: spec.style,
            parent: parent.cloned(),
            children: Vec::new(),
            properties: HashMap::new(),
            initialized: false,
        };
        self.widgets.insert(id.clone(), widget);

        match parent.and_then(|p| self.widgets.get_mut(p)) {
            Some(parent) => parent.children.push(id.clone()),
            None => self.roots.push(id.clone()),
        }

        tracing::trace!(widget = %id, "Widget created");
        Ok(id)
    }

    fn next_generated_id(&mut self) -> WidgetId {
        loop {
            self.next_id += 1;
            let id = WidgetId::generated(self.next_id);
            // A custom id may already occupy the generated name.
            if !self.widgets.contains_key(&id) {
                return id;
            }
        }
    }

    /// Destroy a widget and its subtree.
    ///
    /// Returns every removed id, subtree root first.
    pub fn destroy(&mut self, id: &WidgetId) -> Result<Vec<WidgetId>, TreeError> {
        let Some(widget) = self.widgets.get(id) else {
            return Err(TreeError::UnknownWidget(id.clone()));
        };

        let initialized = widget.initialized;
        match widget.parent.clone() {
            Some(parent) => {
                if let Some(parent) = self.widgets.get_mut(&parent) {
                    parent.children.retain(|child| child != id);
                }
            }
            None => self.roots.retain(|root| root != id),
        }

        let removed = self.subtree(id);
        for removed_id in &removed {
            self.widgets.remove(removed_id);
        }

        if initialized {
            self.disposed.push(id.clone());
        }

        tracing::trace!(widget = %id, removed = removed.len(), "Widget subtree destroyed");
        Ok(removed)
    }

    /// Ids of `id` and all its descendants, depth-first.
    fn subtree(&self, id: &WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if let Some(widget) = self.widgets.get(&current) {
                stack.extend(widget.children.iter().rev().cloned());
            }
            result.push(current);
        }
        result
    }

    pub fn get(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.get(id)
    }

    pub fn get_mut(&mut self, id: &WidgetId) -> Option<&mut Widget> {
        self.widgets.get_mut(id)
    }

    pub fn require(&self, id: &WidgetId) -> Result<&Widget, TreeError> {
        self.get(id).ok_or_else(|| TreeError::UnknownWidget(id.clone()))
    }

    pub fn require_mut(&mut self, id: &WidgetId) -> Result<&mut Widget, TreeError> {
        self.widgets
            .get_mut(id)
            .ok_or_else(|| TreeError::UnknownWidget(id.clone()))
    }

    pub fn contains(&self, id: &WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    /// All widget ids, parents before children, siblings in creation order.
    pub fn depth_first(&self) -> Vec<WidgetId> {
        let mut result = Vec::with_capacity(self.widgets.len());
        for root in &self.roots {
            result.extend(self.subtree(root));
        }
        result
    }

    /// Siblings of `id` sharing its parent, excluding `id` itself.
    pub fn siblings(&self, id: &WidgetId) -> Vec<WidgetId> {
        let Some(widget) = self.widgets.get(id) else {
            return Vec::new();
        };
        let all = match widget.parent.as_ref().and_then(|p| self.widgets.get(p)) {
            Some(parent) => &parent.children,
            None => &self.roots,
        };
        all.iter().filter(|other| *other != id).cloned().collect()
    }

    /// Ids of every currently initialized widget.
    pub fn initialized_ids(&self) -> Vec<WidgetId> {
        self.widgets
            .values()
            .filter(|w| w.initialized)
            .map(|w| w.id.clone())
            .collect()
    }

    pub(crate) fn mark_initialized(&mut self, id: &WidgetId) {
        if let Some(widget) = self.widgets.get_mut(id) {
            widget.initialized = true;
        }
    }

    /// Take the rendered subtree roots destroyed since the last render.
    pub(crate) fn take_disposed(&mut self) -> Vec<WidgetId> {
        std::mem::take(&mut self.disposed)
    }

    /// Put back disposals that could not be delivered.
    pub(crate) fn restore_disposed(&mut self, mut ids: Vec<WidgetId>) {
        ids.append(&mut self.disposed);
        self.disposed = ids;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_shell() -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        let shell = tree.create(None, WidgetSpec::new(VariantTag::SHELL)).unwrap();
        (tree, shell)
    }

    #[test]
    fn ids_are_never_reused() {
        let (mut tree, shell) = tree_with_shell();
        let a = tree.create(Some(&shell), WidgetSpec::new(VariantTag::LIST)).unwrap();
        tree.destroy(&a).unwrap();
        let b = tree.create(Some(&shell), WidgetSpec::new(VariantTag::LIST)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn create_rejects_unknown_parent() {
        let mut tree = WidgetTree::new();
        let missing = WidgetId::custom("nope");
        let err = tree
            .create(Some(&missing), WidgetSpec::new(VariantTag::LIST))
            .unwrap_err();
        assert_eq!(err, TreeError::UnknownParent(missing));
    }

    #[test]
    fn custom_ids_are_validated() {
        let (mut tree, shell) = tree_with_shell();
        let err = tree
            .create(Some(&shell), WidgetSpec::new(VariantTag::LIST).with_id("1bad"))
            .unwrap_err();
        assert!(matches!(err, TreeError::InvalidId(_)));

        tree.create(Some(&shell), WidgetSpec::new(VariantTag::LIST).with_id("names"))
            .unwrap();
        let err = tree
            .create(Some(&shell), WidgetSpec::new(VariantTag::LIST).with_id("names"))
            .unwrap_err();
        assert_eq!(err, TreeError::DuplicateId("names".to_string()));
    }

    #[test]
    fn depth_first_visits_parents_before_children() {
        let (mut tree, shell) = tree_with_shell();
        let bar = tree.create(Some(&shell), WidgetSpec::new(VariantTag::TOOL_BAR)).unwrap();
        let item = tree.create(Some(&bar), WidgetSpec::new(VariantTag::TOOL_ITEM)).unwrap();
        let list = tree.create(Some(&shell), WidgetSpec::new(VariantTag::LIST)).unwrap();

        assert_eq!(tree.depth_first(), vec![shell, bar, item, list]);
    }

    #[test]
    fn destroy_removes_subtree_and_records_rendered_root() {
        let (mut tree, shell) = tree_with_shell();
        let bar = tree.create(Some(&shell), WidgetSpec::new(VariantTag::TOOL_BAR)).unwrap();
        let item = tree.create(Some(&bar), WidgetSpec::new(VariantTag::TOOL_ITEM)).unwrap();
        tree.mark_initialized(&bar);
        tree.mark_initialized(&item);

        let removed = tree.destroy(&bar).unwrap();
        assert_eq!(removed, vec![bar.clone(), item.clone()]);
        assert!(!tree.contains(&item));
        assert!(tree.get(&shell).unwrap().children().is_empty());
        assert_eq!(tree.take_disposed(), vec![bar]);
        assert!(tree.take_disposed().is_empty());
    }

    #[test]
    fn destroying_unrendered_widget_records_nothing() {
        let (mut tree, shell) = tree_with_shell();
        let list = tree.create(Some(&shell), WidgetSpec::new(VariantTag::LIST)).unwrap();
        tree.destroy(&list).unwrap();
        assert!(tree.take_disposed().is_empty());
    }

    #[test]
    fn siblings_exclude_self() {
        let (mut tree, shell) = tree_with_shell();
        let a = tree.create(Some(&shell), WidgetSpec::new(VariantTag::TOOL_ITEM)).unwrap();
        let b = tree.create(Some(&shell), WidgetSpec::new(VariantTag::TOOL_ITEM)).unwrap();
        assert_eq!(tree.siblings(&a), vec![b]);
    }
}
