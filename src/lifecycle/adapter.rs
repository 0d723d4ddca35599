//! The per-variant life-cycle contract.
//!
//! Every variant declares its preservable properties (in render order) and
//! the event kinds it can be listened on. The default methods implement
//! snapshotting, creation and diffing from those declarations; adapters
//! override only what is specific to their variant.

use super::error::{DecodingError, ProtocolError};
use super::store::PropertyStore;
use crate::protocol::{MessageBuilder, ParamDecoder, PropertyList};
use crate::widget::{Event, EventKind, ListenerRegistry, Value, Widget, WidgetId, WidgetTree};

/// Method called on new widgets when UI-test ids are enabled.
pub const SET_HTML_ID: &str = "setHtmlId";

/// A preservable property and its variant default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: &'static str,
    pub default: Value,
}

impl PropertyDef {
    pub fn new(name: &'static str, default: impl Into<Value>) -> Self {
        Self {
            name,
            default: default.into(),
        }
    }
}

/// Read-only inputs of the render phase.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub store: &'a PropertyStore,
    pub listeners: &'a ListenerRegistry,
    /// Emit `setHtmlId` calls for new widgets.
    pub ui_tests: bool,
}

pub trait LifeCycleAdapter: Send + Sync {
    /// Type name sent in `create` operations.
    fn widget_type(&self) -> &str;

    /// Preservable properties in render order.
    fn properties(&self) -> &[PropertyDef];

    /// Event kinds whose listener presence is synchronized.
    fn listened_events(&self) -> &[EventKind] {
        &[]
    }

    /// Default of `property` for this particular widget (style may matter).
    fn default_value(&self, _widget: &Widget, property: &PropertyDef) -> Value {
        property.default.clone()
    }

    fn current_value(&self, widget: &Widget, property: &PropertyDef) -> Value {
        widget
            .get(property.name)
            .cloned()
            .unwrap_or_else(|| self.default_value(widget, property))
    }

    /// Wire encoding of a property value.
    fn render_value(&self, _property: &PropertyDef, value: Value) -> Value {
        value
    }

    /// Whether `property` is ever sent for this widget.
    fn is_rendered(&self, _widget: &Widget, _property: &PropertyDef) -> bool {
        true
    }

    /// Record every preservable property and listener flag as the client
    /// now holds them.
    fn preserve_values(&self, widget: &Widget, listeners: &ListenerRegistry, store: &mut PropertyStore) {
        for property in self.properties() {
            store.preserve(widget.id(), property.name, self.current_value(widget, property));
        }
        for kind in self.listened_events() {
            let has = listeners.has_listeners(widget.id(), *kind);
            store.preserve(widget.id(), kind.listener_property(), Value::Bool(has));
        }
    }

    /// Inspect control keys and fields and report events to fire. Runs
    /// against the pre-read state and never invokes listeners. A malformed
    /// field counts as absent here; `read_data` reports it.
    fn enqueue_events(&self, _widget: &Widget, _decoder: &ParamDecoder<'_>) -> Vec<Event> {
        Vec::new()
    }

    /// Apply every well-formed inbound field and return the rejected ones.
    /// Must be idempotent.
    fn read_data(
        &self,
        _widget: &WidgetId,
        _tree: &mut WidgetTree,
        _decoder: &ParamDecoder<'_>,
    ) -> Vec<DecodingError> {
        Vec::new()
    }

    fn render_initialization(
        &self,
        widget: &Widget,
        ctx: &RenderContext<'_>,
        builder: &mut MessageBuilder,
    ) -> Result<(), ProtocolError> {
        render_create(self, widget, ctx, builder)
    }

    fn render_changes(
        &self,
        widget: &Widget,
        ctx: &RenderContext<'_>,
        builder: &mut MessageBuilder,
    ) -> Result<(), ProtocolError> {
        render_property_changes(self, widget, ctx, builder)?;
        render_listener_changes(self, widget, ctx, builder)
    }
}

/// Emit the `create` operation, carrying style and every non-default
/// property, followed by `listen` for kinds that already have listeners.
pub fn render_create<A: LifeCycleAdapter + ?Sized>(
    adapter: &A,
    widget: &Widget,
    ctx: &RenderContext<'_>,
    builder: &mut MessageBuilder,
) -> Result<(), ProtocolError> {
    let mut properties = PropertyList::new();
    if !widget.style().is_empty() {
        properties.push("style", Value::Strings(widget.style().to_vec()));
    }
    for property in adapter.properties() {
        if !adapter.is_rendered(widget, property) {
            continue;
        }
        let current = adapter.current_value(widget, property);
        if current != adapter.default_value(widget, property) {
            properties.push(property.name, adapter.render_value(property, current));
        }
    }
    builder.create(widget.id(), adapter.widget_type(), widget.parent(), properties)?;

    for kind in adapter.listened_events() {
        if ctx.listeners.has_listeners(widget.id(), *kind) {
            builder.listen(widget.id(), *kind, true)?;
        }
    }

    if ctx.ui_tests {
        builder.call(
            widget.id(),
            SET_HTML_ID,
            vec![Value::from(widget.id().as_str())],
        )?;
    }
    Ok(())
}

/// Emit one `set` per declared property whose value differs from its
/// preserved value (or has none).
pub fn render_property_changes<A: LifeCycleAdapter + ?Sized>(
    adapter: &A,
    widget: &Widget,
    ctx: &RenderContext<'_>,
    builder: &mut MessageBuilder,
) -> Result<(), ProtocolError> {
    render_property_changes_forcing(adapter, widget, ctx, builder, |_, _| false)
}

/// Like [`render_property_changes`], but also sends properties for which
/// `force` returns true even when unchanged.
pub fn render_property_changes_forcing<A, F>(
    adapter: &A,
    widget: &Widget,
    ctx: &RenderContext<'_>,
    builder: &mut MessageBuilder,
    force: F,
) -> Result<(), ProtocolError>
where
    A: LifeCycleAdapter + ?Sized,
    F: Fn(&PropertyDef, &Value) -> bool,
{
    for property in adapter.properties() {
        if !adapter.is_rendered(widget, property) {
            continue;
        }
        let current = adapter.current_value(widget, property);
        let unchanged = ctx.store.get_preserved(widget.id(), property.name) == Some(&current);
        if unchanged && !force(property, &current) {
            continue;
        }
        tracing::trace!(widget = %widget.id(), property = property.name, "Property changed");
        builder.set(widget.id(), property.name, adapter.render_value(property, current))?;
    }
    Ok(())
}

/// Emit `listen` when listener presence flipped since the snapshot.
pub fn render_listener_changes<A: LifeCycleAdapter + ?Sized>(
    adapter: &A,
    widget: &Widget,
    ctx: &RenderContext<'_>,
    builder: &mut MessageBuilder,
) -> Result<(), ProtocolError> {
    for kind in adapter.listened_events() {
        let has = ctx.listeners.has_listeners(widget.id(), *kind);
        let had = ctx
            .store
            .get_preserved(widget.id(), kind.listener_property())
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if has != had {
            builder.listen(widget.id(), *kind, has)?;
        }
    }
    Ok(())
}
