use super::control::control_properties;
use super::fields;
use super::props::{SELECTION, TEXT};
use super::style::{CHECK, DROP_DOWN, RADIO, SEPARATOR};
use crate::lifecycle::{DecodingError, LifeCycleAdapter, PropertyDef};
use crate::protocol::keys::EVENT_WIDGET_SELECTED;
use crate::protocol::ParamDecoder;
use crate::widget::{Event, EventKind, VariantTag, Widget, WidgetId, WidgetTree};

const EVENTS: &[EventKind] = &[EventKind::Selection];

/// Behavior of a tool item, derived from its style flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolItemKind {
    Push,
    Check,
    Radio,
    DropDown,
    Separator,
}

impl ToolItemKind {
    /// First matching style flag wins; no flag means `Push`.
    pub fn of(widget: &Widget) -> Self {
        if widget.has_style(SEPARATOR) {
            ToolItemKind::Separator
        } else if widget.has_style(CHECK) {
            ToolItemKind::Check
        } else if widget.has_style(RADIO) {
            ToolItemKind::Radio
        } else if widget.has_style(DROP_DOWN) {
            ToolItemKind::DropDown
        } else {
            ToolItemKind::Push
        }
    }

    pub fn is_selectable(&self) -> bool {
        matches!(self, ToolItemKind::Check | ToolItemKind::Radio)
    }
}

fn is_radio_item(widget: &Widget) -> bool {
    widget.variant() == &VariantTag::TOOL_ITEM && ToolItemKind::of(widget) == ToolItemKind::Radio
}

#[derive(Debug)]
pub struct ToolItemAdapter {
    properties: Vec<PropertyDef>,
}

impl ToolItemAdapter {
    pub fn new() -> Self {
        let mut properties = vec![PropertyDef::new(TEXT, ""), PropertyDef::new(SELECTION, false)];
        properties.extend(control_properties());
        Self { properties }
    }
}

impl Default for ToolItemAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LifeCycleAdapter for ToolItemAdapter {
    fn widget_type(&self) -> &str {
        "toolItem"
    }

    fn properties(&self) -> &[PropertyDef] {
        &self.properties
    }

    fn listened_events(&self) -> &[EventKind] {
        EVENTS
    }

    fn is_rendered(&self, widget: &Widget, property: &PropertyDef) -> bool {
        let kind = ToolItemKind::of(widget);
        match property.name {
            TEXT => kind != ToolItemKind::Separator,
            SELECTION => kind.is_selectable(),
            _ => true,
        }
    }

    fn enqueue_events(&self, widget: &Widget, decoder: &ParamDecoder<'_>) -> Vec<Event> {
        if ToolItemKind::of(widget) != ToolItemKind::Separator
            && decoder.is_event_source(EVENT_WIDGET_SELECTED)
        {
            return vec![Event::new(widget.id().clone(), EventKind::Selection)];
        }
        Vec::new()
    }

    fn read_data(
        &self,
        id: &WidgetId,
        tree: &mut WidgetTree,
        decoder: &ParamDecoder<'_>,
    ) -> Vec<DecodingError> {
        let mut errors = Vec::new();
        let Some(selected) = decoder.read_bool(fields::SELECTION, &mut errors) else {
            return errors;
        };
        let Some(kind) = tree.get(id).map(ToolItemKind::of) else {
            return errors;
        };
        if !kind.is_selectable() {
            tracing::debug!(widget = %id, ?kind, "Ignoring selection for non-selectable tool item");
            return errors;
        }

        if kind == ToolItemKind::Radio && selected {
            for sibling in tree.siblings(id) {
                if let Some(widget) = tree.get_mut(&sibling) {
                    if is_radio_item(widget) {
                        widget.set(SELECTION, false);
                    }
                }
            }
        }
        if let Some(widget) = tree.get_mut(id) {
            widget.set(SELECTION, selected);
        }
        errors
    }
}
