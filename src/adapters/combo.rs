use super::control::{control_properties, items, items_changed, normalize_index, selection_index};
use super::fields::{SELECTED_ITEM, SELECTION_LENGTH, SELECTION_START};
use super::props::{EDITABLE, ITEMS, LIST_VISIBLE, SELECTION, TEXT, TEXT_LIMIT, TEXT_SELECTION};
use super::style::READ_ONLY;
use crate::lifecycle::{
    render_listener_changes, render_property_changes_forcing, DecodingError, LifeCycleAdapter,
    ProtocolError, PropertyDef, RenderContext,
};
use crate::protocol::keys::{
    EVENT_MODIFY_TEXT, EVENT_WIDGET_DEFAULT_SELECTED, EVENT_WIDGET_SELECTED,
};
use crate::protocol::{MessageBuilder, ParamDecoder};
use crate::widget::{Event, EventKind, Value, Widget, WidgetId, WidgetTree};

/// Text limit meaning "no limit". Rendered as `null`.
pub const UNLIMITED_TEXT: i64 = i32::MAX as i64;

const EVENTS: &[EventKind] = &[
    EventKind::Selection,
    EventKind::Modify,
    EventKind::DefaultSelection,
];

/// Drop-down list with an optionally editable text field.
#[derive(Debug)]
pub struct ComboAdapter {
    properties: Vec<PropertyDef>,
}

impl ComboAdapter {
    pub fn new() -> Self {
        let mut properties = vec![
            PropertyDef::new(ITEMS, Value::Strings(Vec::new())),
            PropertyDef::new(SELECTION, -1i64),
            PropertyDef::new(TEXT, ""),
            PropertyDef::new(TEXT_LIMIT, UNLIMITED_TEXT),
            PropertyDef::new(LIST_VISIBLE, false),
            PropertyDef::new(EDITABLE, true),
            PropertyDef::new(TEXT_SELECTION, Value::Range(0, 0)),
        ];
        properties.extend(control_properties());
        Self { properties }
    }
}

impl Default for ComboAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn text(widget: &Widget) -> &str {
    widget.get_str(TEXT).unwrap_or("")
}

fn text_limit(widget: &Widget) -> usize {
    widget
        .get_int(TEXT_LIMIT)
        .filter(|limit| *limit > 0)
        .unwrap_or(UNLIMITED_TEXT) as usize
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Clamp a client selection to the character length of `text`.
fn clamp_selection(text: &str, start: i64, length: i64) -> Value {
    let len = text.chars().count() as i64;
    let start = start.clamp(0, len);
    let end = start.saturating_add(length.max(0)).min(len);
    Value::Range(start, end)
}

/// Text the combo would show after applying the request's valid fields.
fn incoming_text(widget: &Widget, decoder: &ParamDecoder<'_>) -> Option<String> {
    let limit = text_limit(widget);
    if let Some(raw) = decoder.get_string(TEXT) {
        return Some(truncate_chars(raw, limit));
    }
    let items = items(widget);
    let index = normalize_index(decoder.valid_int(SELECTED_ITEM)?, items);
    if index < 0 {
        return None;
    }
    Some(truncate_chars(&items[index as usize], limit))
}

impl LifeCycleAdapter for ComboAdapter {
    fn widget_type(&self) -> &str {
        "combo"
    }

    fn properties(&self) -> &[PropertyDef] {
        &self.properties
    }

    fn listened_events(&self) -> &[EventKind] {
        EVENTS
    }

    fn default_value(&self, widget: &Widget, property: &PropertyDef) -> Value {
        if property.name == EDITABLE {
            return Value::Bool(!widget.has_style(READ_ONLY));
        }
        property.default.clone()
    }

    fn render_value(&self, property: &PropertyDef, value: Value) -> Value {
        let limited = matches!(value.as_int(), Some(limit) if limit > 0 && limit < UNLIMITED_TEXT);
        if property.name == TEXT_LIMIT && !limited {
            return Value::Null;
        }
        value
    }

    fn enqueue_events(&self, widget: &Widget, decoder: &ParamDecoder<'_>) -> Vec<Event> {
        let mut events = Vec::new();

        let selection_changed = decoder
            .valid_int(SELECTED_ITEM)
            .is_some_and(|index| normalize_index(index, items(widget)) != selection_index(widget));
        if selection_changed || decoder.is_event_source(EVENT_WIDGET_SELECTED) {
            events.push(Event::new(widget.id().clone(), EventKind::Selection));
        }

        let text_changed =
            incoming_text(widget, decoder).is_some_and(|incoming| incoming != text(widget));
        if text_changed || decoder.is_event_source(EVENT_MODIFY_TEXT) {
            events.push(Event::new(widget.id().clone(), EventKind::Modify));
        }

        if decoder.is_event_source(EVENT_WIDGET_DEFAULT_SELECTED) {
            events.push(Event::new(widget.id().clone(), EventKind::DefaultSelection));
        }
        events
    }

    fn read_data(
        &self,
        id: &WidgetId,
        tree: &mut WidgetTree,
        decoder: &ParamDecoder<'_>,
    ) -> Vec<DecodingError> {
        let mut errors = Vec::new();
        let list_visible = decoder.read_bool(LIST_VISIBLE, &mut errors);
        let selected = decoder.read_int(SELECTED_ITEM, &mut errors);
        let start = decoder.read_int(SELECTION_START, &mut errors);
        let length = decoder.read_int(SELECTION_LENGTH, &mut errors);

        let Some(widget) = tree.get_mut(id) else {
            return errors;
        };

        if let Some(visible) = list_visible {
            widget.set(LIST_VISIBLE, visible);
        }
        if let Some(index) = selected {
            let index = normalize_index(index, items(widget));
            widget.set(SELECTION, index);
            if index >= 0 {
                let item = truncate_chars(&items(widget)[index as usize], text_limit(widget));
                widget.set(TEXT, item);
            }
        }
        if let Some(raw) = decoder.get_string(TEXT) {
            let value = truncate_chars(raw, text_limit(widget));
            widget.set(TEXT, value);
        }

        let (current_start, current_end) = widget
            .get(TEXT_SELECTION)
            .and_then(Value::as_range)
            .unwrap_or((0, 0));
        let start = start.unwrap_or(current_start);
        let length = length.unwrap_or(current_end - current_start);
        let range = clamp_selection(text(widget), start, length);
        if widget.get(TEXT_SELECTION).is_some() || range != Value::Range(0, 0) {
            widget.set(TEXT_SELECTION, range);
        }
        errors
    }

    fn render_changes(
        &self,
        widget: &Widget,
        ctx: &RenderContext<'_>,
        builder: &mut MessageBuilder,
    ) -> Result<(), ProtocolError> {
        let resend_selection = items_changed(widget, ctx.store);
        render_property_changes_forcing(self, widget, ctx, builder, |property, value| {
            resend_selection && property.name == SELECTION && value.as_int() != Some(-1)
        })?;
        render_listener_changes(self, widget, ctx, builder)
    }
}
