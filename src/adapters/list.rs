use super::control::{control_properties, items, items_changed, normalize_index, selection_index};
use super::fields::SELECTED_ITEM;
use super::props::{ITEMS, SELECTION};
use crate::lifecycle::{
    render_listener_changes, render_property_changes_forcing, DecodingError, LifeCycleAdapter,
    ProtocolError, PropertyDef, RenderContext,
};
use crate::protocol::keys::{EVENT_WIDGET_DEFAULT_SELECTED, EVENT_WIDGET_SELECTED};
use crate::protocol::{MessageBuilder, ParamDecoder};
use crate::widget::{Event, EventKind, Value, Widget, WidgetId, WidgetTree};

const EVENTS: &[EventKind] = &[EventKind::Selection, EventKind::DefaultSelection];

/// Single-selection list of strings.
#[derive(Debug)]
pub struct ListAdapter {
    properties: Vec<PropertyDef>,
}

impl ListAdapter {
    pub fn new() -> Self {
        let mut properties = vec![
            PropertyDef::new(ITEMS, Value::Strings(Vec::new())),
            PropertyDef::new(SELECTION, -1i64),
        ];
        properties.extend(control_properties());
        Self { properties }
    }
}

impl Default for ListAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LifeCycleAdapter for ListAdapter {
    fn widget_type(&self) -> &str {
        "list"
    }

    fn properties(&self) -> &[PropertyDef] {
        &self.properties
    }

    fn listened_events(&self) -> &[EventKind] {
        EVENTS
    }

    fn enqueue_events(&self, widget: &Widget, decoder: &ParamDecoder<'_>) -> Vec<Event> {
        let mut events = Vec::new();
        let changed = decoder
            .valid_int(SELECTED_ITEM)
            .is_some_and(|index| normalize_index(index, items(widget)) != selection_index(widget));
        if changed || decoder.is_event_source(EVENT_WIDGET_SELECTED) {
            events.push(Event::new(widget.id().clone(), EventKind::Selection));
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
        let selected = decoder.read_int(SELECTED_ITEM, &mut errors);
        if let (Some(index), Some(widget)) = (selected, tree.get_mut(id)) {
            let index = normalize_index(index, items(widget));
            widget.set(SELECTION, index);
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

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::lifecycle::{AdapterRegistry, LifeCycle};
    use crate::protocol::{Operation, RequestParams};
    use crate::widget::{Display, VariantTag, WidgetSpec};

    fn setup() -> (LifeCycle, Display, WidgetId) {
        let lifecycle = LifeCycle::new(Arc::new(AdapterRegistry::builtin()));
        let mut display = Display::new("d1");
        let shell = display.create(None, WidgetSpec::new(VariantTag::SHELL)).unwrap();
        let list = display
            .create(Some(&shell), WidgetSpec::new(VariantTag::LIST))
            .unwrap();
        display
            .tree_mut()
            .require_mut(&list)
            .unwrap()
            .set(ITEMS, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        lifecycle.execute(&mut display, &RequestParams::new()).unwrap();
        (lifecycle, display, list)
    }

    #[test]
    fn out_of_range_selection_clamps() {
        let (lifecycle, mut display, list) = setup();
        let params = RequestParams::new().with(format!("{list}.selectedItem"), "7");
        lifecycle.execute(&mut display, &params).unwrap();
        assert_eq!(display.tree().get(&list).unwrap().get_int(SELECTION), Some(-1));

        let params = RequestParams::new().with(format!("{list}.selectedItem"), "2");
        lifecycle.execute(&mut display, &params).unwrap();
        assert_eq!(display.tree().get(&list).unwrap().get_int(SELECTION), Some(2));

        let params = RequestParams::new().with(format!("{list}.selectedItem"), "-3");
        lifecycle.execute(&mut display, &params).unwrap();
        assert_eq!(display.tree().get(&list).unwrap().get_int(SELECTION), Some(-1));
    }

    #[test]
    fn widget_selected_fires_single_event() {
        let (lifecycle, mut display, list) = setup();
        let params = RequestParams::new()
            .with(format!("{list}.selectedItem"), "1")
            .with(EVENT_WIDGET_SELECTED, list.as_str());
        let outcome = lifecycle.execute(&mut display, &params).unwrap();
        assert_eq!(outcome.report.events_queued, 1);
    }

    #[test]
    fn default_selection_event() {
        let (lifecycle, mut display, list) = setup();
        let params = RequestParams::new().with(EVENT_WIDGET_DEFAULT_SELECTED, list.as_str());
        let outcome = lifecycle.execute(&mut display, &params).unwrap();
        assert_eq!(outcome.report.events_queued, 1);
        assert!(outcome.message.is_empty());
    }

    #[test]
    fn replacing_items_resends_selection() {
        let (lifecycle, mut display, list) = setup();
        let params = RequestParams::new().with(format!("{list}.selectedItem"), "1");
        lifecycle.execute(&mut display, &params).unwrap();

        let outcome = lifecycle
            .execute_with(&mut display, &RequestParams::new(), |display| {
                display
                    .tree_mut()
                    .require_mut(&list)
                    .unwrap()
                    .set(ITEMS, vec!["x".to_string(), "y".to_string()]);
            })
            .unwrap();

        let ops: Vec<_> = outcome.message.operations_for(&list).collect();
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], Operation::Set { property, .. } if property == ITEMS));
        assert!(matches!(
            ops[1],
            Operation::Set { property, value, .. } if property == SELECTION && *value == Value::Int(1)
        ));
    }

    #[test]
    fn malformed_index_is_reported() {
        let (lifecycle, mut display, list) = setup();
        let params = RequestParams::new().with(format!("{list}.selectedItem"), "one");
        let outcome = lifecycle.execute(&mut display, &params).unwrap();
        assert_eq!(outcome.report.decoding_errors.len(), 1);
        assert_eq!(outcome.report.decoding_errors[0].0, list);
        assert!(outcome.message.is_empty());
    }
}
