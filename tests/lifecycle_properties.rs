mod common;

use std::sync::Arc;

use common::{actions, create, display_with_shell, field, lifecycle, noop, set_op, strings};
use parking_lot::Mutex;
use remote_ui::adapters::style::READ_ONLY;
use remote_ui::lifecycle::{AdapterRegistry, LifeCycle, ListenerError};
use remote_ui::protocol::keys::EVENT_WIDGET_SELECTED;
use remote_ui::protocol::{Operation, RequestParams};
use remote_ui::widget::{Event, EventKind, Value, VariantTag, WidgetSpec, WidgetTree};

/// Test that a listener sees the post-read state of sibling widgets.
#[test]
fn test_listener_observes_sibling_read_in_same_request() {
    let lifecycle = lifecycle();
    let (mut display, shell) = display_with_shell(&lifecycle);
    let a = create(&mut display, &shell, VariantTag::LIST, &[("items", strings(&["x", "y"]))]);
    let b = create(&mut display, &shell, VariantTag::LIST, &[("items", strings(&["x", "y"]))]);
    lifecycle.execute(&mut display, &RequestParams::new()).unwrap();

    let observed = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&observed);
    let sibling = b.clone();
    display.add_listener(
        &a,
        EventKind::Selection,
        move |_: &Event, tree: &mut WidgetTree| -> Result<(), ListenerError> {
            *sink.lock() = tree.get(&sibling).and_then(|w| w.get_int("selection"));
            Ok(())
        },
    );

    let params = RequestParams::new()
        .with(field(&a, "selectedItem"), "0")
        .with(field(&b, "selectedItem"), "1");
    lifecycle.execute(&mut display, &params).unwrap();

    assert_eq!(*observed.lock(), Some(1));
}

/// Test that listener mutations are rendered in the same cycle.
#[test]
fn test_listener_mutation_is_rendered() {
    let lifecycle = lifecycle();
    let (mut display, shell) = display_with_shell(&lifecycle);
    let list = create(&mut display, &shell, VariantTag::LIST, &[("items", strings(&["x"]))]);
    let title = shell.clone();
    display.add_listener(
        &list,
        EventKind::Selection,
        move |_: &Event, tree: &mut WidgetTree| -> Result<(), ListenerError> {
            tree.require_mut(&title)
                .map_err(|e| ListenerError::failed(e.to_string()))?
                .set("text", "clicked");
            Ok(())
        },
    );
    lifecycle.execute(&mut display, &RequestParams::new()).unwrap();

    let params = RequestParams::new().with(EVENT_WIDGET_SELECTED, list.as_str());
    let outcome = lifecycle.execute(&mut display, &params).unwrap();
    assert_eq!(outcome.message.operations(), &[set_op(&shell, "text", "clicked")]);
}

/// Test that reading the same parameters twice yields the same state.
#[test]
fn test_read_data_is_idempotent() {
    let registry = AdapterRegistry::builtin();
    let lifecycle = LifeCycle::new(Arc::new(AdapterRegistry::builtin()));
    let (mut display, shell) = display_with_shell(&lifecycle);
    let combo = create(
        &mut display,
        &shell,
        VariantTag::COMBO,
        &[("items", strings(&["one", "two", "three"]))],
    );

    let params = RequestParams::new()
        .with(field(&combo, "listVisible"), "true")
        .with(field(&combo, "selectedItem"), "2")
        .with(field(&combo, "selectionStart"), "1")
        .with(field(&combo, "selectionLength"), "3");
    let decoder = params.scoped(&combo);

    let names = ["selection", "text", "listVisible", "textSelection"];
    let state = |tree: &WidgetTree| -> Vec<Option<Value>> {
        let widget = tree.get(&combo).unwrap();
        names.iter().map(|name| widget.get(name).cloned()).collect()
    };

    let adapter = registry.resolve(display.tree().get(&combo).unwrap()).unwrap();
    assert!(adapter.read_data(&combo, display.tree_mut(), &decoder).is_empty());
    let once = state(display.tree());
    assert!(adapter.read_data(&combo, display.tree_mut(), &decoder).is_empty());
    let twice = state(display.tree());

    assert_eq!(once, twice);
    assert_eq!(once[1], Some(Value::from("three")));
    assert_eq!(once[3], Some(Value::Range(1, 4)));
}

/// Test that unchanged properties never produce set operations.
#[test]
fn test_diff_is_minimal() {
    let lifecycle = lifecycle();
    let (mut display, shell) = display_with_shell(&lifecycle);
    let combo = create(&mut display, &shell, VariantTag::COMBO, &[("items", strings(&["a"]))]);
    lifecycle.execute(&mut display, &RequestParams::new()).unwrap();

    // Nothing changed.
    let outcome = lifecycle.execute(&mut display, &RequestParams::new()).unwrap();
    assert!(outcome.message.is_empty());

    // Rewritten with the same value.
    let outcome = lifecycle
        .execute_with(&mut display, &RequestParams::new(), |display| {
            display.tree_mut().require_mut(&combo).unwrap().set("items", strings(&["a"]));
        })
        .unwrap();
    assert!(outcome.message.is_empty());

    // Changed and reverted within the cycle.
    let outcome = lifecycle
        .execute_with(&mut display, &RequestParams::new(), |display| {
            let widget = display.tree_mut().require_mut(&combo).unwrap();
            widget.set("enabled", false);
            widget.set("enabled", true);
        })
        .unwrap();
    assert!(outcome.message.is_empty());

    // One real change, one operation.
    let outcome = lifecycle
        .execute_with(&mut display, &RequestParams::new(), |display| {
            display.tree_mut().require_mut(&combo).unwrap().set("toolTip", "hint");
        })
        .unwrap();
    assert_eq!(outcome.message.operations(), &[set_op(&combo, "toolTip", "hint")]);
}

/// Test that a new widget's create carries every non-default property
/// in declared order and no separate set operations.
#[test]
fn test_first_render_is_complete() {
    let lifecycle = lifecycle();
    let (mut display, shell) = display_with_shell(&lifecycle);
    let combo = display
        .create(Some(&shell), WidgetSpec::new(VariantTag::COMBO).with_style(READ_ONLY))
        .unwrap();
    {
        let widget = display.tree_mut().require_mut(&combo).unwrap();
        widget.set("enabled", false);
        widget.set("text", "b");
        widget.set("items", strings(&["a", "b"]));
        widget.set("editable", true);
        widget.set("visible", true);
    }
    let outcome = lifecycle.execute(&mut display, &RequestParams::new()).unwrap();

    assert_eq!(outcome.message.operations().len(), 1);
    let Some(Operation::Create { properties, .. }) = outcome.message.find_create(&combo) else {
        panic!("combo not created");
    };
    let names: Vec<_> = properties.names().collect();
    assert_eq!(names, vec!["style", "items", "text", "editable", "enabled"]);
}

/// Test that create precedes every other operation for the same widget,
/// and parents are created before children.
#[test]
fn test_create_precedes_dependent_operations() {
    let lifecycle = lifecycle().with_ui_tests(true);
    let mut display = remote_ui::widget::Display::new("d1");
    let shell = display.create(None, WidgetSpec::new(VariantTag::SHELL)).unwrap();
    let bar = display.create(Some(&shell), WidgetSpec::new(VariantTag::TOOL_BAR)).unwrap();
    let item = display
        .create(Some(&bar), WidgetSpec::new(VariantTag::TOOL_ITEM).with_id("save"))
        .unwrap();
    display.add_listener(&item, EventKind::Selection, noop);

    let outcome = lifecycle.execute(&mut display, &RequestParams::new()).unwrap();
    let actions = actions(&outcome.message);
    assert_eq!(
        actions,
        vec![
            ("create", shell.to_string()),
            ("call", shell.to_string()),
            ("create", bar.to_string()),
            ("call", bar.to_string()),
            ("create", "save".to_string()),
            ("listen", "save".to_string()),
            ("call", "save".to_string()),
        ]
    );
    assert!(outcome.message.operations().contains(&Operation::Call {
        target: item.clone(),
        method: "setHtmlId".to_string(),
        args: vec![Value::from("save")],
    }));
}

/// Test that destroyed widgets emit destroy first and lose their listeners.
#[test]
fn test_destroy_is_rendered_first() {
    let lifecycle = lifecycle();
    let (mut display, shell) = display_with_shell(&lifecycle);
    let list = create(&mut display, &shell, VariantTag::LIST, &[]);
    display.add_listener(&list, EventKind::Selection, noop);
    lifecycle.execute(&mut display, &RequestParams::new()).unwrap();

    let outcome = lifecycle
        .execute_with(&mut display, &RequestParams::new(), |display| {
            display.destroy(&list).unwrap();
            display.tree_mut().require_mut(&shell).unwrap().set("text", "gone");
        })
        .unwrap();

    assert_eq!(
        actions(&outcome.message),
        vec![("destroy", list.to_string()), ("set", shell.to_string())]
    );
    assert!(!display.listeners().has_listeners(&list, EventKind::Selection));
}

/// Test that a widget created and destroyed before rendering is never sent.
#[test]
fn test_unrendered_widget_destroy_is_silent() {
    let lifecycle = lifecycle();
    let (mut display, shell) = display_with_shell(&lifecycle);
    let outcome = lifecycle
        .execute_with(&mut display, &RequestParams::new(), |display| {
            let list = display
                .create(Some(&shell), WidgetSpec::new(VariantTag::LIST))
                .unwrap();
            display.destroy(&list).unwrap();
        })
        .unwrap();
    assert!(outcome.message.is_empty());
}

/// Test that adding and removing listeners toggles listen operations.
#[test]
fn test_listener_presence_is_synchronized() {
    let lifecycle = lifecycle();
    let (mut display, shell) = display_with_shell(&lifecycle);
    let list = create(&mut display, &shell, VariantTag::LIST, &[]);
    lifecycle.execute(&mut display, &RequestParams::new()).unwrap();

    let handle = display.add_listener(&list, EventKind::DefaultSelection, noop);
    let outcome = lifecycle.execute(&mut display, &RequestParams::new()).unwrap();
    assert_eq!(
        outcome.message.operations(),
        &[Operation::Listen {
            target: list.clone(),
            event: EventKind::DefaultSelection,
            enabled: true,
        }]
    );

    display
        .listeners_mut()
        .remove(&list, EventKind::DefaultSelection, handle);
    let outcome = lifecycle.execute(&mut display, &RequestParams::new()).unwrap();
    assert_eq!(
        outcome.message.operations(),
        &[Operation::Listen {
            target: list.clone(),
            event: EventKind::DefaultSelection,
            enabled: false,
        }]
    );
}

/// Test that a widget without adapter is skipped with its subtree while
/// siblings still render.
#[test]
fn test_unknown_variant_skips_subtree() {
    let lifecycle = lifecycle();
    let (mut display, shell) = display_with_shell(&lifecycle);
    let label = display
        .create(Some(&shell), WidgetSpec::new(VariantTag::new("label")))
        .unwrap();
    let nested = create(&mut display, &label, VariantTag::LIST, &[]);
    let sibling = create(&mut display, &shell, VariantTag::LIST, &[]);

    let outcome = lifecycle.execute(&mut display, &RequestParams::new()).unwrap();

    assert_eq!(outcome.report.unknown_variants.len(), 1);
    assert_eq!(outcome.report.unknown_variants[0].widget, label);
    assert_eq!(outcome.message.operations_for(&label).count(), 0);
    assert_eq!(outcome.message.operations_for(&nested).count(), 0);
    assert!(outcome.message.find_create(&sibling).is_some());
    assert!(!display.tree().get(&label).unwrap().is_initialized());

    // Fields of the skipped subtree are not read either.
    let params = RequestParams::new()
        .with(field(&nested, "selectedItem"), "x")
        .with(field(&sibling, "selectedItem"), "x");
    let outcome = lifecycle.execute(&mut display, &params).unwrap();
    assert_eq!(outcome.report.decoding_errors.len(), 1);
    assert_eq!(outcome.report.decoding_errors[0].0, sibling);
}

/// Test that failing and panicking listeners neither stop other listeners
/// nor rendering.
#[test]
fn test_listener_failures_are_isolated() {
    let lifecycle = lifecycle();
    let (mut display, shell) = display_with_shell(&lifecycle);
    let list = create(&mut display, &shell, VariantTag::LIST, &[("items", strings(&["a", "b"]))]);
    display.add_listener(
        &list,
        EventKind::Selection,
        |_: &Event, _: &mut WidgetTree| -> Result<(), ListenerError> {
            Err(ListenerError::failed("rejected"))
        },
    );
    display.add_listener(
        &list,
        EventKind::Selection,
        |_: &Event, _: &mut WidgetTree| -> Result<(), ListenerError> {
            panic!("listener bug");
        },
    );
    let title = shell.clone();
    display.add_listener(
        &list,
        EventKind::Selection,
        move |_: &Event, tree: &mut WidgetTree| -> Result<(), ListenerError> {
            tree.require_mut(&title)
                .map_err(|e| ListenerError::failed(e.to_string()))?
                .set("text", "still ran");
            Ok(())
        },
    );
    lifecycle.execute(&mut display, &RequestParams::new()).unwrap();

    let params = RequestParams::new().with(field(&list, "selectedItem"), "1");
    let outcome = lifecycle.execute(&mut display, &params).unwrap();

    assert_eq!(outcome.report.listener_failures.len(), 2);
    assert_eq!(
        outcome.report.listener_failures[0].error,
        ListenerError::failed("rejected")
    );
    assert_eq!(
        outcome.report.listener_failures[1].error,
        ListenerError::Panicked("listener bug".to_string())
    );
    assert_eq!(outcome.report.listeners_invoked, 1);
    assert_eq!(
        outcome.message.operations(),
        &[
            set_op(&shell, "text", "still ran"),
            set_op(&list, "selection", 1i64),
        ]
    );
}

/// Test that a malformed field only affects its own widget.
#[test]
fn test_decoding_error_is_scoped_to_widget() {
    let lifecycle = lifecycle();
    let (mut display, shell) = display_with_shell(&lifecycle);
    let broken = create(&mut display, &shell, VariantTag::LIST, &[("items", strings(&["a"]))]);
    let healthy = create(&mut display, &shell, VariantTag::LIST, &[("items", strings(&["a"]))]);
    lifecycle.execute(&mut display, &RequestParams::new()).unwrap();

    let params = RequestParams::new()
        .with(field(&broken, "selectedItem"), "NaN")
        .with(field(&healthy, "selectedItem"), "0");
    let outcome = lifecycle.execute(&mut display, &params).unwrap();

    assert_eq!(outcome.report.decoding_errors.len(), 1);
    assert_eq!(outcome.report.decoding_errors[0].0, broken);
    assert_eq!(outcome.report.decoding_errors[0].1.key(), format!("{broken}.selectedItem"));
    assert_eq!(outcome.message.operations(), &[set_op(&healthy, "selection", 0i64)]);
}

/// Test that events of widgets destroyed by an earlier listener are dropped
/// and counted.
#[test]
fn test_events_of_destroyed_widgets_are_dropped() {
    let lifecycle = lifecycle();
    let (mut display, shell) = display_with_shell(&lifecycle);
    let first = create(&mut display, &shell, VariantTag::LIST, &[]);
    let second = create(&mut display, &shell, VariantTag::LIST, &[("items", strings(&["a"]))]);
    let victim = second.clone();
    display.add_listener(
        &first,
        EventKind::Selection,
        move |_: &Event, tree: &mut WidgetTree| -> Result<(), ListenerError> {
            tree.destroy(&victim)
                .map_err(|e| ListenerError::failed(e.to_string()))?;
            Ok(())
        },
    );
    display.add_listener(&second, EventKind::Selection, noop);
    lifecycle.execute(&mut display, &RequestParams::new()).unwrap();

    let params = RequestParams::new()
        .with(EVENT_WIDGET_SELECTED, first.as_str())
        .with(field(&second, "selectedItem"), "0");
    let outcome = lifecycle.execute(&mut display, &params).unwrap();

    assert_eq!(outcome.report.events_queued, 2);
    assert_eq!(outcome.report.listeners_invoked, 1);
    assert_eq!(outcome.report.events_dropped, 1);
    assert_eq!(actions(&outcome.message), vec![("destroy", second.to_string())]);
}
