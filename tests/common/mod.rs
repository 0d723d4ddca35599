//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::path::PathBuf;
use std::sync::Arc;

use remote_ui::lifecycle::{AdapterRegistry, LifeCycle, ListenerError};
use remote_ui::protocol::{Message, Operation, RequestParams};
use remote_ui::widget::{Display, Event, Value, VariantTag, WidgetId, WidgetSpec, WidgetTree};
use tempfile::TempDir;

/// Life-cycle over the built-in adapters.
pub fn lifecycle() -> LifeCycle {
    LifeCycle::new(Arc::new(AdapterRegistry::builtin()))
}

/// Display with one already-rendered shell. Returns the shell id.
pub fn display_with_shell(lifecycle: &LifeCycle) -> (Display, WidgetId) {
    let mut display = Display::new("d1");
    let shell = display
        .create(None, WidgetSpec::new(VariantTag::SHELL))
        .expect("Failed to create shell");
    lifecycle
        .execute(&mut display, &RequestParams::new())
        .expect("Initial cycle failed");
    (display, shell)
}

/// Create a widget and set its properties.
pub fn create(
    display: &mut Display,
    parent: &WidgetId,
    variant: VariantTag,
    properties: &[(&str, Value)],
) -> WidgetId {
    let id = display
        .create(Some(parent), WidgetSpec::new(variant))
        .expect("Failed to create widget");
    let widget = display.tree_mut().require_mut(&id).unwrap();
    for (name, value) in properties {
        widget.set(*name, value.clone());
    }
    id
}

pub fn strings(items: &[&str]) -> Value {
    Value::Strings(items.iter().map(|s| s.to_string()).collect())
}

pub fn field(id: &WidgetId, name: &str) -> String {
    format!("{}.{}", id, name)
}

/// `(action, target)` pairs of a message, for order assertions.
pub fn actions(message: &Message) -> Vec<(&'static str, String)> {
    message
        .operations()
        .iter()
        .map(|op| (op.action(), op.target().to_string()))
        .collect()
}

pub fn set_op(target: &WidgetId, property: &str, value: impl Into<Value>) -> Operation {
    Operation::Set {
        target: target.clone(),
        property: property.to_string(),
        value: value.into(),
    }
}

/// Listener that does nothing.
pub fn noop(_: &Event, _: &mut WidgetTree) -> Result<(), ListenerError> {
    Ok(())
}

/// Create a temporary config file with the given content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
