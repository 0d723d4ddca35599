//! Demo application served by the binary.
//!
//! A shell holding a list, an editable combo and a tool bar with check and
//! radio items. Every listener writes what happened into the shell title.

use crate::adapters::props::{ITEMS, TEXT};
use crate::adapters::style::{CHECK, RADIO, SEPARATOR};
use crate::lifecycle::ListenerError;
use crate::widget::{Display, Event, EventKind, TreeError, VariantTag, WidgetId, WidgetSpec, WidgetTree};

pub const TITLE: &str = "Remote UI demo";

/// Build the demo UI into an empty display.
pub fn build(display: &mut Display) -> Result<(), TreeError> {
    let shell = display.create(None, WidgetSpec::new(VariantTag::SHELL))?;
    display.tree_mut().require_mut(&shell)?.set(TEXT, TITLE);

    let list = display.create(Some(&shell), WidgetSpec::new(VariantTag::LIST))?;
    display
        .tree_mut()
        .require_mut(&list)?
        .set(ITEMS, strings(&["alpha", "beta", "gamma"]));

    let combo = display.create(Some(&shell), WidgetSpec::new(VariantTag::COMBO))?;
    display
        .tree_mut()
        .require_mut(&combo)?
        .set(ITEMS, strings(&["red", "green", "blue"]));

    let bar = display.create(Some(&shell), WidgetSpec::new(VariantTag::TOOL_BAR))?;
    let bold = tool_item(display, &bar, CHECK, "Bold")?;
    tool_item(display, &bar, SEPARATOR, "")?;
    let left = tool_item(display, &bar, RADIO, "Left")?;
    let right = tool_item(display, &bar, RADIO, "Right")?;

    for source in [&list, &combo] {
        let title = shell.clone();
        display.add_listener(
            source,
            EventKind::Selection,
            move |event: &Event, tree: &mut WidgetTree| -> Result<(), ListenerError> {
                let selected = describe_selection(tree, &event.source);
                set_title(tree, &title, &format!("Selected {selected}"))
            },
        );
    }

    let title = shell.clone();
    display.add_listener(
        &combo,
        EventKind::Modify,
        move |event: &Event, tree: &mut WidgetTree| -> Result<(), ListenerError> {
            let text = tree
                .require(&event.source)
                .map_err(|e| ListenerError::failed(e.to_string()))?
                .get_str(TEXT)
                .unwrap_or("")
                .to_string();
            set_title(tree, &title, &format!("Typed {text}"))
        },
    );

    for item in [bold, left, right] {
        let title = shell.clone();
        display.add_listener(
            &item,
            EventKind::Selection,
            move |event: &Event, tree: &mut WidgetTree| -> Result<(), ListenerError> {
                let widget = tree
                    .require(&event.source)
                    .map_err(|e| ListenerError::failed(e.to_string()))?;
                let label = widget.get_str(TEXT).unwrap_or("").to_string();
                let state = if widget.get_bool("selection").unwrap_or(false) {
                    "on"
                } else {
                    "off"
                };
                set_title(tree, &title, &format!("{label} {state}"))
            },
        );
    }

    let widgets = display.tree().len();
    tracing::debug!(widgets, "Demo UI built");
    Ok(())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn tool_item(
    display: &mut Display,
    bar: &WidgetId,
    style: &str,
    text: &str,
) -> Result<WidgetId, TreeError> {
    let item = display.create(Some(bar), WidgetSpec::new(VariantTag::TOOL_ITEM).with_style(style))?;
    if !text.is_empty() {
        display.tree_mut().require_mut(&item)?.set(TEXT, text);
    }
    Ok(item)
}

fn describe_selection(tree: &WidgetTree, id: &WidgetId) -> String {
    let Some(widget) = tree.get(id) else {
        return "nothing".to_string();
    };
    let index = widget.get_int("selection").unwrap_or(-1);
    widget
        .get_strings(ITEMS)
        .and_then(|items| usize::try_from(index).ok().and_then(|i| items.get(i)))
        .cloned()
        .unwrap_or_else(|| "nothing".to_string())
}

fn set_title(tree: &mut WidgetTree, shell: &WidgetId, title: &str) -> Result<(), ListenerError> {
    tree.require_mut(shell)
        .map_err(|e| ListenerError::failed(e.to_string()))?
        .set(TEXT, title);
    Ok(())
}
