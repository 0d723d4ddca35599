use super::control::control_properties;
use crate::lifecycle::{LifeCycleAdapter, PropertyDef};

/// Container for tool items.
#[derive(Debug)]
pub struct ToolBarAdapter {
    properties: Vec<PropertyDef>,
}

impl ToolBarAdapter {
    pub fn new() -> Self {
        Self {
            properties: control_properties(),
        }
    }
}

impl Default for ToolBarAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LifeCycleAdapter for ToolBarAdapter {
    fn widget_type(&self) -> &str {
        "toolBar"
    }

    fn properties(&self) -> &[PropertyDef] {
        &self.properties
    }
}
