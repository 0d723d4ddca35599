use super::props::{ACTIVE, TEXT};
use crate::lifecycle::{LifeCycleAdapter, PropertyDef};

/// Top-level window. Carries a title and an active flag; reads nothing.
#[derive(Debug)]
pub struct ShellAdapter {
    properties: Vec<PropertyDef>,
}

impl ShellAdapter {
    pub fn new() -> Self {
        Self {
            properties: vec![PropertyDef::new(TEXT, ""), PropertyDef::new(ACTIVE, false)],
        }
    }
}

impl Default for ShellAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LifeCycleAdapter for ShellAdapter {
    fn widget_type(&self) -> &str {
        "shell"
    }

    fn properties(&self) -> &[PropertyDef] {
        &self.properties
    }
}
