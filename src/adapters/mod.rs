//! Built-in life-cycle adapters.
//!
//! Adding a variant: implement [`LifeCycleAdapter`](crate::lifecycle::LifeCycleAdapter)
//! and register it under its tag in the
//! [`AdapterRegistry`](crate::lifecycle::AdapterRegistry).

mod combo;
mod control;
mod list;
mod shell;
mod tool_bar;
mod tool_item;

pub use combo::{ComboAdapter, UNLIMITED_TEXT};
pub use control::control_properties;
pub use list::ListAdapter;
pub use shell::ShellAdapter;
pub use tool_bar::ToolBarAdapter;
pub use tool_item::{ToolItemAdapter, ToolItemKind};

/// Style flags understood by the built-in adapters.
pub mod style {
    pub const PUSH: &str = "PUSH";
    pub const CHECK: &str = "CHECK";
    pub const RADIO: &str = "RADIO";
    pub const DROP_DOWN: &str = "DROP_DOWN";
    pub const SEPARATOR: &str = "SEPARATOR";
    pub const READ_ONLY: &str = "READ_ONLY";
}

/// Property names shared across adapters.
pub mod props {
    pub const TEXT: &str = "text";
    pub const ITEMS: &str = "items";
    pub const SELECTION: &str = "selection";
    pub const ENABLED: &str = "enabled";
    pub const VISIBLE: &str = "visible";
    pub const TOOL_TIP: &str = "toolTip";
    pub const ACTIVE: &str = "active";
    pub const TEXT_LIMIT: &str = "textLimit";
    pub const LIST_VISIBLE: &str = "listVisible";
    pub const EDITABLE: &str = "editable";
    pub const TEXT_SELECTION: &str = "textSelection";
}

/// Inbound field names.
pub mod fields {
    pub const SELECTED_ITEM: &str = "selectedItem";
    pub const SELECTION: &str = "selection";
    pub const SELECTION_START: &str = "selectionStart";
    pub const SELECTION_LENGTH: &str = "selectionLength";
}
