//! Reserved request parameter keys.

/// Id of the display the request is addressed to.
pub const UI_ROOT: &str = "uiRoot";

/// Id of the widget that fired a selection.
pub const EVENT_WIDGET_SELECTED: &str = "widgetSelected";

/// Id of the widget that fired a default selection (e.g. Enter, double click).
pub const EVENT_WIDGET_DEFAULT_SELECTED: &str = "widgetDefaultSelected";

/// Id of the widget whose text was modified.
pub const EVENT_MODIFY_TEXT: &str = "modifyText";

/// Separator between widget id and field name in scoped keys.
pub const FIELD_SEPARATOR: char = '.';
