//! Widget model consumed by the life-cycle core.
//!
//! The tree, its property primitives and the listener registry are the
//! collaborators the adapters read from and write to. Nothing here knows
//! about the wire protocol.

mod display;
mod event;
mod id;
mod listener;
mod tree;
mod value;
mod variant;

pub use display::Display;
pub use event::{Event, EventKind};
pub use id::{is_valid_id, WidgetId};
pub use listener::{Listener, ListenerHandle, ListenerRegistry};
pub use tree::{TreeError, Widget, WidgetSpec, WidgetTree};
pub use value::Value;
pub use variant::VariantTag;
