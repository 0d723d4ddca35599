//! The life-cycle adapter core.
//!
//! # Architecture
//!
//! ```text
//! RequestParams ──→ ParamDecoder ──→ adapter.read_data / enqueue_events
//!                                           │
//!                                      EventQueue ──→ listeners
//!                                           │
//! PropertyStore (snapshot) ──→ adapter.render_changes ──→ MessageBuilder ──→ Message
//! ```
//!
//! Adapters are looked up by variant tag in the [`AdapterRegistry`]; the
//! [`LifeCycle`] orchestrator sequences the phases.

mod adapter;
mod cycle;
mod dispatcher;
mod error;
mod registry;
mod store;

pub use adapter::{
    render_create, render_listener_changes, render_property_changes,
    render_property_changes_forcing, LifeCycleAdapter,
    PropertyDef, RenderContext, SET_HTML_ID,
};
pub use cycle::{CycleOutcome, CycleReport, LifeCycle};
pub use dispatcher::{DispatchReport, EventQueue};
pub use error::{
    CycleError, DecodingError, ListenerError, ListenerFailure, ProtocolError, RegistryError,
    UnknownVariantError,
};
pub use registry::{AdapterRegistry, AdapterRegistryBuilder};
pub use store::PropertyStore;
