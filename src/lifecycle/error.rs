//! Error taxonomy of the life-cycle core.
//!
//! Field- and widget-scoped errors ([`DecodingError`], [`UnknownVariantError`],
//! [`ListenerError`]) are isolated and reported. [`CycleError`] aborts the
//! cycle and no message is delivered.

use thiserror::Error;

use crate::widget::{EventKind, VariantTag, WidgetId};

/// Malformed inbound value. Scoped to one field of one widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodingError {
    #[error("Parameter '{key}' is not an integer: '{value}'")]
    InvalidInt { key: String, value: String },

    #[error("Parameter '{key}' is not a boolean: '{value}'")]
    InvalidBool { key: String, value: String },
}

impl DecodingError {
    /// The offending parameter key.
    pub fn key(&self) -> &str {
        match self {
            DecodingError::InvalidInt { key, .. } | DecodingError::InvalidBool { key, .. } => key,
        }
    }
}

/// No adapter is registered for a widget's variant tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No life-cycle adapter registered for variant '{variant}' (widget '{widget}')")]
pub struct UnknownVariantError {
    pub widget: WidgetId,
    pub variant: VariantTag,
}

/// Misuse of the message builder or a broken render invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Message already finalized")]
    AlreadyFinalized,

    #[error("Operation targets '{0}' which is not known to the client")]
    UnknownTarget(WidgetId),

    #[error("Operation targets '{0}' after it was destroyed")]
    TargetDestroyed(WidgetId),

    #[error("Widget '{0}' created twice")]
    DuplicateCreate(WidgetId),
}

/// Failure raised by a listener during event dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListenerError {
    #[error("Listener failed: {0}")]
    Failed(String),

    #[error("Listener panicked: {0}")]
    Panicked(String),
}

impl ListenerError {
    pub fn failed(message: impl Into<String>) -> Self {
        ListenerError::Failed(message.into())
    }
}

/// A listener failure together with the event it was handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    pub source: WidgetId,
    pub kind: EventKind,
    pub error: ListenerError,
}

/// Setup-time registry misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("An adapter for variant '{0}' is already registered")]
    Duplicate(VariantTag),
}

/// Cycle-fatal failures. The cycle produces no message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("Request addressed display '{requested}' but this session renders '{actual}'")]
    DisplayMismatch { requested: String, actual: String },

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}
