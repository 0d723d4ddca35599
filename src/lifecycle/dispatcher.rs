//! Process-action phase: deliver queued events to listeners.
//!
//! Events are collected while every widget is read and only delivered
//! afterwards, so a listener always sees the fully updated tree. A failing
//! or panicking listener is reported and does not stop the others.

use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};

use super::error::{ListenerError, ListenerFailure};
use crate::widget::{Event, ListenerRegistry, WidgetTree};

/// FIFO queue of events produced during the read phase.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

/// Outcome of draining the queue.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Listener invocations that completed without error.
    pub delivered: usize,
    /// Events dropped because their source no longer exists.
    pub stale: usize,
    pub failures: Vec<ListenerFailure>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Deliver every queued event exactly once, in creation order.
    pub fn dispatch(mut self, tree: &mut WidgetTree, listeners: &ListenerRegistry) -> DispatchReport {
        let mut report = DispatchReport::default();

        while let Some(event) = self.events.pop_front() {
            if !tree.contains(&event.source) {
                tracing::debug!(
                    source = %event.source,
                    kind = %event.kind,
                    "Dropping event of destroyed widget"
                );
                report.stale += 1;
                continue;
            }

            for listener in listeners.listeners_for(&event.source, event.kind) {
                let outcome = catch_unwind(AssertUnwindSafe(|| listener.handle_event(&event, tree)));
                let error = match outcome {
                    Ok(Ok(())) => {
                        report.delivered += 1;
                        continue;
                    }
                    Ok(Err(error)) => error,
                    Err(panic) => ListenerError::Panicked(panic_message(panic.as_ref())),
                };
                tracing::warn!(
                    source = %event.source,
                    kind = %event.kind,
                    error = %error,
                    "Listener failed"
                );
                report.failures.push(ListenerFailure {
                    source: event.source.clone(),
                    kind: event.kind,
                    error,
                });
            }
        }

        report
    }
}

impl Extend<Event> for EventQueue {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
