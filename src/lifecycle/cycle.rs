//! Drives one request/response cycle over a whole display.
//!
//! ```text
//! validate → prepare → read → process action → render → preserve
//! ```
//!
//! Each phase finishes for the entire tree before the next one starts.
//! Rendering diffs against the values preserved after the previous
//! delivered message, so changes made between cycles are sent too.

use std::collections::HashSet;
use std::sync::Arc;

use super::adapter::RenderContext;
use super::dispatcher::EventQueue;
use super::error::{CycleError, DecodingError, ListenerFailure, UnknownVariantError};
use super::registry::AdapterRegistry;
use super::store::PropertyStore;
use crate::protocol::{Message, MessageBuilder, MessageHead, RequestParams};
use crate::widget::{Display, ListenerRegistry, WidgetId, WidgetTree};

/// Isolated failures and counters collected during a cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub decoding_errors: Vec<(WidgetId, DecodingError)>,
    pub unknown_variants: Vec<UnknownVariantError>,
    pub listener_failures: Vec<ListenerFailure>,
    pub events_queued: usize,
    pub listeners_invoked: usize,
    /// Events whose source was destroyed before they were delivered.
    pub events_dropped: usize,
}

impl CycleReport {
    pub fn is_clean(&self) -> bool {
        self.decoding_errors.is_empty()
            && self.unknown_variants.is_empty()
            && self.listener_failures.is_empty()
    }
}

/// A delivered message together with what went wrong along the way.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub message: Message,
    pub report: CycleReport,
}

/// The life-cycle orchestrator. Stateless apart from its shared registry,
/// so one instance serves every session.
#[derive(Debug, Clone)]
pub struct LifeCycle {
    registry: Arc<AdapterRegistry>,
    ui_tests: bool,
}

impl LifeCycle {
    pub fn new(registry: Arc<AdapterRegistry>) -> Self {
        Self {
            registry,
            ui_tests: false,
        }
    }

    /// Emit `setHtmlId` calls so UI tests can address widgets by id.
    pub fn with_ui_tests(mut self, enabled: bool) -> Self {
        self.ui_tests = enabled;
        self
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    pub fn execute(
        &self,
        display: &mut Display,
        params: &RequestParams,
    ) -> Result<CycleOutcome, CycleError> {
        self.execute_with(display, params, |_| {})
    }

    /// Run a cycle, calling `prepare` before the read phase. Application
    /// code that builds or changes the UI for this request belongs there.
    pub fn execute_with<F>(
        &self,
        display: &mut Display,
        params: &RequestParams,
        prepare: F,
    ) -> Result<CycleOutcome, CycleError>
    where
        F: FnOnce(&mut Display),
    {
        if let Some(requested) = params.ui_root() {
            if requested != display.id() {
                return Err(CycleError::DisplayMismatch {
                    requested: requested.to_string(),
                    actual: display.id().to_string(),
                });
            }
        }

        let request_counter = display.next_request();
        let display_id = display.id().to_string();
        let span = tracing::debug_span!("cycle", display = %display_id, request = request_counter);
        let _enter = span.enter();

        let mut report = CycleReport::default();

        prepare(display);
        let queue = self.read(display, params, &mut report);
        report.events_queued = queue.len();

        let (tree, listeners) = display.parts_mut();
        let dispatch = queue.dispatch(tree, listeners);
        report.listeners_invoked = dispatch.delivered;
        report.events_dropped = dispatch.stale;
        report.listener_failures = dispatch.failures;

        let head = MessageHead {
            display: display_id,
            request_counter,
        };
        let store = display.take_rendered();
        let message = match self.render(display, &store, head, &mut report) {
            Ok(message) => message,
            Err(err) => {
                display.set_rendered(store);
                return Err(err);
            }
        };
        let preserved = self.preserve(display.tree(), display.listeners());
        display.set_rendered(preserved);

        tracing::debug!(
            operations = message.operations().len(),
            events = report.events_queued,
            clean = report.is_clean(),
            "Cycle complete"
        );
        Ok(CycleOutcome { message, report })
    }

    /// Depth-first ids whose own variant and every ancestor's variant have
    /// an adapter, plus the widgets that cut a subtree off.
    fn resolvable(&self, tree: &WidgetTree) -> (Vec<WidgetId>, Vec<UnknownVariantError>) {
        let mut ids = Vec::new();
        let mut unknown = Vec::new();
        let mut skipped: HashSet<WidgetId> = HashSet::new();
        for id in tree.depth_first() {
            let Some(widget) = tree.get(&id) else {
                continue;
            };
            if widget.parent().is_some_and(|parent| skipped.contains(parent)) {
                skipped.insert(id);
                continue;
            }
            match self.registry.resolve(widget) {
                Ok(_) => ids.push(id),
                Err(err) => {
                    unknown.push(err);
                    skipped.insert(id);
                }
            }
        }
        (ids, unknown)
    }

    /// Record what the client holds once the message is delivered.
    fn preserve(&self, tree: &WidgetTree, listeners: &ListenerRegistry) -> PropertyStore {
        let mut store = PropertyStore::new();
        let (ids, _) = self.resolvable(tree);
        for id in ids {
            let Some(widget) = tree.get(&id) else {
                continue;
            };
            if !widget.is_initialized() {
                continue;
            }
            if let Ok(adapter) = self.registry.resolve(widget) {
                adapter.preserve_values(widget, listeners, &mut store);
            }
        }
        store
    }

    /// Apply request fields to every widget and collect the events to fire.
    fn read(&self, display: &mut Display, params: &RequestParams, report: &mut CycleReport) -> EventQueue {
        let mut queue = EventQueue::new();
        let tree = display.tree_mut();
        let (ids, unknown) = self.resolvable(tree);
        for err in &unknown {
            tracing::debug!(error = %err, "Not reading widget subtree");
        }

        for id in ids {
            let Some(widget) = tree.get(&id) else {
                continue;
            };
            let Ok(adapter) = self.registry.resolve(widget) else {
                continue;
            };
            let decoder = params.scoped(&id);

            queue.extend(adapter.enqueue_events(widget, &decoder));
            for err in adapter.read_data(&id, tree, &decoder) {
                tracing::warn!(widget = %id, error = %err, "Ignoring malformed widget parameter");
                report.decoding_errors.push((id.clone(), err));
            }
        }

        queue
    }

    fn render(
        &self,
        display: &mut Display,
        store: &PropertyStore,
        head: MessageHead,
        report: &mut CycleReport,
    ) -> Result<Message, CycleError> {
        let (tree, listeners) = display.parts_mut();
        let disposed = tree.take_disposed();
        let existing = tree.initialized_ids().into_iter().chain(disposed.iter().cloned());
        let mut builder = MessageBuilder::new(head, existing);

        let ctx = RenderContext {
            store,
            listeners,
            ui_tests: self.ui_tests,
        };

        let (ids, unknown) = self.resolvable(tree);
        for err in unknown {
            tracing::warn!(error = %err, "Skipping widget subtree without adapter");
            report.unknown_variants.push(err);
        }

        let result = (|| -> Result<Vec<WidgetId>, CycleError> {
            for id in &disposed {
                builder.destroy(id)?;
            }

            let mut created = Vec::new();
            for id in ids {
                let Some(widget) = tree.get(&id) else {
                    continue;
                };
                let Ok(adapter) = self.registry.resolve(widget) else {
                    continue;
                };
                if widget.is_initialized() {
                    adapter.render_changes(widget, &ctx, &mut builder)?;
                } else {
                    adapter.render_initialization(widget, &ctx, &mut builder)?;
                    created.push(id);
                }
            }
            Ok(created)
        })();

        let message = match result.and_then(|created| Ok((builder.finalize()?, created))) {
            Ok((message, created)) => {
                for id in &created {
                    tree.mark_initialized(id);
                }
                message
            }
            Err(err) => {
                tracing::error!(error = %err, "Render failed, discarding message");
                tree.restore_disposed(disposed);
                return Err(err);
            }
        };

        listeners.purge_missing(tree);
        Ok(message)
    }
}
