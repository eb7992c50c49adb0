//! Thread-safe handler/interceptor registry and the dispatch algorithm.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::{
    ActionError, ActionHandler, ActionInterceptor, DispatchOutcome, Intercept,
};
use crate::schema::Action;

/// Handle returned by registration, used to unregister later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

struct HandlerEntry {
    id: RegistrationId,
    priority: i32,
    handler: Arc<dyn ActionHandler>,
}

struct InterceptorEntry {
    id: RegistrationId,
    priority: i32,
    interceptor: Arc<dyn ActionInterceptor>,
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    /// Handlers keyed by action type.
    handlers: HashMap<String, Vec<HandlerEntry>>,
    /// Handlers keyed by callback event name.
    event_handlers: HashMap<String, Vec<HandlerEntry>>,
    interceptors: Vec<InterceptorEntry>,
}

impl RegistryInner {
    fn allocate_id(&mut self) -> RegistrationId {
        self.next_id += 1;
        RegistrationId(self.next_id)
    }
}

/// Registry of action handlers and interceptors.
///
/// Cloning shares the same underlying registry. Registration and dispatch
/// are safe from arbitrary threads: dispatch snapshots the matching entries
/// under the read lock and runs them outside it, so a handler may itself
/// register or unregister without deadlocking.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an exact action type. Higher priority runs
    /// first; ties keep registration order.
    pub fn register_handler(
        &self,
        action_type: impl Into<String>,
        priority: i32,
        handler: impl ActionHandler + 'static,
    ) -> RegistrationId {
        let mut inner = self.inner.write();
        let id = inner.allocate_id();
        let entries = inner.handlers.entry(action_type.into()).or_default();
        insert_by_priority(
            entries,
            HandlerEntry {
                id,
                priority,
                handler: Arc::new(handler),
            },
        );
        id
    }

    /// Register a handler for a callback event name. Callback actions fan
    /// out by their embedded `event` field, not by the outer type.
    pub fn register_event_handler(
        &self,
        event: impl Into<String>,
        priority: i32,
        handler: impl ActionHandler + 'static,
    ) -> RegistrationId {
        let mut inner = self.inner.write();
        let id = inner.allocate_id();
        let entries = inner.event_handlers.entry(event.into()).or_default();
        insert_by_priority(
            entries,
            HandlerEntry {
                id,
                priority,
                handler: Arc::new(handler),
            },
        );
        id
    }

    /// Add an interceptor. Higher priority runs first; ties keep
    /// registration order.
    pub fn add_interceptor(
        &self,
        priority: i32,
        interceptor: impl ActionInterceptor + 'static,
    ) -> RegistrationId {
        let mut inner = self.inner.write();
        let id = inner.allocate_id();
        let index = inner
            .interceptors
            .partition_point(|entry| entry.priority >= priority);
        inner.interceptors.insert(
            index,
            InterceptorEntry {
                id,
                priority,
                interceptor: Arc::new(interceptor),
            },
        );
        id
    }

    /// Remove a previous registration. Returns false when the id is gone.
    pub fn unregister(&self, id: RegistrationId) -> bool {
        let mut inner = self.inner.write();
        let mut removed = false;

        for entries in inner.handlers.values_mut() {
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            removed |= entries.len() != before;
        }
        for entries in inner.event_handlers.values_mut() {
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            removed |= entries.len() != before;
        }

        let before = inner.interceptors.len();
        inner.interceptors.retain(|entry| entry.id != id);
        removed |= inner.interceptors.len() != before;

        removed
    }

    /// Total registered handlers across both keyspaces.
    pub fn handler_count(&self) -> usize {
        let inner = self.inner.read();
        inner.handlers.values().map(Vec::len).sum::<usize>()
            + inner.event_handlers.values().map(Vec::len).sum::<usize>()
    }

    /// Route an action through the interceptor chain and out to handlers.
    pub fn dispatch(&self, action: Action) -> DispatchOutcome {
        if let Err(err) = validate_required(&action) {
            debug!(error = %err, "rejecting invalid action before dispatch");
            return DispatchOutcome::Invalid(err);
        }

        let interceptors: Vec<Arc<dyn ActionInterceptor>> = {
            let inner = self.inner.read();
            inner
                .interceptors
                .iter()
                .map(|entry| Arc::clone(&entry.interceptor))
                .collect()
        };

        let mut action = action;
        for interceptor in &interceptors {
            match interceptor.intercept(action) {
                Intercept::Continue(next) => action = next,
                Intercept::Block => {
                    debug!("action blocked by interceptor");
                    return DispatchOutcome::Blocked;
                }
            }
        }

        let handlers = match self.snapshot_handlers(&action) {
            Ok(handlers) => handlers,
            Err(err) => return DispatchOutcome::Invalid(err),
        };

        if handlers.is_empty() {
            trace!(action_type = %action.action_type, "no handler registered");
            return DispatchOutcome::NoHandler;
        }

        let mut succeeded = 0usize;
        let mut first_error = None;
        for handler in &handlers {
            match handler.handle(&action) {
                Ok(()) => succeeded += 1,
                Err(err) => {
                    warn!(
                        action_type = %action.action_type,
                        error = %err,
                        "action handler failed"
                    );
                    if first_error.is_none() {
                        first_error = Some(ActionError::HandlerFailed {
                            action_type: action.action_type.clone(),
                            source: err,
                        });
                    }
                }
            }
        }

        if succeeded > 0 {
            DispatchOutcome::Success {
                handlers_run: succeeded,
            }
        } else {
            match first_error {
                Some(err) => DispatchOutcome::Failed(err),
                None => DispatchOutcome::NoHandler,
            }
        }
    }

    /// Snapshot the handler list for an action, in dispatch order.
    ///
    /// Callback actions fan out by their embedded event name; everything
    /// else by the outer action type. Interceptors may have rewritten the
    /// action, so the callback event is re-checked here.
    fn snapshot_handlers(&self, action: &Action) -> Result<Vec<Arc<dyn ActionHandler>>, ActionError> {
        let inner = self.inner.read();
        if action.is_callback() {
            let event = action.event().ok_or(ActionError::MissingField {
                action_type: action.action_type.clone(),
                field: "event",
            })?;
            Ok(collect_handlers(inner.event_handlers.get(event)))
        } else {
            Ok(collect_handlers(inner.handlers.get(action.action_type.as_str())))
        }
    }
}

fn collect_handlers(entries: Option<&Vec<HandlerEntry>>) -> Vec<Arc<dyn ActionHandler>> {
    entries
        .map(|entries| {
            entries
                .iter()
                .map(|entry| Arc::clone(&entry.handler))
                .collect()
        })
        .unwrap_or_default()
}

fn insert_by_priority(entries: &mut Vec<HandlerEntry>, entry: HandlerEntry) {
    let index = entries.partition_point(|existing| existing.priority >= entry.priority);
    entries.insert(index, entry);
}

/// Required fields per semantic subtype, checked before anything runs. A
/// missing field is a reportable error, never a silent no-op.
fn validate_required(action: &Action) -> Result<(), ActionError> {
    let field = match action.action_type.as_str() {
        "navigate" => "screen",
        "callback" => "event",
        "openUrl" => "url",
        _ => return Ok(()),
    };

    let present = action
        .data
        .get(field)
        .and_then(Value::as_str)
        .is_some_and(|v| !v.trim().is_empty());

    if present {
        Ok(())
    } else {
        Err(ActionError::MissingField {
            action_type: action.action_type.clone(),
            field,
        })
    }
}
