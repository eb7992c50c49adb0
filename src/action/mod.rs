//! Action dispatch: named handlers, an interceptor chain, priority ordering.
//!
//! Handlers register per action type, or per event name for callback-type
//! actions. Interceptors run first and may transform or veto the action.
//! Everything here is about ordering and isolation — which thread a handler
//! runs on is the registrant's concern, and UI-affecting handlers must be
//! marshaled onto the UI thread by the host.

mod registry;

pub use registry::{ActionRegistry, RegistrationId};

use thiserror::Error;

use crate::schema::Action;

/// Error raised by a handler during dispatch. Captured by the dispatcher;
/// never propagates to sibling handlers or the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("action '{action_type}' is missing required field '{field}'")]
    MissingField {
        action_type: String,
        field: &'static str,
    },

    #[error("handler failed for action '{action_type}': {source}")]
    HandlerFailed {
        action_type: String,
        #[source]
        source: HandlerError,
    },
}

/// A registered action handler.
pub trait ActionHandler: Send + Sync {
    fn handle(&self, action: &Action) -> Result<(), HandlerError>;
}

impl<F> ActionHandler for F
where
    F: Fn(&Action) -> Result<(), HandlerError> + Send + Sync,
{
    fn handle(&self, action: &Action) -> Result<(), HandlerError> {
        self(action)
    }
}

/// Decision returned by an interceptor.
pub enum Intercept {
    /// Pass the action on, possibly transformed.
    Continue(Action),
    /// Veto the action; no handlers run.
    Block,
}

/// Middleware that sees every action before any handler does.
pub trait ActionInterceptor: Send + Sync {
    fn intercept(&self, action: Action) -> Intercept;
}

impl<F> ActionInterceptor for F
where
    F: Fn(Action) -> Intercept + Send + Sync,
{
    fn intercept(&self, action: Action) -> Intercept {
        self(action)
    }
}

/// What came of a dispatch.
#[derive(Debug, PartialEq)]
pub enum DispatchOutcome {
    /// At least one handler ran without error.
    Success { handlers_run: usize },
    /// An interceptor vetoed the action — a deliberate outcome, not an
    /// error.
    Blocked,
    /// Nothing was registered for this action.
    NoHandler,
    /// Handlers ran and every one failed; carries the first captured error.
    Failed(ActionError),
    /// The action failed required-field validation; nothing ran.
    Invalid(ActionError),
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Success { .. })
    }
}
