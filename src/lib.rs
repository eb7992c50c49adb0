//! Server-driven UI interpreter core.
//!
//! A backend describes a screen as a JSON document; this crate turns that
//! document into a fully resolved, typed render plan a native rendering
//! backend can consume, without the app shipping an update.
//!
//! The pipeline, leaves first:
//!
//! 1. [`schema`] — typed records over JSON values: nodes, themes, actions,
//!    conditions.
//! 2. [`parser`] — JSON text to a validated [`schema::ScreenConfig`],
//!    collecting every structural issue into one report.
//! 3. [`resolver`] — `{{...}}` variable resolution against theme, data, and
//!    host-context namespaces, with dimension and color coercion.
//! 4. [`eval`] — conditional-visibility evaluation.
//! 5. [`action`] — handler/interceptor registry and dispatch.
//! 6. [`planner`] — the tree walk that emits the render plan.
//!
//! Everything except the action registry is a synchronous, side-effect-free
//! computation over immutable inputs, safe on any thread. Widget
//! construction, config fetching, and caching are host concerns; the core
//! consumes a JSON string and produces data.

pub mod action;
pub mod eval;
pub mod parser;
pub mod planner;
pub mod resolver;
pub mod schema;
pub mod value;

pub use action::{
    ActionError, ActionHandler, ActionInterceptor, ActionRegistry, DispatchOutcome, HandlerError,
    Intercept, RegistrationId,
};
pub use parser::{parse_config, ParseError, ValidationIssue};
pub use planner::{
    plan_screen, ComponentRegistry, ComponentSet, PlanDiagnostic, Planner, RenderPlan,
    RenderPlanEntry, ResolvedStyle,
};
pub use resolver::{Color, HostContext, Resolver};
pub use schema::{default_theme, Action, Condition, Node, ScreenConfig, Theme, Visibility};
