//! Typed schema model over the JSON wire format.
//!
//! Pure data: every type here is built once at parse time, is immutable
//! afterwards, and carries no behavior beyond accessors. The interpreter
//! stages (resolver, evaluator, planner) consume these records.

mod action;
mod condition;
mod node;
mod screen;
mod theme;

pub use action::Action;
pub use condition::Condition;
pub use node::{Node, Visibility};
pub use screen::ScreenConfig;
pub use theme::{default_theme, Theme};
