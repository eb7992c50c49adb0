//! Structural validation walk. Collects issues instead of failing fast so a
//! server author sees every problem in one round.

use std::fmt;

use serde_json::Value;

use crate::schema::{Action, Condition, Node};

/// One structural problem, located by a dotted path into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub(crate) fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

pub(crate) fn check_node(node: &Node, path: &str, issues: &mut Vec<ValidationIssue>) {
    if node.node_type.trim().is_empty() {
        issues.push(ValidationIssue::new(path, "node type must not be blank"));
    }

    if let Some(action) = &node.action {
        check_action(action, &format!("{path}.action"), issues);
    }

    if let Some(condition) = &node.condition {
        check_condition(condition, &format!("{path}.condition"), issues);
    }

    for (index, child) in node.children().iter().enumerate() {
        check_node(child, &format!("{path}.children[{index}]"), issues);
    }
}

pub(crate) fn check_action(action: &Action, path: &str, issues: &mut Vec<ValidationIssue>) {
    if action.action_type.trim().is_empty() {
        issues.push(ValidationIssue::new(path, "action type must not be blank"));
        return;
    }

    // Required fields per semantic subtype. Custom action types carry
    // whatever data they like.
    let required = match action.action_type.as_str() {
        "navigate" => Some("screen"),
        "callback" => Some("event"),
        "openUrl" => Some("url"),
        _ => None,
    };

    if let Some(field) = required {
        let present = action
            .data
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|v| !v.trim().is_empty());
        if !present {
            issues.push(ValidationIssue::new(
                path,
                format!(
                    "action '{}' requires a non-empty '{field}' field",
                    action.action_type
                ),
            ));
        }
    }
}

pub(crate) fn check_condition(condition: &Condition, path: &str, issues: &mut Vec<ValidationIssue>) {
    if condition.expression.trim().is_empty() {
        issues.push(ValidationIssue::new(
            path,
            "condition expression must not be blank",
        ));
    }

    if let Some(group) = &condition.and {
        for (index, nested) in group.iter().enumerate() {
            check_condition(nested, &format!("{path}.and[{index}]"), issues);
        }
    }

    if let Some(group) = &condition.or {
        for (index, nested) in group.iter().enumerate() {
            check_condition(nested, &format!("{path}.or[{index}]"), issues);
        }
    }
}
