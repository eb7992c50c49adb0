//! Parser/validator: JSON text in, validated [`ScreenConfig`] out.
//!
//! Parsing is a pure function over the input text. Malformed JSON and
//! missing required fields both come back as a typed [`ParseError`] — the
//! host process never sees a panic. Structural validation walks the whole
//! tree and reports every issue it finds, not just the first.

mod validate;

pub use validate::ValidationIssue;

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::schema::{Action, Node, ScreenConfig, Theme};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed screen config JSON: {message}")]
    Json { message: String },

    #[error("screen config validation failed: {}", format_issues(.issues))]
    Invalid { issues: Vec<ValidationIssue> },
}

/// Wire-shape mirror with everything optional, so a missing `screenId` and a
/// blank node type deep in the tree land in the same report.
#[derive(Debug, Deserialize)]
struct RawScreenConfig {
    #[serde(default)]
    version: Option<String>,

    #[serde(rename = "screenId", default)]
    screen_id: Option<String>,

    #[serde(default)]
    theme: Option<Theme>,

    #[serde(default)]
    root: Option<Node>,

    #[serde(default)]
    actions: HashMap<String, Action>,
}

/// Parse a UTF-8 JSON screen config.
pub fn parse_config(json_text: &str) -> Result<ScreenConfig, ParseError> {
    let raw: RawScreenConfig = serde_json::from_str(json_text).map_err(|err| ParseError::Json {
        message: err.to_string(),
    })?;

    let mut issues = Vec::new();

    let screen_id = match raw.screen_id {
        Some(id) if !id.trim().is_empty() => Some(id),
        Some(_) => {
            issues.push(ValidationIssue::new("screenId", "must not be blank"));
            None
        }
        None => {
            issues.push(ValidationIssue::new("screenId", "is required"));
            None
        }
    };

    let root = match raw.root {
        Some(node) => {
            validate::check_node(&node, "root", &mut issues);
            Some(node)
        }
        None => {
            issues.push(ValidationIssue::new("root", "is required"));
            None
        }
    };

    for (name, action) in &raw.actions {
        validate::check_action(action, &format!("actions.{name}"), &mut issues);
    }

    match (screen_id, root) {
        (Some(screen_id), Some(root)) if issues.is_empty() => Ok(ScreenConfig {
            version: raw
                .version
                .unwrap_or_else(|| ScreenConfig::DEFAULT_VERSION.to_string()),
            screen_id,
            theme: raw.theme,
            root,
            actions: raw.actions,
        }),
        _ => {
            debug!(count = issues.len(), "screen config rejected by validation");
            Err(ParseError::Invalid { issues })
        }
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ValidationIssue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
