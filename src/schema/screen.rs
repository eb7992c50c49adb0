use std::collections::HashMap;

use serde::Serialize;

use super::{Action, Node, Theme};

/// A fully parsed and validated screen description.
///
/// Built by [`crate::parser::parse_config`]; construction elsewhere is for
/// tests and host-side tooling. Immutable once built — a re-fetch or a data
/// change produces a fresh config.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenConfig {
    pub version: String,

    #[serde(rename = "screenId")]
    pub screen_id: String,

    /// The screen's own theme, before merging with the defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,

    pub root: Node,

    /// Named actions addressable by the host app.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub actions: HashMap<String, Action>,
}

impl ScreenConfig {
    pub const DEFAULT_VERSION: &'static str = "1.0";

    /// Look up a named action.
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// Serialize back to the wire format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
