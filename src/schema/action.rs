use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user-interaction intent carried from a node to a handler.
///
/// The `type` string selects the semantic subtype: `navigate`, `callback`,
/// `openUrl`, `dismiss`, or anything else as a custom action. Required
/// fields per subtype are validated before dispatch — a missing field is a
/// reportable error, never a silent no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type", default)]
    pub action_type: String,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl Action {
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            data: Map::new(),
        }
    }

    /// Attach a data field, builder-style.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Callback actions fan out by their embedded event name rather than by
    /// the outer type.
    pub fn is_callback(&self) -> bool {
        self.action_type == "callback"
    }

    /// Target screen of a `navigate` action.
    pub fn screen(&self) -> Option<&str> {
        self.string_field("screen")
    }

    /// Event name of a `callback` action.
    pub fn event(&self) -> Option<&str> {
        self.string_field("event")
    }

    /// URL of an `openUrl` action.
    pub fn url(&self) -> Option<&str> {
        self.string_field("url")
    }

    /// Whether an `openUrl` action should leave the app. Defaults to false.
    pub fn is_external(&self) -> bool {
        self.data
            .get("external")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Whether a `dismiss` action animates. Defaults to true.
    pub fn is_animated(&self) -> bool {
        self.data
            .get("animated")
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// Payload of a `callback` action, forwarded to its handlers.
    pub fn payload(&self) -> Option<&Value> {
        self.data.get("data")
    }

    fn string_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}
