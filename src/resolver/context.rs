use serde_json::{Map, Value};

use crate::value;

/// Read-only host-supplied context for the `device.*` / `screen.*` / `app.*`
/// reference namespaces.
///
/// The host fills this in at screen-render time (platform name, screen
/// dimensions, app version); the interpreter never computes any of it.
#[derive(Debug, Clone, Default)]
pub struct HostContext {
    device: Map<String, Value>,
    screen: Map<String, Value>,
    app: Map<String, Value>,
}

impl HostContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.device.insert(key.into(), value.into());
        self
    }

    pub fn with_screen(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.screen.insert(key.into(), value.into());
        self
    }

    pub fn with_app(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.app.insert(key.into(), value.into());
        self
    }

    /// Look up a dotted path inside one of the three namespaces.
    pub fn lookup(&self, namespace: &str, path: &str) -> Option<Value> {
        let map = match namespace {
            "device" => &self.device,
            "screen" => &self.screen,
            "app" => &self.app,
            _ => return None,
        };

        let (key, rest) = match path.split_once('.') {
            Some((key, rest)) => (key, rest),
            None => (path, ""),
        };
        map.get(key)
            .and_then(|entry| value::lookup_path(entry, rest))
            .cloned()
    }
}
