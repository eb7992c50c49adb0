//! Variable resolution: `{{namespace.path}}` references against theme, data,
//! and host-context namespaces, plus unit/type coercion for dimensions and
//! colors.
//!
//! A reference that cannot be resolved yields an absent value, and in string
//! interpolation the original `{{...}}` text stays in place — failures stay
//! visible upstream instead of silently blanking out.

mod color;
mod context;

pub use color::Color;
pub use context::HostContext;

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, trace};

use crate::schema::Theme;
use crate::value;

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^}]+?)\s*\}\}").expect("reference pattern is valid"));

/// Extract the inner path when the whole (trimmed) string is one reference.
fn reference_path(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    let captures = REFERENCE.captures(trimmed)?;
    let whole = captures.get(0)?;
    if whole.start() == 0 && whole.end() == trimmed.len() {
        Some(captures.get(1)?.as_str())
    } else {
        None
    }
}

/// Whether a string is exactly one `{{...}}` reference.
pub fn is_reference(text: &str) -> bool {
    reference_path(text).is_some()
}

/// Resolves references for one render pass.
///
/// Borrows the merged theme, the runtime data map, and the host context;
/// all lookups are read-only, so a resolver is freely shareable across
/// threads for the duration of a pass.
pub struct Resolver<'a> {
    theme: &'a Theme,
    data: &'a Value,
    host: &'a HostContext,
}

impl<'a> Resolver<'a> {
    pub fn new(theme: &'a Theme, data: &'a Value, host: &'a HostContext) -> Self {
        Self { theme, data, host }
    }

    /// Resolve a whole-string reference like `{{colors.primary}}`.
    ///
    /// Returns `None` for a miss and for strings that are not references at
    /// all; callers that need the literal-preserving behavior go through
    /// [`Resolver::resolve_value`].
    pub fn resolve(&self, reference: &str) -> Option<Value> {
        let path = reference_path(reference)?;
        let resolved = self.resolve_path(path);
        if resolved.is_none() {
            trace!(reference, "reference did not resolve");
        }
        resolved
    }

    /// Resolve a dotted reference path against its namespace.
    fn resolve_path(&self, path: &str) -> Option<Value> {
        let (namespace, rest) = split_first(path);
        match namespace {
            // Explicit alias: {{theme.colors.primary}} == {{colors.primary}}.
            "theme" => self.resolve_theme_path(rest),
            "colors" | "typography" | "spacing" | "borderRadius" => self.resolve_theme_path(path),
            "data" => value::lookup_path(self.data, rest).cloned(),
            "device" | "screen" | "app" => self.host.lookup(namespace, rest),
            _ => None,
        }
    }

    fn resolve_theme_path(&self, path: &str) -> Option<Value> {
        let (namespace, rest) = split_first(path);
        let (key, tail) = split_first(rest);
        match namespace {
            "colors" if tail.is_empty() => self
                .theme
                .colors
                .get(key)
                .map(|hex| Value::String(hex.clone())),
            "typography" => self
                .theme
                .typography
                .get(key)
                .and_then(|style| value::lookup_path(style, tail))
                .cloned(),
            "spacing" if tail.is_empty() => self.theme.spacing.get(key).map(|n| Value::from(*n)),
            "borderRadius" if tail.is_empty() => {
                self.theme.border_radius.get(key).map(|n| Value::from(*n))
            }
            _ => None,
        }
    }

    /// Substitute every `{{...}}` occurrence inside a longer string.
    ///
    /// Misses keep the original occurrence untouched.
    pub fn replace_variables(&self, text: &str) -> String {
        REFERENCE
            .replace_all(text, |captures: &regex::Captures<'_>| {
                match self.resolve_path(&captures[1]) {
                    Some(resolved) => value::display_string(&resolved),
                    None => captures[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Resolve references anywhere inside a value, recursively.
    ///
    /// A whole-string reference keeps its resolved type (a `{{spacing.md}}`
    /// prop stays numeric); references embedded in longer strings
    /// interpolate; everything else passes through unchanged.
    pub fn resolve_value(&self, value: &Value) -> Value {
        match value {
            Value::String(text) => {
                if let Some(path) = reference_path(text) {
                    match self.resolve_path(path) {
                        Some(resolved) => resolved,
                        None => value.clone(),
                    }
                } else if REFERENCE.is_match(text) {
                    Value::String(self.replace_variables(text))
                } else {
                    value.clone()
                }
            }
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.resolve_value(item)).collect())
            }
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, item)| (key.clone(), self.resolve_value(item)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Coerce a dimension-like value: raw number, numeric string, spacing
    /// token name, or `{{...}}` reference.
    pub fn resolve_dimension(&self, value: &Value) -> Option<f64> {
        self.resolve_dimension_in(value, &self.theme.spacing)
    }

    /// Like [`Resolver::resolve_dimension`], with bare token names looked up
    /// in the border-radius namespace.
    pub fn resolve_radius(&self, value: &Value) -> Option<f64> {
        self.resolve_dimension_in(value, &self.theme.border_radius)
    }

    /// Resolve references, then coerce the result to a number.
    pub fn resolve_number(&self, value: &Value) -> Option<f64> {
        value::as_f64_coerced(&self.resolve_value(value))
    }

    fn resolve_dimension_in(&self, value: &Value, tokens: &HashMap<String, i64>) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(text) => {
                if let Some(path) = reference_path(text) {
                    return match self.resolve_path(path)? {
                        Value::Number(n) => n.as_f64(),
                        Value::String(s) => s.trim().parse().ok(),
                        _ => None,
                    };
                }
                let text = text.trim();
                if let Ok(number) = text.parse::<f64>() {
                    return Some(number);
                }
                tokens.get(text).map(|n| *n as f64)
            }
            _ => None,
        }
    }

    /// Coerce a color value: hex string, theme color name, or reference.
    ///
    /// A present-but-invalid color falls back to fully transparent; a
    /// non-string value has no color interpretation at all.
    pub fn resolve_color(&self, value: &Value) -> Option<Color> {
        match value {
            Value::String(text) => Some(self.resolve_color_text(text, 0)),
            _ => None,
        }
    }

    fn resolve_color_text(&self, text: &str, depth: usize) -> Color {
        // Theme colors may name other theme colors; bound the chain so a
        // self-referential palette cannot loop.
        const MAX_CHAIN: usize = 8;
        if depth >= MAX_CHAIN {
            debug!(value = text, "color reference chain too deep");
            return Color::TRANSPARENT;
        }

        let text = text.trim();
        if let Some(path) = reference_path(text) {
            return match self.resolve_path(path) {
                Some(Value::String(resolved)) => self.resolve_color_text(&resolved, depth + 1),
                _ => {
                    debug!(reference = text, "color reference did not resolve");
                    Color::TRANSPARENT
                }
            };
        }

        if let Some(color) = Color::parse(text) {
            return color;
        }

        if let Some(named) = self.theme.colors.get(text) {
            return self.resolve_color_text(named, depth + 1);
        }

        debug!(value = text, "invalid color, using transparent");
        Color::TRANSPARENT
    }
}

fn split_first(path: &str) -> (&str, &str) {
    match path.split_once('.') {
        Some((head, rest)) => (head, rest),
        None => (path, ""),
    }
}
