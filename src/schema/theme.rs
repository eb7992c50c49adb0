use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Named design-token bundle resolved by reference.
///
/// Four namespaces: colors, typography, spacing, border radii. Lookups miss
/// silently — callers supply fallback defaults. A screen's theme is merged
/// with the process-wide default theme once per render and is immutable
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Hex strings (`#rrggbb`, `#aarrggbb`, short form) or names of other
    /// color entries.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub colors: HashMap<String, String>,

    /// Free-form text style objects (font size, weight, ...).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub typography: HashMap<String, Value>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub spacing: HashMap<String, i64>,

    #[serde(
        default,
        rename = "borderRadius",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub border_radius: HashMap<String, i64>,
}

impl Theme {
    /// Shallow per-namespace merge, override wins.
    ///
    /// Keys absent from the override namespace but present in the base
    /// survive. Same-keyed override entries replace base entries.
    pub fn merge(base: &Theme, overrides: &Theme) -> Theme {
        Theme {
            colors: merged(&base.colors, &overrides.colors),
            typography: merged(&base.typography, &overrides.typography),
            spacing: merged(&base.spacing, &overrides.spacing),
            border_radius: merged(&base.border_radius, &overrides.border_radius),
        }
    }

    /// Merge this theme over the process-wide default theme.
    ///
    /// Idempotent: merging an already-merged theme changes nothing.
    pub fn merge_with_defaults(&self) -> Theme {
        Theme::merge(default_theme(), self)
    }
}

fn merged<V: Clone>(base: &HashMap<String, V>, overrides: &HashMap<String, V>) -> HashMap<String, V> {
    let mut out = base.clone();
    out.extend(
        overrides
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );
    out
}

/// The process-wide default theme.
///
/// Read-only, initialized on first use, never mutated afterwards. Library
/// code takes themes by reference; only the composition root reaches for
/// this directly.
pub fn default_theme() -> &'static Theme {
    &DEFAULT_THEME
}

static DEFAULT_THEME: LazyLock<Theme> = LazyLock::new(|| Theme {
    colors: string_map(&[
        ("primary", "#3b82f6"),
        ("secondary", "#6b7280"),
        ("background", "#ffffff"),
        ("surface", "#f9fafb"),
        ("error", "#ef4444"),
        ("onPrimary", "#ffffff"),
        ("text", "#111827"),
        ("textSecondary", "#6b7280"),
    ]),
    typography: [
        ("heading", json!({"fontSize": 24, "fontWeight": "bold"})),
        ("body", json!({"fontSize": 16, "fontWeight": "regular"})),
        ("caption", json!({"fontSize": 12, "fontWeight": "regular"})),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect(),
    spacing: int_map(&[("xs", 4), ("sm", 8), ("md", 16), ("lg", 24), ("xl", 32)]),
    border_radius: int_map(&[("none", 0), ("sm", 4), ("md", 8), ("lg", 16), ("pill", 999)]),
});

fn string_map(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn int_map(entries: &[(&str, i64)]) -> HashMap<String, i64> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect()
}
