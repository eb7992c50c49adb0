//! Style resolution: a raw style block to a flat, fully resolved record.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::resolver::{Color, Resolver};

/// A node's style with every reference replaced by a concrete value.
///
/// Typed fields cover the dimensions and colors every native backend
/// understands; everything else lands in `extra`, resolved but untyped, so
/// a backend with a richer style vocabulary still sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub(crate) fn resolve_style(style: &Map<String, Value>, resolver: &Resolver<'_>) -> ResolvedStyle {
    let mut resolved = ResolvedStyle::default();

    for (key, value) in style {
        match key.as_str() {
            "width" => resolved.width = resolver.resolve_dimension(value),
            "height" => resolved.height = resolver.resolve_dimension(value),
            "padding" => resolved.padding = resolver.resolve_dimension(value),
            "margin" => resolved.margin = resolver.resolve_dimension(value),
            "cornerRadius" => resolved.corner_radius = resolver.resolve_radius(value),
            "borderWidth" => resolved.border_width = resolver.resolve_dimension(value),
            "opacity" => resolved.opacity = resolver.resolve_number(value),
            "fontSize" => resolved.font_size = resolver.resolve_number(value),
            "fontWeight" => {
                resolved.font_weight = match resolver.resolve_value(value) {
                    Value::String(weight) => Some(weight),
                    Value::Number(weight) => Some(weight.to_string()),
                    _ => None,
                }
            }
            "backgroundColor" => resolved.background_color = resolver.resolve_color(value),
            "textColor" => resolved.text_color = resolver.resolve_color(value),
            "borderColor" => resolved.border_color = resolver.resolve_color(value),
            _ => {
                resolved
                    .extra
                    .insert(key.clone(), resolver.resolve_value(value));
            }
        }
    }

    resolved
}
