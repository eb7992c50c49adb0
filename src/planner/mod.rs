//! Render planning: walk the node tree, apply visibility and condition
//! checks, resolve style and props per node, and emit the ordered render
//! plan the native backend consumes.
//!
//! Planning is best-effort: a bad node is recorded as a diagnostic and its
//! siblings still render. Conditions run against the current runtime data on
//! every pass — nothing here is cached.

mod components;
mod style;

pub use components::{ComponentRegistry, ComponentSet};
pub use style::ResolvedStyle;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, trace};

use crate::eval;
use crate::resolver::{HostContext, Resolver};
use crate::schema::{Node, ScreenConfig, Theme, Visibility};

/// One fully resolved node of the render plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlanEntry {
    pub node_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub resolved_style: ResolvedStyle,
    pub resolved_props: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderPlanEntry>,
}

/// A recoverable per-node problem. The rest of the screen still renders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanDiagnostic {
    #[error("{path}: no component registered for node type '{node_type}'")]
    UnknownComponentType { node_type: String, path: String },
}

/// Output of one planning pass.
#[derive(Debug)]
pub struct RenderPlan {
    /// The resolved tree; `None` when the root itself was skipped.
    pub root: Option<RenderPlanEntry>,
    pub diagnostics: Vec<PlanDiagnostic>,
}

/// Walks a node tree for one render pass.
pub struct Planner<'a> {
    resolver: Resolver<'a>,
    components: &'a dyn ComponentRegistry,
}

impl<'a> Planner<'a> {
    /// `theme` must already be merged with the defaults; `data` is the
    /// runtime data map for `{{data.*}}` references.
    pub fn new(
        theme: &'a Theme,
        data: &'a Value,
        host: &'a HostContext,
        components: &'a dyn ComponentRegistry,
    ) -> Self {
        Self {
            resolver: Resolver::new(theme, data, host),
            components,
        }
    }

    pub fn plan(&self, node: &Node) -> RenderPlan {
        let mut diagnostics = Vec::new();
        let root = self.plan_node(node, "root", &mut diagnostics);
        RenderPlan { root, diagnostics }
    }

    fn plan_node(
        &self,
        node: &Node,
        path: &str,
        diagnostics: &mut Vec<PlanDiagnostic>,
    ) -> Option<RenderPlanEntry> {
        if matches!(node.visibility, Visibility::Hidden | Visibility::Gone) {
            trace!(path, node_type = %node.node_type, "node not visible");
            return None;
        }

        if let Some(condition) = &node.condition {
            if !eval::evaluate(condition, &self.resolver) {
                trace!(path, node_type = %node.node_type, "condition false, skipping subtree");
                return None;
            }
        }

        if !self.components.supports(&node.node_type) {
            debug!(path, node_type = %node.node_type, "unknown component type");
            diagnostics.push(PlanDiagnostic::UnknownComponentType {
                node_type: node.node_type.clone(),
                path: path.to_string(),
            });
            return None;
        }

        let empty = Map::new();
        let style_map = node.style.as_ref().unwrap_or(&empty);
        let resolved_style = style::resolve_style(style_map, &self.resolver);

        let resolved_props: Map<String, Value> = node
            .props
            .as_ref()
            .map(|props| {
                props
                    .iter()
                    .map(|(key, value)| (key.clone(), self.resolver.resolve_value(value)))
                    .collect()
            })
            .unwrap_or_default();

        let children: Vec<RenderPlanEntry> = node
            .children()
            .iter()
            .enumerate()
            .filter_map(|(index, child)| {
                self.plan_node(child, &format!("{path}.children[{index}]"), diagnostics)
            })
            .collect();

        Some(RenderPlanEntry {
            node_type: node.node_type.clone(),
            id: node.id.clone(),
            resolved_style,
            resolved_props,
            children,
        })
    }
}

/// Plan a whole screen: merge its theme over the process defaults, then walk
/// from the root node.
pub fn plan_screen(
    config: &ScreenConfig,
    data: &Value,
    host: &HostContext,
    components: &dyn ComponentRegistry,
) -> RenderPlan {
    let theme = config
        .theme
        .as_ref()
        .map(Theme::merge_with_defaults)
        .unwrap_or_else(|| crate::schema::default_theme().clone());
    Planner::new(&theme, data, host, components).plan(&config.root)
}
