use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Action, Condition};

/// One element of the declarative UI tree.
///
/// A node owns its children by value, so the tree is acyclic by
/// construction; no back-references exist anywhere in the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Component type name, matched against the host's component registry.
    /// Defaults to empty when absent so the validator can report it in place
    /// instead of aborting the whole parse.
    #[serde(rename = "type", default)]
    pub node_type: String,

    /// Optional stable identifier, carried through to the render plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Raw style block; values may contain `{{...}}` references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Map<String, Value>>,

    /// Raw props block; values may contain `{{...}}` references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,

    #[serde(default, skip_serializing_if = "Visibility::is_visible")]
    pub visibility: Visibility,

    /// Action fired when the user interacts with this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,

    /// Visibility condition, re-evaluated against current data every render
    /// pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Node {
    /// Child nodes, empty slice when none were authored.
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Static visibility of a node, before any condition is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    Gone,
}

impl Visibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }
}
