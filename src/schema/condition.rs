use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A visibility condition attached to a node.
///
/// `expression` is the subject under test: a literal, or a `{{...}}`
/// reference resolved at evaluation time. The optional `and`/`or` groups
/// compose recursively; the final result is always
/// `self_test && all(and) && any(or)`, with absent groups passing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "if", alias = "expression", default)]
    pub expression: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub and: Option<Vec<Condition>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub or: Option<Vec<Condition>>,
}

impl Condition {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            operator: None,
            value: None,
            and: None,
            or: None,
        }
    }

    /// Attach an operator test, builder-style.
    pub fn with_test(mut self, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        self.operator = Some(operator.into());
        self.value = Some(value.into());
        self
    }
}
