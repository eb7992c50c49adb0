//! Conditional-visibility evaluation.
//!
//! A condition's subject is its expression, resolved through the variable
//! resolver; an unresolved reference evaluates as null. Operator matching is
//! case-sensitive: `GT` or `Contains` never match and the test is false.
//! Comparisons degrade to false instead of erroring, so a bad condition can
//! hide a node but never take down a render.

use serde_json::Value;
use tracing::debug;

use crate::resolver::{is_reference, Resolver};
use crate::schema::Condition;
use crate::value;

/// Evaluate a condition against the current theme, data, and host context.
///
/// The result is `self_test && all(and) && any(or)`. Both groups default to
/// pass when absent. Server-authored configs depend on this exact three-way
/// composition; do not fold the groups into each other.
pub fn evaluate(condition: &Condition, resolver: &Resolver<'_>) -> bool {
    let self_test = self_test(condition, resolver);

    let and_group = condition
        .and
        .as_ref()
        .map_or(true, |group| group.iter().all(|nested| evaluate(nested, resolver)));

    let or_group = condition
        .or
        .as_ref()
        .map_or(true, |group| group.iter().any(|nested| evaluate(nested, resolver)));

    self_test && and_group && or_group
}

fn self_test(condition: &Condition, resolver: &Resolver<'_>) -> bool {
    let subject = resolve_operand_text(&condition.expression, resolver);

    let Some(operator) = condition.operator.as_deref() else {
        // No operator: plain truthiness of the resolved expression.
        return value::truthiness(&subject);
    };

    let operand = condition
        .value
        .as_ref()
        .map(|operand| resolve_operand(operand, resolver));

    apply_operator(operator, &subject, operand.as_ref())
}

/// Resolve one side of a test. A whole-string reference that misses becomes
/// null (absent), unlike in style interpolation where the literal survives.
fn resolve_operand_text(text: &str, resolver: &Resolver<'_>) -> Value {
    match resolver.resolve(text) {
        Some(resolved) => resolved,
        None if is_reference(text) => Value::Null,
        None => Value::String(resolver.replace_variables(text)),
    }
}

fn resolve_operand(operand: &Value, resolver: &Resolver<'_>) -> Value {
    match operand {
        Value::String(text) => resolve_operand_text(text, resolver),
        other => other.clone(),
    }
}

fn apply_operator(operator: &str, subject: &Value, operand: Option<&Value>) -> bool {
    match operator {
        "==" | "=" => operand.is_some_and(|rhs| value::loose_eq(subject, rhs)),
        "!=" => operand.is_some_and(|rhs| !value::loose_eq(subject, rhs)),
        ">" | ">=" | "<" | "<=" => numeric_compare(operator, subject, operand),
        "contains" => contains(subject, operand),
        "startswith" => affix(subject, operand, |s, prefix| s.starts_with(prefix)),
        "endswith" => affix(subject, operand, |s, suffix| s.ends_with(suffix)),
        "exists" => !subject.is_null(),
        "empty" => is_empty_value(subject),
        "notempty" => !is_empty_value(subject),
        other => {
            debug!(operator = other, "unknown condition operator");
            false
        }
    }
}

/// Both sides are coerced to f64; non-numeric operands make the comparison
/// false rather than erroring.
fn numeric_compare(operator: &str, subject: &Value, operand: Option<&Value>) -> bool {
    let lhs = value::as_f64_coerced(subject);
    let rhs = operand.and_then(value::as_f64_coerced);
    let (Some(lhs), Some(rhs)) = (lhs, rhs) else {
        return false;
    };

    match operator {
        ">" => lhs > rhs,
        ">=" => lhs >= rhs,
        "<" => lhs < rhs,
        "<=" => lhs <= rhs,
        _ => false,
    }
}

/// Substring for strings, element membership for arrays, key membership for
/// objects.
fn contains(subject: &Value, operand: Option<&Value>) -> bool {
    let Some(needle) = operand else {
        return false;
    };

    match subject {
        Value::String(haystack) => haystack.contains(&value::display_string(needle)),
        Value::Array(items) => items.iter().any(|item| value::loose_eq(item, needle)),
        Value::Object(map) => map.contains_key(value::display_string(needle).as_str()),
        _ => false,
    }
}

fn affix(subject: &Value, operand: Option<&Value>, test: impl Fn(&str, &str) -> bool) -> bool {
    let (Value::String(subject), Some(operand)) = (subject, operand) else {
        return false;
    };
    test(subject, &value::display_string(operand))
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::HostContext;
    use crate::schema::{default_theme, Condition};
    use serde_json::json;

    fn check(condition: &Condition, data: Value) -> bool {
        let host = HostContext::new();
        let resolver = Resolver::new(default_theme(), &data, &host);
        evaluate(condition, &resolver)
    }

    #[test]
    fn test_truthiness_without_operator() {
        let cond = Condition::new("{{data.flag}}");
        assert!(check(&cond, json!({"flag": true})));
        assert!(!check(&cond, json!({"flag": false})));
        assert!(!check(&cond, json!({"flag": 0})));
        assert!(!check(&cond, json!({})));
    }

    #[test]
    fn test_equality_is_loose() {
        let cond = Condition::new("{{data.count}}").with_test("==", "5");
        assert!(check(&cond, json!({"count": 5})));
        assert!(!check(&cond, json!({"count": 6})));

        let cond = Condition::new("{{data.name}}").with_test("!=", "guest");
        assert!(check(&cond, json!({"name": "ann"})));
        assert!(!check(&cond, json!({"name": "guest"})));
    }

    #[test]
    fn test_numeric_comparisons() {
        let data = json!({"count": 3});
        assert!(check(&Condition::new("{{data.count}}").with_test(">", 2), data.clone()));
        assert!(check(&Condition::new("{{data.count}}").with_test(">=", 3), data.clone()));
        assert!(check(&Condition::new("{{data.count}}").with_test("<", "4"), data.clone()));
        assert!(!check(&Condition::new("{{data.count}}").with_test("<=", 2), data.clone()));
        // Non-numeric operand degrades to false, not an error.
        assert!(!check(&Condition::new("{{data.count}}").with_test(">", "abc"), data));
    }

    #[test]
    fn test_operator_matching_is_case_sensitive() {
        let data = json!({"count": 3});
        assert!(!check(&Condition::new("{{data.count}}").with_test("GT", 2), data.clone()));
        assert!(!check(
            &Condition::new("{{data.count}}").with_test("Contains", 3),
            data
        ));
    }

    #[test]
    fn test_contains_per_shape() {
        assert!(check(
            &Condition::new("{{data.title}}").with_test("contains", "err"),
            json!({"title": "an error happened"})
        ));
        assert!(check(
            &Condition::new("{{data.tags}}").with_test("contains", "new"),
            json!({"tags": ["hot", "new"]})
        ));
        assert!(check(
            &Condition::new("{{data.flags}}").with_test("contains", "beta"),
            json!({"flags": {"beta": true}})
        ));
        assert!(!check(
            &Condition::new("{{data.tags}}").with_test("contains", "old"),
            json!({"tags": ["hot", "new"]})
        ));
    }

    #[test]
    fn test_string_affixes() {
        let data = json!({"name": "promo_banner"});
        assert!(check(
            &Condition::new("{{data.name}}").with_test("startswith", "promo"),
            data.clone()
        ));
        assert!(check(
            &Condition::new("{{data.name}}").with_test("endswith", "banner"),
            data.clone()
        ));
        assert!(!check(
            &Condition::new("{{data.name}}").with_test("startswith", "banner"),
            data
        ));
    }

    #[test]
    fn test_exists_and_empty() {
        let mut cond = Condition::new("{{data.user}}");
        cond.operator = Some("exists".into());
        assert!(check(&cond, json!({"user": "ann"})));
        assert!(!check(&cond, json!({"user": null})));
        assert!(!check(&cond, json!({})));

        let mut cond = Condition::new("{{data.items}}");
        cond.operator = Some("empty".into());
        assert!(check(&cond, json!({"items": []})));
        assert!(check(&cond, json!({})));
        assert!(!check(&cond, json!({"items": [1]})));

        cond.operator = Some("notempty".into());
        assert!(check(&cond, json!({"items": [1]})));
        assert!(!check(&cond, json!({})));
    }

    #[test]
    fn test_unknown_operator_is_false() {
        let cond = Condition::new("{{data.count}}").with_test("between", 2);
        assert!(!check(&cond, json!({"count": 3})));
    }

    #[test]
    fn test_three_way_composition() {
        // self && all(and) && any(or), verified against a hand-computed
        // truth table.
        let cases = [
            (true, true, true, true),
            (true, true, false, false),
            (true, false, true, false),
            (false, true, true, false),
        ];

        for (self_ok, and_ok, or_ok, expected) in cases {
            let flag = |ok: bool| {
                Condition::new(if ok { "yes" } else { "" })
            };
            let mut cond = flag(self_ok);
            cond.and = Some(vec![flag(true), flag(and_ok)]);
            cond.or = Some(vec![flag(false), flag(or_ok)]);
            assert_eq!(
                check(&cond, json!({})),
                expected,
                "self={self_ok} and={and_ok} or={or_ok}"
            );
        }
    }

    #[test]
    fn test_absent_groups_pass() {
        let cond = Condition::new("yes");
        assert!(check(&cond, json!({})));

        let mut with_or = Condition::new("yes");
        with_or.or = Some(vec![Condition::new("")]);
        assert!(!check(&with_or, json!({})));
    }
}
