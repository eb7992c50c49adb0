use serde_json::json;
use sdui::{parse_config, plan_screen, Color, ComponentSet, HostContext};

fn plan(config_json: &str, data: serde_json::Value) -> sdui::RenderPlan {
    let config = parse_config(config_json).unwrap();
    let host = HostContext::new()
        .with_device("platform", "test")
        .with_screen("width", 1080);
    let components = ComponentSet::new();
    plan_screen(&config, &data, &host, &components)
}

/// A data reference in a prop resolves against the runtime data.
#[test]
fn test_greeting_resolves_from_data() {
    let plan = plan(
        r#"{"screenId":"s","root":{"type":"text","props":{"content":"Hi {{data.name}}"}}}"#,
        json!({"name": "Ann"}),
    );

    let root = plan.root.unwrap();
    assert!(plan.diagnostics.is_empty());
    assert_eq!(root.node_type, "text");
    assert!(root.children.is_empty());
    assert_eq!(root.resolved_props.get("content"), Some(&json!("Hi Ann")));
}

/// A false condition excludes the subtree; the parent still renders.
#[test]
fn test_condition_prunes_subtree_only() {
    let config = r#"{
        "screenId": "s",
        "root": {
            "type": "column",
            "children": [
                {
                    "type": "badge",
                    "condition": {"if": "{{data.count}}", "operator": ">", "value": 0}
                },
                {"type": "text", "props": {"content": "always"}}
            ]
        }
    }"#;

    let excluded = plan(config, json!({"count": 0}));
    let root = excluded.root.unwrap();
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].node_type, "text");

    // Same screen, fresh data: the condition re-evaluates every pass.
    let included = plan(config, json!({"count": 3}));
    assert_eq!(included.root.unwrap().children.len(), 2);
}

/// Hidden and gone nodes never reach the plan.
#[test]
fn test_visibility_excludes_nodes() {
    let plan = plan(
        r#"{
            "screenId": "s",
            "root": {
                "type": "column",
                "children": [
                    {"type": "text", "visibility": "hidden"},
                    {"type": "text", "visibility": "gone"},
                    {"type": "text"}
                ]
            }
        }"#,
        json!({}),
    );

    assert_eq!(plan.root.unwrap().children.len(), 1);
}

/// Styles resolve theme references into concrete values; the screen theme
/// overrides the defaults it names and inherits the rest.
#[test]
fn test_style_resolution_uses_merged_theme() {
    let plan = plan(
        r##"{
            "screenId": "s",
            "theme": {"colors": {"primary": "#102030"}},
            "root": {
                "type": "card",
                "style": {
                    "backgroundColor": "{{colors.primary}}",
                    "textColor": "{{colors.text}}",
                    "padding": "{{spacing.md}}",
                    "cornerRadius": "md"
                }
            }
        }"##,
        json!({}),
    );

    let style = plan.root.unwrap().resolved_style;
    assert_eq!(style.background_color, Some(Color::rgb(0x10, 0x20, 0x30)));
    // "text" comes from the default theme surviving the merge.
    assert_eq!(style.text_color, Some(Color::rgb(0x11, 0x18, 0x27)));
    assert_eq!(style.padding, Some(16.0));
    assert_eq!(style.corner_radius, Some(8.0));
}

/// An unknown component type is a per-node diagnostic; siblings still plan.
#[test]
fn test_unknown_component_is_recoverable() {
    let config = parse_config(
        r#"{
            "screenId": "s",
            "root": {
                "type": "column",
                "children": [
                    {"type": "hologram"},
                    {"type": "text", "props": {"content": "still here"}}
                ]
            }
        }"#,
    )
    .unwrap();

    let data = json!({});
    let host = HostContext::new();
    let mut components = ComponentSet::new();
    components.register("column").register("text");

    let plan = plan_screen(&config, &data, &host, &components);
    let root = plan.root.unwrap();
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].node_type, "text");

    assert_eq!(plan.diagnostics.len(), 1);
    assert!(plan.diagnostics[0]
        .to_string()
        .contains("no component registered for node type 'hologram'"));
}

/// Device and screen references resolve from the host context.
#[test]
fn test_host_context_references() {
    let plan = plan(
        r#"{
            "screenId": "s",
            "root": {
                "type": "text",
                "props": {"content": "on {{device.platform}} at {{screen.width}}px"}
            }
        }"#,
        json!({}),
    );

    assert_eq!(
        plan.root.unwrap().resolved_props.get("content"),
        Some(&json!("on test at 1080px"))
    );
}

/// Unresolvable references stay literal in the plan so the failure is
/// visible downstream.
#[test]
fn test_unresolved_prop_reference_stays_literal() {
    let plan = plan(
        r#"{"screenId":"s","root":{"type":"text","props":{"content":"{{data.missing}}"}}}"#,
        json!({}),
    );

    assert_eq!(
        plan.root.unwrap().resolved_props.get("content"),
        Some(&json!("{{data.missing}}"))
    );
}

/// Props resolve recursively through nested maps and lists, keeping types.
#[test]
fn test_nested_prop_resolution() {
    let plan = plan(
        r#"{
            "screenId": "s",
            "root": {
                "type": "list",
                "props": {
                    "rows": [
                        {"label": "{{data.items.0}}", "pad": "{{spacing.sm}}"},
                        {"label": "{{data.items.1}}"}
                    ]
                }
            }
        }"#,
        json!({"items": ["first", "second"]}),
    );

    assert_eq!(
        plan.root.unwrap().resolved_props.get("rows"),
        Some(&json!([
            {"label": "first", "pad": 8},
            {"label": "second"}
        ]))
    );
}
