use serde_json::json;
use sdui::{default_theme, HostContext, Resolver, Theme};

fn empty_host() -> HostContext {
    HostContext::new()
}

/// A theme reference resolves to the stored value when present; the literal
/// string survives, untouched, when absent.
#[test]
fn test_reference_hit_and_miss() {
    let theme = Theme {
        colors: [("primary".to_string(), "#336699".to_string())]
            .into_iter()
            .collect(),
        ..Theme::default()
    };
    let data = json!({});
    let host = empty_host();
    let resolver = Resolver::new(&theme, &data, &host);

    assert_eq!(
        resolver.resolve("{{colors.primary}}"),
        Some(json!("#336699"))
    );
    assert_eq!(resolver.resolve("{{colors.missing}}"), None);
    // The literal text is preserved in interpolation, never blanked out.
    assert_eq!(
        resolver.replace_variables("bg: {{colors.missing}}"),
        "bg: {{colors.missing}}"
    );
}

/// Merging with the defaults fills gaps without clobbering overrides, and a
/// second merge changes nothing.
#[test]
fn test_merge_with_defaults_semantics() {
    let theme = Theme {
        colors: [("primary".to_string(), "#000000".to_string())]
            .into_iter()
            .collect(),
        ..Theme::default()
    };

    let merged = theme.merge_with_defaults();
    assert_eq!(merged.colors.get("primary"), Some(&"#000000".to_string()));
    assert_eq!(
        merged.colors.get("background"),
        default_theme().colors.get("background")
    );
    assert_eq!(merged.spacing, default_theme().spacing);

    assert_eq!(merged.merge_with_defaults(), merged);
}

/// Data references traverse nested maps and index lists; host namespaces
/// come from the injected context.
#[test]
fn test_data_and_host_references() {
    let theme = Theme::default();
    let data = json!({
        "cart": {"items": [{"name": "socks"}, {"name": "hat"}], "total": 12.5}
    });
    let host = HostContext::new()
        .with_device("platform", "android")
        .with_screen("width", 1080);
    let resolver = Resolver::new(&theme, &data, &host);

    assert_eq!(
        resolver.resolve("{{data.cart.items.1.name}}"),
        Some(json!("hat"))
    );
    assert_eq!(resolver.resolve("{{data.cart.total}}"), Some(json!(12.5)));
    assert_eq!(
        resolver.resolve("{{device.platform}}"),
        Some(json!("android"))
    );
    assert_eq!(resolver.resolve("{{screen.width}}"), Some(json!(1080)));
    assert_eq!(resolver.resolve("{{screen.height}}"), None);
}

/// Multiple occurrences inside one string all substitute independently.
#[test]
fn test_interpolation_of_longer_strings() {
    let theme = Theme::default();
    let data = json!({"first": "Ann", "city": "Oslo"});
    let host = empty_host();
    let resolver = Resolver::new(&theme, &data, &host);

    assert_eq!(
        resolver.replace_variables("{{data.first}} lives in {{data.city}}."),
        "Ann lives in Oslo."
    );
}
