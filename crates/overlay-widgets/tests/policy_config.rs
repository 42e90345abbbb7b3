//! Loading overlay policies from TOML and JSON.

use overlay_core::{Anchor, Breakpoint};
use overlay_widgets::{ConfigError, OverlayConfig, OverlayKind, SizePreset, Variant};

#[test]
fn empty_policy_is_default() {
    let config = OverlayConfig::from_toml_str("").unwrap();
    assert_eq!(config, OverlayConfig::default());
}

#[test]
fn toml_policy_overrides_fields() {
    let config = OverlayConfig::from_toml_str(
        r#"
        variant = "persistent"
        anchor = "right"
        size = "wide"
        responsive = true
        responsive_breakpoint = "lg"
        mobile_variant = "temporary"
        close_on_escape = false
        animation_duration_ms = 0

        [swipe]
        distance_px = 64.0

        [focus]
        disable_restore_focus = true
        "#,
    )
    .unwrap();

    assert_eq!(config.kind, OverlayKind::Drawer);
    assert_eq!(config.variant, Variant::Persistent);
    assert_eq!(config.anchor, Anchor::Right);
    assert_eq!(config.size, SizePreset::Wide);
    assert!(config.responsive);
    assert_eq!(config.responsive_breakpoint, Breakpoint::Lg);
    assert!(!config.close_on_escape);
    assert!(config.close_on_backdrop);
    assert_eq!(config.animation_duration_ms, 0);
    assert_eq!(config.swipe.distance_px, 64.0);
    assert_eq!(config.swipe.timeout_ms, 300);
    assert!(config.focus.disable_restore_focus);
    assert_eq!(config.effective_variant(Some(Breakpoint::Md)), Variant::Temporary);
}

#[test]
fn json_policy_for_dialog() {
    let config = OverlayConfig::from_json_str(
        r#"{ "kind": "dialog", "size": "compact", "width": 480, "close_on_backdrop": false }"#,
    )
    .unwrap();
    assert_eq!(config.kind, OverlayKind::Dialog);
    assert_eq!(config.width, Some(480));
    assert!(!config.close_on_backdrop);
}

#[test]
fn toml_round_trip_preserves_config() {
    let original = OverlayConfig::drawer(Anchor::Bottom)
        .variant(Variant::Mini)
        .height(300)
        .rail_size(56)
        .responsive(Breakpoint::Sm, Variant::Temporary);
    let text = original.to_toml_string().unwrap();
    assert_eq!(OverlayConfig::from_toml_str(&text).unwrap(), original);
}

#[test]
fn parse_errors_are_reported() {
    let err = OverlayConfig::from_toml_str("variant = \"floating\"").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err}");
    assert!(err.to_string().starts_with("invalid TOML policy"));

    let err = OverlayConfig::from_json_str("{ \"anchor\": 3 }").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)), "{err}");
}

#[test]
fn loaded_policies_are_validated() {
    let err = OverlayConfig::from_toml_str("[swipe]\nvelocity_px_per_ms = -0.5").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidThreshold {
            name: "velocity_px_per_ms",
            ..
        }
    ));

    let err = OverlayConfig::from_json_str(r#"{ "width": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroDimension { .. }));

    let err = OverlayConfig::from_toml_str("rail_size_px = 0").unwrap_err();
    assert!(matches!(err, ConfigError::ZeroRailSize));
}
