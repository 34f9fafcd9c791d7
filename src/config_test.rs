#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn default_matches_stock_page() {
    let config = SceneConfig::default();
    assert_eq!(config.layout.left_margin, 100.0);
    assert_eq!(config.layout.step_x, 50.0);
    assert_eq!(config.layout.baseline_y, 150.0);
    assert_eq!(config.layout.row_step_y, 60.0);
    assert_eq!(config.letter.font_size, 36.0);
    assert_eq!(config.letter.color, "#ffffff");
    assert_eq!(config.letter.font_family, FontFamily::Arial);
    assert_eq!(config.letter.rotation, 0.0);
    assert_eq!((config.viewport_width, config.viewport_height), (800.0, 600.0));
    assert!(config.capabilities.editing);
    assert!(config.capabilities.balls);
    assert_eq!(config.capabilities.drag_policy, DragPolicy::SelectFirst);
}

#[test]
fn default_validates() {
    assert!(SceneConfig::default().validate().is_ok());
}

#[test]
fn empty_json_is_default() {
    let config = SceneConfig::from_json("{}").unwrap();
    assert_eq!(config, SceneConfig::default());
}

#[test]
fn partial_json_overrides_only_named_keys() {
    let config = SceneConfig::from_json(
        r#"{
            "layout": { "baseline_y": 80 },
            "letter": { "font_family": "Georgia" },
            "capabilities": { "balls": false, "drag_policy": "immediate" }
        }"#,
    )
    .unwrap();
    assert_eq!(config.layout.baseline_y, 80.0);
    assert_eq!(config.layout.step_x, 50.0);
    assert_eq!(config.letter.font_family, FontFamily::Georgia);
    assert_eq!(config.letter.font_size, 36.0);
    assert!(!config.capabilities.balls);
    assert!(config.capabilities.editing);
    assert_eq!(config.capabilities.drag_policy, DragPolicy::Immediate);
}

#[test]
fn malformed_json_is_parse_error() {
    assert!(matches!(SceneConfig::from_json("{ not json"), Err(ConfigError::Parse(_))));
}

#[test]
fn unknown_drag_policy_is_parse_error() {
    let result = SceneConfig::from_json(r#"{ "capabilities": { "drag_policy": "sometimes" } }"#);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn zero_step_is_invalid() {
    let result = SceneConfig::from_json(r#"{ "layout": { "step_x": 0 } }"#);
    assert!(matches!(result, Err(ConfigError::Invalid { field: "layout.step_x", .. })));
}

#[test]
fn bad_default_color_is_invalid() {
    let result = SceneConfig::from_json(r##"{ "letter": { "color": "#fff" } }"##);
    assert!(matches!(result, Err(ConfigError::Invalid { field: "letter.color", .. })));
}

#[test]
fn non_positive_viewport_is_invalid() {
    let result = SceneConfig::from_json(r#"{ "viewport_width": -1 }"#);
    assert!(matches!(result, Err(ConfigError::Invalid { field: "viewport", .. })));
}

#[test]
fn invalid_error_message() {
    let err = ConfigError::Invalid { field: "ball_size", reason: "must be positive" };
    assert_eq!(err.to_string(), "invalid config value for ball_size: must be positive");
}
