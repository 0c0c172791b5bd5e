use super::*;

use serde_json::json;

#[test]
fn missing_options_use_defaults() {
    let config = parse_view_config(None).expect("config");
    assert_eq!(config, ViewConfig::default());
}

#[test]
fn partial_options_keep_other_defaults() {
    let config = parse_view_config(Some(r#"{"show_value": true, "cursor": "crosshair"}"#)).expect("config");
    assert!(config.show_value);
    assert_eq!(config.cursor, "crosshair");
    assert_eq!(config.tooltip, ViewConfig::default().tooltip);
}

#[test]
fn placeholder_option_is_read() {
    let config = parse_view_config(Some(r#"{"placeholder_src": "data:image/png;base64,AA=="}"#)).expect("config");
    assert_eq!(config.placeholder_src.as_deref(), Some("data:image/png;base64,AA=="));
}

#[test]
fn malformed_options_are_rejected() {
    let err = parse_view_config(Some(r#"{"show_value": "yes"}"#)).expect_err("invalid");
    assert!(matches!(err, BindingError::Json { what: "view options", .. }));
    assert!(err.to_string().starts_with("invalid view options:"));
}

#[test]
fn missing_state_is_empty() {
    assert!(parse_state_map(None).expect("state").is_empty());
}

#[test]
fn state_map_is_parsed() {
    let state = parse_state_map(Some(r#"{"value": "v", "resolution": [2, 3]}"#)).expect("state");
    assert_eq!(state.get("resolution"), Some(&json!([2, 3])));
}

#[test]
fn non_object_state_is_rejected() {
    let err = parse_state_map(Some("[1, 2]")).expect_err("invalid");
    assert!(matches!(err, BindingError::Json { what: "initial state", .. }));
}
