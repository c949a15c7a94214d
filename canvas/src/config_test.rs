#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_surface_is_1080_by_720() {
    let config = CanvasConfig::default();
    assert_eq!(config.surface(), Surface::new(1080, 720));
}

#[test]
fn default_overlay_matches_initial_placement() {
    let config = CanvasConfig::default();
    assert_eq!(config.initial_overlay, Rect::new(400.0, 150.0, 280.0, 140.0));
}

#[test]
fn default_resize_tunables() {
    let config = CanvasConfig::default();
    assert_eq!(config.min_overlay_width, 20.0);
    assert_eq!(config.wheel_gain, -0.1);
}

#[test]
fn default_is_valid() {
    assert!(CanvasConfig::default().validate().is_ok());
}

// =============================================================
// JSON
// =============================================================

#[test]
fn from_json_empty_object_is_default() {
    let config = CanvasConfig::from_json("{}").unwrap();
    assert_eq!(config, CanvasConfig::default());
}

#[test]
fn from_json_partial_override() {
    let config = CanvasConfig::from_json(r#"{"surface_width": 800, "export_filename": "out.png"}"#).unwrap();
    assert_eq!(config.surface_width, 800);
    assert_eq!(config.surface_height, 720);
    assert_eq!(config.export_filename, "out.png");
}

#[test]
fn from_json_malformed_is_json_error() {
    let err = CanvasConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn from_json_zero_surface_is_invalid() {
    let err = CanvasConfig::from_json(r#"{"surface_height": 0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("surface"));
}

// =============================================================
// validate
// =============================================================

#[test]
fn validate_rejects_non_positive_min_width() {
    let config = CanvasConfig { min_overlay_width: 0.0, ..CanvasConfig::default() };
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_nan_gain() {
    let config = CanvasConfig { wheel_gain: f64::NAN, ..CanvasConfig::default() };
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_overlay_below_floor() {
    let config = CanvasConfig {
        initial_overlay: Rect::new(0.0, 0.0, 10.0, 10.0),
        ..CanvasConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_blank_filename() {
    let config = CanvasConfig { export_filename: "  ".into(), ..CanvasConfig::default() };
    assert!(config.validate().is_err());
}

// =============================================================
// Environment
// =============================================================

#[test]
fn env_parse_missing_key_uses_default() {
    assert_eq!(env_parse("TRYON_TEST_SURELY_UNSET_KEY", 42u32), 42);
}
