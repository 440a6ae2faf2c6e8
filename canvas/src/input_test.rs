#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Mode
// =============================================================

#[test]
fn mode_default_is_draw() {
    assert_eq!(Mode::default(), Mode::Draw);
}

#[test]
fn mode_from_str() {
    assert_eq!("draw".parse::<Mode>().unwrap(), Mode::Draw);
    assert_eq!("shape".parse::<Mode>().unwrap(), Mode::Shape);
    assert!(matches!("erase".parse::<Mode>(), Err(ConfigError::UnknownMode(m)) if m == "erase"));
}

#[test]
fn mode_display_round_trips_through_from_str() {
    for mode in [Mode::Draw, Mode::Shape] {
        assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
    }
}

// =============================================================
// ShapeKind parsing
// =============================================================

#[test]
fn shape_kind_from_str() {
    assert_eq!("rectangle".parse::<ShapeKind>().unwrap(), ShapeKind::Rectangle);
    assert_eq!("circle".parse::<ShapeKind>().unwrap(), ShapeKind::Circle);
    assert_eq!("triangle".parse::<ShapeKind>().unwrap(), ShapeKind::Triangle);
    assert!(matches!("hexagon".parse::<ShapeKind>(), Err(ConfigError::UnknownShape(_))));
}

#[test]
fn config_error_messages() {
    assert_eq!(ConfigError::UnknownMode("x".into()).to_string(), "unknown mode: x");
    let err = ConfigError::NotFinite { field: "width", value: f64::INFINITY };
    assert_eq!(err.to_string(), "width must be finite, got inf");
}

// =============================================================
// ToolConfig
// =============================================================

#[test]
fn tool_config_defaults_match_fresh_session() {
    let config = ToolConfig::default();
    assert_eq!(config.color, "black");
    assert_eq!(config.width, 5.0);
    assert_eq!(config.opacity, 1.0);
    assert_eq!(config.mode, Mode::Draw);
    assert_eq!(config.shape, None);
    assert!(!config.panning);
}

#[test]
fn set_width_clamps_to_slider_range() {
    let mut config = ToolConfig::default();
    config.set_width(0.0).unwrap();
    assert_eq!(config.width, 1.0);
    config.set_width(80.0).unwrap();
    assert_eq!(config.width, 50.0);
    config.set_width(12.0).unwrap();
    assert_eq!(config.width, 12.0);
}

#[test]
fn set_width_rejects_nan_and_keeps_old_value() {
    let mut config = ToolConfig::default();
    assert!(config.set_width(f64::NAN).is_err());
    assert_eq!(config.width, 5.0);
}

#[test]
fn set_opacity_clamps_to_slider_range() {
    let mut config = ToolConfig::default();
    config.set_opacity(0.0).unwrap();
    assert_eq!(config.opacity, 0.1);
    config.set_opacity(2.0).unwrap();
    assert_eq!(config.opacity, 1.0);
    assert!(config.set_opacity(f64::INFINITY).is_err());
    assert_eq!(config.opacity, 1.0);
}

#[test]
fn from_json_fills_defaults_and_clamps() {
    let config = ToolConfig::from_json(r#"{"color":"red","width":120,"mode":"shape","shape":"circle"}"#).unwrap();
    assert_eq!(config.color, "red");
    assert_eq!(config.width, 50.0);
    assert_eq!(config.opacity, 1.0);
    assert_eq!(config.mode, Mode::Shape);
    assert_eq!(config.shape, Some(ShapeKind::Circle));
}

#[test]
fn from_json_rejects_unknown_shape() {
    assert!(matches!(ToolConfig::from_json(r#"{"shape":"hexagon"}"#), Err(ConfigError::Json(_))));
}

#[test]
fn from_json_accepts_null_shape() {
    let config = ToolConfig::from_json(r#"{"mode":"shape","shape":null}"#).unwrap();
    assert_eq!(config.shape, None);
}

// =============================================================
// Modifiers / WheelDelta / InputState
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
}

#[test]
fn wheel_delta_fields() {
    let d = WheelDelta { dx: -3.0, dy: 7.5 };
    assert_eq!(d.dx, -3.0);
    assert_eq!(d.dy, 7.5);
}

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
}

#[test]
fn input_state_is_drawing() {
    assert!(!InputState::Idle.is_drawing());
    assert!(InputState::DrawingPath.is_drawing());
    assert!(InputState::DrawingShape.is_drawing());
    assert!(!InputState::Panning { last_screen: Point::new(0.0, 0.0) }.is_drawing());
}

#[test]
fn button_defaults_to_primary_and_parses_lowercase() {
    assert_eq!(Button::default(), Button::Primary);
    let b: Button = serde_json::from_str(r#""middle""#).unwrap();
    assert_eq!(b, Button::Middle);
}

#[test]
fn normalized_clamps_and_rejects_non_finite() {
    let config = ToolConfig { width: 0.0, opacity: 3.0, ..ToolConfig::default() }.normalized().unwrap();
    assert_eq!(config.width, 1.0);
    assert_eq!(config.opacity, 1.0);
    let bad = ToolConfig { width: f64::NAN, ..ToolConfig::default() };
    assert!(matches!(bad.normalized(), Err(ConfigError::NotFinite { field: "width", .. })));
}
