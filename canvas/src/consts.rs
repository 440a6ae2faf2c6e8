//! Shared numeric constants for the canvas crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest zoom factor reachable by any input path.
pub const ZOOM_MIN: f64 = 0.5;

/// Largest zoom factor reachable by any input path.
pub const ZOOM_MAX: f64 = 3.0;

/// Multiplier applied per zoom-modifier wheel notch scrolling down.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Multiplier applied per zoom-modifier wheel notch scrolling up.
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Additive step used by the toolbar zoom buttons.
pub const ZOOM_BUTTON_STEP: f64 = 0.1;

// ── Stroke configuration ────────────────────────────────────────

/// Smallest stroke width the toolbar can supply, in screen pixels.
pub const STROKE_WIDTH_MIN: f64 = 1.0;

/// Largest stroke width the toolbar can supply, in screen pixels.
pub const STROKE_WIDTH_MAX: f64 = 50.0;

/// Lowest stroke opacity the toolbar can supply.
pub const OPACITY_MIN: f64 = 0.1;

/// Highest stroke opacity (fully opaque).
pub const OPACITY_MAX: f64 = 1.0;

/// Default stroke color for a fresh session.
pub const DEFAULT_STROKE_COLOR: &str = "black";

/// Default stroke width for a fresh session, in screen pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 5.0;
