//! Input model: tool configuration, modifier keys, mouse buttons, and the
//! interaction state machine's states.
//!
//! `ToolConfig` is everything the surrounding toolbar feeds the engine (stroke
//! color, width, opacity, mode, selected shape, pan toggle). `Modifiers`,
//! `Button`, and `WheelDelta` describe a single pointer or wheel event.
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::{
    DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, OPACITY_MAX, OPACITY_MIN, STROKE_WIDTH_MAX, STROKE_WIDTH_MIN,
};
use crate::doc::ShapeKind;

/// Error returned when a configuration value from the host cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The mode name is neither `"draw"` nor `"shape"`.
    #[error("unknown mode: {0}")]
    UnknownMode(String),
    /// The shape name is not one of the supported shapes.
    #[error("unknown shape: {0}")]
    UnknownShape(String),
    /// A numeric setting was NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    /// The configuration payload is not valid JSON for `ToolConfig`.
    #[error("invalid tool config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which kind of element a primary-button drag creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Freehand strokes.
    #[default]
    Draw,
    /// Geometric shapes; requires a selected `ShapeKind`.
    Shape,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draw" => Ok(Self::Draw),
            "shape" => Ok(Self::Shape),
            other => Err(ConfigError::UnknownMode(other.to_owned())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Draw => "draw",
            Self::Shape => "shape",
        })
    }
}

impl FromStr for ShapeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "triangle" => Ok(Self::Triangle),
            other => Err(ConfigError::UnknownShape(other.to_owned())),
        }
    }
}

/// Tool settings supplied by the toolbar.
///
/// `width` is in screen pixels; it is converted to world units when a draft
/// begins. Setters keep `width` and `opacity` inside their slider ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Stroke color as a CSS color string.
    pub color: String,
    /// Stroke width in screen pixels, `[1, 50]`.
    pub width: f64,
    /// Stroke opacity, `[0.1, 1.0]`.
    pub opacity: f64,
    /// Active drawing mode.
    pub mode: Mode,
    /// Shape drawn in shape mode, if one is selected.
    pub shape: Option<ShapeKind>,
    /// When set, primary-button drags pan the view instead of drawing.
    pub panning: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_STROKE_COLOR.to_owned(),
            width: DEFAULT_STROKE_WIDTH,
            opacity: OPACITY_MAX,
            mode: Mode::Draw,
            shape: None,
            panning: false,
        }
    }
}

impl ToolConfig {
    /// Parse a config from JSON, normalizing numeric fields into range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed payloads and
    /// `ConfigError::NotFinite` if width or opacity is not a finite number.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.normalized()
    }

    /// Clamp width and opacity into their ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFinite` if width or opacity is NaN or infinite.
    pub fn normalized(mut self) -> Result<Self, ConfigError> {
        self.set_width(self.width)?;
        self.set_opacity(self.opacity)?;
        Ok(self)
    }

    /// Set the stroke width, clamped to `[1, 50]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFinite` and keeps the old width for NaN/infinite input.
    pub fn set_width(&mut self, width: f64) -> Result<(), ConfigError> {
        self.width = finite("width", width)?.clamp(STROKE_WIDTH_MIN, STROKE_WIDTH_MAX);
        Ok(())
    }

    /// Set the stroke opacity, clamped to `[0.1, 1.0]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFinite` and keeps the old opacity for NaN/infinite input.
    pub fn set_opacity(&mut self, opacity: f64) -> Result<(), ConfigError> {
        self.opacity = finite("opacity", opacity)?.clamp(OPACITY_MIN, OPACITY_MAX);
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held. Browsers also set this for trackpad pinch wheel events.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger touch / pen contact).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Internal state for the interaction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A freehand path draft is being extended.
    DrawingPath,
    /// A shape draft is being sized.
    DrawingShape,
    /// The view is being dragged.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
}

impl InputState {
    /// Whether a draft is being built in this state.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::DrawingPath | Self::DrawingShape)
    }
}
