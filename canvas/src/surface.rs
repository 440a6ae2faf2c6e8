//! Drawing surfaces: the immediate-mode API the renderer draws through.
//!
//! [`Surface`] is the subset of the 2D canvas API the renderer needs. It has
//! two implementations:
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`web_sys::CanvasRenderingContext2d`] | The browser canvas |
//! | [`DisplayList`] | Retained command list for headless runs and tests |
//!
//! This is the only module that touches `CanvasRenderingContext2d`.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// A drawing call failed in the backend.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// The backend rejected the call; carries the backend's error text.
    #[error("surface call failed: {0}")]
    Backend(String),
}

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        Self::Backend(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Line end style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl LineCap {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Line corner style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

/// Immediate-mode 2D drawing target.
///
/// Coordinates passed to path and shape calls are transformed by the current
/// transform, exactly as on a canvas 2D context.
pub trait Surface {
    /// Replace the current transform with the matrix `[a c e; b d f]`.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceError` if the backend rejects the call.
    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), SurfaceError>;

    /// Clear a rectangle to transparent.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Push the drawing state (transform, stroke style, alpha, line settings).
    fn save(&mut self);

    /// Pop the drawing state pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    /// Append a translation to the current transform.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceError` if the backend rejects the call.
    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError>;

    /// Append a scale to the current transform.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceError` if the backend rejects the call.
    fn scale(&mut self, x: f64, y: f64) -> Result<(), SurfaceError>;

    fn set_stroke_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);

    /// Add a circular arc to the current path.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceError` if the backend rejects the call (e.g. negative radius).
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), SurfaceError>;

    /// Stroke the current path.
    fn stroke(&mut self);

    /// Stroke an axis-aligned rectangle outline.
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

// =============================================================
// Browser backend
// =============================================================

impl Surface for CanvasRenderingContext2d {
    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), SurfaceError> {
        CanvasRenderingContext2d::set_transform(self, a, b, c, d, e, f)?;
        Ok(())
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        CanvasRenderingContext2d::translate(self, x, y)?;
        Ok(())
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        CanvasRenderingContext2d::scale(self, x, y)?;
        Ok(())
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        CanvasRenderingContext2d::set_global_alpha(self, alpha);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        CanvasRenderingContext2d::set_line_cap(self, cap.as_str());
    }

    fn set_line_join(&mut self, join: LineJoin) {
        CanvasRenderingContext2d::set_line_join(self, join.as_str());
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), SurfaceError> {
        CanvasRenderingContext2d::arc(self, x, y, radius, start, end)?;
        Ok(())
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::stroke_rect(self, x, y, width, height);
    }
}

// =============================================================
// Retained backend
// =============================================================

/// One recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetTransform([f64; 6]),
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Scale { x: f64, y: f64 },
    StrokeColor(String),
    LineWidth(f64),
    GlobalAlpha(f64),
    LineCap(LineCap),
    LineJoin(LineJoin),
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    ClosePath,
    Arc { x: f64, y: f64, radius: f64, start: f64, end: f64 },
    Stroke,
    StrokeRect { x: f64, y: f64, width: f64, height: f64 },
}

/// A [`Surface`] that records every call instead of rasterizing.
///
/// Negative arc radii are rejected the same way a browser context rejects them.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command recorded so far, oldest first.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands recorded after the most recent `ClearRect`, i.e. the content
    /// of the current frame including any segments appended since.
    #[must_use]
    pub fn current_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::ClearRect { .. }))
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    /// Number of `Stroke` and `StrokeRect` calls recorded.
    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke | DrawCommand::StrokeRect { .. }))
            .count()
    }

    /// Drop all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for DisplayList {
    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::SetTransform([a, b, c, d, e, f]));
        Ok(())
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Translate { x, y });
        Ok(())
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Scale { x, y });
        Ok(())
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::StrokeColor(color.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.commands.push(DrawCommand::LineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.commands.push(DrawCommand::LineJoin(join));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), SurfaceError> {
        if radius < 0.0 {
            return Err(SurfaceError::Backend(format!("negative arc radius {radius}")));
        }
        self.commands.push(DrawCommand::Arc { x, y, radius, start, end });
        Ok(())
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::StrokeRect { x, y, width, height });
    }
}
