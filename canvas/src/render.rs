//! Rendering: draws the scene to a [`Surface`].
//!
//! The renderer receives read-only views of the scene, camera, and viewport
//! and produces drawing calls. It does not mutate application state and keeps
//! nothing between calls.
//!
//! Two strategies share one contract:
//!
//! - [`Redraw::Full`]: clear everything and draw every committed element, then
//!   the draft, under a single combined pan + zoom transform.
//! - [`Redraw::Segment`]: append one stroke segment of the path draft without
//!   clearing. Only valid for opaque drafts, where the union of round-capped
//!   segments covers exactly what the full polyline covers.
//!
//! All fallible surface calls propagate `SurfaceError`. The top-level caller
//! ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use crate::camera::{Camera, Point};
use crate::doc::{Bounds, Draft, Element, Scene, ShapeKind, StrokeStyle};
use crate::surface::{LineCap, LineJoin, Surface, SurfaceError};

/// Drawing surface dimensions in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 0.0, height: 0.0, dpr: 1.0 }
    }
}

impl Viewport {
    /// Backing-store size in device pixels (`css size × dpr`, rounded).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width * self.dpr).round().max(0.0);
        let h = (self.height * self.dpr).round().max(0.0);
        (w as u32, h as u32)
    }
}

/// Which render strategy a state change calls for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Redraw {
    /// Clear and redraw the whole scene.
    Full,
    /// Append the path-draft segment `from → to` on top of what is already drawn.
    Segment { from: Point, to: Point },
}

/// Execute a redraw request against `surface`.
///
/// A segment request without an active path draft falls back to a full frame.
///
/// # Errors
///
/// Returns `Err` if any surface call fails.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    camera: &Camera,
    viewport: &Viewport,
    redraw: Redraw,
) -> Result<(), SurfaceError> {
    match (redraw, scene.draft()) {
        (Redraw::Segment { from, to }, Some(Draft::Path { style, .. })) => {
            render_segment(surface, camera, viewport, style, from, to)
        }
        _ => render_frame(surface, scene, camera, viewport),
    }
}

/// Draw the full frame: committed elements in order, then the draft.
///
/// # Errors
///
/// Returns `Err` if any surface call fails.
pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    camera: &Camera,
    viewport: &Viewport,
) -> Result<(), SurfaceError> {
    // Layer 1: clear in device-pixel space.
    begin_layer(surface, viewport)?;
    surface.clear_rect(0.0, 0.0, viewport.width, viewport.height);

    // Layer 2: scene content under the camera.
    surface.save();
    let result = draw_scene(surface, scene, camera);
    surface.restore();
    result
}

/// Stroke one path segment on top of the current frame.
///
/// `from == to` draws a round dot.
///
/// # Errors
///
/// Returns `Err` if any surface call fails.
pub fn render_segment<S: Surface + ?Sized>(
    surface: &mut S,
    camera: &Camera,
    viewport: &Viewport,
    style: &StrokeStyle,
    from: Point,
    to: Point,
) -> Result<(), SurfaceError> {
    begin_layer(surface, viewport)?;
    surface.save();
    let result = draw_segment(surface, camera, style, from, to);
    surface.restore();
    result
}

fn begin_layer<S: Surface + ?Sized>(surface: &mut S, viewport: &Viewport) -> Result<(), SurfaceError> {
    surface.set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0)?;
    surface.set_line_cap(LineCap::Round);
    surface.set_line_join(LineJoin::Round);
    Ok(())
}

fn apply_camera<S: Surface + ?Sized>(surface: &mut S, camera: &Camera) -> Result<(), SurfaceError> {
    surface.translate(camera.pan_x, camera.pan_y)?;
    surface.scale(camera.zoom, camera.zoom)
}

fn draw_scene<S: Surface + ?Sized>(surface: &mut S, scene: &Scene, camera: &Camera) -> Result<(), SurfaceError> {
    apply_camera(surface, camera)?;
    for element in scene.elements() {
        draw_element(surface, element)?;
    }
    match scene.draft() {
        Some(Draft::Path { style, points }) => draw_path(surface, style, points),
        Some(Draft::Shape { kind, style, origin, current }) => {
            draw_shape(surface, *kind, *origin, current.x - origin.x, current.y - origin.y, style)
        }
        None => Ok(()),
    }
}

fn draw_segment<S: Surface + ?Sized>(
    surface: &mut S,
    camera: &Camera,
    style: &StrokeStyle,
    from: Point,
    to: Point,
) -> Result<(), SurfaceError> {
    apply_camera(surface, camera)?;
    apply_stroke_style(surface, style);
    surface.begin_path();
    surface.move_to(from.x, from.y);
    surface.line_to(to.x, to.y);
    surface.stroke();
    Ok(())
}

// =============================================================
// Element renderers
// =============================================================

fn draw_element<S: Surface + ?Sized>(surface: &mut S, element: &Element) -> Result<(), SurfaceError> {
    match element {
        Element::Path(path) => draw_path(surface, &path.style, &path.points),
        Element::Shape(shape) => draw_shape(surface, shape.kind, shape.origin, shape.width, shape.height, &shape.style),
    }
}

fn draw_path<S: Surface + ?Sized>(surface: &mut S, style: &StrokeStyle, points: &[Point]) -> Result<(), SurfaceError> {
    let Some((first, rest)) = points.split_first() else {
        return Ok(());
    };
    apply_stroke_style(surface, style);
    surface.begin_path();
    surface.move_to(first.x, first.y);
    if rest.is_empty() {
        // Zero-length subpath: round caps turn it into a dot.
        surface.line_to(first.x, first.y);
    }
    for p in rest {
        surface.line_to(p.x, p.y);
    }
    surface.stroke();
    Ok(())
}

fn draw_shape<S: Surface + ?Sized>(
    surface: &mut S,
    kind: ShapeKind,
    origin: Point,
    width: f64,
    height: f64,
    style: &StrokeStyle,
) -> Result<(), SurfaceError> {
    apply_stroke_style(surface, style);
    match kind {
        ShapeKind::Rectangle => {
            let b = Bounds::from_corner(origin, width, height);
            surface.stroke_rect(b.x, b.y, b.width, b.height);
        }
        ShapeKind::Circle => {
            // Horizontal extent is the diameter; height only moves the centre.
            surface.begin_path();
            surface.arc(origin.x + width / 2.0, origin.y + height / 2.0, width.abs() / 2.0, 0.0, 2.0 * PI)?;
            surface.stroke();
        }
        ShapeKind::Triangle => {
            surface.begin_path();
            surface.move_to(origin.x, origin.y + height);
            surface.line_to(origin.x + width / 2.0, origin.y);
            surface.line_to(origin.x + width, origin.y + height);
            surface.close_path();
            surface.stroke();
        }
    }
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Apply stroke color, width, and opacity.
fn apply_stroke_style<S: Surface + ?Sized>(surface: &mut S, style: &StrokeStyle) {
    surface.set_stroke_color(&style.color);
    surface.set_line_width(style.width);
    surface.set_global_alpha(style.opacity);
}
