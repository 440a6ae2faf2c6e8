//! View transform: pan/zoom state and screen ⇄ world conversions.
//!
//! Screen coordinates are CSS pixels relative to the drawing surface origin, as
//! delivered by pointer events. World coordinates are the logical scene space
//! every stored point lives in. The camera is the only place the two meet.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ZOOM_BUTTON_STEP, ZOOM_MAX, ZOOM_MIN};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Clamp a zoom factor into the canonical `[ZOOM_MIN, ZOOM_MAX]` range.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}

/// Camera state for pan/zoom on the canvas.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom) and always lies in `[ZOOM_MIN, ZOOM_MAX]`
/// when mutated through the methods below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Shift the pan offset by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Set the zoom factor, clamped to the canonical range.
    ///
    /// Returns `true` if the zoom actually changed. `NaN` is ignored.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if zoom.is_nan() {
            return false;
        }
        let next = clamp_zoom(zoom);
        #[allow(clippy::float_cmp)]
        let changed = next != self.zoom;
        self.zoom = next;
        changed
    }

    /// Multiply the zoom factor by `factor`, then clamp.
    pub fn scale_zoom(&mut self, factor: f64) -> bool {
        self.set_zoom(self.zoom * factor)
    }

    /// Toolbar "zoom in" button: one additive step up.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom + ZOOM_BUTTON_STEP)
    }

    /// Toolbar "zoom out" button: one additive step down.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom - ZOOM_BUTTON_STEP)
    }
}
