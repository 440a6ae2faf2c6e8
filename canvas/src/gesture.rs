//! Gesture input adapter: wheel and pinch events → camera changes.
//!
//! Nothing here knows about the scene or drafts. Each handler mutates the
//! [`Camera`] and reports whether it changed so the caller can decide to
//! redraw.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::camera::{Camera, Point};
use crate::consts::{WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use crate::input::{Modifiers, WheelDelta};

/// Zoom multiplier for one zoom-modifier wheel event, or `None` for a zero delta.
#[must_use]
pub fn wheel_zoom_factor(dy: f64) -> Option<f64> {
    if dy > 0.0 {
        Some(WHEEL_ZOOM_OUT)
    } else if dy < 0.0 {
        Some(WHEEL_ZOOM_IN)
    } else {
        None
    }
}

/// Apply a wheel event to the camera.
///
/// With ctrl held (also how browsers report trackpad pinch) the event zooms;
/// otherwise it pans by the inverted delta, so content follows the fingers.
#[allow(clippy::float_cmp)]
pub fn apply_wheel(camera: &mut Camera, delta: WheelDelta, modifiers: Modifiers) -> bool {
    if modifiers.ctrl {
        return wheel_zoom_factor(delta.dy).is_some_and(|factor| camera.scale_zoom(factor));
    }
    if delta.dx == 0.0 && delta.dy == 0.0 {
        return false;
    }
    camera.pan_by(-delta.dx, -delta.dy);
    true
}

/// Tracks the two-finger pinch between touch-move events.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinchTracker {
    /// Contact distance at the previous move, if a pinch is in progress.
    last_distance: Option<f64>,
}

impl PinchTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current pair of contact points.
    ///
    /// The first move of a gesture only records the distance; later moves
    /// scale the zoom by the ratio to the previous distance.
    pub fn on_touch_move(&mut self, camera: &mut Camera, a: Point, b: Point) -> bool {
        let distance = a.distance(b);
        let previous = self.last_distance.replace(distance);
        match previous {
            Some(prev) if prev > 0.0 && distance.is_finite() => camera.scale_zoom(distance / prev),
            _ => false,
        }
    }

    /// Forget the previous distance. Called when the gesture ends.
    pub fn reset(&mut self) {
        self.last_distance = None;
    }

    /// Whether a pinch is currently being tracked.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.last_distance.is_some()
    }
}
