//! Interaction engine: pointer, wheel, and touch events → scene and camera
//! changes plus render requests.
//!
//! [`EngineCore`] holds all session state and logic and never touches the
//! browser, so it is tested natively. [`Engine`] wraps it with the canvas
//! element and its 2D context and executes the render requests the core emits.

use tracing::{debug, trace, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::doc::{DraftKind, Element, Scene, ShapeKind, StrokeStyle};
use crate::gesture::{self, PinchTracker};
use crate::input::{Button, ConfigError, InputState, Mode, Modifiers, ToolConfig, WheelDelta};
use crate::render::{self, Redraw, Viewport};
use crate::surface::{Surface, SurfaceError};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A draft was promoted into the scene.
    ElementCommitted(Element),
    /// A draft ended without producing an element (degenerate shape or cancel).
    DraftDiscarded,
    /// The surface must be redrawn with the given strategy.
    RenderNeeded(Redraw),
}

/// Error constructing or driving the browser engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The canvas element did not provide a 2D rendering context.
    #[error("canvas has no 2d context")]
    NoContext,
    /// A drawing call failed.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Default)]
pub struct EngineCore {
    scene: Scene,
    camera: Camera,
    tools: ToolConfig,
    input: InputState,
    pinch: PinchTracker,
    viewport: Viewport,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width: f64, height: f64, dpr: f64) -> Vec<Action> {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        self.viewport = Viewport { width: width.max(0.0), height: height.max(0.0), dpr };
        vec![Action::RenderNeeded(Redraw::Full)]
    }

    // --- Tool configuration ---

    /// Replace the whole tool configuration.
    ///
    /// Width and opacity are clamped into range. A change of mode, shape, or
    /// pan toggle commits the active draft first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFinite` and keeps the current configuration if
    /// width or opacity is NaN or infinite.
    pub fn set_tools(&mut self, tools: ToolConfig) -> Result<Vec<Action>, ConfigError> {
        let tools = tools.normalized()?;
        Ok(self.switch_tools(tools))
    }

    /// Install an already-normalized configuration.
    fn switch_tools(&mut self, tools: ToolConfig) -> Vec<Action> {
        let switches = tools.mode != self.tools.mode
            || tools.shape != self.tools.shape
            || tools.panning != self.tools.panning;
        let actions = if switches { self.finish_gesture() } else { Vec::new() };
        self.tools = tools;
        actions
    }

    /// Set the stroke color for the next draft.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.tools.color = color.into();
    }

    /// Set the stroke width (screen pixels) for the next draft.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFinite` for NaN or infinite widths.
    pub fn set_width(&mut self, width: f64) -> Result<(), ConfigError> {
        self.tools.set_width(width)
    }

    /// Set the stroke opacity for the next draft.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFinite` for NaN or infinite opacities.
    pub fn set_opacity(&mut self, opacity: f64) -> Result<(), ConfigError> {
        self.tools.set_opacity(opacity)
    }

    /// Switch between freehand and shape mode.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        let mut tools = self.tools.clone();
        tools.mode = mode;
        self.switch_tools(tools)
    }

    /// Select a shape and switch to shape mode.
    pub fn select_shape(&mut self, kind: ShapeKind) -> Vec<Action> {
        let mut tools = self.tools.clone();
        tools.shape = Some(kind);
        tools.mode = Mode::Shape;
        self.switch_tools(tools)
    }

    /// Clear the shape selection and switch to freehand mode.
    pub fn select_draw_mode(&mut self) -> Vec<Action> {
        let mut tools = self.tools.clone();
        tools.shape = None;
        tools.mode = Mode::Draw;
        self.switch_tools(tools)
    }

    /// Turn drag-to-pan on or off.
    pub fn set_panning(&mut self, panning: bool) -> Vec<Action> {
        let mut tools = self.tools.clone();
        tools.panning = panning;
        self.switch_tools(tools)
    }

    // --- Pointer input ---

    /// Handle a pointer press at `screen_pt` (CSS pixels relative to the surface).
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if self.input != InputState::Idle {
            trace!(?button, "pointer down ignored: gesture in progress");
            return Vec::new();
        }

        let pans = button == Button::Middle || (button == Button::Primary && self.tools.panning);
        if pans {
            self.input = InputState::Panning { last_screen: screen_pt };
            return Vec::new();
        }
        if button != Button::Primary {
            return Vec::new();
        }

        let Some(kind) = DraftKind::for_tool(self.tools.mode, self.tools.shape) else {
            trace!("pointer down ignored: shape mode without a shape");
            return Vec::new();
        };
        let world = self.camera.screen_to_world(screen_pt);
        let style = self.draft_style();
        let opaque = style.is_opaque();
        if !self.scene.begin_draft(kind, style, world) {
            return Vec::new();
        }
        debug!(?kind, x = world.x, y = world.y, "draft started");

        match kind {
            DraftKind::Path => {
                self.input = InputState::DrawingPath;
                vec![Action::RenderNeeded(stroke_redraw(opaque, world, world))]
            }
            DraftKind::Shape(_) => {
                self.input = InputState::DrawingShape;
                vec![Action::RenderNeeded(Redraw::Full)]
            }
        }
    }

    /// Handle pointer movement.
    #[allow(clippy::float_cmp)]
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { last_screen } => {
                let dx = screen_pt.x - last_screen.x;
                let dy = screen_pt.y - last_screen.y;
                self.input = InputState::Panning { last_screen: screen_pt };
                if dx == 0.0 && dy == 0.0 {
                    return Vec::new();
                }
                self.camera.pan_by(dx, dy);
                vec![Action::RenderNeeded(Redraw::Full)]
            }
            InputState::DrawingPath => {
                let world = self.camera.screen_to_world(screen_pt);
                let Some(draft) = self.scene.draft() else {
                    self.input = InputState::Idle;
                    return Vec::new();
                };
                let opaque = draft.style().is_opaque();
                let from = draft.last_path_point().unwrap_or(world);
                self.scene.extend_draft(world);
                trace!(x = world.x, y = world.y, "path extended");
                vec![Action::RenderNeeded(stroke_redraw(opaque, from, world))]
            }
            InputState::DrawingShape => {
                let world = self.camera.screen_to_world(screen_pt);
                if !self.scene.extend_draft(world) {
                    self.input = InputState::Idle;
                    return Vec::new();
                }
                vec![Action::RenderNeeded(Redraw::Full)]
            }
        }
    }

    /// Handle pointer release: commit the draft or end the pan.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.pinch.reset();
        self.finish_gesture()
    }

    /// Handle pointer cancellation: drop the draft without committing.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.pinch.reset();
        let was = std::mem::take(&mut self.input);
        if !was.is_drawing() {
            return Vec::new();
        }
        if self.scene.discard_draft() {
            debug!("draft discarded by cancel");
        }
        vec![Action::DraftDiscarded, Action::RenderNeeded(Redraw::Full)]
    }

    // --- Gestures ---

    /// Handle a wheel event: zoom with ctrl held, pan otherwise.
    pub fn on_wheel(&mut self, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if gesture::apply_wheel(&mut self.camera, delta, modifiers) {
            trace!(zoom = self.camera.zoom, pan_x = self.camera.pan_x, pan_y = self.camera.pan_y, "wheel");
            vec![Action::RenderNeeded(Redraw::Full)]
        } else {
            Vec::new()
        }
    }

    /// Handle a two-finger touch move with contact points `a` and `b` (screen pixels).
    pub fn on_touch_move(&mut self, a: Point, b: Point) -> Vec<Action> {
        if self.pinch.on_touch_move(&mut self.camera, a, b) {
            trace!(zoom = self.camera.zoom, "pinch");
            vec![Action::RenderNeeded(Redraw::Full)]
        } else {
            Vec::new()
        }
    }

    /// End of a touch gesture.
    pub fn on_touch_end(&mut self) {
        self.pinch.reset();
    }

    /// Toolbar zoom-in button.
    pub fn zoom_in(&mut self) -> Vec<Action> {
        zoom_redraw(self.camera.zoom_in())
    }

    /// Toolbar zoom-out button.
    pub fn zoom_out(&mut self) -> Vec<Action> {
        zoom_redraw(self.camera.zoom_out())
    }

    /// Set the zoom directly (clamped; NaN is ignored).
    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        zoom_redraw(self.camera.set_zoom(zoom))
    }

    // --- Render ---

    /// Draw the current state to `surface` with the requested strategy.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface rejects a drawing call.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, redraw: Redraw) -> Result<(), SurfaceError> {
        render::render(surface, &self.scene, &self.camera, &self.viewport, redraw)
    }

    // --- Queries ---

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn tools(&self) -> &ToolConfig {
        &self.tools
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.input
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // --- Internal helpers ---

    /// Style captured for a new draft; width is normalized to logical units.
    fn draft_style(&self) -> StrokeStyle {
        StrokeStyle::new(
            self.tools.color.clone(),
            self.camera.screen_dist_to_world(self.tools.width),
            self.tools.opacity,
        )
    }

    /// Return to `Idle`, committing any draft.
    fn finish_gesture(&mut self) -> Vec<Action> {
        let was = std::mem::take(&mut self.input);
        if !was.is_drawing() {
            return Vec::new();
        }
        match self.scene.commit_draft() {
            Some(element) => {
                let element = element.clone();
                debug!(elements = self.scene.len(), "draft committed");
                vec![Action::ElementCommitted(element), Action::RenderNeeded(Redraw::Full)]
            }
            None => {
                debug!("degenerate draft dropped");
                vec![Action::DraftDiscarded, Action::RenderNeeded(Redraw::Full)]
            }
        }
    }
}

/// Redraw strategy for a path segment: appended in place when opaque.
fn stroke_redraw(opaque: bool, from: Point, to: Point) -> Redraw {
    if opaque { Redraw::Segment { from, to } } else { Redraw::Full }
}

fn zoom_redraw(changed: bool) -> Vec<Action> {
    if changed { vec![Action::RenderNeeded(Redraw::Full)] } else { Vec::new() }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NoContext` if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, EngineError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(SurfaceError::from)?
            .ok_or(EngineError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::NoContext)?;
        Ok(Self { canvas, ctx, core: EngineCore::new() })
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio, resize the backing
    /// store to `css × dpr`, and redraw.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let actions = self.core.set_viewport(width_css, height_css, dpr);
        let (w, h) = self.core.viewport().backing_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.dispatch(actions)
    }

    // --- Delegated tool configuration ---

    /// # Errors
    ///
    /// See [`EngineCore::set_tools`].
    pub fn set_tools(&mut self, tools: ToolConfig) -> Result<Vec<Action>, ConfigError> {
        let actions = self.core.set_tools(tools)?;
        Ok(self.dispatch(actions))
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.core.set_color(color);
    }

    /// # Errors
    ///
    /// See [`EngineCore::set_width`].
    pub fn set_width(&mut self, width: f64) -> Result<(), ConfigError> {
        self.core.set_width(width)
    }

    /// # Errors
    ///
    /// See [`EngineCore::set_opacity`].
    pub fn set_opacity(&mut self, opacity: f64) -> Result<(), ConfigError> {
        self.core.set_opacity(opacity)
    }

    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        let actions = self.core.set_mode(mode);
        self.dispatch(actions)
    }

    pub fn select_shape(&mut self, kind: ShapeKind) -> Vec<Action> {
        let actions = self.core.select_shape(kind);
        self.dispatch(actions)
    }

    pub fn select_draw_mode(&mut self) -> Vec<Action> {
        let actions = self.core.select_draw_mode();
        self.dispatch(actions)
    }

    pub fn set_panning(&mut self, panning: bool) -> Vec<Action> {
        let actions = self.core.set_panning(panning);
        self.dispatch(actions)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        let actions = self.core.on_pointer_down(screen_pt, button);
        self.dispatch(actions)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_move(screen_pt);
        self.dispatch(actions)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_up();
        self.dispatch(actions)
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_cancel();
        self.dispatch(actions)
    }

    pub fn on_wheel(&mut self, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_wheel(delta, modifiers);
        self.dispatch(actions)
    }

    pub fn on_touch_move(&mut self, a: Point, b: Point) -> Vec<Action> {
        let actions = self.core.on_touch_move(a, b);
        self.dispatch(actions)
    }

    pub fn on_touch_end(&mut self) {
        self.core.on_touch_end();
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        let actions = self.core.zoom_in();
        self.dispatch(actions)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        let actions = self.core.zoom_out();
        self.dispatch(actions)
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        let actions = self.core.set_zoom(zoom);
        self.dispatch(actions)
    }

    // --- Render ---

    /// Draw the current state to the canvas. Failures are logged, not raised.
    pub fn render(&mut self, redraw: Redraw) {
        if let Err(error) = self.core.render(&mut self.ctx, redraw) {
            warn!(%error, "canvas render failed");
        }
    }

    /// Execute every render request in `actions` and hand them back to the host.
    fn dispatch(&mut self, actions: Vec<Action>) -> Vec<Action> {
        for action in &actions {
            if let Action::RenderNeeded(redraw) = action {
                self.render(*redraw);
            }
        }
        actions
    }
}
