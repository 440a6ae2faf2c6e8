//! Headless replay of a recorded input script through the canvas engine.
//!
//! A script is a JSON array of tagged events. Each event is fed to an
//! [`EngineCore`]; every render request it emits is executed against a
//! [`DisplayList`], so a replay exercises the same paths as the browser.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::path::{Path, PathBuf};

use canvas::camera::Point;
use canvas::doc::{Element, ShapeKind};
use canvas::engine::{Action, EngineCore};
use canvas::input::{Button, ConfigError, Modifiers, ToolConfig, WheelDelta};
use canvas::render::Redraw;
use canvas::surface::{DisplayList, SurfaceError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tool config: {0}")]
    Config(#[from] ConfigError),
    #[error("render failed: {0}")]
    Render(#[from] SurfaceError),
}

/// One recorded input event. Coordinates are CSS pixels relative to the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    PointerCancel,
    Wheel {
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
        #[serde(default)]
        ctrl: bool,
    },
    Pinch {
        a: Point,
        b: Point,
    },
    TouchEnd,
    Config(ToolConfig),
    SelectShape {
        shape: ShapeKind,
    },
    SelectDraw,
    PanMode {
        enabled: bool,
    },
    ZoomIn,
    ZoomOut,
}

/// Surface size the replay renders at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayViewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

/// What a replay produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub events: usize,
    pub paths: usize,
    pub shapes: usize,
    pub discarded: usize,
    pub full_renders: usize,
    pub segment_renders: usize,
    pub draw_commands: usize,
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns `ReplayError::Read` if the file can't be read and
/// `ReplayError::Json` if it isn't a valid event array.
pub fn load_script(path: &Path) -> Result<Vec<Event>, ReplayError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Read { path: path.to_owned(), source })?;
    parse_script(&text)
}

/// Parse a script from JSON text.
///
/// # Errors
///
/// Returns `ReplayError::Json` if the text isn't a valid event array.
pub fn parse_script(text: &str) -> Result<Vec<Event>, ReplayError> {
    Ok(serde_json::from_str(text)?)
}

/// Drive a fresh engine through `events`, rendering into a display list.
///
/// # Errors
///
/// Returns `ReplayError::Config` for unusable tool configs and
/// `ReplayError::Render` if a render request fails.
pub fn replay(events: &[Event], viewport: ReplayViewport) -> Result<(Summary, DisplayList), ReplayError> {
    let mut core = EngineCore::new();
    let mut list = DisplayList::new();
    let mut summary = Summary::default();

    let actions = core.set_viewport(viewport.width, viewport.height, viewport.dpr);
    execute(&core, &mut list, &mut summary, actions)?;

    for (index, event) in events.iter().enumerate() {
        debug!(index, ?event, "replaying");
        let actions = apply(&mut core, event)?;
        execute(&core, &mut list, &mut summary, actions)?;
        summary.events += 1;
    }

    let camera = core.camera();
    summary.draw_commands = list.len();
    summary.zoom = camera.zoom;
    summary.pan_x = camera.pan_x;
    summary.pan_y = camera.pan_y;
    info!(
        events = summary.events,
        elements = core.scene().len(),
        full_renders = summary.full_renders,
        segment_renders = summary.segment_renders,
        "replay finished"
    );
    Ok((summary, list))
}

fn apply(core: &mut EngineCore, event: &Event) -> Result<Vec<Action>, ReplayError> {
    let actions = match event {
        Event::PointerDown { x, y, button } => core.on_pointer_down(Point::new(*x, *y), *button),
        Event::PointerMove { x, y } => core.on_pointer_move(Point::new(*x, *y)),
        Event::PointerUp => core.on_pointer_up(),
        Event::PointerCancel => core.on_pointer_cancel(),
        Event::Wheel { dx, dy, ctrl } => {
            let modifiers = Modifiers { ctrl: *ctrl, ..Modifiers::default() };
            core.on_wheel(WheelDelta { dx: *dx, dy: *dy }, modifiers)
        }
        Event::Pinch { a, b } => core.on_touch_move(*a, *b),
        Event::TouchEnd => {
            core.on_touch_end();
            Vec::new()
        }
        Event::Config(config) => core.set_tools(config.clone())?,
        Event::SelectShape { shape } => core.select_shape(*shape),
        Event::SelectDraw => core.select_draw_mode(),
        Event::PanMode { enabled } => core.set_panning(*enabled),
        Event::ZoomIn => core.zoom_in(),
        Event::ZoomOut => core.zoom_out(),
    };
    Ok(actions)
}

fn execute(
    core: &EngineCore,
    list: &mut DisplayList,
    summary: &mut Summary,
    actions: Vec<Action>,
) -> Result<(), ReplayError> {
    for action in actions {
        match action {
            Action::ElementCommitted(Element::Path(_)) => summary.paths += 1,
            Action::ElementCommitted(Element::Shape(_)) => summary.shapes += 1,
            Action::DraftDiscarded => summary.discarded += 1,
            Action::RenderNeeded(redraw) => {
                match redraw {
                    Redraw::Full => summary.full_renders += 1,
                    Redraw::Segment { .. } => summary.segment_renders += 1,
                }
                core.render(list, redraw)?;
            }
        }
    }
    Ok(())
}
