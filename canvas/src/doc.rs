//! Document model: drawable elements, the in-progress draft, and the scene store.
//!
//! This module defines what is on the canvas (`Element`, `PathElement`,
//! `ShapeElement`), the single uncommitted element being drawn (`Draft`), and
//! the runtime store that owns both (`Scene`).
//!
//! All geometry is stored in world (logical) coordinates. The scene is
//! append-only: committed elements are only ever handed out by shared
//! reference, so nothing outside this module can edit them after the fact.
//! Insertion order is draw order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::input::Mode;

/// The geometric primitive a shape element draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle spanning origin to origin + extent.
    Rectangle,
    /// Circle whose diameter is the horizontal extent.
    Circle,
    /// Isosceles triangle with its apex on the origin edge.
    Triangle,
}

/// Stroke parameters captured when an element is drawn.
///
/// `width` is in world units: the toolbar width divided by the zoom in
/// effect at capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color as a CSS color string.
    pub color: String,
    /// Line width in world units.
    pub width: f64,
    /// Global alpha in `[0.1, 1.0]`.
    pub opacity: f64,
}

impl StrokeStyle {
    #[must_use]
    pub fn new(color: impl Into<String>, width: f64, opacity: f64) -> Self {
        Self { color: color.into(), width, opacity }
    }

    /// Whether strokes in this style can be drawn segment by segment without
    /// visibly stacking alpha where segments overlap.
    ///
    /// Both the global alpha and the color itself must be fully opaque.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.opacity >= 1.0 && color_is_opaque(&self.color)
    }
}

/// Whether a CSS color string is known to carry no transparency.
///
/// Recognizes named colors, hex notation, and `rgb`/`rgba`/`hsl`/`hsla`
/// functions. Anything else (`transparent`, `var(...)`, `color-mix(...)`) is
/// treated as possibly translucent.
#[must_use]
pub fn color_is_opaque(color: &str) -> bool {
    let color = color.trim().to_ascii_lowercase();
    if let Some(hex) = color.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return false;
        }
        return match hex.len() {
            3 | 6 => true,
            4 => hex.ends_with('f'),
            8 => hex.ends_with("ff"),
            _ => false,
        };
    }
    if let Some(open) = color.find('(') {
        let name = &color[..open];
        let Some(args) = color[open + 1..].strip_suffix(')') else {
            return false;
        };
        if !matches!(name, "rgb" | "rgba" | "hsl" | "hsla") {
            return false;
        }
        return color_args_opaque(args);
    }
    color != "transparent" && !color.is_empty() && color.chars().all(|c| c.is_ascii_alphabetic())
}

/// Inspect the alpha channel of a color function's argument list, in either
/// the comma (`r, g, b, a`) or space (`r g b / a`) syntax.
fn color_args_opaque(args: &str) -> bool {
    if let Some((_, alpha)) = args.split_once('/') {
        return alpha_is_one(alpha);
    }
    let parts: Vec<&str> = args.split(',').collect();
    match parts.as_slice() {
        [_, _, _, alpha] => alpha_is_one(alpha),
        [_, _, _] => true,
        [single] => single.split_whitespace().count() == 3,
        _ => false,
    }
}

fn alpha_is_one(alpha: &str) -> bool {
    let alpha = alpha.trim();
    match alpha.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().is_ok_and(|v| v >= 100.0),
        None => alpha.parse::<f64>().is_ok_and(|v| v >= 1.0),
    }
}

/// One completed freehand stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathElement {
    pub style: StrokeStyle,
    /// Ordered polyline vertices. Never empty.
    pub points: Vec<Point>,
}

/// One completed geometric shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeElement {
    pub kind: ShapeKind,
    /// Corner where the drag started.
    pub origin: Point,
    /// Horizontal extent; negative when dragged leftwards.
    pub width: f64,
    /// Vertical extent; negative when dragged upwards.
    pub height: f64,
    pub style: StrokeStyle,
}

impl ShapeElement {
    /// The normalized bounding rectangle: top-left corner and non-negative extents.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_corner(self.origin, self.width, self.height)
    }

    /// Whether the shape has no extent in either direction.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Axis-aligned rectangle with non-negative extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Normalize a corner plus signed extents into a top-left rectangle.
    #[must_use]
    pub fn from_corner(origin: Point, width: f64, height: f64) -> Self {
        Self {
            x: origin.x.min(origin.x + width),
            y: origin.y.min(origin.y + height),
            width: width.abs(),
            height: height.abs(),
        }
    }
}

/// A committed, drawable scene element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Path(PathElement),
    Shape(ShapeElement),
}

impl Element {
    #[must_use]
    pub fn style(&self) -> &StrokeStyle {
        match self {
            Self::Path(path) => &path.style,
            Self::Shape(shape) => &shape.style,
        }
    }
}

/// What kind of element a new draft will become.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftKind {
    Path,
    Shape(ShapeKind),
}

impl DraftKind {
    /// Resolve the draft kind for the active tool configuration.
    ///
    /// Shape mode with no shape selected yields `None`: there is nothing to draw.
    #[must_use]
    pub fn for_tool(mode: Mode, shape: Option<ShapeKind>) -> Option<Self> {
        match mode {
            Mode::Draw => Some(Self::Path),
            Mode::Shape => shape.map(Self::Shape),
        }
    }
}

/// The single in-progress element between pointer-down and pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    /// Accumulating freehand stroke.
    Path { style: StrokeStyle, points: Vec<Point> },
    /// Shape being sized by dragging from `origin` to `current`.
    Shape { kind: ShapeKind, style: StrokeStyle, origin: Point, current: Point },
}

impl Draft {
    #[must_use]
    pub fn style(&self) -> &StrokeStyle {
        match self {
            Self::Path { style, .. } | Self::Shape { style, .. } => style,
        }
    }

    /// The element this draft would commit to, ignoring the degenerate-shape rule.
    #[must_use]
    pub fn preview(&self) -> Element {
        match self {
            Self::Path { style, points } => {
                Element::Path(PathElement { style: style.clone(), points: points.clone() })
            }
            Self::Shape { kind, style, origin, current } => Element::Shape(ShapeElement {
                kind: *kind,
                origin: *origin,
                width: current.x - origin.x,
                height: current.y - origin.y,
                style: style.clone(),
            }),
        }
    }

    /// The last recorded point of a path draft.
    #[must_use]
    pub fn last_path_point(&self) -> Option<Point> {
        match self {
            Self::Path { points, .. } => points.last().copied(),
            Self::Shape { .. } => None,
        }
    }
}

/// Append-only store of committed elements plus the optional draft.
#[derive(Debug, Default)]
pub struct Scene {
    elements: Vec<Element>,
    draft: Option<Draft>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a draft at `start`. Returns `false` (and changes nothing) if a
    /// draft is already active.
    pub fn begin_draft(&mut self, kind: DraftKind, style: StrokeStyle, start: Point) -> bool {
        if self.draft.is_some() {
            return false;
        }
        self.draft = Some(match kind {
            DraftKind::Path => Draft::Path { style, points: vec![start] },
            DraftKind::Shape(kind) => Draft::Shape { kind, style, origin: start, current: start },
        });
        true
    }

    /// Feed a new pointer position into the draft. Returns `false` without a draft.
    pub fn extend_draft(&mut self, point: Point) -> bool {
        match &mut self.draft {
            Some(Draft::Path { points, .. }) => points.push(point),
            Some(Draft::Shape { current, .. }) => *current = point,
            None => return false,
        }
        true
    }

    /// Promote the draft into the scene and return the new element.
    ///
    /// Returns `None` when there is no draft, or when a shape draft has zero
    /// width and height; the draft is cleared either way.
    pub fn commit_draft(&mut self) -> Option<&Element> {
        let element = self.draft.take()?.preview();
        if let Element::Shape(shape) = &element {
            if shape.is_degenerate() {
                return None;
            }
        }
        self.elements.push(element);
        self.elements.last()
    }

    /// Drop the draft without committing. Returns `false` if there was none.
    pub fn discard_draft(&mut self) -> bool {
        self.draft.take().is_some()
    }

    /// Committed elements in draw order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The in-progress draft, if any.
    #[must_use]
    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    #[must_use]
    pub fn has_draft(&self) -> bool {
        self.draft.is_some()
    }

    /// Number of committed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing has been committed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
