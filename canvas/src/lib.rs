//! Canvas engine for the sketchpad: freehand strokes and shapes on a pannable,
//! zoomable 2D surface.
//!
//! This crate is compiled to WebAssembly and runs in the browser, and natively
//! for tests and headless replays. It owns the drawing session end to end:
//! translating raw pointer, wheel, and touch events into scene mutations,
//! maintaining camera state for pan/zoom, and rendering the scene. The host
//! layer only wires DOM events and toolbar values into the engine.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Scene of committed elements and the in-progress draft |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Tool configuration, event types, and interaction states |
//! | [`gesture`] | Wheel and pinch handling |
//! | [`render`] | Full-frame and segment rendering |
//! | [`surface`] | Drawing backends: browser 2D context and display list |
//! | [`consts`] | Shared numeric constants (zoom limits, width and opacity ranges) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod gesture;
pub mod input;
pub mod render;
pub mod surface;
