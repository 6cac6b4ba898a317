//! Interaction engine for an infinite whiteboard canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! interactive state of a single whiteboard session: the pan/zoom camera, the
//! element list, the selection, the active drag/resize/pan gesture and the
//! minimap projection. The host JavaScript layer wires DOM events to the
//! engine, applies the returned [`engine::Action`]s to its own UI, and calls
//! [`engine::Engine::render`] when asked to.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Canvas element types and the in-memory element store |
//! | [`camera`] | Pan/zoom camera and world/screen conversions |
//! | [`input`] | Input event types, selection and the gesture state machine |
//! | [`hit`] | Hit-testing against element bodies and resize handles |
//! | [`minimap`] | World-to-minimap projection and click-to-navigate |
//! | [`render`] | `Canvas2D` scene rendering |
//! | [`config`] | Tunable limits, loadable from JSON |
//! | [`error`] | [`error::CanvasError`] for host-facing fallible calls |
//! | [`consts`] | Shared numeric constants (zoom limits, default sizes, etc.) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod hit;
pub mod input;
pub mod minimap;
pub mod render;

pub use config::EngineConfig;
pub use engine::{Action, CanvasState, Engine, EngineCore};
pub use error::CanvasError;

/// Route `log` output to the browser console and install the panic hook.
///
/// Call once at startup, before creating an [`Engine`].
///
/// # Errors
///
/// Returns [`CanvasError::Logger`] if a global logger is already installed.
#[cfg(feature = "console")]
pub fn init_logging(level: log::Level) -> Result<(), CanvasError> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(level)?;
    Ok(())
}
