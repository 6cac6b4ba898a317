//! Shared numeric constants for the whiteboard crate.
//!
//! These are the built-in defaults; [`crate::config::EngineConfig`] copies them
//! and lets the host override any of them.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed viewport scale.
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed viewport scale.
pub const MAX_SCALE: f64 = 5.0;

/// Scale change applied per wheel notch.
pub const ZOOM_STEP: f64 = 0.1;

// ── Elements ────────────────────────────────────────────────────

/// Lower bound for element width and height after a resize, in world units.
pub const MIN_ELEMENT_SIZE: f64 = 50.0;

/// Default width for every newly added element.
pub const DEFAULT_ELEMENT_WIDTH: f64 = 200.0;

/// Default height for sticky notes.
pub const STICKY_HEIGHT: f64 = 200.0;

/// Default height for text boxes.
pub const TEXT_HEIGHT: f64 = 100.0;

/// Default height for shapes (rectangle, circle, arrow, line).
pub const SHAPE_HEIGHT: f64 = 150.0;

/// Fill color of a new sticky note.
pub const STICKY_COLOR: &str = "#FFFF88";

/// Stroke / text color of every other new element.
pub const DEFAULT_COLOR: &str = "#000000";

/// Side of the square resize handle in the element's bottom-right corner, in world units.
pub const RESIZE_HANDLE_SIZE: f64 = 40.0;

// ── Minimap ─────────────────────────────────────────────────────

/// Minimap width in screen pixels.
pub const MINIMAP_WIDTH: f64 = 150.0;

/// Minimap height in screen pixels.
pub const MINIMAP_HEIGHT: f64 = 100.0;

/// World-to-minimap scale factor, independent of the main viewport scale.
pub const MINIMAP_SCALE: f64 = 0.05;

/// World-unit padding added around the union of element bounds.
pub const MINIMAP_PADDING: f64 = 200.0;

/// Half-extent of the square bounds used when the canvas is empty.
pub const MINIMAP_FALLBACK_EXTENT: f64 = 1000.0;

/// Gap between the minimap and the bottom-right corner of the viewport, in screen pixels.
pub const MINIMAP_MARGIN: f64 = 16.0;

// ── Layout ──────────────────────────────────────────────────────

/// Viewport width assumed before the host reports its layout.
pub const FALLBACK_VIEWPORT_WIDTH: f64 = 1000.0;

/// Viewport height assumed before the host reports its layout.
pub const FALLBACK_VIEWPORT_HEIGHT: f64 = 800.0;
