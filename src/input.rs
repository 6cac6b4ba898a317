//! Input model: tools, modifier keys, mouse buttons, selection and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `Selection` is the set of selected element ids. `InputState` is the
//! single active gesture tracked between pointer-down and pointer-up, tagged
//! with the element it targets, carrying what is needed to compute deltas.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::{ElementId, ElementKind};
use crate::error::CanvasError;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pointer / selection tool (default). Dragging the background pans.
    #[default]
    Select,
    Sticky,
    Text,
    Rectangle,
    Circle,
    Arrow,
    Line,
    /// Freehand pen. Selectable, but draws nothing.
    Pen,
}

impl Tool {
    /// All tools, in toolbar order.
    pub const ALL: [Self; 8] = [
        Self::Select,
        Self::Sticky,
        Self::Text,
        Self::Rectangle,
        Self::Circle,
        Self::Arrow,
        Self::Line,
        Self::Pen,
    ];

    /// Lowercase name used on the host boundary.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Sticky => "sticky",
            Self::Text => "text",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Arrow => "arrow",
            Self::Line => "line",
            Self::Pen => "pen",
        }
    }

}

impl From<ElementKind> for Tool {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Sticky => Self::Sticky,
            ElementKind::Text => Self::Text,
            ElementKind::Rectangle => Self::Rectangle,
            ElementKind::Circle => Self::Circle,
            ElementKind::Arrow => Self::Arrow,
            ElementKind::Line => Self::Line,
        }
    }
}

impl FromStr for Tool {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| CanvasError::UnknownTool(s.to_owned()))
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl or Cmd held: clicks toggle membership instead of replacing the selection.
    #[must_use]
    pub fn is_multi_select(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key, named as the browser reports it (e.g. `"Delete"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Delete or Backspace.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete" || self.0 == "Backspace"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// The set of selected element ids.
///
/// Order is irrelevant to membership but kept stable (oldest first) so hosts see a deterministic list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Replace the selection with exactly `id`.
    pub fn select_only(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: ElementId) {
        if let Some(index) = self.ids.iter().position(|s| *s == id) {
            self.ids.remove(index);
        } else {
            self.ids.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids for which `exists` returns false. Returns true if anything was removed.
    pub fn retain_existing(&mut self, exists: impl Fn(&ElementId) -> bool) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| exists(id));
        self.ids.len() != before
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    pub selection: Selection,
}

/// Interaction state of one element, derived from the selection and the active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    Unselected,
    Selected,
    Dragging,
    Resizing,
}

/// Internal state for the input state machine.
///
/// At most one gesture is active at a time since input is single-pointer.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; pointer moves are ignored.
    #[default]
    Idle,
    /// The user is panning the canvas by dragging the background.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// The user is moving an element. Deltas are incremental.
    DraggingElement {
        id: ElementId,
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// The user is resizing an element from its bottom-right handle. Deltas are absolute from the grab.
    ResizingElement {
        id: ElementId,
        /// Screen-space pointer position when the handle was grabbed.
        start_screen: Point,
        orig_width: f64,
        orig_height: f64,
    },
}

impl InputState {
    /// The element targeted by the active gesture, if any.
    #[must_use]
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::DraggingElement { id, .. } | Self::ResizingElement { id, .. } => Some(*id),
            Self::Idle | Self::Panning { .. } => None,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }
}
