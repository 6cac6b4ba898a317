#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Point, Rect};
use crate::doc::{CanvasElement, ElementId, ElementStore};
use crate::input::Selection;

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// The bottom-right resize handle. Only selected elements expose one.
    ResizeHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// World-space square of the resize handle in the element's bottom-right corner.
///
/// The handle keeps its size when the element is smaller, so it may overhang the top-left edges.
#[must_use]
pub fn resize_handle_rect(element: &CanvasElement, handle_size: f64) -> Rect {
    Rect::new(
        element.x + element.width - handle_size,
        element.y + element.height - handle_size,
        handle_size,
        handle_size,
    )
}

/// Find the topmost element part under `world_pt`.
///
/// Elements are checked top-down by stacking order. For each element the resize
/// handle is checked before the body, and only when the element is selected.
#[must_use]
pub fn hit_test(world_pt: Point, doc: &ElementStore, selection: &Selection, handle_size: f64) -> Option<Hit> {
    doc.sorted_elements().into_iter().rev().find_map(|el| {
        if selection.contains(&el.id) && resize_handle_rect(el, handle_size).contains(world_pt) {
            Some(Hit { element_id: el.id, part: HitPart::ResizeHandle })
        } else if el.contains(world_pt) {
            Some(Hit { element_id: el.id, part: HitPart::Body })
        } else {
            None
        }
    })
}
