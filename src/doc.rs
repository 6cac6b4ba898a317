//! Document model: canvas elements and the in-memory element store.
//!
//! `CanvasElement` is what lives on the canvas, `PartialElement` is a sparse
//! edit applied in place, and `ElementStore` owns every live element in
//! insertion order. The renderer and hit tester read from the store via
//! [`ElementStore::sorted_elements`] to get stacking order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{Point, Rect};
use crate::consts::{DEFAULT_COLOR, DEFAULT_ELEMENT_WIDTH, SHAPE_HEIGHT, STICKY_COLOR, STICKY_HEIGHT, TEXT_HEIGHT};
use crate::error::CanvasError;

/// Unique identifier for a canvas element.
pub type ElementId = Uuid;

/// The kind of a canvas element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Colored note with editable text.
    Sticky,
    /// Free-standing text box.
    Text,
    /// Outlined rectangle.
    Rectangle,
    /// Outlined ellipse inscribed in the bounding box.
    Circle,
    /// Directed arrow across the bounding box.
    Arrow,
    /// Straight line across the bounding box.
    Line,
}

impl ElementKind {
    /// All kinds, in toolbar order.
    pub const ALL: [Self; 6] = [Self::Sticky, Self::Text, Self::Rectangle, Self::Circle, Self::Arrow, Self::Line];

    /// Lowercase name used on the host boundary.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sticky => "sticky",
            Self::Text => "text",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Arrow => "arrow",
            Self::Line => "line",
        }
    }

    /// Whether elements of this kind carry editable text.
    #[must_use]
    pub fn has_text(self) -> bool {
        matches!(self, Self::Sticky | Self::Text)
    }

    /// Default height for a new element of this kind.
    #[must_use]
    pub fn default_height(self) -> f64 {
        match self {
            Self::Sticky => STICKY_HEIGHT,
            Self::Text => TEXT_HEIGHT,
            Self::Rectangle | Self::Circle | Self::Arrow | Self::Line => SHAPE_HEIGHT,
        }
    }

    /// Placeholder text for a new element of this kind.
    #[must_use]
    pub fn default_content(self) -> Option<&'static str> {
        match self {
            Self::Sticky => Some("Sticky note"),
            Self::Text => Some("Text"),
            Self::Rectangle | Self::Circle | Self::Arrow | Self::Line => None,
        }
    }

    /// Default color for a new element of this kind.
    #[must_use]
    pub fn default_color(self) -> &'static str {
        if self == Self::Sticky { STICKY_COLOR } else { DEFAULT_COLOR }
    }
}

impl FromStr for ElementKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CanvasError::UnknownElementKind(s.to_owned()))
    }
}

/// A positioned, sized, styled object on the infinite canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasElement {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Left edge in world coordinates.
    pub x: f64,
    /// Top edge in world coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// CSS color string.
    pub color: String,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    /// Stacking order; higher values draw on top.
    pub z_index: i64,
    /// Path points for line and arrow elements, in world coordinates.
    /// The renderer draws from the first point to the last; without points it uses the box diagonal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
}

impl CanvasElement {
    /// Build a new element of `kind` with its default size and style, centred on `center`.
    #[must_use]
    pub fn with_defaults(kind: ElementKind, center: Point, z_index: i64) -> Self {
        let width = DEFAULT_ELEMENT_WIDTH;
        let height = kind.default_height();
        Self {
            id: Uuid::new_v4(),
            kind,
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
            content: kind.default_content().map(str::to_owned),
            color: kind.default_color().to_owned(),
            rotation: 0.0,
            z_index,
            points: None,
        }
    }

    /// Axis-aligned bounding box in world coordinates. Rotation is not applied.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Centre of the bounding box in world coordinates.
    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// World-space start and end of a line or arrow: the first and last path
    /// points when there are at least two, otherwise the box diagonal.
    #[must_use]
    pub fn segment_endpoints(&self) -> (Point, Point) {
        match self.points.as_deref() {
            Some([a, .., b]) => (*a, *b),
            _ => (Point::new(self.x, self.y), Point::new(self.x + self.width, self.y + self.height)),
        }
    }

    /// Whether `world_pt` lies inside the bounding box (edges inclusive).
    #[must_use]
    pub fn contains(&self, world_pt: Point) -> bool {
        self.bounds().contains(world_pt)
    }
}

/// Sparse update for a canvas element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// New text content. Only applied to kinds that carry text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

impl PartialElement {
    /// Whether the update carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// In-memory store of canvas elements, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<CanvasElement>,
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { elements: Vec::new() }
    }

    /// Append an element, or replace it in place if the id already exists.
    pub fn insert(&mut self, element: CanvasElement) {
        if let Some(index) = self.elements.iter().position(|e| e.id == element.id) {
            self.elements[index] = element;
        } else {
            self.elements.push(element);
        }
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: &ElementId) -> Option<CanvasElement> {
        let index = self.elements.iter().position(|e| e.id == *id)?;
        Some(self.elements.remove(index))
    }

    /// Remove every element whose id is in `ids`. Returns the ids actually removed, in store order.
    pub fn remove_all(&mut self, ids: &[ElementId]) -> Vec<ElementId> {
        let mut removed = Vec::new();
        self.elements.retain(|e| {
            if ids.contains(&e.id) {
                removed.push(e.id);
                false
            } else {
                true
            }
        });
        removed
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&CanvasElement> {
        self.elements.iter().find(|e| e.id == *id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut CanvasElement> {
        self.elements.iter_mut().find(|e| e.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Apply a partial update to an existing element. Returns false if the element doesn't exist.
    pub fn apply_partial(&mut self, id: &ElementId, partial: &PartialElement) -> bool {
        let Some(el) = self.get_mut(id) else {
            return false;
        };
        if let Some(x) = partial.x {
            el.x = x;
        }
        if let Some(y) = partial.y {
            el.y = y;
        }
        if let Some(w) = partial.width {
            el.width = w;
        }
        if let Some(h) = partial.height {
            el.height = h;
        }
        if let Some(ref content) = partial.content {
            if el.kind.has_text() {
                el.content = Some(content.clone());
            }
        }
        if let Some(ref color) = partial.color {
            el.color.clone_from(color);
        }
        if let Some(r) = partial.rotation {
            el.rotation = r;
        }
        if let Some(z) = partial.z_index {
            el.z_index = z;
        }
        true
    }

    /// All elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[CanvasElement] {
        &self.elements
    }

    /// All elements sorted bottom-to-top by `z_index`; equal values keep insertion order.
    #[must_use]
    pub fn sorted_elements(&self) -> Vec<&CanvasElement> {
        let mut sorted: Vec<&CanvasElement> = self.elements.iter().collect();
        sorted.sort_by_key(|e| e.z_index);
        sorted
    }

    /// Number of elements currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
