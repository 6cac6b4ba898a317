//! Minimap projection: a fixed-size overview of every element plus the visible viewport.
//!
//! The minimap has its own transform, independent of the main camera: a world
//! point `w` maps to `(w - bounds.min) * scale`, where `bounds` is the padded
//! union of all element boxes (or a fixed square when the canvas is empty).
//! The main viewport is drawn by inverting the camera to find the visible world
//! rectangle and then projecting that through the minimap transform. Clicking
//! the minimap runs the chain backwards and re-centres the main camera.
//!
//! Before the host has reported a layout there is no visible world rectangle;
//! the projector returns a fixed placeholder instead and ignores clicks.

#[cfg(test)]
#[path = "minimap_test.rs"]
mod minimap_test;

use crate::camera::{Camera, Point, Rect, Size};
use crate::config::MinimapConfig;
use crate::doc::{CanvasElement, ElementId, ElementKind};

/// World-space extent covered by the minimap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// One element as drawn on the minimap.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapElement {
    pub id: ElementId,
    pub kind: ElementKind,
    pub color: String,
    /// Minimap-local rectangle.
    pub rect: Rect,
}

/// Everything the renderer needs to draw the minimap for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapView {
    pub bounds: Bounds,
    pub elements: Vec<MinimapElement>,
    /// Minimap-local rectangle of the visible main viewport.
    pub viewport: Rect,
}

/// Projects between world space and minimap space.
#[derive(Debug, Clone, Copy)]
pub struct MinimapProjector {
    config: MinimapConfig,
}

impl MinimapProjector {
    #[must_use]
    pub fn new(config: MinimapConfig) -> Self {
        Self { config }
    }

    /// Minimap size in screen pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.config.width, self.config.height)
    }

    /// Padded union of all element boxes, or the fallback square when there are none.
    #[must_use]
    pub fn bounds(&self, elements: &[CanvasElement]) -> Bounds {
        if elements.is_empty() {
            let e = self.config.fallback_extent;
            return Bounds { min_x: -e, min_y: -e, max_x: e, max_y: e };
        }
        let mut b = Bounds {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for el in elements {
            b.min_x = b.min_x.min(el.x);
            b.min_y = b.min_y.min(el.y);
            b.max_x = b.max_x.max(el.x + el.width);
            b.max_y = b.max_y.max(el.y + el.height);
        }
        let pad = self.config.padding;
        Bounds { min_x: b.min_x - pad, min_y: b.min_y - pad, max_x: b.max_x + pad, max_y: b.max_y + pad }
    }

    #[must_use]
    pub fn world_to_minimap(&self, world: Point, bounds: &Bounds) -> Point {
        Point::new((world.x - bounds.min_x) * self.config.scale, (world.y - bounds.min_y) * self.config.scale)
    }

    #[must_use]
    pub fn minimap_to_world(&self, local: Point, bounds: &Bounds) -> Point {
        Point::new(local.x / self.config.scale + bounds.min_x, local.y / self.config.scale + bounds.min_y)
    }

    /// Minimap-local rectangle for one element. Sizes scale directly, with no clamping.
    #[must_use]
    pub fn project_element(&self, element: &CanvasElement, bounds: &Bounds) -> Rect {
        let origin = self.world_to_minimap(Point::new(element.x, element.y), bounds);
        Rect::new(origin.x, origin.y, element.width * self.config.scale, element.height * self.config.scale)
    }

    /// Minimap-local rectangle of what the main viewport currently shows.
    ///
    /// The visible world rectangle `(-ox/s, -oy/s, W/s, H/s)` scaled by the minimap
    /// scale, shifted by `bounds.min` only when `viewport_relative_to_bounds` is set.
    /// Without a layout this is the placeholder `(0, 0, width / 2, height / 2)`.
    #[must_use]
    pub fn viewport_rect(&self, camera: &Camera, layout: Option<Size>, bounds: &Bounds) -> Rect {
        let Some(layout) = layout else {
            return Rect::new(0.0, 0.0, self.config.width / 2.0, self.config.height / 2.0);
        };
        let top_left = camera.screen_to_world(Point::new(0.0, 0.0));
        let origin = if self.config.viewport_relative_to_bounds {
            self.world_to_minimap(top_left, bounds)
        } else {
            Point::new(top_left.x * self.config.scale, top_left.y * self.config.scale)
        };
        Rect::new(
            origin.x,
            origin.y,
            camera.screen_dist_to_world(layout.width) * self.config.scale,
            camera.screen_dist_to_world(layout.height) * self.config.scale,
        )
    }

    /// Camera that centres the world point under minimap-local `local` on screen, at the current scale.
    ///
    /// Returns `None` before a layout is known.
    #[must_use]
    pub fn navigate(&self, local: Point, camera: &Camera, layout: Option<Size>, bounds: &Bounds) -> Option<Camera> {
        let layout = layout?;
        let world = self.minimap_to_world(local, bounds);
        let mut next = *camera;
        next.center_on(world, layout);
        Some(next)
    }

    /// Screen rectangle occupied by the minimap, anchored to the viewport's bottom-right corner.
    #[must_use]
    pub fn screen_rect(&self, layout: Size) -> Rect {
        let size = self.size();
        Rect::new(
            layout.width - self.config.margin - size.width,
            layout.height - self.config.margin - size.height,
            size.width,
            size.height,
        )
    }

    /// Convert a screen point to minimap-local coordinates if it falls on the minimap.
    #[must_use]
    pub fn screen_to_local(&self, screen: Point, layout: Size) -> Option<Point> {
        let rect = self.screen_rect(layout);
        rect.contains(screen).then(|| Point::new(screen.x - rect.x, screen.y - rect.y))
    }

    /// Project every element and the viewport for drawing.
    #[must_use]
    pub fn view(&self, elements: &[CanvasElement], camera: &Camera, layout: Option<Size>) -> MinimapView {
        let bounds = self.bounds(elements);
        let elements = elements
            .iter()
            .map(|el| MinimapElement {
                id: el.id,
                kind: el.kind,
                color: el.color.clone(),
                rect: self.project_element(el, &bounds),
            })
            .collect();
        let viewport = self.viewport_rect(camera, layout, &bounds);
        MinimapView { bounds, elements, viewport }
    }
}
