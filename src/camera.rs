#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in screen, world or minimap space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a viewport or box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Centre of a box of this size anchored at the origin.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// An axis-aligned rectangle: top-left corner plus size, in whatever space its producer states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Whether `p` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Viewport transform for the infinite canvas.
///
/// `offset_x` / `offset_y` are the screen position of the world origin, in CSS pixels.
/// `scale` is the zoom factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { offset_x: 0.0, offset_y: 0.0, scale: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.offset_x,
            y: world.y * self.scale + self.offset_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Convert a screen-space movement to the world-space movement it represents.
    ///
    /// The offset cancels for relative motion; only the scale applies.
    #[must_use]
    pub fn screen_delta_to_world(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.screen_dist_to_world(dx), self.screen_dist_to_world(dy))
    }

    /// Translate the view by a raw screen-space delta. Zoom does not affect panning.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Change the scale to `new_scale`, keeping the world point under `cursor` fixed on screen.
    ///
    /// `new_scale` must already be clamped by the caller.
    pub fn zoom_at(&mut self, cursor: Point, new_scale: f64) {
        let ratio = new_scale / self.scale;
        let mx = cursor.x - self.offset_x;
        let my = cursor.y - self.offset_y;
        self.offset_x = cursor.x - mx * ratio;
        self.offset_y = cursor.y - my * ratio;
        self.scale = new_scale;
    }

    /// Move the view so `world` sits at the centre of a viewport of `viewport` size.
    /// The scale is unchanged.
    pub fn center_on(&mut self, world: Point, viewport: Size) {
        self.offset_x = -world.x * self.scale + viewport.width / 2.0;
        self.offset_y = -world.y * self.scale + viewport.height / 2.0;
    }
}

/// Scale after one wheel notch: up when `wheel_dy` is negative, down otherwise, clamped to `[min, max]`.
#[must_use]
pub fn stepped_scale(current: f64, wheel_dy: f64, step: f64, min: f64, max: f64) -> f64 {
    let delta = if wheel_dy < 0.0 { step } else { -step };
    (current + delta).clamp(min, max)
}
