//! Rendering: draws the full canvas scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads the engine state and produces pixels. It never mutates application state.
//!
//! Layers, bottom to top: background grid, elements in z-order, selection UI
//! (all in world space under the camera transform), then the minimap in screen
//! space.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point, Size};
use crate::doc::{CanvasElement, ElementKind};
use crate::engine::EngineCore;
use crate::hit;
use crate::minimap::MinimapView;

/// Grid spacing in world units.
const GRID_SIZE: f64 = 50.0;

/// Arrowhead length in world units.
const ARROW_SIZE: f64 = 12.0;

/// Arrowhead half-angle in radians (~30°).
const ARROW_ANGLE: f64 = PI / 6.0;

/// Sticky note drop shadow blur in screen pixels.
const STICKY_SHADOW_BLUR: f64 = 6.0;

/// Inner padding for element text in world units.
const TEXT_PADDING: f64 = 12.0;

const SELECTION_COLOR: &str = "#1E90FF";

/// Draw the full scene for the current engine state.
///
/// Falls back to the configured viewport size when the host hasn't reported a layout yet.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let layout = core.layout().unwrap_or(core.config.fallback_viewport);
    let camera = &core.camera;

    // Layer 1: clear and set up transforms.
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, layout.width, layout.height);
    ctx.set_fill_style_str("#FAFAFA");
    ctx.fill_rect(0.0, 0.0, layout.width, layout.height);

    ctx.save();
    ctx.translate(camera.offset_x, camera.offset_y)?;
    ctx.scale(camera.scale, camera.scale)?;

    draw_grid(ctx, camera, layout);

    // Layer 2: elements in z-order (bottom first).
    for el in core.doc.sorted_elements() {
        draw_element(ctx, el)?;
    }

    // Layer 3: selection UI.
    for id in core.selection() {
        if let Some(el) = core.doc.get(id) {
            draw_selection(ctx, el, camera.scale, core.config.resize_handle_size);
        }
    }
    ctx.restore();

    // Layer 4: minimap, in screen space.
    let frame = core.minimap().screen_rect(layout);
    draw_minimap(ctx, &core.minimap_view(), frame.x, frame.y, Size::new(frame.width, frame.height))?;

    Ok(())
}

// =============================================================
// Background
// =============================================================

fn draw_grid(ctx: &CanvasRenderingContext2d, camera: &Camera, layout: Size) {
    let top_left = camera.screen_to_world(Point::new(0.0, 0.0));
    let bottom_right = camera.screen_to_world(Point::new(layout.width, layout.height));

    let start_x = (top_left.x / GRID_SIZE).floor() * GRID_SIZE;
    let start_y = (top_left.y / GRID_SIZE).floor() * GRID_SIZE;

    ctx.save();
    ctx.set_stroke_style_str("#E5E5E5");
    ctx.set_line_width(1.0 / camera.scale);
    ctx.begin_path();
    let mut x = start_x;
    while x <= bottom_right.x {
        ctx.move_to(x, top_left.y);
        ctx.line_to(x, bottom_right.y);
        x += GRID_SIZE;
    }
    let mut y = start_y;
    while y <= bottom_right.y {
        ctx.move_to(top_left.x, y);
        ctx.line_to(bottom_right.x, y);
        y += GRID_SIZE;
    }
    ctx.stroke();
    ctx.restore();
}

// =============================================================
// Element dispatch
// =============================================================

fn draw_element(ctx: &CanvasRenderingContext2d, el: &CanvasElement) -> Result<(), JsValue> {
    ctx.save();
    translate_and_rotate(ctx, el)?;
    let result = match el.kind {
        ElementKind::Sticky => draw_sticky(ctx, el),
        ElementKind::Text => draw_text(ctx, el, &el.color),
        ElementKind::Rectangle => {
            draw_rect(ctx, el);
            Ok(())
        }
        ElementKind::Circle => draw_ellipse(ctx, el),
        ElementKind::Line | ElementKind::Arrow => {
            draw_segment(ctx, el, el.kind == ElementKind::Arrow);
            Ok(())
        }
    };
    ctx.restore();
    result
}

// =============================================================
// Element renderers
// =============================================================

fn draw_sticky(ctx: &CanvasRenderingContext2d, el: &CanvasElement) -> Result<(), JsValue> {
    let hw = el.width / 2.0;
    let hh = el.height / 2.0;

    ctx.save();
    ctx.set_shadow_color("rgba(0, 0, 0, 0.2)");
    ctx.set_shadow_blur(STICKY_SHADOW_BLUR);
    ctx.set_shadow_offset_y(2.0);
    ctx.set_fill_style_str(&el.color);
    ctx.fill_rect(-hw, -hh, el.width, el.height);
    ctx.restore();

    draw_text(ctx, el, "#333333")
}

fn draw_rect(ctx: &CanvasRenderingContext2d, el: &CanvasElement) {
    ctx.set_stroke_style_str(&el.color);
    ctx.set_line_width(2.0);
    ctx.stroke_rect(-el.width / 2.0, -el.height / 2.0, el.width, el.height);
}

fn draw_ellipse(ctx: &CanvasRenderingContext2d, el: &CanvasElement) -> Result<(), JsValue> {
    if el.width <= 0.0 || el.height <= 0.0 {
        return Ok(());
    }
    ctx.begin_path();
    ctx.ellipse(0.0, 0.0, el.width / 2.0, el.height / 2.0, 0.0, 0.0, 2.0 * PI)?;
    ctx.set_stroke_style_str(&el.color);
    ctx.set_line_width(2.0);
    ctx.stroke();
    Ok(())
}

/// Draws in the element-centred frame set up by `translate_and_rotate`.
fn draw_segment(ctx: &CanvasRenderingContext2d, el: &CanvasElement, arrowhead: bool) {
    let c = el.center();
    let (a, b) = el.segment_endpoints();
    let (ax, ay, bx, by) = (a.x - c.x, a.y - c.y, b.x - c.x, b.y - c.y);

    ctx.set_stroke_style_str(&el.color);
    ctx.set_fill_style_str(&el.color);
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(ax, ay);
    ctx.line_to(bx, by);
    ctx.stroke();

    if arrowhead {
        let angle = (by - ay).atan2(bx - ax);
        draw_arrowhead(ctx, bx, by, angle);
    }
}

fn draw_arrowhead(ctx: &CanvasRenderingContext2d, tip_x: f64, tip_y: f64, angle: f64) {
    let x1 = tip_x - ARROW_SIZE * (angle - ARROW_ANGLE).cos();
    let y1 = tip_y - ARROW_SIZE * (angle - ARROW_ANGLE).sin();
    let x2 = tip_x - ARROW_SIZE * (angle + ARROW_ANGLE).cos();
    let y2 = tip_y - ARROW_SIZE * (angle + ARROW_ANGLE).sin();

    ctx.begin_path();
    ctx.move_to(tip_x, tip_y);
    ctx.line_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.close_path();
    ctx.fill();
}

// =============================================================
// Text
// =============================================================

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn draw_text(ctx: &CanvasRenderingContext2d, el: &CanvasElement, color: &str) -> Result<(), JsValue> {
    let Some(text) = el.content.as_deref().filter(|t| !t.is_empty()) else {
        return Ok(());
    };

    let font_size = (el.height / 8.0).clamp(12.0, 24.0);
    let line_height = font_size * 1.25;
    let max_w = (el.width - TEXT_PADDING * 2.0).max(1.0);

    ctx.save();
    ctx.set_fill_style_str(color);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{font_size}px sans-serif"));

    let mut lines = wrap_text_lines(ctx, text, max_w);
    let max_lines = ((el.height / line_height).floor() as usize).max(1);
    lines.truncate(max_lines);

    let total_height = line_height * (lines.len().saturating_sub(1) as f64);
    let start_y = -total_height * 0.5;
    for (idx, line) in lines.iter().enumerate() {
        ctx.fill_text(line, 0.0, start_y + idx as f64 * line_height)?;
    }

    ctx.restore();
    Ok(())
}

/// Greedy word wrap. Words wider than `max_w` get a line of their own.
fn wrap_text_lines(ctx: &CanvasRenderingContext2d, text: &str, max_w: f64) -> Vec<String> {
    let mut out = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate = if current.is_empty() { word.to_owned() } else { format!("{current} {word}") };
            if current.is_empty() || measured_text_width(ctx, &candidate) <= max_w {
                current = candidate;
            } else {
                out.push(std::mem::replace(&mut current, word.to_owned()));
            }
        }
        out.push(current);
    }
    out
}

fn measured_text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => f64::INFINITY,
    }
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(ctx: &CanvasRenderingContext2d, el: &CanvasElement, scale: f64, handle_size: f64) {
    ctx.save();
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(2.0 / scale);
    ctx.stroke_rect(el.x, el.y, el.width, el.height);

    let handle = hit::resize_handle_rect(el, handle_size);
    ctx.set_fill_style_str("rgba(30, 144, 255, 0.25)");
    ctx.fill_rect(handle.x, handle.y, handle.width, handle.height);
    ctx.stroke_rect(handle.x, handle.y, handle.width, handle.height);
    ctx.restore();
}

// =============================================================
// Minimap
// =============================================================

/// Draw the minimap at screen position `(x, y)`, clipped to its frame.
fn draw_minimap(ctx: &CanvasRenderingContext2d, view: &MinimapView, x: f64, y: f64, size: Size) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
    ctx.fill_rect(x, y, size.width, size.height);
    ctx.set_stroke_style_str("#CCCCCC");
    ctx.set_line_width(1.0);
    ctx.stroke_rect(x, y, size.width, size.height);

    ctx.begin_path();
    ctx.rect(x, y, size.width, size.height);
    ctx.clip();
    ctx.translate(x, y)?;

    for el in &view.elements {
        let fill = if el.kind == ElementKind::Sticky { el.color.as_str() } else { "#999999" };
        ctx.set_fill_style_str(fill);
        ctx.fill_rect(el.rect.x, el.rect.y, el.rect.width, el.rect.height);
    }

    let vp = view.viewport;
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(1.5);
    ctx.stroke_rect(vp.x, vp.y, vp.width, vp.height);

    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Translate to the element's center and rotate by its rotation angle.
fn translate_and_rotate(ctx: &CanvasRenderingContext2d, el: &CanvasElement) -> Result<(), JsValue> {
    let c = el.center();
    ctx.translate(c.x, c.y)?;
    ctx.rotate(el.rotation.to_radians())?;
    Ok(())
}
