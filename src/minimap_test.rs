#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn rect_approx_eq(a: Rect, b: Rect) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.width, b.width) && approx_eq(a.height, b.height)
}

fn projector() -> MinimapProjector {
    MinimapProjector::new(MinimapConfig::default())
}

fn bounds_relative_projector() -> MinimapProjector {
    MinimapProjector::new(MinimapConfig { viewport_relative_to_bounds: true, ..Default::default() })
}

fn make_element_at(x: f64, y: f64, w: f64, h: f64) -> CanvasElement {
    CanvasElement {
        id: Uuid::new_v4(),
        kind: ElementKind::Sticky,
        x,
        y,
        width: w,
        height: h,
        content: None,
        color: "#FFFF88".into(),
        rotation: 0.0,
        z_index: 0,
        points: None,
    }
}

const LAYOUT: Size = Size { width: 1000.0, height: 800.0 };

// =============================================================
// Bounds
// =============================================================

#[test]
fn empty_canvas_uses_fallback_bounds() {
    let b = projector().bounds(&[]);
    assert_eq!(b, Bounds { min_x: -1000.0, min_y: -1000.0, max_x: 1000.0, max_y: 1000.0 });
}

#[test]
fn bounds_are_padded_union() {
    let a = make_element_at(100.0, 50.0, 200.0, 200.0);
    let b = make_element_at(-300.0, 400.0, 50.0, 60.0);
    let bounds = projector().bounds(&[a, b]);
    assert_eq!(bounds, Bounds { min_x: -500.0, min_y: -150.0, max_x: 500.0, max_y: 660.0 });
}

// =============================================================
// Element projection
// =============================================================

#[test]
fn element_projects_relative_to_bounds_origin() {
    let a = make_element_at(100.0, 50.0, 200.0, 200.0);
    let b = make_element_at(-300.0, 400.0, 50.0, 60.0);
    let p = projector();
    let bounds = p.bounds(&[a.clone(), b]);
    let r = p.project_element(&a, &bounds);
    assert!(rect_approx_eq(r, Rect::new(30.0, 10.0, 10.0, 10.0)), "{r:?}");
}

#[test]
fn world_minimap_round_trip() {
    let p = projector();
    let bounds = Bounds { min_x: -321.0, min_y: 77.0, max_x: 900.0, max_y: 1200.0 };
    let world = Point::new(12.5, 640.25);
    let back = p.minimap_to_world(p.world_to_minimap(world, &bounds), &bounds);
    assert!(approx_eq(back.x, world.x) && approx_eq(back.y, world.y));
}

// =============================================================
// Viewport rectangle
// =============================================================

#[test]
fn viewport_placeholder_before_layout() {
    let p = projector();
    let bounds = p.bounds(&[]);
    let r = p.viewport_rect(&Camera::default(), None, &bounds);
    assert_eq!(r, Rect::new(0.0, 0.0, 75.0, 50.0));
}

#[test]
fn viewport_rect_at_identity_camera() {
    let p = projector();
    let bounds = p.bounds(&[]);
    let r = p.viewport_rect(&Camera::default(), Some(LAYOUT), &bounds);
    assert!(rect_approx_eq(r, Rect::new(0.0, 0.0, 50.0, 40.0)), "{r:?}");
}

#[test]
fn viewport_rect_inverts_camera() {
    let p = projector();
    let el = make_element_at(0.0, 0.0, 100.0, 100.0);
    let bounds = p.bounds(&[el]);
    let camera = Camera { offset_x: -200.0, offset_y: 100.0, scale: 2.0 };
    // Visible world rect: top-left (100, -50), size 500 x 400. No bounds offset.
    let r = p.viewport_rect(&camera, Some(LAYOUT), &bounds);
    assert!(rect_approx_eq(r, Rect::new(5.0, -2.5, 25.0, 20.0)), "{r:?}");
}

#[test]
fn viewport_rect_relative_to_bounds_when_enabled() {
    let p = bounds_relative_projector();
    let bounds = p.bounds(&[]);
    let camera = Camera { offset_x: -200.0, offset_y: 100.0, scale: 2.0 };
    let r = p.viewport_rect(&camera, Some(LAYOUT), &bounds);
    assert!(rect_approx_eq(r, Rect::new(55.0, 47.5, 25.0, 20.0)), "{r:?}");
}

#[test]
fn viewport_rect_ignores_main_scale_for_minimap_scale() {
    let p = projector();
    let bounds = p.bounds(&[]);
    let zoomed_out = Camera { offset_x: 0.0, offset_y: 0.0, scale: 0.5 };
    let r = p.viewport_rect(&zoomed_out, Some(LAYOUT), &bounds);
    assert!(approx_eq(r.width, 100.0));
    assert!(approx_eq(r.height, 80.0));
}

// =============================================================
// Navigation
// =============================================================

#[test]
fn navigate_without_layout_is_none() {
    let p = projector();
    let bounds = p.bounds(&[]);
    assert!(p.navigate(Point::new(10.0, 10.0), &Camera::default(), None, &bounds).is_none());
}

#[test]
fn navigate_keeps_scale() {
    let p = projector();
    let bounds = p.bounds(&[]);
    let camera = Camera { offset_x: 3.0, offset_y: 4.0, scale: 2.5 };
    let next = p.navigate(Point::new(10.0, 10.0), &camera, Some(LAYOUT), &bounds).unwrap();
    assert_eq!(next.scale, 2.5);
}

#[test]
fn navigate_to_element_center_centres_element_on_screen() {
    let p = projector();
    let el = make_element_at(100.0, 50.0, 200.0, 200.0);
    let bounds = p.bounds(std::slice::from_ref(&el));
    let projected = p.project_element(&el, &bounds);
    let camera = Camera { offset_x: -77.0, offset_y: 12.0, scale: 1.5 };
    let next = p.navigate(projected.center(), &camera, Some(LAYOUT), &bounds).unwrap();
    let screen = next.world_to_screen(el.center());
    assert!(approx_eq(screen.x, 500.0), "{screen:?}");
    assert!(approx_eq(screen.y, 400.0), "{screen:?}");
}

#[test]
fn navigate_offset_formula() {
    let p = projector();
    let bounds = p.bounds(&[]);
    // local (50, 50) -> world (0, 0) with the fallback bounds.
    let camera = Camera { offset_x: 0.0, offset_y: 0.0, scale: 2.0 };
    let next = p.navigate(Point::new(50.0, 50.0), &camera, Some(LAYOUT), &bounds).unwrap();
    assert!(approx_eq(next.offset_x, 500.0));
    assert!(approx_eq(next.offset_y, 400.0));
}

#[test]
fn navigated_viewport_is_centred_on_click_when_relative_to_bounds() {
    let p = bounds_relative_projector();
    let bounds = p.bounds(&[]);
    let click = Point::new(60.0, 35.0);
    let next = p.navigate(click, &Camera::default(), Some(LAYOUT), &bounds).unwrap();
    let r = p.viewport_rect(&next, Some(LAYOUT), &bounds);
    let c = r.center();
    assert!(approx_eq(c.x, click.x) && approx_eq(c.y, click.y), "{c:?}");
}

#[test]
fn navigated_viewport_centres_on_clicked_world_point() {
    let p = projector();
    let bounds = p.bounds(&[]);
    // Local (60, 35) with the fallback bounds is world (200, -300).
    let next = p.navigate(Point::new(60.0, 35.0), &Camera::default(), Some(LAYOUT), &bounds).unwrap();
    let c = p.viewport_rect(&next, Some(LAYOUT), &bounds).center();
    assert!(approx_eq(c.x, 10.0) && approx_eq(c.y, -15.0), "{c:?}");
}

// =============================================================
// Screen placement
// =============================================================

#[test]
fn screen_rect_anchors_bottom_right() {
    assert_eq!(projector().screen_rect(LAYOUT), Rect::new(834.0, 684.0, 150.0, 100.0));
}

#[test]
fn screen_to_local_inside_and_outside() {
    let p = projector();
    assert_eq!(p.screen_to_local(Point::new(840.0, 700.0), LAYOUT), Some(Point::new(6.0, 16.0)));
    assert_eq!(p.screen_to_local(Point::new(100.0, 100.0), LAYOUT), None);
}

#[test]
fn view_projects_every_element() {
    let p = projector();
    let a = make_element_at(0.0, 0.0, 100.0, 100.0);
    let b = make_element_at(500.0, 500.0, 100.0, 100.0);
    let view = p.view(&[a.clone(), b.clone()], &Camera::default(), None);
    assert_eq!(view.elements.len(), 2);
    assert_eq!(view.elements[0].id, a.id);
    assert_eq!(view.elements[1].id, b.id);
    assert_eq!(view.viewport, Rect::new(0.0, 0.0, 75.0, 50.0));
    assert_eq!(view.bounds.min_x, -200.0);
}
