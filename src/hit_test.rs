use uuid::Uuid;

use super::*;
use crate::doc::ElementKind;

const HANDLE: f64 = 40.0;

fn make_element_at(x: f64, y: f64, w: f64, h: f64, z: i64) -> CanvasElement {
    CanvasElement {
        id: Uuid::new_v4(),
        kind: ElementKind::Rectangle,
        x,
        y,
        width: w,
        height: h,
        content: None,
        color: "#000000".into(),
        rotation: 0.0,
        z_index: z,
        points: None,
    }
}

fn store_of(elements: &[&CanvasElement]) -> ElementStore {
    let mut store = ElementStore::new();
    for el in elements {
        store.insert((*el).clone());
    }
    store
}

fn selected(ids: &[ElementId]) -> Selection {
    let mut sel = Selection::default();
    for id in ids {
        sel.toggle(*id);
    }
    sel
}

// =============================================================
// resize_handle_rect
// =============================================================

#[test]
fn handle_sits_in_bottom_right_corner() {
    let el = make_element_at(10.0, 20.0, 200.0, 100.0, 0);
    assert_eq!(resize_handle_rect(&el, HANDLE), Rect::new(170.0, 80.0, 40.0, 40.0));
}

#[test]
fn handle_overhangs_small_elements() {
    let el = make_element_at(0.0, 0.0, 30.0, 30.0, 0);
    let r = resize_handle_rect(&el, HANDLE);
    assert_eq!((r.x, r.y), (-10.0, -10.0));
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn empty_store_hits_nothing() {
    let store = ElementStore::new();
    assert!(hit_test(Point::new(0.0, 0.0), &store, &Selection::default(), HANDLE).is_none());
}

#[test]
fn miss_outside_all_elements() {
    let a = make_element_at(0.0, 0.0, 100.0, 100.0, 0);
    let store = store_of(&[&a]);
    assert!(hit_test(Point::new(150.0, 50.0), &store, &Selection::default(), HANDLE).is_none());
}

#[test]
fn body_hit() {
    let a = make_element_at(0.0, 0.0, 100.0, 100.0, 0);
    let store = store_of(&[&a]);
    let hit = hit_test(Point::new(50.0, 50.0), &store, &Selection::default(), HANDLE).unwrap();
    assert_eq!(hit, Hit { element_id: a.id, part: HitPart::Body });
}

#[test]
fn handle_ignored_when_unselected() {
    let a = make_element_at(0.0, 0.0, 100.0, 100.0, 0);
    let store = store_of(&[&a]);
    let hit = hit_test(Point::new(95.0, 95.0), &store, &Selection::default(), HANDLE).unwrap();
    assert_eq!(hit.part, HitPart::Body);
}

#[test]
fn handle_hit_when_selected() {
    let a = make_element_at(0.0, 0.0, 100.0, 100.0, 0);
    let store = store_of(&[&a]);
    let hit = hit_test(Point::new(95.0, 95.0), &store, &selected(&[a.id]), HANDLE).unwrap();
    assert_eq!(hit, Hit { element_id: a.id, part: HitPart::ResizeHandle });
}

#[test]
fn selected_body_outside_handle_is_body() {
    let a = make_element_at(0.0, 0.0, 100.0, 100.0, 0);
    let store = store_of(&[&a]);
    let hit = hit_test(Point::new(20.0, 20.0), &store, &selected(&[a.id]), HANDLE).unwrap();
    assert_eq!(hit.part, HitPart::Body);
}

#[test]
fn higher_z_wins() {
    let low = make_element_at(0.0, 0.0, 100.0, 100.0, 0);
    let high = make_element_at(50.0, 50.0, 100.0, 100.0, 1);
    // Insert the higher one first so z-order, not insertion, decides.
    let store = store_of(&[&high, &low]);
    let hit = hit_test(Point::new(75.0, 75.0), &store, &Selection::default(), HANDLE).unwrap();
    assert_eq!(hit.element_id, high.id);
}

#[test]
fn equal_z_later_insertion_wins() {
    let first = make_element_at(0.0, 0.0, 100.0, 100.0, 0);
    let second = make_element_at(0.0, 0.0, 100.0, 100.0, 0);
    let store = store_of(&[&first, &second]);
    let hit = hit_test(Point::new(10.0, 10.0), &store, &Selection::default(), HANDLE).unwrap();
    assert_eq!(hit.element_id, second.id);
}

#[test]
fn upper_body_covers_lower_selected_handle() {
    let lower = make_element_at(0.0, 0.0, 100.0, 100.0, 0);
    let upper = make_element_at(80.0, 80.0, 100.0, 100.0, 1);
    let store = store_of(&[&lower, &upper]);
    let hit = hit_test(Point::new(90.0, 90.0), &store, &selected(&[lower.id]), HANDLE).unwrap();
    assert_eq!(hit, Hit { element_id: upper.id, part: HitPart::Body });
}
