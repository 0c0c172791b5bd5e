#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn map_modifiers_keeps_each_flag() {
    let m = map_modifiers(true, false, true, false);
    assert!(m.shift);
    assert!(!m.ctrl);
    assert!(m.alt);
    assert!(!m.meta);
}

#[test]
fn pointer_event_converts_page_coordinates() {
    let ev = pointer_event(EventKind::PointerMove, 120, -4, 0, Modifiers::default());
    assert_eq!(ev.kind, EventKind::PointerMove);
    assert_eq!(ev.page, Point::new(120.0, -4.0));
}

#[test]
fn pointer_event_maps_dom_button_codes() {
    let left = pointer_event(EventKind::PointerDown, 0, 0, 0, Modifiers::default());
    let middle = pointer_event(EventKind::PointerDown, 0, 0, 1, Modifiers::default());
    let right = pointer_event(EventKind::PointerDown, 0, 0, 2, Modifiers::default());
    assert_eq!(left.button, Button::Primary);
    assert_eq!(middle.button, Button::Middle);
    assert_eq!(right.button, Button::Secondary);
}

#[test]
fn pointer_event_carries_modifiers() {
    let ev = pointer_event(EventKind::PointerDown, 0, 0, 0, map_modifiers(true, false, false, false));
    assert!(ev.modifiers.shift);
}
