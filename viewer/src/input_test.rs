#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
}

// =============================================================
// Button
// =============================================================

#[test]
fn button_from_dom_codes() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
    assert_eq!(Button::from_dom(4), Button::Other(4));
}

#[test]
fn button_which_ids() {
    assert_eq!(Button::Primary.which(), 1);
    assert_eq!(Button::Middle.which(), 2);
    assert_eq!(Button::Secondary.which(), 3);
    assert_eq!(Button::Other(3).which(), 4);
}

#[test]
fn logical_button_plain_left_is_one() {
    assert_eq!(logical_button(Button::Primary, Modifiers::default()), 1);
}

#[test]
fn logical_button_shift_left_is_two() {
    let shift = Modifiers { shift: true, ..Modifiers::default() };
    assert_eq!(logical_button(Button::Primary, shift), 2);
}

#[test]
fn logical_button_shift_right_keeps_raw_id() {
    let shift = Modifiers { shift: true, ..Modifiers::default() };
    assert_eq!(logical_button(Button::Secondary, shift), 3);
}

#[test]
fn logical_button_ctrl_left_is_not_remapped() {
    let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
    assert_eq!(logical_button(Button::Primary, ctrl), 1);
}

// =============================================================
// Gesture
// =============================================================

#[test]
fn gesture_idle_when_not_pressed() {
    assert_eq!(Gesture::from_fields(false, 3), Gesture::Idle);
    assert_eq!(Gesture::Idle.drag_mode(), None);
}

#[test]
fn gesture_modes_follow_button_ids() {
    assert_eq!(Gesture::from_fields(true, 1).drag_mode(), Some(DragMode::Rotate));
    assert_eq!(Gesture::from_fields(true, 2).drag_mode(), Some(DragMode::Pan));
    assert_eq!(Gesture::from_fields(true, 3).drag_mode(), Some(DragMode::Zoom));
}

#[test]
fn gesture_with_unknown_button_has_no_mode() {
    let gesture = Gesture::from_fields(true, 5);
    assert_eq!(gesture, Gesture::Dragging { button: 5 });
    assert_eq!(gesture.drag_mode(), None);
}

// =============================================================
// EventKind
// =============================================================

#[test]
fn event_kind_dom_names_round_trip() {
    for kind in EventKind::ALL {
        assert_eq!(EventKind::from_dom_name(kind.dom_name()), Some(kind));
    }
}

#[test]
fn event_kind_unknown_dom_name() {
    assert_eq!(EventKind::from_dom_name("wheel"), None);
}

// =============================================================
// PointerEvent / EventOutcome
// =============================================================

#[test]
fn pointer_event_builders() {
    let shift = Modifiers { shift: true, ..Modifiers::default() };
    let ev = PointerEvent::new(EventKind::PointerDown, Point::new(1.0, 2.0))
        .with_button(Button::Secondary)
        .with_modifiers(shift);
    assert_eq!(ev.button, Button::Secondary);
    assert!(ev.modifiers.shift);
    assert_eq!(ev.page, Point::new(1.0, 2.0));
}

#[test]
fn event_outcome_default_passes() {
    assert_eq!(EventOutcome::default(), EventOutcome::PASS);
    assert!(EventOutcome::SUPPRESS.prevent_default && EventOutcome::SUPPRESS.stop_propagation);
}

// =============================================================
// normalize_position
// =============================================================

#[test]
fn normalize_divides_by_element_size() {
    let pos = normalize_position(Point::new(150.0, 120.0), Point::new(100.0, 100.0), Size::new(200.0, 80.0));
    assert_eq!(pos, Point::new(0.25, 0.25));
}

#[test]
fn normalize_zero_width_yields_origin() {
    let pos = normalize_position(Point::new(150.0, 120.0), Point::new(100.0, 100.0), Size::new(0.0, 80.0));
    assert_eq!(pos, Point::new(0.0, 0.0));
    assert!(!pos.x.is_nan() && !pos.y.is_nan());
}

#[test]
fn normalize_zero_height_yields_origin() {
    let pos = normalize_position(Point::new(150.0, 120.0), Point::new(0.0, 0.0), Size::new(10.0, 0.0));
    assert_eq!(pos, Point::new(0.0, 0.0));
}

#[test]
fn normalize_bottom_right_corner_is_one() {
    let pos = normalize_position(Point::new(740.0, 580.0), Point::new(100.0, 100.0), Size::new(640.0, 480.0));
    assert_eq!(pos, Point::new(1.0, 1.0));
}
