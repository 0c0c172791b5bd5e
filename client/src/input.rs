//! DOM mouse event mapping and outcome application.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use viewer::geometry::Point;
use viewer::input::{Button, EventKind, Modifiers, PointerEvent};

pub fn map_modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers { shift, ctrl, alt, meta }
}

/// Build a viewer event from the raw fields of a DOM `MouseEvent`.
pub fn pointer_event(kind: EventKind, page_x: i32, page_y: i32, button: i16, modifiers: Modifiers) -> PointerEvent {
    PointerEvent::new(kind, Point::new(f64::from(page_x), f64::from(page_y)))
        .with_button(Button::from_dom(button))
        .with_modifiers(modifiers)
}

#[cfg(feature = "browser")]
pub fn from_mouse_event(kind: EventKind, ev: &web_sys::MouseEvent) -> PointerEvent {
    pointer_event(
        kind,
        ev.page_x(),
        ev.page_y(),
        ev.button(),
        map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key()),
    )
}

#[cfg(feature = "browser")]
pub fn apply_outcome(ev: &web_sys::Event, outcome: viewer::input::EventOutcome) {
    if outcome.prevent_default {
        ev.prevent_default();
    }
    if outcome.stop_propagation {
        ev.stop_propagation();
    }
}
