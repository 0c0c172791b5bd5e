//! Input model: modifier keys, mouse buttons, pointer events and the drag gesture.
//!
//! Button ids follow the DOM `which` numbering the kernel-side peer expects
//! (1 left, 2 middle, 3 right). A shift+left press is reported as button 2 so
//! the peer can tell a pan apart from a plain rotate. The gesture itself is
//! not stored anywhere: it is derived from the synchronized `mouseButton` and
//! `mouseDown` fields.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::{Point, Size};

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
    /// Any other button, carrying the raw DOM `MouseEvent.button` code.
    Other(i16),
}

impl Button {
    /// Map a DOM `MouseEvent.button` code (0 left, 1 middle, 2 right).
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }

    /// The `which`-style id reported to the peer (1 left, 2 middle, 3 right).
    #[must_use]
    pub fn which(self) -> i64 {
        match self {
            Self::Primary => 1,
            Self::Middle => 2,
            Self::Secondary => 3,
            Self::Other(code) => i64::from(code) + 1,
        }
    }
}

/// The button id to report for a press, with shift+left remapped to middle.
#[must_use]
pub fn logical_button(button: Button, modifiers: Modifiers) -> i64 {
    if modifiers.shift && button == Button::Primary {
        Button::Middle.which()
    } else {
        button.which()
    }
}

/// What the peer does with a drag of a given button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Left drag.
    Rotate,
    /// Middle drag, or shift+left drag.
    Pan,
    /// Right drag.
    Zoom,
}

impl DragMode {
    /// Interpret a reported button id.
    #[must_use]
    pub fn from_button_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Self::Rotate),
            2 => Some(Self::Pan),
            3 => Some(Self::Zoom),
            _ => None,
        }
    }
}

/// Pointer gesture derived from the synchronized mouse fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    /// No button held.
    #[default]
    Idle,
    /// A button is held; moves are drags of this button.
    Dragging {
        /// Reported button id.
        button: i64,
    },
}

impl Gesture {
    /// Derive the gesture from `mouseDown` / `mouseButton`.
    #[must_use]
    pub fn from_fields(mouse_down: bool, mouse_button: i64) -> Self {
        if mouse_down { Self::Dragging { button: mouse_button } } else { Self::Idle }
    }

    /// The drag mode of an active gesture, if the button is a known one.
    #[must_use]
    pub fn drag_mode(self) -> Option<DragMode> {
        match self {
            Self::Idle => None,
            Self::Dragging { button } => DragMode::from_button_id(button),
        }
    }
}

/// DOM events the view subscribes to on its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerUp,
    PointerMove,
    Click,
    ContextMenu,
}

impl EventKind {
    /// Every event the view listens for.
    pub const ALL: [EventKind; 5] =
        [Self::PointerDown, Self::PointerUp, Self::PointerMove, Self::Click, Self::ContextMenu];

    /// DOM event type name.
    #[must_use]
    pub fn dom_name(self) -> &'static str {
        match self {
            Self::PointerDown => "mousedown",
            Self::PointerUp => "mouseup",
            Self::PointerMove => "mousemove",
            Self::Click => "click",
            Self::ContextMenu => "contextmenu",
        }
    }

    /// Inverse of [`EventKind::dom_name`].
    #[must_use]
    pub fn from_dom_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.dom_name() == name)
    }
}

/// A pointer event as seen by the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Which DOM event fired.
    pub kind: EventKind,
    /// Pointer position in page coordinates.
    pub page: Point,
    /// Button that changed state (meaningful for down/up).
    pub button: Button,
    /// Modifier keys held at the time of the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    #[must_use]
    pub fn new(kind: EventKind, page: Point) -> Self {
        Self { kind, page, button: Button::Primary, modifiers: Modifiers::default() }
    }

    #[must_use]
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// What the host should do with the DOM event after the view handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Call `preventDefault()`.
    pub prevent_default: bool,
    /// Call `stopPropagation()`.
    pub stop_propagation: bool,
}

impl EventOutcome {
    /// Let the browser proceed.
    pub const PASS: Self = Self { prevent_default: false, stop_propagation: false };
    /// Suppress the browser's default action.
    pub const PREVENT: Self = Self { prevent_default: true, stop_propagation: false };
    /// Suppress the default action and stop the event here.
    pub const SUPPRESS: Self = Self { prevent_default: true, stop_propagation: true };
}

/// Normalize a page-space pointer position to the element's bounds.
///
/// Returns `(0, 0)` when the element has no extent on either axis.
#[must_use]
pub fn normalize_position(page: Point, offset: Point, size: Size) -> Point {
    if size.is_empty() {
        return Point::default();
    }
    let local = page.relative_to(offset);
    Point::new(local.x / size.width, local.y / size.height)
}
