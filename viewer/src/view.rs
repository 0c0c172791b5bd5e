//! The interactive view bound to one [`WidgetModel`].
//!
//! ARCHITECTURE
//! ============
//! `VisualizerView` owns nothing but handles: a shared model, a shared surface
//! and its config. Setup registers two change listeners on the model, each
//! capturing the surface, so inbound patches re-render without going through
//! the view. Pointer events come in through [`VisualizerView::handle`]; each
//! handler reads layout from the surface, writes the model, and commits.
//!
//! Pointer moves are committed whether or not a button is held; the peer
//! decides what a move without a press means.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CURSOR, GESTURE_TOOLTIP};
use crate::input::{EventKind, EventOutcome, PointerEvent, logical_button, normalize_position};
use crate::model::{Field, FieldUpdate, ListenerId, WidgetModel, WidgetState};
use crate::surface::{Region, Surface};

/// Presentation options for one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Tooltip on the image.
    pub tooltip: String,
    /// CSS cursor over the image.
    pub cursor: String,
    /// Image shown until the first frame with a format arrives.
    pub placeholder_src: Option<String>,
    /// Mount a region showing the `value` text.
    pub show_value: bool,
    /// Mount a diagnostic region showing value and dimensions.
    pub show_debug: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            tooltip: GESTURE_TOOLTIP.to_owned(),
            cursor: DEFAULT_CURSOR.to_owned(),
            placeholder_src: None,
            show_value: false,
            show_debug: false,
        }
    }
}

/// The `src` for a frame: `data:image/<format>;base64,<data>`.
#[must_use]
pub fn data_uri(format: &str, data: &str) -> String {
    format!("data:image/{format};base64,{data}")
}

/// Reflect resolution, format and image data onto the surface.
///
/// Dimensions are always written. `src` is written only when a format is set;
/// with an empty format the previous image stays in place.
pub fn render_image(surface: &mut dyn Surface, state: &WidgetState, config: &ViewConfig) {
    let width = state.resolution.width.to_string();
    let height = state.resolution.height.to_string();
    surface.set_attribute("width", &width);
    surface.set_attribute("height", &height);

    if !state.image_format.is_empty() {
        surface.set_attribute("src", &data_uri(&state.image_format, &state.image_data));
    }

    if config.show_debug {
        surface.set_text(Region::Debug, &format!("{} w: {width} h: {height}", state.value));
    }
}

/// Reflect the `value` text onto the value region, when mounted.
pub fn render_value(surface: &mut dyn Surface, state: &WidgetState, config: &ViewConfig) {
    if config.show_value {
        surface.set_text(Region::Value, &state.value);
    }
}

/// One rendered widget view.
pub struct VisualizerView<S: Surface> {
    model: Rc<RefCell<WidgetModel>>,
    surface: Rc<RefCell<S>>,
    config: Rc<ViewConfig>,
    listeners: Vec<ListenerId>,
}

impl<S: Surface + 'static> VisualizerView<S> {
    /// Set up the element, subscribe to the model, and render once.
    pub fn render(model: Rc<RefCell<WidgetModel>>, surface: Rc<RefCell<S>>, config: ViewConfig) -> Self {
        {
            let mut surface = surface.borrow_mut();
            if let Some(src) = &config.placeholder_src {
                surface.set_attribute("src", src);
            }
            surface.set_attribute("draggable", "false");
            surface.set_style("user-select", "none");
            surface.set_attribute("title", &config.tooltip);
            surface.set_style("cursor", &config.cursor);
            for kind in EventKind::ALL {
                surface.listen(kind);
            }
            if config.show_value {
                surface.mount_region(Region::Value);
            }
            if config.show_debug {
                surface.mount_region(Region::Debug);
            }
        }

        let config = Rc::new(config);
        let mut listeners = Vec::with_capacity(2);
        {
            let mut model = model.borrow_mut();

            let image_surface = Rc::clone(&surface);
            let image_config = Rc::clone(&config);
            listeners.push(model.on_change(&[Field::ImageData, Field::ImageFormat, Field::Resolution], move |state| {
                render_image(&mut *image_surface.borrow_mut(), state, &image_config);
            }));

            let value_surface = Rc::clone(&surface);
            let value_config = Rc::clone(&config);
            listeners.push(model.on_change(&[Field::Value], move |state| {
                render_value(&mut *value_surface.borrow_mut(), state, &value_config);
            }));
        }

        let view = Self { model, surface, config, listeners };
        view.render_image();
        view.render_value();
        log::debug!("view rendered");
        view
    }

    /// Re-run the image render step against the current state.
    pub fn render_image(&self) {
        let model = self.model.borrow();
        render_image(&mut *self.surface.borrow_mut(), model.state(), &self.config);
    }

    /// Re-run the value render step against the current state.
    pub fn render_value(&self) {
        let model = self.model.borrow();
        render_value(&mut *self.surface.borrow_mut(), model.state(), &self.config);
    }

    /// Route one DOM event to its handler.
    pub fn handle(&self, event: &PointerEvent) -> EventOutcome {
        match event.kind {
            EventKind::PointerDown => self.on_pointer_down(event),
            EventKind::PointerUp => self.on_pointer_up(event),
            EventKind::PointerMove => self.on_pointer_move(event),
            EventKind::Click => EventOutcome::PREVENT,
            EventKind::ContextMenu => EventOutcome::SUPPRESS,
        }
    }

    /// Record the pressed button (shift+left reported as 2) and commit.
    pub fn on_pointer_down(&self, event: &PointerEvent) -> EventOutcome {
        let button = logical_button(event.button, event.modifiers);
        let mut model = self.model.borrow_mut();
        model.set(FieldUpdate::MouseButton(button));
        model.set(FieldUpdate::MouseDown(true));
        model.commit();
        EventOutcome::PREVENT
    }

    /// Clear the pressed state and commit.
    pub fn on_pointer_up(&self, _event: &PointerEvent) -> EventOutcome {
        self.surface.borrow_mut().set_style("border", "none");
        let mut model = self.model.borrow_mut();
        model.set(FieldUpdate::MouseDown(false));
        model.commit();
        EventOutcome::PREVENT
    }

    /// Record the pointer position normalized to the element and commit.
    pub fn on_pointer_move(&self, event: &PointerEvent) -> EventOutcome {
        let (offset, size) = {
            let surface = self.surface.borrow();
            (surface.offset(), surface.size())
        };
        let pos = normalize_position(event.page, offset, size);
        log::trace!("pointer move ({}, {})", pos.x, pos.y);
        let mut model = self.model.borrow_mut();
        model.set(FieldUpdate::MousePos(pos.into()));
        model.commit();
        EventOutcome::PASS
    }

    #[must_use]
    pub fn model(&self) -> &Rc<RefCell<WidgetModel>> {
        &self.model
    }

    #[must_use]
    pub fn surface(&self) -> &Rc<RefCell<S>> {
        &self.surface
    }

    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Tear down: unsubscribe from the model. The surface is left as is.
    pub fn remove(self) {
        let mut model = self.model.borrow_mut();
        for id in self.listeners {
            model.off(id);
        }
        log::debug!("view removed");
    }
}
