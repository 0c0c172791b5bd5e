//! The handle exported to the notebook host.
//!
//! LIFECYCLE
//! =========
//! The host constructs `VaporVisualizer` when it renders a view, forwards
//! every inbound comm message to `handleMessage`, and calls `remove` when the
//! view is torn down. DOM listeners hold clones of the view; `remove` detaches
//! them before unsubscribing the view from the model.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, DataView, Function, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use comm::decode_message_with_buffers;
use viewer::input::EventKind;
use viewer::model::WidgetModel;
use viewer::view::VisualizerView;

use crate::dom::DomSurface;
use crate::error::BindingError;
use crate::input::{apply_outcome, from_mouse_event};
use crate::options::{parse_state_map, parse_view_config};
use crate::sink::JsCommSink;

type View = VisualizerView<DomSurface>;
type MouseListener = Closure<dyn FnMut(MouseEvent)>;

#[wasm_bindgen]
pub struct VaporVisualizer {
    view: Rc<View>,
    listeners: Vec<(EventKind, MouseListener)>,
}

#[wasm_bindgen]
impl VaporVisualizer {
    /// Render a view into `el`.
    ///
    /// `initial_state` is the comm-open state object, `send` forwards one
    /// encoded message to the kernel, `options` is an optional view options
    /// object.
    #[wasm_bindgen(constructor)]
    pub fn new(
        el: web_sys::HtmlElement,
        initial_state: JsValue,
        send: Function,
        options: JsValue,
    ) -> Result<VaporVisualizer, JsValue> {
        let initial = parse_state_map(stringify(&initial_state)?.as_deref())?;
        let config = parse_view_config(stringify(&options)?.as_deref())?;
        let model = WidgetModel::from_state_map(&initial, JsCommSink::new(send)).map_err(BindingError::from)?;
        let surface = DomSurface::mount(&el)?;

        let view = Rc::new(VisualizerView::render(
            Rc::new(RefCell::new(model)),
            Rc::new(RefCell::new(surface)),
            config,
        ));
        let listeners = attach_listeners(&view)?;
        log::info!("visualizer view mounted ({} listeners)", listeners.len());
        Ok(Self { view, listeners })
    }

    /// Apply one inbound comm message with its binary buffers.
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&self, data: JsValue, buffers: Array) -> Result<(), JsValue> {
        let text = stringify(&data)?.ok_or_else(|| BindingError::Dom("message data is undefined".to_owned()))?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| BindingError::Json { what: "comm message", source })?;
        let buffers: Vec<Vec<u8>> = buffers.iter().map(|buffer| buffer_bytes(&buffer)).collect();

        let message = decode_message_with_buffers(&value, &buffers).map_err(BindingError::from)?;
        let changed = self.view.model().borrow_mut().handle_message(message).map_err(BindingError::from)?;
        log::debug!("inbound message changed {changed:?}");
        Ok(())
    }

    /// Ask the kernel to resend its full state.
    #[wasm_bindgen(js_name = requestState)]
    pub fn request_state(&self) {
        self.view.model().borrow_mut().request_state();
    }

    /// The entry to store when the notebook saves widget state.
    #[wasm_bindgen(js_name = embedState)]
    pub fn embed_state(&self) -> Result<JsValue, JsValue> {
        let embedded = self.view.model().borrow().embed_state();
        let text = serde_json::to_string(&embedded)
            .map_err(|source| BindingError::Json { what: "embedded state", source })?;
        js_sys::JSON::parse(&text)
    }

    /// Detach DOM listeners and unsubscribe from the model.
    pub fn remove(self) {
        let Self { view, listeners } = self;
        {
            let surface = view.surface().borrow();
            let image = surface.image();
            for (kind, listener) in &listeners {
                if let Err(err) =
                    image.remove_event_listener_with_callback(kind.dom_name(), listener.as_ref().unchecked_ref())
                {
                    log::warn!("detach {}: {err:?}", kind.dom_name());
                }
            }
        }
        drop(listeners);

        match Rc::try_unwrap(view) {
            Ok(view) => view.remove(),
            Err(_) => log::warn!("view still shared at removal; model listeners left attached"),
        }
    }
}

fn attach_listeners(view: &Rc<View>) -> Result<Vec<(EventKind, MouseListener)>, BindingError> {
    let surface = view.surface().borrow();
    let image = surface.image();
    let mut listeners = Vec::with_capacity(surface.listened().len());

    for &kind in surface.listened() {
        let target = Rc::clone(view);
        let listener = Closure::wrap(Box::new(move |ev: MouseEvent| {
            let outcome = target.handle(&from_mouse_event(kind, &ev));
            apply_outcome(&ev, outcome);
        }) as Box<dyn FnMut(MouseEvent)>);

        image
            .add_event_listener_with_callback(kind.dom_name(), listener.as_ref().unchecked_ref())
            .map_err(|err| BindingError::Dom(format!("attach {}: {err:?}", kind.dom_name())))?;
        listeners.push((kind, listener));
    }
    Ok(listeners)
}

/// `JSON.stringify` a host object; `None` for `undefined` / `null`.
fn stringify(value: &JsValue) -> Result<Option<String>, BindingError> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    js_sys::JSON::stringify(value)
        .map(|text| Some(String::from(text)))
        .map_err(|err| BindingError::Dom(format!("stringify: {err:?}")))
}

/// Copy a host buffer (`ArrayBuffer`, `DataView` or typed array) into Rust.
#[allow(clippy::cast_possible_truncation)]
fn buffer_bytes(buffer: &JsValue) -> Vec<u8> {
    match buffer.dyn_ref::<DataView>() {
        Some(view) => {
            let offset = view.byte_offset() as u32;
            let length = view.byte_length() as u32;
            Uint8Array::new_with_byte_offset_and_length(&view.buffer(), offset, length).to_vec()
        }
        None => Uint8Array::new(buffer).to_vec(),
    }
}
