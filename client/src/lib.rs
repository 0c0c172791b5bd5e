//! # client
//!
//! WebAssembly binding for the notebook visualizer widget.
//!
//! The notebook host creates one [`widget::VaporVisualizer`] per displayed
//! view, handing it the container element, the initial synchronized state, and
//! a JS function that forwards messages to the kernel. Everything behavioural
//! lives in the `viewer` crate; this crate adapts it to the DOM:
//!
//! | Module | Role |
//! |--------|------|
//! | [`dom`] | `Surface` over an `<img>` element and its text regions |
//! | [`sink`] | `CommSink` that calls the host's send function |
//! | [`widget`] | The exported handle: construction, message intake, teardown |
//! | [`input`] | DOM mouse event → viewer `PointerEvent` mapping |
//! | [`options`] | Parsing the host's JSON options and initial state |
//! | [`error`] | Binding error type |
//!
//! `dom`, `sink` and `widget` need a browser and are gated behind the
//! `browser` feature; the rest builds and tests natively.

#[cfg(feature = "browser")]
pub mod dom;
pub mod error;
pub mod input;
pub mod options;
#[cfg(feature = "browser")]
pub mod sink;
#[cfg(feature = "browser")]
pub mod widget;

/// Install the panic hook and console logger. Runs once when the module loads.
#[cfg(feature = "browser")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already installed: {err}").into());
    }
}
