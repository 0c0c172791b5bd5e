//! Outbound comm: hands encoded messages to the host's send function.

use js_sys::Function;
use wasm_bindgen::JsValue;

use comm::{CommMessage, encode_message};
use viewer::model::CommSink;

/// Calls `send(message)` on the host for every outbound message.
pub struct JsCommSink {
    send: Function,
}

impl JsCommSink {
    pub fn new(send: Function) -> Self {
        Self { send }
    }
}

impl CommSink for JsCommSink {
    fn send(&mut self, message: CommMessage) {
        let encoded = match encode_message(&message) {
            Ok(encoded) => encoded,
            Err(err) => {
                log::warn!("dropping {} message: {err}", message.method());
                return;
            }
        };
        let payload = match js_sys::JSON::parse(&encoded.to_string()) {
            Ok(payload) => payload,
            Err(err) => {
                log::warn!("dropping {} message: {err:?}", message.method());
                return;
            }
        };
        if let Err(err) = self.send.call1(&JsValue::NULL, &payload) {
            log::warn!("host send failed for {}: {err:?}", message.method());
        }
    }
}
