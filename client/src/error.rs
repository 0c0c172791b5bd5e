//! Errors surfaced at the JS boundary.

use comm::CodecError;
use viewer::model::ModelError;

/// Anything that can go wrong between the host and the viewer.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    /// An inbound comm message could not be decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// A decoded state patch did not fit the widget state.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// The options object or initial state is not valid JSON of the right shape.
    #[error("invalid {what}: {source}")]
    Json {
        /// Which host input was being parsed.
        what: &'static str,
        /// Underlying parse failure.
        source: serde_json::Error,
    },
    /// A DOM call failed.
    #[error("dom error: {0}")]
    Dom(String),
}

#[cfg(feature = "browser")]
impl From<BindingError> for wasm_bindgen::JsValue {
    fn from(err: BindingError) -> Self {
        log::warn!("{err}");
        js_sys::Error::new(&err.to_string()).into()
    }
}
