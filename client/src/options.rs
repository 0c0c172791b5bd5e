//! Parsing of host-supplied JSON: view options and the initial state.
//!
//! The host passes plain JS objects; the widget handle stringifies them and
//! hands the text here so parsing stays testable without a browser. A missing
//! object (`undefined` / `null`) means "use the defaults".

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;

use comm::StateMap;
use viewer::view::ViewConfig;

use crate::error::BindingError;

/// Parse the view options. Absent options and absent keys take defaults.
///
/// # Errors
///
/// Returns [`BindingError::Json`] if the text is not an options object.
pub fn parse_view_config(json: Option<&str>) -> Result<ViewConfig, BindingError> {
    match json {
        None => Ok(ViewConfig::default()),
        Some(text) => serde_json::from_str(text).map_err(|source| BindingError::Json { what: "view options", source }),
    }
}

/// Parse the initial state map the host opened the comm with.
///
/// # Errors
///
/// Returns [`BindingError::Json`] if the text is not a JSON object.
pub fn parse_state_map(json: Option<&str>) -> Result<StateMap, BindingError> {
    match json {
        None => Ok(StateMap::new()),
        Some(text) => serde_json::from_str(text).map_err(|source| BindingError::Json { what: "initial state", source }),
    }
}
