//! Widget comm message model and JSON codec.
//!
//! This crate owns the wire representation exchanged between the browser view
//! and its kernel-side peer over the notebook host's comm channel. State
//! payloads stay flexible (`serde_json` maps keyed by wire field name); the
//! typed interpretation of individual fields lives in the `viewer` crate.
//!
//! Binary payloads travel out-of-band: the host delivers them as a list of raw
//! buffers alongside `buffer_paths`, and [`decode_message_with_buffers`]
//! inlines each buffer into the state as standard base64 text.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Version of the widget message protocol this crate speaks.
pub const PROTOCOL_VERSION: &str = "2.1.0";

/// A (partial) widget state keyed by wire field name.
pub type StateMap = Map<String, Value>;

/// Error returned by the decode functions.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The message is not valid JSON or does not match any known method.
    #[error("failed to decode comm message: {0}")]
    Json(#[from] serde_json::Error),
    /// The host delivered a different number of buffers than the message names.
    #[error("message names {paths} buffer paths but {buffers} buffers were delivered")]
    BufferCountMismatch {
        /// Number of entries in `buffer_paths`.
        paths: usize,
        /// Number of raw buffers delivered with the message.
        buffers: usize,
    },
    /// A buffer path does not resolve to a location inside the state.
    #[error("buffer path '{0}' does not resolve inside the state")]
    InvalidBufferPath(String),
}

/// One step of a buffer path: an object key or an array index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Key into a JSON object.
    Key(String),
    /// Index into a JSON array.
    Index(usize),
}

/// A single message on the widget comm channel, tagged by `method`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum CommMessage {
    /// Partial state change. Sent by both sides.
    Update {
        /// Changed fields only.
        state: StateMap,
        /// Locations in `state` that are filled by out-of-band binary buffers.
        #[serde(default)]
        buffer_paths: Vec<Vec<PathSegment>>,
    },
    /// The peer acknowledging a state change by echoing it back.
    EchoUpdate {
        /// Echoed fields.
        state: StateMap,
        /// Locations in `state` that are filled by out-of-band binary buffers.
        #[serde(default)]
        buffer_paths: Vec<Vec<PathSegment>>,
    },
    /// Ask the peer for its full state.
    RequestState,
    /// Application-defined payload outside the state sync contract.
    Custom {
        /// Arbitrary JSON content.
        #[serde(default)]
        content: Value,
    },
}

impl CommMessage {
    /// Build an `update` carrying the given fields and no binary buffers.
    #[must_use]
    pub fn update(state: StateMap) -> Self {
        Self::Update { state, buffer_paths: Vec::new() }
    }

    /// The state patch carried by `update` / `echo_update`, if any.
    #[must_use]
    pub fn state(&self) -> Option<&StateMap> {
        match self {
            Self::Update { state, .. } | Self::EchoUpdate { state, .. } => Some(state),
            Self::RequestState | Self::Custom { .. } => None,
        }
    }

    /// The wire `method` name of this message.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Self::Update { .. } => "update",
            Self::EchoUpdate { .. } => "echo_update",
            Self::RequestState => "request_state",
            Self::Custom { .. } => "custom",
        }
    }
}

/// Encode a message into its JSON wire form.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if a custom payload cannot be represented as JSON.
pub fn encode_message(message: &CommMessage) -> Result<Value, CodecError> {
    Ok(serde_json::to_value(message)?)
}

/// Decode a JSON wire message that carries no binary buffers.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for unknown methods or malformed fields.
pub fn decode_message(data: &Value) -> Result<CommMessage, CodecError> {
    Ok(CommMessage::deserialize(data)?)
}

/// Decode a JSON wire message and inline its binary buffers into the state.
///
/// On success the returned `update` / `echo_update` has an empty
/// `buffer_paths`; every named location holds the base64 text of its buffer.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed messages,
/// [`CodecError::BufferCountMismatch`] when the buffers do not pair up with the
/// paths, and [`CodecError::InvalidBufferPath`] for unresolvable paths.
pub fn decode_message_with_buffers(data: &Value, buffers: &[Vec<u8>]) -> Result<CommMessage, CodecError> {
    let mut message = decode_message(data)?;
    match &mut message {
        CommMessage::Update { state, buffer_paths } | CommMessage::EchoUpdate { state, buffer_paths } => {
            inline_buffers(state, buffer_paths, buffers)?;
            buffer_paths.clear();
        }
        CommMessage::RequestState | CommMessage::Custom { .. } => {
            if !buffers.is_empty() {
                return Err(CodecError::BufferCountMismatch { paths: 0, buffers: buffers.len() });
            }
        }
    }
    Ok(message)
}

/// Write each buffer into `state` at its path, as standard base64 text.
///
/// # Errors
///
/// See [`decode_message_with_buffers`].
pub fn inline_buffers(state: &mut StateMap, paths: &[Vec<PathSegment>], buffers: &[Vec<u8>]) -> Result<(), CodecError> {
    if paths.len() != buffers.len() {
        return Err(CodecError::BufferCountMismatch { paths: paths.len(), buffers: buffers.len() });
    }
    for (path, buffer) in paths.iter().zip(buffers) {
        insert_at_path(state, path, Value::String(STANDARD.encode(buffer)))?;
    }
    Ok(())
}

fn insert_at_path(state: &mut StateMap, path: &[PathSegment], encoded: Value) -> Result<(), CodecError> {
    let invalid = || CodecError::InvalidBufferPath(display_path(path));

    let Some((PathSegment::Key(root), rest)) = path.split_first() else {
        return Err(invalid());
    };
    let Some((leaf, middle)) = rest.split_last() else {
        state.insert(root.clone(), encoded);
        return Ok(());
    };

    let mut cursor = state.get_mut(root).ok_or_else(invalid)?;
    for segment in middle {
        cursor = match (segment, cursor) {
            (PathSegment::Key(key), Value::Object(map)) => map.get_mut(key),
            (PathSegment::Index(index), Value::Array(items)) => items.get_mut(*index),
            _ => None,
        }
        .ok_or_else(invalid)?;
    }

    match (leaf, cursor) {
        (PathSegment::Key(key), Value::Object(map)) => {
            map.insert(key.clone(), encoded);
        }
        (PathSegment::Index(index), Value::Array(items)) => {
            let slot = items.get_mut(*index).ok_or_else(invalid)?;
            *slot = encoded;
        }
        _ => return Err(invalid()),
    }
    Ok(())
}

fn display_path(path: &[PathSegment]) -> String {
    path.iter()
        .map(|segment| match segment {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Index(index) => index.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
