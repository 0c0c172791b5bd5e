//! Synchronized widget state shared with the kernel-side peer.
//!
//! ARCHITECTURE
//! ============
//! `WidgetModel` is the local half of a state object mirrored on the kernel.
//! Local writes go through [`WidgetModel::set`], which stages the field; a
//! later [`WidgetModel::commit`] pushes every staged field to the peer as one
//! `update` message through the injected [`CommSink`]. Inbound patches go
//! through [`WidgetModel::apply_remote`]. Either path notifies the change
//! listeners registered for the fields whose value actually changed.
//!
//! Listeners receive `&WidgetState` and nothing else, so they cannot reach back
//! into the model while it is mid-update.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use comm::{CommMessage, StateMap};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::{DEFAULT_VALUE, MODEL_NAME, MODULE_NAME, MODULE_VERSION, VIEW_NAME};
use crate::geometry::Point;
use crate::input::Gesture;

/// Error returned when an inbound state map cannot be applied.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A known field carried a value of the wrong JSON shape.
    #[error("field '{field}' has an invalid value: {source}")]
    InvalidField {
        /// Wire name of the offending field.
        field: &'static str,
        /// Underlying deserialization failure.
        source: serde_json::Error,
    },
}

// =============================================================
// Fields
// =============================================================

/// Names of the synchronized fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    ImageData,
    ImageFormat,
    Resolution,
    Value,
    MouseButton,
    MouseDown,
    MousePos,
}

impl Field {
    /// Every synchronized field, in wire order.
    pub const ALL: [Field; 7] = [
        Self::ImageData,
        Self::ImageFormat,
        Self::Resolution,
        Self::Value,
        Self::MouseButton,
        Self::MouseDown,
        Self::MousePos,
    ];

    /// Key used for this field in state maps.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::ImageData => "imageData",
            Self::ImageFormat => "imageFormat",
            Self::Resolution => "resolution",
            Self::Value => "value",
            Self::MouseButton => "mouseButton",
            Self::MouseDown => "mouseDown",
            Self::MousePos => "mousePos",
        }
    }

    /// Inverse of [`Field::wire_name`].
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.wire_name() == name)
    }
}

/// Pixel size of the rendered frame. Wire form `[width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Resolution {
    pub width: i64,
    pub height: i64,
}

impl Resolution {
    #[must_use]
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }
}

impl From<[i64; 2]> for Resolution {
    fn from([width, height]: [i64; 2]) -> Self {
        Self { width, height }
    }
}

impl From<Resolution> for [i64; 2] {
    fn from(resolution: Resolution) -> Self {
        [resolution.width, resolution.height]
    }
}

/// Pointer position normalized to the element bounds. Wire form `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct MousePos {
    pub x: f64,
    pub y: f64,
}

impl MousePos {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for MousePos {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<MousePos> for [f64; 2] {
    fn from(pos: MousePos) -> Self {
        [pos.x, pos.y]
    }
}

impl From<Point> for MousePos {
    fn from(point: Point) -> Self {
        Self { x: point.x, y: point.y }
    }
}

/// A typed write to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    ImageData(String),
    ImageFormat(String),
    Resolution(Resolution),
    Value(String),
    MouseButton(i64),
    MouseDown(bool),
    MousePos(MousePos),
}

impl FieldUpdate {
    /// The field this update writes.
    #[must_use]
    pub fn field(&self) -> Field {
        match self {
            Self::ImageData(_) => Field::ImageData,
            Self::ImageFormat(_) => Field::ImageFormat,
            Self::Resolution(_) => Field::Resolution,
            Self::Value(_) => Field::Value,
            Self::MouseButton(_) => Field::MouseButton,
            Self::MouseDown(_) => Field::MouseDown,
            Self::MousePos(_) => Field::MousePos,
        }
    }

    /// Parse the JSON value of `field` from a state map.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidField`] if the value has the wrong shape.
    pub fn decode(field: Field, value: &Value) -> Result<Self, ModelError> {
        Ok(match field {
            Field::ImageData => Self::ImageData(parse(field, value)?),
            Field::ImageFormat => Self::ImageFormat(parse(field, value)?),
            Field::Resolution => Self::Resolution(parse(field, value)?),
            Field::Value => Self::Value(parse(field, value)?),
            Field::MouseButton => Self::MouseButton(parse(field, value)?),
            Field::MouseDown => Self::MouseDown(parse(field, value)?),
            Field::MousePos => Self::MousePos(parse(field, value)?),
        })
    }
}

fn parse<T: DeserializeOwned>(field: Field, value: &Value) -> Result<T, ModelError> {
    T::deserialize(value).map_err(|source| ModelError::InvalidField { field: field.wire_name(), source })
}

// =============================================================
// State
// =============================================================

/// The synchronized field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetState {
    /// Base64 payload of the current frame.
    pub image_data: String,
    /// Image subtype of the payload (`png`, `jpeg`, ...). Empty suppresses image updates.
    pub image_format: String,
    /// Pixel size the element is rendered at.
    pub resolution: Resolution,
    /// Free-form display text.
    pub value: String,
    /// Last pressed button id.
    pub mouse_button: i64,
    /// Whether a button is currently held over the element.
    pub mouse_down: bool,
    /// Last pointer position, normalized to the element bounds.
    pub mouse_pos: MousePos,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            image_data: String::new(),
            image_format: String::new(),
            resolution: Resolution::default(),
            value: DEFAULT_VALUE.to_owned(),
            mouse_button: 0,
            mouse_down: false,
            mouse_pos: MousePos::default(),
        }
    }
}

impl WidgetState {
    /// JSON value of one field, as it appears on the wire.
    #[must_use]
    pub fn get(&self, field: Field) -> Value {
        match field {
            Field::ImageData => Value::from(self.image_data.as_str()),
            Field::ImageFormat => Value::from(self.image_format.as_str()),
            Field::Resolution => Value::from(vec![self.resolution.width, self.resolution.height]),
            Field::Value => Value::from(self.value.as_str()),
            Field::MouseButton => Value::from(self.mouse_button),
            Field::MouseDown => Value::from(self.mouse_down),
            Field::MousePos => Value::from(vec![self.mouse_pos.x, self.mouse_pos.y]),
        }
    }

    /// Write one field. Returns whether the value changed.
    pub fn apply(&mut self, update: FieldUpdate) -> bool {
        fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
            if *slot == value {
                return false;
            }
            *slot = value;
            true
        }

        match update {
            FieldUpdate::ImageData(v) => replace(&mut self.image_data, v),
            FieldUpdate::ImageFormat(v) => replace(&mut self.image_format, v),
            FieldUpdate::Resolution(v) => replace(&mut self.resolution, v),
            FieldUpdate::Value(v) => replace(&mut self.value, v),
            FieldUpdate::MouseButton(v) => replace(&mut self.mouse_button, v),
            FieldUpdate::MouseDown(v) => replace(&mut self.mouse_down, v),
            FieldUpdate::MousePos(v) => replace(&mut self.mouse_pos, v),
        }
    }

    /// The pointer gesture implied by `mouseDown` / `mouseButton`.
    #[must_use]
    pub fn gesture(&self) -> Gesture {
        Gesture::from_fields(self.mouse_down, self.mouse_button)
    }

    /// Every field as a state map.
    #[must_use]
    pub fn to_state_map(&self) -> StateMap {
        Field::ALL.into_iter().map(|field| (field.wire_name().to_owned(), self.get(field))).collect()
    }

    /// Only the fields whose value differs from [`WidgetState::default`].
    #[must_use]
    pub fn non_default_fields(&self) -> StateMap {
        let defaults = Self::default();
        Field::ALL
            .into_iter()
            .filter(|field| self.get(*field) != defaults.get(*field))
            .map(|field| (field.wire_name().to_owned(), self.get(field)))
            .collect()
    }
}

// =============================================================
// Identity
// =============================================================

/// Class/module identity the host uses to pair this model with its peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelIdentity {
    #[serde(rename = "_model_name")]
    pub model_name: String,
    #[serde(rename = "_model_module")]
    pub model_module: String,
    #[serde(rename = "_model_module_version")]
    pub model_module_version: String,
    #[serde(rename = "_view_name")]
    pub view_name: String,
    #[serde(rename = "_view_module")]
    pub view_module: String,
    #[serde(rename = "_view_module_version")]
    pub view_module_version: String,
}

impl Default for ModelIdentity {
    fn default() -> Self {
        Self {
            model_name: MODEL_NAME.to_owned(),
            model_module: MODULE_NAME.to_owned(),
            model_module_version: MODULE_VERSION.to_owned(),
            view_name: VIEW_NAME.to_owned(),
            view_module: MODULE_NAME.to_owned(),
            view_module_version: MODULE_VERSION.to_owned(),
        }
    }
}

impl ModelIdentity {
    /// Identity keys as they appear in a full state map.
    #[must_use]
    pub fn state_entries(&self) -> StateMap {
        [
            ("_model_name", &self.model_name),
            ("_model_module", &self.model_module),
            ("_model_module_version", &self.model_module_version),
            ("_view_name", &self.view_name),
            ("_view_module", &self.view_module),
            ("_view_module_version", &self.view_module_version),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_owned(), Value::from(value.as_str())))
        .collect()
    }
}

/// One widget's entry in a saved notebook's widget-state bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedWidget {
    pub model_name: String,
    pub model_module: String,
    pub model_module_version: String,
    /// Fields that differ from their declared defaults.
    pub state: StateMap,
}

// =============================================================
// Sync
// =============================================================

/// Outbound half of the comm channel.
///
/// Sends are fire-and-forget; ordering and delivery belong to the host.
pub trait CommSink {
    fn send(&mut self, message: CommMessage);
}

/// A [`CommSink`] that queues messages for the host to drain.
///
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    queue: Rc<RefCell<Vec<CommMessage>>>,
}

impl Outbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued message, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<CommMessage> {
        self.queue.borrow_mut().drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl CommSink for Outbox {
    fn send(&mut self, message: CommMessage) {
        self.queue.borrow_mut().push(message);
    }
}

/// Handle returned by [`WidgetModel::on_change`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ChangeCallback = Box<dyn FnMut(&WidgetState)>;

struct Listener {
    id: ListenerId,
    fields: Vec<Field>,
    callback: ChangeCallback,
}

/// The local, synchronized widget model.
pub struct WidgetModel {
    identity: ModelIdentity,
    state: WidgetState,
    staged: BTreeSet<Field>,
    /// Sent writes per field whose echo has not come back yet.
    pending: BTreeMap<Field, usize>,
    listeners: Vec<Listener>,
    next_listener: u64,
    sink: Box<dyn CommSink>,
}

impl WidgetModel {
    /// A model holding the declared defaults.
    pub fn new(sink: impl CommSink + 'static) -> Self {
        Self::with_state(WidgetState::default(), sink)
    }

    pub fn with_state(state: WidgetState, sink: impl CommSink + 'static) -> Self {
        Self {
            identity: ModelIdentity::default(),
            state,
            staged: BTreeSet::new(),
            pending: BTreeMap::new(),
            listeners: Vec::new(),
            next_listener: 0,
            sink: Box::new(sink),
        }
    }

    /// Hydrate from the initial state the host passes when the comm opens.
    ///
    /// Missing fields keep their defaults; unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidField`] if a known field has the wrong shape.
    pub fn from_state_map(initial: &StateMap, sink: impl CommSink + 'static) -> Result<Self, ModelError> {
        let mut state = WidgetState::default();
        for update in decode_patch(initial)? {
            state.apply(update);
        }
        Ok(Self::with_state(state, sink))
    }

    #[must_use]
    pub fn identity(&self) -> &ModelIdentity {
        &self.identity
    }

    #[must_use]
    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// JSON value of one field.
    #[must_use]
    pub fn get(&self, field: Field) -> Value {
        self.state.get(field)
    }

    /// Stage a local write. Listeners for the field fire if the value changed.
    pub fn set(&mut self, update: FieldUpdate) {
        let field = update.field();
        if self.state.apply(update) {
            self.staged.insert(field);
            self.notify(&[field]);
        }
    }

    /// Fields written since the last commit.
    #[must_use]
    pub fn staged(&self) -> Vec<Field> {
        self.staged.iter().copied().collect()
    }

    /// Push every staged field to the peer as one `update` message.
    pub fn commit(&mut self) {
        if self.staged.is_empty() {
            log::trace!("commit: nothing staged");
            return;
        }
        let patch: StateMap = std::mem::take(&mut self.staged)
            .into_iter()
            .map(|field| (field.wire_name().to_owned(), self.state.get(field)))
            .collect();
        log::debug!("commit: {}", patch_keys(&patch));
        self.send_update(patch);
    }

    /// Fields with a sent write still waiting for its echo.
    #[must_use]
    pub fn pending_echoes(&self) -> Vec<Field> {
        self.pending.keys().copied().collect()
    }

    fn send_update(&mut self, patch: StateMap) {
        for field in patch.keys().filter_map(|key| Field::from_wire_name(key)) {
            *self.pending.entry(field).or_insert(0) += 1;
        }
        self.sink.send(CommMessage::update(patch));
    }

    /// Strip the fields of an echo that answer one of our own sends.
    ///
    /// While a field has writes in flight, the local value is at least as new
    /// as anything the echo carries, so the echoed value is dropped.
    fn drop_own_echoes(&mut self, mut patch: StateMap) -> StateMap {
        patch.retain(|key, _| {
            let Some(field) = Field::from_wire_name(key) else {
                return true;
            };
            match self.pending.get_mut(&field) {
                Some(count) => {
                    *count -= 1;
                    if *count == 0 {
                        self.pending.remove(&field);
                    }
                    false
                }
                None => true,
            }
        });
        patch
    }

    /// Register `callback` to run when any of `fields` changes.
    ///
    /// The callback runs at most once per `set` or inbound patch.
    pub fn on_change(&mut self, fields: &[Field], callback: impl FnMut(&WidgetState) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener { id, fields: fields.to_vec(), callback: Box::new(callback) });
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Apply a state patch received from the peer.
    ///
    /// The patch is validated as a whole before anything is written. Returns the
    /// fields whose value changed.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidField`] if a known field has the wrong shape;
    /// the state is left untouched in that case.
    pub fn apply_remote(&mut self, patch: &StateMap) -> Result<Vec<Field>, ModelError> {
        let updates = decode_patch(patch)?;
        let mut changed = Vec::new();
        for update in updates {
            let field = update.field();
            if self.state.apply(update) {
                changed.push(field);
            }
        }
        log::debug!("remote patch: {} changed {:?}", patch_keys(patch), changed);
        if !changed.is_empty() {
            self.notify(&changed);
        }
        Ok(changed)
    }

    /// Dispatch a decoded inbound message. Returns the fields that changed.
    ///
    /// An `echo_update` only writes fields with no local send in flight.
    ///
    /// # Errors
    ///
    /// See [`WidgetModel::apply_remote`].
    pub fn handle_message(&mut self, message: CommMessage) -> Result<Vec<Field>, ModelError> {
        match message {
            CommMessage::Update { state, .. } => self.apply_remote(&state),
            CommMessage::EchoUpdate { state, .. } => {
                let state = self.drop_own_echoes(state);
                self.apply_remote(&state)
            }
            CommMessage::RequestState => {
                let state = self.state.to_state_map();
                self.send_update(state);
                Ok(Vec::new())
            }
            CommMessage::Custom { content } => {
                log::debug!("ignoring custom message: {content}");
                Ok(Vec::new())
            }
        }
    }

    /// Ask the peer to resend its full state.
    pub fn request_state(&mut self) {
        self.sink.send(CommMessage::RequestState);
    }

    /// Every field plus the identity keys.
    #[must_use]
    pub fn full_state(&self) -> StateMap {
        let mut state = self.identity.state_entries();
        state.extend(self.state.to_state_map());
        state
    }

    /// The entry written when the notebook saves widget state.
    #[must_use]
    pub fn embed_state(&self) -> EmbeddedWidget {
        EmbeddedWidget {
            model_name: self.identity.model_name.clone(),
            model_module: self.identity.model_module.clone(),
            model_module_version: self.identity.model_module_version.clone(),
            state: self.state.non_default_fields(),
        }
    }

    fn notify(&mut self, changed: &[Field]) {
        let state = &self.state;
        for listener in &mut self.listeners {
            if listener.fields.iter().any(|field| changed.contains(field)) {
                (listener.callback)(state);
            }
        }
    }
}

fn decode_patch(patch: &StateMap) -> Result<Vec<FieldUpdate>, ModelError> {
    let mut updates = Vec::with_capacity(patch.len());
    for (key, value) in patch {
        match Field::from_wire_name(key) {
            Some(field) => updates.push(FieldUpdate::decode(field, value)?),
            None => log::debug!("ignoring unsynchronized key '{key}'"),
        }
    }
    Ok(updates)
}

fn patch_keys(patch: &StateMap) -> String {
    patch.keys().map(String::as_str).collect::<Vec<_>>().join(",")
}
