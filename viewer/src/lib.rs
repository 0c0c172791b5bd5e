//! Headless core of the notebook visualizer widget.
//!
//! The kernel-side peer renders frames and owns all rotate/zoom/pan math; this
//! crate owns the browser half. It keeps the synchronized widget state, turns
//! raw pointer events into normalized state updates, and reflects state changes
//! onto an injected rendering surface. Nothing here touches the DOM, so the
//! whole interaction loop runs under plain `cargo test`. The `client` crate
//! supplies the DOM-backed [`surface::Surface`] and the comm sink.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Synchronized widget state, change listeners, commit/sync |
//! | [`view`] | The interactive view: setup, render steps, pointer handlers |
//! | [`surface`] | Rendering capability trait and the recording headless surface |
//! | [`input`] | Pointer event types, button mapping, the drag gesture model |
//! | [`geometry`] | Points and sizes in page space |
//! | [`consts`] | Widget identity, tooltip text and other defaults |

pub mod consts;
pub mod geometry;
pub mod input;
pub mod model;
pub mod surface;
pub mod view;
