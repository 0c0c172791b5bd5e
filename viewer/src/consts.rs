//! Shared constants for the viewer crate.

// ── Identity ────────────────────────────────────────────────────

/// Model class name registered by the kernel-side peer.
pub const MODEL_NAME: &str = "VaporVisualizerModel";

/// View class name registered by the kernel-side peer.
pub const VIEW_NAME: &str = "VaporVisualizerView";

/// Module both the model and the view are published under.
pub const MODULE_NAME: &str = "jupyter-vapor-widget";

/// Semver range of the published module.
pub const MODULE_VERSION: &str = "1.0";

// ── State defaults ──────────────────────────────────────────────

/// Initial display value before the peer sends anything.
pub const DEFAULT_VALUE: &str = "Hello World!";

// ── View ────────────────────────────────────────────────────────

/// Tooltip describing the three drag gestures.
pub const GESTURE_TOOLTIP: &str = "Left Drag: Rotate\nRight Drag: Zoom\nShift Left Drag: Pan";

/// CSS cursor shown over the image.
pub const DEFAULT_CURSOR: &str = "move";

/// A 1×1 grey PNG, usable as a placeholder until the first frame arrives.
pub const PLACEHOLDER_PNG: &str =
    "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAIAAACQd1PeAAAADElEQVQImWNISUkBAAJcAS0OBgnuAAAAAElFTkSuQmCC";
