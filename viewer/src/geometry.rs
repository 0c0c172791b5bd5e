#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// A point in page space (CSS pixels), or a normalized position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point expressed relative to `origin`.
    #[must_use]
    pub fn relative_to(self, origin: Point) -> Point {
        Point { x: self.x - origin.x, y: self.y - origin.y }
    }
}

/// Rendered extent of an element in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either axis has no extent (element not laid out yet).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Shrink by total padding per axis, never below zero.
    #[must_use]
    pub fn inset(self, horizontal: f64, vertical: f64) -> Size {
        Size { width: (self.width - horizontal).max(0.0), height: (self.height - vertical).max(0.0) }
    }
}

/// Parse a computed CSS length such as `"4px"`. Anything else counts as zero.
#[must_use]
pub fn css_px(value: &str) -> f64 {
    match value.trim().trim_end_matches("px").parse::<f64>() {
        Ok(px) if px.is_finite() => px,
        _ => 0.0,
    }
}
