//! Rendering surface: the capability the view draws through.
//!
//! DESIGN
//! ======
//! The view never touches the DOM directly. It writes attributes, styles and
//! text through [`Surface`], asks it for layout, and declares which events it
//! wants routed back. The `client` crate implements this over an `<img>`
//! element; [`HeadlessSurface`] records every write so the view can be driven
//! and inspected without a browser.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::collections::BTreeMap;

use crate::geometry::{Point, Size};
use crate::input::EventKind;

/// Secondary text regions the view may mount next to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// Shows the synchronized `value` text.
    Value,
    /// Diagnostic readout of value and dimensions.
    Debug,
}

impl Region {
    /// Heading rendered above the region, if any.
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Value => "Value",
            Self::Debug => "Debug",
        }
    }
}

/// Rendering capability bound to one image element.
pub trait Surface {
    /// Set an attribute on the image element.
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Set an inline style property on the image element.
    fn set_style(&mut self, property: &str, value: &str);

    /// Create a text region next to the image. Mounting twice is a no-op.
    fn mount_region(&mut self, region: Region);

    /// Replace the text of a mounted region. Unmounted regions are ignored.
    fn set_text(&mut self, region: Region, text: &str);

    /// Route events of this kind on the image element back to the view.
    fn listen(&mut self, event: EventKind);

    /// Page-space offset of the image element's top-left corner.
    fn offset(&self) -> Point;

    /// Rendered size of the image element.
    fn size(&self) -> Size;
}

/// A recorded write, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Attribute { name: String, value: String },
    Style { property: String, value: String },
    Text { region: Region, text: String },
}

/// In-memory [`Surface`] that records writes and reports a configurable layout.
///
/// Until [`HeadlessSurface::set_layout`] is called, the rendered size follows
/// the `width` / `height` attributes, the way an `<img>` sizes itself.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    regions: BTreeMap<Region, String>,
    listening: Vec<EventKind>,
    ops: Vec<SurfaceOp>,
    offset: Point,
    layout: Option<Size>,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the element's page offset.
    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Pin the element's rendered size, overriding the attribute-derived one.
    pub fn set_layout(&mut self, size: Size) {
        self.layout = Some(size);
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    /// Text of a region; `None` when the region was never mounted.
    #[must_use]
    pub fn text(&self, region: Region) -> Option<&str> {
        self.regions.get(&region).map(String::as_str)
    }

    #[must_use]
    pub fn is_listening(&self, event: EventKind) -> bool {
        self.listening.contains(&event)
    }

    /// Every recorded write, oldest first.
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// How many times `name` was written.
    #[must_use]
    pub fn attribute_writes(&self, name: &str) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Attribute { name: n, .. } if n == name))
            .count()
    }

    /// Forget recorded writes, keeping current values.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    fn numeric_attribute(&self, name: &str) -> f64 {
        match self.attribute(name).map(str::parse::<f64>) {
            Some(Ok(value)) => value,
            _ => 0.0,
        }
    }
}

impl Surface for HeadlessSurface {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_owned(), value.to_owned());
        self.ops.push(SurfaceOp::Attribute { name: name.to_owned(), value: value.to_owned() });
    }

    fn set_style(&mut self, property: &str, value: &str) {
        self.styles.insert(property.to_owned(), value.to_owned());
        self.ops.push(SurfaceOp::Style { property: property.to_owned(), value: value.to_owned() });
    }

    fn mount_region(&mut self, region: Region) {
        self.regions.entry(region).or_default();
    }

    fn set_text(&mut self, region: Region, text: &str) {
        if let Some(slot) = self.regions.get_mut(&region) {
            text.clone_into(slot);
            self.ops.push(SurfaceOp::Text { region, text: text.to_owned() });
        }
    }

    fn listen(&mut self, event: EventKind) {
        if !self.listening.contains(&event) {
            self.listening.push(event);
        }
    }

    fn offset(&self) -> Point {
        self.offset
    }

    fn size(&self) -> Size {
        self.layout
            .unwrap_or_else(|| Size::new(self.numeric_attribute("width"), self.numeric_attribute("height")))
    }
}
