//! `Surface` implementation over a real `<img>` element.
//!
//! DOM calls that fail are logged and skipped: a single bad write should not
//! take the view down, and the `Surface` contract has no error channel.

use std::collections::BTreeMap;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlImageElement};

use viewer::geometry::{Point, Size, css_px};
use viewer::input::EventKind;
use viewer::surface::{Region, Surface};

use crate::error::BindingError;

pub struct DomSurface {
    document: Document,
    root: HtmlElement,
    image: HtmlImageElement,
    regions: BTreeMap<Region, HtmlElement>,
    listening: Vec<EventKind>,
}

impl DomSurface {
    /// Create the `<img>` element and append it to `root`.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::Dom`] if there is no document or the element
    /// cannot be created or appended.
    pub fn mount(root: &HtmlElement) -> Result<Self, BindingError> {
        let document = root
            .owner_document()
            .ok_or_else(|| BindingError::Dom("container has no owner document".to_owned()))?;
        let image = document
            .create_element("img")
            .map_err(dom_error)?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| BindingError::Dom("created <img> is not an HtmlImageElement".to_owned()))?;
        root.append_child(&image).map_err(dom_error)?;
        Ok(Self { document, root: root.clone(), image, regions: BTreeMap::new(), listening: Vec::new() })
    }

    /// The image element events should be attached to.
    pub fn image(&self) -> &HtmlImageElement {
        &self.image
    }

    /// Event kinds the view asked for, in subscription order.
    pub fn listened(&self) -> &[EventKind] {
        &self.listening
    }

    fn create_html(&self, tag: &str) -> Result<HtmlElement, BindingError> {
        self.document
            .create_element(tag)
            .map_err(dom_error)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| BindingError::Dom(format!("created <{tag}> is not an HtmlElement")))
    }

    /// Total `(left + right, top + bottom)` padding of the image, in pixels.
    fn padding(&self) -> (f64, f64) {
        let style = match self.document.default_view().map(|window| window.get_computed_style(&self.image)) {
            Some(Ok(Some(style))) => style,
            _ => return (0.0, 0.0),
        };
        let px = |property: &str| match style.get_property_value(property) {
            Ok(value) => css_px(&value),
            Err(err) => {
                log::warn!("read {property}: {err:?}");
                0.0
            }
        };
        (px("padding-left") + px("padding-right"), px("padding-top") + px("padding-bottom"))
    }

    fn append_region(&mut self, region: Region) -> Result<(), BindingError> {
        let heading = self.create_html("h3")?;
        heading.set_text_content(Some(region.heading()));
        let body = self.create_html("div")?;
        self.root.append_child(&heading).map_err(dom_error)?;
        self.root.append_child(&body).map_err(dom_error)?;
        self.regions.insert(region, body);
        Ok(())
    }
}

impl Surface for DomSurface {
    fn set_attribute(&mut self, name: &str, value: &str) {
        if let Err(err) = self.image.set_attribute(name, value) {
            log::warn!("set attribute {name}: {err:?}");
        }
    }

    fn set_style(&mut self, property: &str, value: &str) {
        if let Err(err) = self.image.style().set_property(property, value) {
            log::warn!("set style {property}: {err:?}");
        }
    }

    fn mount_region(&mut self, region: Region) {
        if self.regions.contains_key(&region) {
            return;
        }
        if let Err(err) = self.append_region(region) {
            log::warn!("mount {region:?} region: {err}");
        }
    }

    fn set_text(&mut self, region: Region, text: &str) {
        if let Some(body) = self.regions.get(&region) {
            body.set_text_content(Some(text));
        }
    }

    fn listen(&mut self, event: EventKind) {
        if !self.listening.contains(&event) {
            self.listening.push(event);
        }
    }

    fn offset(&self) -> Point {
        let rect = self.image.get_bounding_client_rect();
        let (scroll_x, scroll_y) = self.document.default_view().map_or((0.0, 0.0), |window| {
            (window.scroll_x().unwrap_or(0.0), window.scroll_y().unwrap_or(0.0))
        });
        Point::new(rect.left() + scroll_x, rect.top() + scroll_y)
    }

    /// Content-box size: the client size minus the computed padding.
    fn size(&self) -> Size {
        let (horizontal, vertical) = self.padding();
        let client = Size::new(f64::from(self.image.client_width()), f64::from(self.image.client_height()));
        client.inset(horizontal, vertical)
    }
}

fn dom_error(err: wasm_bindgen::JsValue) -> BindingError {
    BindingError::Dom(format!("{err:?}"))
}
