use common::error::{HighlightError, Result};
use common::geometry::OverlayRect;
use common::tree::OverlaySurface;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::dom::host_error;

/// Draws overlay rectangles as absolutely positioned divs under `<body>`.
#[derive(Debug, Clone)]
pub struct BrowserOverlay {
    document: Document,
}

impl BrowserOverlay {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn div(&self, class: &str) -> Result<Element> {
        let div = self.document.create_element("div").map_err(host_error)?;
        div.class_list().add_1(class).map_err(host_error)?;
        Ok(div)
    }
}

impl OverlaySurface for BrowserOverlay {
    type Handle = Element;

    fn create_container(&mut self, class: &str) -> Result<Element> {
        self.div(class)
    }

    fn append_rect(&mut self, container: &Element, rect: &OverlayRect, class: &str) -> Result<()> {
        let item = self.div(class)?;
        let style = item
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| HighlightError::Host("overlay item is not an html element".to_string()))?
            .style();
        for (property, px) in [("height", rect.height), ("width", rect.width), ("left", rect.left), ("top", rect.top)] {
            style.set_property(property, &format!("{}px", px)).map_err(host_error)?;
        }
        container.append_child(&item).map_err(host_error)?;
        Ok(())
    }

    fn attach(&mut self, container: &Element) -> Result<()> {
        let body = self
            .document
            .body()
            .ok_or_else(|| HighlightError::Host("document has no body".to_string()))?;
        body.append_child(container).map_err(host_error)?;
        Ok(())
    }

    fn dispose(&mut self, container: &Element) -> Result<()> {
        container.remove();
        Ok(())
    }
}
