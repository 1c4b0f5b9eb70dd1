use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, MouseEvent, Window};

use pagemark_shared::{PageMetrics, Point, Scroll, Size};

pub const OVERLAY_ID: &str = "annotator-canvas";

const OVERLAY_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; \
     z-index: 999998; cursor: crosshair; pointer-events: auto;";

pub fn create_overlay(window: &Window, document: &Document) -> Result<HtmlCanvasElement, JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("Missing document body"))?;
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("Invalid canvas element"))?;
    canvas.set_id(OVERLAY_ID);
    canvas.style().set_css_text(OVERLAY_STYLE);
    let size = viewport_size(window);
    canvas.set_width(size.width as u32);
    canvas.set_height(size.height as u32);
    body.append_child(&canvas)?;
    Ok(canvas)
}

pub fn scroll(window: &Window) -> Scroll {
    Scroll::new(
        window.scroll_x().unwrap_or(0.0),
        window.scroll_y().unwrap_or(0.0),
    )
}

pub fn viewport_size(window: &Window) -> Size {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|value| value.as_f64()).unwrap_or(0.0)
    };
    Size::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
    )
}

/// Full scrollable extent, taking the larger of body and root element since
/// browsers disagree on which one scrolls.
pub fn page_size(document: &Document) -> Size {
    let mut width = 0;
    let mut height = 0;
    if let Some(body) = document.body() {
        width = width.max(body.scroll_width());
        height = height.max(body.scroll_height());
    }
    if let Some(root) = document.document_element() {
        width = width.max(root.scroll_width());
        height = height.max(root.scroll_height());
    }
    Size::new(width as f64, height as f64)
}

pub fn page_metrics(window: &Window, document: &Document) -> PageMetrics {
    PageMetrics {
        url: window.location().href().unwrap_or_default(),
        viewport: viewport_size(window),
        page: page_size(document),
    }
}

pub fn event_point(event: &MouseEvent) -> Point {
    Point::new(event.client_x() as f64, event.client_y() as f64)
}
