//! Small helpers over the DOM: viewport measurement, URL handling, labels.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, MouseEvent, Window};

use crate::viewport::ViewportSize;

/// Visible viewport, falling back to the root element's client box.
pub fn visible_viewport_size(window: &Window) -> ViewportSize {
    match window.visual_viewport() {
        Some(vv) => ViewportSize::from_css(vv.width(), vv.height()),
        None => {
            let (w, h) = client_size(window);
            ViewportSize::from_css(w, h)
        }
    }
}

/// Unrounded visible height, used to flip pointer coordinates.
pub fn visible_viewport_height(window: &Window) -> f64 {
    match window.visual_viewport() {
        Some(vv) => vv.height(),
        None => client_size(window).1,
    }
}

fn client_size(window: &Window) -> (f64, f64) {
    window
        .document()
        .and_then(|doc| doc.document_element())
        .map(|root| (root.client_width() as f64, root.client_height() as f64))
        .unwrap_or((0.0, 0.0))
}

/// `clientX` / `clientY` as the browser reports them.
///
/// Pointer events carry fractional coordinates; web-sys only exposes the
/// integer `MouseEvent` getters, so the doubles are read off the object.
pub fn client_position(event: &MouseEvent) -> (f64, f64) {
    let read = |name: &str| {
        js_sys::Reflect::get(event, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.as_f64())
    };
    (
        read("clientX").unwrap_or_else(|| event.client_x() as f64),
        read("clientY").unwrap_or_else(|| event.client_y() as f64),
    )
}

pub fn query_param(window: &Window, name: &str) -> Result<Option<String>, JsValue> {
    let search = window.location().search()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search)?;
    Ok(params.get(name))
}

/// `href` with `key` set to `value`, other parameters untouched.
pub fn with_query_param(href: &str, key: &str, value: &str) -> Result<String, JsValue> {
    let url = web_sys::Url::new(href)?;
    url.search_params().set(key, value);
    Ok(url.href())
}

/// The page's canvas, or a fresh one appended to `<body>`.
pub fn canvas(document: &Document, id: &str) -> Result<HtmlCanvasElement, JsValue> {
    if let Some(existing) = document.get_element_by_id(id) {
        return Ok(existing.dyn_into::<HtmlCanvasElement>()?);
    }
    log::debug!("no #{id} canvas on the page, creating one");
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_id(id);
    document.body().ok_or("no body")?.append_child(&canvas)?;
    Ok(canvas)
}

pub fn set_label(document: &Document, id: &str, text: &str) {
    match document.get_element_by_id(id) {
        Some(label) => label.set_text_content(Some(text)),
        None => log::warn!("no #{id} element to show the example name"),
    }
}

/// Logs and alerts a startup failure.
pub fn report_fatal(window: &Window, message: &str) {
    log::error!("{message}");
    if window.alert_with_message(message).is_err() {
        log::warn!("alert() was blocked");
    }
}
