//! DOM helpers shared by the host modules.

use codefield_core::Viewport;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, EventTarget, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, TouchEvent, Window,
};

/// The global window.
pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// The window's document.
pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

/// Logs a host failure. The failing component stays inert.
pub fn warn(context: &str, err: &JsValue) {
    tracing::warn!(context, error = ?err, "host call failed");
    web_sys::console::warn_2(&JsValue::from_str(context), err);
}

/// Inner window size in CSS pixels; 0 for anything unusable.
pub fn inner_size(window: &Window) -> (f64, f64) {
    let read = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    (read(window.inner_width()), read(window.inner_height()))
}

/// `prefers-reduced-motion: reduce`; false where media queries are missing.
pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

/// Whether the window exposes `IntersectionObserver`.
pub fn supports_intersection_observer(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Viewport as the window currently reports it.
pub fn current_viewport(window: &Window) -> Option<Viewport> {
    let (width, height) = inner_size(window);
    match Viewport::new(width, height) {
        Ok(viewport) => Some(
            viewport
                .with_device_pixel_ratio(window.device_pixel_ratio())
                .with_reduced_motion(prefers_reduced_motion(window)),
        ),
        Err(e) => {
            tracing::warn!(%e, "window reported an unusable size");
            None
        }
    }
}

/// Client position of the first active touch.
pub fn first_touch(event: &TouchEvent) -> Option<(f64, f64)> {
    event
        .touches()
        .get(0)
        .map(|touch| (f64::from(touch.client_x()), f64::from(touch.client_y())))
}

/// Every element matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Attaches a listener for the lifetime of the page.
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Smooth-scrolls to the element with `id`, aligned to its start.
///
/// Returns false if there is no such element.
pub fn scroll_to(document: &Document, id: &str) -> bool {
    let Some(target) = document.get_element_by_id(id) else {
        return false;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
    true
}
