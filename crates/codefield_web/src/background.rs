//! Background canvas: sizing, input and the animation-frame loop.
//!
//! ```text
//! mount ─► size canvas ─► TokenField ─► FrameLoop::start ─► rAF
//!                                                 ▲          │
//!                                                 └─Continue─┘
//! resize ─► size canvas ─► field.resize (full rebuild)
//! mousemove / touchmove ─► field pointer
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use codefield_core::{FieldConfig, FrameLoop, StopHandle, TokenField, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use crate::canvas::CanvasSurface;
use crate::dom;

/// Element id of the background canvas.
pub const CANVAS_ID: &str = "bg-canvas";

type RafCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Controls a mounted background.
#[derive(Debug, Clone)]
pub struct BackgroundHandle {
    stop: StopHandle,
}

impl BackgroundHandle {
    /// Stops the loop. No further frame is requested.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Whether the loop is still requesting frames.
    pub fn is_running(&self) -> bool {
        self.stop.is_running()
    }
}

/// Mounts the token field on `#bg-canvas` and starts animating.
///
/// Returns `Ok(None)` when the page has no background canvas.
pub fn mount(config: FieldConfig) -> Result<Option<BackgroundHandle>, JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;
    let Some(element) = document.get_element_by_id(CANVAS_ID) else {
        tracing::debug!("no background canvas, token field disabled");
        return Ok(None);
    };
    let canvas: HtmlCanvasElement = element.dyn_into()?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or("2d context unavailable")?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let Some(viewport) = dom::current_viewport(&window) else {
        return Ok(None);
    };
    size_canvas(&canvas, &viewport)?;

    let field = TokenField::with_seed(config, viewport, entropy_seed())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let mut frame_loop = FrameLoop::new(field);
    let stop = frame_loop.start();
    let frame_loop = Rc::new(RefCell::new(frame_loop));

    {
        let frame_loop = frame_loop.clone();
        let canvas = canvas.clone();
        let win = window.clone();
        dom::listen(&window, "resize", move |_| {
            let Some(viewport) = dom::current_viewport(&win) else {
                return;
            };
            if let Err(e) = size_canvas(&canvas, &viewport) {
                dom::warn("background resize", &e);
            }
            frame_loop.borrow_mut().field_mut().resize(viewport);
        })?;
    }
    {
        let frame_loop = frame_loop.clone();
        dom::listen(&window, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                frame_loop
                    .borrow_mut()
                    .field_mut()
                    .track_pointer(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
            }
        })?;
    }
    {
        let frame_loop = frame_loop.clone();
        dom::listen(&window, "touchmove", move |event| {
            if let Some(touch) = event.dyn_ref::<TouchEvent>() {
                frame_loop
                    .borrow_mut()
                    .field_mut()
                    .track_touch(dom::first_touch(touch));
            }
        })?;
    }

    run(&window, frame_loop, CanvasSurface::new(ctx))?;
    Ok(Some(BackgroundHandle { stop }))
}

/// Sets the backing store to device pixels and the CSS size to the viewport.
fn size_canvas(canvas: &HtmlCanvasElement, viewport: &Viewport) -> Result<(), JsValue> {
    canvas.set_width(viewport.backing_width() as u32);
    canvas.set_height(viewport.backing_height() as u32);
    let style = canvas.style();
    style.set_property("width", &format!("{}px", viewport.width()))?;
    style.set_property("height", &format!("{}px", viewport.height()))?;
    Ok(())
}

/// Requests frames until the loop reports `Stopped`.
fn run(
    window: &Window,
    frame_loop: Rc<RefCell<FrameLoop>>,
    mut surface: CanvasSurface,
) -> Result<(), JsValue> {
    let callback: RafCallback = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let win = window.clone();

    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let outcome = frame_loop.borrow_mut().step(&mut surface);
        if !outcome.should_continue() {
            tracing::debug!("background loop stopped");
            return;
        }
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(e) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                dom::warn("requestAnimationFrame", &e);
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = callback.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}

/// Seed from the JS random source and the clock.
fn entropy_seed() -> u64 {
    let high = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let low = js_sys::Date::now() as u64;
    (high << 32) ^ low
}
