//! Page chrome wiring: nav, hero buttons, modals, typewriter, skill bars and
//! layer parallax.
//!
//! Every component is optional. A missing element leaves its component inert.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use codefield_core::page::{
    aria_hidden, anchor_target, is_activation_key, modal_for_trigger, ABOUT_SECTION_ID,
    PROJECTS_SECTION_ID,
};
use codefield_core::skills::{parse_percent, width_css};
use codefield_core::{
    LayerKind, LayerOffset, NavMenu, PageConfig, ParallaxConfig, ParallaxLayers, PointerState,
    SkillReveal, SkillRevealConfig, Typewriter, TypewriterConfig,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, MouseEvent, Node, TouchEvent,
};

use crate::dom;

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Wires every page component. Failures are logged per component.
pub fn wire(config: &PageConfig) -> Result<(), JsValue> {
    let document = dom::document()?;
    let observer_supported = dom::supports_intersection_observer(&dom::window()?);

    let results = [
        ("nav", wire_nav(&document)),
        ("hero", wire_hero(&document)),
        ("modals", wire_modals(&document)),
        ("typewriter", start_typewriter(&document, &config.typewriter)),
        ("skills", reveal_skills(&document, &config.skills, observer_supported)),
        ("parallax", start_parallax(&document, config.parallax.clone())),
    ];
    for (component, result) in results {
        if let Err(e) = result {
            dom::warn(component, &e);
        }
    }
    Ok(())
}

// ============================================================================
// NAVIGATION
// ============================================================================

fn wire_nav(document: &Document) -> Result<(), JsValue> {
    let toggle = document.get_element_by_id("nav-toggle");
    let menu = document.get_element_by_id("nav-menu");
    let nav = Rc::new(Cell::new(NavMenu::default()));

    if let (Some(toggle), Some(menu)) = (&toggle, &menu) {
        let nav = nav.clone();
        let menu = menu.clone();
        dom::listen(toggle, "click", move |_| {
            let mut state = nav.get();
            let open = state.toggle();
            nav.set(state);
            set_active(&menu, open);
        })?;
    }

    for item in dom::query_all(document, ".nav-menu-item")? {
        let doc = document.clone();
        let link = item.clone();
        dom::listen(&item, "click", move |event| {
            event.prevent_default();
            if let Some(href) = link.get_attribute("href") {
                if let Some(id) = anchor_target(&href) {
                    dom::scroll_to(&doc, id);
                }
            }
        })?;
    }

    if let Some(menu) = menu {
        dom::listen(document, "click", move |event| {
            let target = event.target();
            let node = target.as_ref().and_then(|t| t.dyn_ref::<Node>());
            let inside_toggle = toggle.as_ref().is_some_and(|t| t.contains(node));
            let inside_menu = menu.contains(node);
            let mut state = nav.get();
            let open = state.document_click(inside_toggle, inside_menu);
            nav.set(state);
            set_active(&menu, open);
        })?;
    }
    Ok(())
}

fn set_active(menu: &Element, open: bool) {
    let classes = menu.class_list();
    let result = if open {
        classes.add_1("active")
    } else {
        classes.remove_1("active")
    };
    if let Err(e) = result {
        dom::warn("nav class", &e);
    }
}

fn wire_hero(document: &Document) -> Result<(), JsValue> {
    for (button, section) in [
        ("about-btn", ABOUT_SECTION_ID),
        ("projects-btn", PROJECTS_SECTION_ID),
        ("scroll-down", ABOUT_SECTION_ID),
    ] {
        let Some(element) = document.get_element_by_id(button) else {
            continue;
        };
        let doc = document.clone();
        dom::listen(&element, "click", move |_| {
            dom::scroll_to(&doc, section);
        })?;
    }

    if let Some(chevron) = document.get_element_by_id("scroll-down") {
        if let Ok(chevron) = chevron.dyn_into::<HtmlElement>() {
            let target = chevron.clone();
            dom::listen(&chevron, "keydown", move |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if is_activation_key(&key.key()) {
                    event.prevent_default();
                    target.click();
                }
            })?;
        }
    }
    Ok(())
}

// ============================================================================
// MODALS
// ============================================================================

fn wire_modals(document: &Document) -> Result<(), JsValue> {
    for trigger in dom::query_all(document, ".info-btn, .card-project .btn")? {
        let doc = document.clone();
        let source = trigger.clone();
        dom::listen(&trigger, "click", move |_| {
            let data_modal = source.get_attribute("data-modal");
            let data_project = source.get_attribute("data-project");
            let Some(id) = modal_for_trigger(data_modal.as_deref(), data_project.as_deref())
            else {
                return;
            };
            if let Some(modal) = doc.get_element_by_id(id) {
                set_modal_open(&modal, true);
            }
        })?;
    }

    for close in dom::query_all(document, ".modal .modal-close")? {
        let source = close.clone();
        dom::listen(&close, "click", move |_| {
            if let Ok(Some(modal)) = source.closest(".modal") {
                set_modal_open(&modal, false);
            }
        })?;
    }

    for modal in dom::query_all(document, ".modal")? {
        let backdrop = modal.clone();
        dom::listen(&modal, "click", move |event| {
            let on_backdrop = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|el| el == backdrop);
            if on_backdrop {
                set_modal_open(&backdrop, false);
            }
        })?;
    }
    Ok(())
}

fn set_modal_open(modal: &Element, open: bool) {
    if let Err(e) = modal.set_attribute("aria-hidden", aria_hidden(open)) {
        dom::warn("modal", &e);
    }
}

// ============================================================================
// TYPEWRITER
// ============================================================================

fn start_typewriter(document: &Document, config: &TypewriterConfig) -> Result<(), JsValue> {
    let Some(terminal) = document.get_element_by_id("terminal") else {
        return Ok(());
    };
    let mut typewriter =
        Typewriter::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let window = dom::window()?;

    let callback: Callback = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let win = window.clone();

    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let step = typewriter.tick();
        terminal.set_text_content(Some(step.text.as_str()));
        let delay = i32::try_from(step.delay.as_millis()).unwrap_or(i32::MAX);
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(e) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay,
            ) {
                dom::warn("typewriter timer", &e);
            }
        }
    }) as Box<dyn FnMut()>));

    // First tick runs immediately.
    if let Some(cb) = callback.borrow().as_ref() {
        let tick: &js_sys::Function = cb.as_ref().unchecked_ref();
        tick.call0(&JsValue::NULL)?;
    }
    Ok(())
}

// ============================================================================
// SKILL BARS
// ============================================================================

/// Resets every `.skill-bar` to 0% and fills them to their `data-percent`
/// once the skills section is visible, or at once without an observer.
pub fn reveal_skills(
    document: &Document,
    config: &SkillRevealConfig,
    observer_supported: bool,
) -> Result<(), JsValue> {
    let bars = dom::query_all(document, ".skill-bar")?;
    if bars.is_empty() {
        return Ok(());
    }
    for bar in &bars {
        set_fill_width(bar, 0.0);
    }

    let mut reveal = SkillReveal::new(config);
    if reveal.start(observer_supported) {
        fill_bars(&bars);
        return Ok(());
    }
    let reveal = Rc::new(RefCell::new(reveal));

    let Some(section) = document.get_element_by_id(&config.section_id) else {
        return Ok(());
    };

    let on_entries = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if reveal.borrow_mut().observe(entry.is_intersecting()) {
                    fill_bars(&bars);
                    observer.disconnect();
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    let observer =
        IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &options)?;
    observer.observe(&section);
    on_entries.forget();
    Ok(())
}

fn fill_bars(bars: &[Element]) {
    for bar in bars {
        let percent = parse_percent(bar.get_attribute("data-percent").as_deref());
        set_fill_width(bar, percent);
    }
}

fn set_fill_width(bar: &Element, percent: f64) {
    let fill = bar
        .query_selector(".skill-bar-fill")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if let Some(fill) = fill {
        if let Err(e) = fill.style().set_property("width", &width_css(percent)) {
            dom::warn("skill bar", &e);
        }
    }
}

// ============================================================================
// LAYER PARALLAX
// ============================================================================

fn start_parallax(document: &Document, config: ParallaxConfig) -> Result<(), JsValue> {
    let layers: Vec<HtmlElement> = dom::query_all(document, ".parallax-layer")?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let kinds: Vec<LayerKind> = layers
        .iter()
        .map(|el| LayerKind::from_class_list(&el.class_name()))
        .collect();
    let state = ParallaxLayers::new(config, &kinds);
    if state.is_empty() {
        return Ok(());
    }

    tracing::debug!(layers = state.len(), "layer parallax started");
    let window = dom::window()?;
    let state = Rc::new(RefCell::new(state));
    state.borrow_mut().set_scroll(window.scroll_y().unwrap_or(0.0));

    {
        let state = state.clone();
        let win = window.clone();
        dom::listen(&window, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let point = (f64::from(mouse.client_x()), f64::from(mouse.client_y()));
                set_layer_pointer(&state, &win, Some(point));
            }
        })?;
    }
    {
        let state = state.clone();
        let win = window.clone();
        dom::listen(&window, "touchmove", move |event| {
            if let Some(touch) = event.dyn_ref::<TouchEvent>() {
                set_layer_pointer(&state, &win, dom::first_touch(touch));
            }
        })?;
    }
    {
        let state = state.clone();
        let win = window.clone();
        dom::listen(&window, "scroll", move |_| {
            state.borrow_mut().set_scroll(win.scroll_y().unwrap_or(0.0));
        })?;
    }

    let callback: Callback = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let win = window.clone();
    let mut offsets: Vec<LayerOffset> = Vec::with_capacity(layers.len());

    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let (width, _) = dom::inner_size(&win);
        state.borrow_mut().step(width, &mut offsets);
        for (layer, offset) in layers.iter().zip(&offsets) {
            if let Err(e) = layer
                .style()
                .set_property("transform", &offset.to_css_transform())
            {
                dom::warn("parallax layer", &e);
            }
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

fn set_layer_pointer(
    state: &RefCell<ParallaxLayers>,
    window: &web_sys::Window,
    point: Option<(f64, f64)>,
) {
    let Some(viewport) = dom::current_viewport(window) else {
        return;
    };
    let mut pointer = PointerState::CENTER;
    if pointer.track_touch(point, &viewport) {
        state.borrow_mut().set_pointer(pointer);
    }
}
