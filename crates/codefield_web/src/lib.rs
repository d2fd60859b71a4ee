//! # Codefield Web
//!
//! WebAssembly host for [`codefield_core`]. Mounts the token field on the
//! page's `#bg-canvas` and wires the page chrome.
//!
//! ## Startup
//!
//! ```text
//! start ─► panic hook ─► PageConfig ─► page::wire ─► background::mount
//! ```
//!
//! Configuration is read from an optional
//! `<script id="codefield-config" type="application/toml">` block; without
//! one the stock configuration is used.
//!
//! The crate is empty on native targets.

#![deny(unsafe_code)]

#[cfg(target_arch = "wasm32")]
mod background;
#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod page;

#[cfg(target_arch = "wasm32")]
pub use background::{mount, BackgroundHandle, CANVAS_ID};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
#[cfg(target_arch = "wasm32")]
pub use page::reveal_skills;

/// Element id of the inline TOML configuration block.
pub const CONFIG_SCRIPT_ID: &str = "codefield-config";

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;

    use codefield_core::PageConfig;
    use wasm_bindgen::prelude::*;

    use crate::background::{self, BackgroundHandle};
    use crate::{dom, page, CONFIG_SCRIPT_ID};

    thread_local! {
        static BACKGROUND: RefCell<Option<BackgroundHandle>> = const { RefCell::new(None) };
    }

    /// Module entry point.
    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let config = load_config();
        page::wire(&config)?;

        match background::mount(config.field) {
            Ok(handle) => BACKGROUND.with(|slot| *slot.borrow_mut() = handle),
            Err(e) => dom::warn("background", &e),
        }
        Ok(())
    }

    /// Stops the background animation.
    #[wasm_bindgen(js_name = stopBackground)]
    pub fn stop_background() {
        BACKGROUND.with(|slot| {
            if let Some(handle) = slot.borrow().as_ref() {
                handle.stop();
            }
        });
    }

    /// Whether the background animation is running.
    #[wasm_bindgen(js_name = isBackgroundRunning)]
    pub fn is_background_running() -> bool {
        BACKGROUND.with(|slot| slot.borrow().as_ref().is_some_and(BackgroundHandle::is_running))
    }

    fn load_config() -> PageConfig {
        let source = dom::document()
            .ok()
            .and_then(|doc| doc.get_element_by_id(CONFIG_SCRIPT_ID))
            .and_then(|el| el.text_content());
        let Some(source) = source else {
            return PageConfig::default();
        };
        match PageConfig::from_toml_str(&source) {
            Ok(config) => config,
            Err(e) => {
                dom::warn("configuration", &JsValue::from_str(&e.to_string()));
                PageConfig::default()
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use entry::{is_background_running, start, stop_background};
