//! Parallax "star-field" image scroller for Leptos.
//!
//! Tiles a gallery of images into rows that scroll upward forever on a
//! canvas tilted back with a CSS perspective transform. Use the
//! [`Starfield`](components::Starfield) component from Leptos, or
//! [`mount_starfield`] from a plain page.

use std::any::Any;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use starfield_core::StarfieldConfig;
use crate::components::StarfieldView;

pub mod canvas;
pub mod components;
pub mod resize;

/// Install the panic hook and route `log` output to the browser console.
#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// A scroller mounted by [`mount_starfield`]. Dropping it (or calling
/// `unmount` / `free` from JS) tears the widget down.
#[wasm_bindgen]
pub struct MountedStarfield {
    _handle: Box<dyn Any>,
}

#[wasm_bindgen]
impl MountedStarfield {
    pub fn unmount(self) {
        log::info!("Starfield unmounted");
    }
}

/// Mount a scroller inside the element with id `element_id`.
///
/// `config_json` uses the option names of the component (`images`, `ratio`,
/// `rowMin`, `itemWidth`, ...). A bad configuration is rejected here, before
/// anything is laid out or drawn.
#[wasm_bindgen]
pub fn mount_starfield(element_id: &str, config_json: &str) -> Result<MountedStarfield, JsValue> {
    let config = StarfieldConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let parent = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id))
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {element_id:?}")))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("element {element_id:?} is not an HTML element")))?;

    let handle = leptos::mount::mount_to(parent, move || view! { <StarfieldView config=config /> });
    Ok(MountedStarfield { _handle: Box::new(handle) })
}
