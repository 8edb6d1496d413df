use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, Window};

/// A window `resize` listener that is removed when dropped.
pub struct ResizeSubscription {
    window: Window,
    handler: Closure<dyn FnMut(Event)>,
}

impl ResizeSubscription {
    pub fn subscribe(mut on_resize: impl FnMut() + 'static) -> Option<Self> {
        let Some(window) = web_sys::window() else {
            log::error!("No window object");
            return None;
        };
        let handler = Closure::<dyn FnMut(Event)>::new(move |_: Event| on_resize());
        if let Err(e) = window.add_event_listener_with_callback("resize", handler.as_ref().unchecked_ref()) {
            log::error!("Failed to listen for resize: {e:?}");
            return None;
        }
        Some(Self { window, handler })
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.handler.as_ref().unchecked_ref());
    }
}
