use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlImageElement;
use starfield_core::layout::TileImage;

/// An `<img>` whose decode resolves on its own future.
///
/// The render loop never awaits the load; it polls [`TileImage::natural_size`]
/// each frame. The future only holds a weak reference to the ready flag, so a
/// load that finishes after its tile was discarded does nothing.
pub struct LoadingImage {
    element: Option<HtmlImageElement>,
    ready: Rc<Cell<bool>>,
}

impl LoadingImage {
    /// Create the element, point it at `src` and start decoding.
    pub fn start(src: &str) -> Self {
        let ready = Rc::new(Cell::new(false));
        let element = match HtmlImageElement::new() {
            Ok(el) => el,
            Err(e) => {
                log::error!("Failed to create image element for {src}: {e:?}");
                return Self { element: None, ready };
            }
        };
        element.set_src(src);

        let decoded = element.decode();
        let flag = Rc::downgrade(&ready);
        let src = src.to_string();
        spawn_local(async move {
            match JsFuture::from(decoded).await {
                Ok(_) => {
                    if let Some(flag) = flag.upgrade() {
                        flag.set(true);
                    }
                }
                // No retry: the tile just never appears.
                Err(e) => log::debug!("Image failed to load: {src} ({e:?})"),
            }
        });

        Self { element: Some(element), ready }
    }

    /// The element, once it has decoded.
    pub fn loaded_element(&self) -> Option<&HtmlImageElement> {
        if self.ready.get() { self.element.as_ref() } else { None }
    }
}

impl TileImage for LoadingImage {
    fn natural_size(&self) -> Option<(f64, f64)> {
        let el = self.loaded_element()?;
        Some((el.natural_width() as f64, el.natural_height() as f64))
    }
}
