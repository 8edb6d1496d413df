use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// A self-rescheduling `requestAnimationFrame` loop.
///
/// Runs until dropped. Dropping marks the loop destroyed, cancels the pending
/// frame and releases the callback; a frame that still fires checks the flag
/// before doing anything.
pub struct FrameLoop {
    destroyed: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameLoop {
    /// Call `on_frame` with the frame timestamp (ms) once per display frame.
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Option<Self> {
        let Some(window) = web_sys::window() else {
            log::error!("No window object");
            return None;
        };
        let destroyed = Rc::new(Cell::new(false));
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        // The closure reschedules itself through a weak handle so the loop
        // does not keep itself alive.
        let this = Rc::downgrade(&callback);
        let stopped = destroyed.clone();
        let next = pending.clone();
        let win = window.clone();
        *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            next.set(None);
            if stopped.get() {
                return;
            }
            on_frame(timestamp);
            if stopped.get() {
                return;
            }
            if let Some(cb) = this.upgrade() {
                if let Some(cb) = cb.borrow().as_ref() {
                    next.set(schedule(&win, cb));
                }
            }
        }));

        let first = callback.borrow().as_ref().and_then(|cb| schedule(&window, cb));
        pending.set(first);

        Some(Self { destroyed, pending, callback })
    }
}

fn schedule(window: &Window, cb: &FrameCallback) -> Option<i32> {
    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {e:?}");
            None
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.destroyed.set(true);
        if let (Some(id), Some(window)) = (self.pending.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}
