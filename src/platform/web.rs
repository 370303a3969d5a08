//! Browser scheduling handles
//!
//! Each handle owns its JS callback and cancels it on drop, so tearing down
//! the owner stops every repeating task that mutates it. Handles must not be
//! dropped from inside their own callback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Repeating `requestAnimationFrame` loop
pub struct AnimationLoop {
    /// Pending frame request, `None` once cancelled
    pending: Rc<Cell<Option<i32>>>,
    slot: FrameSlot,
}

impl AnimationLoop {
    /// Call `on_frame(timestamp_ms)` once per display refresh until dropped
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let pending = Rc::new(Cell::new(None));
        let slot: FrameSlot = Rc::new(RefCell::new(None));

        let pending_inner = pending.clone();
        let slot_inner = slot.clone();
        *slot.borrow_mut() = Some(Closure::new(move |time: f64| {
            on_frame(time);
            if pending_inner.get().is_none() {
                return;
            }
            let next = web_sys::window().zip(slot_inner.borrow().as_ref().map(|cb| {
                cb.as_ref().unchecked_ref::<js_sys::Function>().clone()
            }));
            if let Some((window, callback)) = next {
                match window.request_animation_frame(&callback) {
                    Ok(id) => pending_inner.set(Some(id)),
                    Err(e) => {
                        log::warn!("Animation loop stopped: {:?}", e);
                        pending_inner.set(None);
                    }
                }
            }
        }));

        let id = {
            let slot = slot.borrow();
            let callback = slot.as_ref().ok_or("frame callback missing")?;
            window.request_animation_frame(callback.as_ref().unchecked_ref())?
        };
        pending.set(Some(id));

        Ok(Self { pending, slot })
    }

    pub fn is_running(&self) -> bool {
        self.pending.get().is_some()
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // Breaks the closure <-> slot cycle
        self.slot.borrow_mut().take();
    }
}

/// Repeating `setInterval` timer
pub struct Interval {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start(period_ms: u32, on_tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let callback = Closure::<dyn FnMut()>::new(on_tick);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period_ms as i32,
        )?;
        Ok(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}
