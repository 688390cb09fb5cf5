use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::Window;

use super::render::RenderSurface;
use crate::uniforms::{FrameClock, UniformSet};

/// Starts the `requestAnimationFrame` loop; it runs until the page unloads.
pub fn start(window: Window, surface: Rc<RenderSurface>, uniforms: Rc<RefCell<UniformSet>>) -> Result<(), JsValue> {
    let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
    let mut clock = FrameClock::new(now);

    // `f` holds the animation-frame closure so that it can keep calling
    // `request_animation_frame` on itself. The `Option` lets the closure be
    // created first and then referenced from inside.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let scheduler = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        // schedule next
        if let Some(tick) = f.borrow().as_ref() {
            if let Err(err) = scheduler.request_animation_frame(tick.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {err:?}");
            }
        }

        let delta = clock.tick(timestamp);
        let mut uniforms = uniforms.borrow_mut();
        uniforms.advance(delta);
        surface.draw(&uniforms);
    }) as Box<dyn FnMut(f64)>));

    if let Some(tick) = g.borrow().as_ref() {
        window.request_animation_frame(tick.as_ref().unchecked_ref())?;
    }
    Ok(())
}
