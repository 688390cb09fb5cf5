use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{KeyboardEvent, PointerEvent, Window};

use super::page;
use super::render::RenderSurface;
use crate::config::QUERY_PARAM;
use crate::navigate::{self, Direction};
use crate::select::Selection;
use crate::uniforms::UniformSet;

/// Keeps the canvas and `uResolution` in step with the visible viewport.
///
/// Runs once immediately, then on window resize and visual viewport
/// resize/scroll (mobile browser chrome showing and hiding).
pub fn attach_resize(window: &Window, surface: Rc<RenderSurface>, uniforms: Rc<RefCell<UniformSet>>) -> Result<(), JsValue> {
    let resize = {
        let window = window.clone();
        move || {
            let viewport = page::visible_viewport_size(&window);
            surface.resize(viewport, window.device_pixel_ratio());
            uniforms.borrow_mut().set_resolution(viewport);
        }
    };
    resize();

    let resize_closure = Closure::wrap(Box::new(resize) as Box<dyn FnMut()>);
    let callback = resize_closure.as_ref().unchecked_ref();
    window.add_event_listener_with_callback("resize", callback)?;
    if let Some(vv) = window.visual_viewport() {
        vv.add_event_listener_with_callback("resize", callback)?;
        vv.add_event_listener_with_callback("scroll", callback)?;
    }
    resize_closure.forget();
    Ok(())
}

pub fn attach_pointer(window: &Window, uniforms: Rc<RefCell<UniformSet>>) -> Result<(), JsValue> {
    let pointer_closure = {
        let window = window.clone();
        Closure::wrap(Box::new(move |event: PointerEvent| {
            let height = page::visible_viewport_height(&window);
            let (x, y) = page::client_position(&event);
            uniforms.borrow_mut().set_pointer_from_client(x, y, height);
        }) as Box<dyn FnMut(PointerEvent)>)
    };
    window.add_event_listener_with_callback("pointermove", pointer_closure.as_ref().unchecked_ref())?;
    pointer_closure.forget();
    Ok(())
}

/// ArrowLeft / ArrowRight reload the page on the neighbouring example.
pub fn attach_navigation(window: &Window, selection: Selection) -> Result<(), JsValue> {
    let key_closure = {
        let window = window.clone();
        Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let Some(direction) = Direction::from_key(&event.key()) else {
                return;
            };
            event.prevent_default();

            let Some(next) = navigate::neighbour(&selection.names, &selection.current, direction) else {
                return;
            };
            if let Err(err) = go_to(&window, next) {
                log::error!("failed to navigate to {next}: {err:?}");
            }
        }) as Box<dyn FnMut(KeyboardEvent)>)
    };
    window.add_event_listener_with_callback("keydown", key_closure.as_ref().unchecked_ref())?;
    key_closure.forget();
    Ok(())
}

fn go_to(window: &Window, example: &str) -> Result<(), JsValue> {
    let location = window.location();
    let href = page::with_query_param(&location.href()?, QUERY_PARAM, example)?;
    log::info!("switching to {example}");
    location.set_href(&href)
}
