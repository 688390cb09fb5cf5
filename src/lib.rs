//! Browser shader playground.
//!
//! Picks one of the examples bundled from `shaders/`, compiles it for WebGL2
//! and draws it on a fullscreen quad with `uTime`, `uResolution` and `uMouse`
//! fed from the page. Everything outside `wasm` is plain Rust and runs in
//! host tests.

pub mod config;
pub mod error;
pub mod navigate;
pub mod registry;
pub mod select;
pub mod shaders;
pub mod uniforms;
pub mod viewport;

pub use error::PlaygroundError;
pub use registry::{ManifestEntry, Registry};
pub use select::Selection;
pub use shaders::{load_shaders, ShaderPair};
pub use uniforms::{FrameClock, UniformSet};
pub use viewport::ViewportSize;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::config::{self, CANVAS_ID, LABEL_ID, QUERY_PARAM};
    use crate::registry::Registry;
    use crate::select::Selection;
    use crate::shaders::load_shaders;
    use crate::uniforms::UniformSet;

    mod events;
    mod frame;
    pub mod page;
    mod render;

    /// Page entry point, called from `index.html` once the module is loaded.
    #[wasm_bindgen]
    pub async fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
        // a second init (e.g. in tests) is harmless
        console_log::init_with_level(level).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let registry = Registry::embedded();
        let query = page::query_param(&window, QUERY_PARAM)?;
        let selection = match Selection::resolve(&registry, query.as_deref(), config::build_time_example()) {
            Ok(selection) => selection,
            Err(err) => {
                let message = err.to_string();
                page::report_fatal(&window, &message);
                return Err(err.into());
            }
        };
        log::info!("example {} ({} available)", selection.current, selection.names.len());
        page::set_label(&document, LABEL_ID, &selection.current);

        let sources = load_shaders(&registry, &selection.current).await?;
        let canvas = page::canvas(&document, CANVAS_ID)?;
        let surface = match render::RenderSurface::new(canvas, &sources) {
            Ok(surface) => Rc::new(surface),
            Err(err) => {
                let message = err.as_string().unwrap_or_else(|| format!("{err:?}"));
                page::report_fatal(&window, &message);
                return Err(err);
            }
        };

        let uniforms = Rc::new(RefCell::new(UniformSet::default()));
        events::attach_resize(&window, surface.clone(), uniforms.clone())?;
        events::attach_pointer(&window, uniforms.clone())?;
        events::attach_navigation(&window, selection)?;
        frame::start(window, surface, uniforms)?;
        Ok(())
    }
}
