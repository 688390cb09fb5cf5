use thiserror::Error;

use crate::shaders::ShaderStage;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaygroundError {
    #[error("Unknown example \"{name}\". Available: {}", .available.join(", "))]
    UnknownExample { name: String, available: Vec<String> },

    #[error("example \"{0}\" has no fragment shader")]
    MissingFragment(String),

    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {0}")]
    Link(String),

    #[error("WebGL: {0}")]
    WebGl(String),
}

#[cfg(target_arch = "wasm32")]
impl From<PlaygroundError> for wasm_bindgen::JsValue {
    fn from(err: PlaygroundError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
