//! Fixed knobs of the playground.

/// Query string parameter that selects the example.
pub const QUERY_PARAM: &str = "ex";

/// Environment variable read at compile time for the default example.
pub const EXAMPLE_ENV_VAR: &str = "SHADER_EXAMPLE";

/// Used when nothing else names an example and the registry is empty.
pub const FALLBACK_EXAMPLE: &str = "01-gradient";

/// Upper bound on a single frame's time step, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.05;

/// Device pixel ratios above this are clamped.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Canvas the render surface draws into.
pub const CANVAS_ID: &str = "c";

/// Element whose text shows the active example.
pub const LABEL_ID: &str = "exName";

/// Example name baked in by `SHADER_EXAMPLE` at build time, if any.
pub fn build_time_example() -> Option<&'static str> {
    option_env!("SHADER_EXAMPLE").filter(|name| !name.is_empty())
}
