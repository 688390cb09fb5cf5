//! Values fed to the shader every frame.

use glam::Vec2;

use crate::config::MAX_FRAME_DELTA;
use crate::viewport::ViewportSize;

pub const TIME: &str = "uTime";
pub const RESOLUTION: &str = "uResolution";
pub const POINTER: &str = "uMouse";

/// `uTime`, `uResolution` and `uMouse`, owned by the frame loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSet {
    /// Seconds since start-up, advanced in clamped steps.
    pub time: f32,
    /// Visible viewport size in CSS pixels.
    pub resolution: Vec2,
    /// Pointer position in CSS pixels, origin bottom-left.
    pub pointer: Vec2,
}

impl Default for UniformSet {
    fn default() -> Self {
        Self {
            time: 0.0,
            resolution: Vec2::ONE,
            pointer: Vec2::ZERO,
        }
    }
}

impl UniformSet {
    pub fn advance(&mut self, delta: f32) {
        self.time += delta.clamp(0.0, MAX_FRAME_DELTA);
    }

    pub fn set_resolution(&mut self, viewport: ViewportSize) {
        self.resolution = Vec2::new(viewport.width as f32, viewport.height as f32);
    }

    /// Takes DOM client coordinates (origin top-left) and flips Y against the
    /// visible viewport height.
    pub fn set_pointer_from_client(&mut self, client_x: f64, client_y: f64, viewport_height: f64) {
        self.pointer = Vec2::new(client_x as f32, (viewport_height - client_y) as f32);
    }
}

/// Turns animation-frame timestamps into clamped time steps.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_ms: f64,
}

impl FrameClock {
    pub fn new(now_ms: f64) -> Self {
        Self { last_ms: now_ms }
    }

    /// Seconds since the previous tick, within `[0, MAX_FRAME_DELTA]`.
    ///
    /// A frame timestamp can precede the `performance.now()` taken at start-up,
    /// which would otherwise produce a negative step.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let delta = ((now_ms - self.last_ms) / 1000.0) as f32;
        self.last_ms = now_ms;
        delta.clamp(0.0, MAX_FRAME_DELTA)
    }
}
