use crate::config::MAX_PIXEL_RATIO;

/// Visible viewport in whole CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rounds fractional browser measurements; negatives clamp to zero.
    pub fn from_css(width: f64, height: f64) -> Self {
        Self {
            width: width.round().max(0.0) as u32,
            height: height.round().max(0.0) as u32,
        }
    }

    /// Backing-store size of the canvas for this viewport.
    pub fn drawing_buffer(self, device_pixel_ratio: f64) -> (u32, u32) {
        let ratio = clamp_pixel_ratio(device_pixel_ratio);
        (
            (self.width as f64 * ratio).round() as u32,
            (self.height as f64 * ratio).round() as u32,
        )
    }
}

/// Caps the ratio at [`MAX_PIXEL_RATIO`]; bogus values fall back to 1.
pub fn clamp_pixel_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}
