/// Smallest allowed diagram scale
pub const MIN_ZOOM: f64 = 0.5;
/// Largest allowed diagram scale
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.1;

/// CSS scale applied to the rendered diagram
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zoom(f64);

impl Zoom {
    pub fn new() -> Self {
        Self(1.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn zoom_in(self) -> Self {
        Self::clamped(self.0 + ZOOM_STEP)
    }

    pub fn zoom_out(self) -> Self {
        Self::clamped(self.0 - ZOOM_STEP)
    }

    pub fn reset(self) -> Self {
        Self::new()
    }

    /// Inline style for the diagram container
    pub fn css_transform(&self) -> String {
        format!(
            "transform: scale({}); transform-origin: top left; transition: transform 0.3s ease;",
            self.0
        )
    }

    // Round to one decimal so repeated steps do not drift
    fn clamped(value: f64) -> Self {
        Self(((value * 10.0).round() / 10.0).clamp(MIN_ZOOM, MAX_ZOOM))
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new()
    }
}
