/// Vertical overscan: the canvas is drawn taller than its box so the tilted
/// plane still reaches the bottom edge.
pub const OVERSCAN: f64 = 1.5;

/// CSS perspective depth relative to the larger canvas dimension.
pub const PERSPECTIVE_FACTOR: f64 = 1.2;

/// Canvas backing-store size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Backing size for a container box measured in CSS pixels.
    pub fn overscanned(box_width: f64, box_height: f64) -> Self {
        Self {
            width: to_pixels(box_width),
            height: to_pixels(box_height * OVERSCAN),
        }
    }

    pub fn needs_resize(&self, current: CanvasSize) -> bool {
        *self != current
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn perspective_depth(&self) -> f64 {
        self.width.max(self.height) as f64 * PERSPECTIVE_FACTOR
    }
}

fn to_pixels(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overscan() {
        let size = CanvasSize::overscanned(1000.0, 800.0);
        assert_eq!(size, CanvasSize::new(1000, 1200));
        assert!((size.perspective_depth() - 1440.0).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_box_rounds() {
        assert_eq!(CanvasSize::overscanned(999.6, 100.1), CanvasSize::new(1000, 150));
    }

    #[test]
    fn test_degenerate_box() {
        let size = CanvasSize::overscanned(0.0, f64::NAN);
        assert!(size.is_empty());
        assert_eq!(size, CanvasSize::new(0, 0));
    }

    #[test]
    fn test_needs_resize() {
        let target = CanvasSize::overscanned(640.0, 480.0);
        assert!(target.needs_resize(CanvasSize::new(300, 150)));
        assert!(!target.needs_resize(CanvasSize::new(640, 720)));
    }
}
