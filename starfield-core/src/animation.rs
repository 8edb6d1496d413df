use crate::config::StarfieldConfig;

/// Frame interval the motion constants are tuned for (60 Hz).
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

/// Row offset advanced per reference frame at speed 1, before normalization.
pub const BASE_SCROLL_RATE: f64 = 0.003;

/// Opacity gained per reference frame while a tile fades in.
pub const FADE_RATE: f64 = 0.025;

/// Turns `requestAnimationFrame` timestamps into frame-rate independent deltas.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed time since the previous tick in reference frames. The first
    /// tick, and any tick whose timestamp went backwards, yields 0.
    pub fn tick(&mut self, timestamp_ms: f64) -> f64 {
        let delta = match self.last {
            Some(prev) if timestamp_ms > prev => (timestamp_ms - prev) / REFERENCE_FRAME_MS,
            _ => 0.0,
        };
        self.last = Some(timestamp_ms);
        delta
    }
}

/// Destination rectangle on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Per-frame tile size and spacing derived from the current canvas width.
///
/// Half of the configured spacing fraction becomes the gap, and the gap total
/// is taken back out of the tile width so a row still spans the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    pub tile_width: f64,
    pub tile_height: f64,
    pub spacing: f64,
    /// `item_width / tile_width`: keeps on-screen speed steady when the
    /// computed tiles are wider or narrower than the configured target.
    pub speed_mod: f64,
}

impl FrameGeometry {
    pub fn new(canvas_width: f64, columns: usize, config: &StarfieldConfig) -> Self {
        let columns = columns.max(1) as f64;
        let base = canvas_width.max(0.0) / columns;
        let spacing = base * config.spacing / 2.0;
        let tile_width = base - spacing * (columns - 1.0) / columns;
        let tile_height = tile_width * config.ratio;
        let speed_mod = if tile_width > 0.0 { config.item_width / tile_width } else { 0.0 };
        Self { tile_width, tile_height, spacing, speed_mod }
    }

    /// Rows scrolled during `delta` reference frames.
    pub fn row_advance(&self, config: &StarfieldConfig, delta: f64) -> f64 {
        config.speed * BASE_SCROLL_RATE * self.speed_mod * (1.0 / config.ratio) * delta
    }

    /// Where the tile in `column` of a row at `offset` lands. Offset 1 puts
    /// the row flush with the top edge; offset 0 is the row about to enter.
    pub fn tile_rect(&self, column: usize, offset: f64) -> Rect {
        Rect {
            x: column as f64 * (self.tile_width + self.spacing),
            y: (offset - 1.0) * (self.tile_height + self.spacing),
            width: self.tile_width,
            height: self.tile_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StarfieldConfig {
        StarfieldConfig::with_images(vec!["a.jpg".into()])
    }

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1234.5), 0.0);
        assert!((clock.tick(1234.5 + REFERENCE_FRAME_MS) - 1.0).abs() < 1e-9);
        assert!((clock.tick(1234.5 + 3.0 * REFERENCE_FRAME_MS) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_backwards_timestamp() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        assert_eq!(clock.tick(50.0), 0.0);
        assert!((clock.tick(50.0 + REFERENCE_FRAME_MS) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_geometry_without_spacing() {
        let mut c = config();
        c.spacing = 0.0;
        let g = FrameGeometry::new(1000.0, 4, &c);
        assert_eq!(g.tile_width, 250.0);
        assert_eq!(g.spacing, 0.0);
        assert!((g.speed_mod - 1.0).abs() < 1e-12);
        assert_eq!(g.tile_rect(2, 1.0), Rect { x: 500.0, y: 0.0, width: 250.0, height: g.tile_height });
    }

    #[test]
    fn test_geometry_spacing_fits_canvas() {
        let c = config();
        let g = FrameGeometry::new(1000.0, 4, &c);
        // 250 * 0.05 / 2
        assert!((g.spacing - 6.25).abs() < 1e-9);
        let last = g.tile_rect(3, 1.0);
        assert!((last.x + last.width - 1000.0).abs() < 1e-9);
        assert!(g.speed_mod > 1.0);
    }

    #[test]
    fn test_row_advance_scales_with_delta_and_speed() {
        let mut c = config();
        c.spacing = 0.0;
        let g = FrameGeometry::new(1000.0, 4, &c);
        let one = g.row_advance(&c, 1.0);
        assert!((one - 0.003 / 1.4).abs() < 1e-12);
        assert!((g.row_advance(&c, 2.0) - 2.0 * one).abs() < 1e-12);
        c.speed = 3.0;
        assert!((g.row_advance(&c, 1.0) - 3.0 * one).abs() < 1e-12);
    }

    #[test]
    fn test_zero_width_canvas_does_not_move() {
        let c = config();
        let g = FrameGeometry::new(0.0, 3, &c);
        assert_eq!(g.tile_width, 0.0);
        assert_eq!(g.speed_mod, 0.0);
        assert_eq!(g.row_advance(&c, 5.0), 0.0);
    }
}
