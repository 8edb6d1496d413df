//! Layout state plus the per-frame step.
//!
//! `Starfield` owns the current grid outright. A resize calls
//! [`Starfield::relayout`], which throws the old rows away and builds new ones;
//! each display frame calls [`Starfield::render_frame`], which advances the
//! rows and emits draw calls to a [`Painter`]. Bitmap loads finish on their
//! own schedule and are only ever observed by polling the tile's handle.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use crate::animation::{FrameClock, FrameGeometry, Rect, FADE_RATE};
use crate::config::{ConfigError, StarfieldConfig};
use crate::crop::CropRect;
use crate::layout::{compute_layout, Catalog, Layout, LayoutParams, TileImage};
use crate::viewport::CanvasSize;

/// Sink for the draw calls of one frame.
pub trait Painter<H> {
    fn clear(&mut self);

    /// Draw the placeholder bitmap at full opacity.
    fn draw_placeholder(&mut self, dest: Rect);

    /// Draw the `crop` region of `image` into `dest` with the given alpha.
    fn draw_tile(&mut self, image: &H, crop: &CropRect, dest: Rect, opacity: f64);
}

pub struct Starfield<H> {
    config: StarfieldConfig,
    catalog: Catalog,
    layout: Option<Layout<H>>,
    clock: FrameClock,
    rng: SmallRng,
}

impl<H: TileImage> Starfield<H> {
    /// Validate the configuration. Nothing is laid out until the first
    /// [`relayout`](Self::relayout).
    pub fn new(config: StarfieldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = Catalog::new(config.images.clone())?;
        Ok(Self {
            config,
            catalog,
            layout: None,
            clock: FrameClock::new(),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn layout(&self) -> Option<&Layout<H>> {
        self.layout.as_ref()
    }

    /// True when the canvas must be resized to `target` and laid out again:
    /// the size changed, or nothing has been laid out yet.
    pub fn needs_relayout(&self, target: CanvasSize, current: CanvasSize) -> bool {
        self.layout.is_none() || target.needs_resize(current)
    }

    /// Replace the whole grid for a canvas of the given pixel size. `load`
    /// starts the bitmap load for each new tile.
    pub fn relayout<F>(&mut self, canvas_width: f64, canvas_height: f64, load: F) -> LayoutParams
    where
        F: FnMut(&str) -> H,
    {
        let layout = compute_layout(
            canvas_width,
            canvas_height,
            &self.catalog,
            &self.config,
            &mut self.rng,
            load,
        );
        let params = layout.params;
        log::info!(
            "Starfield layout {}x{}: {} columns x {} rows ({} tiles)",
            canvas_width, canvas_height, params.columns, params.row_count, params.required_tiles()
        );
        self.layout = Some(layout);
        params
    }

    /// Advance one display frame and paint it.
    pub fn render_frame<P: Painter<H>>(&mut self, timestamp_ms: f64, canvas_width: f64, painter: &mut P) {
        let delta = self.clock.tick(timestamp_ms);
        painter.clear();

        let Some(layout) = self.layout.as_mut() else { return };
        let Some(columns) = layout.rows.first().map(|r| r.tiles.len()) else { return };

        let config = &self.config;
        let geometry = FrameGeometry::new(canvas_width, columns, config);
        let advance = geometry.row_advance(config, delta);
        let row_count = layout.rows.len();
        let has_placeholder = config.placeholder.is_some();

        for row in layout.rows.iter_mut() {
            row.advance(advance, row_count);

            for (column, tile) in row.tiles.iter_mut().enumerate() {
                let dest = geometry.tile_rect(column, row.offset);

                if has_placeholder && tile.opacity < 1.0 {
                    painter.draw_placeholder(dest);
                }

                if !tile.poll_loaded(config.ratio) {
                    continue;
                }

                tile.fade_in(FADE_RATE * delta);
                if let Some(crop) = tile.crop.as_ref() {
                    painter.draw_tile(&tile.image, crop, dest, tile.opacity);
                }
            }
        }
    }
}
