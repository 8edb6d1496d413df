//! Row/column tiling of the image catalog.
//!
//! A layout pass turns a viewport size into a fixed grid: the column count
//! follows the target tile width (clamped to the configured bounds), and the
//! row count always over-covers the viewport by one row so a row can scroll
//! into view without exposing a gap. Every pass draws a fresh random sample
//! of the catalog; there is no incremental relayout.

use rand::Rng;
use crate::config::{ConfigError, StarfieldConfig};
use crate::crop::CropRect;

/// Non-empty, ordered list of image URLs.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog(Vec<String>);

impl Catalog {
    pub fn new(images: Vec<String>) -> Result<Self, ConfigError> {
        if images.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(Self(images))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// `count` URLs: the catalog prefix, padded with uniform picks (with
    /// replacement) when the catalog is shorter than `count`.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<String> {
        let mut picked: Vec<String> = self.0.iter().take(count).cloned().collect();
        while picked.len() < count {
            let i = rng.random_range(0..self.0.len());
            picked.push(self.0[i].clone());
        }
        picked
    }
}

/// A bitmap handle that finishes loading at some point after construction.
pub trait TileImage {
    /// Natural (width, height) once the bitmap is decoded, `None` until then
    /// and forever if the load failed.
    fn natural_size(&self) -> Option<(f64, f64)>;
}

#[derive(Debug)]
pub struct Tile<H> {
    pub source: String,
    pub image: H,
    pub crop: Option<CropRect>,
    pub opacity: f64,
}

impl<H: TileImage> Tile<H> {
    pub fn new(source: String, image: H) -> Self {
        Self { source, image, crop: None, opacity: 0.0 }
    }

    pub fn is_loaded(&self) -> bool {
        self.crop.is_some()
    }

    /// Check the handle and compute the crop the first time it reports a size.
    pub fn poll_loaded(&mut self, ratio: f64) -> bool {
        if self.crop.is_none() {
            if let Some((w, h)) = self.image.natural_size() {
                self.crop = CropRect::centered(w, h, ratio);
            }
        }
        self.crop.is_some()
    }

    /// Ramp opacity toward 1. No-op until loaded; never decreases.
    pub fn fade_in(&mut self, step: f64) {
        if !self.is_loaded() || self.opacity >= 1.0 {
            return;
        }
        if step > 0.0 {
            self.opacity = (self.opacity + step).min(1.0);
        }
    }
}

#[derive(Debug)]
pub struct Row<H> {
    /// Vertical position in row-height units, kept in `[0, row_count)`.
    pub offset: f64,
    pub tiles: Vec<Tile<H>>,
}

impl<H> Row<H> {
    /// Move the row down by `amount` rows and wrap around the loop.
    pub fn advance(&mut self, amount: f64, row_count: usize) {
        if row_count == 0 || !amount.is_finite() {
            return;
        }
        let n = row_count as f64;
        let wrapped = (self.offset + amount).rem_euclid(n);
        // rem_euclid can round up to exactly n for tiny negative inputs
        self.offset = if wrapped >= n { 0.0 } else { wrapped };
    }
}

/// Hard ceiling on rows per pass, whatever the viewport reports.
pub const MAX_ROWS: usize = 4096;

/// Grid dimensions for one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    pub columns: usize,
    pub tile_width: f64,
    pub tile_height: f64,
    pub row_count: usize,
}

impl LayoutParams {
    pub fn compute(viewport_width: f64, viewport_height: f64, config: &StarfieldConfig) -> Self {
        let columns = column_count(viewport_width, config.item_width, config.row_min, config.row_max);
        let width = viewport_width.max(0.0);
        let tile_width = width / columns as f64;
        let tile_height = tile_width * config.ratio;

        // A row is at least one pixel tall, so a viewport never needs more
        // than its height in pixels plus the extra row.
        let height = viewport_height.max(0.0);
        let max_rows = (height.ceil() + 1.0).min(MAX_ROWS as f64);
        let rows = height / tile_height + 1.0;
        let row_count = if tile_height > 0.0 {
            let rows = if rows.is_finite() { rows.ceil() } else { max_rows };
            (rows.min(max_rows) as usize).max(1)
        } else {
            1
        };

        Self { columns, tile_width, tile_height, row_count }
    }

    pub fn required_tiles(&self) -> usize {
        self.row_count.saturating_mul(self.columns)
    }
}

/// `clamp(ceil(width / item_width), min, max)`, with degenerate inputs
/// falling back to `min`. Columns narrower than a pixel are not produced
/// beyond what `min` forces.
pub fn column_count(viewport_width: f64, item_width: f64, min: usize, max: usize) -> usize {
    let min = min.max(1);
    let pixels = viewport_width.max(0.0).ceil().min(usize::MAX as f64) as usize;
    let max = max.min(pixels).max(min);
    let raw = (viewport_width / item_width).ceil();
    if !raw.is_finite() || raw <= 0.0 {
        return min;
    }
    (raw as usize).clamp(min, max)
}

#[derive(Debug)]
pub struct Layout<H> {
    pub params: LayoutParams,
    pub rows: Vec<Row<H>>,
}

impl<H> Layout<H> {
    pub fn tile_count(&self) -> usize {
        self.rows.iter().map(|r| r.tiles.len()).sum()
    }
}

/// Build a fresh grid for the viewport.
///
/// `load` is called once per tile, in row-major order, and must start the
/// bitmap load for the given URL.
pub fn compute_layout<H, R, F>(
    viewport_width: f64,
    viewport_height: f64,
    catalog: &Catalog,
    config: &StarfieldConfig,
    rng: &mut R,
    mut load: F,
) -> Layout<H>
where
    H: TileImage,
    R: Rng + ?Sized,
    F: FnMut(&str) -> H,
{
    let params = LayoutParams::compute(viewport_width, viewport_height, config);
    let mut sources = catalog.sample(params.required_tiles(), rng);
    shuffle(&mut sources, rng);

    let mut sources = sources.into_iter();
    let rows = (0..params.row_count)
        .map(|row_idx| {
            let tiles = sources
                .by_ref()
                .take(params.columns)
                .map(|src| {
                    let image = load(&src);
                    Tile::new(src, image)
                })
                .collect();
            Row { offset: row_idx as f64, tiles }
        })
        .collect();

    Layout { params, rows }
}

/// Reorder by independently drawn random keys. Good enough to keep
/// neighbouring rows from repeating the catalog order; not a uniform shuffle.
fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.sort_by_cached_key(|_| rng.random::<u32>());
}
