use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("images must be non-empty")]
    EmptyCatalog,

    #[error("ratio must be a positive finite number, got {0}")]
    InvalidRatio(f64),

    #[error("column bounds must satisfy 1 <= rowMin <= rowMax, got rowMin={min} rowMax={max}")]
    InvalidColumnBounds { min: usize, max: usize },

    #[error("itemWidth must be a positive finite number, got {0}")]
    InvalidItemWidth(f64),

    #[error("spacing must be a non-negative finite number, got {0}")]
    InvalidSpacing(f64),

    #[error("speed must be finite, got {0}")]
    InvalidSpeed(f64),

    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options accepted by the scroller. JSON keys are camelCase, matching the
/// attribute names hosts already use (`rowMin`, `itemWidth`, ...).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarfieldConfig {
    /// Image URLs. Required, no default.
    pub images: Vec<String>,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default = "default_box_size")]
    pub width: String,
    #[serde(default = "default_box_size")]
    pub height: String,
    /// Tile height divided by tile width.
    #[serde(default = "default_ratio")]
    pub ratio: f64,
    /// Lower bound on the column count (the name is historical).
    #[serde(default = "default_row_min")]
    pub row_min: usize,
    /// Upper bound on the column count.
    #[serde(default = "default_row_max")]
    pub row_max: usize,
    /// Target tile width in pixels.
    #[serde(default = "default_item_width")]
    pub item_width: f64,
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Gap between tiles as a fraction of tile width.
    #[serde(default = "default_spacing")]
    pub spacing: f64,
}

fn default_background() -> String { "#000000".to_string() }
fn default_box_size() -> String { "100%".to_string() }
fn default_ratio() -> f64 { 1.4 }
fn default_row_min() -> usize { 3 }
fn default_row_max() -> usize { 9 }
fn default_item_width() -> f64 { 250.0 }
fn default_speed() -> f64 { 1.0 }
fn default_spacing() -> f64 { 0.05 }

impl StarfieldConfig {
    /// Config with every option at its default and the given catalog.
    pub fn with_images(images: Vec<String>) -> Self {
        Self {
            images,
            background: default_background(),
            placeholder: None,
            width: default_box_size(),
            height: default_box_size(),
            ratio: default_ratio(),
            row_min: default_row_min(),
            row_max: default_row_max(),
            item_width: default_item_width(),
            speed: default_speed(),
            spacing: default_spacing(),
        }
    }

    /// Parse and validate a JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if !self.ratio.is_finite() || self.ratio <= 0.0 {
            return Err(ConfigError::InvalidRatio(self.ratio));
        }
        if self.row_min == 0 || self.row_min > self.row_max {
            return Err(ConfigError::InvalidColumnBounds { min: self.row_min, max: self.row_max });
        }
        if !self.item_width.is_finite() || self.item_width <= 0.0 {
            return Err(ConfigError::InvalidItemWidth(self.item_width));
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(ConfigError::InvalidSpacing(self.spacing));
        }
        if !self.speed.is_finite() {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        Ok(())
    }
}
