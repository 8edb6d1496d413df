//! Platform-independent core of the starfield image scroller: configuration,
//! tile layout, center cropping and the per-frame scroll/fade step.
//!
//! Nothing here touches the DOM. The browser crate supplies the bitmap handle
//! (via [`layout::TileImage`]) and the canvas (via [`scene::Painter`]).

pub mod animation;
pub mod config;
pub mod crop;
pub mod layout;
pub mod scene;
pub mod viewport;

pub use config::{ConfigError, StarfieldConfig};
pub use scene::{Painter, Starfield};
