pub mod starfield;

pub use starfield::{Starfield, StarfieldView};
