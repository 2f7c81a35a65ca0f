//! Compute module - Color model, palettes, grid and step rules for BioGenesis.

mod color;
mod engine;
mod epoch;
mod frame;
mod grid;
mod palette;
mod sizing;
mod step;
mod symmetry;

pub use color::*;
pub use engine::*;
pub use epoch::*;
pub use frame::*;
pub use grid::*;
pub use palette::*;
pub use sizing::*;
pub use step::*;
pub use symmetry::*;
