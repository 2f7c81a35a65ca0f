//! Schema module - Configuration, display and mode types for BioGenesis.

mod coloring;
mod config;

pub use coloring::*;
pub use config::*;
