//! BioGenesis - self-reinventing colored Life-like cellular automata.
//!
//! Every epoch picks a random cell size, a coloring mode and a fresh palette,
//! seeds a quarter of the grid and then runs one of three Life-like step
//! rules until the next epoch replaces it.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, display geometry and mode types
//! - `compute`: Color model, palettes, padded grid, step rules and the
//!   frame driver
//!
//! # Example
//!
//! ```rust,no_run
//! use biogenesis::{DisplayGeometry, Engine, EngineConfig};
//!
//! let mut engine = Engine::new(DisplayGeometry::new(1280, 720), EngineConfig::default())?;
//!
//! for _ in 0..100 {
//!     for rect in engine.on_frame()? {
//!         // draw rect.x, rect.y, rect.w, rect.h filled with rect.color
//!         let _ = rect;
//!     }
//! }
//!
//! engine.shutdown();
//! # Ok::<(), biogenesis::EngineError>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{CellRect, Engine, EngineError, Epoch, FrameStats, Palette, Rgba, VisibleCells};
pub use schema::{ColorMode, ConfigError, DisplayGeometry, EngineConfig, Ruleset, SettingValue};
