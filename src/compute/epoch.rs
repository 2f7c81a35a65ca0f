//! One epoch: a grid, its geometry, palette and coloring mode.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::schema::{ColorMode, DisplayGeometry, EngineConfig, Ruleset};

use super::{
    Cell, CellGrid, EngineError, GridGeometry, Palette, VisibleCells, random_color,
    random_geometry, step,
};

/// Simulation state between two re-creations.
#[derive(Debug, Clone)]
pub struct Epoch {
    id: u64,
    geometry: GridGeometry,
    mode: ColorMode,
    ruleset: Ruleset,
    frame_counter: u32,
    palette: Palette,
    grid: CellGrid,
}

impl Epoch {
    /// Size, allocate, color and seed a new epoch.
    pub fn create<R: Rng + ?Sized>(
        id: u64,
        display: &DisplayGeometry,
        config: &EngineConfig,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let geometry = random_geometry(display, config, rng);
        let grid = CellGrid::new(geometry.width, geometry.height).map_err(|source| {
            EngineError::Allocation {
                cells: CellGrid::buffer_len(geometry.width, geometry.height),
                source,
            }
        })?;

        let mode = ColorMode::allowed(config.allowed_coloring())
            .choose(rng)
            .copied()
            .unwrap_or(ColorMode::Lifetime);
        let palette = Palette::generate(mode, config.preset_percent(), rng);

        let mut epoch = Self {
            id,
            geometry,
            mode,
            ruleset: Ruleset::Standard,
            frame_counter: 0,
            palette,
            grid,
        };
        epoch.seed(rng);

        log::debug!(
            "epoch {}: {}x{} cells of {}x{} px (spacing {}), {:?}, ramp length {}",
            id,
            geometry.width,
            geometry.height,
            geometry.cell_size_x,
            geometry.cell_size_y,
            geometry.spacing,
            mode,
            epoch.palette.max_color()
        );

        Ok(epoch)
    }

    /// Wrap an existing grid, e.g. a hand-built pattern.
    pub fn from_parts(
        id: u64,
        geometry: GridGeometry,
        mode: ColorMode,
        palette: Palette,
        grid: CellGrid,
    ) -> Self {
        let geometry = GridGeometry {
            width: grid.width(),
            height: grid.height(),
            ..geometry
        };
        Self {
            id,
            geometry,
            mode,
            ruleset: Ruleset::Standard,
            frame_counter: 0,
            palette,
            grid,
        }
    }

    /// Clear the grid and bring a random quarter of the cells to life.
    pub fn seed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid.clear();
        let first = self.palette.get(0);
        let mode = self.mode;
        for cell in self.grid.cells_mut() {
            if rng.gen_range(0..4) == 0 {
                let color = match mode {
                    ColorMode::Lifetime => first,
                    _ => random_color(mode, rng),
                };
                *cell = Cell::born(color);
            }
        }
        log::trace!("epoch {} seeded, {} live", self.id, self.grid.live_count());
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        step(&mut self.grid, self.mode, self.ruleset, &self.palette);
    }

    /// Count one frame; returns the updated counter.
    pub(crate) fn tick(&mut self) -> u32 {
        self.frame_counter = self.frame_counter.saturating_add(1);
        self.frame_counter
    }

    /// Live cells as drawable rectangles.
    pub fn visible_cells(&self) -> VisibleCells<'_> {
        VisibleCells::new(self.grid.cells(), self.geometry)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    pub fn set_ruleset(&mut self, ruleset: Ruleset) {
        self.ruleset = ruleset;
    }

    /// Frames since this epoch was created.
    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut CellGrid {
        &mut self.grid
    }

    /// Snapshot for monitoring.
    pub fn stats(&self) -> FrameStats {
        FrameStats {
            epoch: self.id,
            frame: self.frame_counter,
            mode: self.mode,
            ruleset: self.ruleset,
            width: self.geometry.width,
            height: self.geometry.height,
            cell_size_x: self.geometry.cell_size_x,
            cell_size_y: self.geometry.cell_size_y,
            max_color: self.palette.max_color(),
            live_cells: self.grid.live_count(),
        }
    }
}

/// Epoch statistics for monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    pub epoch: u64,
    pub frame: u32,
    pub mode: ColorMode,
    pub ruleset: Ruleset,
    pub width: usize,
    pub height: usize,
    pub cell_size_x: u32,
    pub cell_size_y: u32,
    pub max_color: usize,
    pub live_cells: usize,
}
