//! Frame driver - owns the current epoch and advances it once per frame.

use std::collections::TryReserveError;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::schema::{ConfigError, DisplayGeometry, EngineConfig, Ruleset, SettingValue};

use super::{Epoch, FrameStats, VisibleCells};

/// Engine errors.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to allocate a grid of {cells} cells")]
    Allocation {
        cells: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("Engine has been shut down")]
    Stopped,
}

/// BioGenesis engine.
///
/// Each call to [`Engine::on_frame`] counts one frame, re-creates the epoch
/// once `reset_time` frames have passed, steps the simulation once and
/// returns the live cells to draw.
pub struct Engine<R: Rng = StdRng> {
    display: DisplayGeometry,
    config: EngineConfig,
    rng: R,
    epoch: Option<Epoch>,
    epochs_created: u64,
}

impl Engine<StdRng> {
    /// Create an engine seeded from OS entropy.
    pub fn new(display: DisplayGeometry, config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_rng(display, config, StdRng::from_entropy())
    }

    /// Create an engine with a fixed seed. Runs with equal seeds, displays
    /// and configs are identical frame for frame.
    pub fn seeded(
        display: DisplayGeometry,
        config: EngineConfig,
        seed: u64,
    ) -> Result<Self, EngineError> {
        Self::with_rng(display, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Create an engine drawing from `rng` and allocate the first epoch.
    pub fn with_rng(
        display: DisplayGeometry,
        config: EngineConfig,
        rng: R,
    ) -> Result<Self, EngineError> {
        display.validate()?;

        let mut engine = Self {
            display,
            config,
            rng,
            epoch: None,
            epochs_created: 0,
        };
        engine.recreate()?;

        log::info!(
            "engine started on {}x{} display",
            display.width,
            display.height
        );
        Ok(engine)
    }

    /// Discard the current epoch and build a fresh one from the current
    /// configuration.
    ///
    /// The old grid is released first. If the new allocation fails the
    /// engine is left stopped.
    pub fn recreate(&mut self) -> Result<(), EngineError> {
        self.epoch = None;
        let id = self.epochs_created;
        let epoch = Epoch::create(id, &self.display, &self.config, &mut self.rng)?;
        self.epochs_created += 1;
        self.epoch = Some(epoch);
        Ok(())
    }

    /// Reseed the current epoch without resizing, e.g. when resuming.
    pub fn on_activate(&mut self) -> Result<(), EngineError> {
        let epoch = self.epoch.as_mut().ok_or(EngineError::Stopped)?;
        epoch.seed(&mut self.rng);
        Ok(())
    }

    /// Advance one frame and return the live cells to draw.
    pub fn on_frame(&mut self) -> Result<VisibleCells<'_>, EngineError> {
        self.advance()?;
        let epoch = self.epoch.as_ref().ok_or(EngineError::Stopped)?;
        Ok(epoch.visible_cells())
    }

    /// Advance one frame without producing output.
    pub fn advance(&mut self) -> Result<(), EngineError> {
        let reset_time = self.config.reset_time;
        let frame = self.epoch.as_mut().ok_or(EngineError::Stopped)?.tick();

        if frame == reset_time {
            log::debug!("epoch ended after {frame} frames");
            self.recreate()?;
        }

        if let Some(epoch) = self.epoch.as_mut() {
            epoch.step();
        }
        Ok(())
    }

    /// Release the grid. Later frames return [`EngineError::Stopped`].
    pub fn shutdown(&mut self) {
        if self.epoch.take().is_some() {
            log::info!("engine shut down after {} epochs", self.epochs_created);
        }
    }

    pub fn is_running(&self) -> bool {
        self.epoch.is_some()
    }

    /// Switch the birth rule for the current epoch. New epochs always start
    /// on [`Ruleset::Standard`].
    pub fn set_ruleset(&mut self, ruleset: Ruleset) -> Result<(), EngineError> {
        let epoch = self.epoch.as_mut().ok_or(EngineError::Stopped)?;
        epoch.set_ruleset(ruleset);
        Ok(())
    }

    /// Replace the configuration used by the next epoch.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// Apply one host setting to the configuration used by the next epoch.
    pub fn apply_setting(&mut self, key: &str, value: SettingValue) -> Result<(), EngineError> {
        self.config.apply_setting(key, value)?;
        Ok(())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    pub fn display(&self) -> &DisplayGeometry {
        &self.display
    }

    pub fn epoch(&self) -> Option<&Epoch> {
        self.epoch.as_ref()
    }

    pub fn epoch_mut(&mut self) -> Option<&mut Epoch> {
        self.epoch.as_mut()
    }

    /// Number of epochs created so far, including the current one.
    pub fn epochs_created(&self) -> u64 {
        self.epochs_created
    }

    /// Statistics of the current epoch.
    pub fn stats(&self) -> Option<FrameStats> {
        self.epoch.as_ref().map(Epoch::stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{Cell, CellGrid, CellRect, PALETTE_SIZE, Palette, Rgba, hsv_to_rgb};
    use crate::schema::ColorMode;

    fn display() -> DisplayGeometry {
        DisplayGeometry::new(320, 240)
    }

    fn config(reset_time: u32) -> EngineConfig {
        EngineConfig {
            reset_time,
            ..Default::default()
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = Engine::seeded(display(), EngineConfig::default(), 1).unwrap();
        assert!(engine.is_running());
        assert_eq!(engine.epochs_created(), 1);
    }

    #[test]
    fn test_zero_display_rejected() {
        let result = Engine::seeded(DisplayGeometry::new(0, 240), EngineConfig::default(), 1);
        assert!(matches!(
            result,
            Err(EngineError::Config(ConfigError::InvalidDisplay { .. }))
        ));
    }

    #[test]
    fn test_epoch_boundary() {
        let mut engine = Engine::seeded(display(), config(5), 7).unwrap();

        for frame in 1..5 {
            engine.advance().unwrap();
            assert_eq!(engine.epoch().unwrap().id(), 0);
            assert_eq!(engine.epoch().unwrap().frame_counter(), frame);
        }

        engine.advance().unwrap();
        let epoch = engine.epoch().unwrap();
        assert_eq!(epoch.id(), 1);
        assert_eq!(epoch.frame_counter(), 0);
        assert_eq!(engine.epochs_created(), 2);

        for _ in 0..5 {
            engine.advance().unwrap();
        }
        assert_eq!(engine.epoch().unwrap().id(), 2);
    }

    #[test]
    fn test_zero_reset_time_never_recreates() {
        let mut engine = Engine::seeded(display(), config(0), 3).unwrap();
        for _ in 0..50 {
            engine.advance().unwrap();
        }
        assert_eq!(engine.epochs_created(), 1);
    }

    #[test]
    fn test_new_epoch_resets_ruleset() {
        let mut engine = Engine::seeded(display(), config(3), 5).unwrap();
        engine.set_ruleset(Ruleset::Alternate).unwrap();
        engine.advance().unwrap();
        assert_eq!(engine.epoch().unwrap().ruleset(), Ruleset::Alternate);
        engine.advance().unwrap();
        engine.advance().unwrap();
        assert_eq!(engine.epoch().unwrap().ruleset(), Ruleset::Standard);
    }

    #[test]
    fn test_frame_rects_match_live_cells() {
        let mut engine = Engine::seeded(display(), EngineConfig::default(), 11).unwrap();
        let rects: Vec<CellRect> = engine.on_frame().unwrap().collect();
        let epoch = engine.epoch().unwrap();
        let g = *epoch.geometry();

        assert_eq!(rects.len(), epoch.grid().live_count());
        for rect in &rects {
            assert_eq!(rect.x % g.cell_size_x, 0);
            assert_eq!(rect.y % g.cell_size_y, 0);
            assert!(rect.x < g.width as u32 * g.cell_size_x);
            assert!(rect.y < g.height as u32 * g.cell_size_y);
            assert_eq!(rect.w, g.cell_size_x - g.spacing);
            let cell = epoch.grid().get(
                (rect.x / g.cell_size_x) as usize,
                (rect.y / g.cell_size_y) as usize,
            );
            assert!(cell.alive);
            assert_eq!(cell.color, rect.color);
        }
    }

    #[test]
    fn test_same_seed_same_frames() {
        let run = |seed| {
            let mut engine = Engine::seeded(display(), config(4), seed).unwrap();
            let mut frames = Vec::new();
            for _ in 0..10 {
                frames.push(engine.on_frame().unwrap().collect::<Vec<_>>());
            }
            frames
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut engine = Engine::seeded(display(), EngineConfig::default(), 1).unwrap();
        engine.shutdown();
        engine.shutdown();
        assert!(!engine.is_running());
        assert!(matches!(engine.on_frame(), Err(EngineError::Stopped)));
        assert!(matches!(engine.on_activate(), Err(EngineError::Stopped)));
        assert!(engine.stats().is_none());
    }

    #[test]
    fn test_activate_reseeds_in_place() {
        let mut engine = Engine::seeded(display(), EngineConfig::default(), 8).unwrap();
        for _ in 0..20 {
            engine.advance().unwrap();
        }
        let geometry = *engine.epoch().unwrap().geometry();
        engine.on_activate().unwrap();
        let epoch = engine.epoch().unwrap();
        assert_eq!(*epoch.geometry(), geometry);
        assert_eq!(epoch.id(), 0);
        assert!(epoch.grid().live_count() > 0);
    }

    #[test]
    fn test_settings_apply_to_next_epoch() {
        let mut engine = Engine::seeded(display(), config(2), 13).unwrap();
        engine
            .apply_setting("lifetime", SettingValue::Bool(false))
            .unwrap();
        engine
            .apply_setting("colony", SettingValue::Bool(false))
            .unwrap();
        for _ in 0..6 {
            engine.advance().unwrap();
        }
        assert_eq!(engine.epoch().unwrap().id(), 3);
        assert_eq!(engine.epoch().unwrap().mode(), ColorMode::NeighborPattern);
    }

    #[test]
    fn test_blinker_scenario() {
        // 10x10 lifetime grid with a single blinker: it flips every frame and
        // each newborn end takes palette[0].
        let mut engine = Engine::seeded(display(), config(0), 21).unwrap();
        let colors = (0..PALETTE_SIZE)
            .map(|i| hsv_to_rgb((i % 360) as f32, 1.0, 1.0))
            .collect();
        let palette = Palette::from_colors(colors, 8);
        let first = palette.get(0);

        let mut grid = CellGrid::new(10, 10).unwrap();
        for x in 3..6 {
            *grid.get_mut(x, 4) = Cell::born(first);
        }
        let geometry = *engine.epoch().unwrap().geometry();
        let epoch = engine.epoch_mut().unwrap();
        *epoch = Epoch::from_parts(0, geometry, ColorMode::Lifetime, palette, grid);

        let cells_of = |rects: Vec<CellRect>| -> Vec<(u32, u32, Rgba)> {
            rects
                .into_iter()
                .map(|r| (r.x / geometry.cell_size_x, r.y / geometry.cell_size_y, r.color))
                .collect()
        };

        let vertical = cells_of(engine.on_frame().unwrap().collect());
        assert_eq!(vertical.len(), 3);
        assert_eq!(vertical[0], (4, 3, first));
        assert_eq!(vertical[2], (4, 5, first));
        assert_eq!((vertical[1].0, vertical[1].1), (4, 4));

        let horizontal = cells_of(engine.on_frame().unwrap().collect());
        assert_eq!(horizontal.len(), 3);
        assert_eq!(horizontal[0], (3, 4, first));
        assert_eq!(horizontal[2], (5, 4, first));

        let vertical_again = cells_of(engine.on_frame().unwrap().collect());
        assert_eq!(vertical_again[0], (4, 3, first));
    }
}
