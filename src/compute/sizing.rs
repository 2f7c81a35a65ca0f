//! Cell and grid geometry for a new epoch.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::schema::{DisplayGeometry, EngineConfig};

/// Pixel geometry of one epoch's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Cells per row.
    pub width: usize,
    /// Cells per column.
    pub height: usize,
    /// Cell width in pixels.
    pub cell_size_x: u32,
    /// Cell height in pixels.
    pub cell_size_y: u32,
    /// Gap between drawn cells (0 or 1).
    pub spacing: u32,
}

/// Inclusive range of cell widths the display and size bounds allow.
///
/// `cell = sqrt(area / (size^2 * ratio))`, so the upper size bound gives the
/// smallest cell. Both ends are at least 1 pixel.
pub fn cell_size_range(display: &DisplayGeometry, config: &EngineConfig) -> (u32, u32) {
    let (min_size, max_size) = config.size_bounds();
    let area = display.area() as f64;
    let ratio = display.ratio() as f64;

    let cell_for = |size: u32| -> u32 {
        let size = size as f64;
        let denom = (size * size * ratio).max(1.0);
        ((area / denom).sqrt() as u32).max(1)
    };

    let lo = cell_for(max_size);
    let hi = cell_for(min_size);
    (lo.min(hi), lo.max(hi))
}

/// Geometry for a given cell width.
pub fn geometry_for(display: &DisplayGeometry, config: &EngineConfig, cell_size_x: u32) -> GridGeometry {
    let cell_size_x = cell_size_x.max(1);
    let cell_size_y = if cell_size_x > 5 {
        ((display.ratio() * cell_size_x as f32) as u32).max(1)
    } else {
        cell_size_x
    };

    let width = (display.width / cell_size_x).max(1) as usize;
    let height = (display.height / cell_size_y).max(1) as usize;
    let spacing = if cell_size_x <= config.cell_line_limit {
        0
    } else {
        1
    };

    GridGeometry {
        width,
        height,
        cell_size_x,
        cell_size_y,
        spacing,
    }
}

/// Pick a random cell size within bounds and derive the grid geometry.
pub fn random_geometry<R: Rng + ?Sized>(
    display: &DisplayGeometry,
    config: &EngineConfig,
    rng: &mut R,
) -> GridGeometry {
    let (lo, hi) = cell_size_range(display, config);
    let cell_size_x = rng.gen_range(lo..=hi);
    geometry_for(display, config, cell_size_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_default_range_on_1080p() {
        let display = DisplayGeometry::new(1920, 1080);
        let (lo, hi) = cell_size_range(&display, &EngineConfig::default());
        // sqrt(2073600 / (250^2 * 16/9)) = 4.32, sqrt(2073600 / (50^2 * 16/9)) = 21.6
        assert_eq!((lo, hi), (4, 21));
    }

    #[test]
    fn test_small_cells_stay_square_and_solid() {
        let display = DisplayGeometry::new(1920, 1080);
        let geometry = geometry_for(&display, &EngineConfig::default(), 3);
        assert_eq!(geometry.cell_size_y, 3);
        assert_eq!(geometry.spacing, 0);
        assert_eq!((geometry.width, geometry.height), (640, 360));
    }

    #[test]
    fn test_large_cells_follow_ratio() {
        let display = DisplayGeometry::new(800, 400);
        let geometry = geometry_for(&display, &EngineConfig::default(), 10);
        assert_eq!(geometry.cell_size_y, 20);
        assert_eq!(geometry.spacing, 1);
        assert_eq!((geometry.width, geometry.height), (80, 20));
    }

    #[test]
    fn test_pathological_config_clamps() {
        let display = DisplayGeometry::new(16, 9);
        let config = EngineConfig {
            min_size: 5000,
            max_size: 0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..20 {
            let geometry = random_geometry(&display, &config, &mut rng);
            assert!(geometry.cell_size_x >= 1 && geometry.cell_size_y >= 1);
            assert!(geometry.width >= 1 && geometry.height >= 1);
        }
    }

    #[test]
    fn test_huge_cells_keep_one_cell() {
        let display = DisplayGeometry::new(100, 100);
        let geometry = geometry_for(&display, &EngineConfig::default(), 500);
        assert_eq!((geometry.width, geometry.height), (1, 1));
    }
}
