//! Per-epoch palette generation.
//!
//! Every epoch samples a fresh palette of [`PALETTE_SIZE`] random colors and
//! then shapes it for the epoch's coloring mode: lifetime mode gets an age
//! ramp, neighbor-pattern mode gets its 256 mask entries folded by symmetry.

use rand::Rng;

use crate::schema::ColorMode;

use super::{Rgba, hsv_to_rgb, reduce_palette};

/// Number of palette entries.
pub const PALETTE_SIZE: usize = 800;

/// Curated age ramp: deep blue, violet, cyan, green, gold, orange, red.
pub const LIFETIME_RAMP: [Rgba; 8] = [
    Rgba::rgb(30, 30, 200),
    Rgba::rgb(120, 10, 255),
    Rgba::rgb(50, 100, 250),
    Rgba::rgb(0, 250, 200),
    Rgba::rgb(60, 250, 40),
    Rgba::rgb(244, 200, 40),
    Rgba::rgb(250, 100, 30),
    Rgba::rgb(255, 10, 20),
];

/// Hand-picked colors for visually distinct neighbor masks.
pub const NEIGHBOR_PRESET: [(usize, Rgba); 8] = [
    (11, Rgba::rgb(0x22, 0x22, 0x22)),
    (2, Rgba::rgb(0x66, 0x00, 0xFF)),
    (24, Rgba::rgb(0xFF, 0x33, 0xFF)),
    (12, Rgba::rgb(0xFF, 0x00, 0xAA)),
    (36, Rgba::rgb(0x00, 0x88, 0x00)),
    (5, Rgba::rgb(0x00, 0xDD, 0xDD)),
    (10, Rgba::rgb(0x00, 0x00, 0xAA)),
    (13, Rgba::rgb(0xCC, 0x99, 0x00)),
];

/// Sample one random color for `mode`.
pub fn random_color<R: Rng + ?Sized>(mode: ColorMode, rng: &mut R) -> Rgba {
    let h = rng.gen_range(0..360) as f32;
    let s = if mode.wants_saturated() {
        0.9 + 0.1 * rng.gen_range(0.0..=1.0f32)
    } else {
        0.3 + 0.7 * rng.gen_range(0.0..=1.0f32)
    };
    let v = 0.67 + 0.25 * rng.gen_range(0.0..=1.0f32);
    hsv_to_rgb(h, s, v)
}

/// Ordered palette plus the number of entries the lifetime ramp uses.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba>,
    max_color: usize,
}

impl Palette {
    /// Generate the palette for a new epoch.
    pub fn generate<R: Rng + ?Sized>(mode: ColorMode, preset_chance: u32, rng: &mut R) -> Self {
        let colors = (0..PALETTE_SIZE).map(|_| random_color(mode, rng)).collect();
        let mut palette = Self {
            colors,
            max_color: LIFETIME_RAMP.len(),
        };

        let lifetime = mode == ColorMode::Lifetime;
        if lifetime && rng.gen_range(0..100) < preset_chance {
            palette.colors[..LIFETIME_RAMP.len()].copy_from_slice(&LIFETIME_RAMP);
        } else {
            // Two draws: a coin flip, then a magnitude. Keeps most epochs at
            // the base ramp length with the occasional faster shimmer.
            let flip = rng.gen_range(0..2usize);
            let extra = rng.gen_range(0..60usize);
            palette.max_color += flip * extra;
        }

        if lifetime && rng.gen_range(0..3) != 0 {
            palette.extend_ramp();
        }

        if mode == ColorMode::NeighborPattern {
            if rng.gen_range(0..100) < preset_chance {
                palette.apply_neighbor_preset();
            }
            reduce_palette(&mut palette.colors);
        }

        palette
    }

    /// Build a palette directly from colors. `max_color` is clamped to
    /// `1..=colors.len()`.
    pub fn from_colors(colors: Vec<Rgba>, max_color: usize) -> Self {
        let max_color = max_color.clamp(1, colors.len().max(1));
        Self { colors, max_color }
    }

    /// Spread a gradient from the last ramp entry to the final entry and
    /// let lifetimes run across the whole palette.
    fn extend_ramp(&mut self) {
        let len = self.colors.len();
        let start = self.max_color - 1;
        let from = self.colors[start];
        let to = self.colors[len - 1];
        let span = (len - self.max_color) as f32;

        for (i, color) in self.colors.iter_mut().enumerate().skip(start) {
            let t = (i - start) as f32 / span;
            *color = Rgba::lerp(from, to, t);
        }
        self.max_color = len;
    }

    fn apply_neighbor_preset(&mut self) {
        for &(mask, color) in &NEIGHBOR_PRESET {
            self.colors[mask] = color;
        }
    }

    /// Color at `index`. Indices past the end clamp to the last entry.
    #[inline]
    pub fn get(&self, index: usize) -> Rgba {
        self.colors
            .get(index)
            .or_else(|| self.colors.last())
            .copied()
            .unwrap_or(Rgba::TRANSPARENT)
    }

    /// Color for a cell that has lived `lifetime` cycles.
    #[inline]
    pub fn lifetime_color(&self, lifetime: u16) -> Rgba {
        self.get(lifetime as usize)
    }

    /// Active ramp length. Lifetimes saturate at `max_color - 1`.
    #[inline]
    pub fn max_color(&self) -> usize {
        self.max_color
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
