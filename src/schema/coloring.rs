//! Coloring modes and birth rulesets.

use serde::{Deserialize, Serialize};

/// How live cells are colored. Each mode also selects its own step rule.
///
/// The discriminant is the bit position in the allowed-coloring mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ColorMode {
    /// Color by age along a palette ramp.
    Lifetime = 0,
    /// Newborn cells inherit a neighbor's color.
    Colony = 1,
    /// Color by the literal 8-bit live-neighbor mask.
    NeighborPattern = 2,
}

impl ColorMode {
    /// All modes in mask-bit order.
    pub const ALL: [ColorMode; 3] = [
        ColorMode::Lifetime,
        ColorMode::Colony,
        ColorMode::NeighborPattern,
    ];

    /// Bit for this mode in an allowed-coloring mask.
    #[inline]
    pub fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Modes permitted by `mask`. A mask naming no known mode permits all.
    pub fn allowed(mask: u8) -> Vec<ColorMode> {
        let allowed: Vec<ColorMode> = Self::ALL
            .into_iter()
            .filter(|mode| mask & mode.bit() != 0)
            .collect();
        if allowed.is_empty() {
            Self::ALL.to_vec()
        } else {
            allowed
        }
    }

    /// Palette samples are drawn at high saturation in these modes.
    #[inline]
    pub fn wants_saturated(self) -> bool {
        matches!(self, ColorMode::Lifetime | ColorMode::NeighborPattern)
    }
}

/// Birth rule variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ruleset {
    /// B3/S23.
    #[default]
    Standard,
    /// Adds a second birth condition on six neighbors.
    Alternate,
}

impl Ruleset {
    #[inline]
    pub fn is_alternate(self) -> bool {
        matches!(self, Ruleset::Alternate)
    }
}
