//! Configuration types for BioGenesis engines.

use serde::{Deserialize, Serialize};

use super::ColorMode;

fn default_min_size() -> u32 {
    50
}

fn default_max_size() -> u32 {
    250
}

fn default_reset_time() -> u32 {
    2000
}

fn default_preset_chance() -> u32 {
    30
}

fn default_cell_line_limit() -> u32 {
    3
}

fn default_enabled() -> bool {
    true
}

/// Engine configuration, re-read every time a new epoch is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Lower size bound. Smaller values allow larger cells.
    #[serde(default = "default_min_size")]
    pub min_size: u32,
    /// Upper size bound. Larger values allow smaller, denser cells.
    #[serde(default = "default_max_size")]
    pub max_size: u32,
    /// Frames per epoch. 0 never re-creates the grid.
    #[serde(default = "default_reset_time")]
    pub reset_time: u32,
    /// Percent chance (0-100) of using a curated palette.
    #[serde(default = "default_preset_chance")]
    pub preset_chance: u32,
    /// Cells at or below this pixel width are drawn without a gap.
    #[serde(default = "default_cell_line_limit")]
    pub cell_line_limit: u32,
    /// Allow lifetime coloring.
    #[serde(default = "default_enabled")]
    pub lifetime: bool,
    /// Allow colony coloring.
    #[serde(default = "default_enabled")]
    pub colony: bool,
    /// Allow neighbor-pattern coloring.
    #[serde(default = "default_enabled")]
    pub neighbour: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
            max_size: default_max_size(),
            reset_time: default_reset_time(),
            preset_chance: default_preset_chance(),
            cell_line_limit: default_cell_line_limit(),
            lifetime: true,
            colony: true,
            neighbour: true,
        }
    }
}

/// Value of a single host setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    Int(i32),
    Float(f32),
    Bool(bool),
}

impl SettingValue {
    fn kind(&self) -> &'static str {
        match self {
            SettingValue::Int(_) => "int",
            SettingValue::Float(_) => "float",
            SettingValue::Bool(_) => "bool",
        }
    }
}

impl EngineConfig {
    /// Bitmask of allowed coloring modes (bit 0 lifetime, bit 1 colony,
    /// bit 2 neighbor pattern).
    pub fn allowed_coloring(&self) -> u8 {
        let mut mask = 0;
        if self.lifetime {
            mask |= ColorMode::Lifetime.bit();
        }
        if self.colony {
            mask |= ColorMode::Colony.bit();
        }
        if self.neighbour {
            mask |= ColorMode::NeighborPattern.bit();
        }
        mask
    }

    /// Whether `mode` may be picked for a new epoch.
    pub fn allows(&self, mode: ColorMode) -> bool {
        ColorMode::allowed(self.allowed_coloring()).contains(&mode)
    }

    /// Preset chance as a percentage capped at 100.
    #[inline]
    pub fn preset_percent(&self) -> u32 {
        self.preset_chance.min(100)
    }

    /// Size bounds as `(min, max)`, each at least 1, swapped if inverted.
    pub fn size_bounds(&self) -> (u32, u32) {
        let mut min = self.min_size;
        let mut max = self.max_size;
        if min == 0 || max == 0 {
            log::warn!("size bounds ({min}, {max}) contain zero, clamping to 1");
            min = min.max(1);
            max = max.max(1);
        }
        if min > max {
            log::warn!("size bounds inverted ({min} > {max}), swapping");
            std::mem::swap(&mut min, &mut max);
        }
        (min, max)
    }

    /// Apply one host setting by name.
    ///
    /// `presetchance` is a 0.0-1.0 fraction. The mode toggles only ever
    /// disable or re-enable their own mode.
    pub fn apply_setting(&mut self, key: &str, value: SettingValue) -> Result<(), ConfigError> {
        let mismatch = |expected: &'static str| ConfigError::SettingKind {
            key: key.to_string(),
            expected,
            found: value.kind(),
        };

        match (key, value) {
            ("minsize", SettingValue::Int(v)) => self.min_size = v.max(0) as u32,
            ("maxsize", SettingValue::Int(v)) => self.max_size = v.max(0) as u32,
            ("resettime", SettingValue::Int(v)) => self.reset_time = v.max(0) as u32,
            ("lineminsize", SettingValue::Int(v)) => self.cell_line_limit = v.max(0) as u32,
            ("presetchance", SettingValue::Float(v)) => {
                self.preset_chance = (100.0 * v).clamp(0.0, 100.0) as u32
            }
            ("lifetime", SettingValue::Bool(v)) => self.lifetime = v,
            ("colony", SettingValue::Bool(v)) => self.colony = v,
            ("neighbour", SettingValue::Bool(v)) => self.neighbour = v,
            ("minsize" | "maxsize" | "resettime" | "lineminsize", _) => {
                return Err(mismatch("int"));
            }
            ("presetchance", _) => return Err(mismatch("float")),
            ("lifetime" | "colony" | "neighbour", _) => return Err(mismatch("bool")),
            _ => return Err(ConfigError::UnknownSetting(key.to_string())),
        }
        Ok(())
    }
}

/// Pixel dimensions of the surface the engine draws onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayGeometry {
    pub width: u32,
    pub height: u32,
}

impl DisplayGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height.
    #[inline]
    pub fn ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Total pixel count.
    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Validate display dimensions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDisplay {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Display dimensions must be non-zero (got {width}x{height})")]
    InvalidDisplay { width: u32, height: u32 },
    #[error("Unknown setting '{0}'")]
    UnknownSetting(String),
    #[error("Setting '{key}' expects a {expected} value, got {found}")]
    SettingKind {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}
