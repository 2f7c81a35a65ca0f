//! Symmetry reduction for the 256-entry neighbor-pattern palette.
//!
//! A neighbor mask has one bit per compass slot:
//!
//! ```text
//!   bit 0 NW | bit 1 N | bit 2 NE
//!   bit 3 W  |  cell   | bit 4 E
//!   bit 5 SW | bit 6 S | bit 7 SE
//! ```
//!
//! Masks related by a quarter turn or a mirror describe the same local
//! shape, so the palette is folded onto the numerically smallest member of
//! each orbit under the 8-element dihedral group.

use super::Rgba;

/// Number of distinct neighbor masks.
pub const NEIGHBOR_PATTERNS: usize = 256;

/// Source slot for each destination slot under a quarter turn.
const ROTATE_SOURCE: [u8; 8] = [2, 4, 7, 1, 6, 0, 3, 5];

/// Source slot for each destination slot under a left/right mirror.
const FLIP_SOURCE: [u8; 8] = [2, 1, 0, 4, 3, 7, 6, 5];

#[inline]
fn permute(mask: u8, source: &[u8; 8]) -> u8 {
    source
        .iter()
        .enumerate()
        .fold(0u8, |acc, (dst, &src)| acc | (((mask >> src) & 1) << dst))
}

/// Rotate a neighbor mask by a quarter turn.
#[inline]
pub fn rotate(mask: u8) -> u8 {
    permute(mask, &ROTATE_SOURCE)
}

/// Mirror a neighbor mask left/right.
#[inline]
pub fn flip(mask: u8) -> u8 {
    permute(mask, &FLIP_SOURCE)
}

/// All 8 rotation/reflection images of `mask` (with repeats for symmetric
/// masks). Index 0..4 are the rotations, 4..8 the rotations of the mirror.
pub fn orbit(mask: u8) -> [u8; 8] {
    let mut images = [0u8; 8];
    let mut bits = mask;
    for reflection in 0..2 {
        for turn in 0..4 {
            images[reflection * 4 + turn] = bits;
            bits = rotate(bits);
        }
        bits = flip(bits);
    }
    images
}

/// Numerically smallest member of the orbit of `mask`.
pub fn canonical(mask: u8) -> u8 {
    orbit(mask).into_iter().min().unwrap_or(mask)
}

/// Fold the first 256 palette entries onto their canonical representatives.
///
/// Entries beyond 256 are left untouched. Palettes shorter than 256 entries
/// are reduced over the entries they have.
pub fn reduce_palette(palette: &mut [Rgba]) {
    let len = palette.len().min(NEIGHBOR_PATTERNS);
    for i in 0..len {
        let rep = canonical(i as u8) as usize;
        palette[i] = palette[rep];
    }
}
