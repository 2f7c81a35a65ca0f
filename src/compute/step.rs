//! Step rules for the three coloring modes.
//!
//! All rules share [`CellGrid::sweep`] for neighbor gathering and differ only
//! in how a cell reacts to its [`Neighborhood`]. Birth and survival always
//! read the committed state, so visiting order never matters.

use crate::schema::{ColorMode, Ruleset};

use super::{Cell, CellGrid, Neighborhood, Palette, Rgba};

/// Six-neighbor masks that give birth under the alternate neighbor rule.
pub const ALTERNATE_BIRTH_MASKS: [u8; 2] = [0x7E, 0xDB];

#[inline]
fn survives(count: u32) -> bool {
    count == 2 || count == 3
}

#[inline]
fn count_birth(count: u32, ruleset: Ruleset) -> bool {
    count == 3 || (ruleset.is_alternate() && count == 6)
}

#[inline]
fn pattern_birth(hood: &Neighborhood, ruleset: Ruleset) -> bool {
    hood.count() == 3 || (ruleset.is_alternate() && ALTERNATE_BIRTH_MASKS.contains(&hood.mask))
}

/// Advance `grid` by one generation using the rule for `mode`.
pub fn step(grid: &mut CellGrid, mode: ColorMode, ruleset: Ruleset, palette: &Palette) {
    match mode {
        ColorMode::Lifetime => step_lifetime(grid, ruleset, palette),
        ColorMode::Colony => step_colony(grid, ruleset),
        ColorMode::NeighborPattern => step_neighbor_pattern(grid, ruleset, palette),
    }
}

/// Life rule, colored by age along the palette ramp.
pub fn step_lifetime(grid: &mut CellGrid, ruleset: Ruleset, palette: &Palette) {
    let cap = palette.max_color().saturating_sub(1).min(u16::MAX as usize) as u16;

    grid.sweep(|cell, hood| {
        let count = hood.count();
        if !cell.alive {
            cell.lifetime = 0;
            if count_birth(count, ruleset) {
                cell.next_alive = true;
                cell.color = palette.get(0);
            }
        } else if survives(count) {
            cell.lifetime = cell.lifetime.saturating_add(1).min(cap);
            cell.color = palette.lifetime_color(cell.lifetime);
        } else {
            cell.next_alive = false;
            cell.lifetime = 0;
        }
    });
    grid.commit();
}

/// Life rule, colored by the literal neighbor mask.
///
/// Commits the previous generation first, so the mask a cell sees on this
/// call reflects the decisions made on the last one.
pub fn step_neighbor_pattern(grid: &mut CellGrid, ruleset: Ruleset, palette: &Palette) {
    grid.commit();
    grid.sweep(|cell, hood| {
        let color = palette.get(hood.mask as usize);
        if !cell.alive {
            if pattern_birth(hood, ruleset) {
                cell.next_alive = true;
                cell.color = color;
            }
        } else {
            if !survives(hood.count()) {
                cell.next_alive = false;
            }
            cell.color = color;
        }
    });
}

/// Life rule where newborns inherit a neighbor's color.
pub fn step_colony(grid: &mut CellGrid, ruleset: Ruleset) {
    grid.sweep(|cell, hood| {
        let count = hood.count();
        if !cell.alive {
            if count_birth(count, ruleset) {
                cell.color = inherited_color(cell, hood);
                cell.next_alive = true;
            }
        } else if !survives(count) {
            cell.next_alive = false;
        }
    });
    grid.commit();
}

/// First live neighbor's color if it matches the third, else the second's.
fn inherited_color(cell: &Cell, hood: &Neighborhood) -> Rgba {
    match hood.live_colors() {
        [first, _, third, ..] if first == third => *first,
        [_, second, ..] => *second,
        _ => cell.color,
    }
}
