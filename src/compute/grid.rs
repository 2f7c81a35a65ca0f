//! Padded cell buffer.
//!
//! The `width x height` live region sits inside a buffer of
//! `width * (height + 2) + 2` cells, starting at offset `width + 1`. The
//! padding row above and below (plus one cell at each end) is never written,
//! so every vertical and diagonal neighbor offset of a live cell is a valid
//! index without bounds checks.

use std::collections::TryReserveError;

use super::Rgba;

/// One automaton cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub color: Rgba,
    /// Consecutive cycles alive, saturating at the palette ramp length.
    pub lifetime: u16,
    /// Committed state.
    pub alive: bool,
    /// State being computed for the next commit.
    pub next_alive: bool,
}

impl Cell {
    /// Live cell with both buffers set and a fresh lifetime.
    pub fn born(color: Rgba) -> Self {
        Self {
            color,
            lifetime: 0,
            alive: true,
            next_alive: true,
        }
    }
}

/// Live neighbors of a single cell, gathered in compass order
/// (NW, N, NE, W, E, SW, S, SE).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighborhood {
    /// One bit per live compass slot.
    pub mask: u8,
    /// Colors of the live neighbors; only the first `count()` are meaningful.
    pub colors: [Rgba; 8],
}

impl Neighborhood {
    /// Number of live neighbors.
    #[inline]
    pub fn count(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Live neighbor colors in compass order.
    #[inline]
    pub fn live_colors(&self) -> &[Rgba] {
        &self.colors[..self.count() as usize]
    }
}

/// Slots that look west (NW, W, SW).
const WEST_SLOTS: u8 = 0b0010_1001;
/// Slots that look east (NE, E, SE).
const EAST_SLOTS: u8 = 0b1001_0100;

/// Owned padded cell buffer.
#[derive(Debug, Clone)]
pub struct CellGrid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl CellGrid {
    /// Buffer length needed for a `width x height` live region.
    #[inline]
    pub fn buffer_len(width: usize, height: usize) -> usize {
        width * (height + 2) + 2
    }

    /// Allocate a zeroed grid. Dimensions are clamped to at least 1.
    pub fn new(width: usize, height: usize) -> Result<Self, TryReserveError> {
        let width = width.max(1);
        let height = height.max(1);
        let len = Self::buffer_len(width, height);

        let mut cells = Vec::new();
        cells.try_reserve_exact(len)?;
        cells.resize(len, Cell::default());

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of live-region cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offset of the first live cell in the padded buffer.
    #[inline]
    pub fn live_offset(&self) -> usize {
        self.width + 1
    }

    /// Signed buffer offsets of the 8 neighbors, in compass order.
    #[inline]
    pub fn neighbor_offsets(&self) -> [isize; 8] {
        let w = self.width as isize;
        [-w - 1, -w, -w + 1, -1, 1, w - 1, w, w + 1]
    }

    /// Padded buffer index of live cell `index`.
    #[inline]
    pub fn buffer_index(&self, index: usize) -> usize {
        self.live_offset() + index
    }

    /// Live region as a slice, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        let start = self.live_offset();
        &self.cells[start..start + self.len()]
    }

    /// Mutable live region, row-major.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        let start = self.live_offset();
        let len = self.len();
        &mut self.cells[start..start + len]
    }

    /// Whole padded buffer, padding included.
    pub fn buffer(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of the padding border.
    pub fn padding(&self) -> impl Iterator<Item = &Cell> {
        let start = self.live_offset();
        let end = start + self.len();
        self.cells[..start].iter().chain(self.cells[end..].iter())
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &Cell {
        &self.cells()[y * self.width + x]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let w = self.width;
        &mut self.cells_mut()[y * w + x]
    }

    /// Reset every live cell to its zeroed state.
    pub fn clear(&mut self) {
        self.cells_mut().fill(Cell::default());
    }

    /// Gather the live neighbors of the cell at `(x, y)` from committed state.
    ///
    /// Column 0 and column `width - 1` see dead space to the west and east.
    pub fn neighborhood(&self, x: usize, y: usize) -> Neighborhood {
        let center = self.buffer_index(y * self.width + x);
        let offsets = self.neighbor_offsets();

        let mut slots = 0xFFu8;
        if x == 0 {
            slots &= !WEST_SLOTS;
        }
        if x + 1 == self.width {
            slots &= !EAST_SLOTS;
        }

        let mut hood = Neighborhood::default();
        let mut found = 0;
        for (slot, &offset) in offsets.iter().enumerate() {
            if slots & (1 << slot) == 0 {
                continue;
            }
            let neighbor = &self.cells[center.wrapping_add_signed(offset)];
            if neighbor.alive {
                hood.mask |= 1 << slot;
                hood.colors[found] = neighbor.color;
                found += 1;
            }
        }
        hood
    }

    /// Visit every live cell in row-major order with its neighborhood.
    ///
    /// Neighborhoods read the committed `alive` flag, which `apply` must not
    /// change; writes go to `next_alive`, `color` and `lifetime`.
    pub fn sweep<F>(&mut self, mut apply: F)
    where
        F: FnMut(&mut Cell, &Neighborhood),
    {
        for y in 0..self.height {
            for x in 0..self.width {
                let hood = self.neighborhood(x, y);
                let index = self.buffer_index(y * self.width + x);
                apply(&mut self.cells[index], &hood);
            }
        }
    }

    /// Commit `next_alive` into `alive` for every live cell.
    pub fn commit(&mut self) {
        for cell in self.cells_mut() {
            cell.alive = cell.next_alive;
        }
    }

    /// Number of cells currently alive.
    pub fn live_count(&self) -> usize {
        self.cells().iter().filter(|c| c.alive).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_layout() {
        let grid = CellGrid::new(10, 6).unwrap();
        assert_eq!(grid.buffer().len(), 10 * 8 + 2);
        assert_eq!(grid.live_offset(), 11);
        assert_eq!(grid.cells().len(), 60);
        assert_eq!(grid.padding().count(), 22);
    }

    #[test]
    fn test_zero_dimensions_clamp() {
        let grid = CellGrid::new(0, 0).unwrap();
        assert_eq!((grid.width(), grid.height()), (1, 1));
        assert_eq!(grid.buffer().len(), 5);
    }

    #[test]
    fn test_neighborhood_mask_and_colors() {
        let mut grid = CellGrid::new(5, 5).unwrap();
        let red = Rgba::rgb(255, 0, 0);
        let green = Rgba::rgb(0, 255, 0);
        *grid.get_mut(1, 1) = Cell::born(red); // NW of (2, 2)
        *grid.get_mut(3, 3) = Cell::born(green); // SE of (2, 2)

        let hood = grid.neighborhood(2, 2);
        assert_eq!(hood.mask, 0b1000_0001);
        assert_eq!(hood.count(), 2);
        assert_eq!(hood.live_colors(), &[red, green]);
    }

    #[test]
    fn test_edges_are_dead_boundary() {
        let mut grid = CellGrid::new(4, 3).unwrap();
        // Last column of row 0 would alias as the west neighbor of (0, 1).
        *grid.get_mut(3, 0) = Cell::born(Rgba::rgb(1, 1, 1));
        *grid.get_mut(3, 1) = Cell::born(Rgba::rgb(1, 1, 1));

        assert_eq!(grid.neighborhood(0, 1).mask, 0);
        assert_eq!(grid.neighborhood(0, 2).mask, 0);
        // Same row, to the west: E of (2, 1) is live.
        assert_eq!(grid.neighborhood(2, 1).mask & (1 << 4), 1 << 4);
    }

    #[test]
    fn test_commit_copies_next_state() {
        let mut grid = CellGrid::new(3, 3).unwrap();
        grid.get_mut(1, 1).next_alive = true;
        assert_eq!(grid.live_count(), 0);
        grid.commit();
        assert_eq!(grid.live_count(), 1);
    }

    proptest! {
        #[test]
        fn prop_neighbor_offsets_in_bounds(width in 1usize..40, height in 1usize..40) {
            let grid = CellGrid::new(width, height).unwrap();
            let len = grid.buffer().len() as isize;
            for index in 0..grid.len() {
                let center = grid.buffer_index(index) as isize;
                for offset in grid.neighbor_offsets() {
                    let n = center + offset;
                    prop_assert!(n >= 0 && n < len, "index {} offset {}", index, offset);
                }
            }
        }

        #[test]
        fn prop_sweep_never_touches_padding(width in 1usize..20, height in 1usize..20) {
            let mut grid = CellGrid::new(width, height).unwrap();
            for cell in grid.cells_mut() {
                *cell = Cell::born(Rgba::rgb(9, 9, 9));
            }
            grid.sweep(|cell, hood| cell.next_alive = hood.count() >= 2);
            grid.commit();
            prop_assert!(grid.padding().all(|c| *c == Cell::default()));
        }
    }
}
