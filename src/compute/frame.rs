//! Per-frame output: the rectangles a renderer draws for live cells.

use serde::{Deserialize, Serialize};

use super::{Cell, GridGeometry, Rgba};

/// One filled rectangle in display pixels.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable,
)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub color: Rgba,
}

/// Lazy iterator over the live cells of one frame, row-major.
#[derive(Debug, Clone)]
pub struct VisibleCells<'a> {
    cells: &'a [Cell],
    geometry: GridGeometry,
    index: usize,
}

impl<'a> VisibleCells<'a> {
    pub(crate) fn new(cells: &'a [Cell], geometry: GridGeometry) -> Self {
        Self {
            cells,
            geometry,
            index: 0,
        }
    }

    fn rect(&self, index: usize, color: Rgba) -> CellRect {
        let g = &self.geometry;
        let x = (index % g.width) as u32 * g.cell_size_x;
        let y = (index / g.width) as u32 * g.cell_size_y;
        CellRect {
            x,
            y,
            w: g.cell_size_x.saturating_sub(g.spacing),
            h: g.cell_size_y.saturating_sub(g.spacing),
            color,
        }
    }
}

impl Iterator for VisibleCells<'_> {
    type Item = CellRect;

    fn next(&mut self) -> Option<CellRect> {
        while self.index < self.cells.len() {
            let index = self.index;
            self.index += 1;
            let cell = &self.cells[index];
            if cell.alive {
                return Some(self.rect(index, cell.color));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.cells.len() - self.index))
    }
}

/// View a rectangle list as raw bytes for an instance-buffer upload.
pub fn instance_bytes(rects: &[CellRect]) -> &[u8] {
    bytemuck::cast_slice(rects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(spacing: u32) -> GridGeometry {
        GridGeometry {
            width: 3,
            height: 2,
            cell_size_x: 10,
            cell_size_y: 20,
            spacing,
        }
    }

    #[test]
    fn test_only_live_cells_are_yielded() {
        let red = Rgba::rgb(255, 0, 0);
        let mut cells = vec![Cell::default(); 6];
        cells[1] = Cell::born(red);
        cells[5] = Cell::born(red);

        let rects: Vec<CellRect> = VisibleCells::new(&cells, geometry(1)).collect();
        assert_eq!(rects, vec![
            CellRect {
                x: 10,
                y: 0,
                w: 9,
                h: 19,
                color: red
            },
            CellRect {
                x: 20,
                y: 20,
                w: 9,
                h: 19,
                color: red
            },
        ]);
    }

    #[test]
    fn test_no_spacing_tiles_solid() {
        let cells = vec![Cell::born(Rgba::rgb(1, 2, 3)); 6];
        let rects: Vec<CellRect> = VisibleCells::new(&cells, geometry(0)).collect();
        assert_eq!(rects.len(), 6);
        assert!(rects.iter().all(|r| r.w == 10 && r.h == 20));
    }

    #[test]
    fn test_instance_bytes_layout() {
        let rect = CellRect {
            x: 1,
            y: 2,
            w: 3,
            h: 4,
            color: Rgba::new(5, 6, 7, 8),
        };
        let bytes = instance_bytes(std::slice::from_ref(&rect));
        assert_eq!(bytes.len(), 20);
        assert_eq!(&bytes[16..], &[5, 6, 7, 8]);
    }
}
