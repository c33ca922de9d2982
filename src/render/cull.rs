//! Visible-cell culling.

use crate::spatial::GridPos;
use macroquad::prelude::*;

const CULL_MARGIN_CELLS: i32 = 1;

/// Inclusive range of cells visible through a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    /// Top-left cell.
    pub min: GridPos,
    /// Bottom-right cell.
    pub max: GridPos,
}

impl CellRange {
    /// True when `p` is inside the range.
    pub fn contains(&self, p: GridPos) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Cells in row-major order, top row first.
    pub fn cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| GridPos::new(x, y)))
    }
}

/// Cells covering `[offset, offset + view_size]`, padded by the cull margin.
pub fn visible_cells(offset: Vec2, view_size: Vec2, tile_size: u32) -> CellRange {
    let ts = tile_size.max(1) as i32;
    let mut cx_min = (offset.x.floor() as i32).div_euclid(ts);
    let mut cy_min = (offset.y.floor() as i32).div_euclid(ts);
    let mut cx_max = ((offset.x + view_size.x).floor() as i32).div_euclid(ts);
    let mut cy_max = ((offset.y + view_size.y).floor() as i32).div_euclid(ts);

    if cx_min > cx_max {
        std::mem::swap(&mut cx_min, &mut cx_max);
    }
    if cy_min > cy_max {
        std::mem::swap(&mut cy_min, &mut cy_max);
    }

    CellRange {
        min: GridPos::new(cx_min - CULL_MARGIN_CELLS, cy_min - CULL_MARGIN_CELLS),
        max: GridPos::new(cx_max + CULL_MARGIN_CELLS, cy_max + CULL_MARGIN_CELLS),
    }
}
