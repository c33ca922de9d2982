use macroquad::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Cell coordinate on the tile lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridPos {
    /// Cell at column `x`, row `y`.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        GridPos { x, y }
    }

    /// Neighbouring cell.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        GridPos::new(self.x + dx, self.y + dy)
    }

    /// Top-left corner of the cell in pixels.
    #[inline]
    pub fn to_world(self, tile_size: u32) -> Vec2 {
        vec2(
            (self.x * tile_size as i32) as f32,
            (self.y * tile_size as i32) as f32,
        )
    }

    /// The cell's area in pixels.
    #[inline]
    pub fn cell_rect(self, tile_size: u32) -> Rect {
        let p = self.to_world(tile_size);
        Rect::new(p.x, p.y, tile_size as f32, tile_size as f32)
    }
}

/// Persisted key form, `"x;y"`.
impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.x, self.y)
    }
}

/// A key that is not `x;y` with integer parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGridPosError;

impl FromStr for GridPos {
    type Err = ParseGridPosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(';').ok_or(ParseGridPosError)?;
        let x = x.trim().parse().map_err(|_| ParseGridPosError)?;
        let y = y.trim().parse().map_err(|_| ParseGridPosError)?;
        Ok(GridPos { x, y })
    }
}

/// Cell containing a pixel position. Floors, so negative coordinates land in
/// the cell to their left/top.
#[inline]
pub fn world_to_cell(p: Vec2, tile_size: u32) -> GridPos {
    let ts = tile_size as f32;
    GridPos {
        x: (p.x / ts).floor() as i32,
        y: (p.y / ts).floor() as i32,
    }
}

/// Offsets of a square neighbourhood of the given radius, centre included.
pub fn neighborhood(radius: i32) -> Vec<(i32, i32)> {
    let mut offsets = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            offsets.push((dx, dy));
        }
    }
    offsets
}

/// Overlap test where shared edges do not count as a collision.
#[inline]
pub fn rects_collide(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Half-open point test: the left and top edges are inside, right and bottom are not.
#[inline]
pub fn rect_contains(r: &Rect, p: Vec2) -> bool {
    p.x >= r.x && p.x < r.x + r.w && p.y >= r.y && p.y < r.y + r.h
}
