use crate::tile::{GridTile, OffgridTile};

/// Canonical, format-agnostic level contents.
#[derive(Debug, Clone, PartialEq)]
pub struct IrLevel {
    /// Edge length of a grid cell in pixels.
    pub tile_size: u32,
    /// Grid-aligned tiles, at most one per cell.
    pub tiles: Vec<GridTile>,
    /// Free-placed tiles in paint order.
    pub offgrid: Vec<OffgridTile>,
}
