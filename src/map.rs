//! The level map: a sparse tile grid plus free-placed decoration.

use crate::assets::Assets;
use crate::error::LevelError;
use crate::ir_map::IrLevel;
use crate::loader::json_loader::{decode_level_file, encode_level_file};
use crate::render::cull::visible_cells;
use crate::render::{DrawParams, RenderTarget};
use crate::spatial::{neighborhood, world_to_cell, GridPos};
use crate::tile::{ExtractedTile, GridTile, OffgridTile, TileKind};
use macroquad::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Cell size of an empty map.
pub const DEFAULT_TILE_SIZE: u32 = 16;

const RIGHT: u8 = 1;
const LEFT: u8 = 2;
const DOWN: u8 = 4;
const UP: u8 = 8;

const CARDINALS: [((i32, i32), u8); 4] = [((1, 0), RIGHT), ((-1, 0), LEFT), ((0, 1), DOWN), ((0, -1), UP)];

/// Variant for each set of same-kind cardinal neighbours. Sets not listed
/// here (isolated tiles, straight runs) keep whatever variant was painted.
const AUTOTILE_MAP: [(u8, u32); 9] = [
    (RIGHT | DOWN, 0),
    (LEFT | RIGHT | DOWN, 1),
    (LEFT | DOWN, 2),
    (LEFT | UP | DOWN, 3),
    (LEFT | UP, 4),
    (LEFT | UP | RIGHT, 5),
    (RIGHT | UP, 6),
    (RIGHT | UP | DOWN, 7),
    (RIGHT | LEFT | UP | DOWN, 8),
];

fn autotile_variant(neighbours: u8) -> Option<u32> {
    AUTOTILE_MAP
        .iter()
        .find(|(mask, _)| *mask == neighbours)
        .map(|&(_, variant)| variant)
}

/// Sparse tile grid plus free-placed decoration.
#[derive(Debug, Clone)]
pub struct Tilemap {
    tile_size: u32,
    tiles: HashMap<GridPos, GridTile>,
    offgrid: Vec<OffgridTile>,
    neighbors: Vec<(i32, i32)>,
}

impl Default for Tilemap {
    fn default() -> Self {
        Tilemap::new(DEFAULT_TILE_SIZE)
    }
}

impl Tilemap {
    /// An empty map with `tile_size` pixel cells.
    pub fn new(tile_size: u32) -> Self {
        Tilemap {
            tile_size,
            tiles: HashMap::new(),
            offgrid: Vec::new(),
            neighbors: neighborhood(1),
        }
    }

    /// Widen or narrow the cell neighbourhood used by the `*_around` queries.
    pub fn with_neighborhood(mut self, radius: i32) -> Self {
        self.neighbors = neighborhood(radius.max(0));
        self
    }

    /// Build a map from decoded level contents.
    pub fn from_ir(ir: IrLevel) -> Self {
        let mut map = Tilemap::new(ir.tile_size);
        for t in ir.tiles {
            map.tiles.insert(t.pos, t);
        }
        map.offgrid = ir.offgrid;
        map
    }

    /// Contents in encodable form; grid tiles sorted by position.
    pub fn to_ir(&self) -> IrLevel {
        let mut tiles: Vec<GridTile> = self.tiles.values().copied().collect();
        tiles.sort_unstable_by_key(|t| (t.pos.y, t.pos.x));
        IrLevel {
            tile_size: self.tile_size,
            tiles,
            offgrid: self.offgrid.clone(),
        }
    }

    /// Read a level file into a new map.
    pub fn from_file(path: &Path) -> Result<Self, LevelError> {
        Ok(Self::from_ir(decode_level_file(path)?))
    }

    /// Replace the whole map with the contents of a level file. On error the
    /// current contents are left untouched.
    pub fn load(&mut self, path: &Path) -> Result<(), LevelError> {
        let loaded = Self::from_file(path)?;
        self.tile_size = loaded.tile_size;
        self.tiles = loaded.tiles;
        self.offgrid = loaded.offgrid;
        Ok(())
    }

    /// Write the map as a level file.
    pub fn save(&self, path: &Path) -> Result<(), LevelError> {
        encode_level_file(&self.to_ir(), path)
    }

    /// Cell edge length in pixels.
    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Grid tile in `pos`, if any.
    pub fn tile_at(&self, pos: GridPos) -> Option<&GridTile> {
        self.tiles.get(&pos)
    }

    /// Grid tiles in no particular order.
    pub fn tiles(&self) -> impl Iterator<Item = &GridTile> {
        self.tiles.values()
    }

    /// Number of grid tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Free-placed tiles in paint order.
    pub fn offgrid(&self) -> &[OffgridTile] {
        &self.offgrid
    }

    /// Insert or overwrite the tile in a cell.
    pub fn set_tile(&mut self, pos: GridPos, kind: TileKind, variant: u32) {
        self.tiles.insert(pos, GridTile { kind, variant, pos });
    }

    /// Remove and return the grid tile in `pos`.
    pub fn remove_tile(&mut self, pos: GridPos) -> Option<GridTile> {
        self.tiles.remove(&pos)
    }

    /// Append a free-placed tile; it draws above earlier ones.
    pub fn push_offgrid(&mut self, kind: TileKind, variant: u32, pos: Vec2) {
        self.offgrid.push(OffgridTile { kind, variant, pos });
    }

    /// Collect every tile whose `(kind, variant)` is listed in `matchers`.
    /// Unless `keep` is set, matched tiles are removed from the map.
    pub fn extract(&mut self, matchers: &[(TileKind, u32)], keep: bool) -> Vec<ExtractedTile> {
        let matches = |kind: TileKind, variant: u32| matchers.contains(&(kind, variant));
        let mut out = Vec::new();

        for t in &self.offgrid {
            if matches(t.kind, t.variant) {
                out.push(ExtractedTile {
                    kind: t.kind,
                    variant: t.variant,
                    pos: t.pos,
                });
            }
        }
        if !keep {
            self.offgrid.retain(|t| !matches(t.kind, t.variant));
        }

        let mut hits: Vec<GridPos> = self
            .tiles
            .values()
            .filter(|t| matches(t.kind, t.variant))
            .map(|t| t.pos)
            .collect();
        hits.sort_unstable_by_key(|p| (p.y, p.x));

        for pos in hits {
            let t = if keep {
                self.tiles[&pos]
            } else {
                match self.tiles.remove(&pos) {
                    Some(t) => t,
                    None => continue,
                }
            };
            out.push(ExtractedTile {
                kind: t.kind,
                variant: t.variant,
                pos: t.pos.to_world(self.tile_size),
            });
        }

        out
    }

    /// Grid tiles in the neighbourhood of the cell containing `pos`.
    pub fn tiles_around(&self, pos: Vec2) -> Vec<&GridTile> {
        let cell = world_to_cell(pos, self.tile_size);
        self.neighbors
            .iter()
            .filter_map(|&(dx, dy)| self.tiles.get(&cell.offset(dx, dy)))
            .collect()
    }

    /// Pixel rectangles of the solid tiles around `pos`.
    pub fn physics_rects_around(&self, pos: Vec2) -> Vec<Rect> {
        self.tiles_around(pos)
            .into_iter()
            .filter(|t| t.kind.is_physics())
            .map(|t| t.pos.cell_rect(self.tile_size))
            .collect()
    }

    /// The solid tile covering exactly this point, if any.
    pub fn solid_check(&self, pos: Vec2) -> Option<&GridTile> {
        self.tiles
            .get(&world_to_cell(pos, self.tile_size))
            .filter(|t| t.kind.is_physics())
    }

    /// Pick variants for autotiling kinds from their same-kind cardinal neighbours.
    pub fn autotile(&mut self) {
        let mut updates = Vec::new();
        for t in self.tiles.values() {
            if !t.kind.autotiles() {
                continue;
            }
            let mut mask = 0u8;
            for ((dx, dy), bit) in CARDINALS {
                if let Some(n) = self.tiles.get(&t.pos.offset(dx, dy)) {
                    if n.kind == t.kind {
                        mask |= bit;
                    }
                }
            }
            if let Some(variant) = autotile_variant(mask) {
                updates.push((t.pos, variant));
            }
        }
        for (pos, variant) in updates {
            if let Some(t) = self.tiles.get_mut(&pos) {
                t.variant = variant;
            }
        }
    }

    /// Draw visible grid tiles, then offgrid tiles in paint order.
    pub fn render(&self, target: &mut dyn RenderTarget, assets: &Assets, offset: Vec2) {
        let range = visible_cells(offset, target.size(), self.tile_size);
        for cell in range.cells() {
            if let Some(t) = self.tiles.get(&cell) {
                if let Some(img) = assets.tile_image(t.kind, t.variant) {
                    target.draw_image(img, t.pos.to_world(self.tile_size) - offset, DrawParams::default());
                }
            }
        }

        for t in &self.offgrid {
            if let Some(img) = assets.tile_image(t.kind, t.variant) {
                target.draw_image(img, t.pos - offset, DrawParams::default());
            }
        }
    }
}
