//! Tile records stored in a [`Tilemap`](crate::Tilemap).

use macroquad::prelude::*;
use serde::{Deserialize, Serialize};

use crate::spatial::GridPos;

/// Tile categories a level may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    /// Small non-solid decoration.
    Decor,
    /// Solid, autotiled.
    Grass,
    /// Trees and rocks; variant 2 sheds leaves.
    LargeDecor,
    /// Solid, autotiled.
    Stone,
    /// Markers consumed at level load: variant 0 is the player start, 1 an enemy.
    Spawners,
}

impl TileKind {
    /// Every kind.
    pub const ALL: [TileKind; 5] = [
        TileKind::Decor,
        TileKind::Grass,
        TileKind::LargeDecor,
        TileKind::Stone,
        TileKind::Spawners,
    ];

    /// Solid for collision.
    #[inline]
    pub fn is_physics(self) -> bool {
        matches!(self, TileKind::Grass | TileKind::Stone)
    }

    /// Picks its variant from its neighbours.
    #[inline]
    pub fn autotiles(self) -> bool {
        matches!(self, TileKind::Grass | TileKind::Stone)
    }

    /// Directory name under `images/tiles`.
    pub fn name(self) -> &'static str {
        match self {
            TileKind::Decor => "decor",
            TileKind::Grass => "grass",
            TileKind::LargeDecor => "large_decor",
            TileKind::Stone => "stone",
            TileKind::Spawners => "spawners",
        }
    }
}

/// A tile snapped to the lattice. Its position is the map key, so the two
/// cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridTile {
    /// Category.
    pub kind: TileKind,
    /// Image index within the category.
    pub variant: u32,
    /// Cell.
    pub pos: GridPos,
}

/// A freely placed decorative tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffgridTile {
    /// Category.
    pub kind: TileKind,
    /// Image index within the category.
    pub variant: u32,
    /// Top-left corner in pixels.
    pub pos: Vec2,
}

/// Result of [`crate::Tilemap::extract`], with the position resolved to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedTile {
    /// Category.
    pub kind: TileKind,
    /// Image index within the category.
    pub variant: u32,
    /// Top-left corner in pixels.
    pub pos: Vec2,
}
