//! Level files on disk and the markers pulled out of them at load time.

use std::fs;
use std::path::{Path, PathBuf};

use macroquad::prelude::*;

use crate::map::Tilemap;
use crate::tile::TileKind;

/// Large decoration that sheds leaves.
pub const LEAF_TREE: (TileKind, u32) = (TileKind::LargeDecor, 2);
/// Marker for the player start.
pub const PLAYER_SPAWN: (TileKind, u32) = (TileKind::Spawners, 0);
/// Marker for a goblin.
pub const ENEMY_SPAWN: (TileKind, u32) = (TileKind::Spawners, 1);

/// Canopy area of a leaf tree, relative to the tile position.
const CANOPY: Rect = Rect {
    x: 4.0,
    y: 4.0,
    w: 23.0,
    h: 13.0,
};

/// Directory of numbered level files, `0.json`, `1.json`, ...
#[derive(Debug, Clone)]
pub struct LevelSet {
    dir: PathBuf,
}

impl LevelSet {
    /// Levels stored in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LevelSet { dir: dir.into() }
    }

    /// Directory the levels live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of directory entries; 0 when the directory cannot be read.
    pub fn count(&self) -> usize {
        fs::read_dir(&self.dir).map(|d| d.count()).unwrap_or(0)
    }

    /// File of level `index`.
    pub fn path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{index}.json"))
    }

    /// Index after `current`, clamped to the last level. `None` when the set
    /// is empty.
    pub fn next_index(&self, current: usize) -> Option<usize> {
        let count = self.count();
        (count > 0).then(|| (current + 1).min(count - 1))
    }
}

/// Spawn information removed from a freshly loaded map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spawns {
    /// Last player marker, if any.
    pub player: Option<Vec2>,
    /// Goblin positions, in marker order.
    pub enemies: Vec<Vec2>,
    /// Canopy rectangles that shed leaves.
    pub leaf_zones: Vec<Rect>,
}

/// Pull spawner markers out of the map. Leaf trees stay in place so they are
/// still drawn.
pub fn take_spawns(tilemap: &mut Tilemap) -> Spawns {
    let leaf_zones = tilemap
        .extract(&[LEAF_TREE], true)
        .into_iter()
        .map(|t| Rect::new(t.pos.x + CANOPY.x, t.pos.y + CANOPY.y, CANOPY.w, CANOPY.h))
        .collect();

    let mut spawns = Spawns {
        leaf_zones,
        ..Default::default()
    };
    for marker in tilemap.extract(&[PLAYER_SPAWN, ENEMY_SPAWN], false) {
        if (marker.kind, marker.variant) == PLAYER_SPAWN {
            spawns.player = Some(marker.pos);
        } else {
            spawns.enemies.push(marker.pos);
        }
    }
    spawns
}
