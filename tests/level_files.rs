// tests/level_files.rs

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use goblin_grove::{Assets, Config, Game, GridPos, LevelError, TileKind, Tilemap};
use macroquad::prelude::*;

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("goblin_grove_{tag}_{nanos}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn save_then_load_reproduces_grid_and_offgrid() {
    let dir = temp_dir("roundtrip");
    let path = dir.join("0.json");

    let mut map = Tilemap::new(16);
    map.set_tile(GridPos::new(0, 0), TileKind::Grass, 1);
    map.set_tile(GridPos::new(-3, 7), TileKind::Stone, 8);
    map.set_tile(GridPos::new(4, 2), TileKind::Spawners, 1);
    map.push_offgrid(TileKind::Decor, 2, vec2(10.5, 3.25));
    map.push_offgrid(TileKind::LargeDecor, 0, vec2(-40.0, 96.0));
    map.save(&path).unwrap();

    let mut loaded = Tilemap::new(8);
    loaded.set_tile(GridPos::new(99, 99), TileKind::Stone, 0);
    loaded.load(&path).unwrap();

    assert_eq!(loaded.tile_size(), 16);
    assert_eq!(loaded.to_ir(), map.to_ir());
    assert!(loaded.tile_at(GridPos::new(99, 99)).is_none());
    assert_eq!(loaded.offgrid()[1].pos, vec2(-40.0, 96.0));
}

#[test]
fn hand_written_level_file_loads() {
    let dir = temp_dir("handwritten");
    let path = dir.join("1.json");
    fs::write(
        &path,
        r#"{
            "tile_size": 16,
            "tilemap": {
                "0;0": {"type": "grass", "variant": 1, "pos": [0, 0]},
                "1;0": {"type": "decor", "variant": 0, "pos": [1, 0]}
            },
            "offgrid": [ {"type": "large_decor", "variant": 2, "pos": [12.0, 4.5]} ]
        }"#,
    )
    .unwrap();

    let map = Tilemap::from_file(&path).unwrap();
    assert_eq!(map.tile_count(), 2);
    assert!(map.solid_check(vec2(8.0, 8.0)).is_some());
    assert!(map.solid_check(vec2(24.0, 8.0)).is_none());
    assert_eq!(map.offgrid().len(), 1);
}

#[test]
fn failed_load_leaves_map_untouched() {
    let dir = temp_dir("failed");
    let bad = dir.join("0.json");
    fs::write(&bad, r#"{"tile_size": 16, "tilemap": {"a;b": {"type": "grass", "variant": 0, "pos": [0, 0]}}}"#)
        .unwrap();

    let mut map = Tilemap::new(16);
    map.set_tile(GridPos::new(1, 1), TileKind::Stone, 0);

    let err = map.load(&bad).unwrap_err();
    assert!(matches!(err, LevelError::InvalidKey { ref key } if key == "a;b"));
    assert_eq!(map.tile_count(), 1);

    let err = map.load(&dir.join("missing.json")).unwrap_err();
    assert!(err.is_not_found());

    let err = map.load(&dir.join("level.tmx")).unwrap_err();
    assert!(matches!(err, LevelError::UnsupportedFormat(_)));
}

#[test]
fn extract_with_and_without_keep() {
    let mut map = Tilemap::new(16);
    map.set_tile(GridPos::new(2, 3), TileKind::Spawners, 0);
    map.set_tile(GridPos::new(5, 3), TileKind::Spawners, 1);
    map.set_tile(GridPos::new(6, 3), TileKind::Spawners, 2);
    map.push_offgrid(TileKind::Spawners, 1, vec2(1.5, 2.5));
    let matchers = [(TileKind::Spawners, 0), (TileKind::Spawners, 1)];

    let kept = map.extract(&matchers, true);
    assert_eq!(kept.len(), 3);
    assert_eq!(map.tile_count(), 3);
    assert_eq!(map.offgrid().len(), 1);

    let taken = map.extract(&matchers, false);
    assert_eq!(taken, kept);
    let positions: Vec<Vec2> = taken.iter().map(|t| t.pos).collect();
    assert_eq!(positions, vec![vec2(1.5, 2.5), vec2(32.0, 48.0), vec2(80.0, 48.0)]);
    assert_eq!(map.tile_count(), 1);
    assert!(map.offgrid().is_empty());
}

#[test]
fn zero_tile_size_is_rejected_at_load() {
    let dir = temp_dir("zero_tile");
    let path = dir.join("0.json");
    fs::write(
        &path,
        r#"{"tile_size": 0, "tilemap": {"0;0": {"type": "grass", "variant": 0, "pos": [0, 0]}}}"#,
    )
    .unwrap();

    let mut map = Tilemap::new(16);
    let err = map.load(&path).unwrap_err();
    assert!(matches!(err, LevelError::InvalidTileSize { tile_size: 0 }));
    assert_eq!(map.tile_size(), 16);

    let config = Config {
        maps_dir: dir,
        ..Config::default()
    };
    assert!(matches!(
        Game::new(Assets::placeholder(), &config),
        Err(LevelError::InvalidTileSize { .. })
    ));
}
