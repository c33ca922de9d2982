// src/loader/json_loader.rs
use crate::error::LevelError;
use crate::ir_map::IrLevel;
use crate::spatial::GridPos;
use crate::tile::{GridTile, OffgridTile, TileKind};
use macroquad::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct JsonGridTile {
    #[serde(rename = "type")]
    kind: TileKind,
    variant: u32,
    pos: [i32; 2],
}

#[derive(Serialize, Deserialize)]
struct JsonOffgridTile {
    #[serde(rename = "type")]
    kind: TileKind,
    variant: u32,
    pos: [f32; 2],
}

#[derive(Serialize, Deserialize)]
struct JsonLevel {
    tile_size: u32,
    #[serde(default)]
    tilemap: BTreeMap<String, JsonGridTile>,
    #[serde(default)]
    offgrid: Vec<JsonOffgridTile>,
}

fn check_extension(p: &Path) -> Result<(), LevelError> {
    if p.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(LevelError::UnsupportedFormat(p.display().to_string()));
    }
    Ok(())
}

fn json_to_ir(j: JsonLevel) -> Result<IrLevel, LevelError> {
    let ts = match i32::try_from(j.tile_size) {
        Ok(ts) if ts > 0 => ts,
        _ => return Err(LevelError::InvalidTileSize { tile_size: j.tile_size }),
    };

    let mut tiles = Vec::with_capacity(j.tilemap.len());
    for (key, t) in j.tilemap {
        let pos: GridPos = key
            .parse()
            .map_err(|_| LevelError::InvalidKey { key: key.clone() })?;
        if [pos.x, pos.y] != t.pos {
            return Err(LevelError::KeyMismatch { key, pos: t.pos });
        }
        if pos.x.checked_mul(ts).is_none() || pos.y.checked_mul(ts).is_none() {
            return Err(LevelError::OutOfRange { key });
        }
        tiles.push(GridTile {
            kind: t.kind,
            variant: t.variant,
            pos,
        });
    }

    let offgrid = j
        .offgrid
        .into_iter()
        .map(|t| OffgridTile {
            kind: t.kind,
            variant: t.variant,
            pos: vec2(t.pos[0], t.pos[1]),
        })
        .collect();

    Ok(IrLevel {
        tile_size: j.tile_size,
        tiles,
        offgrid,
    })
}

fn ir_to_json(ir: &IrLevel) -> JsonLevel {
    JsonLevel {
        tile_size: ir.tile_size,
        tilemap: ir
            .tiles
            .iter()
            .map(|t| {
                (
                    t.pos.to_string(),
                    JsonGridTile {
                        kind: t.kind,
                        variant: t.variant,
                        pos: [t.pos.x, t.pos.y],
                    },
                )
            })
            .collect(),
        offgrid: ir
            .offgrid
            .iter()
            .map(|t| JsonOffgridTile {
                kind: t.kind,
                variant: t.variant,
                pos: [t.pos.x, t.pos.y],
            })
            .collect(),
    }
}

pub fn decode_level_str(txt: &str, path: &Path) -> Result<IrLevel, LevelError> {
    let j: JsonLevel = serde_json::from_str(txt).map_err(|source| LevelError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    json_to_ir(j)
}

pub fn decode_level_file(path: &Path) -> Result<IrLevel, LevelError> {
    check_extension(path)?;
    let txt = fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_level_str(&txt, path)
}

pub fn encode_level_file(ir: &IrLevel, path: &Path) -> Result<(), LevelError> {
    check_extension(path)?;
    let txt = serde_json::to_string(&ir_to_json(ir)).map_err(|source| LevelError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, txt).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })
}
