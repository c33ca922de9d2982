#![warn(missing_docs)]

//! Tile-based side-scrolling platformer for Macroquad.
//!
//! The world is a sparse [`Tilemap`] loaded from JSON level files. A
//! [`Game`] owns the map, the player, goblins and every short-lived effect,
//! and runs one frame at a time against a [`RenderTarget`], an
//! [`AudioSink`] and a batch of [`InputEvent`]s, so the whole loop can be
//! driven headless.

pub mod animation;
pub mod assets;
pub mod audio;
pub mod config;
pub mod effects;
pub mod entity;
mod error;
pub mod game;
pub mod input;
mod ir_map;
pub mod logging;
mod loader {
    pub mod json_loader;
}
pub mod map;
pub mod render;
pub mod spatial;
pub mod tile;

pub use animation::{Animation, AnimationTemplate};
pub use assets::{AnimKey, Assets, ImageId, ImageKey};
pub use audio::{AudioSink, Cue, CueRecorder, Silence};
pub use config::Config;
pub use entity::{Action, Collisions, Enemy, EnemyId, EntityKind, PhysicsEntity, Player};
pub use error::{AnimationError, ConfigError, LevelError};
pub use game::{FrameOutcome, Game, LevelSet, Transition};
pub use input::{InputEvent, Key, Movement};
pub use ir_map::IrLevel;
pub use map::Tilemap;
pub use render::{DrawCall, DrawParams, HeadlessTarget, RenderTarget};
pub use spatial::GridPos;
pub use tile::{ExtractedTile, GridTile, OffgridTile, TileKind};
