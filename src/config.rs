//! Runtime settings read from an optional JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use macroquad::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for one run. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Title bar text.
    pub window_title: String,
    /// Initial window width in pixels.
    pub window_width: i32,
    /// Initial window height in pixels.
    pub window_height: i32,
    /// Size of the frame buffer the game composites onto.
    pub display_width: u32,
    /// Height of the frame buffer.
    pub display_height: u32,
    /// Root of images and sounds.
    pub data_dir: PathBuf,
    /// Directory holding `0.json`, `1.json`, ...
    pub maps_dir: PathBuf,
    /// Frame rate the loop paces itself to.
    pub target_fps: u32,
    /// Clouds scattered across the sky.
    pub cloud_count: usize,
    /// Soundtrack volume in `0.0..=1.0`.
    pub music_volume: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window_title: "Goblin Grove".into(),
            window_width: 640,
            window_height: 480,
            display_width: 320,
            display_height: 240,
            data_dir: PathBuf::from("data"),
            maps_dir: PathBuf::from("data/maps"),
            target_fps: 60,
            cloud_count: 16,
            music_volume: 0.4,
        }
    }
}

impl Config {
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let txt = match fs::read_to_string(path) {
            Ok(txt) => txt,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&txt).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Frame buffer size as a vector.
    pub fn display_size(&self) -> Vec2 {
        vec2(self.display_width as f32, self.display_height as f32)
    }

    /// `data_dir/images`.
    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }

    /// Window settings for macroquad.
    pub fn window_conf(&self) -> Conf {
        Conf {
            window_title: self.window_title.clone(),
            window_width: self.window_width,
            window_height: self.window_height,
            ..Default::default()
        }
    }
}
