use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for reading and writing level files
#[derive(Debug, Error)]
pub enum LevelError {
    /// File I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
    /// JSON parse or encode error
    #[error("JSON error in {path}: {source}")]
    Json {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
    /// A `tilemap` key that is not of the form `x;y`
    #[error("invalid tile key '{key}': expected '<x>;<y>'")]
    InvalidKey {
        /// The offending key
        key: String,
    },
    /// A grid tile whose stored position disagrees with its key
    #[error("tile key '{key}' does not match its position {pos:?}")]
    KeyMismatch {
        /// The key the tile was stored under
        key: String,
        /// The position recorded inside the tile
        pos: [i32; 2],
    },
    /// A tile size the grid cannot be built on
    #[error("invalid tile size {tile_size}")]
    InvalidTileSize {
        /// The size found in the file
        tile_size: u32,
    },
    /// A grid tile whose pixel position does not fit the coordinate range
    #[error("tile '{key}' lies outside the addressable world")]
    OutOfRange {
        /// The key of the tile
        key: String,
    },
    /// Unsupported file format (non-JSON)
    #[error("unsupported level format: {0}")]
    UnsupportedFormat(String),
}

impl LevelError {
    /// True when the level file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LevelError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Error type for the settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file exists but could not be read
    #[error("cannot read settings {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
    /// Settings file is not valid JSON for [`Config`](crate::Config)
    #[error("invalid settings in {path}: {source}")]
    Json {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// An animation that could never be played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// No frames were found
    #[error("animation has no frames")]
    NoFrames,
    /// Each frame must be shown for at least one tick
    #[error("animation frame duration must be at least 1")]
    ZeroDuration,
}
