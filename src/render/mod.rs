//! Drawing surface abstraction.
//!
//! Game code composites each frame onto a [`RenderTarget`]. The window-backed
//! implementation lives in [`screen`]; [`HeadlessTarget`] records draw calls
//! so simulations and tests run without a GPU.

pub mod cull;
mod headless;
pub mod screen;

pub use headless::{DrawCall, HeadlessTarget};

use crate::assets::ImageId;
use macroquad::prelude::*;

/// How an image is blitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    /// Mirror horizontally.
    pub flip_x: bool,
    /// Scale the image to this size; `None` draws at native size.
    pub dest_size: Option<Vec2>,
    /// Rotation in radians around the image centre, clockwise.
    pub rotation: f32,
}

impl Default for DrawParams {
    fn default() -> Self {
        DrawParams {
            flip_x: false,
            dest_size: None,
            rotation: 0.0,
        }
    }
}

impl DrawParams {
    /// Native size, optionally mirrored.
    pub fn flipped(flip_x: bool) -> Self {
        DrawParams {
            flip_x,
            ..Default::default()
        }
    }
}

/// A fixed-size pixel buffer the game composites onto.
pub trait RenderTarget {
    /// Buffer size in pixels.
    fn size(&self) -> Vec2;

    /// Native size of an image.
    fn image_size(&self, image: ImageId) -> Vec2;

    /// Blit an image with its top-left corner at `pos`.
    fn draw_image(&mut self, image: ImageId, pos: Vec2, params: DrawParams);

    /// Fill a convex polygon.
    fn draw_polygon(&mut self, points: &[Vec2], color: Color);

    /// Fill everything outside the circle.
    fn draw_circle_mask(&mut self, center: Vec2, radius: f32, color: Color);
}
