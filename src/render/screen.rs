//! Window-backed render target.

use macroquad::prelude::*;

use super::{DrawParams, RenderTarget};
use crate::assets::{ImageId, TextureAtlas};

const MASK_SEGMENTS: usize = 48;

/// Draws through macroquad onto whatever camera is currently active, usually
/// the low-resolution frame buffer set up by the presenter.
pub struct ScreenTarget<'a> {
    atlas: &'a TextureAtlas,
    size: Vec2,
}

impl<'a> ScreenTarget<'a> {
    /// Draw `atlas` textures onto a buffer of `size` pixels.
    pub fn new(atlas: &'a TextureAtlas, size: Vec2) -> Self {
        ScreenTarget { atlas, size }
    }
}

impl RenderTarget for ScreenTarget<'_> {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn image_size(&self, image: ImageId) -> Vec2 {
        self.atlas
            .get(image)
            .map(|t| t.size())
            .unwrap_or(Vec2::ZERO)
    }

    fn draw_image(&mut self, image: ImageId, pos: Vec2, params: DrawParams) {
        let Some(tex) = self.atlas.get(image) else {
            return;
        };
        draw_texture_ex(
            tex,
            pos.x,
            pos.y,
            WHITE,
            DrawTextureParams {
                dest_size: params.dest_size,
                flip_x: params.flip_x,
                rotation: params.rotation,
                ..Default::default()
            },
        );
    }

    fn draw_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let first = points[0];
        for pair in points[1..].windows(2) {
            draw_triangle(first, pair[0], pair[1], color);
        }
    }

    fn draw_circle_mask(&mut self, center: Vec2, radius: f32, color: Color) {
        let outer = self.size.length() + center.length();
        let inner = radius.max(0.0);
        let step = std::f32::consts::TAU / MASK_SEGMENTS as f32;
        for i in 0..MASK_SEGMENTS {
            let a0 = step * i as f32;
            let a1 = step * (i + 1) as f32;
            let d0 = vec2(a0.cos(), a0.sin());
            let d1 = vec2(a1.cos(), a1.sin());
            let (i0, i1) = (center + d0 * inner, center + d1 * inner);
            let (o0, o1) = (center + d0 * outer, center + d1 * outer);
            draw_triangle(i0, o0, o1, color);
            draw_triangle(i0, o1, i1, color);
        }
    }
}
