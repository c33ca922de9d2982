use std::collections::HashMap;

use macroquad::prelude::*;

use super::{DrawParams, RenderTarget};
use crate::assets::ImageId;

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// [`RenderTarget::draw_image`]
    Image {
        /// Image blitted
        image: ImageId,
        /// Top-left corner on the target
        pos: Vec2,
        /// Blit options
        params: DrawParams,
    },
    /// [`RenderTarget::draw_polygon`]
    Polygon {
        /// Vertices in target space
        points: Vec<Vec2>,
        /// Fill colour
        color: Color,
    },
    /// [`RenderTarget::draw_circle_mask`]; the colour is always black in
    /// game code and is not recorded.
    CircleMask {
        /// Centre of the clear circle
        center: Vec2,
        /// Radius of the clear circle
        radius: f32,
    },
}

/// Render target that only records what would have been drawn.
#[derive(Debug)]
pub struct HeadlessTarget {
    size: Vec2,
    image_sizes: HashMap<ImageId, Vec2>,
    default_image_size: Vec2,
    /// Everything drawn since the last [`clear`](Self::clear).
    pub calls: Vec<DrawCall>,
}

impl HeadlessTarget {
    /// A target of `size` pixels where every image is 16x16.
    pub fn new(size: Vec2) -> Self {
        HeadlessTarget {
            size,
            image_sizes: HashMap::new(),
            default_image_size: vec2(16.0, 16.0),
            calls: Vec::new(),
        }
    }

    /// Report `size` for `image`.
    pub fn with_image_size(mut self, image: ImageId, size: Vec2) -> Self {
        self.image_sizes.insert(image, size);
        self
    }

    /// Forget recorded calls.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Recorded image blits.
    pub fn images(&self) -> impl Iterator<Item = (ImageId, Vec2, DrawParams)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Image { image, pos, params } => Some((*image, *pos, *params)),
            _ => None,
        })
    }

    /// Recorded polygon fills.
    pub fn polygons(&self) -> impl Iterator<Item = (&[Vec2], Color)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Polygon { points, color } => Some((points.as_slice(), *color)),
            _ => None,
        })
    }

    /// Recorded circle masks as centre and radius.
    pub fn circle_masks(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::CircleMask { center, radius } => Some((*center, *radius)),
            _ => None,
        })
    }
}

impl RenderTarget for HeadlessTarget {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn image_size(&self, image: ImageId) -> Vec2 {
        self.image_sizes
            .get(&image)
            .copied()
            .unwrap_or(self.default_image_size)
    }

    fn draw_image(&mut self, image: ImageId, pos: Vec2, params: DrawParams) {
        self.calls.push(DrawCall::Image { image, pos, params });
    }

    fn draw_polygon(&mut self, points: &[Vec2], color: Color) {
        self.calls.push(DrawCall::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_circle_mask(&mut self, center: Vec2, radius: f32, _color: Color) {
        self.calls.push(DrawCall::CircleMask { center, radius });
    }
}
