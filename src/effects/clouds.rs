use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::assets::ImageId;
use crate::render::{DrawParams, RenderTarget};

const SPAWN_EXTENT: f32 = 99_999.0;

/// A background sprite scrolling at its own parallax depth.
#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    /// Position before parallax and wrapping.
    pub pos: Vec2,
    /// Sprite.
    pub image: ImageId,
    /// Horizontal drift per frame.
    pub speed: f32,
    /// Fraction of the camera scroll applied; smaller is further away.
    pub depth: f32,
}

impl Cloud {
    /// Drift one frame.
    pub fn update(&mut self) {
        self.pos.x += self.speed;
    }

    /// Position on screen, wrapped so the cloud re-enters from the far edge.
    pub fn screen_pos(&self, screen: Vec2, image: Vec2, offset: Vec2) -> Vec2 {
        let p = self.pos - offset * self.depth;
        vec2(
            p.x.rem_euclid(screen.x + image.x) - image.x,
            p.y.rem_euclid(screen.y + image.y) - image.y,
        )
    }

    /// Draw wrapped into the target.
    pub fn render(&self, target: &mut dyn RenderTarget, offset: Vec2) {
        let pos = self.screen_pos(target.size(), target.image_size(self.image), offset);
        target.draw_image(self.image, pos, DrawParams::default());
    }
}

/// Clouds ordered far to near.
#[derive(Debug, Clone, Default)]
pub struct Clouds {
    clouds: Vec<Cloud>,
}

impl Clouds {
    /// `count` clouds scattered at random; none when `images` is empty.
    pub fn new(images: &[ImageId], count: usize) -> Self {
        if images.is_empty() {
            return Clouds::default();
        }
        let clouds = (0..count)
            .map(|_| Cloud {
                pos: vec2(gen_range(0.0, SPAWN_EXTENT), gen_range(0.0, SPAWN_EXTENT)),
                image: images[gen_range(0, images.len())],
                speed: gen_range(0.05, 0.1),
                depth: gen_range(0.2, 0.8),
            })
            .collect();
        Clouds::from_clouds(clouds)
    }

    /// Adopt `clouds`, sorted far to near.
    pub fn from_clouds(mut clouds: Vec<Cloud>) -> Self {
        clouds.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        Clouds { clouds }
    }

    /// Clouds in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Cloud> {
        self.clouds.iter()
    }

    /// Number of clouds.
    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    /// True when the sky is clear.
    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }

    /// Drift every cloud one frame.
    pub fn update(&mut self) {
        self.clouds.iter_mut().for_each(Cloud::update);
    }

    /// Draw far clouds first.
    pub fn render(&self, target: &mut dyn RenderTarget, offset: Vec2) {
        for cloud in &self.clouds {
            cloud.render(target, offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessTarget;

    fn cloud(x: f32, depth: f32) -> Cloud {
        Cloud {
            pos: vec2(x, 0.0),
            image: ImageId(depth.to_bits()),
            speed: 0.5,
            depth,
        }
    }

    #[test]
    fn sorted_far_to_near() {
        let clouds = Clouds::from_clouds(vec![cloud(0.0, 0.7), cloud(0.0, 0.2), cloud(0.0, 0.5)]);
        let depths: Vec<f32> = clouds.iter().map(|c| c.depth).collect();
        assert_eq!(depths, vec![0.2, 0.5, 0.7]);
    }

    #[test]
    fn random_clouds_respect_ranges() {
        let images = [ImageId(1), ImageId(2)];
        let clouds = Clouds::new(&images, 16);
        assert_eq!(clouds.len(), 16);
        let mut last = 0.0;
        for c in clouds.iter() {
            assert!((0.05..0.1).contains(&c.speed) || c.speed == 0.1);
            assert!(c.depth >= last);
            last = c.depth;
            assert!(images.contains(&c.image));
        }
        assert!(Clouds::new(&[], 16).is_empty());
    }

    #[test]
    fn update_drifts_right() {
        let mut clouds = Clouds::from_clouds(vec![cloud(10.0, 0.5)]);
        clouds.update();
        assert_eq!(clouds.iter().next().map(|c| c.pos.x), Some(10.5));
    }

    #[test]
    fn wraps_around_screen_edges() {
        let c = cloud(0.0, 0.5);
        let screen = vec2(320.0, 240.0);
        let image = vec2(40.0, 20.0);

        assert_eq!(c.screen_pos(screen, image, Vec2::ZERO), vec2(-40.0, -20.0));
        // Scrolling 100 right moves a half-depth cloud 50 left, wrapping.
        assert_eq!(c.screen_pos(screen, image, vec2(100.0, 0.0)), vec2(270.0, -20.0));
    }

    #[test]
    fn renders_each_cloud_once() {
        let clouds = Clouds::from_clouds(vec![cloud(0.0, 0.3), cloud(50.0, 0.6)]);
        let mut target = HeadlessTarget::new(vec2(320.0, 240.0));
        clouds.render(&mut target, Vec2::ZERO);
        assert_eq!(target.images().count(), 2);
    }
}
