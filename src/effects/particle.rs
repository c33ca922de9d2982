use macroquad::prelude::*;

use crate::animation::Animation;
use crate::assets::{AnimKey, Assets};
use crate::render::{DrawParams, RenderTarget};

const LEAF_SWAY_RATE: f32 = 0.035;
const LEAF_SWAY_AMPLITUDE: f32 = 0.3;

/// Which animation a particle plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Falls from tree canopies and sways.
    Leaf,
    /// Burst around hits.
    Dust,
    /// The animation shared with fireball projectiles.
    Fireball,
}

impl ParticleKind {
    /// Asset directory name.
    pub fn name(self) -> &'static str {
        match self {
            ParticleKind::Leaf => "leaf",
            ParticleKind::Dust => "particle",
            ParticleKind::Fireball => "fireball",
        }
    }
}

/// An animated sprite drifting at constant velocity until its animation ends.
#[derive(Debug)]
pub struct Particle {
    kind: ParticleKind,
    /// Centre.
    pub pos: Vec2,
    /// Movement per frame.
    pub velocity: Vec2,
    animation: Animation,
}

impl Particle {
    /// `frame` is the starting animation tick.
    pub fn new(kind: ParticleKind, pos: Vec2, velocity: Vec2, frame: u32, assets: &Assets) -> Self {
        let mut animation = assets.animation(AnimKey::Particle(kind)).instance();
        animation.set_frame(frame);
        Particle {
            kind,
            pos,
            velocity,
            animation,
        }
    }

    /// Which animation this particle plays.
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    /// Playback state.
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Returns `true` when the particle should be removed. The check happens
    /// before moving, so the last frame is shown once.
    pub fn update(&mut self) -> bool {
        let kill = self.animation.is_done();
        self.pos += self.velocity;
        self.animation.advance();
        kill
    }

    /// Horizontal sine drift layered on leaves.
    pub fn sway(&mut self) {
        self.pos.x += (self.animation.frame() as f32 * LEAF_SWAY_RATE).sin() * LEAF_SWAY_AMPLITUDE;
    }

    /// Drawn centred on `pos`.
    pub fn render(&self, target: &mut dyn RenderTarget, offset: Vec2) {
        let image = self.animation.current_image();
        let half = (target.image_size(image) / 2.0).floor();
        target.draw_image(image, self.pos - offset - half, DrawParams::default());
    }
}
