//! The two kinds of shot in play.
//!
//! [`Projectile`] is the player's fireball: an animated rectangle that
//! collides with enemies and terrain and reports why it died. [`EnemyShot`]
//! is the goblins' arrow, a point that travels in a straight line.

use std::collections::BTreeMap;

use macroquad::prelude::*;

use super::ParticleKind;
use crate::animation::Animation;
use crate::assets::{AnimKey, Assets, ImageKey};
use crate::entity::EnemyId;
use crate::map::Tilemap;
use crate::render::{DrawParams, RenderTarget};
use crate::spatial::{rect_contains, rects_collide};

/// Collision box of a fireball.
pub const FIREBALL_SIZE: Vec2 = Vec2::new(32.0, 16.0);
/// Updates a fireball survives before timing out.
pub const FIREBALL_LIFETIME: u32 = 175;
/// Updates an arrow survives.
pub const SHOT_LIFETIME: u32 = 360;
const ARROW_SCALE: f32 = 0.9;

/// Why a fireball ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kill {
    /// Struck this enemy.
    Enemy(EnemyId),
    /// Struck a solid tile with this rectangle.
    Tile(Rect),
    /// Ran out of lifetime.
    Timeout,
}

/// The player's fireball.
#[derive(Debug)]
pub struct Projectile {
    /// Top-left corner.
    pub pos: Vec2,
    /// Movement per frame.
    pub velocity: Vec2,
    ttl: u32,
    animation: Animation,
}

impl Projectile {
    /// A fresh fireball with its full lifetime.
    pub fn new(pos: Vec2, velocity: Vec2, assets: &Assets) -> Self {
        Projectile {
            pos,
            velocity,
            ttl: FIREBALL_LIFETIME,
            animation: assets.animation(AnimKey::Particle(ParticleKind::Fireball)).instance(),
        }
    }

    /// Collision box.
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, FIREBALL_SIZE.x, FIREBALL_SIZE.y)
    }

    /// Leading edge at mid height, where the explosion bursts.
    pub fn impact_point(&self) -> Vec2 {
        let rect = self.rect();
        let x = if self.velocity.x > 0.0 { rect.right() } else { rect.left() };
        vec2(x, rect.center().y)
    }

    /// Move one step. Terrain wins over an enemy struck in the same step.
    pub fn update(&mut self, tilemap: &Tilemap, enemy_rects: &BTreeMap<EnemyId, Rect>) -> Option<Kill> {
        self.pos += self.velocity;
        let rect = self.rect();

        let mut kill = None;
        for (&id, enemy) in enemy_rects {
            if rects_collide(&rect, enemy) {
                kill = Some(Kill::Enemy(id));
            }
        }
        for tile in tilemap.physics_rects_around(rect.center()) {
            if rects_collide(&rect, &tile) {
                kill = Some(Kill::Tile(tile));
            }
        }
        if self.ttl == 0 && kill.is_none() {
            kill = Some(Kill::Timeout);
        }
        self.ttl = self.ttl.saturating_sub(1);

        self.animation.advance();
        kill
    }

    /// Draw the current animation frame, mirrored when flying left.
    pub fn render(&self, target: &mut dyn RenderTarget, offset: Vec2) {
        target.draw_image(
            self.animation.current_image(),
            self.pos - offset,
            DrawParams {
                flip_x: self.velocity.x < 0.0,
                dest_size: Some(FIREBALL_SIZE),
                rotation: 0.0,
            },
        );
    }
}

/// Why an arrow left play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotEnd {
    /// Flew into a solid tile.
    Terrain,
    /// Lived out its lifetime.
    Expired,
    /// Struck the player.
    HitPlayer,
}

/// A goblin arrow.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyShot {
    /// Tip of the arrow.
    pub pos: Vec2,
    /// Horizontal speed; the sign is the direction.
    pub speed: f32,
    /// Frames in flight.
    pub age: u32,
    /// Drawn pointing left.
    pub flip: bool,
}

impl EnemyShot {
    /// A newly loosed arrow.
    pub fn new(pos: Vec2, speed: f32, flip: bool) -> Self {
        EnemyShot {
            pos,
            speed,
            age: 0,
            flip,
        }
    }

    /// Move one step and test, in order, terrain, lifetime and the player.
    pub fn advance(&mut self, tilemap: &Tilemap, player: Rect) -> Option<ShotEnd> {
        self.pos.x += self.speed;
        self.age += 1;
        if tilemap.solid_check(self.pos).is_some() {
            Some(ShotEnd::Terrain)
        } else if self.age > SHOT_LIFETIME {
            Some(ShotEnd::Expired)
        } else if rect_contains(&player, self.pos) {
            Some(ShotEnd::HitPlayer)
        } else {
            None
        }
    }

    /// Arrow sprite scaled down and centred on the shot.
    pub fn render(&self, target: &mut dyn RenderTarget, assets: &Assets, offset: Vec2) {
        let image = assets.image(ImageKey::Arrow);
        let size = target.image_size(image) * ARROW_SCALE;
        target.draw_image(
            image,
            self.pos - size / 2.0 - offset,
            DrawParams {
                flip_x: self.flip,
                dest_size: Some(size),
                rotation: 0.0,
            },
        );
    }
}
