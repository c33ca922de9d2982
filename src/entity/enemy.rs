use macroquad::prelude::*;
use macroquad::rand::gen_range;

use super::{Action, EntityKind, PhysicsEntity};
use crate::assets::{Assets, ImageKey};
use crate::audio::{AudioSink, Cue};
use crate::effects::{EnemyShot, Spark};
use crate::map::Tilemap;
use crate::render::{DrawParams, RenderTarget};

/// Collision box of a goblin.
pub const ENEMY_SIZE: Vec2 = Vec2::new(8.0, 15.0);
const WALK_SPEED: f32 = 0.5;
const WALK_START_CHANCE: f32 = 0.01;
const WALK_MIN_FRAMES: u32 = 30;
const WALK_MAX_FRAMES: u32 = 120;
/// Ground probe, relative to the body's centre x and top y.
const LEDGE_PROBE: Vec2 = Vec2::new(7.0, 23.0);
const SIGHT_TOLERANCE_Y: f32 = 16.0;
const SHOT_SPEED: f32 = 1.5;
const SHOT_SPAWN_DX: f32 = 7.0;
const BOW_SIZE: Vec2 = Vec2::new(4.0, 8.0);
const BOW_TILT: f32 = 15.0;

/// Stable handle for an enemy, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u32);

/// What an enemy may touch outside itself during an update.
pub struct EnemyServices<'a> {
    /// Where the player is, for line-of-sight checks.
    pub player_pos: Vec2,
    /// Arrows in flight; new shots are pushed here.
    pub shots: &'a mut Vec<EnemyShot>,
    /// Muzzle sparks are pushed here.
    pub sparks: &'a mut Vec<Spark>,
    /// Where the shoot cue goes.
    pub audio: &'a mut dyn AudioSink,
}

/// A goblin archer that patrols and shoots along its facing.
#[derive(Debug)]
pub struct Enemy {
    id: EnemyId,
    /// Collision body.
    pub body: PhysicsEntity,
    /// Frames left in the current patrol burst; 0 when standing.
    pub walking: u32,
}

impl Enemy {
    /// A standing goblin at `pos`.
    pub fn new(id: EnemyId, pos: Vec2, assets: &Assets) -> Self {
        Enemy {
            id,
            body: PhysicsEntity::new(EntityKind::Enemy, pos, ENEMY_SIZE, assets),
            walking: 0,
        }
    }

    /// Handle used by the hit index.
    pub fn id(&self) -> EnemyId {
        self.id
    }

    /// Collision box.
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// Patrol or idle for one frame, then move the body.
    pub fn update(&mut self, tilemap: &Tilemap, assets: &Assets, services: &mut EnemyServices<'_>) {
        let mut movement = Vec2::ZERO;
        if self.walking > 0 {
            movement = self.patrol(tilemap, services);
        } else if gen_range(0.0f32, 1.0) < WALK_START_CHANCE {
            self.walking = gen_range(WALK_MIN_FRAMES, WALK_MAX_FRAMES + 1);
        }

        self.body.update(tilemap, movement);

        let action = if movement.x != 0.0 { Action::Run } else { Action::Idle };
        self.body.set_action(action, assets);
    }

    /// One frame of a patrol burst. Turns back at walls and ledges, and takes
    /// a shot at the player when the burst ends.
    fn patrol(&mut self, tilemap: &Tilemap, services: &mut EnemyServices<'_>) -> Vec2 {
        let mut movement = Vec2::ZERO;
        let rect = self.body.rect();
        let dir = if self.body.flip { -1.0 } else { 1.0 };
        let probe = vec2(rect.center().x + LEDGE_PROBE.x * dir, self.body.pos.y + LEDGE_PROBE.y);

        if tilemap.solid_check(probe).is_some() {
            if self.body.collisions.side() {
                self.body.flip = !self.body.flip;
            } else {
                movement.x = WALK_SPEED * dir;
            }
        } else {
            self.body.flip = !self.body.flip;
        }

        self.walking = self.walking.saturating_sub(1);
        if self.walking == 0 {
            self.try_shoot(rect, services);
        }
        movement
    }

    fn try_shoot(&self, rect: Rect, services: &mut EnemyServices<'_>) {
        let dis = services.player_pos - self.body.pos;
        if dis.y.abs() >= SIGHT_TOLERANCE_Y {
            return;
        }
        let speed = match (self.body.flip, dis.x) {
            (true, dx) if dx < 0.0 => -SHOT_SPEED,
            (false, dx) if dx > 0.0 => SHOT_SPEED,
            _ => return,
        };

        services.audio.play(Cue::Shoot);
        let center = rect.center();
        let origin = vec2(center.x + SHOT_SPAWN_DX * speed.signum(), center.y);
        services.shots.push(EnemyShot::new(origin, speed, self.body.flip));

        let base_angle = if speed < 0.0 { std::f32::consts::PI } else { 0.0 };
        for _ in 0..4 {
            services.sparks.push(Spark::new(
                origin,
                gen_range(-0.5f32, 0.5) + base_angle,
                2.0 + gen_range(0.0f32, 1.0),
                WHITE,
            ));
        }
    }

    /// Body sprite one pixel lower than other entities, plus the bow held on
    /// the facing side.
    pub fn render(&self, target: &mut dyn RenderTarget, assets: &Assets, offset: Vec2) {
        self.body.render_shifted(target, offset, vec2(0.0, 1.0));

        let center = self.body.center();
        let x = if self.body.flip {
            center.x - 5.0 - BOW_SIZE.x
        } else {
            center.x + 5.0
        };
        target.draw_image(
            assets.image(ImageKey::Bow),
            vec2(x - offset.x, center.y - offset.y - BOW_SIZE.y / 2.0),
            DrawParams {
                flip_x: self.body.flip,
                dest_size: Some(BOW_SIZE),
                rotation: BOW_TILT.to_radians(),
            },
        );
    }
}
