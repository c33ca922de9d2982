use macroquad::prelude::*;

use super::{Action, EntityKind, PhysicsEntity};
use crate::assets::{Assets, ImageKey};
use crate::audio::{AudioSink, Cue};
use crate::map::Tilemap;
use crate::render::{DrawParams, RenderTarget};

/// Collision box of the player.
pub const PLAYER_SIZE: Vec2 = Vec2::new(10.0, 13.0);
/// Jumps available between landings.
pub const MAX_JUMPS: u32 = 2;
/// Vertical velocity set by every jump.
pub const JUMP_VELOCITY: f32 = -2.5;
/// Frames airborne before the player counts as lost.
pub const FALL_DEATH_FRAMES: u32 = 120;
/// Length of an attack.
pub const ATTACK_FRAMES: u32 = 36;
/// Frames airborne before the jump animation takes over.
const JUMP_GRACE_FRAMES: u32 = 4;
const JUMP_AIR_TIME_SEED: u32 = 5;
const ATTACK_DRAW_OFFSET: Vec2 = Vec2::new(-8.0, -19.0);
/// The attack sprite is asymmetric; unmirrored it sits further left.
const ATTACK_UNFLIPPED_SHIFT: f32 = -5.0;

/// What the player may touch outside itself during an update.
pub struct PlayerServices<'a> {
    /// Where the landing cue goes.
    pub audio: &'a mut dyn AudioSink,
    /// Raised when the player falls out of the world.
    pub screenshake: &'a mut u32,
    /// Death counter; a fall starts it.
    pub dead: &'a mut u32,
}

/// The player-controlled wizard.
#[derive(Debug)]
pub struct Player {
    /// Collision body.
    pub body: PhysicsEntity,
    /// Frames since last grounded.
    pub air_time: u32,
    /// Jumps left before landing again.
    pub jumps: u32,
    /// An attack is playing.
    pub attacking: bool,
    /// Frames into the current attack.
    pub attack_frames: u32,
}

impl Player {
    /// A player at rest with every jump available.
    pub fn new(pos: Vec2, assets: &Assets) -> Self {
        Player {
            body: PhysicsEntity::new(EntityKind::Player, pos, PLAYER_SIZE, assets),
            air_time: 0,
            jumps: MAX_JUMPS,
            attacking: false,
            attack_frames: 0,
        }
    }

    /// Move for one frame and update air time, landing and attack state.
    pub fn update(
        &mut self,
        tilemap: &Tilemap,
        assets: &Assets,
        movement: Vec2,
        services: &mut PlayerServices<'_>,
    ) {
        self.body.update(tilemap, movement);

        self.air_time += 1;
        if self.air_time >= FALL_DEATH_FRAMES {
            *services.screenshake = (*services.screenshake).max(16);
            *services.dead += 1;
        }

        if self.attack_frames >= ATTACK_FRAMES {
            self.attacking = false;
        }

        if self.body.collisions.down {
            if self.body.action() == Action::Jump {
                services.audio.play(Cue::Landing);
            }
            self.air_time = 0;
            self.jumps = MAX_JUMPS;
        }

        if self.attacking {
            self.body.set_action(Action::Attack, assets);
            self.attack_frames += 1;
            return;
        }

        self.attack_frames = 0;
        if self.air_time > JUMP_GRACE_FRAMES {
            self.body.set_action(Action::Jump, assets);
        } else if movement.x != 0.0 {
            self.body.set_action(Action::Run, assets);
        } else {
            self.body.set_action(Action::Idle, assets);
        }
    }

    /// Returns `false`, changing nothing, when no jumps are left.
    pub fn jump(&mut self) -> bool {
        if self.jumps == 0 {
            return false;
        }
        self.body.velocity.y = JUMP_VELOCITY;
        self.jumps -= 1;
        self.air_time = JUMP_AIR_TIME_SEED;
        true
    }

    /// Start an attack.
    pub fn attack(&mut self) {
        self.attacking = true;
    }

    /// Draw the body with either the held staff or the attack sprite.
    pub fn render(&self, target: &mut dyn RenderTarget, assets: &Assets, offset: Vec2) {
        let body = &self.body;
        if self.attacking {
            let mut pos = body.pos - offset + ATTACK_DRAW_OFFSET;
            if !body.flip {
                pos.x += ATTACK_UNFLIPPED_SHIFT;
            }
            target.draw_image(
                body.animation().current_image(),
                pos,
                DrawParams::flipped(body.flip),
            );
            return;
        }

        let rect = body.rect();
        let center = rect.center();
        let dx = if body.flip { rect.w + 4.0 } else { 2.0 };
        target.draw_image(
            assets.image(ImageKey::PlayerWeapon),
            vec2(center.x - offset.x - dx, center.y - offset.y - 8.0),
            DrawParams::flipped(body.flip),
        );
        body.render(target, offset);
    }
}
