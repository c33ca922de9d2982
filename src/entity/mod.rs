//! Rectangle bodies that move through the tile grid.
//!
//! Player and enemies share one [`PhysicsEntity`] body; the kind-specific
//! behaviour lives in [`Player`] and [`Enemy`], which wrap a body and add
//! their own state.

mod enemy;
mod player;

pub use enemy::{Enemy, EnemyId, EnemyServices};
pub use player::{Player, PlayerServices};

use macroquad::prelude::*;

use crate::animation::Animation;
use crate::assets::{AnimKey, Assets};
use crate::map::Tilemap;
use crate::render::{DrawParams, RenderTarget};
use crate::spatial::rects_collide;

/// Added to vertical velocity every update.
pub const GRAVITY: f32 = 0.1;
/// Fastest possible fall.
pub const TERMINAL_VELOCITY: f32 = 5.0;

/// Sprite offset relative to the collision box.
const ANIM_OFFSET: Vec2 = Vec2::new(-3.0, -3.0);

/// Which animation set a body uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The player.
    Player,
    /// A goblin.
    Enemy,
}

impl EntityKind {
    /// Asset directory name.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Enemy => "enemy",
        }
    }
}

/// Current animation state of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Standing still.
    Idle,
    /// Moving horizontally.
    Run,
    /// Airborne.
    Jump,
    /// Casting.
    Attack,
}

impl Action {
    /// Asset directory name.
    pub fn name(self) -> &'static str {
        match self {
            Action::Idle => "idle",
            Action::Run => "run",
            Action::Jump => "jump",
            Action::Attack => "attack",
        }
    }
}

/// Which sides touched solid tiles during the last update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collisions {
    /// Hit a ceiling.
    pub up: bool,
    /// Landed on the ground.
    pub down: bool,
    /// Blocked moving left.
    pub left: bool,
    /// Blocked moving right.
    pub right: bool,
}

impl Collisions {
    /// Blocked horizontally.
    pub fn side(&self) -> bool {
        self.left || self.right
    }

    /// Blocked vertically.
    pub fn vertical(&self) -> bool {
        self.up || self.down
    }
}

/// Axis-aligned body resolved against the grid one axis at a time.
#[derive(Debug)]
pub struct PhysicsEntity {
    kind: EntityKind,
    /// Top-left corner.
    pub pos: Vec2,
    size: Vec2,
    /// Velocity carried between frames; only gravity changes it here.
    pub velocity: Vec2,
    /// Contacts from the last update.
    pub collisions: Collisions,
    /// Facing left when set.
    pub flip: bool,
    action: Action,
    animation: Animation,
}

impl PhysicsEntity {
    /// An idle body at rest.
    pub fn new(kind: EntityKind, pos: Vec2, size: Vec2, assets: &Assets) -> Self {
        PhysicsEntity {
            kind,
            pos,
            size,
            velocity: Vec2::ZERO,
            collisions: Collisions::default(),
            flip: false,
            action: Action::Idle,
            animation: assets.animation(AnimKey::Entity(kind, Action::Idle)).instance(),
        }
    }

    /// Which animation set this body uses.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Collision box size.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Current animation state.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Playback for the current action.
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Collision box.
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Centre of the collision box.
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Switch animation; re-selecting the current action keeps playback going.
    pub fn set_action(&mut self, action: Action, assets: &Assets) {
        if action == self.action {
            return;
        }
        self.action = action;
        self.animation = assets.animation(AnimKey::Entity(self.kind, action)).instance();
    }

    /// Move by `movement` plus velocity, resolving x fully before y.
    pub fn update(&mut self, tilemap: &Tilemap, movement: Vec2) {
        self.collisions = Collisions::default();
        let frame_movement = movement + self.velocity;

        self.move_x(tilemap, frame_movement.x);
        self.move_y(tilemap, frame_movement.y);

        if movement.x > 0.0 {
            self.flip = false;
        } else if movement.x < 0.0 {
            self.flip = true;
        }

        self.velocity.y = (self.velocity.y + GRAVITY).min(TERMINAL_VELOCITY);
        if self.collisions.vertical() {
            self.velocity.y = 0.0;
        }

        self.animation.advance();
    }

    fn move_x(&mut self, tilemap: &Tilemap, dx: f32) {
        self.pos.x += dx;
        let mut rect = self.rect();
        for tile in tilemap.physics_rects_around(self.pos) {
            if !rects_collide(&rect, &tile) {
                continue;
            }
            if dx > 0.0 {
                rect.x = tile.x - rect.w;
                self.collisions.right = true;
            } else if dx < 0.0 {
                rect.x = tile.x + tile.w;
                self.collisions.left = true;
            }
            self.pos.x = rect.x;
        }
    }

    fn move_y(&mut self, tilemap: &Tilemap, dy: f32) {
        self.pos.y += dy;
        let mut rect = self.rect();
        for tile in tilemap.physics_rects_around(self.pos) {
            if !rects_collide(&rect, &tile) {
                continue;
            }
            if dy > 0.0 {
                rect.y = tile.y - rect.h;
                self.collisions.down = true;
            } else if dy < 0.0 {
                rect.y = tile.y + tile.h;
                self.collisions.up = true;
            }
            self.pos.y = rect.y;
        }
    }

    /// Draw the current frame, mirrored when facing left.
    pub fn render(&self, target: &mut dyn RenderTarget, offset: Vec2) {
        self.render_shifted(target, offset, Vec2::ZERO);
    }

    fn render_shifted(&self, target: &mut dyn RenderTarget, offset: Vec2, extra: Vec2) {
        target.draw_image(
            self.animation.current_image(),
            self.pos - offset + ANIM_OFFSET + extra,
            DrawParams::flipped(self.flip),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessTarget;
    use crate::spatial::GridPos;
    use crate::tile::TileKind;

    fn body(pos: Vec2, size: Vec2) -> (PhysicsEntity, Assets) {
        let assets = Assets::placeholder();
        (PhysicsEntity::new(EntityKind::Player, pos, size, &assets), assets)
    }

    fn solid(cells: &[(i32, i32)]) -> Tilemap {
        let mut map = Tilemap::new(16);
        for &(x, y) in cells {
            map.set_tile(GridPos::new(x, y), TileKind::Stone, 0);
        }
        map
    }

    #[test]
    fn moves_freely_and_faces_input_direction() {
        let (mut e, _) = body(vec2(100.0, 100.0), vec2(16.0, 16.0));
        e.update(&Tilemap::new(16), vec2(1.0, 0.0));
        assert_eq!(e.pos, vec2(101.0, 100.0));
        assert!(!e.flip);

        e.update(&Tilemap::new(16), vec2(-1.0, 0.0));
        assert!(e.flip);
        e.update(&Tilemap::new(16), Vec2::ZERO);
        assert!(e.flip);
    }

    #[test]
    fn blocked_moving_right() {
        let (mut e, _) = body(vec2(4.0, 0.0), vec2(10.0, 16.0));
        let map = solid(&[(1, 0)]);
        e.update(&map, vec2(3.0, 0.0));
        assert_eq!(e.rect().right(), 16.0);
        assert!(e.collisions.right);
        assert!(!e.collisions.left);
    }

    #[test]
    fn blocked_moving_left() {
        let (mut e, _) = body(vec2(18.0, 0.0), vec2(10.0, 16.0));
        let map = solid(&[(0, 0)]);
        e.update(&map, vec2(-3.0, 0.0));
        assert_eq!(e.rect().left(), 16.0);
        assert!(e.collisions.left);
    }

    #[test]
    fn head_bump_cancels_upward_velocity() {
        let (mut e, _) = body(vec2(0.0, 17.0), vec2(10.0, 13.0));
        e.velocity.y = -2.5;
        let map = solid(&[(0, 0)]);
        e.update(&map, Vec2::ZERO);
        assert_eq!(e.rect().top(), 16.0);
        assert!(e.collisions.up);
        assert_eq!(e.velocity.y, 0.0);
    }

    #[test]
    fn lands_on_floor() {
        let (mut e, _) = body(vec2(0.0, 1.0), vec2(10.0, 13.0));
        e.velocity.y = 3.0;
        let map = solid(&[(0, 1)]);
        e.update(&map, Vec2::ZERO);
        assert_eq!(e.rect().bottom(), 16.0);
        assert!(e.collisions.down);
        assert_eq!(e.velocity.y, 0.0);
    }

    #[test]
    fn collisions_are_recomputed_every_update() {
        let (mut e, _) = body(vec2(4.0, 0.0), vec2(10.0, 16.0));
        let map = solid(&[(1, 0)]);
        e.update(&map, vec2(3.0, 0.0));
        assert!(e.collisions.right);
        e.velocity = Vec2::ZERO;
        e.update(&map, vec2(-1.0, 0.0));
        assert_eq!(e.collisions, Collisions::default());
    }

    #[test]
    fn gravity_converges_to_terminal_velocity() {
        let (mut e, _) = body(vec2(0.0, 0.0), vec2(10.0, 13.0));
        let map = Tilemap::new(16);
        for _ in 0..200 {
            e.update(&map, Vec2::ZERO);
            assert!(e.velocity.y <= TERMINAL_VELOCITY);
        }
        assert_eq!(e.velocity.y, TERMINAL_VELOCITY);
    }

    #[test]
    fn set_action_only_restarts_on_change() {
        let (mut e, assets) = body(vec2(0.0, 0.0), vec2(10.0, 13.0));
        let map = Tilemap::new(16);
        e.update(&map, Vec2::ZERO);
        assert_eq!(e.animation().frame(), 1);

        e.set_action(Action::Idle, &assets);
        assert_eq!(e.animation().frame(), 1);

        e.set_action(Action::Run, &assets);
        assert_eq!(e.action(), Action::Run);
        assert_eq!(e.animation().frame(), 0);
    }

    #[test]
    fn render_applies_offset_and_flip() {
        let (mut e, _) = body(vec2(100.0, 100.0), vec2(16.0, 16.0));
        e.flip = true;
        let mut target = HeadlessTarget::new(vec2(320.0, 240.0));
        e.render(&mut target, vec2(10.0, 20.0));

        let (_, pos, params) = target.images().next().expect("one blit");
        assert_eq!(pos, vec2(87.0, 77.0));
        assert!(params.flip_x);
    }
}
