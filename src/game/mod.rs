//! The frame loop.
//!
//! [`Game`] owns every live object and runs one frame at a time in a fixed
//! order: transition timing, camera, ambient spawns, clouds, tiles, enemies,
//! player, arrows, fireballs, sparks and particles, then input. Each stage
//! may rely on the side effects of the ones before it; in particular the
//! enemy rectangle index is rebuilt right after enemies move, before any
//! shot is tested against it.

mod level;
mod transition;

pub use level::{take_spawns, LevelSet, Spawns, ENEMY_SPAWN, LEAF_TREE, PLAYER_SPAWN};
pub use transition::{
    Transition, TransitionStep, DEATH_RELOAD_AFTER, DEATH_WIPE_START, TRANSITION_SPAN,
};

use std::collections::BTreeMap;
use std::f32::consts::{PI, TAU};

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::assets::{Assets, ImageKey};
use crate::audio::{AudioSink, Cue};
use crate::config::Config;
use crate::effects::{Clouds, EnemyShot, Kill, Particle, ParticleKind, Projectile, ShotEnd, Spark};
use crate::entity::{Enemy, EnemyId, EnemyServices, Player, PlayerServices};
use crate::error::LevelError;
use crate::input::{InputEvent, Key, Movement};
use crate::map::Tilemap;
use crate::render::{DrawParams, RenderTarget};

/// Where the player appears when a level has no start marker.
pub const PLAYER_START: Vec2 = Vec2::new(50.0, 50.0);
const CAMERA_SMOOTHING: f32 = 30.0;
/// Leaf spawn chance per frame is canopy area over this.
const LEAF_AREA_SCALE: f32 = 49_999.0;
const LEAF_VELOCITY: Vec2 = Vec2::new(-0.1, 0.3);
const HIT_SHAKE: u32 = 16;
const BURST_COUNT: usize = 30;
const FIREBALL_COLOR: Color = Color::new(1.0, 119.0 / 255.0, 0.0, 1.0);
const FIREBALL_SPEED: f32 = 1.5;
/// Spawn offset of a fireball from the player's corner, facing left.
const FIREBALL_SPAWN_LEFT: Vec2 = Vec2::new(-16.0, -3.0);
const FIREBALL_SPAWN_RIGHT: Vec2 = Vec2::new(0.0, -3.0);

/// What the presenter should do with the composited frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Scale to the window, shifted by `shake`.
    Present {
        /// Offset in display pixels, within half the shake counter either way.
        shake: Vec2,
    },
    /// A quit was requested; the frame was abandoned.
    Quit,
}

/// One play session: the loaded level and everything alive in it.
pub struct Game {
    assets: Assets,
    levels: LevelSet,
    level: usize,
    generation: u64,
    display_size: Vec2,

    tilemap: Tilemap,
    player: Player,
    movement: Movement,
    enemies: Vec<Enemy>,
    next_enemy: u32,
    enemy_rects: BTreeMap<EnemyId, Rect>,
    shots: Vec<EnemyShot>,
    projectiles: Vec<Projectile>,
    particles: Vec<Particle>,
    sparks: Vec<Spark>,
    clouds: Clouds,
    leaf_zones: Vec<Rect>,

    scroll: Vec2,
    screenshake: u32,
    transition: Transition,
}

impl Game {
    /// Set up a session and load level 0. A missing first level leaves the
    /// map empty; a malformed one is an error.
    pub fn new(assets: Assets, config: &Config) -> Result<Self, LevelError> {
        let player = Player::new(PLAYER_START, &assets);
        let clouds = Clouds::new(assets.clouds(), config.cloud_count);
        let mut game = Game {
            assets,
            levels: LevelSet::new(&config.maps_dir),
            level: 0,
            generation: 0,
            display_size: config.display_size(),
            tilemap: Tilemap::default(),
            player,
            movement: Movement::default(),
            enemies: Vec::new(),
            next_enemy: 0,
            enemy_rects: BTreeMap::new(),
            shots: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            sparks: Vec::new(),
            clouds,
            leaf_zones: Vec::new(),
            scroll: Vec2::ZERO,
            screenshake: 0,
            transition: Transition::opening(),
        };
        game.load_level(0)?;
        Ok(game)
    }

    /// Replace the world with level `index` and reset all transient state.
    /// Only the very first load tolerates a missing file.
    pub fn load_level(&mut self, index: usize) -> Result<(), LevelError> {
        let path = self.levels.path(index);
        match self.tilemap.load(&path) {
            Ok(()) => {}
            Err(e) if e.is_not_found() && self.generation == 0 => {
                tracing::warn!("level file {} not found, starting empty", path.display());
                self.tilemap = Tilemap::default();
            }
            Err(e) => return Err(e),
        }

        let spawns = take_spawns(&mut self.tilemap);
        if let Some(pos) = spawns.player {
            self.player.body.pos = pos;
            self.player.air_time = 0;
        }
        self.enemies.clear();
        for pos in spawns.enemies {
            let id = EnemyId(self.next_enemy);
            self.next_enemy += 1;
            self.enemies.push(Enemy::new(id, pos, &self.assets));
        }
        self.leaf_zones = spawns.leaf_zones;

        self.enemy_rects.clear();
        self.shots.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.sparks.clear();
        self.scroll = Vec2::ZERO;
        self.transition = Transition::opening();
        self.level = index;
        self.generation += 1;

        tracing::info!(
            level = index,
            tiles = self.tilemap.tile_count(),
            offgrid = self.tilemap.offgrid().len(),
            enemies = self.enemies.len(),
            "loaded level"
        );
        Ok(())
    }

    /// Step the level-transition state machine once.
    pub fn tick_transition(&mut self) -> Result<(), LevelError> {
        match self.transition.tick(self.enemies.is_empty()) {
            TransitionStep::Continue => {}
            TransitionStep::Advance => match self.levels.next_index(self.level) {
                Some(next) => {
                    tracing::info!(from = self.level, to = next, "level cleared");
                    self.load_level(next)?;
                }
                None => self.transition.hold_closed(),
            },
            TransitionStep::Reload => {
                tracing::info!(level = self.level, "respawning");
                self.load_level(self.level)?;
            }
        }
        Ok(())
    }

    /// Run one complete frame, compositing onto `target`.
    pub fn frame(
        &mut self,
        events: &[InputEvent],
        audio: &mut dyn AudioSink,
        target: &mut dyn RenderTarget,
    ) -> Result<FrameOutcome, LevelError> {
        target.draw_image(
            self.assets.image(ImageKey::Background),
            Vec2::ZERO,
            DrawParams::default(),
        );

        self.screenshake = self.screenshake.saturating_sub(1);
        self.tick_transition()?;
        self.follow_player();
        let offset = self.scroll.trunc();

        self.spawn_leaves();

        self.clouds.update();
        self.clouds.render(target, offset);
        self.tilemap.render(target, &self.assets, offset);

        self.update_enemies(audio, target, offset);

        if !self.transition.is_dying() {
            let mut services = PlayerServices {
                audio: &mut *audio,
                screenshake: &mut self.screenshake,
                dead: &mut self.transition.dead,
            };
            self.player
                .update(&self.tilemap, &self.assets, vec2(self.movement.axis(), 0.0), &mut services);
            self.player.render(target, &self.assets, offset);
        }

        self.update_shots(audio, target, offset);
        self.update_projectiles(audio, target, offset);
        self.update_effects(target, offset);

        for &event in events {
            if event == InputEvent::Quit {
                tracing::info!("quit requested");
                return Ok(FrameOutcome::Quit);
            }
            self.handle_event(event, audio);
        }

        if self.transition.is_active() {
            target.draw_circle_mask(
                (self.display_size / 2.0).floor(),
                self.transition.wipe_radius(),
                BLACK,
            );
        }

        let s = self.screenshake as f32;
        let shake = vec2(
            gen_range(0.0f32, 1.0) * s - s / 2.0,
            gen_range(0.0f32, 1.0) * s - s / 2.0,
        );
        Ok(FrameOutcome::Present { shake })
    }

    fn follow_player(&mut self) {
        let target = self.player.body.center() - self.display_size / 2.0;
        self.scroll += (target - self.scroll) / CAMERA_SMOOTHING;
    }

    fn spawn_leaves(&mut self) {
        for zone in &self.leaf_zones {
            if gen_range(0.0f32, 1.0) * LEAF_AREA_SCALE < zone.w * zone.h {
                let pos = vec2(
                    zone.x + gen_range(0.0f32, 1.0) * zone.w,
                    zone.y + gen_range(0.0f32, 1.0) * zone.h,
                );
                self.particles.push(Particle::new(
                    ParticleKind::Leaf,
                    pos,
                    LEAF_VELOCITY,
                    gen_range(0, 21),
                    &self.assets,
                ));
            }
        }
    }

    fn update_enemies(&mut self, audio: &mut dyn AudioSink, target: &mut dyn RenderTarget, offset: Vec2) {
        let mut services = EnemyServices {
            player_pos: self.player.body.pos,
            shots: &mut self.shots,
            sparks: &mut self.sparks,
            audio,
        };
        for enemy in &mut self.enemies {
            enemy.update(&self.tilemap, &self.assets, &mut services);
            enemy.render(target, &self.assets, offset);
        }

        self.enemy_rects.clear();
        self.enemy_rects
            .extend(self.enemies.iter().map(|e| (e.id(), e.rect())));
    }

    fn update_shots(&mut self, audio: &mut dyn AudioSink, target: &mut dyn RenderTarget, offset: Vec2) {
        let player_rect = self.player.body.rect();
        let mut shots = std::mem::take(&mut self.shots);
        shots.retain_mut(|shot| {
            let end = shot.advance(&self.tilemap, player_rect);
            shot.render(target, &self.assets, offset);
            match end {
                None => true,
                Some(ShotEnd::Expired) => false,
                Some(ShotEnd::Terrain) => {
                    let back = if shot.speed > 0.0 { PI } else { 0.0 };
                    for _ in 0..4 {
                        self.sparks.push(Spark::new(
                            shot.pos,
                            gen_range(-0.5f32, 0.5) + back,
                            2.0 + gen_range(0.0f32, 1.0),
                            WHITE,
                        ));
                    }
                    false
                }
                Some(ShotEnd::HitPlayer) => {
                    self.transition.dead += 1;
                    tracing::info!(level = self.level, "player hit");
                    audio.play(Cue::Hit);
                    self.screenshake = self.screenshake.max(HIT_SHAKE);
                    self.hit_burst(player_rect.center());
                    false
                }
            }
        });
        self.shots = shots;
    }

    /// Sparks and dust thrown out from where the player was struck.
    fn hit_burst(&mut self, center: Vec2) {
        for _ in 0..BURST_COUNT {
            let angle = gen_range(0.0f32, TAU);
            let speed = gen_range(0.0f32, 5.0);
            self.sparks.push(Spark::new(center, angle, speed, WHITE));
            self.particles.push(Particle::new(
                ParticleKind::Dust,
                center,
                Vec2::from_angle(angle + PI) * speed * 0.5,
                gen_range(0, 8),
                &self.assets,
            ));
        }
    }

    fn update_projectiles(&mut self, audio: &mut dyn AudioSink, target: &mut dyn RenderTarget, offset: Vec2) {
        let mut projectiles = std::mem::take(&mut self.projectiles);
        projectiles.retain_mut(|p| {
            let kill = p.update(&self.tilemap, &self.enemy_rects);
            p.render(target, offset);
            let Some(kill) = kill else {
                return true;
            };

            let at = p.impact_point();
            for _ in 0..BURST_COUNT {
                self.sparks.push(Spark::new(
                    at,
                    gen_range(0.0f32, TAU),
                    gen_range(0.0f32, 5.0),
                    FIREBALL_COLOR,
                ));
            }
            if let Kill::Enemy(id) = kill {
                self.enemies.retain(|e| e.id() != id);
                self.enemy_rects.remove(&id);
                self.screenshake = self.screenshake.max(HIT_SHAKE);
                tracing::debug!(enemy = id.0, left = self.enemies.len(), "enemy killed");
            }
            audio.play(Cue::Explosion);
            false
        });
        self.projectiles = projectiles;
    }

    fn update_effects(&mut self, target: &mut dyn RenderTarget, offset: Vec2) {
        self.sparks.retain_mut(|s| {
            let kill = s.update();
            s.render(target, offset);
            !kill
        });

        self.particles.retain_mut(|p| {
            let kill = p.update();
            p.render(target, offset);
            if p.kind() == ParticleKind::Leaf {
                p.sway();
            }
            !kill
        });
    }

    fn handle_event(&mut self, event: InputEvent, audio: &mut dyn AudioSink) {
        match event {
            InputEvent::Fire => {
                if self.player.attacking {
                    return;
                }
                self.player.attack();
                audio.play(Cue::Fireball);
                let (spawn, dir) = if self.player.body.flip {
                    (FIREBALL_SPAWN_LEFT, -1.0)
                } else {
                    (FIREBALL_SPAWN_RIGHT, 1.0)
                };
                self.projectiles.push(Projectile::new(
                    self.player.body.pos + spawn,
                    vec2(FIREBALL_SPEED * dir, 0.0),
                    &self.assets,
                ));
            }
            InputEvent::Pressed(Key::Jump) => {
                if self.player.jump() {
                    audio.play(Cue::Jump);
                }
            }
            other => self.movement.apply(other),
        }
    }

    /// Asset registry.
    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    /// Level directory.
    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    /// Index of the current level.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Number of level loads so far, the initial one included.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current level map, without spawn markers.
    pub fn tilemap(&self) -> &Tilemap {
        &self.tilemap
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The player, mutably.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Held movement keys.
    pub fn movement(&self) -> Movement {
        self.movement
    }

    /// Live goblins.
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Live goblins, mutably.
    pub fn enemies_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.enemies
    }

    /// Goblin hit boxes as of the last enemy update.
    pub fn enemy_rects(&self) -> &BTreeMap<EnemyId, Rect> {
        &self.enemy_rects
    }

    /// Arrows in flight.
    pub fn shots(&self) -> &[EnemyShot] {
        &self.shots
    }

    /// Arrows in flight, mutably.
    pub fn shots_mut(&mut self) -> &mut Vec<EnemyShot> {
        &mut self.shots
    }

    /// Fireballs in flight.
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Live particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Live sparks.
    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    /// Canopies that shed leaves.
    pub fn leaf_zones(&self) -> &[Rect] {
        &self.leaf_zones
    }

    /// Smoothed camera position.
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Frames of shake left.
    pub fn screenshake(&self) -> u32 {
        self.screenshake
    }

    /// Wipe and death timing.
    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Wipe and death timing, mutably.
    pub fn transition_mut(&mut self) -> &mut Transition {
        &mut self.transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueRecorder;
    use crate::render::{DrawCall, HeadlessTarget};
    use crate::spatial::GridPos;
    use crate::tile::TileKind;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("goblin_grove_game_{nanos}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// A floor along row 5, player start at (2,4), one goblin at (8,4).
    fn arena(with_enemy: bool) -> Tilemap {
        let mut map = Tilemap::new(16);
        for x in 0..12 {
            map.set_tile(GridPos::new(x, 5), TileKind::Stone, 1);
        }
        map.set_tile(GridPos::new(2, 4), TileKind::Spawners, 0);
        if with_enemy {
            map.set_tile(GridPos::new(8, 4), TileKind::Spawners, 1);
        }
        map.push_offgrid(TileKind::LargeDecor, 2, vec2(120.0, 10.0));
        map
    }

    fn game_with(levels: &[Tilemap]) -> (Game, PathBuf) {
        let dir = temp_dir();
        for (i, map) in levels.iter().enumerate() {
            map.save(&dir.join(format!("{i}.json"))).unwrap();
        }
        let config = Config {
            maps_dir: dir.clone(),
            cloud_count: 3,
            ..Config::default()
        };
        (Game::new(Assets::placeholder(), &config).unwrap(), dir)
    }

    #[test]
    fn load_places_player_and_enemies_from_markers() {
        let (game, _) = game_with(&[arena(true)]);
        assert_eq!(game.generation(), 1);
        assert_eq!(game.player().body.pos, vec2(32.0, 64.0));
        assert_eq!(game.enemies().len(), 1);
        assert_eq!(game.enemies()[0].body.pos, vec2(128.0, 64.0));
        assert_eq!(game.leaf_zones().len(), 1);
        assert_eq!(game.tilemap().tile_count(), 12);
        assert_eq!(game.transition().counter, -TRANSITION_SPAN);
    }

    #[test]
    fn missing_first_level_starts_empty() {
        let dir = temp_dir();
        let config = Config {
            maps_dir: dir.join("none"),
            ..Config::default()
        };
        let game = Game::new(Assets::placeholder(), &config).unwrap();
        assert_eq!(game.tilemap().tile_count(), 0);
        assert_eq!(game.player().body.pos, PLAYER_START);
        assert!(game.enemies().is_empty());
    }

    #[test]
    fn malformed_first_level_is_fatal() {
        let dir = temp_dir();
        fs::write(dir.join("0.json"), "{ not json").unwrap();
        let config = Config {
            maps_dir: dir,
            ..Config::default()
        };
        assert!(matches!(
            Game::new(Assets::placeholder(), &config),
            Err(LevelError::Json { .. })
        ));
    }

    #[test]
    fn enemy_rects_track_live_enemies_each_frame() {
        let (mut game, _) = game_with(&[arena(true)]);
        let mut target = HeadlessTarget::new(vec2(320.0, 240.0));
        game.frame(&[], &mut CueRecorder::default(), &mut target).unwrap();

        let id = game.enemies()[0].id();
        assert_eq!(game.enemy_rects().get(&id), Some(&game.enemies()[0].rect()));
    }

    #[test]
    fn fireball_kills_enemy_and_explodes() {
        let (mut game, _) = game_with(&[arena(true)]);
        let mut audio = CueRecorder::default();
        let mut target = HeadlessTarget::new(vec2(320.0, 240.0));

        let enemy = game.enemies()[0].rect();
        game.projectiles.push(Projectile::new(
            vec2(enemy.x - 30.0, enemy.y),
            vec2(FIREBALL_SPEED, 0.0),
            &game.assets,
        ));
        let out = game.frame(&[], &mut audio, &mut target).unwrap();

        assert!(game.enemies().is_empty());
        assert!(game.enemy_rects().is_empty());
        assert!(game.projectiles().is_empty());
        assert_eq!(game.screenshake(), HIT_SHAKE);
        assert_eq!(audio.count(Cue::Explosion), 1);
        assert!(!game.sparks().is_empty());

        let FrameOutcome::Present { shake } = out else {
            panic!("frame was not presented");
        };
        let bound = HIT_SHAKE as f32 / 2.0;
        assert!(shake.x.abs() <= bound && shake.y.abs() <= bound);
    }

    #[test]
    fn shake_is_zero_when_calm() {
        let (mut game, _) = game_with(&[arena(false)]);
        let mut target = HeadlessTarget::new(vec2(320.0, 240.0));
        let out = game.frame(&[], &mut CueRecorder::default(), &mut target).unwrap();
        assert_eq!(out, FrameOutcome::Present { shake: Vec2::ZERO });
    }

    #[test]
    fn large_canopy_sheds_a_leaf_every_frame() {
        let (mut game, _) = game_with(&[arena(false)]);
        let mut target = HeadlessTarget::new(vec2(320.0, 240.0));
        game.leaf_zones = vec![Rect::new(0.0, 0.0, 250.0, 200.0)];

        game.frame(&[], &mut CueRecorder::default(), &mut target).unwrap();
        game.frame(&[], &mut CueRecorder::default(), &mut target).unwrap();

        let leaves: Vec<_> = game
            .particles()
            .iter()
            .filter(|p| p.kind() == ParticleKind::Leaf)
            .collect();
        assert_eq!(leaves.len(), 2);
        let zone = game.leaf_zones()[0];
        assert!(leaves.iter().all(|p| p.pos.y >= zone.y && p.pos.y <= zone.bottom() + 1.0));
    }

    #[test]
    fn missing_level_after_the_first_is_an_error() {
        let (mut game, dir) = game_with(&[arena(false)]);
        fs::write(dir.join("notes.txt"), "not a level").unwrap();
        assert_eq!(game.levels().count(), 2);

        game.transition_mut().counter = 0;
        let mut result = Ok(());
        for _ in 0..=TRANSITION_SPAN {
            result = game.tick_transition();
            if result.is_err() {
                break;
            }
        }

        assert!(matches!(result, Err(ref e) if e.is_not_found()));
        assert_eq!(game.level(), 0);
    }

    #[test]
    fn arrow_hit_starts_dying() {
        let (mut game, _) = game_with(&[arena(true)]);
        let mut audio = CueRecorder::default();
        let mut target = HeadlessTarget::new(vec2(320.0, 240.0));

        // Park the goblin so it cannot fire on its own.
        game.enemies_mut()[0].walking = 0;
        let center = game.player().body.rect().center();
        game.shots.push(EnemyShot::new(center - vec2(1.5, 0.0), 1.5, false));
        game.frame(&[], &mut audio, &mut target).unwrap();

        assert!(game.transition().is_dying());
        assert!(game.shots().is_empty());
        assert_eq!(audio.count(Cue::Hit), 1);
        assert_eq!(game.screenshake(), HIT_SHAKE);
        assert_eq!(game.particles().iter().filter(|p| p.kind() == ParticleKind::Dust).count(), BURST_COUNT);
    }

    #[test]
    fn fire_spawns_one_fireball_per_attack() {
        let (mut game, _) = game_with(&[arena(true)]);
        let mut audio = CueRecorder::default();
        let mut target = HeadlessTarget::new(vec2(320.0, 240.0));

        game.frame(&[InputEvent::Fire, InputEvent::Fire], &mut audio, &mut target)
            .unwrap();

        assert!(game.player().attacking);
        assert_eq!(game.projectiles().len(), 1);
        assert_eq!(audio.count(Cue::Fireball), 1);
        let p = &game.projectiles()[0];
        assert_eq!(p.velocity, vec2(FIREBALL_SPEED, 0.0));
        assert_eq!(p.pos, game.player().body.pos + FIREBALL_SPAWN_RIGHT);
    }

    #[test]
    fn movement_keys_and_jump() {
        let (mut game, _) = game_with(&[arena(true)]);
        let mut audio = CueRecorder::default();
        let mut target = HeadlessTarget::new(vec2(320.0, 240.0));

        game.frame(
            &[InputEvent::Pressed(Key::Right), InputEvent::Pressed(Key::Jump)],
            &mut audio,
            &mut target,
        )
        .unwrap();
        assert_eq!(game.movement().axis(), 1.0);
        assert_eq!(game.player().jumps, 1);
        assert_eq!(audio.played, vec![Cue::Jump]);

        game.frame(&[InputEvent::Released(Key::Right)], &mut audio, &mut target)
            .unwrap();
        assert_eq!(game.movement().axis(), 0.0);
    }

    #[test]
    fn quit_abandons_the_frame_before_the_wipe() {
        let (mut game, _) = game_with(&[arena(true)]);
        let mut target = HeadlessTarget::new(vec2(320.0, 240.0));
        let out = game
            .frame(&[InputEvent::Quit, InputEvent::Fire], &mut CueRecorder::default(), &mut target)
            .unwrap();
        assert_eq!(out, FrameOutcome::Quit);
        assert!(game.projectiles().is_empty());
        assert_eq!(target.circle_masks().count(), 0);
    }

    #[test]
    fn opening_wipe_is_drawn_last_then_disappears() {
        let (mut game, _) = game_with(&[arena(true)]);
        let mut target = HeadlessTarget::new(vec2(320.0, 240.0));
        let mut audio = CueRecorder::default();

        game.frame(&[], &mut audio, &mut target).unwrap();
        assert!(matches!(target.calls.first(), Some(DrawCall::Image { .. })));
        assert_eq!(
            target.calls.last(),
            Some(&DrawCall::CircleMask {
                center: vec2(160.0, 120.0),
                radius: 8.0
            })
        );

        for _ in 0..TRANSITION_SPAN {
            target.clear();
            game.frame(&[], &mut audio, &mut target).unwrap();
        }
        assert_eq!(game.transition().counter, 0);
        assert_eq!(target.circle_masks().count(), 0);
    }

    #[test]
    fn camera_eases_toward_player() {
        let (mut game, _) = game_with(&[arena(true)]);
        let mut target = HeadlessTarget::new(vec2(320.0, 240.0));
        game.frame(&[], &mut CueRecorder::default(), &mut target).unwrap();

        let wanted = game.player().body.center() - vec2(160.0, 120.0);
        let scroll = game.scroll();
        assert!(scroll.x > wanted.x && scroll.x < 0.0);
        assert!((scroll.x - wanted.x / CAMERA_SMOOTHING).abs() < 0.1);
    }

    #[test]
    fn clearing_with_no_more_levels_reloads_the_last() {
        let (mut game, _) = game_with(&[arena(false)]);
        game.transition_mut().counter = 0;
        for _ in 0..=TRANSITION_SPAN {
            game.tick_transition().unwrap();
        }
        assert_eq!(game.level(), 0);
        assert_eq!(game.generation(), 2);
        assert_eq!(game.transition().counter, -TRANSITION_SPAN);
    }
}
