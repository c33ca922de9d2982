//! Short-lived visual and combat objects owned by the game loop.

mod clouds;
mod particle;
mod projectile;
mod spark;

pub use clouds::{Cloud, Clouds};
pub use particle::{Particle, ParticleKind};
pub use projectile::{EnemyShot, Kill, Projectile, ShotEnd, SHOT_LIFETIME};
pub use spark::Spark;
