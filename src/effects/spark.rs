use std::f32::consts::FRAC_PI_2;
use std::f32::consts::PI;

use macroquad::prelude::*;

use crate::render::RenderTarget;

const DECAY: f32 = 0.1;

/// A streak that flies along `angle` and slows to a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    /// Centre.
    pub pos: Vec2,
    /// Heading in radians.
    pub angle: f32,
    /// Distance per frame; also sets the streak length.
    pub speed: f32,
    /// Fill colour.
    pub color: Color,
}

impl Spark {
    /// A spark at full speed.
    pub fn new(pos: Vec2, angle: f32, speed: f32, color: Color) -> Self {
        Spark {
            pos,
            angle,
            speed,
            color,
        }
    }

    /// Returns `true` once the spark has stopped.
    pub fn update(&mut self) -> bool {
        self.pos += Vec2::from_angle(self.angle) * self.speed;
        self.speed = (self.speed - DECAY).max(0.0);
        self.speed == 0.0
    }

    /// Diamond stretched along the direction of travel.
    pub fn points(&self, offset: Vec2) -> [Vec2; 4] {
        let at = |angle: f32, len: f32| self.pos + Vec2::from_angle(angle) * len - offset;
        [
            at(self.angle, self.speed * 3.0),
            at(self.angle + FRAC_PI_2, self.speed * 0.5),
            at(self.angle + PI, self.speed * 3.0),
            at(self.angle - FRAC_PI_2, self.speed * 0.5),
        ]
    }

    /// Fill the streak polygon.
    pub fn render(&self, target: &mut dyn RenderTarget, offset: Vec2) {
        target.draw_polygon(&self.points(offset), self.color);
    }
}
