//! The bird: vertical physics, tilt and the wing cycle.

use bevy::math::Vec2;

use crate::common::tunables::{Hitbox, Tunables};
use crate::sim::collision::BirdShape;

/// Tilt the bird bottoms out at when falling.
pub const NOSEDIVE_DEG: f32 = -90.0;
/// Below this tilt the wings stop flapping.
const DIVE_WINGS_DEG: f32 = -80.0;
/// The bird keeps its nose up until it has dropped this far below its last jump.
const TILT_HOLD_PX: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WingFrame {
    #[default]
    Up,
    Level,
    Down,
}

const WING_CYCLE: [WingFrame; 4] = [WingFrame::Up, WingFrame::Level, WingFrame::Down, WingFrame::Level];
const LEVEL_CURSOR: usize = 1;

/// A screen edge the bird was clamped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Ground,
    Ceiling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdPhysics {
    pub gravity: f32,
    pub jump_impulse: f32,
    pub terminal_velocity: f32,
    pub wing_frame_secs: f32,
    pub max_tilt_deg: f32,
    pub tilt_speed_deg: f32,
    pub hitbox: Hitbox,
}

impl From<&Tunables> for BirdPhysics {
    fn from(t: &Tunables) -> Self {
        Self {
            gravity: t.gravity,
            jump_impulse: t.jump_impulse,
            terminal_velocity: t.terminal_velocity,
            wing_frame_secs: t.wing_frame_secs,
            max_tilt_deg: t.max_tilt_deg,
            tilt_speed_deg: t.tilt_speed_deg,
            hitbox: t.bird_hitbox,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Horizontal center. Constant: the world scrolls past the bird.
    pub x: f32,
    /// Vertical center, growing downward.
    pub y: f32,
    pub velocity: f32,
    tilt_deg: f32,
    jump_y: f32,
    wing_cursor: usize,
    wing_timer: f32,
    physics: BirdPhysics,
}

impl Bird {
    pub fn new(x: f32, y: f32, physics: BirdPhysics) -> Self {
        Self {
            x,
            y,
            velocity: 0.0,
            tilt_deg: 0.0,
            jump_y: y,
            wing_cursor: 0,
            wing_timer: 0.0,
            physics,
        }
    }

    pub fn from_tunables(t: &Tunables) -> Self {
        Self::new(t.bird_x, t.bird_start_y, BirdPhysics::from(t))
    }

    /// Accelerate downward, never past terminal velocity.
    pub fn apply_gravity(&mut self, dt: f32) {
        if self.velocity < self.physics.terminal_velocity {
            self.velocity = (self.velocity + self.physics.gravity * dt).min(self.physics.terminal_velocity);
        }
    }

    /// Replace the current velocity with the jump impulse.
    pub fn jump(&mut self) {
        self.velocity = self.physics.jump_impulse;
        self.jump_y = self.y;
    }

    pub fn advance_animation(&mut self, dt: f32) {
        if self.tilt_deg <= DIVE_WINGS_DEG {
            self.wing_cursor = LEVEL_CURSOR;
            self.wing_timer = 0.0;
            return;
        }

        self.wing_timer += dt;
        while self.wing_timer >= self.physics.wing_frame_secs {
            self.wing_timer -= self.physics.wing_frame_secs;
            self.wing_cursor = (self.wing_cursor + 1) % WING_CYCLE.len();
        }
    }

    /// Integrate position over `dt` and clamp to the playfield.
    ///
    /// Touching the ground is reported so the collision pass picks it up; the
    /// ceiling only clamps and cancels upward speed.
    pub fn position_after(&mut self, dt: f32, ground_y: f32) -> Option<Boundary> {
        self.y += self.velocity * dt;

        let half_height = self.physics.hitbox.half_extents().y;
        if self.y + half_height >= ground_y {
            self.y = ground_y - half_height;
            Some(Boundary::Ground)
        } else if self.y - half_height < 0.0 {
            self.y = half_height;
            self.velocity = self.velocity.max(0.0);
            Some(Boundary::Ceiling)
        } else {
            None
        }
    }

    pub fn update_tilt(&mut self, dt: f32) {
        if self.velocity < 0.0 || self.y < self.jump_y + TILT_HOLD_PX {
            self.tilt_deg = self.tilt_deg.max(self.physics.max_tilt_deg);
        } else if self.tilt_deg > NOSEDIVE_DEG {
            self.tilt_deg = (self.tilt_deg - self.physics.tilt_speed_deg * dt).max(NOSEDIVE_DEG);
        }
    }

    /// Nose-up positive, in degrees.
    pub fn tilt_deg(&self) -> f32 {
        self.tilt_deg
    }

    pub fn wing_frame(&self) -> WingFrame {
        WING_CYCLE[self.wing_cursor]
    }

    pub fn half_extents(&self) -> Vec2 {
        self.physics.hitbox.half_extents()
    }

    pub fn bounds(&self) -> BirdShape {
        BirdShape::new(Vec2::new(self.x, self.y), self.physics.hitbox)
    }
}
