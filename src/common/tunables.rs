//! Tunable gameplay constants.
//!
//! All positions are screen-space pixels with the origin in the top-left corner and
//! y growing downward. Durations are seconds, speeds are pixels per second.

use std::ops::RangeInclusive;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::common::error::ConfigError;

/// Environment variable naming an optional JSON tunables file.
pub const TUNABLES_ENV: &str = "FLAPPY_TUNABLES";

/// Bounding shape used for the bird in collision tests.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Hitbox {
    Rect { half_width: f32, half_height: f32 },
    Circle { radius: f32 },
}

impl Hitbox {
    pub fn half_extents(self) -> Vec2 {
        match self {
            Self::Rect { half_width, half_height } => Vec2::new(half_width, half_height),
            Self::Circle { radius } => Vec2::splat(radius),
        }
    }
}

/// How the frame driver feeds delta time into the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Timestep {
    Fixed { hz: f64 },
    Variable,
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tunables {
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_y: f32,

    pub bird_x: f32,
    pub bird_start_y: f32,
    pub bird_hitbox: Hitbox,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub terminal_velocity: f32,
    pub wing_frame_secs: f32,
    pub max_tilt_deg: f32,
    pub tilt_speed_deg: f32,

    pub scroll_speed: f32,
    pub spawn_interval: f32,
    pub spawn_x: f32,
    pub pipe_width: f32,
    pub gap_height: f32,
    pub gap_top_margin: f32,
    pub gap_ground_margin: f32,
    pub ground_tile_width: f32,

    pub max_frame_delta: f32,
    pub timestep: Timestep,
    pub seed: Option<u64>,
    pub game_over_banner_secs: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            screen_width: 500.0,
            screen_height: 800.0,
            ground_y: 730.0,

            bird_x: 230.0,
            bird_start_y: 350.0,
            bird_hitbox: Hitbox::Rect { half_width: 30.0, half_height: 21.0 },
            gravity: 1800.0,
            jump_impulse: -540.0,
            terminal_velocity: 720.0,
            wing_frame_secs: 1.0 / 6.0,
            max_tilt_deg: 25.0,
            tilt_speed_deg: 600.0,

            scroll_speed: 150.0,
            spawn_interval: 360.0,
            spawn_x: 600.0,
            pipe_width: 104.0,
            gap_height: 200.0,
            gap_top_margin: 50.0,
            gap_ground_margin: 55.0,
            ground_tile_width: 672.0,

            max_frame_delta: 0.25,
            timestep: Timestep::Fixed { hz: 60.0 },
            seed: None,
            game_over_banner_secs: 3.0,
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value: f64::from(value) })
    }
}

impl Tunables {
    /// Read a JSON tunables file. Fields missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let tunables: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tunables.validate()?;
        Ok(tunables)
    }

    /// Load from the file named by [`TUNABLES_ENV`], or fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(TUNABLES_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                let tunables = Self::default();
                tunables.validate()?;
                Ok(tunables)
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive("ground_y", self.ground_y)?;

        finite("bird_x", self.bird_x)?;
        finite("bird_start_y", self.bird_start_y)?;
        match self.bird_hitbox {
            Hitbox::Rect { half_width, half_height } => {
                positive("bird_hitbox.half_width", half_width)?;
                positive("bird_hitbox.half_height", half_height)?;
            }
            Hitbox::Circle { radius } => positive("bird_hitbox.radius", radius)?,
        }
        positive("gravity", self.gravity)?;
        finite("jump_impulse", self.jump_impulse)?;
        if self.jump_impulse >= 0.0 {
            return Err(ConfigError::JumpNotUpward { value: self.jump_impulse });
        }
        positive("terminal_velocity", self.terminal_velocity)?;
        positive("wing_frame_secs", self.wing_frame_secs)?;
        finite("max_tilt_deg", self.max_tilt_deg)?;
        positive("tilt_speed_deg", self.tilt_speed_deg)?;

        positive("scroll_speed", self.scroll_speed)?;
        positive("spawn_interval", self.spawn_interval)?;
        finite("spawn_x", self.spawn_x)?;
        positive("pipe_width", self.pipe_width)?;
        positive("gap_height", self.gap_height)?;
        finite("gap_top_margin", self.gap_top_margin)?;
        finite("gap_ground_margin", self.gap_ground_margin)?;
        positive("ground_tile_width", self.ground_tile_width)?;

        positive("max_frame_delta", self.max_frame_delta)?;
        if let Timestep::Fixed { hz } = self.timestep {
            if !hz.is_finite() {
                return Err(ConfigError::NonFinite { field: "timestep.hz" });
            }
            if hz <= 0.0 {
                return Err(ConfigError::NonPositive { field: "timestep.hz", value: hz });
            }
        }
        positive("game_over_banner_secs", self.game_over_banner_secs)?;

        let gaps = self.gap_center_range();
        if gaps.start() > gaps.end() || self.gap_top_margin < 0.0 || self.gap_ground_margin < 0.0 {
            return Err(ConfigError::GapDoesNotFit {
                gap_height: self.gap_height,
                min: self.gap_top_margin,
                max: self.ground_y - self.gap_ground_margin,
            });
        }

        let half = self.bird_hitbox.half_extents();
        let inside_x = self.bird_x - half.x >= 0.0 && self.bird_x + half.x <= self.screen_width;
        let inside_y = self.bird_start_y - half.y >= 0.0 && self.bird_start_y + half.y < self.ground_y;
        if !inside_x || !inside_y {
            return Err(ConfigError::BirdOutOfBounds { x: self.bird_x, y: self.bird_start_y });
        }

        Ok(())
    }

    /// Range the gap center is sampled from when a pipe spawns.
    pub fn gap_center_range(&self) -> RangeInclusive<f32> {
        let half_gap = self.gap_height * 0.5;
        (self.gap_top_margin + half_gap)..=(self.ground_y - self.gap_ground_margin - half_gap)
    }
}
