//! Collision detection.
//!
//! A pure predicate over one frame's state: the bird's bounding shape, the ground
//! line and the pipes near the bird. The ground is tested first since it is a
//! single comparison.

use bevy::math::Vec2;
use bevy::math::bounding::{Aabb2d, BoundingCircle, IntersectsVolume};

use crate::common::tunables::Hitbox;
use crate::sim::pipe::Pipe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionCause {
    Ground,
    PipeTop,
    PipeBottom,
}

/// The bird's bounding volume in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BirdShape {
    Rect(Aabb2d),
    Circle(BoundingCircle),
}

impl BirdShape {
    pub fn new(center: Vec2, hitbox: Hitbox) -> Self {
        match hitbox {
            Hitbox::Rect { half_width, half_height } => {
                Self::Rect(Aabb2d::new(center, Vec2::new(half_width, half_height)))
            }
            Hitbox::Circle { radius } => Self::Circle(BoundingCircle::new(center, radius)),
        }
    }

    pub fn bottom(&self) -> f32 {
        match self {
            Self::Rect(aabb) => aabb.max.y,
            Self::Circle(circle) => circle.center.y + circle.radius(),
        }
    }

    /// Horizontal extent as `(min_x, max_x)`.
    pub fn x_range(&self) -> (f32, f32) {
        match self {
            Self::Rect(aabb) => (aabb.min.x, aabb.max.x),
            Self::Circle(circle) => (circle.center.x - circle.radius(), circle.center.x + circle.radius()),
        }
    }

    pub fn intersects(&self, aabb: &Aabb2d) -> bool {
        match self {
            Self::Rect(own) => own.intersects(aabb),
            Self::Circle(circle) => circle.intersects(aabb),
        }
    }
}

/// Test the bird against the ground, then against each pipe's upper and lower half.
///
/// `pipes` is expected to be the pipes overlapping the bird horizontally; passing
/// more is harmless, only slower.
pub fn detect<'a>(
    bird: &BirdShape,
    ground_y: f32,
    pipes: impl IntoIterator<Item = &'a Pipe>,
) -> Option<CollisionCause> {
    if bird.bottom() >= ground_y {
        return Some(CollisionCause::Ground);
    }

    pipes.into_iter().find_map(|pipe| {
        if bird.intersects(&pipe.top_bounds(ground_y)) {
            Some(CollisionCause::PipeTop)
        } else if bird.intersects(&pipe.bottom_bounds(ground_y)) {
            Some(CollisionCause::PipeBottom)
        } else {
            None
        }
    })
}
