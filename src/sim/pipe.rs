//! A single pipe pair.

use bevy::math::Vec2;
use bevy::math::bounding::Aabb2d;

/// Stable identity of a pipe within one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PipeId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub id: PipeId,
    /// Left edge.
    pub x: f32,
    pub gap_center: f32,
    pub gap_height: f32,
    pub width: f32,
    pub(crate) passed: bool,
}

impl Pipe {
    pub fn new(id: PipeId, x: f32, gap_center: f32, gap_height: f32, width: f32) -> Self {
        Self { id, x, gap_center, gap_height, width, passed: false }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_height * 0.5
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_height * 0.5
    }

    /// Whether the bird's right edge has already been counted for this pipe.
    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn overlaps_x(&self, min_x: f32, max_x: f32) -> bool {
        self.x <= max_x && self.right() >= min_x
    }

    /// The upper pipe, reaching from well above the screen down to the gap.
    pub fn top_bounds(&self, ground_y: f32) -> Aabb2d {
        Aabb2d {
            min: Vec2::new(self.x, -ground_y),
            max: Vec2::new(self.right(), self.gap_top()),
        }
    }

    /// The lower pipe, reaching from the gap down to the ground.
    pub fn bottom_bounds(&self, ground_y: f32) -> Aabb2d {
        Aabb2d {
            min: Vec2::new(self.x, self.gap_bottom()),
            max: Vec2::new(self.right(), ground_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_edges_follow_center() {
        let pipe = Pipe::new(PipeId(0), 800.0, 300.0, 150.0, 100.0);
        assert_eq!(pipe.gap_top(), 225.0);
        assert_eq!(pipe.gap_bottom(), 375.0);
        assert_eq!(pipe.right(), 900.0);
    }

    #[test]
    fn bounds_leave_the_gap_open() {
        let pipe = Pipe::new(PipeId(0), 800.0, 300.0, 150.0, 100.0);
        let top = pipe.top_bounds(600.0);
        let bottom = pipe.bottom_bounds(600.0);
        assert_eq!(top.max.y, 225.0);
        assert_eq!(bottom.min.y, 375.0);
        assert_eq!(bottom.max.y, 600.0);
        assert!(top.min.y < 0.0);
    }

    #[test]
    fn horizontal_overlap_is_inclusive() {
        let pipe = Pipe::new(PipeId(0), 100.0, 300.0, 150.0, 50.0);
        assert!(pipe.overlaps_x(150.0, 160.0));
        assert!(pipe.overlaps_x(80.0, 100.0));
        assert!(!pipe.overlaps_x(151.0, 160.0));
        assert!(!pipe.overlaps_x(0.0, 99.0));
    }
}
