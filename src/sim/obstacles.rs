//! Obstacle manager: spawns, scrolls and retires pipes.
//!
//! Spawning is driven by scrolled distance rather than wall-clock time, so the
//! spacing between pipes does not depend on the frame rate. When a step overshoots
//! the spawn interval, the new pipe is placed as if it had spawned at the exact
//! moment the interval was reached.

use std::collections::VecDeque;
use std::collections::vec_deque;
use std::ops::RangeInclusive;

use rand::Rng;

use crate::common::tunables::Tunables;
use crate::sim::pipe::{Pipe, PipeId};

#[derive(Debug, Clone, PartialEq)]
pub struct PipeLayout {
    pub spawn_x: f32,
    pub spawn_interval: f32,
    pub scroll_speed: f32,
    pub width: f32,
    pub gap_height: f32,
    pub gap_centers: RangeInclusive<f32>,
}

impl From<&Tunables> for PipeLayout {
    fn from(t: &Tunables) -> Self {
        Self {
            spawn_x: t.spawn_x,
            spawn_interval: t.spawn_interval,
            scroll_speed: t.scroll_speed,
            width: t.pipe_width,
            gap_height: t.gap_height,
            gap_centers: t.gap_center_range(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ObstacleManager {
    layout: PipeLayout,
    /// Oldest (leftmost) first.
    pipes: VecDeque<Pipe>,
    /// Distance scrolled since the last spawn.
    travelled: f32,
    next_id: u64,
}

impl ObstacleManager {
    pub fn new(layout: PipeLayout) -> Self {
        Self { layout, pipes: VecDeque::new(), travelled: 0.0, next_id: 0 }
    }

    pub fn from_tunables(t: &Tunables) -> Self {
        Self::new(PipeLayout::from(t))
    }

    /// Scroll every pipe left and return the distance covered.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let distance = self.layout.scroll_speed * dt;
        for pipe in &mut self.pipes {
            pipe.x -= distance;
        }
        self.travelled += distance;
        distance
    }

    /// Append a pipe for every full spawn interval scrolled. Returns how many spawned.
    pub fn spawn_if_due<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let mut spawned = 0;
        while self.travelled >= self.layout.spawn_interval {
            self.travelled -= self.layout.spawn_interval;

            let gap_center = rng.gen_range(self.layout.gap_centers.clone());
            let id = PipeId(self.next_id);
            self.next_id += 1;

            self.pipes.push_back(Pipe::new(
                id,
                self.layout.spawn_x - self.travelled,
                gap_center,
                self.layout.gap_height,
                self.layout.width,
            ));
            spawned += 1;
        }
        spawned
    }

    /// Drop pipes that have fully left the screen. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.pipes.len();
        self.pipes.retain(|pipe| pipe.right() >= 0.0);
        before - self.pipes.len()
    }

    /// Pipes whose horizontal extent intersects `[min_x, max_x]`.
    ///
    /// Each call starts a fresh pass over the current pipes.
    pub fn pipes_overlapping(&self, min_x: f32, max_x: f32) -> impl Iterator<Item = &Pipe> + '_ {
        self.pipes.iter().filter(move |pipe| pipe.overlaps_x(min_x, max_x))
    }

    /// Flag pipes whose right edge is now left of `bird_x`. Each pipe counts once.
    pub fn mark_passed(&mut self, bird_x: f32) -> u32 {
        let mut newly_passed = 0;
        for pipe in self.pipes.iter_mut().filter(|pipe| !pipe.passed) {
            if pipe.right() < bird_x {
                pipe.passed = true;
                newly_passed += 1;
            }
        }
        newly_passed
    }

    pub fn pipes(&self) -> vec_deque::Iter<'_, Pipe> {
        self.pipes.iter()
    }

    pub fn get(&self, id: PipeId) -> Option<&Pipe> {
        self.pipes.iter().find(|pipe| pipe.id == id)
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    pub fn travelled(&self) -> f32 {
        self.travelled
    }
}
