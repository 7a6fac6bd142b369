//! Simulation clock.

/// Tracks elapsed simulation time and hands out the delta for each step.
#[derive(Debug, Clone, PartialEq)]
pub struct Clock {
    max_delta: f32,
    elapsed: f32,
    frames: u64,
}

impl Clock {
    pub fn new(max_delta: f32) -> Self {
        Self { max_delta, elapsed: 0.0, frames: 0 }
    }

    /// Record one frame and return the delta the step should integrate over.
    ///
    /// Non-finite or negative deltas become zero; hitches longer than `max_delta`
    /// are clamped so a stalled window cannot tunnel the bird through a pipe.
    pub fn tick(&mut self, dt: f32) -> f32 {
        let dt = if dt.is_finite() { dt.clamp(0.0, self.max_delta) } else { 0.0 };
        self.elapsed += dt;
        self.frames += 1;
        dt
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_normal_deltas_through() {
        let mut clock = Clock::new(0.25);
        assert_eq!(clock.tick(0.1), 0.1);
        assert_eq!(clock.tick(0.05), 0.05);
        assert!((clock.elapsed() - 0.15).abs() < 1e-6);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn clamps_hitches_and_garbage() {
        let mut clock = Clock::new(0.25);
        assert_eq!(clock.tick(3.0), 0.25);
        assert_eq!(clock.tick(-1.0), 0.0);
        assert_eq!(clock.tick(f32::NAN), 0.0);
        assert_eq!(clock.tick(f32::INFINITY), 0.0);
        assert_eq!(clock.elapsed(), 0.25);
        assert_eq!(clock.frames(), 4);
    }
}
