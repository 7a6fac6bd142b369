//! One play session: the phase machine that owns bird, pipes, ground and score.
//!
//! ```text
//! Running --collision--> Collided --(next step, round replaced)--> Restarting --> Running
//! ```
//!
//! Collision is an ordinary transition, not an error. A session never ends on its
//! own; the host simply stops stepping it.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::common::error::ConfigError;
use crate::common::tunables::Tunables;
use crate::sim::bird::Bird;
use crate::sim::clock::Clock;
use crate::sim::collision::{self, CollisionCause};
use crate::sim::ground::Ground;
use crate::sim::obstacles::ObstacleManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Running,
    Collided,
    Restarting,
}

/// Everything that is thrown away on restart.
#[derive(Debug, Clone)]
pub struct Round {
    pub bird: Bird,
    pub obstacles: ObstacleManager,
    pub ground: Ground,
    pub score: u32,
}

impl Round {
    pub fn new(t: &Tunables) -> Self {
        Self {
            bird: Bird::from_tunables(t),
            obstacles: ObstacleManager::from_tunables(t),
            ground: Ground::new(t.ground_y, t.ground_tile_width),
            score: 0,
        }
    }
}

/// What happened during one [`Session::step`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Phase after the step.
    pub phase: Phase,
    pub jumped: bool,
    pub scored: u32,
    pub collision: Option<CollisionCause>,
    pub restarted: bool,
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub round: &'a Round,
    pub phase: Phase,
    pub best: u32,
    pub round_number: u32,
}

#[derive(Debug, Clone)]
pub struct Session {
    tunables: Tunables,
    rng: StdRng,
    clock: Clock,
    phase: Phase,
    round: Round,
    best: u32,
    round_number: u32,
}

impl Session {
    pub fn new(tunables: Tunables) -> Result<Self, ConfigError> {
        tunables.validate()?;

        let rng = match tunables.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            clock: Clock::new(tunables.max_frame_delta),
            round: Round::new(&tunables),
            phase: Phase::Running,
            best: 0,
            round_number: 1,
            rng,
            tunables,
        })
    }

    /// Advance the session by one frame.
    ///
    /// `jump` is the "pressed this frame" edge; it is ignored outside `Running`.
    pub fn step(&mut self, jump: bool, dt: f32) -> StepReport {
        let dt = self.clock.tick(dt);
        let mut report = StepReport::default();

        match self.phase {
            Phase::Running => self.run_frame(jump, dt, &mut report),
            Phase::Collided => {
                self.round = Round::new(&self.tunables);
                self.round_number += 1;
                self.phase = Phase::Restarting;
                report.restarted = true;
            }
            Phase::Restarting => self.phase = Phase::Running,
        }

        report.phase = self.phase;
        report
    }

    fn run_frame(&mut self, jump: bool, dt: f32, report: &mut StepReport) {
        let ground_y = self.tunables.ground_y;
        let round = &mut self.round;

        if jump {
            round.bird.jump();
            report.jumped = true;
        }
        round.bird.apply_gravity(dt);
        round.bird.position_after(dt, ground_y);
        round.bird.update_tilt(dt);
        round.bird.advance_animation(dt);

        let distance = round.obstacles.advance(dt);
        round.ground.advance(distance);
        round.obstacles.spawn_if_due(&mut self.rng);

        let shape = round.bird.bounds();
        let (min_x, max_x) = shape.x_range();
        report.collision = collision::detect(&shape, ground_y, round.obstacles.pipes_overlapping(min_x, max_x));

        if report.collision.is_some() {
            self.phase = Phase::Collided;
        } else {
            report.scored = round.obstacles.mark_passed(round.bird.x);
            round.score += report.scored;
        }
        // Only after scoring: a long step can carry a pipe past the bird and off screen at once.
        round.obstacles.prune();
        self.best = self.best.max(round.score);
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            round: &self.round,
            phase: self.phase,
            best: self.best,
            round_number: self.round_number,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.round.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tunables::Hitbox;
    use crate::sim::pipe::PipeId;
    use bevy::prelude::default;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn seeded() -> Tunables {
        Tunables { seed: Some(42), ..default() }
    }

    /// A wide-open course the bird cannot fail: huge gaps and almost no gravity.
    fn gentle() -> Tunables {
        Tunables {
            gravity: 0.001,
            gap_height: 600.0,
            gap_top_margin: 0.0,
            gap_ground_margin: 0.0,
            ..seeded()
        }
    }

    fn run_until_collision(session: &mut Session) -> StepReport {
        for _ in 0..10_000 {
            let report = session.step(false, DT);
            if report.collision.is_some() {
                return report;
            }
        }
        panic!("bird never collided");
    }

    #[test]
    fn rejects_bad_configuration() {
        let err = Session::new(Tunables { spawn_interval: -1.0, ..default() }).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "spawn_interval", .. }));
    }

    #[test]
    fn one_second_fall_from_rest() {
        let mut session = Session::new(Tunables {
            gravity: 20.0,
            bird_start_y: 300.0,
            ground_y: 600.0,
            max_frame_delta: 1.0,
            ..seeded()
        })
        .unwrap();

        let report = session.step(false, 1.0);
        let bird = &session.round().bird;
        assert_eq!(report.collision, None);
        assert_eq!(bird.y, 320.0);
        assert_eq!(bird.velocity, 20.0);
    }

    #[test]
    fn free_fall_ends_on_the_ground() {
        let mut session = Session::new(seeded()).unwrap();
        let report = run_until_collision(&mut session);
        assert_eq!(report.collision, Some(CollisionCause::Ground));
        assert_eq!(report.phase, Phase::Collided);
        assert_eq!(session.phase(), Phase::Collided);
    }

    #[test]
    fn restart_resets_the_round() {
        let tunables = seeded();
        let mut session = Session::new(tunables.clone()).unwrap();
        run_until_collision(&mut session);

        let report = session.step(true, DT);
        assert!(report.restarted);
        assert!(!report.jumped);
        assert_eq!(session.phase(), Phase::Restarting);

        let round = session.round();
        assert_eq!(round.bird.y, tunables.bird_start_y);
        assert_eq!(round.bird.x, tunables.bird_x);
        assert_eq!(round.bird.velocity, 0.0);
        assert_eq!(round.score, 0);
        assert!(round.obstacles.is_empty());
        assert_eq!(round.obstacles.travelled(), 0.0);
        assert_eq!(session.round_number(), 2);

        let report = session.step(false, DT);
        assert_eq!(report.phase, Phase::Running);
        assert!(!report.restarted);
    }

    #[test]
    fn jump_is_ignored_unless_running() {
        let mut session = Session::new(seeded()).unwrap();
        run_until_collision(&mut session);
        let y = session.round().bird.y;

        let report = session.step(true, DT);
        assert!(!report.jumped);
        assert_eq!(session.round().bird.velocity, 0.0);

        let report = session.step(true, DT);
        assert!(!report.jumped);
        assert_ne!(y, session.round().bird.y);
        assert_eq!(session.round().bird.velocity, 0.0);
    }

    #[test]
    fn jump_lifts_the_bird() {
        let mut session = Session::new(seeded()).unwrap();
        let start = session.round().bird.y;
        let report = session.step(true, DT);
        assert!(report.jumped);
        assert!(session.round().bird.y < start);
    }

    #[test]
    fn gentle_course_scores_every_pipe_once() {
        let mut session = Session::new(gentle()).unwrap();
        let mut passed: Vec<PipeId> = Vec::new();

        for _ in 0..60 * 30 {
            let report = session.step(false, DT);
            assert_eq!(report.collision, None);
            assert!(report.scored <= 1);

            for pipe in session.round().obstacles.pipes().filter(|p| p.passed()) {
                if !passed.contains(&pipe.id) {
                    passed.push(pipe.id);
                }
            }
            assert_eq!(session.score() as usize, passed.len());
        }

        assert!(session.score() >= 5, "score {}", session.score());
        assert_eq!(session.best(), session.score());
    }

    #[test]
    fn pipe_leaving_the_screen_in_one_step_still_scores() {
        // 40 px of scroll per step against a bird only 20 px from the left edge:
        // a pipe's right edge goes from 24 (not yet passed) to -16 (off screen).
        let mut session = Session::new(Tunables {
            bird_x: 20.0,
            bird_hitbox: Hitbox::Rect { half_width: 10.0, half_height: 10.0 },
            scroll_speed: 200.0,
            ..gentle()
        })
        .unwrap();

        let mut scored = 0;
        for _ in 0..200 {
            let report = session.step(false, 0.2);
            assert_eq!(report.collision, None);
            scored += report.scored;
        }

        // First pipe spawns after 9 steps, then one every 9; each needs 18 steps to reach x < 0.
        assert!(session.score() >= 15, "score {}", session.score());
        assert_eq!(scored, session.score());
    }

    #[test]
    fn best_score_survives_restart() {
        let mut session = Session::new(gentle()).unwrap();
        while session.score() < 2 {
            session.step(false, DT);
        }
        session.round.bird.y = session.tunables().ground_y;
        let report = session.step(false, DT);
        assert_eq!(report.collision, Some(CollisionCause::Ground));

        session.step(false, DT);
        assert_eq!(session.score(), 0);
        assert_eq!(session.best(), 2);
        assert_eq!(session.snapshot().best, 2);
    }

    #[test]
    fn same_seed_same_course() {
        let mut a = Session::new(gentle()).unwrap();
        let mut b = Session::new(gentle()).unwrap();
        for _ in 0..600 {
            a.step(false, DT);
            b.step(false, DT);
        }
        let gaps_a: Vec<f32> = a.round().obstacles.pipes().map(|p| p.gap_center).collect();
        let gaps_b: Vec<f32> = b.round().obstacles.pipes().map(|p| p.gap_center).collect();
        assert!(!gaps_a.is_empty());
        assert_eq!(gaps_a, gaps_b);
    }

    #[test]
    fn circle_hitbox_plays_the_same_loop() {
        let mut session = Session::new(Tunables {
            bird_hitbox: Hitbox::Circle { radius: 18.0 },
            ..seeded()
        })
        .unwrap();
        let report = run_until_collision(&mut session);
        assert_eq!(report.collision, Some(CollisionCause::Ground));
        assert_eq!(session.round().bird.y, session.tunables().ground_y - 18.0);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut session = Session::new(seeded()).unwrap();
        session.step(false, DT);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.round_number, 1);
        assert_eq!(snapshot.round.score, 0);
        assert_eq!(session.clock().frames(), 1);
    }

    proptest! {
        #[test]
        fn score_never_double_counts(frame_ms in 5u32..60, frames in 100usize..1_500) {
            let mut session = Session::new(gentle()).unwrap();
            let dt = frame_ms as f32 / 1000.0;
            let mut total = 0;
            for _ in 0..frames {
                total += session.step(false, dt).scored;
            }
            prop_assert_eq!(total, session.score());
            let unpassed_left_of_bird = session
                .round()
                .obstacles
                .pipes()
                .filter(|p| !p.passed() && p.right() < session.round().bird.x)
                .count();
            prop_assert_eq!(unpassed_left_of_bird, 0);
        }
    }
}
