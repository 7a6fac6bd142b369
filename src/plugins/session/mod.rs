//! Session plugin: play sessions as components.
//!
//! A `Session` is an ordinary owned value; wrapping it in a component lets any
//! number of sessions live side by side (the player's, a replay, an attract-mode
//! demo) without sharing state. Exactly one of them is normally `Controlled` and
//! receives the jump latch.
//!
//! ```text
//! Update:             input::gather_jump -> JumpLatch
//! FixedUpdate/Update: step sessions (SessionStep) -> SessionEvent messages
//! Update:             log_session_events, HUD
//! ```
//!
//! Which schedule steps the sessions is chosen once at build time from
//! `Tunables::timestep`.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::AppState;
use crate::common::tunables::{Timestep, Tunables};
use crate::plugins::input::{self, JumpLatch};
use crate::sim::{CollisionCause, Session, StepReport};

#[derive(Component, Debug, Deref, DerefMut)]
pub struct ActiveSession(pub Session);

/// Marker: this session receives player input and is the one drawn on screen.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Controlled;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEventKind {
    Jumped,
    Scored { score: u32 },
    Collided { cause: CollisionCause, score: u32 },
    Restarted { round: u32 },
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionEvent {
    pub session: Entity,
    pub kind: SessionEventKind,
}

/// Systems that advance sessions. Readers of session state order after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionStep;

pub fn plugin(app: &mut App) {
    let timestep = app.world().resource::<Tunables>().timestep;

    app.add_message::<SessionEvent>()
        .add_systems(OnEnter(AppState::Playing), spawn_player_session)
        .add_systems(Update, log_session_events.after(SessionStep));

    match timestep {
        Timestep::Fixed { hz } => {
            app.insert_resource(Time::<Fixed>::from_hz(hz));
            app.add_systems(
                FixedUpdate,
                step_fixed
                    .in_set(SessionStep)
                    .run_if(in_state(AppState::Playing)),
            );
        }
        Timestep::Variable => {
            app.add_systems(
                Update,
                step_variable
                    .in_set(SessionStep)
                    .after(input::gather_jump)
                    .run_if(in_state(AppState::Playing)),
            );
        }
    }
}

fn spawn_player_session(mut commands: Commands, tunables: Res<Tunables>) -> Result {
    let session = Session::new(tunables.clone())?;
    info!(seed = ?tunables.seed, "Game started");

    commands.spawn((
        Name::new("PlayerSession"),
        ActiveSession(session),
        Controlled,
        DespawnOnExit(AppState::Playing),
    ));
    Ok(())
}

pub fn step_fixed(
    time: Res<Time<Fixed>>,
    mut latch: ResMut<JumpLatch>,
    mut sessions: Query<(Entity, &mut ActiveSession, Has<Controlled>)>,
    mut events: MessageWriter<SessionEvent>,
) {
    advance_sessions(time.timestep().as_secs_f32(), &mut latch, &mut sessions, &mut events);
}

pub fn step_variable(
    time: Res<Time>,
    mut latch: ResMut<JumpLatch>,
    mut sessions: Query<(Entity, &mut ActiveSession, Has<Controlled>)>,
    mut events: MessageWriter<SessionEvent>,
) {
    advance_sessions(time.delta_secs(), &mut latch, &mut sessions, &mut events);
}

fn advance_sessions(
    dt: f32,
    latch: &mut JumpLatch,
    sessions: &mut Query<(Entity, &mut ActiveSession, Has<Controlled>)>,
    events: &mut MessageWriter<SessionEvent>,
) {
    let jump = latch.take();

    for (entity, mut session, controlled) in sessions.iter_mut() {
        let report = session.step(controlled && jump, dt);
        write_events(entity, &session, &report, events);
    }
}

fn write_events(entity: Entity, session: &Session, report: &StepReport, events: &mut MessageWriter<SessionEvent>) {
    let mut emit = |kind| {
        events.write(SessionEvent { session: entity, kind });
    };

    if report.jumped {
        emit(SessionEventKind::Jumped);
    }
    if report.scored > 0 {
        emit(SessionEventKind::Scored { score: session.score() });
    }
    if let Some(cause) = report.collision {
        emit(SessionEventKind::Collided { cause, score: session.score() });
    }
    if report.restarted {
        emit(SessionEventKind::Restarted { round: session.round_number() });
    }
}

fn log_session_events(mut events: MessageReader<SessionEvent>, sessions: Query<&ActiveSession>) {
    for event in events.read() {
        match event.kind {
            SessionEventKind::Jumped => debug!(session = ?event.session, "Bird jumped"),
            SessionEventKind::Scored { score } => info!(session = ?event.session, "Score updated: {score}"),
            SessionEventKind::Collided { cause, score } => {
                let played = sessions.get(event.session).map_or(0.0, |s| s.clock().elapsed());
                info!(session = ?event.session, "Collided with {cause:?}, final score {score} after {played:.1}s of play");
            }
            SessionEventKind::Restarted { round } => info!(session = ?event.session, "Round {round} started"),
        }
    }
}
