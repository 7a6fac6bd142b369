//! HUD plugin: score line and the game-over banner.
//!
//! The banner is purely cosmetic. The controlled session restarts on its own two
//! steps after a collision; the banner just stays up for
//! `Tunables::game_over_banner_secs` so the final score can be read.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::AppState;
use crate::common::tunables::Tunables;
use crate::plugins::session::{ActiveSession, Controlled, SessionEvent, SessionEventKind, SessionStep};

const SCORE_FONT_SIZE: f32 = 32.0;
const BANNER_FONT_SIZE: f32 = 44.0;

#[derive(Component, Debug)]
pub struct ScoreText;

#[derive(Component, Debug)]
pub struct BannerRoot;

#[derive(Component, Debug)]
pub struct BannerText;

#[derive(Resource, Debug)]
pub struct GameOverBanner {
    duration: Duration,
    timer: Option<Timer>,
}

impl GameOverBanner {
    /// A negative or non-finite duration disables the banner.
    pub fn new(secs: f32) -> Self {
        let duration = Duration::try_from_secs_f32(secs).unwrap_or_default();
        Self { duration, timer: None }
    }

    fn show(&mut self) {
        self.timer = Some(Timer::new(self.duration, TimerMode::Once));
    }

    /// Advance the countdown; returns whether the banner should be visible.
    fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        if timer.tick(delta).is_finished() {
            self.timer = None;
            return false;
        }
        true
    }

    pub fn is_visible(&self) -> bool {
        self.timer.is_some()
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(AppState::Playing), spawn_hud).add_systems(
        Update,
        (update_score, update_banner)
            .after(SessionStep)
            .run_if(in_state(AppState::Playing)),
    );
}

pub fn score_label(score: u32, best: u32) -> String {
    format!("Score: {score}  Best: {best}")
}

pub fn banner_label(score: u32) -> String {
    format!("Game Over! Score: {score}")
}

fn spawn_hud(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(GameOverBanner::new(tunables.game_over_banner_secs));

    commands.spawn((
        Name::new("ScoreText"),
        ScoreText,
        Text::new(score_label(0, 0)),
        TextFont::from_font_size(SCORE_FONT_SIZE),
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(16.0),
            ..default()
        },
        DespawnOnExit(AppState::Playing),
    ));

    commands
        .spawn((
            Name::new("GameOverBanner"),
            BannerRoot,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Percent(40.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            Visibility::Hidden,
            DespawnOnExit(AppState::Playing),
        ))
        .with_children(|banner| {
            banner.spawn((
                BannerText,
                Text::new(String::new()),
                TextFont::from_font_size(BANNER_FONT_SIZE),
                TextColor(Color::srgb(0.9, 0.15, 0.1)),
            ));
        });
}

fn update_score(
    session: Option<Single<&ActiveSession, With<Controlled>>>,
    mut texts: Query<&mut Text, With<ScoreText>>,
) {
    let Some(session) = session else {
        return;
    };
    let snapshot = session.snapshot();
    let label = score_label(snapshot.round.score, snapshot.best);

    for mut text in &mut texts {
        if text.0 != label {
            text.0.clone_from(&label);
        }
    }
}

fn update_banner(
    time: Res<Time>,
    mut events: MessageReader<SessionEvent>,
    controlled: Query<(), With<Controlled>>,
    banner: Option<ResMut<GameOverBanner>>,
    mut roots: Query<&mut Visibility, With<BannerRoot>>,
    mut texts: Query<&mut Text, With<BannerText>>,
) {
    let Some(mut banner) = banner else {
        return;
    };

    for event in events.read() {
        let SessionEventKind::Collided { score, .. } = event.kind else {
            continue;
        };
        if !controlled.contains(event.session) {
            continue;
        }
        banner.show();
        for mut text in &mut texts {
            text.0 = banner_label(score);
        }
    }

    let visibility = if banner.tick(time.delta()) {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut root in &mut roots {
        root.set_if_neq(visibility);
    }
}
