//! Scene plugin: draws the controlled session with plain colored sprites.
//!
//! The simulation works in screen space (origin top-left, y down); sprites live in
//! Bevy world space with the camera centered on the window. [`to_world`] is the
//! only place that converts between the two.
//!
//! ```text
//! OnEnter(Playing): spawn backdrop, bird (+ wing child) and ground tiles
//! Update:           after SessionStep, copy session state onto transforms,
//!                   spawn/despawn pipe sprites by (round, PipeId)
//! ```

use std::collections::HashSet;

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::AppState;
use crate::common::tunables::Tunables;
use crate::plugins::session::{ActiveSession, Controlled, SessionStep};
use crate::sim::{Pipe, PipeId, WingFrame};

const BIRD_COLOR: Color = Color::srgb(0.98, 0.80, 0.18);
const WING_COLOR: Color = Color::srgb(0.95, 0.55, 0.12);
const PIPE_COLOR: Color = Color::srgb(0.35, 0.70, 0.20);
const GROUND_COLOR: Color = Color::srgb(0.86, 0.78, 0.55);
const GROUND_ALT_COLOR: Color = Color::srgb(0.80, 0.72, 0.48);
const HILLS_COLOR: Color = Color::srgb(0.55, 0.85, 0.55);

/// Height of the static hill band drawn just above the ground.
const HILLS_HEIGHT: f32 = 110.0;

/// Vertical wing offset per animation frame, in pixels.
const WING_TRAVEL: f32 = 6.0;

#[derive(Component, Debug)]
pub struct BirdSprite;

#[derive(Component, Debug)]
pub struct WingSprite;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PipeHalf {
    Top,
    Bottom,
}

/// One half of a drawn pipe. `round` keeps ids from a previous round from
/// matching the new round's pipes.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PipeSprite {
    pub round: u32,
    pub id: PipeId,
    pub half: PipeHalf,
}

#[derive(Component, Debug)]
pub struct GroundTile {
    pub index: usize,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(AppState::Playing), (spawn_backdrop, spawn_bird, spawn_ground))
        .add_systems(
            Update,
            (sync_bird, sync_pipes, sync_ground)
                .after(SessionStep)
                .run_if(in_state(AppState::Playing)),
        );
}

/// Screen space (y down, origin top-left) to world space (y up, origin centered).
pub fn to_world(tunables: &Tunables, screen: Vec2) -> Vec2 {
    Vec2::new(
        screen.x - tunables.screen_width * 0.5,
        tunables.screen_height * 0.5 - screen.y,
    )
}

/// Screen-space rectangle covered by one half of a pipe.
pub fn pipe_rect(pipe: &Pipe, half: PipeHalf, ground_y: f32) -> Rect {
    match half {
        PipeHalf::Top => Rect::new(pipe.x, 0.0, pipe.right(), pipe.gap_top()),
        PipeHalf::Bottom => Rect::new(pipe.x, pipe.gap_bottom(), pipe.right(), ground_y),
    }
}

/// Number of tiles needed to cover the screen at any scroll offset.
pub fn ground_tile_count(tunables: &Tunables) -> usize {
    (tunables.screen_width / tunables.ground_tile_width).ceil() as usize + 1
}

fn wing_offset(frame: WingFrame) -> f32 {
    match frame {
        WingFrame::Up => WING_TRAVEL,
        WingFrame::Level => 0.0,
        WingFrame::Down => -WING_TRAVEL,
    }
}

fn spawn_backdrop(mut commands: Commands, tunables: Res<Tunables>) {
    let rect = Rect::new(0.0, tunables.ground_y - HILLS_HEIGHT, tunables.screen_width, tunables.ground_y);
    commands.spawn((
        Name::new("Hills"),
        Sprite::from_color(HILLS_COLOR, rect.size()),
        Transform::from_translation(to_world(&tunables, rect.center()).extend(Layer::Background.z())),
        DespawnOnExit(AppState::Playing),
    ));
}

fn spawn_bird(mut commands: Commands, tunables: Res<Tunables>) {
    let size = tunables.bird_hitbox.half_extents() * 2.0;
    let start = to_world(&tunables, Vec2::new(tunables.bird_x, tunables.bird_start_y));

    commands
        .spawn((
            Name::new("Bird"),
            BirdSprite,
            Sprite::from_color(BIRD_COLOR, size),
            Transform::from_translation(start.extend(Layer::Bird.z())),
            DespawnOnExit(AppState::Playing),
        ))
        .with_children(|bird| {
            bird.spawn((
                Name::new("Wing"),
                WingSprite,
                Sprite::from_color(WING_COLOR, Vec2::new(size.x * 0.45, size.y * 0.35)),
                Transform::from_xyz(-size.x * 0.15, 0.0, 0.1),
            ));
        });
}

fn spawn_ground(mut commands: Commands, tunables: Res<Tunables>) {
    let height = tunables.screen_height - tunables.ground_y;
    let size = Vec2::new(tunables.ground_tile_width, height);

    for index in 0..ground_tile_count(&tunables) {
        let color = if index % 2 == 0 { GROUND_COLOR } else { GROUND_ALT_COLOR };
        commands.spawn((
            Name::new(format!("GroundTile{index}")),
            GroundTile { index },
            Sprite::from_color(color, size),
            Transform::from_translation(ground_tile_center(&tunables, index, 0.0).extend(Layer::Ground.z())),
            DespawnOnExit(AppState::Playing),
        ));
    }
}

fn ground_tile_center(tunables: &Tunables, index: usize, offset: f32) -> Vec2 {
    let left = index as f32 * tunables.ground_tile_width - offset;
    let screen = Vec2::new(
        left + tunables.ground_tile_width * 0.5,
        (tunables.ground_y + tunables.screen_height) * 0.5,
    );
    to_world(tunables, screen)
}

fn sync_bird(
    tunables: Res<Tunables>,
    session: Option<Single<&ActiveSession, With<Controlled>>>,
    // Bird and wing are disjoint by marker, so both transforms can be borrowed mutably.
    mut birds: Query<&mut Transform, (With<BirdSprite>, Without<WingSprite>)>,
    mut wings: Query<&mut Transform, (With<WingSprite>, Without<BirdSprite>)>,
) {
    let Some(session) = session else {
        return;
    };
    let bird = &session.round().bird;
    let position = to_world(&tunables, Vec2::new(bird.x, bird.y));
    let rotation = Quat::from_rotation_z(bird.tilt_deg().to_radians());

    for mut transform in &mut birds {
        transform.translation = position.extend(Layer::Bird.z());
        transform.rotation = rotation;
    }
    for mut transform in &mut wings {
        transform.translation.y = wing_offset(bird.wing_frame());
    }
}

fn sync_pipes(
    mut commands: Commands,
    tunables: Res<Tunables>,
    session: Option<Single<&ActiveSession, With<Controlled>>>,
    mut sprites: Query<(Entity, &PipeSprite, &mut Transform)>,
) {
    let Some(session) = session else {
        return;
    };
    let round = session.round_number();
    let obstacles = &session.round().obstacles;
    let mut drawn = HashSet::new();

    for (entity, sprite, mut transform) in &mut sprites {
        let pipe = (sprite.round == round)
            .then(|| obstacles.get(sprite.id))
            .flatten();
        match pipe {
            Some(pipe) => {
                let rect = pipe_rect(pipe, sprite.half, tunables.ground_y);
                transform.translation = to_world(&tunables, rect.center()).extend(Layer::Pipes.z());
                drawn.insert(sprite.id);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for pipe in obstacles.pipes().filter(|pipe| !drawn.contains(&pipe.id)) {
        for half in [PipeHalf::Top, PipeHalf::Bottom] {
            let rect = pipe_rect(pipe, half, tunables.ground_y);
            commands.spawn((
                Name::new(format!("Pipe{}{half:?}", pipe.id.0)),
                PipeSprite { round, id: pipe.id, half },
                Sprite::from_color(PIPE_COLOR, rect.size()),
                Transform::from_translation(to_world(&tunables, rect.center()).extend(Layer::Pipes.z())),
                DespawnOnExit(AppState::Playing),
            ));
        }
    }
}

fn sync_ground(
    tunables: Res<Tunables>,
    session: Option<Single<&ActiveSession, With<Controlled>>>,
    mut tiles: Query<(&GroundTile, &mut Transform)>,
) {
    let Some(session) = session else {
        return;
    };
    let offset = session.round().ground.offset();

    for (tile, mut transform) in &mut tiles {
        let center = ground_tile_center(&tunables, tile.index, offset);
        transform.translation.x = center.x;
        transform.translation.y = center.y;
    }
}
