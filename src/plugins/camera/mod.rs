//! Camera plugin.
//!
//! A fixed 2D camera at the world origin. With the default orthographic projection
//! one world unit is one window pixel, so the window's width and height in
//! `Tunables` are exactly the visible playfield.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::AppState;

#[derive(Component, Debug)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(AppState::Playing), spawn_camera);
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        Transform::from_xyz(0.0, 0.0, Layer::Overlay.z() + 100.0),
        DespawnOnExit(AppState::Playing),
    ));
}
