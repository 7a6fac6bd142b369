//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the ECS runtime and time.
//! - `StatesPlugin` drives `AppState` transitions.
//! - `flappy_bird::game::configure_headless` installs the gameplay plugins.

#![allow(dead_code)]

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use flappy_bird::common::tunables::Tunables;
use flappy_bird::plugins::session::{ActiveSession, Controlled};

pub fn app_headless() -> App {
    app_with(Tunables { seed: Some(7), ..default() })
}

pub fn app_with(tunables: Tunables) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(tunables);

    flappy_bird::game::configure_headless(&mut app);
    app
}

/// Run one fixed simulation step directly, independent of wall-clock time.
pub fn fixed_step(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

pub fn player(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, (With<ActiveSession>, With<Controlled>)>()
        .single(app.world())
        .expect("exactly one controlled session")
}
