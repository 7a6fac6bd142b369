//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: DefaultPlugins (window/render) + game plugins.
//! - `configure_headless`: game plugins only, for integration tests.
//!
//! Both expect `Tunables` to be inserted first when non-default values are wanted;
//! the window size is read from them.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::error::ConfigError;
use crate::common::state::AppState;
use crate::common::tunables::Tunables;
use crate::plugins;

/// Load tunables (see `FLAPPY_TUNABLES`) and run the windowed game until closed.
pub fn run() -> Result<AppExit, ConfigError> {
    let tunables = Tunables::from_env()?;

    Ok(App::new()
        .insert_resource(tunables)
        .add_plugins(configure_full)
        .run())
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    app.init_resource::<Tunables>();
    let tunables = app.world().resource::<Tunables>();

    let window = Window {
        title: "Flappy Bird".into(),
        resolution: WindowResolution::new(tunables.screen_width as u32, tunables.screen_height as u32),
        resizable: false,
        ..default()
    };

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window),
        ..default()
    }));

    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Does not add DefaultPlugins or the camera.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<AppState>();
    plugins::register_gameplay(app);
}
