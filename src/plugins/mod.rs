//! Feature plugins.

use bevy::prelude::*;

pub mod core;
pub mod hud;
pub mod input;
pub mod scene;
pub mod session;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    input::plugin(app);
    session::plugin(app);
    scene::plugin(app);
    hud::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}

