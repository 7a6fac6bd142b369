//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub const SKY: Color = Color::srgb(0.31, 0.75, 0.79);

pub fn plugin(app: &mut App) {
    // Keep tunables the caller already inserted (loaded from disk, or set by a test).
    app.init_resource::<Tunables>();
    app.insert_resource(ClearColor(SKY));
}
