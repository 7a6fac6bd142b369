//! Input plugin.
//!
//! Pipeline:
//! - Update: sample jump edges, latch them into `JumpLatch`
//! - simulation step (fixed or variable): take the latch
//!
//! The latch bridges the two clocks: a press seen in a frame with no fixed step is
//! kept for the next one, and a frame with several fixed steps only jumps once.

use bevy::input::touch::Touches;
use bevy::prelude::*;

const JUMP_KEYS: [KeyCode; 3] = [KeyCode::Space, KeyCode::ArrowUp, KeyCode::KeyW];

#[derive(Resource, Default, Debug)]
pub struct JumpLatch {
    pending: bool,
}

impl JumpLatch {
    pub fn press(&mut self) {
        self.pending = true;
    }

    /// Consume the latched edge.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<JumpLatch>()
        .add_systems(Update, gather_jump);
}

/// Latch a jump on any fresh press. Input resources are optional so headless
/// apps without `InputPlugin` still run.
pub fn gather_jump(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    mut latch: ResMut<JumpLatch>,
) {
    let pressed = keys.is_some_and(|keys| keys.any_just_pressed(JUMP_KEYS))
        || mouse.is_some_and(|mouse| mouse.just_pressed(MouseButton::Left))
        || touches.is_some_and(|touches| touches.any_just_pressed());

    if pressed {
        latch.press();
    }
}
