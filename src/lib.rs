//! Flappy Bird on Bevy.
//!
//! `sim` holds the game rules as plain Rust; `plugins` adapts them to the ECS.
//! Integration tests in `tests/` are compiled as separate crates and import
//! through this library.

pub mod common;
pub mod game;
pub mod plugins;
pub mod sim;
