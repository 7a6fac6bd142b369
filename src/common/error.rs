//! Configuration errors.
//!
//! Everything that can go wrong in this crate goes wrong before the first frame:
//! a tunables file that cannot be read or parsed, or values that would make the
//! simulation meaningless. Per-frame code never fails.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number")]
    NonFinite { field: &'static str },

    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("`jump_impulse` must point upward (negative), got {value}")]
    JumpNotUpward { value: f32 },

    #[error("a {gap_height} px gap does not fit between y={min} and y={max}")]
    GapDoesNotFit { gap_height: f32, min: f32, max: f32 },

    #[error("bird start ({x}, {y}) lies outside the playfield")]
    BirdOutOfBounds { x: f32, y: f32 },

    #[error("failed to read tunables from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tunables in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
