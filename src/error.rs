//! Error taxonomy for the simulation core
//!
//! The session never recovers mid-game: every kind here is a setup failure
//! or a fatal environment fault. Attribute field overflow and fixed-point
//! overflow are defined as wraparound arithmetic, not errors.

use std::fmt;

/// Failures surfaced by the simulation core and its collaborator seams.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// Allocation past the fixed object table capacity. Fatal to session
    /// setup; all objects are allocated at startup.
    PoolExhausted { capacity: usize },
    /// Map dimensions disagree with the tile payload length.
    MapShape {
        width: usize,
        height: usize,
        tiles: usize,
    },
    /// An asset could not be parsed.
    BadAsset { reason: String },
    /// Wrapped tile coordinates landed outside the map. Indicates a logic
    /// defect in the sampler, not bad input.
    OutOfRangeSample { tile_x: i32, tile_y: i32 },
    /// The frame-sync wait never returned.
    SyncTimeout,
    /// The input device stopped responding.
    InputTimeout,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PoolExhausted { capacity } => {
                write!(f, "visual object pool exhausted (capacity {capacity})")
            }
            Self::MapShape {
                width,
                height,
                tiles,
            } => write!(
                f,
                "obstacle map shape mismatch: {width}x{height} but {tiles} tiles"
            ),
            Self::BadAsset { reason } => write!(f, "bad asset: {reason}"),
            Self::OutOfRangeSample { tile_x, tile_y } => {
                write!(f, "tile sample out of range after wrap: ({tile_x}, {tile_y})")
            }
            Self::SyncTimeout => write!(f, "frame sync never signalled"),
            Self::InputTimeout => write!(f, "input source stopped responding"),
        }
    }
}

impl std::error::Error for GameError {}
