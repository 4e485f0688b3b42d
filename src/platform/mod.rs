//! Platform abstraction layer
//!
//! The simulation core drives three collaborators it does not implement:
//! a display driver, an input source, and a frame-sync primitive. Real
//! backends are thin memory-mapped wrappers; the headless implementations
//! here serve tests and the demo binary.

pub mod headless;

pub use headless::{InstantSync, RecordingDisplay, ScriptedInput};

use crate::consts::OBJECT_CAPACITY;
use crate::error::GameError;
use crate::video::attrs::ObjectAttributes;

/// Scrolling background layers, nearest-drawn last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Distant backdrop, scrolled faster for parallax
    Far,
    /// The obstacle layer the actor collides with
    Near,
    /// Score/banner overlay revealed at game over
    Score,
}

/// Upload destinations for palette data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteTarget {
    Background,
    Objects,
}

/// Upload destinations for tile image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    Background,
    Objects,
}

/// Layer-enable bits for [`DisplayDriver::configure_layers`].
pub mod layer_flags {
    pub const FAR: u16 = 1 << 0;
    pub const NEAR: u16 = 1 << 1;
    pub const SCORE: u16 = 1 << 2;
    pub const OBJECTS: u16 = 1 << 3;
}

/// The video output device. Setup calls run once at startup; `set_scroll`
/// and `push_objects` run every frame.
pub trait DisplayDriver {
    fn configure_layers(&mut self, mode: u8, flags: u16) -> Result<(), GameError>;
    fn load_palette(&mut self, target: PaletteTarget, data: &[u16]) -> Result<(), GameError>;
    fn load_tile_image(&mut self, target: ImageTarget, data: &[u16]) -> Result<(), GameError>;
    fn load_tile_map(&mut self, layer: Layer, data: &[u16]) -> Result<(), GameError>;
    fn set_scroll(&mut self, layer: Layer, x: i32, y: i32) -> Result<(), GameError>;
    /// Accept one complete attribute block. Callers never push partial
    /// tables; a driver may treat the block as a single DMA transfer.
    fn push_objects(
        &mut self,
        block: &[ObjectAttributes; OBJECT_CAPACITY],
    ) -> Result<(), GameError>;
}

/// Buttons the core polls. There is exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Flap,
}

/// Polled once per frame.
pub trait InputSource {
    fn is_pressed(&mut self, button: Button) -> Result<bool, GameError>;
}

/// The per-frame blocking suspension point.
pub trait FrameSync {
    /// Block until the current output frame's active drawing phase
    /// completes. A wait that can never return should yield
    /// [`GameError::SyncTimeout`] instead of wedging the loop.
    fn wait_for_sync(&mut self) -> Result<(), GameError>;
}
