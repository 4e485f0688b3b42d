//! Headless collaborator implementations
//!
//! Used by the demo binary and by tests that assert on what the simulation
//! pushed out, without any real video or input hardware behind them.

use crate::consts::OBJECT_CAPACITY;
use crate::error::GameError;
use crate::platform::{Button, DisplayDriver, FrameSync, ImageTarget, InputSource, Layer,
    PaletteTarget};
use crate::video::attrs::ObjectAttributes;

/// Display driver that records everything it is handed.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub mode: u8,
    pub flags: u16,
    /// Last scroll per layer, indexed by [`Layer`] discriminant order
    pub scroll: [(i32, i32); 3],
    /// Most recent complete attribute block
    pub published: Option<Box<[ObjectAttributes; OBJECT_CAPACITY]>>,
    pub publish_count: u64,
    pub tile_map_loads: u64,
}

fn layer_index(layer: Layer) -> usize {
    match layer {
        Layer::Far => 0,
        Layer::Near => 1,
        Layer::Score => 2,
    }
}

impl RecordingDisplay {
    pub fn scroll_of(&self, layer: Layer) -> (i32, i32) {
        self.scroll[layer_index(layer)]
    }
}

impl DisplayDriver for RecordingDisplay {
    fn configure_layers(&mut self, mode: u8, flags: u16) -> Result<(), GameError> {
        self.mode = mode;
        self.flags = flags;
        log::debug!("layers configured: mode={mode} flags={flags:#06b}");
        Ok(())
    }

    fn load_palette(&mut self, target: PaletteTarget, data: &[u16]) -> Result<(), GameError> {
        log::debug!("palette load: {target:?}, {} entries", data.len());
        Ok(())
    }

    fn load_tile_image(&mut self, target: ImageTarget, data: &[u16]) -> Result<(), GameError> {
        log::debug!("tile image load: {target:?}, {} halfwords", data.len());
        Ok(())
    }

    fn load_tile_map(&mut self, layer: Layer, data: &[u16]) -> Result<(), GameError> {
        self.tile_map_loads += 1;
        log::debug!("tile map load: {layer:?}, {} cells", data.len());
        Ok(())
    }

    fn set_scroll(&mut self, layer: Layer, x: i32, y: i32) -> Result<(), GameError> {
        self.scroll[layer_index(layer)] = (x, y);
        Ok(())
    }

    fn push_objects(
        &mut self,
        block: &[ObjectAttributes; OBJECT_CAPACITY],
    ) -> Result<(), GameError> {
        self.published = Some(Box::new(*block));
        self.publish_count += 1;
        Ok(())
    }
}

/// Input source that presses flap on a fixed period. Period zero never
/// presses.
#[derive(Debug)]
pub struct ScriptedInput {
    period: u32,
    polls: u32,
}

impl ScriptedInput {
    pub fn every(period: u32) -> Self {
        Self { period, polls: 0 }
    }

    pub fn never() -> Self {
        Self::every(0)
    }
}

impl InputSource for ScriptedInput {
    fn is_pressed(&mut self, button: Button) -> Result<bool, GameError> {
        debug_assert_eq!(button, Button::Flap);
        let pressed = self.period != 0 && self.polls % self.period == 0;
        self.polls += 1;
        Ok(pressed)
    }
}

/// Frame sync that returns immediately.
#[derive(Debug, Default)]
pub struct InstantSync;

impl FrameSync for InstantSync {
    fn wait_for_sync(&mut self) -> Result<(), GameError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_period() {
        let mut input = ScriptedInput::every(3);
        let presses: Vec<bool> = (0..7)
            .map(|_| input.is_pressed(Button::Flap).unwrap())
            .collect();
        assert_eq!(
            presses,
            vec![true, false, false, true, false, false, true]
        );

        let mut quiet = ScriptedInput::never();
        assert!(!quiet.is_pressed(Button::Flap).unwrap());
    }

    #[test]
    fn recording_display_tracks_scroll_per_layer() {
        let mut driver = RecordingDisplay::default();
        driver.set_scroll(Layer::Far, 12, 0).unwrap();
        driver.set_scroll(Layer::Near, 10, 0).unwrap();
        assert_eq!(driver.scroll_of(Layer::Far), (12, 0));
        assert_eq!(driver.scroll_of(Layer::Near), (10, 0));
        assert_eq!(driver.scroll_of(Layer::Score), (0, 0));
    }
}
