//! Dragondash demo entry point
//!
//! Runs a headless session: a scripted flapper against a generated course,
//! with display pushes recorded rather than rendered. Pass a tuning JSON
//! path as the first argument to override the stock balance.

use dragondash::platform::{
    DisplayDriver, ImageTarget, InstantSync, Layer, PaletteTarget, RecordingDisplay,
    ScriptedInput, layer_flags,
};
use dragondash::runner::GameLoop;
use dragondash::sim::ObstacleMap;
use dragondash::{GameError, Tuning};

fn main() -> Result<(), GameError> {
    env_logger::init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).map_err(|e| GameError::BadAsset {
                reason: format!("{path}: {e}"),
            })?;
            Tuning::from_json(&json)?
        }
        None => Tuning::default(),
    };

    let map = demo_course();

    let mut display = RecordingDisplay::default();
    // one-time video setup; the bulk transfers carry placeholder assets in
    // headless mode
    display.configure_layers(
        0,
        layer_flags::FAR | layer_flags::NEAR | layer_flags::OBJECTS,
    )?;
    display.load_palette(PaletteTarget::Background, &[0; 256])?;
    display.load_palette(PaletteTarget::Objects, &[0; 256])?;
    display.load_tile_image(ImageTarget::Objects, &[0; 1024])?;
    display.load_tile_map(Layer::Near, map.tiles())?;

    let input = ScriptedInput::every(14);
    let mut game = GameLoop::new(map, tuning, display, input, InstantSync)?;
    game.run()?;

    let state = game.state();
    log::info!(
        "demo finished: {} in {} ticks",
        state.tracker.banner(),
        state.time_ticks
    );
    Ok(())
}

/// A repeating course: solid ground near the bottom, pillars with a gap to
/// flap through, and a checkpoint column ahead of each pillar.
fn demo_course() -> ObstacleMap {
    const W: usize = 64;
    const H: usize = 32;
    let mut tiles = vec![0u16; W * H];

    for col in 0..W {
        // ground band
        for row in 22..24 {
            tiles[row * W + col] = 2;
        }
        if col % 16 == 8 {
            // pillar rising from the ground, gap left above
            for row in 10..22 {
                tiles[row * W + col] = 12;
            }
        }
        if col % 16 == 0 {
            tiles[col] = 11; // checkpoint marker on the scroll row
        }
    }

    ObstacleMap::new(W, H, tiles).expect("demo course dimensions are fixed")
}
