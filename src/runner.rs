//! Frame loop orchestration
//!
//! Per frame, in order: simulation tick, block on frame sync, push scroll
//! offsets (the far layer runs at 6/5 of the near layer for parallax),
//! publish the object pool, pace the output. The loop ends on the one-shot
//! transition to game over, or when a caller requests a stop.

use std::thread;

use crate::error::GameError;
use crate::platform::{Button, DisplayDriver, FrameSync, InputSource, Layer, layer_flags};
use crate::sim::state::{GamePhase, GameState};
use crate::sim::tick::{TickInput, tick};
use crate::sim::tilemap::ObstacleMap;
use crate::tuning::Tuning;
use crate::video::pool::VisualObjectPool;

/// Owns a session plus the collaborators that carry its output.
pub struct GameLoop<D, I, S> {
    state: GameState,
    pool: VisualObjectPool,
    map: ObstacleMap,
    tuning: Tuning,
    display: D,
    input: I,
    sync: S,
    stop_requested: bool,
    game_over_latched: bool,
}

impl<D: DisplayDriver, I: InputSource, S: FrameSync> GameLoop<D, I, S> {
    pub fn new(
        map: ObstacleMap,
        tuning: Tuning,
        display: D,
        input: I,
        sync: S,
    ) -> Result<Self, GameError> {
        let mut pool = VisualObjectPool::new();
        let state = GameState::new(&mut pool, &tuning)?;
        Ok(Self {
            state,
            pool,
            map,
            tuning,
            display,
            input,
            sync,
            stop_requested: false,
            game_over_latched: false,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn pool(&self) -> &VisualObjectPool {
        &self.pool
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Ask [`run`](Self::run) to return after the current frame. The session
    /// itself has no cancel concept; this exists for embedders and tests.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// One full frame. Returns false when the loop should not continue.
    pub fn step_frame(&mut self) -> Result<bool, GameError> {
        let input = TickInput {
            flap: self.input.is_pressed(Button::Flap)?,
        };
        tick(
            &mut self.state,
            &mut self.pool,
            &self.map,
            &self.tuning,
            &input,
        );

        self.sync.wait_for_sync()?;

        let x = self.state.x_scroll;
        self.display.set_scroll(Layer::Far, x * 6 / 5, 0)?;
        self.display.set_scroll(Layer::Near, x, 0)?;
        self.pool.publish(&mut self.display)?;

        thread::sleep(self.tuning.frame_pace());

        if self.state.phase == GamePhase::GameOver && !self.game_over_latched {
            self.game_over_latched = true;
            self.display.configure_layers(
                0,
                layer_flags::FAR | layer_flags::NEAR | layer_flags::SCORE | layer_flags::OBJECTS,
            )?;
            log::info!("session over: {}", self.state.tracker.banner());
            return Ok(false);
        }

        Ok(!self.stop_requested && self.state.phase == GamePhase::Running)
    }

    /// Run frames until game over or a requested stop.
    pub fn run(&mut self) -> Result<(), GameError> {
        while self.step_frame()? {}
        Ok(())
    }
}
