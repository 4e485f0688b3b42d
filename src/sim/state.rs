//! Session state: the actor, the progress tracker, and the frame phase
//!
//! Both entities own exactly one visual object, allocated at construction
//! and never reassigned. A session is constructed once; restarting means
//! resetting the pool and building a fresh state.

use crate::error::GameError;
use crate::fixed::{self, Fp};
use crate::sim::tilemap::{CHECKPOINT_TILE, ObstacleMap};
use crate::tuning::Tuning;
use crate::video::pool::{ObjectHandle, SpriteSize, VisualObjectPool};

/// Current phase of a session. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    GameOver,
}

/// Actor animation frames run 0..=16 on the shared sprite sheet.
pub const ACTOR_FRAME_MAX: u16 = 16;
/// Tracker glyphs start past the actor frames on the same sheet.
pub const TRACKER_FRAME_BASE: u16 = 24;
pub const TRACKER_FRAME_MAX: u16 = 45;

/// Off-track coordinates the actor is pinned to when the session ends.
/// Stored in raw units; the x value doubles as the end-of-track sentinel.
pub const ACTOR_PIN: (Fp, Fp) = (240, 160);
/// Off-track parking spot for the tracker's object.
pub const TRACKER_PIN: (Fp, Fp) = (120, 40);

/// The falling/flapping entity.
#[derive(Debug)]
pub struct Actor {
    /// Position in 1/256 px
    pub x: Fp,
    pub y: Fp,
    /// Vertical velocity in 1/256 px per tick
    pub y_vel: Fp,
    pub gravity: Fp,
    pub flap_impulse: Fp,
    pub flap_lift: Fp,
    /// Current animation frame
    pub frame: u16,
    /// Ticks until the next frame advance
    pub counter: u32,
    pub animation_delay: u32,
    pub moving: bool,
    pub falling: bool,
    pub alive: bool,
    /// Pixels kept clear of the screen edges before scrolling takes over
    pub edge_margin: i32,
    pub sprite: ObjectHandle,
}

impl Actor {
    pub fn new(pool: &mut VisualObjectPool, tuning: &Tuning) -> Result<Self, GameError> {
        let x = fixed::from_pixels(40);
        let y = fixed::from_pixels(40);
        let sprite = pool.allocate(
            fixed::to_pixels(x),
            fixed::to_pixels(y),
            SpriteSize::Square16,
            false,
            false,
            0,
            0,
        )?;
        Ok(Self {
            x,
            y,
            y_vel: 0,
            gravity: tuning.gravity,
            flap_impulse: tuning.flap_impulse,
            flap_lift: tuning.flap_lift,
            frame: 0,
            counter: 0,
            animation_delay: tuning.animation_delay,
            moving: true,
            falling: true,
            alive: true,
            edge_margin: tuning.edge_margin,
            sprite,
        })
    }
}

/// The score entity. Watches the tile column just behind the actor for
/// checkpoint crossings and advances a cyclic digit animation.
#[derive(Debug)]
pub struct ProgressTracker {
    pub x: Fp,
    pub y: Fp,
    pub frame: u16,
    pub counter: u32,
    pub animation_delay: u32,
    pub total: u32,
    pub lap: u32,
    pub sprite: ObjectHandle,
}

impl ProgressTracker {
    pub fn new(pool: &mut VisualObjectPool, tuning: &Tuning) -> Result<Self, GameError> {
        let x = fixed::from_pixels(116);
        let y = fixed::from_pixels(30);
        let sprite = pool.allocate(
            fixed::to_pixels(x),
            fixed::to_pixels(y),
            SpriteSize::Square8,
            false,
            false,
            TRACKER_FRAME_BASE,
            0,
        )?;
        Ok(Self {
            x,
            y,
            frame: TRACKER_FRAME_BASE,
            counter: 0,
            animation_delay: tuning.animation_delay,
            total: 0,
            lap: 1,
            sprite,
        })
    }

    /// Per-tick observation. Samples one pixel behind the actor's left edge
    /// on the checkpoint row; a held checkpoint tile ratchets the counter up
    /// to the animation delay before the score advances. Not gated on actor
    /// liveness.
    pub fn update(
        &mut self,
        actor: &Actor,
        pool: &mut VisualObjectPool,
        map: &ObstacleMap,
        x_scroll: i32,
    ) {
        let behind = map.sample(fixed::to_pixels(actor.x) - 1, 0, x_scroll, 0);
        if behind != CHECKPOINT_TILE {
            return;
        }
        self.counter += 1;
        if self.counter >= self.animation_delay {
            self.frame += 1;
            self.total += 1;
            self.lap = self.total / 3 + 1;
            if self.frame > TRACKER_FRAME_MAX {
                self.frame = TRACKER_FRAME_BASE;
            }
            pool.set_tile_offset(self.sprite, self.frame);
            self.counter = 0;
            log::debug!("checkpoint passed: total={} lap={}", self.total, self.lap);
        }
    }

    /// Park the tracker's object off-track. Part of the game-over pin.
    pub(crate) fn pin(&mut self, pool: &mut VisualObjectPool) {
        self.x = TRACKER_PIN.0;
        self.y = TRACKER_PIN.1;
        pool.set_position(self.sprite, TRACKER_PIN.0, TRACKER_PIN.1);
    }

    /// Final score line, ready for the out-of-scope text renderer.
    pub fn banner(&self) -> String {
        format!("SCORE {} LAP {}", self.total, self.lap)
    }
}

/// Complete per-session simulation state.
#[derive(Debug)]
pub struct GameState {
    pub actor: Actor,
    pub tracker: ProgressTracker,
    /// Horizontal scroll of the obstacle layer, in pixels
    pub x_scroll: i32,
    pub phase: GamePhase,
    pub time_ticks: u64,
}

impl GameState {
    /// Build a fresh session. Resets the pool, so any handles from a
    /// previous session are dead after this call.
    pub fn new(pool: &mut VisualObjectPool, tuning: &Tuning) -> Result<Self, GameError> {
        pool.reset_all();
        let actor = Actor::new(pool, tuning)?;
        let tracker = ProgressTracker::new(pool, tuning)?;
        log::info!("session start: {} objects live", pool.live());
        Ok(Self {
            actor,
            tracker,
            x_scroll: 1,
            phase: GamePhase::Running,
            time_ticks: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tilemap::ObstacleMap;

    fn checkpoint_everywhere() -> ObstacleMap {
        ObstacleMap::new(1, 1, vec![CHECKPOINT_TILE]).unwrap()
    }

    #[test]
    fn session_allocates_two_objects() {
        let mut pool = VisualObjectPool::new();
        let state = GameState::new(&mut pool, &Tuning::default()).unwrap();
        assert_eq!(pool.live(), 2);
        assert_eq!(pool.position(state.actor.sprite), (40, 40));
        assert_eq!(pool.position(state.tracker.sprite), (116, 30));
        assert_eq!(pool.object(state.tracker.sprite).tile(), TRACKER_FRAME_BASE);
    }

    #[test]
    fn lap_arithmetic_holds_after_every_update() {
        let mut pool = VisualObjectPool::new();
        let tuning = Tuning::default();
        let mut state = GameState::new(&mut pool, &tuning).unwrap();
        let map = checkpoint_everywhere();

        for tick in 0..200 {
            state
                .tracker
                .update(&state.actor, &mut pool, &map, tick);
            assert_eq!(state.tracker.lap, state.tracker.total / 3 + 1);
        }
        // every tile is a checkpoint: one score per animation_delay ticks
        assert_eq!(state.tracker.total, 200 / tuning.animation_delay);
    }

    #[test]
    fn tracker_frame_wraps_to_glyph_base() {
        let mut pool = VisualObjectPool::new();
        let tuning = Tuning {
            animation_delay: 1,
            ..Tuning::default()
        };
        let mut state = GameState::new(&mut pool, &tuning).unwrap();
        let map = checkpoint_everywhere();

        // 21 advances reach frame 45; the next one runs past and wraps
        let span = (TRACKER_FRAME_MAX - TRACKER_FRAME_BASE) as u32;
        for _ in 0..span + 1 {
            state.tracker.update(&state.actor, &mut pool, &map, 0);
        }
        // ran past the last glyph and wrapped back to the base
        assert_eq!(state.tracker.frame, TRACKER_FRAME_BASE);
        assert_eq!(
            pool.object(state.tracker.sprite).tile(),
            TRACKER_FRAME_BASE
        );
    }

    #[test]
    fn no_score_off_checkpoint_tiles() {
        let mut pool = VisualObjectPool::new();
        let mut state = GameState::new(&mut pool, &Tuning::default()).unwrap();
        let map = ObstacleMap::new(1, 1, vec![0]).unwrap();
        for tick in 0..100 {
            state.tracker.update(&state.actor, &mut pool, &map, tick);
        }
        assert_eq!(state.tracker.total, 0);
        assert_eq!(state.tracker.lap, 1);
    }

    #[test]
    fn banner_formats_totals() {
        let mut pool = VisualObjectPool::new();
        let mut state = GameState::new(&mut pool, &Tuning::default()).unwrap();
        state.tracker.total = 7;
        state.tracker.lap = 3;
        assert_eq!(state.tracker.banner(), "SCORE 7 LAP 3");
    }
}
