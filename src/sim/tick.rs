//! Per-frame simulation ordering
//!
//! One tick is: scroll advances, the actor integrates and probes, the
//! tracker observes, then the flap input lands. Frame sync and the display
//! push live a level up in the runner; nothing here touches a platform
//! trait.

use crate::sim::state::{GamePhase, GameState};
use crate::sim::tilemap::ObstacleMap;
use crate::tuning::Tuning;
use crate::video::pool::VisualObjectPool;

/// Input commands for a single tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap button sampled this frame
    pub flap: bool,
}

/// Advance the session by one frame.
pub fn tick(
    state: &mut GameState,
    pool: &mut VisualObjectPool,
    map: &ObstacleMap,
    tuning: &Tuning,
    input: &TickInput,
) {
    if state.phase == GamePhase::GameOver {
        // terminal: re-pin and keep observing, nothing advances
        state
            .actor
            .update(&mut state.tracker, pool, map, state.x_scroll);
        state
            .tracker
            .update(&state.actor, pool, map, state.x_scroll);
        return;
    }

    state.time_ticks += 1;
    state.x_scroll += tuning.scroll_step;

    state
        .actor
        .update(&mut state.tracker, pool, map, state.x_scroll);
    state
        .tracker
        .update(&state.actor, pool, map, state.x_scroll);

    if input.flap {
        state.actor.flap();
    }

    if !state.actor.alive {
        state.phase = GamePhase::GameOver;
        log::info!("game over after {} ticks", state.time_ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::sim::state::ACTOR_PIN;
    use crate::sim::tilemap::CHECKPOINT_TILE;

    fn open_map() -> ObstacleMap {
        ObstacleMap::new(8, 8, vec![0; 64]).unwrap()
    }

    fn session(tuning: &Tuning) -> (GameState, VisualObjectPool) {
        let mut pool = VisualObjectPool::new();
        let state = GameState::new(&mut pool, tuning).unwrap();
        (state, pool)
    }

    #[test]
    fn scroll_advances_before_the_updates() {
        let tuning = Tuning::default();
        let (mut state, mut pool) = session(&tuning);
        let map = open_map();

        assert_eq!(state.x_scroll, 1);
        tick(&mut state, &mut pool, &map, &tuning, &TickInput::default());
        assert_eq!(state.x_scroll, 2);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn flap_lands_after_the_physics_step() {
        let tuning = Tuning::default();
        let (mut state, mut pool) = session(&tuning);
        let map = open_map();

        tick(
            &mut state,
            &mut pool,
            &map,
            &tuning,
            &TickInput { flap: true },
        );
        // one gravity tick accrued, then the impulse replaced it wholesale
        assert_eq!(state.actor.y_vel, 40 - 1500);
    }

    #[test]
    fn death_flips_the_phase_once() {
        // a column of solid tiles ahead of the start position
        let mut tiles = vec![0u16; 64 * 32];
        for row in 0..32 {
            tiles[row * 64 + 12] = 21;
        }
        let map = ObstacleMap::new(64, 32, tiles).unwrap();
        let tuning = Tuning::default();
        let (mut state, mut pool) = session(&tuning);

        let mut ticks_to_death = 0;
        for _ in 0..600 {
            tick(&mut state, &mut pool, &map, &tuning, &TickInput::default());
            ticks_to_death += 1;
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(ticks_to_death < 600, "actor never met the obstacle column");
        assert_eq!((state.actor.x, state.actor.y), ACTOR_PIN);

        // further ticks keep the terminal state frozen
        let scroll = state.x_scroll;
        let ticks = state.time_ticks;
        tick(&mut state, &mut pool, &map, &tuning, &TickInput { flap: true });
        assert_eq!(state.x_scroll, scroll);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!((state.actor.x, state.actor.y), ACTOR_PIN);
    }

    #[test]
    fn scoring_is_not_gated_on_liveness() {
        // checkpoint everywhere: the tracker keeps observing even in the
        // terminal phase if the caller keeps ticking
        let map = ObstacleMap::new(1, 1, vec![CHECKPOINT_TILE]).unwrap();
        let tuning = Tuning::default();
        let (mut state, mut pool) = session(&tuning);

        state.actor.alive = false;
        state.phase = GamePhase::GameOver;
        for _ in 0..(tuning.animation_delay * 3) {
            tick(&mut state, &mut pool, &map, &tuning, &TickInput::default());
        }
        assert_eq!(state.tracker.total, 3);
    }

    #[test]
    fn pool_exhaustion_surfaces_at_session_setup() {
        let mut pool = VisualObjectPool::new();
        for _ in 0..crate::consts::OBJECT_CAPACITY - 1 {
            pool.allocate(
                0,
                0,
                crate::video::pool::SpriteSize::Square8,
                false,
                false,
                0,
                0,
            )
            .unwrap();
        }
        // GameState::new resets the pool first, so a nearly-full pool
        // beforehand is fine
        let state = GameState::new(&mut pool, &Tuning::default());
        assert!(state.is_ok());

        // now fill it completely and allocate an actor by hand
        pool.reset_all();
        for _ in 0..crate::consts::OBJECT_CAPACITY {
            pool.allocate(
                0,
                0,
                crate::video::pool::SpriteSize::Square8,
                false,
                false,
                0,
                0,
            )
            .unwrap();
        }
        let err = crate::sim::state::Actor::new(&mut pool, &Tuning::default()).unwrap_err();
        assert!(matches!(err, GameError::PoolExhausted { .. }));
    }
}
