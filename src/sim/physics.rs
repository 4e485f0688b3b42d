//! Actor physics and tile collision
//!
//! The timing-sensitive part of the core: fixed-point gravity integration
//! followed by a small constellation of probes into the scrolling obstacle
//! map. Integration order is fixed (position takes the old velocity, gravity
//! accrues after), and the probes evaluate in a fixed order for
//! instrumentation parity even though every lethal hit has the same effect.

use crate::consts::{ACTOR_SIZE, END_OF_TRACK, SCREEN_WIDTH};
use crate::fixed::{self, ONE};
use crate::sim::state::{ACTOR_FRAME_MAX, ACTOR_PIN, Actor, ProgressTracker};
use crate::sim::tilemap::{ObstacleMap, is_lethal};
use crate::video::pool::VisualObjectPool;

/// Probe offsets in pixels from the actor's top-left corner, in evaluation
/// order: above, right, top-right, bottom-right, below.
const PROBES: [(i32, i32); 5] = [(8, 0), (16, 8), (13, 0), (15, 15), (8, 16)];

impl Actor {
    /// Advance one tick: integrate, probe, decide liveness, animate, push.
    ///
    /// Once dead this is a no-op apart from re-pinning the off-track
    /// positions, so callers may keep invoking it safely.
    pub fn update(
        &mut self,
        tracker: &mut ProgressTracker,
        pool: &mut VisualObjectPool,
        map: &ObstacleMap,
        x_scroll: i32,
    ) {
        if !self.alive {
            self.pin(tracker, pool);
            return;
        }

        if self.falling {
            // position takes the old velocity, gravity lands afterwards
            self.y += self.y_vel;
            self.y_vel += self.gravity;
        }

        let px = fixed::to_pixels(self.x);
        let py = fixed::to_pixels(self.y);

        // airborne from here on; a flap is the only thing fighting gravity
        self.falling = true;

        let lethal_hit = self.x == END_OF_TRACK
            || PROBES
                .iter()
                .any(|&(dx, dy)| is_lethal(map.sample(px + dx, py + dy, x_scroll, 0)));

        if lethal_hit {
            log::info!("actor down at x={px} (scroll {x_scroll})");
            self.alive = false;
            self.y_vel = 0;
            self.falling = false;
            self.pin(tracker, pool);
            return;
        }

        if self.moving {
            self.counter += 1;
            if self.counter >= self.animation_delay {
                self.frame += 1;
                if self.frame > ACTOR_FRAME_MAX {
                    self.frame = 0;
                }
                pool.set_tile_offset(self.sprite, self.frame);
                self.counter = 0;
            }
        }
        pool.set_position(self.sprite, px, py);
    }

    /// One-shot terminal pin: both entities parked off-track and pushed
    /// through the pool immediately. Idempotent.
    fn pin(&mut self, tracker: &mut ProgressTracker, pool: &mut VisualObjectPool) {
        self.x = ACTOR_PIN.0;
        self.y = ACTOR_PIN.1;
        pool.set_position(self.sprite, ACTOR_PIN.0, ACTOR_PIN.1);
        tracker.pin(pool);
    }

    /// Input hook. No cooldown: two flaps in one tick stack their impulses.
    pub fn flap(&mut self) {
        if !self.alive {
            return;
        }
        self.frame = 0;
        self.y_vel -= self.flap_impulse;
        self.y -= self.flap_lift;
    }

    /// Face left and step one pixel. Returns true when the actor is holding
    /// the edge margin and the caller should scroll the background instead.
    pub fn move_left(&mut self, pool: &mut VisualObjectPool) -> bool {
        pool.set_horizontal_flip(self.sprite, true);
        self.moving = true;
        if fixed::to_pixels(self.x) < self.edge_margin {
            true
        } else {
            self.x -= ONE;
            false
        }
    }

    /// Mirror of [`move_left`](Self::move_left) against the right margin.
    pub fn move_right(&mut self, pool: &mut VisualObjectPool) -> bool {
        pool.set_horizontal_flip(self.sprite, false);
        self.moving = true;
        if fixed::to_pixels(self.x) > SCREEN_WIDTH - ACTOR_SIZE - self.edge_margin {
            true
        } else {
            self.x += ONE;
            false
        }
    }

    /// Freeze horizontal animation in the idle pose.
    pub fn stop(&mut self, pool: &mut VisualObjectPool) {
        self.moving = false;
        self.frame = 0;
        self.counter = self.animation_delay.saturating_sub(1);
        pool.set_tile_offset(self.sprite, self.frame);
    }
}
