//! Data-driven game balance
//!
//! Kept separate from session state so a course can ship its own feel as a
//! JSON asset. Every field has a default matching the stock game.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::fixed::Fp;

/// Balance values consumed at session construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration per tick, in 1/256 px
    pub gravity: Fp,
    /// Impulse subtracted from vertical velocity per flap, in 1/256 px
    pub flap_impulse: Fp,
    /// Immediate upward position nudge per flap, in 1/256 px
    pub flap_lift: Fp,
    /// Horizontal scroll advance per frame, in pixels
    pub scroll_step: i32,
    /// Minimum distance kept from a screen edge before horizontal movement
    /// yields to background scrolling, in pixels
    pub edge_margin: i32,
    /// Ticks between animation frame advances
    pub animation_delay: u32,
    /// Output pacing applied after each published frame
    pub frame_pace_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 40,
            flap_impulse: 1500,
            flap_lift: 40,
            scroll_step: 1,
            edge_margin: 40,
            animation_delay: 8,
            frame_pace_ms: 8,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        serde_json::from_str(json).map_err(|e| GameError::BadAsset {
            reason: e.to_string(),
        })
    }

    pub fn frame_pace(&self) -> Duration {
        Duration::from_millis(self.frame_pace_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_game() {
        let t = Tuning::default();
        assert_eq!(t.gravity, 40);
        assert_eq!(t.flap_impulse, 1500);
        assert_eq!(t.edge_margin, 40);
        assert_eq!(t.animation_delay, 8);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let t = Tuning::from_json(r#"{ "gravity": 55 }"#).unwrap();
        assert_eq!(t.gravity, 55);
        assert_eq!(t.flap_impulse, 1500);
        assert_eq!(t.scroll_step, 1);
    }

    #[test]
    fn bad_json_is_reported() {
        let err = Tuning::from_json("{ gravity").unwrap_err();
        assert!(matches!(err, GameError::BadAsset { .. }));
    }
}
