//! Obstacle map lookup
//!
//! The course is an immutable, toroidal grid of tile codes. Sampling maps a
//! screen coordinate plus scroll offset to the tile code under it; both axes
//! wrap around the map extent, so the course repeats forever as it scrolls.

use serde::{Deserialize, Serialize};

use crate::consts::TILE_SHIFT;
use crate::error::GameError;

/// Tile code marking a scoring boundary.
pub const CHECKPOINT_TILE: u16 = 11;

/// Whether a tile code is solid terrain that kills the actor on contact.
#[inline]
pub fn is_lethal(code: u16) -> bool {
    code == 21 || (1..=6).contains(&code) || (12..=17).contains(&code)
}

/// An immutable toroidal grid of obstacle tile codes, row-major.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawMap")]
pub struct ObstacleMap {
    width: usize,
    height: usize,
    tiles: Vec<u16>,
}

/// Wire shape for map assets; validated on conversion.
#[derive(Deserialize)]
struct RawMap {
    width: usize,
    height: usize,
    tiles: Vec<u16>,
}

impl TryFrom<RawMap> for ObstacleMap {
    type Error = GameError;

    fn try_from(raw: RawMap) -> Result<Self, GameError> {
        ObstacleMap::new(raw.width, raw.height, raw.tiles)
    }
}

impl ObstacleMap {
    pub fn new(width: usize, height: usize, tiles: Vec<u16>) -> Result<Self, GameError> {
        if width == 0 || height == 0 || tiles.len() != width * height {
            return Err(GameError::MapShape {
                width,
                height,
                tiles: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Parse a JSON map asset (`{"width": .., "height": .., "tiles": [..]}`).
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        serde_json::from_str(json).map_err(|e| GameError::BadAsset {
            reason: e.to_string(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw row-major tile codes, as a driver upload expects them.
    pub fn tiles(&self) -> &[u16] {
        &self.tiles
    }

    /// Tile code under a screen coordinate once scroll is applied.
    ///
    /// Pure function of its inputs. Signed shift keeps floor semantics for
    /// negative coordinates, so wraparound just left of the origin lands on
    /// the last column rather than the first.
    pub fn sample(&self, x: i32, y: i32, x_scroll: i32, y_scroll: i32) -> u16 {
        match self.try_sample(x, y, x_scroll, y_scroll) {
            Ok(code) => code,
            Err(e) => {
                debug_assert!(false, "{e}");
                0
            }
        }
    }

    /// Like [`sample`](Self::sample) but surfaces the (logic-defect) case of
    /// an index escaping the map after wrap correction.
    pub fn try_sample(
        &self,
        x: i32,
        y: i32,
        x_scroll: i32,
        y_scroll: i32,
    ) -> Result<u16, GameError> {
        let tile_x = (x + x_scroll) >> TILE_SHIFT;
        let tile_y = (y + y_scroll) >> TILE_SHIFT;

        let wx = tile_x.rem_euclid(self.width as i32);
        let wy = tile_y.rem_euclid(self.height as i32);

        self.tiles
            .get(wy as usize * self.width + wx as usize)
            .copied()
            .ok_or(GameError::OutOfRangeSample {
                tile_x: wx,
                tile_y: wy,
            })
    }
}
