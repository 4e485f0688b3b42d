//! Fixed-capacity table of positionable, flippable, animatable objects
//!
//! Game entities allocate one entry each at construction time and keep it for
//! the whole session; the allocation cursor only ever moves forward until
//! [`VisualObjectPool::reset_all`] rewinds it. Position fields are narrow on
//! purpose: coordinates wrap at their encoding width instead of clamping,
//! matching the attribute memory they are flushed into.

use crate::consts::{OBJECT_CAPACITY, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::GameError;
use crate::platform::DisplayDriver;
use crate::video::attrs::{ObjectAttributes, TILE_MASK, X_MASK, Y_MASK};

/// Aspect-ratio/size classes supported by the object hardware. Fixed at
/// allocation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteSize {
    Square8,
    Square16,
    Square32,
    Square64,
    Wide16x8,
    Wide32x8,
    Wide32x16,
    Wide64x32,
    Tall8x16,
    Tall8x32,
    Tall16x32,
    Tall32x64,
}

impl SpriteSize {
    /// (shape, size) bit pair used by the packed encoding.
    pub(crate) fn bits(self) -> (u16, u16) {
        match self {
            Self::Square8 => (0, 0),
            Self::Square16 => (0, 1),
            Self::Square32 => (0, 2),
            Self::Square64 => (0, 3),
            Self::Wide16x8 => (1, 0),
            Self::Wide32x8 => (1, 1),
            Self::Wide32x16 => (1, 2),
            Self::Wide64x32 => (1, 3),
            Self::Tall8x16 => (2, 0),
            Self::Tall8x32 => (2, 1),
            Self::Tall16x32 => (2, 2),
            Self::Tall32x64 => (2, 3),
        }
    }
}

/// Index of a pool entry handed out by [`VisualObjectPool::allocate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHandle(usize);

/// One display object with named fields. Packing happens only at publish.
#[derive(Debug, Clone, Copy)]
pub struct VisualObject {
    x: u16,
    y: u16,
    h_flip: bool,
    v_flip: bool,
    tile: u16,
    priority: u16,
    size: SpriteSize,
}

impl VisualObject {
    pub fn new(
        x: i32,
        y: i32,
        size: SpriteSize,
        h_flip: bool,
        v_flip: bool,
        tile: u16,
        priority: u16,
    ) -> Self {
        Self {
            x: (x & X_MASK as i32) as u16,
            y: (y & Y_MASK as i32) as u16,
            h_flip,
            v_flip,
            tile: tile & TILE_MASK,
            priority,
            size,
        }
    }

    /// Parked off the visible screen area.
    fn parked() -> Self {
        Self::new(
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            SpriteSize::Square8,
            false,
            false,
            0,
            0,
        )
    }

    pub fn x(&self) -> u16 {
        self.x
    }

    pub fn y(&self) -> u16 {
        self.y
    }

    pub fn h_flip(&self) -> bool {
        self.h_flip
    }

    pub fn v_flip(&self) -> bool {
        self.v_flip
    }

    pub fn tile(&self) -> u16 {
        self.tile
    }

    pub fn priority(&self) -> u16 {
        self.priority
    }

    pub fn size(&self) -> SpriteSize {
        self.size
    }
}

/// The whole object table. Allocation is monotonic within a session; slots
/// are never freed individually.
pub struct VisualObjectPool {
    slots: [VisualObject; OBJECT_CAPACITY],
    cursor: usize,
}

impl Default for VisualObjectPool {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualObjectPool {
    pub fn new() -> Self {
        Self {
            slots: [VisualObject::parked(); OBJECT_CAPACITY],
            cursor: 0,
        }
    }

    /// Park every slot off-screen and rewind the allocation cursor. Must run
    /// before a session's first [`allocate`](Self::allocate).
    pub fn reset_all(&mut self) {
        self.slots = [VisualObject::parked(); OBJECT_CAPACITY];
        self.cursor = 0;
    }

    /// Claim the next slot. Fails once the table is full rather than
    /// overrunning into neighbouring entries.
    #[allow(clippy::too_many_arguments)]
    pub fn allocate(
        &mut self,
        x: i32,
        y: i32,
        size: SpriteSize,
        h_flip: bool,
        v_flip: bool,
        tile: u16,
        priority: u16,
    ) -> Result<ObjectHandle, GameError> {
        if self.cursor >= OBJECT_CAPACITY {
            return Err(GameError::PoolExhausted {
                capacity: OBJECT_CAPACITY,
            });
        }
        let handle = ObjectHandle(self.cursor);
        self.cursor += 1;
        self.slots[handle.0] = VisualObject::new(x, y, size, h_flip, v_flip, tile, priority);
        Ok(handle)
    }

    /// Absolute position, masked to the field widths (wraps, never clamps).
    pub fn set_position(&mut self, handle: ObjectHandle, x: i32, y: i32) {
        let slot = &mut self.slots[handle.0];
        slot.x = (x & X_MASK as i32) as u16;
        slot.y = (y & Y_MASK as i32) as u16;
    }

    /// Relative move: reads the wrapped position, adds the delta, re-sets.
    pub fn move_by(&mut self, handle: ObjectHandle, dx: i32, dy: i32) {
        let (x, y) = self.position(handle);
        self.set_position(handle, x as i32 + dx, y as i32 + dy);
    }

    pub fn set_horizontal_flip(&mut self, handle: ObjectHandle, flip: bool) {
        self.slots[handle.0].h_flip = flip;
    }

    pub fn set_vertical_flip(&mut self, handle: ObjectHandle, flip: bool) {
        self.slots[handle.0].v_flip = flip;
    }

    /// Replace the low tile-index bits; priority is untouched.
    pub fn set_tile_offset(&mut self, handle: ObjectHandle, offset: u16) {
        self.slots[handle.0].tile = offset & TILE_MASK;
    }

    /// Wrapped on-screen position of an entry.
    pub fn position(&self, handle: ObjectHandle) -> (u16, u16) {
        let slot = &self.slots[handle.0];
        (slot.x, slot.y)
    }

    pub fn object(&self, handle: ObjectHandle) -> &VisualObject {
        &self.slots[handle.0]
    }

    /// Number of live allocations since the last reset.
    pub fn live(&self) -> usize {
        self.cursor
    }

    /// Encode every slot and hand the block to the driver in one push. The
    /// driver never observes a partially updated table.
    pub fn publish<D: DisplayDriver + ?Sized>(&self, driver: &mut D) -> Result<(), GameError> {
        let mut block: [ObjectAttributes; OBJECT_CAPACITY] = bytemuck::Zeroable::zeroed();
        for (out, slot) in block.iter_mut().zip(self.slots.iter()) {
            *out = ObjectAttributes::encode(slot);
        }
        driver.push_objects(&block)
    }
}
