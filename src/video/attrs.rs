//! Packed object attribute encoding
//!
//! The display driver consumes four-halfword attribute entries. Named fields
//! live in [`VisualObject`](crate::video::pool::VisualObject) and are encoded
//! here at the publish boundary. Game logic never re-parses packed bits it
//! just wrote.

use bytemuck::{Pod, Zeroable};

use crate::video::pool::VisualObject;

/// x occupies 9 bits of attr1
pub const X_MASK: u16 = 0x01ff;
/// y occupies 8 bits of attr0
pub const Y_MASK: u16 = 0x00ff;
/// tile index occupies 10 bits of attr2
pub const TILE_MASK: u16 = 0x03ff;

const COLOR_256: u16 = 1 << 13;
const H_FLIP: u16 = 1 << 12;
const V_FLIP: u16 = 1 << 13;

/// One encoded object table entry, laid out exactly as the driver's
/// attribute memory expects it.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ObjectAttributes {
    pub attr0: u16,
    pub attr1: u16,
    pub attr2: u16,
    pub fill: u16,
}

impl ObjectAttributes {
    pub fn encode(obj: &VisualObject) -> Self {
        let (shape, size) = obj.size().bits();
        let attr0 = (obj.y() & Y_MASK) | COLOR_256 | (shape << 14);
        let mut attr1 = (obj.x() & X_MASK) | (size << 14);
        if obj.h_flip() {
            attr1 |= H_FLIP;
        }
        if obj.v_flip() {
            attr1 |= V_FLIP;
        }
        let attr2 = (obj.tile() & TILE_MASK) | ((obj.priority() & 0x3) << 10);
        Self {
            attr0,
            attr1,
            attr2,
            fill: 0,
        }
    }
}

/// Raw halfword view of an encoded block, as a DMA-style transfer sends it.
pub fn as_words(block: &[ObjectAttributes]) -> &[u16] {
    bytemuck::cast_slice(block)
}
