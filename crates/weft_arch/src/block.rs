//! Configuration block types and subtypes.
//!
//! A device family's configuration memory is organized into block types
//! (logic interconnect, BRAM content, ...), each decomposed into an ordered
//! set of subtypes. Every subtype occupies a fixed number of frames per
//! configuration column. The declaration order of subtypes within a block
//! type fixes the on-device frame-address enumeration, so the walk in
//! [`BlockType::locate_frame`] must follow it exactly.

use std::fmt;

/// A block subtype for a specific FPGA family.
///
/// Each family has its own set of subtypes shared across every part in the
/// family. A subtype pairs a name with the number of configuration frames it
/// occupies in one configuration column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSubType {
    /// Subtype name (e.g., "CLB", "IOB", "BRAMCONTENT").
    pub name: &'static str,
    /// Number of configuration frames this subtype occupies per column.
    pub frames_per_block: u32,
}

impl fmt::Display for BlockSubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The position of a frame within a block type's column, found by walking
/// the ordered subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePosition {
    /// Index of the containing subtype within [`BlockType::sub_types`].
    pub sub_type_index: usize,
    /// Frame index relative to the start of the containing subtype.
    pub frame_in_sub_type: u32,
}

/// A configuration block type: a named, ordered set of subtypes.
///
/// The subtype order is semantically significant hardware data. It must
/// match the device's frame-address enumeration and is never sorted or
/// deduplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockType {
    /// Block type name (e.g., "LOGIC", "BRAM").
    pub name: &'static str,
    /// Subtypes in on-device frame-address order.
    pub sub_types: &'static [BlockSubType],
}

impl BlockType {
    /// Returns the total number of frames one configuration column of this
    /// block type occupies (the sum over all subtypes).
    pub fn frames_per_column(&self) -> u32 {
        self.sub_types.iter().map(|s| s.frames_per_block).sum()
    }

    /// Locates the subtype containing `frame_index` by walking the subtypes
    /// in declaration order and summing their frame counts until the index
    /// falls inside one.
    ///
    /// Returns `None` if `frame_index` is past the end of the column.
    pub fn locate_frame(&self, frame_index: u32) -> Option<FramePosition> {
        let mut remaining = frame_index;
        for (sub_type_index, sub_type) in self.sub_types.iter().enumerate() {
            if remaining < sub_type.frames_per_block {
                return Some(FramePosition {
                    sub_type_index,
                    frame_in_sub_type: remaining,
                });
            }
            remaining -= sub_type.frames_per_block;
        }
        None
    }

    /// Returns the subtype with the given name, if this block type has one.
    pub fn sub_type(&self, name: &str) -> Option<&'static BlockSubType> {
        self.sub_types.iter().find(|s| s.name == name)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
