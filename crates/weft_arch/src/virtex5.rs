//! Virtex-5 configuration specification.
//!
//! Frame layout constants for the Virtex-5 family. A configuration frame is
//! 41 words (1312 bits). The logic interconnect column interleaves IOB,
//! CLB, DSP, clock, and transceiver subtypes; BRAM content lives in its own
//! block type so frame data for memories can be addressed separately.

use crate::block::{BlockSubType, BlockType};
use crate::spec::ConfigurationSpecification;

/// CLB configuration subtype.
pub const CLB: BlockSubType = BlockSubType {
    name: "CLB",
    frames_per_block: 36,
};
/// IOB configuration subtype.
pub const IOB: BlockSubType = BlockSubType {
    name: "IOB",
    frames_per_block: 54,
};
/// DSP configuration subtype.
pub const DSP: BlockSubType = BlockSubType {
    name: "DSP",
    frames_per_block: 28,
};
/// Clock column configuration subtype.
pub const CLK: BlockSubType = BlockSubType {
    name: "CLK",
    frames_per_block: 4,
};
/// GTX transceiver configuration subtype.
pub const GTX: BlockSubType = BlockSubType {
    name: "GTX",
    frames_per_block: 32,
};
/// GTP transceiver configuration subtype.
pub const GTP: BlockSubType = BlockSubType {
    name: "GTP",
    frames_per_block: 32,
};
/// Trailing overhead frames of the logic block.
pub const LOGIC_OVERHEAD: BlockSubType = BlockSubType {
    name: "LOGIC_OVERHEAD",
    frames_per_block: 2,
};
/// BRAM interconnect configuration subtype (routed with the logic block).
pub const BRAM_INTERCONNECT: BlockSubType = BlockSubType {
    name: "BRAMINTERCONNECT",
    frames_per_block: 30,
};
/// BRAM content subtype (initialization data).
pub const BRAM_CONTENT: BlockSubType = BlockSubType {
    name: "BRAMCONTENT",
    frames_per_block: 128,
};
/// Trailing overhead frames of the BRAM content block.
pub const BRAM_OVERHEAD: BlockSubType = BlockSubType {
    name: "BRAMOVERHEAD",
    frames_per_block: 2,
};

/// Logic interconnect block type, in on-device frame-address order.
pub const LOGIC_INTERCONNECT: BlockType = BlockType {
    name: "LOGIC",
    sub_types: &[
        IOB,
        CLB,
        DSP,
        CLK,
        GTX,
        GTP,
        BRAM_INTERCONNECT,
        LOGIC_OVERHEAD,
    ],
};

/// BRAM content block type.
pub const BRAM: BlockType = BlockType {
    name: "BRAM",
    sub_types: &[BRAM_CONTENT, BRAM_OVERHEAD],
};

/// The Virtex-5 configuration specification.
pub static VIRTEX5: ConfigurationSpecification = ConfigurationSpecification {
    family: "virtex5",
    frame_size: 41,
    block_types: &[LOGIC_INTERCONNECT, BRAM],
    logic_block: 0,
    bram_content_block: 1,
};
