//! Configuration bitstream generation for Xilinx FPGA families.
//!
//! This crate synthesizes the exact sequence of binary configuration
//! packets that programs a device: the packet and register primitives of
//! the configuration protocol, the rolling-CRC packet sequence, and the
//! per-family generators that compose them into the initial, frame-data,
//! and ending blocks of a bitstream. It consumes already-resolved inputs
//! (a family name, a 32-bit IDCODE, frame-data words) and produces an
//! ordered [`PacketList`]; flattening to bytes and file framing belong to
//! a separate serialization stage, and no function here performs I/O.
//!
//! # Usage
//!
//! ```
//! let target = weft_bitstream::resolve("virtex6").unwrap();
//! let mut packets = target
//!     .generator
//!     .create_initial_full_bitstream(0x0424A093)
//!     .unwrap();
//! target
//!     .generator
//!     .create_partial_fdri_packets(&mut packets, &[0; 81])
//!     .unwrap();
//! target
//!     .generator
//!     .create_ending_full_bitstream(&mut packets, target.spec)
//!     .unwrap();
//! assert!(packets.words().len() > 500);
//! ```

#![warn(missing_docs)]

pub mod crc;
pub mod generator;
pub mod packet;
pub mod packet_list;
pub mod registers;

pub use crc::Crc;
pub use generator::{FamilyGenerator, GenerateError, VIRTEX5_GENERATOR, VIRTEX6_GENERATOR};
pub use packet::{Packet, PacketError, PacketType, TYPE1_MAX_WORD_COUNT, TYPE2_MAX_WORD_COUNT};
pub use packet_list::PacketList;
pub use registers::{CommandCode, LookupError, PacketOpcode, RegisterType};
pub use weft_arch::{ConfigurationSpecification, UnsupportedFamily};

/// The resolved pair a caller needs to build a bitstream for one family:
/// its configuration specification and its generator.
#[derive(Debug, Clone, Copy)]
pub struct BitstreamTarget {
    /// The family's frame-layout description.
    pub spec: &'static ConfigurationSpecification,
    /// The family's generation record.
    pub generator: &'static FamilyGenerator,
}

/// Resolves the specification/generator pair for a family name.
///
/// # Errors
///
/// Returns [`UnsupportedFamily`] if the family is not registered.
pub fn resolve(family: &str) -> Result<BitstreamTarget, UnsupportedFamily> {
    let spec = ConfigurationSpecification::resolve(family)?;
    let generator = FamilyGenerator::for_family(family)?;
    Ok(BitstreamTarget { spec, generator })
}
