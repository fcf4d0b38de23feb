//! The per-family configuration specification and family registry.

use crate::block::BlockType;
use crate::{virtex5, virtex6};

/// The requested device family has no registered configuration
/// specification.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unsupported device family: {family:?} (supported: virtex5, virtex6)")]
pub struct UnsupportedFamily {
    /// The family name as supplied by the caller.
    pub family: String,
}

/// Static configuration description for one device family.
///
/// Describes the frame layout every part in the family shares: the frame
/// size in 32-bit words and the ordered block types that determine frame
/// addressing. Specifications are declared hardware data, built once as
/// `static`s and shared process-wide; nothing here is computed or mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationSpecification {
    /// Canonical family name (e.g., "virtex5").
    pub family: &'static str,
    /// Size of one configuration frame, in 32-bit words.
    pub frame_size: usize,
    /// Block types in on-device frame-address order.
    pub block_types: &'static [BlockType],
    /// Index into `block_types` of the logic interconnect block type.
    pub logic_block: usize,
    /// Index into `block_types` of the BRAM content block type.
    pub bram_content_block: usize,
}

impl ConfigurationSpecification {
    /// Resolves the configuration specification for a family name.
    ///
    /// Matching is case-insensitive and accepts the common spellings of
    /// each family name.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFamily`] if no specification is registered for
    /// the name.
    pub fn resolve(family: &str) -> Result<&'static Self, UnsupportedFamily> {
        match family.to_ascii_lowercase().as_str() {
            "virtex5" | "virtex-5" | "virtex_5" | "v5" => Ok(&virtex5::VIRTEX5),
            "virtex6" | "virtex-6" | "virtex_6" | "v6" => Ok(&virtex6::VIRTEX6),
            _ => Err(UnsupportedFamily {
                family: family.to_string(),
            }),
        }
    }

    /// Returns the logic interconnect block type.
    pub fn logic_block_type(&self) -> &'static BlockType {
        &self.block_types[self.logic_block]
    }

    /// Returns the BRAM content block type.
    pub fn bram_content_block_type(&self) -> &'static BlockType {
        &self.block_types[self.bram_content_block]
    }

    /// Returns the block type with the given name, if the family has one.
    pub fn block_type(&self, name: &str) -> Option<&'static BlockType> {
        self.block_types.iter().find(|b| b.name == name)
    }
}
