//! FPGA configuration specifications for the weft toolchain.
//!
//! This crate holds the static, per-family description of configuration
//! memory: the frame size and the ordered block types (each an ordered set
//! of subtypes with fixed frame counts) that together determine frame
//! addressing for a family. Specifications are declared hardware data,
//! eagerly constructed as `static`s and shared process-wide.
//!
//! # Usage
//!
//! Resolve a specification by family name:
//!
//! ```
//! use weft_arch::ConfigurationSpecification;
//!
//! let spec = ConfigurationSpecification::resolve("virtex5").unwrap();
//! assert_eq!(spec.frame_size, 41);
//! assert_eq!(spec.logic_block_type().frames_per_column(), 218);
//! ```

#![warn(missing_docs)]

pub mod block;
pub mod spec;
pub mod virtex5;
pub mod virtex6;

pub use block::{BlockSubType, BlockType, FramePosition};
pub use spec::{ConfigurationSpecification, UnsupportedFamily};
