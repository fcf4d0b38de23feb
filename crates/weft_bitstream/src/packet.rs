//! Configuration packets and their wire encoding.
//!
//! A packet is one atomic command of the configuration protocol: a single
//! 32-bit header word followed by `word_count` payload words. Two header
//! encodings exist, distinguished by the bit-width of the word-count field:
//!
//! ```text
//! Type 1: [31:29]=001 | [28:27] opcode | [26:13] register address | [10:0] word count
//! Type 2: [31:29]=010 | [28:27] opcode | [26:0] word count
//! ```
//!
//! A Type-2 packet carries no address field; the device takes the target
//! register from the zero-word Type-1 header that must immediately precede
//! it. The bit-field layout is a hardware compatibility contract.

use crate::registers::{CommandCode, PacketOpcode, RegisterType};
use serde::{Deserialize, Serialize};

/// Largest word count a Type-1 header can carry (11-bit field).
pub const TYPE1_MAX_WORD_COUNT: usize = 0x7FF;

/// Largest word count a Type-2 header can carry (27-bit field).
pub const TYPE2_MAX_WORD_COUNT: usize = 0x07FF_FFFF;

/// The two wire-level header encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacketType {
    /// Short form: 11-bit word count, carries the register address.
    Type1,
    /// Long form: 27-bit word count, no address field.
    Type2,
}

impl PacketType {
    /// Returns the 3-bit header-type field value.
    pub const fn header_code(self) -> u32 {
        match self {
            PacketType::Type1 => 1,
            PacketType::Type2 => 2,
        }
    }
}

/// A malformed packet or a sequence-level packet pairing violation.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum PacketError {
    /// The declared word count disagrees with the payload length.
    #[error("declared word count {declared} does not match payload length {actual}")]
    WordCountMismatch {
        /// Word count declared in the header.
        declared: u32,
        /// Actual payload length in words.
        actual: usize,
    },
    /// A Type-1 payload too large for the 11-bit word-count field.
    #[error("type 1 packet payload of {0} words exceeds the 2047-word field; use the type 2 form")]
    Type1Overflow(usize),
    /// A Type-2 payload too large for the 27-bit word-count field.
    #[error("type 2 packet payload of {0} words exceeds the 27-bit word-count field")]
    Type2Overflow(usize),
    /// A Type-2 packet appended without its zero-word Type-1 predecessor.
    #[error("type 2 packet appended without a preceding zero-word type 1 write header")]
    UnpairedType2,
}

/// One configuration command: header plus payload words.
///
/// Packets are immutable once built; all constructors validate the header
/// invariants, so a `Packet` in hand always encodes to legal wire words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    opcode: PacketOpcode,
    register: Option<RegisterType>,
    header_type: PacketType,
    word_count: u32,
    payload: Vec<u32>,
}

impl Packet {
    /// Builds a packet from raw parts, validating the header invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::WordCountMismatch`] if a write's declared
    /// word count disagrees with its payload length, or if a non-write
    /// carries payload words; [`PacketError::Type1Overflow`] /
    /// [`PacketError::Type2Overflow`] if the count exceeds the header
    /// field.
    pub fn new(
        opcode: PacketOpcode,
        register: Option<RegisterType>,
        header_type: PacketType,
        word_count: u32,
        payload: Vec<u32>,
    ) -> Result<Self, PacketError> {
        match opcode {
            PacketOpcode::Write => {
                if word_count as usize != payload.len() {
                    return Err(PacketError::WordCountMismatch {
                        declared: word_count,
                        actual: payload.len(),
                    });
                }
            }
            // NOPs are bare headers; reads declare a readback length but
            // carry no payload words of their own.
            PacketOpcode::Nop | PacketOpcode::Read | PacketOpcode::Reserved => {
                if !payload.is_empty() {
                    return Err(PacketError::WordCountMismatch {
                        declared: word_count,
                        actual: payload.len(),
                    });
                }
            }
        }
        match header_type {
            PacketType::Type1 => {
                if word_count as usize > TYPE1_MAX_WORD_COUNT {
                    return Err(PacketError::Type1Overflow(word_count as usize));
                }
            }
            PacketType::Type2 => {
                if word_count as usize > TYPE2_MAX_WORD_COUNT {
                    return Err(PacketError::Type2Overflow(word_count as usize));
                }
            }
        }
        Ok(Self {
            opcode,
            register,
            header_type,
            word_count,
            payload,
        })
    }

    /// Builds a no-operation packet (a bare Type-1 header).
    pub fn nop() -> Self {
        Self {
            opcode: PacketOpcode::Nop,
            register: None,
            header_type: PacketType::Type1,
            word_count: 0,
            payload: Vec::new(),
        }
    }

    /// Builds a one-word Type-1 packet carrying `value`.
    pub fn one_word(opcode: PacketOpcode, register: RegisterType, value: u32) -> Self {
        Self {
            opcode,
            register: Some(register),
            header_type: PacketType::Type1,
            word_count: 1,
            payload: vec![value],
        }
    }

    /// Builds a one-word write of `command` to the CMD register.
    pub fn command(command: CommandCode) -> Self {
        Self::one_word(PacketOpcode::Write, RegisterType::Cmd, command.code())
    }

    /// Builds a Type-1 write of `payload` to `register`.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::Type1Overflow`] if the payload exceeds the
    /// 11-bit word-count field (2047 words); switch to the Type-2 form.
    pub fn type1_write(register: RegisterType, payload: Vec<u32>) -> Result<Self, PacketError> {
        if payload.len() > TYPE1_MAX_WORD_COUNT {
            return Err(PacketError::Type1Overflow(payload.len()));
        }
        Ok(Self {
            opcode: PacketOpcode::Write,
            register: Some(register),
            header_type: PacketType::Type1,
            word_count: payload.len() as u32,
            payload,
        })
    }

    /// Builds a zero-word Type-1 write header naming `register`, the
    /// required predecessor of a Type-2 packet.
    pub fn zero_word_write(register: RegisterType) -> Self {
        Self {
            opcode: PacketOpcode::Write,
            register: Some(register),
            header_type: PacketType::Type1,
            word_count: 0,
            payload: Vec::new(),
        }
    }

    /// Builds a Type-2 write of `payload`.
    ///
    /// The target register comes from the zero-word Type-1 header that
    /// must precede this packet in the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::Type2Overflow`] if the payload exceeds the
    /// 27-bit word-count field.
    pub fn type2_write(payload: Vec<u32>) -> Result<Self, PacketError> {
        if payload.len() > TYPE2_MAX_WORD_COUNT {
            return Err(PacketError::Type2Overflow(payload.len()));
        }
        Ok(Self {
            opcode: PacketOpcode::Write,
            register: None,
            header_type: PacketType::Type2,
            word_count: payload.len() as u32,
            payload,
        })
    }

    /// Returns the packet opcode.
    pub fn opcode(&self) -> PacketOpcode {
        self.opcode
    }

    /// Returns the target register, absent for NOPs and Type-2 packets.
    pub fn register(&self) -> Option<RegisterType> {
        self.register
    }

    /// Returns the header encoding of this packet.
    pub fn header_type(&self) -> PacketType {
        self.header_type
    }

    /// Returns the declared word count.
    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    /// Returns the payload words.
    pub fn payload(&self) -> &[u32] {
        &self.payload
    }

    /// Packs the header into its 32-bit wire word.
    pub fn header_word(&self) -> u32 {
        let opcode = self.opcode.code() << 27;
        match self.header_type {
            PacketType::Type1 => {
                let address = match self.register {
                    Some(register) => (register.address() & 0x3FFF) << 13,
                    None => 0,
                };
                (1 << 29) | opcode | address | (self.word_count & 0x7FF)
            }
            PacketType::Type2 => (2 << 29) | opcode | (self.word_count & 0x07FF_FFFF),
        }
    }

    /// Returns the total wire length in words (header + payload).
    pub fn word_len(&self) -> usize {
        1 + self.payload.len()
    }

    /// Appends the packet's wire words (header, then payload in order).
    pub fn write_words(&self, out: &mut Vec<u32>) {
        out.push(self.header_word());
        out.extend_from_slice(&self.payload);
    }

    /// True for the zero-word Type-1 write header that must precede a
    /// Type-2 packet.
    pub fn is_zero_word_type1_write(&self) -> bool {
        self.header_type == PacketType::Type1
            && self.opcode == PacketOpcode::Write
            && self.word_count == 0
    }

    /// If this packet is a one-word CMD write of a known command, returns
    /// that command.
    pub fn command_code(&self) -> Option<CommandCode> {
        if self.opcode == PacketOpcode::Write
            && self.register == Some(RegisterType::Cmd)
            && self.payload.len() == 1
        {
            CommandCode::from_code(self.payload[0])
        } else {
            None
        }
    }
}
