//! Configuration register, packet opcode, and command encodings.
//!
//! The register address map and the CMD-register command set are fixed
//! hardware constants of the Virtex-5/6 configuration logic. They are
//! modeled as closed enums whose discriminants are the wire encodings;
//! name-based lookup exists for callers that carry logical names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A register, opcode, or command name outside the known closed set.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Unknown configuration register name.
    #[error("unknown configuration register {0:?}")]
    InvalidRegister(String),
    /// Unknown packet opcode name.
    #[error("unknown packet opcode {0:?}")]
    InvalidOpcode(String),
    /// Unknown configuration command name.
    #[error("unknown configuration command {0:?}")]
    InvalidCommand(String),
}

/// Configuration register addresses.
///
/// The discriminant is the 5-bit register address carried in the 14-bit
/// address field of a Type-1 packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum RegisterType {
    /// Cyclic redundancy check register.
    Crc = 0x00,
    /// Frame address register.
    Far = 0x01,
    /// Frame data register, input (configuration data written here).
    Fdri = 0x02,
    /// Frame data register, output (readback).
    Fdro = 0x03,
    /// Command register.
    Cmd = 0x04,
    /// Control register 0.
    Ctl0 = 0x05,
    /// Masking register for CTL0/CTL1 writes.
    Mask = 0x06,
    /// Status register.
    Stat = 0x07,
    /// Legacy output register (daisy chain).
    Lout = 0x08,
    /// Configuration options register 0.
    Cor0 = 0x09,
    /// Multiple frame write register.
    Mfwr = 0x0A,
    /// Initial CBC value register (encrypted bitstreams).
    Cbc = 0x0B,
    /// Device identification code register.
    Idcode = 0x0C,
    /// User access register.
    Axss = 0x0D,
    /// Configuration options register 1.
    Cor1 = 0x0E,
    /// Warm boot start address register.
    Wbstar = 0x10,
    /// Watchdog timer register.
    Timer = 0x11,
    /// Readback CRC software register.
    RbCrcSw = 0x13,
    /// Boot history status register.
    BootSts = 0x16,
    /// Control register 1.
    Ctl1 = 0x18,
}

impl RegisterType {
    /// Returns the register's address field value.
    pub const fn address(self) -> u32 {
        self as u32
    }

    /// Returns the canonical register name.
    pub const fn name(self) -> &'static str {
        match self {
            RegisterType::Crc => "CRC",
            RegisterType::Far => "FAR",
            RegisterType::Fdri => "FDRI",
            RegisterType::Fdro => "FDRO",
            RegisterType::Cmd => "CMD",
            RegisterType::Ctl0 => "CTL0",
            RegisterType::Mask => "MASK",
            RegisterType::Stat => "STAT",
            RegisterType::Lout => "LOUT",
            RegisterType::Cor0 => "COR0",
            RegisterType::Mfwr => "MFWR",
            RegisterType::Cbc => "CBC",
            RegisterType::Idcode => "IDCODE",
            RegisterType::Axss => "AXSS",
            RegisterType::Cor1 => "COR1",
            RegisterType::Wbstar => "WBSTAR",
            RegisterType::Timer => "TIMER",
            RegisterType::RbCrcSw => "RBCRC_SW",
            RegisterType::BootSts => "BOOTSTS",
            RegisterType::Ctl1 => "CTL1",
        }
    }

    /// Looks up a register by logical name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidRegister`] for names outside the set.
    pub fn from_name(name: &str) -> Result<Self, LookupError> {
        match name.to_ascii_uppercase().as_str() {
            "CRC" => Ok(RegisterType::Crc),
            "FAR" => Ok(RegisterType::Far),
            "FDRI" => Ok(RegisterType::Fdri),
            "FDRO" => Ok(RegisterType::Fdro),
            "CMD" => Ok(RegisterType::Cmd),
            "CTL0" => Ok(RegisterType::Ctl0),
            "MASK" => Ok(RegisterType::Mask),
            "STAT" => Ok(RegisterType::Stat),
            "LOUT" => Ok(RegisterType::Lout),
            "COR0" => Ok(RegisterType::Cor0),
            "MFWR" => Ok(RegisterType::Mfwr),
            "CBC" => Ok(RegisterType::Cbc),
            "IDCODE" => Ok(RegisterType::Idcode),
            "AXSS" => Ok(RegisterType::Axss),
            "COR1" => Ok(RegisterType::Cor1),
            "WBSTAR" => Ok(RegisterType::Wbstar),
            "TIMER" => Ok(RegisterType::Timer),
            "RBCRC_SW" => Ok(RegisterType::RbCrcSw),
            "BOOTSTS" => Ok(RegisterType::BootSts),
            "CTL1" => Ok(RegisterType::Ctl1),
            _ => Err(LookupError::InvalidRegister(name.to_string())),
        }
    }
}

impl fmt::Display for RegisterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RegisterType {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Packet opcodes, carried in bits [28:27] of both header types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum PacketOpcode {
    /// No operation.
    Nop = 0,
    /// Register read.
    Read = 1,
    /// Register write.
    Write = 2,
    /// Reserved encoding.
    Reserved = 3,
}

impl PacketOpcode {
    /// Returns the opcode's 2-bit field value.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Returns the canonical opcode name.
    pub const fn name(self) -> &'static str {
        match self {
            PacketOpcode::Nop => "NOP",
            PacketOpcode::Read => "READ",
            PacketOpcode::Write => "WRITE",
            PacketOpcode::Reserved => "RESERVED",
        }
    }

    /// Looks up an opcode by logical name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidOpcode`] for names outside the set.
    pub fn from_name(name: &str) -> Result<Self, LookupError> {
        match name.to_ascii_uppercase().as_str() {
            "NOP" => Ok(PacketOpcode::Nop),
            "READ" => Ok(PacketOpcode::Read),
            "WRITE" => Ok(PacketOpcode::Write),
            "RESERVED" => Ok(PacketOpcode::Reserved),
            _ => Err(LookupError::InvalidOpcode(name.to_string())),
        }
    }
}

impl fmt::Display for PacketOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PacketOpcode {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Commands written to the CMD register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum CommandCode {
    /// Null command.
    Null = 0,
    /// Write configuration data.
    Wcfg = 1,
    /// Multiple frame write.
    Mfwr = 2,
    /// Last frame (deassert GHIGH_B).
    Lfrm = 3,
    /// Read configuration data.
    Rcfg = 4,
    /// Begin the startup sequence.
    Start = 5,
    /// Readback capture.
    Rcap = 6,
    /// Reset the CRC register.
    Rcrc = 7,
    /// Assert GHIGH_B (places interconnect in a known state).
    AgHigh = 8,
    /// Switch the configuration clock source.
    Switch = 9,
    /// Pulse the GRESTORE signal (restore flip-flop initial state).
    GRestore = 10,
    /// Begin the shutdown sequence.
    Shutdown = 11,
    /// Pulse the GCAPTURE signal.
    GCapture = 12,
    /// Desynchronize the configuration logic.
    Desync = 13,
    /// Internal PROG trigger (warm boot).
    IProg = 15,
}

impl CommandCode {
    /// Returns the command's CMD-register value.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Returns the command for a CMD-register value, if it is one of the
    /// known encodings.
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(CommandCode::Null),
            1 => Some(CommandCode::Wcfg),
            2 => Some(CommandCode::Mfwr),
            3 => Some(CommandCode::Lfrm),
            4 => Some(CommandCode::Rcfg),
            5 => Some(CommandCode::Start),
            6 => Some(CommandCode::Rcap),
            7 => Some(CommandCode::Rcrc),
            8 => Some(CommandCode::AgHigh),
            9 => Some(CommandCode::Switch),
            10 => Some(CommandCode::GRestore),
            11 => Some(CommandCode::Shutdown),
            12 => Some(CommandCode::GCapture),
            13 => Some(CommandCode::Desync),
            15 => Some(CommandCode::IProg),
            _ => None,
        }
    }

    /// Returns the canonical command name.
    pub const fn name(self) -> &'static str {
        match self {
            CommandCode::Null => "NULL",
            CommandCode::Wcfg => "WCFG",
            CommandCode::Mfwr => "MFWR",
            CommandCode::Lfrm => "LFRM",
            CommandCode::Rcfg => "RCFG",
            CommandCode::Start => "START",
            CommandCode::Rcap => "RCAP",
            CommandCode::Rcrc => "RCRC",
            CommandCode::AgHigh => "AGHIGH",
            CommandCode::Switch => "SWITCH",
            CommandCode::GRestore => "GRESTORE",
            CommandCode::Shutdown => "SHUTDOWN",
            CommandCode::GCapture => "GCAPTURE",
            CommandCode::Desync => "DESYNC",
            CommandCode::IProg => "IPROG",
        }
    }

    /// Looks up a command by logical name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidCommand`] for names outside the set.
    pub fn from_name(name: &str) -> Result<Self, LookupError> {
        match name.to_ascii_uppercase().as_str() {
            "NULL" => Ok(CommandCode::Null),
            "WCFG" => Ok(CommandCode::Wcfg),
            "MFWR" => Ok(CommandCode::Mfwr),
            "LFRM" => Ok(CommandCode::Lfrm),
            "RCFG" => Ok(CommandCode::Rcfg),
            "START" => Ok(CommandCode::Start),
            "RCAP" => Ok(CommandCode::Rcap),
            "RCRC" => Ok(CommandCode::Rcrc),
            "AGHIGH" => Ok(CommandCode::AgHigh),
            "SWITCH" => Ok(CommandCode::Switch),
            "GRESTORE" => Ok(CommandCode::GRestore),
            "SHUTDOWN" => Ok(CommandCode::Shutdown),
            "GCAPTURE" => Ok(CommandCode::GCapture),
            "DESYNC" => Ok(CommandCode::Desync),
            "IPROG" => Ok(CommandCode::IProg),
            _ => Err(LookupError::InvalidCommand(name.to_string())),
        }
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CommandCode {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
