//! The ordered packet sequence with a rolling checksum.
//!
//! `PacketList` is the unit a generator builds and a serializer consumes:
//! an append-only list of packets whose rolling CRC always equals the
//! checksum of every wire word (headers included) appended so far. The
//! device keeps the same accumulator while it consumes the stream, so
//! append order is exact: any divergence aborts configuration on real
//! hardware.

use crate::crc::Crc;
use crate::packet::{Packet, PacketError, PacketType};
use crate::registers::{CommandCode, PacketOpcode, RegisterType};
use serde::{Deserialize, Serialize};

/// An ordered, appendable sequence of packets with a rolling CRC.
///
/// Append is the only mutator. A reset-CRC command packet zeroes the
/// accumulator (after its own words fold in), mirroring the device;
/// nothing else resets it. In particular, committing the checksum via
/// [`PacketList::add_crc_write_packet`] leaves it rolling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketList {
    packets: Vec<Packet>,
    crc: Crc,
}

impl PacketList {
    /// Creates an empty sequence with a reset accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one packet, folding its wire words into the rolling CRC.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::UnpairedType2`] if `packet` is a Type-2
    /// packet and the previously appended packet is not a zero-word Type-1
    /// write header (the Type-2 form carries no address field, so the
    /// device takes its target register from that header).
    pub fn add(&mut self, packet: Packet) -> Result<(), PacketError> {
        if packet.header_type() == PacketType::Type2
            && !self
                .packets
                .last()
                .is_some_and(Packet::is_zero_word_type1_write)
        {
            return Err(PacketError::UnpairedType2);
        }
        self.fold(&packet);
        if packet.command_code() == Some(CommandCode::Rcrc) {
            self.crc.reset();
        }
        self.packets.push(packet);
        Ok(())
    }

    /// Appends packets in order.
    ///
    /// # Errors
    ///
    /// Propagates the first append failure; packets before it remain
    /// appended.
    pub fn add_all(&mut self, packets: impl IntoIterator<Item = Packet>) -> Result<(), PacketError> {
        for packet in packets {
            self.add(packet)?;
        }
        Ok(())
    }

    /// Appends a one-word write of the current accumulator value to the
    /// CRC register, committing the checksum into the stream.
    ///
    /// The written value itself still folds into the ongoing checksum, so
    /// the accumulator keeps matching the device's bit-for-bit.
    pub fn add_crc_write_packet(&mut self) {
        let value = self.crc.value();
        let packet = Packet::one_word(PacketOpcode::Write, RegisterType::Crc, value);
        self.fold(&packet);
        self.packets.push(packet);
    }

    /// Appends a Type-2 write as its required pair: the zero-word Type-1
    /// header naming `register`, then the Type-2 packet carrying `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::Type2Overflow`] if `payload` exceeds the
    /// 27-bit word-count field; nothing is appended in that case.
    pub fn add_type2_write(
        &mut self,
        register: RegisterType,
        payload: Vec<u32>,
    ) -> Result<(), PacketError> {
        let body = Packet::type2_write(payload)?;
        self.add(Packet::zero_word_write(register))?;
        self.add(body)
    }

    fn fold(&mut self, packet: &Packet) {
        self.crc.update_word(packet.header_word());
        self.crc.update_words(packet.payload());
    }

    /// Returns the appended packets in order.
    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    /// Returns the number of packets appended.
    pub fn len(&self) -> usize {
        self.packets.len()
    }

    /// True if no packet has been appended.
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Returns the total wire length in words (headers + payloads).
    pub fn word_len(&self) -> usize {
        self.packets.iter().map(Packet::word_len).sum()
    }

    /// Flattens the sequence to its wire words, in order.
    ///
    /// Byte-level framing (each word big-endian) is the serializer's job.
    pub fn words(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.word_len());
        for packet in &self.packets {
            packet.write_words(&mut out);
        }
        out
    }

    /// Returns the current rolling CRC value.
    pub fn crc(&self) -> u32 {
        self.crc.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crc::Crc;

    #[test]
    fn new_list_is_empty() {
        let list = PacketList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.word_len(), 0);
        assert_eq!(list.crc(), 0);
    }

    #[test]
    fn add_folds_header_and_payload() {
        let mut list = PacketList::new();
        let packet = Packet::one_word(PacketOpcode::Write, RegisterType::Far, 0x00EF_8000);
        let mut expected = Crc::new();
        expected.update_word(packet.header_word());
        expected.update_word(0x00EF_8000);

        list.add(packet).unwrap();
        assert_eq!(list.crc(), expected.value());
    }

    #[test]
    fn crc_is_append_associative() {
        let packets: Vec<Packet> = (0..40)
            .map(|i| Packet::one_word(PacketOpcode::Write, RegisterType::Far, i))
            .collect();

        // One add_all against per-packet adds split at arbitrary points.
        let mut one_pass = PacketList::new();
        one_pass.add_all(packets.clone()).unwrap();

        for split in [1, 7, 20, 39] {
            let mut split_list = PacketList::new();
            split_list.add_all(packets[..split].to_vec()).unwrap();
            split_list.add_all(packets[split..].to_vec()).unwrap();
            assert_eq!(split_list.crc(), one_pass.crc());
        }

        // And both equal the checksum of the flattened stream.
        let mut whole = Crc::new();
        whole.update_words(&one_pass.words());
        assert_eq!(one_pass.crc(), whole.value());
    }

    #[test]
    fn rcrc_command_resets_the_accumulator() {
        let mut list = PacketList::new();
        list.add(Packet::one_word(
            PacketOpcode::Write,
            RegisterType::Wbstar,
            0,
        ))
        .unwrap();
        assert_ne!(list.crc(), 0);
        list.add(Packet::command(CommandCode::Rcrc)).unwrap();
        assert_eq!(list.crc(), 0);
    }

    #[test]
    fn other_commands_do_not_reset() {
        let mut list = PacketList::new();
        list.add(Packet::command(CommandCode::Null)).unwrap();
        assert_ne!(list.crc(), 0);
    }

    #[test]
    fn crc_write_packet_carries_accumulator_and_keeps_rolling() {
        let mut list = PacketList::new();
        list.add(Packet::one_word(
            PacketOpcode::Write,
            RegisterType::Idcode,
            0x0424_A093,
        ))
        .unwrap();
        let committed = list.crc();

        list.add_crc_write_packet();
        let crc_packet = list.packets().last().unwrap();
        assert_eq!(crc_packet.register(), Some(RegisterType::Crc));
        assert_eq!(crc_packet.payload(), &[committed]);
        // The write itself folded in, so the accumulator moved on.
        assert_ne!(list.crc(), committed);

        // Replaying the whole stream reproduces the final accumulator.
        let mut replay = Crc::new();
        replay.update_words(&list.words());
        assert_eq!(replay.value(), list.crc());
    }

    #[test]
    fn unpaired_type2_is_rejected() {
        let mut list = PacketList::new();
        let err = list.add(Packet::type2_write(vec![1, 2]).unwrap()).unwrap_err();
        assert_eq!(err, PacketError::UnpairedType2);
        assert!(list.is_empty());

        // A NOP between header and body also breaks the pairing.
        list.add(Packet::zero_word_write(RegisterType::Fdri)).unwrap();
        list.add(Packet::nop()).unwrap();
        let err = list.add(Packet::type2_write(vec![1]).unwrap()).unwrap_err();
        assert_eq!(err, PacketError::UnpairedType2);
    }

    #[test]
    fn add_type2_write_appends_the_pair() {
        let mut list = PacketList::new();
        list.add_type2_write(RegisterType::Fdri, vec![9, 8, 7]).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.packets()[0].is_zero_word_type1_write());
        assert_eq!(list.packets()[0].register(), Some(RegisterType::Fdri));
        assert_eq!(list.packets()[1].header_type(), PacketType::Type2);
        assert_eq!(list.packets()[1].payload(), &[9, 8, 7]);
    }

    #[test]
    fn words_flattens_in_order() {
        let mut list = PacketList::new();
        list.add(Packet::nop()).unwrap();
        list.add(Packet::one_word(PacketOpcode::Write, RegisterType::Far, 5))
            .unwrap();
        let words = list.words();
        assert_eq!(words.len(), 3);
        assert_eq!(words[0], 0x2000_0000);
        assert_eq!(words[2], 5);
        assert_eq!(list.word_len(), 3);
    }

    #[test]
    fn serde_round_trip() {
        let mut list = PacketList::new();
        list.add(Packet::command(CommandCode::Start)).unwrap();
        list.add_crc_write_packet();
        let json = serde_json::to_string(&list).unwrap();
        let back: PacketList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
        assert_eq!(back.crc(), list.crc());
    }
}
