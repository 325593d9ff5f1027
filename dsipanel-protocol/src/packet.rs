//! DSI packet encoding and decoding
//!
//! Packet format:
//! - DI (1 byte): virtual channel (bits 7:6) and data type (bits 5:0)
//! - DATA0/DATA1 or WC (2 bytes): short packet data, or long packet word count (LE)
//! - ECC (1 byte): Hamming code over the three bytes above, bits 7:6 zero
//! - PAYLOAD (long packets only): WC bytes
//! - CHECKSUM (long packets only): CRC-16 over the payload, little-endian

use heapless::Vec;

/// Packet header size (DI + 2 data bytes + ECC)
pub const HEADER_SIZE: usize = 4;

/// Long packet checksum size
pub const CHECKSUM_SIZE: usize = 2;

/// Maximum long packet payload this crate will build or accept
pub const MAX_PAYLOAD_SIZE: usize = 128;

/// Maximum complete packet size (HEADER + MAX_PAYLOAD + CHECKSUM)
pub const MAX_PACKET_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD_SIZE + CHECKSUM_SIZE;

/// Highest virtual channel number
pub const MAX_CHANNEL: u8 = 3;

/// Errors that can occur during packet parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Virtual channel outside 0-3
    InvalidChannel,
    /// Header ECC mismatch
    InvalidEcc,
    /// Payload checksum mismatch
    InvalidChecksum,
    /// Data type not known to this crate
    UnknownDataType,
    /// Short packet data type used for a long payload or vice versa
    WrongPacketKind,
    /// Packet is incomplete (need more bytes)
    Incomplete,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Processor-to-peripheral data types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DataType {
    GenericShortWrite0 = 0x03,
    GenericShortWrite1 = 0x13,
    GenericShortWrite2 = 0x23,
    GenericRead0 = 0x04,
    GenericRead1 = 0x14,
    GenericRead2 = 0x24,
    /// DCS command without parameter
    DcsShortWrite = 0x05,
    /// DCS command with one parameter
    DcsShortWriteParam = 0x15,
    DcsRead = 0x06,
    SetMaximumReturnPacketSize = 0x37,
    NullPacket = 0x09,
    BlankingPacket = 0x19,
    GenericLongWrite = 0x29,
    /// DCS command with two or more parameters
    DcsLongWrite = 0x39,
}

impl DataType {
    /// Get the data type as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a data type from the low six bits of a DI byte
    pub fn from_u8(value: u8) -> Option<Self> {
        use DataType::*;

        match value {
            0x03 => Some(GenericShortWrite0),
            0x13 => Some(GenericShortWrite1),
            0x23 => Some(GenericShortWrite2),
            0x04 => Some(GenericRead0),
            0x14 => Some(GenericRead1),
            0x24 => Some(GenericRead2),
            0x05 => Some(DcsShortWrite),
            0x15 => Some(DcsShortWriteParam),
            0x06 => Some(DcsRead),
            0x37 => Some(SetMaximumReturnPacketSize),
            0x09 => Some(NullPacket),
            0x19 => Some(BlankingPacket),
            0x29 => Some(GenericLongWrite),
            0x39 => Some(DcsLongWrite),
            _ => None,
        }
    }

    /// Check if packets of this type carry a word count and payload
    pub fn is_long(self) -> bool {
        matches!(
            self,
            DataType::NullPacket
                | DataType::BlankingPacket
                | DataType::GenericLongWrite
                | DataType::DcsLongWrite
        )
    }

    /// Check if this type requests data back from the peripheral
    pub fn is_read(self) -> bool {
        matches!(
            self,
            DataType::GenericRead0
                | DataType::GenericRead1
                | DataType::GenericRead2
                | DataType::DcsRead
        )
    }
}

/// Parity masks over the 24 header bits, one per ECC bit P0..P5
const ECC_MASKS: [u32; 6] = [
    0xF1_2C_B7, 0xF2_55_5B, 0x74_9A_6D, 0xB8_E3_8E, 0xDF_03_F0, 0xEF_FC_00,
];

/// Compute the header ECC for DI, DATA0/WC lo and DATA1/WC hi
///
/// Bits 7:6 of the result are always zero.
pub fn ecc(header: [u8; 3]) -> u8 {
    let data = u32::from(header[0]) | u32::from(header[1]) << 8 | u32::from(header[2]) << 16;

    ECC_MASKS
        .iter()
        .enumerate()
        .fold(0u8, |acc, (bit, mask)| {
            acc | (((data & mask).count_ones() & 1) as u8) << bit
        })
}

/// Compute the long packet payload checksum
///
/// CRC-16 with polynomial x^16 + x^12 + x^5 + 1, processed LSB first,
/// seeded with 0xFFFF and no final inversion.
pub fn checksum(payload: &[u8]) -> u16 {
    let mut crc = 0xFFFFu16;
    for &byte in payload {
        crc ^= u16::from(byte);
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0x8408;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}

/// A parsed or constructed DSI packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Virtual channel (0-3)
    pub channel: u8,
    /// Data type
    pub data_type: DataType,
    /// Short packets: exactly the two header data bytes. Long packets: the payload.
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Packet {
    /// Create a short packet
    pub fn short(channel: u8, data_type: DataType, data: [u8; 2]) -> Result<Self, PacketError> {
        if channel > MAX_CHANNEL {
            return Err(PacketError::InvalidChannel);
        }
        if data_type.is_long() {
            return Err(PacketError::WrongPacketKind);
        }

        let mut payload = Vec::new();
        payload
            .extend_from_slice(&data)
            .map_err(|_| PacketError::PayloadTooLarge)?;

        Ok(Self {
            channel,
            data_type,
            payload,
        })
    }

    /// Create a long packet
    pub fn long(channel: u8, data_type: DataType, payload: &[u8]) -> Result<Self, PacketError> {
        if channel > MAX_CHANNEL {
            return Err(PacketError::InvalidChannel);
        }
        if !data_type.is_long() {
            return Err(PacketError::WrongPacketKind);
        }

        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| PacketError::PayloadTooLarge)?;

        Ok(Self {
            channel,
            data_type,
            payload: payload_vec,
        })
    }

    /// Check if this is a long packet
    pub fn is_long(&self) -> bool {
        self.data_type.is_long()
    }

    /// DI byte: virtual channel and data type
    pub fn data_id(&self) -> u8 {
        (self.channel << 6) | (self.data_type.as_u8() & 0x3F)
    }

    /// Build the four header bytes, ECC included
    pub fn header(&self) -> [u8; HEADER_SIZE] {
        let (b1, b2) = if self.is_long() {
            let wc = self.payload.len() as u16;
            (wc as u8, (wc >> 8) as u8)
        } else {
            (
                self.payload.first().copied().unwrap_or(0),
                self.payload.get(1).copied().unwrap_or(0),
            )
        };

        let di = self.data_id();
        [di, b1, b2, ecc([di, b1, b2])]
    }

    /// Number of bytes [`encode`](Self::encode) writes
    pub fn encoded_len(&self) -> usize {
        if self.is_long() {
            HEADER_SIZE + self.payload.len() + CHECKSUM_SIZE
        } else {
            HEADER_SIZE
        }
    }

    /// Encode this packet into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, PacketError> {
        let len = self.encoded_len();
        if buffer.len() < len {
            return Err(PacketError::BufferTooSmall);
        }

        buffer[..HEADER_SIZE].copy_from_slice(&self.header());

        if self.is_long() {
            let end = HEADER_SIZE + self.payload.len();
            buffer[HEADER_SIZE..end].copy_from_slice(&self.payload);
            buffer[end..end + CHECKSUM_SIZE].copy_from_slice(&checksum(&self.payload).to_le_bytes());
        }

        Ok(len)
    }

    /// Encode this packet into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_PACKET_SIZE>, PacketError> {
        let mut buffer = [0u8; MAX_PACKET_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| PacketError::BufferTooSmall)?;
        Ok(vec)
    }

    /// Parse one packet from the start of `bytes`
    ///
    /// Returns the packet and the number of bytes it occupied.
    pub fn parse(bytes: &[u8]) -> Result<(Self, usize), PacketError> {
        if bytes.len() < HEADER_SIZE {
            return Err(PacketError::Incomplete);
        }

        let (di, b1, b2) = (bytes[0], bytes[1], bytes[2]);
        if bytes[3] != ecc([di, b1, b2]) {
            return Err(PacketError::InvalidEcc);
        }

        let channel = di >> 6;
        let data_type = DataType::from_u8(di & 0x3F).ok_or(PacketError::UnknownDataType)?;

        if !data_type.is_long() {
            let packet = Self::short(channel, data_type, [b1, b2])?;
            return Ok((packet, HEADER_SIZE));
        }

        let wc = u16::from_le_bytes([b1, b2]) as usize;
        if wc > MAX_PAYLOAD_SIZE {
            return Err(PacketError::PayloadTooLarge);
        }

        let end = HEADER_SIZE + wc;
        let total = end + CHECKSUM_SIZE;
        if bytes.len() < total {
            return Err(PacketError::Incomplete);
        }

        let payload = &bytes[HEADER_SIZE..end];
        let received = u16::from_le_bytes([bytes[end], bytes[end + 1]]);
        if received != checksum(payload) {
            return Err(PacketError::InvalidChecksum);
        }

        let packet = Self::long(channel, data_type, payload)?;
        Ok((packet, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ecc_known_headers() {
        // exit_sleep_mode and set_display_on as they appear on the wire
        assert_eq!(ecc([0x05, 0x11, 0x00]), 0x36);
        assert_eq!(ecc([0x05, 0x29, 0x00]), 0x1C);
    }

    #[test]
    fn test_checksum_check_value() {
        assert_eq!(checksum(b"123456789"), 0x6F91);
        assert_eq!(checksum(&[]), 0xFFFF);
    }

    #[test]
    fn test_short_packet_encode() {
        let packet = Packet::short(0, DataType::DcsShortWrite, [0x11, 0x00]).unwrap();
        let mut buffer = [0u8; 8];
        let len = packet.encode(&mut buffer).unwrap();

        assert_eq!(len, 4);
        assert_eq!(&buffer[..4], &[0x05, 0x11, 0x00, 0x36]);
    }

    #[test]
    fn test_long_packet_encode() {
        let packet = Packet::long(1, DataType::DcsLongWrite, &[0x2C, 0x01, 0x02]).unwrap();
        let encoded = packet.encode_to_vec().unwrap();

        assert_eq!(encoded.len(), 4 + 3 + 2);
        assert_eq!(encoded[0], 0x40 | 0x39); // channel 1
        assert_eq!(encoded[1], 3); // word count low
        assert_eq!(encoded[2], 0); // word count high
        assert_eq!(&encoded[4..7], &[0x2C, 0x01, 0x02]);
        assert_eq!(&encoded[7..], &0xA561u16.to_le_bytes());
    }

    #[test]
    fn test_channel_out_of_range() {
        let result = Packet::short(4, DataType::DcsShortWrite, [0, 0]);
        assert_eq!(result, Err(PacketError::InvalidChannel));
    }

    #[test]
    fn test_packet_kind_mismatch() {
        assert_eq!(
            Packet::short(0, DataType::DcsLongWrite, [0, 0]),
            Err(PacketError::WrongPacketKind)
        );
        assert_eq!(
            Packet::long(0, DataType::DcsShortWrite, &[0]),
            Err(PacketError::WrongPacketKind)
        );
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        let result = Packet::long(0, DataType::DcsLongWrite, &large_payload);
        assert_eq!(result, Err(PacketError::PayloadTooLarge));
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let packet = Packet::long(0, DataType::GenericLongWrite, &[1, 2, 3]).unwrap();
        let mut buffer = [0u8; 6];
        assert_eq!(packet.encode(&mut buffer), Err(PacketError::BufferTooSmall));
    }

    #[test]
    fn test_parse_incomplete() {
        assert_eq!(Packet::parse(&[0x05, 0x11]), Err(PacketError::Incomplete));

        let packet = Packet::long(0, DataType::DcsLongWrite, &[1, 2, 3, 4]).unwrap();
        let encoded = packet.encode_to_vec().unwrap();
        assert_eq!(
            Packet::parse(&encoded[..encoded.len() - 1]),
            Err(PacketError::Incomplete)
        );
    }

    #[test]
    fn test_parse_corrupted_payload() {
        let packet = Packet::long(0, DataType::DcsLongWrite, &[0xB0, 0x04]).unwrap();
        let mut encoded = packet.encode_to_vec().unwrap();
        encoded[5] ^= 0x01;

        assert_eq!(Packet::parse(&encoded), Err(PacketError::InvalidChecksum));
    }

    #[test]
    fn test_parse_unknown_data_type() {
        let header = [0x3F, 0x00, 0x00];
        let bytes = [header[0], header[1], header[2], ecc(header)];
        assert_eq!(Packet::parse(&bytes), Err(PacketError::UnknownDataType));
    }

    #[test]
    fn test_parse_leaves_trailing_bytes() {
        let first = Packet::short(0, DataType::DcsShortWrite, [0x29, 0x00]).unwrap();
        let mut stream = first.encode_to_vec().unwrap();
        stream.extend_from_slice(&[0xAA, 0xBB]).unwrap();

        let (parsed, used) = Packet::parse(&stream).unwrap();
        assert_eq!(parsed, first);
        assert_eq!(used, 4);
    }

    proptest! {
        #[test]
        fn single_bit_header_corruption_is_detected(
            data0 in any::<u8>(),
            data1 in any::<u8>(),
            channel in 0u8..=MAX_CHANNEL,
            bit in 0usize..32,
        ) {
            let packet = Packet::short(channel, DataType::GenericShortWrite2, [data0, data1]).unwrap();
            let mut header = packet.header();
            header[bit / 8] ^= 1 << (bit % 8);

            prop_assert_eq!(Packet::parse(&header), Err(PacketError::InvalidEcc));
        }

        #[test]
        fn long_payloads_parse_back(
            payload in proptest::collection::vec(any::<u8>(), 0..MAX_PAYLOAD_SIZE),
            channel in 0u8..=MAX_CHANNEL,
        ) {
            let packet = Packet::long(channel, DataType::DcsLongWrite, &payload).unwrap();
            let encoded = packet.encode_to_vec().unwrap();
            let (parsed, used) = Packet::parse(&encoded).unwrap();

            prop_assert_eq!(used, encoded.len());
            prop_assert_eq!(parsed.channel, channel);
            prop_assert_eq!(&parsed.payload[..], &payload[..]);
        }
    }
}
