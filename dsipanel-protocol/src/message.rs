//! DSI transfer messages
//!
//! A message is what a driver hands to the DSI host: the bytes to send plus
//! how to send them. The host turns it into a [`Packet`] (or drives its own
//! controller registers from the same fields).

use bitflags::bitflags;
use heapless::Vec;

use crate::dcs::DcsCommand;
use crate::packet::{DataType, Packet, PacketError, MAX_CHANNEL, MAX_PAYLOAD_SIZE};

bitflags! {
    /// Per-message transmission flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MsgFlags: u8 {
        /// Request an acknowledge from the peripheral
        const REQ_ACK = 1 << 0;
        /// Transmit in low-power mode rather than high-speed
        const USE_LPM = 1 << 1;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MsgFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "MsgFlags({=u8:#04x})", self.bits());
    }
}

/// A single outgoing DSI transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsiMessage {
    /// Virtual channel (0-3)
    pub channel: u8,
    /// Packet data type
    pub data_type: DataType,
    /// Transmission flags
    pub flags: MsgFlags,
    /// Bytes to transmit (DCS opcode first for DCS messages)
    pub tx: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl DsiMessage {
    /// Build a DCS write of `cmd` followed by `params`
    ///
    /// Picks the data type the way DSI hosts expect: short write without a
    /// parameter, short write with one parameter, long write otherwise.
    pub fn dcs_write(channel: u8, cmd: u8, params: &[u8]) -> Result<Self, PacketError> {
        if channel > MAX_CHANNEL {
            return Err(PacketError::InvalidChannel);
        }

        let data_type = match params.len() {
            0 => DataType::DcsShortWrite,
            1 => DataType::DcsShortWriteParam,
            _ => DataType::DcsLongWrite,
        };

        let mut tx = Vec::new();
        tx.push(cmd).map_err(|_| PacketError::PayloadTooLarge)?;
        tx.extend_from_slice(params)
            .map_err(|_| PacketError::PayloadTooLarge)?;

        Ok(Self {
            channel,
            data_type,
            flags: MsgFlags::empty(),
            tx,
        })
    }

    /// Build a parameterless DCS command
    pub fn dcs(channel: u8, cmd: DcsCommand) -> Result<Self, PacketError> {
        Self::dcs_write(channel, cmd.code(), &[])
    }

    /// Build a "set maximum return packet size" request
    pub fn set_maximum_return_packet_size(channel: u8, size: u16) -> Result<Self, PacketError> {
        if channel > MAX_CHANNEL {
            return Err(PacketError::InvalidChannel);
        }

        let mut tx = Vec::new();
        tx.extend_from_slice(&size.to_le_bytes())
            .map_err(|_| PacketError::PayloadTooLarge)?;

        Ok(Self {
            channel,
            data_type: DataType::SetMaximumReturnPacketSize,
            flags: MsgFlags::empty(),
            tx,
        })
    }

    /// Return this message with extra flags set
    pub fn with_flags(mut self, flags: MsgFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Check if this message goes out in low-power mode
    pub fn is_low_power(&self) -> bool {
        self.flags.contains(MsgFlags::USE_LPM)
    }

    /// DCS opcode of this message, if it is a DCS write
    pub fn dcs_command(&self) -> Option<u8> {
        match self.data_type {
            DataType::DcsShortWrite | DataType::DcsShortWriteParam | DataType::DcsLongWrite => {
                self.tx.first().copied()
            }
            _ => None,
        }
    }

    /// Pack this message into a wire packet
    pub fn to_packet(&self) -> Result<Packet, PacketError> {
        if self.data_type.is_long() {
            return Packet::long(self.channel, self.data_type, &self.tx);
        }

        if self.tx.len() > 2 {
            return Err(PacketError::PayloadTooLarge);
        }

        let data = [
            self.tx.first().copied().unwrap_or(0),
            self.tx.get(1).copied().unwrap_or(0),
        ];
        Packet::short(self.channel, self.data_type, data)
    }
}
