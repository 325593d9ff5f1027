//! Error codes shared by hosts and drivers
//!
//! Hosts and drivers use the HAL's [`Error`]; this module adds the
//! translation from wire-level failures.

use dsipanel_protocol::PacketError;

pub use dsipanel_hal::Error;

/// Map a packet building failure onto a host error code
pub fn from_packet_error(err: PacketError) -> Error {
    match err {
        PacketError::PayloadTooLarge
        | PacketError::InvalidChannel
        | PacketError::WrongPacketKind
        | PacketError::UnknownDataType => Error::InvalidArgument,
        PacketError::BufferTooSmall => Error::NoMemory,
        PacketError::InvalidEcc | PacketError::InvalidChecksum | PacketError::Incomplete => {
            Error::Io
        }
    }
}
