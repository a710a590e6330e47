//! MAC header parsing.

use crate::core::{
    Direction, FrameError, MAJOR_LORAWAN_R1, MAJOR_MASK, MTYPE_CONFIRMED_DATA_DOWN,
    MTYPE_CONFIRMED_DATA_UP, MTYPE_JOIN_ACCEPT, MTYPE_JOIN_REQUEST, MTYPE_MASK, MTYPE_PROPRIETARY,
    MTYPE_REJOIN_REQUEST, MTYPE_UNCONFIRMED_DATA_DOWN, MTYPE_UNCONFIRMED_DATA_UP,
};

/// Message type carried in MHDR bits 7..5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MType {
    /// Join-request (uplink).
    JoinRequest = MTYPE_JOIN_REQUEST,
    /// Join-accept (downlink).
    JoinAccept = MTYPE_JOIN_ACCEPT,
    /// Unconfirmed data uplink.
    UnconfirmedDataUp = MTYPE_UNCONFIRMED_DATA_UP,
    /// Unconfirmed data downlink.
    UnconfirmedDataDown = MTYPE_UNCONFIRMED_DATA_DOWN,
    /// Confirmed data uplink.
    ConfirmedDataUp = MTYPE_CONFIRMED_DATA_UP,
    /// Confirmed data downlink.
    ConfirmedDataDown = MTYPE_CONFIRMED_DATA_DOWN,
    /// Rejoin-request (LoRaWAN 1.1, not handled by this server).
    RejoinRequest = MTYPE_REJOIN_REQUEST,
    /// Proprietary message.
    Proprietary = MTYPE_PROPRIETARY,
}

impl MType {
    /// Get the MHDR bits for this message type.
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Whether this is one of the four data message types.
    pub const fn is_data(self) -> bool {
        matches!(
            self,
            Self::UnconfirmedDataUp
                | Self::UnconfirmedDataDown
                | Self::ConfirmedDataUp
                | Self::ConfirmedDataDown
        )
    }

    /// Whether the frame requires an acknowledgment.
    pub const fn is_confirmed(self) -> bool {
        matches!(self, Self::ConfirmedDataUp | Self::ConfirmedDataDown)
    }

    /// Direction of travel, `None` for proprietary messages.
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::JoinRequest
            | Self::UnconfirmedDataUp
            | Self::ConfirmedDataUp
            | Self::RejoinRequest => Some(Direction::Uplink),
            Self::JoinAccept | Self::UnconfirmedDataDown | Self::ConfirmedDataDown => {
                Some(Direction::Downlink)
            }
            Self::Proprietary => None,
        }
    }
}

/// MAC header - the first byte of every frame.
///
/// ```text
/// +-------+-------+-------+
/// | MType | RFU   | Major |
/// | 7..5  | 4..2  | 1..0  |
/// +-------+-------+-------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mhdr(u8);

impl Mhdr {
    /// Create a header for a message type, major version LoRaWAN R1.
    pub const fn new(mtype: MType) -> Self {
        Self(mtype.as_byte())
    }

    /// Parse the header byte.
    ///
    /// # Errors
    /// Returns [`FrameError::UnsupportedMajor`] for any major version
    /// other than LoRaWAN R1.
    pub fn from_byte(byte: u8) -> Result<Self, FrameError> {
        let major = byte & MAJOR_MASK;
        if major != MAJOR_LORAWAN_R1 {
            return Err(FrameError::UnsupportedMajor(major));
        }
        Ok(Self(byte))
    }

    /// Get the raw header byte.
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    /// Get the message type.
    pub const fn mtype(self) -> MType {
        match self.0 & MTYPE_MASK {
            MTYPE_JOIN_REQUEST => MType::JoinRequest,
            MTYPE_JOIN_ACCEPT => MType::JoinAccept,
            MTYPE_UNCONFIRMED_DATA_UP => MType::UnconfirmedDataUp,
            MTYPE_UNCONFIRMED_DATA_DOWN => MType::UnconfirmedDataDown,
            MTYPE_CONFIRMED_DATA_UP => MType::ConfirmedDataUp,
            MTYPE_CONFIRMED_DATA_DOWN => MType::ConfirmedDataDown,
            MTYPE_REJOIN_REQUEST => MType::RejoinRequest,
            _ => MType::Proprietary,
        }
    }

    /// Get the major protocol version bits.
    pub const fn major(self) -> u8 {
        self.0 & MAJOR_MASK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mtype_roundtrip() {
        for mtype in [
            MType::JoinRequest,
            MType::JoinAccept,
            MType::UnconfirmedDataUp,
            MType::UnconfirmedDataDown,
            MType::ConfirmedDataUp,
            MType::ConfirmedDataDown,
            MType::RejoinRequest,
            MType::Proprietary,
        ] {
            let mhdr = Mhdr::new(mtype);
            assert_eq!(mhdr.mtype(), mtype);
            assert_eq!(mhdr.major(), 0);
            assert_eq!(Mhdr::from_byte(mhdr.as_byte()).unwrap(), mhdr);
        }
    }

    #[test]
    fn test_major_version_rejected() {
        assert_eq!(
            Mhdr::from_byte(0x41),
            Err(FrameError::UnsupportedMajor(0x01))
        );
        assert_eq!(
            Mhdr::from_byte(0x43),
            Err(FrameError::UnsupportedMajor(0x03))
        );
    }

    #[test]
    fn test_mtype_classification() {
        assert!(MType::ConfirmedDataUp.is_data());
        assert!(MType::ConfirmedDataUp.is_confirmed());
        assert!(!MType::UnconfirmedDataDown.is_confirmed());
        assert!(!MType::JoinRequest.is_data());
        assert_eq!(MType::ConfirmedDataUp.direction(), Some(Direction::Uplink));
        assert_eq!(
            MType::UnconfirmedDataDown.direction(),
            Some(Direction::Downlink)
        );
        assert_eq!(MType::Proprietary.direction(), None);
    }
}
