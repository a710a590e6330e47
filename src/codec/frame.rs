//! Top-level frame dispatch.

use crate::core::{FrameError, MIN_FRAME_SIZE};

use super::data::DataFrame;
use super::join::{EncryptedJoinAccept, JoinRequest};
use super::mhdr::{MType, Mhdr};

/// A decoded LoRaWAN frame.
///
/// The variant is picked once from the MHDR message type; each variant
/// carries only the fields legal for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Join-request from a device.
    JoinRequest(JoinRequest),
    /// Join-accept, body still encrypted with the AppKey.
    JoinAccept(EncryptedJoinAccept),
    /// Data frame, uplink or downlink.
    Data(DataFrame),
}

impl Frame {
    /// Decode a raw frame.
    ///
    /// # Errors
    /// Returns a [`FrameError`] for frames shorter than MHDR plus MIC
    /// plus the shortest payload, for message types this server does not
    /// handle, and for any variant-specific length violation.
    pub fn decode(raw: &[u8]) -> Result<Self, FrameError> {
        if raw.len() < MIN_FRAME_SIZE {
            return Err(FrameError::TooShort {
                expected: MIN_FRAME_SIZE,
                actual: raw.len(),
            });
        }
        let mhdr = Mhdr::from_byte(raw[0])?;
        match mhdr.mtype() {
            MType::JoinRequest => JoinRequest::decode(raw).map(Self::JoinRequest),
            MType::JoinAccept => EncryptedJoinAccept::decode(raw).map(Self::JoinAccept),
            MType::UnconfirmedDataUp
            | MType::UnconfirmedDataDown
            | MType::ConfirmedDataUp
            | MType::ConfirmedDataDown => DataFrame::decode(raw).map(Self::Data),
            MType::RejoinRequest | MType::Proprietary => Err(FrameError::UnknownMType(raw[0])),
        }
    }

    /// Serialize to wire bytes, including the stored MIC.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::JoinRequest(request) => request.to_bytes(),
            Self::JoinAccept(accept) => accept.to_bytes(),
            Self::Data(frame) => frame.to_bytes(),
        }
    }

    /// Message type of the frame.
    pub fn mtype(&self) -> MType {
        match self {
            Self::JoinRequest(_) => MType::JoinRequest,
            Self::JoinAccept(accept) => accept.mhdr.mtype(),
            Self::Data(frame) => frame.mtype,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::FCtrl;
    use crate::core::{DevAddr, DevNonce, Eui64};

    #[test]
    fn test_dispatch_join_request() {
        let raw = JoinRequest::new(Eui64::from_u64(1), Eui64::from_u64(2), DevNonce::new(3))
            .to_bytes();
        match Frame::decode(&raw).unwrap() {
            Frame::JoinRequest(request) => assert_eq!(request.dev_eui, Eui64::from_u64(2)),
            other => panic!("expected join-request, got {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_data() {
        let raw = DataFrame::new(
            MType::ConfirmedDataUp,
            DevAddr::from_u32(42),
            FCtrl::NONE,
            1,
            vec![],
            None,
            vec![],
        )
        .unwrap()
        .to_bytes();
        let frame = Frame::decode(&raw).unwrap();
        assert_eq!(frame.mtype(), MType::ConfirmedDataUp);
        assert_eq!(frame.to_bytes(), raw);
    }

    #[test]
    fn test_dispatch_join_accept() {
        let mut raw = vec![0x20];
        raw.extend_from_slice(&[0xAB; 16]);
        let frame = Frame::decode(&raw).unwrap();
        assert_eq!(frame.mtype(), MType::JoinAccept);
        assert_eq!(frame.to_bytes(), raw);
    }

    #[test]
    fn test_short_frame_rejected() {
        assert_eq!(
            Frame::decode(&[0x40; 5]),
            Err(FrameError::TooShort {
                expected: MIN_FRAME_SIZE,
                actual: 5
            })
        );
    }

    #[test]
    fn test_unhandled_mtypes_rejected() {
        let mut raw = vec![0xC0];
        raw.extend_from_slice(&[0; 22]);
        assert_eq!(Frame::decode(&raw), Err(FrameError::UnknownMType(0xC0)));

        raw[0] = 0xE0;
        assert_eq!(Frame::decode(&raw), Err(FrameError::UnknownMType(0xE0)));
    }
}
