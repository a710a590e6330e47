//! Data frame encoding and decoding.

use crate::core::{
    DevAddr, Direction, FrameError, FramePort, Mic, DEV_ADDR_SIZE, FCTRL_ACK, FCTRL_ADR,
    FCTRL_ADR_ACK_REQ, FCTRL_FOPTS_LEN_MASK, FCTRL_FPENDING, MAX_FOPTS_LEN, MIC_SIZE,
    MIN_FRAME_SIZE,
};

use super::mhdr::{MType, Mhdr};

/// Frame control byte of a data frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FCtrl(u8);

impl FCtrl {
    /// No flags set.
    pub const NONE: Self = Self(0);

    /// Create from the raw byte.
    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// Get the raw byte value.
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    /// Check if the ADR bit is set.
    pub const fn adr(self) -> bool {
        self.0 & FCTRL_ADR != 0
    }

    /// Check if the ADRAckReq bit is set.
    pub const fn adr_ack_req(self) -> bool {
        self.0 & FCTRL_ADR_ACK_REQ != 0
    }

    /// Check if the ACK bit is set.
    pub const fn ack(self) -> bool {
        self.0 & FCTRL_ACK != 0
    }

    /// Check if the FPending bit is set.
    pub const fn fpending(self) -> bool {
        self.0 & FCTRL_FPENDING != 0
    }

    /// Declared frame-options length (bits 3..0).
    pub const fn fopts_len(self) -> usize {
        (self.0 & FCTRL_FOPTS_LEN_MASK) as usize
    }

    /// Set the ADR bit.
    pub const fn with_adr(self) -> Self {
        Self(self.0 | FCTRL_ADR)
    }

    /// Set the ADRAckReq bit.
    pub const fn with_adr_ack_req(self) -> Self {
        Self(self.0 | FCTRL_ADR_ACK_REQ)
    }

    /// Set the ACK bit.
    pub const fn with_ack(self) -> Self {
        Self(self.0 | FCTRL_ACK)
    }

    /// Set the FPending bit.
    pub const fn with_fpending(self) -> Self {
        Self(self.0 | FCTRL_FPENDING)
    }

    /// Stamp the frame-options length into bits 3..0.
    pub(crate) const fn with_fopts_len(self, len: usize) -> Self {
        Self((self.0 & !FCTRL_FOPTS_LEN_MASK) | (len as u8 & FCTRL_FOPTS_LEN_MASK))
    }
}

/// A data frame, uplink or downlink, confirmed or unconfirmed.
///
/// Wire format:
/// ```text
/// +--------+------------+--------+----------+--------+--------+------------+--------+
/// | MHDR   | DevAddr    | FCtrl  | FCnt     | FOpts  | FPort  | FRMPayload | MIC    |
/// | 1 byte | 4 (LE)     | 1 byte | 2 (LE16) | 0..15  | 0..1   | variable   | 4      |
/// +--------+------------+--------+----------+--------+--------+------------+--------+
/// ```
///
/// `frm_payload` holds the ciphertext exactly as on the wire; the payload
/// cipher in the crypto layer is applied separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFrame {
    /// Message type (one of the four data types).
    pub mtype: MType,
    /// Device network address.
    pub dev_addr: DevAddr,
    /// Frame control flags; the FOpts length bits are stamped on encode.
    pub fctrl: FCtrl,
    /// Wire frame counter (low 16 bits of the full counter).
    pub fcnt: u16,
    /// Frame options (piggybacked MAC commands).
    pub fopts: Vec<u8>,
    /// Frame port, present whenever `frm_payload` is.
    pub fport: Option<FramePort>,
    /// Encrypted application payload.
    pub frm_payload: Vec<u8>,
    /// Message integrity code.
    pub mic: Mic,
}

impl DataFrame {
    /// Create a data frame with a zeroed MIC.
    ///
    /// The MIC is stamped by the crypto layer once the session key and
    /// full frame counter are known.
    ///
    /// # Errors
    /// Returns [`FrameError::FOptsTooLong`] if `fopts` exceeds 15 bytes
    /// and [`FrameError::MissingFPort`] if a payload is supplied without
    /// a port.
    pub fn new(
        mtype: MType,
        dev_addr: DevAddr,
        fctrl: FCtrl,
        fcnt: u16,
        fopts: Vec<u8>,
        fport: Option<FramePort>,
        frm_payload: Vec<u8>,
    ) -> Result<Self, FrameError> {
        if fopts.len() > MAX_FOPTS_LEN {
            return Err(FrameError::FOptsTooLong { len: fopts.len() });
        }
        if !frm_payload.is_empty() && fport.is_none() {
            return Err(FrameError::MissingFPort);
        }
        Ok(Self {
            mtype,
            dev_addr,
            fctrl,
            fcnt,
            fopts,
            fport,
            frm_payload,
            mic: Mic::from_bytes([0; MIC_SIZE]),
        })
    }

    /// Direction of travel, from the message type.
    pub const fn direction(&self) -> Direction {
        match self.mtype {
            MType::UnconfirmedDataUp | MType::ConfirmedDataUp => Direction::Uplink,
            _ => Direction::Downlink,
        }
    }

    /// Parse a data frame from raw frame bytes (MHDR through MIC).
    ///
    /// # Errors
    /// Returns a [`FrameError`] when length constraints are violated or
    /// the declared FOpts length overruns the payload.
    pub fn decode(raw: &[u8]) -> Result<Self, FrameError> {
        if raw.len() < MIN_FRAME_SIZE {
            return Err(FrameError::TooShort {
                expected: MIN_FRAME_SIZE,
                actual: raw.len(),
            });
        }

        let mhdr = Mhdr::from_byte(raw[0])?;
        let mtype = mhdr.mtype();
        if !mtype.is_data() {
            return Err(FrameError::UnknownMType(raw[0]));
        }

        let mut dev_addr_bytes = [0u8; DEV_ADDR_SIZE];
        dev_addr_bytes.copy_from_slice(&raw[1..5]);
        let dev_addr = DevAddr::from_bytes(dev_addr_bytes);

        let fctrl = FCtrl::from_byte(raw[5]);
        let fcnt = u16::from_le_bytes([raw[6], raw[7]]);

        let declared = fctrl.fopts_len();
        let available = raw.len() - MIN_FRAME_SIZE;
        if declared > available {
            return Err(FrameError::FOptsOverrun {
                declared,
                available,
            });
        }
        let fopts = raw[8..8 + declared].to_vec();

        let rest = &raw[8 + declared..raw.len() - MIC_SIZE];
        let (fport, frm_payload) = match rest.split_first() {
            Some((port, payload)) => (Some(FramePort::new(*port)), payload.to_vec()),
            None => (None, Vec::new()),
        };

        let mut mic_bytes = [0u8; MIC_SIZE];
        mic_bytes.copy_from_slice(&raw[raw.len() - MIC_SIZE..]);

        Ok(Self {
            mtype,
            dev_addr,
            fctrl,
            fcnt,
            fopts,
            fport,
            frm_payload,
            mic: Mic::from_bytes(mic_bytes),
        })
    }

    /// Serialize to wire bytes, including the stored MIC.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            MIN_FRAME_SIZE + self.fopts.len() + usize::from(self.fport.is_some())
                + self.frm_payload.len(),
        );
        buf.push(Mhdr::new(self.mtype).as_byte());
        buf.extend_from_slice(self.dev_addr.as_bytes());
        buf.push(self.fctrl.with_fopts_len(self.fopts.len()).as_byte());
        buf.extend_from_slice(&self.fcnt.to_le_bytes());
        buf.extend_from_slice(&self.fopts);
        if let Some(port) = self.fport {
            buf.push(port.value());
        }
        buf.extend_from_slice(&self.frm_payload);
        buf.extend_from_slice(self.mic.as_bytes());
        buf
    }

    /// Bytes covered by the MIC: MHDR through the end of the FRMPayload.
    pub fn mic_message(&self) -> Vec<u8> {
        let mut msg = self.to_bytes();
        msg.truncate(msg.len() - MIC_SIZE);
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        DataFrame::new(
            MType::UnconfirmedDataUp,
            DevAddr::from_u32(0x0102_0304),
            FCtrl::NONE.with_adr(),
            7,
            vec![0x02],
            Some(FramePort::new(10)),
            vec![0xDE, 0xAD, 0xBE, 0xEF],
        )
        .unwrap()
    }

    #[test]
    fn test_data_frame_roundtrip() {
        let frame = sample_frame();
        let bytes = frame.to_bytes();
        let decoded = DataFrame::decode(&bytes).unwrap();
        assert_eq!(decoded.dev_addr, frame.dev_addr);
        assert_eq!(decoded.fcnt, frame.fcnt);
        assert_eq!(decoded.fopts, frame.fopts);
        assert_eq!(decoded.fport, frame.fport);
        assert_eq!(decoded.frm_payload, frame.frm_payload);
        assert_eq!(decoded.mic, frame.mic);
        assert!(decoded.fctrl.adr());
        assert_eq!(decoded.fctrl.fopts_len(), 1);
        assert_eq!(decoded.direction(), Direction::Uplink);
    }

    #[test]
    fn test_decode_known_bytes() {
        // MHDR 0x40, DevAddr 01020304 (LE), FCtrl 0x00, FCnt 5,
        // FPort 1, payload [AA BB], MIC 0x01020304.
        let raw = hex::decode("4004030201000500 01 aabb 04030201".replace(' ', "")).unwrap();
        let frame = DataFrame::decode(&raw).unwrap();
        assert_eq!(frame.mtype, MType::UnconfirmedDataUp);
        assert_eq!(frame.dev_addr.to_u32(), 0x0102_0304);
        assert_eq!(frame.fcnt, 5);
        assert_eq!(frame.fopts.len(), 0);
        assert_eq!(frame.fport, Some(FramePort::new(1)));
        assert_eq!(frame.frm_payload, vec![0xAA, 0xBB]);
        assert_eq!(frame.mic.as_bytes(), &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_decode_no_fport() {
        let frame = DataFrame::new(
            MType::ConfirmedDataDown,
            DevAddr::from_u32(1),
            FCtrl::NONE,
            0,
            vec![],
            None,
            vec![],
        )
        .unwrap();
        let decoded = DataFrame::decode(&frame.to_bytes()).unwrap();
        assert_eq!(decoded.fport, None);
        assert!(decoded.frm_payload.is_empty());
        assert_eq!(decoded.direction(), Direction::Downlink);
    }

    #[test]
    fn test_decode_too_short() {
        let raw = [0x40u8; 11];
        assert_eq!(
            DataFrame::decode(&raw),
            Err(FrameError::TooShort {
                expected: MIN_FRAME_SIZE,
                actual: 11
            })
        );
    }

    #[test]
    fn test_fopts_overrun() {
        // FCtrl declares 5 FOpts bytes but the frame has room for none.
        let mut raw = sample_frame().to_bytes();
        raw.truncate(12);
        raw[5] = 0x05;
        assert_eq!(
            DataFrame::decode(&raw),
            Err(FrameError::FOptsOverrun {
                declared: 5,
                available: 0
            })
        );
    }

    #[test]
    fn test_fopts_too_long_rejected() {
        let err = DataFrame::new(
            MType::UnconfirmedDataUp,
            DevAddr::from_u32(1),
            FCtrl::NONE,
            0,
            vec![0; 16],
            None,
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, FrameError::FOptsTooLong { len: 16 });
    }

    #[test]
    fn test_payload_without_port_rejected() {
        let err = DataFrame::new(
            MType::UnconfirmedDataUp,
            DevAddr::from_u32(1),
            FCtrl::NONE,
            0,
            vec![],
            None,
            vec![0x01],
        )
        .unwrap_err();
        assert_eq!(err, FrameError::MissingFPort);
    }
}
