//! Join-request and join-accept encoding and decoding.

use crate::core::{
    DevAddr, DevNonce, Eui64, FrameError, Mic, APP_NONCE_SIZE, CF_LIST_SIZE, DEV_ADDR_SIZE,
    EUI64_SIZE, JOIN_ACCEPT_BODY_CFLIST_SIZE, JOIN_ACCEPT_BODY_SIZE, JOIN_REQUEST_SIZE,
    MIC_SIZE, NET_ID_SIZE,
};

use super::mhdr::{MType, Mhdr};

/// A join-request frame.
///
/// Wire format (23 bytes):
/// ```text
/// +--------+----------------+----------------+----------+--------+
/// | MHDR   | JoinEUI        | DevEUI         | DevNonce | MIC    |
/// | 1 byte | 8 bytes (LE)   | 8 bytes (LE)   | 2 (LE16) | 4      |
/// +--------+----------------+----------------+----------+--------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    /// Join server identifier.
    pub join_eui: Eui64,
    /// Device identifier.
    pub dev_eui: Eui64,
    /// Device nonce, fresh per join attempt.
    pub dev_nonce: DevNonce,
    /// Message integrity code, computed with the AppKey.
    pub mic: Mic,
}

impl JoinRequest {
    /// Create a join-request with a zeroed MIC.
    pub fn new(join_eui: Eui64, dev_eui: Eui64, dev_nonce: DevNonce) -> Self {
        Self {
            join_eui,
            dev_eui,
            dev_nonce,
            mic: Mic::from_bytes([0; MIC_SIZE]),
        }
    }

    /// Parse a join-request from raw frame bytes.
    ///
    /// # Errors
    /// Returns [`FrameError::BadLength`] unless the frame is exactly
    /// 23 bytes.
    pub fn decode(raw: &[u8]) -> Result<Self, FrameError> {
        if raw.len() != JOIN_REQUEST_SIZE {
            return Err(FrameError::BadLength {
                field: "join-request",
                expected: JOIN_REQUEST_SIZE,
                actual: raw.len(),
            });
        }
        let mhdr = Mhdr::from_byte(raw[0])?;
        if mhdr.mtype() != MType::JoinRequest {
            return Err(FrameError::UnknownMType(raw[0]));
        }

        let mut join_eui = [0u8; EUI64_SIZE];
        join_eui.copy_from_slice(&raw[1..9]);
        let mut dev_eui = [0u8; EUI64_SIZE];
        dev_eui.copy_from_slice(&raw[9..17]);
        let dev_nonce = DevNonce::from_bytes([raw[17], raw[18]]);
        let mut mic = [0u8; MIC_SIZE];
        mic.copy_from_slice(&raw[19..23]);

        Ok(Self {
            join_eui: Eui64::from_bytes(join_eui),
            dev_eui: Eui64::from_bytes(dev_eui),
            dev_nonce,
            mic: Mic::from_bytes(mic),
        })
    }

    /// Serialize to wire bytes, including the stored MIC.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(JOIN_REQUEST_SIZE);
        buf.push(Mhdr::new(MType::JoinRequest).as_byte());
        buf.extend_from_slice(self.join_eui.as_bytes());
        buf.extend_from_slice(self.dev_eui.as_bytes());
        buf.extend_from_slice(&self.dev_nonce.to_bytes());
        buf.extend_from_slice(self.mic.as_bytes());
        buf
    }

    /// Bytes covered by the MIC: MHDR through DevNonce.
    pub fn mic_message(&self) -> Vec<u8> {
        let mut msg = self.to_bytes();
        msg.truncate(msg.len() - MIC_SIZE);
        msg
    }
}

/// DLSettings byte of a join-accept.
///
/// ```text
/// +--------+-------------+------------+
/// | OptNeg | RX1DROffset | RX2DataRate|
/// | 7      | 6..4        | 3..0       |
/// +--------+-------------+------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DlSettings(u8);

impl DlSettings {
    /// Create from an RX1 data-rate offset and RX2 data-rate index.
    pub const fn new(rx1_dr_offset: u8, rx2_data_rate: u8) -> Self {
        Self(((rx1_dr_offset & 0x07) << 4) | (rx2_data_rate & 0x0F))
    }

    /// Create from the raw byte.
    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// Get the raw byte value.
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    /// RX1 data-rate offset (bits 6..4).
    pub const fn rx1_dr_offset(self) -> u8 {
        (self.0 >> 4) & 0x07
    }

    /// RX2 data-rate index (bits 3..0).
    pub const fn rx2_data_rate(self) -> u8 {
        self.0 & 0x0F
    }
}

/// A join-accept in its decrypted, logical form.
///
/// Plaintext layout (16 or 32 bytes after the MHDR):
/// ```text
/// +----------+--------+---------+------------+---------+-------------+-----+
/// | AppNonce | NetID  | DevAddr | DLSettings | RxDelay | CFList      | MIC |
/// | 3 bytes  | 3      | 4 (LE)  | 1          | 1       | 0 or 16     | 4   |
/// +----------+--------+---------+------------+---------+-------------+-----+
/// ```
///
/// On the wire everything after the MHDR is encrypted with the AppKey;
/// see [`EncryptedJoinAccept`] for that form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinAccept {
    /// Server nonce, wire order.
    pub app_nonce: [u8; APP_NONCE_SIZE],
    /// Network identifier, wire order.
    pub net_id: [u8; NET_ID_SIZE],
    /// Assigned device network address.
    pub dev_addr: DevAddr,
    /// Downlink settings (RX1 offset, RX2 data rate).
    pub dl_settings: DlSettings,
    /// Delay before the first receive window, in seconds (bits 3..0).
    pub rx_delay: u8,
    /// Optional channel-frequency list.
    pub cf_list: Option<[u8; CF_LIST_SIZE]>,
    /// Message integrity code, computed with the AppKey.
    pub mic: Mic,
}

impl JoinAccept {
    /// Create a join-accept with a zeroed MIC.
    pub fn new(
        app_nonce: [u8; APP_NONCE_SIZE],
        net_id: [u8; NET_ID_SIZE],
        dev_addr: DevAddr,
        dl_settings: DlSettings,
        rx_delay: u8,
        cf_list: Option<[u8; CF_LIST_SIZE]>,
    ) -> Self {
        Self {
            app_nonce,
            net_id,
            dev_addr,
            dl_settings,
            rx_delay,
            cf_list,
            mic: Mic::from_bytes([0; MIC_SIZE]),
        }
    }

    /// Parse the decrypted body (everything after the MHDR).
    ///
    /// # Errors
    /// Returns [`FrameError::JoinAcceptBody`] unless the body is exactly
    /// 16 or 32 bytes.
    pub fn decode_plaintext(body: &[u8]) -> Result<Self, FrameError> {
        let cf_list = match body.len() {
            JOIN_ACCEPT_BODY_SIZE => None,
            JOIN_ACCEPT_BODY_CFLIST_SIZE => {
                let mut cf = [0u8; CF_LIST_SIZE];
                cf.copy_from_slice(&body[12..28]);
                Some(cf)
            }
            other => return Err(FrameError::JoinAcceptBody(other)),
        };

        let mut app_nonce = [0u8; APP_NONCE_SIZE];
        app_nonce.copy_from_slice(&body[0..3]);
        let mut net_id = [0u8; NET_ID_SIZE];
        net_id.copy_from_slice(&body[3..6]);
        let mut dev_addr = [0u8; DEV_ADDR_SIZE];
        dev_addr.copy_from_slice(&body[6..10]);
        let mut mic = [0u8; MIC_SIZE];
        mic.copy_from_slice(&body[body.len() - MIC_SIZE..]);

        Ok(Self {
            app_nonce,
            net_id,
            dev_addr: DevAddr::from_bytes(dev_addr),
            dl_settings: DlSettings::from_byte(body[10]),
            rx_delay: body[11],
            cf_list,
            mic: Mic::from_bytes(mic),
        })
    }

    /// Serialize the plaintext body (fields plus MIC, without the MHDR).
    pub fn plaintext(&self) -> Vec<u8> {
        let size = if self.cf_list.is_some() {
            JOIN_ACCEPT_BODY_CFLIST_SIZE
        } else {
            JOIN_ACCEPT_BODY_SIZE
        };
        let mut buf = Vec::with_capacity(size);
        buf.extend_from_slice(&self.app_nonce);
        buf.extend_from_slice(&self.net_id);
        buf.extend_from_slice(self.dev_addr.as_bytes());
        buf.push(self.dl_settings.as_byte());
        buf.push(self.rx_delay);
        if let Some(cf_list) = &self.cf_list {
            buf.extend_from_slice(cf_list);
        }
        buf.extend_from_slice(self.mic.as_bytes());
        buf
    }

    /// Bytes covered by the MIC: MHDR through the CFList.
    pub fn mic_message(&self) -> Vec<u8> {
        let mut msg = Vec::with_capacity(1 + JOIN_ACCEPT_BODY_CFLIST_SIZE - MIC_SIZE);
        msg.push(Mhdr::new(MType::JoinAccept).as_byte());
        let body = self.plaintext();
        msg.extend_from_slice(&body[..body.len() - MIC_SIZE]);
        msg
    }
}

/// A join-accept as it appears on the wire: MHDR followed by the
/// AppKey-encrypted body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedJoinAccept {
    /// MAC header (the only cleartext byte).
    pub mhdr: Mhdr,
    /// Encrypted fields and MIC, 16 or 32 bytes.
    pub body: Vec<u8>,
}

impl EncryptedJoinAccept {
    /// Parse a join-accept from raw frame bytes.
    ///
    /// The body stays encrypted; the crypto layer recovers the fields.
    ///
    /// # Errors
    /// Returns [`FrameError::JoinAcceptBody`] unless the encrypted body
    /// is exactly 16 or 32 bytes.
    pub fn decode(raw: &[u8]) -> Result<Self, FrameError> {
        if raw.is_empty() {
            return Err(FrameError::TooShort {
                expected: 1 + JOIN_ACCEPT_BODY_SIZE,
                actual: 0,
            });
        }
        let mhdr = Mhdr::from_byte(raw[0])?;
        if mhdr.mtype() != MType::JoinAccept {
            return Err(FrameError::UnknownMType(raw[0]));
        }
        let body = &raw[1..];
        if body.len() != JOIN_ACCEPT_BODY_SIZE && body.len() != JOIN_ACCEPT_BODY_CFLIST_SIZE {
            return Err(FrameError::JoinAcceptBody(body.len()));
        }
        Ok(Self {
            mhdr,
            body: body.to_vec(),
        })
    }

    /// Serialize to wire bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1 + self.body.len());
        buf.push(self.mhdr.as_byte());
        buf.extend_from_slice(&self.body);
        buf
    }
}
