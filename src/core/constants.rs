//! Protocol constants from the LoRaWAN L2 1.0.x specification.
//!
//! These values are fixed by the protocol and MUST NOT be changed.

use std::time::Duration;

// =============================================================================
// FRAME SIZES (LoRaWAN L2 1.0.x §4)
// =============================================================================

/// MAC header size (one byte: message type + major version).
pub const MHDR_SIZE: usize = 1;

/// Message integrity code size.
pub const MIC_SIZE: usize = 4;

/// Device network address size.
pub const DEV_ADDR_SIZE: usize = 4;

/// EUI-64 identifier size (DevEUI, JoinEUI).
pub const EUI64_SIZE: usize = 8;

/// Frame control byte size.
pub const FCTRL_SIZE: usize = 1;

/// Wire frame counter size (low 16 bits of the full counter).
pub const FCNT_SIZE: usize = 2;

/// Frame port size when present.
pub const FPORT_SIZE: usize = 1;

/// Maximum frame options length encodable in FCtrl.
pub const MAX_FOPTS_LEN: usize = 15;

/// Minimum decodable frame: MHDR + shortest data payload + MIC.
pub const MIN_FRAME_SIZE: usize = MHDR_SIZE + DEV_ADDR_SIZE + FCTRL_SIZE + FCNT_SIZE + MIC_SIZE;

/// Device nonce size.
pub const DEV_NONCE_SIZE: usize = 2;

/// Application nonce size.
pub const APP_NONCE_SIZE: usize = 3;

/// Network identifier size.
pub const NET_ID_SIZE: usize = 3;

/// Optional channel-frequency list size in a join-accept.
pub const CF_LIST_SIZE: usize = 16;

/// Join-request frame size (MHDR + JoinEUI + DevEUI + DevNonce + MIC).
pub const JOIN_REQUEST_SIZE: usize =
    MHDR_SIZE + EUI64_SIZE + EUI64_SIZE + DEV_NONCE_SIZE + MIC_SIZE;

/// Join-accept encrypted body size without a CFList (fields + MIC).
pub const JOIN_ACCEPT_BODY_SIZE: usize = 16;

/// Join-accept encrypted body size with a CFList.
pub const JOIN_ACCEPT_BODY_CFLIST_SIZE: usize = JOIN_ACCEPT_BODY_SIZE + CF_LIST_SIZE;

// =============================================================================
// MAC HEADER (LoRaWAN L2 1.0.x §4.2)
// =============================================================================

/// Mask selecting the message type from the MHDR (bits 7..5).
pub const MTYPE_MASK: u8 = 0xE0;

/// Mask selecting the major protocol version from the MHDR (bits 1..0).
pub const MAJOR_MASK: u8 = 0x03;

/// Message type: join-request.
pub const MTYPE_JOIN_REQUEST: u8 = 0x00;

/// Message type: join-accept.
pub const MTYPE_JOIN_ACCEPT: u8 = 0x20;

/// Message type: unconfirmed data uplink.
pub const MTYPE_UNCONFIRMED_DATA_UP: u8 = 0x40;

/// Message type: unconfirmed data downlink.
pub const MTYPE_UNCONFIRMED_DATA_DOWN: u8 = 0x60;

/// Message type: confirmed data uplink.
pub const MTYPE_CONFIRMED_DATA_UP: u8 = 0x80;

/// Message type: confirmed data downlink.
pub const MTYPE_CONFIRMED_DATA_DOWN: u8 = 0xA0;

/// Message type: rejoin-request (LoRaWAN 1.1, rejected here).
pub const MTYPE_REJOIN_REQUEST: u8 = 0xC0;

/// Message type: proprietary.
pub const MTYPE_PROPRIETARY: u8 = 0xE0;

/// Major version value for LoRaWAN R1.
pub const MAJOR_LORAWAN_R1: u8 = 0x00;

// =============================================================================
// FRAME CONTROL (LoRaWAN L2 1.0.x §4.3.1)
// =============================================================================

/// ADR bit: device accepts server-driven data-rate control.
pub const FCTRL_ADR: u8 = 0x80;

/// ADRAckReq bit (uplink only).
pub const FCTRL_ADR_ACK_REQ: u8 = 0x40;

/// ACK bit: acknowledges the last confirmed frame.
pub const FCTRL_ACK: u8 = 0x20;

/// FPending bit (downlink): more data queued for the device.
pub const FCTRL_FPENDING: u8 = 0x10;

/// Mask selecting the frame-options length from FCtrl (bits 3..0).
pub const FCTRL_FOPTS_LEN_MASK: u8 = 0x0F;

// =============================================================================
// FRAME PORTS (LoRaWAN L2 1.0.x §4.3.2)
// =============================================================================

/// Frame port carrying MAC commands in the FRMPayload.
pub const FPORT_MAC_COMMAND: u8 = 0;

/// Frame port reserved for MAC-layer test protocols.
pub const FPORT_MAC_LAYER_TEST: u8 = 224;

// =============================================================================
// CRYPTO BLOCKS (LoRaWAN L2 1.0.x §4.3.3, §4.4, §6.2.5)
// =============================================================================

/// AES-128 block size; also the session-key size.
pub const AES_BLOCK_SIZE: usize = 16;

/// Session key size.
pub const SESSION_KEY_SIZE: usize = 16;

/// Leading byte of the B0 block authenticated by the data-frame MIC.
pub const MIC_BLOCK_PREFIX: u8 = 0x49;

/// Leading byte of the Ai keystream blocks of the payload cipher.
pub const CIPHER_BLOCK_PREFIX: u8 = 0x01;

/// Key-derivation type byte for the network session key.
pub const SESSION_KEY_TYPE_NETWORK: u8 = 0x01;

/// Key-derivation type byte for the application session key.
pub const SESSION_KEY_TYPE_APPLICATION: u8 = 0x02;

/// Direction byte: device to network.
pub const DIR_UPLINK: u8 = 0x00;

/// Direction byte: network to device.
pub const DIR_DOWNLINK: u8 = 0x01;

// =============================================================================
// FRAME COUNTERS
// =============================================================================

/// Largest forward jump accepted when reconstructing a 32-bit counter
/// from its 16-bit wire form, and the gap past which a device is treated
/// as reset rather than stale.
pub const MAX_FCNT_GAP: u32 = 16_384;

/// Downlink-counter sentinel meaning "duplicate uplink, suppress the
/// downlink counter update for this report".
pub const FCNT_DOWN_SUPPRESSED: u32 = 0;

// =============================================================================
// COORDINATION TIMING
// =============================================================================

/// Default bound on waiting for a device's coordination lock.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);
