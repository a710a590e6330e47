//! Message integrity codes (AES-CMAC, truncated to 4 bytes).
//!
//! Data frames are authenticated over a B0 block followed by the frame
//! bytes; join frames directly over their fields. Verification is a
//! boolean signal so callers can pick their drop policy; it never
//! raises.

use aes::cipher::generic_array::GenericArray;
use aes::Aes128;
use cmac::{Cmac, Mac};

use crate::codec::{infer_full_fcnt, DataFrame, JoinAccept, JoinRequest};
use crate::core::{Mic, MIC_BLOCK_PREFIX, MIC_SIZE, SESSION_KEY_SIZE};

use super::keys::{AppKey, NwkSKey};

/// B0 block prepended to the authenticated data-frame bytes:
/// `0x49 || 0x00*4 || dir || DevAddr(4 LE) || FCnt(4 LE) || 0x00 || len`.
fn b0_block(frame: &DataFrame, fcnt: u32, message_len: usize) -> [u8; 16] {
    let mut block = [0u8; 16];
    block[0] = MIC_BLOCK_PREFIX;
    block[5] = frame.direction().as_byte();
    block[6..10].copy_from_slice(frame.dev_addr.as_bytes());
    block[10..14].copy_from_slice(&fcnt.to_le_bytes());
    block[15] = message_len as u8;
    block
}

fn cmac_tag(key: &[u8; SESSION_KEY_SIZE], parts: &[&[u8]]) -> Mic {
    let mut mac = Cmac::<Aes128>::new(GenericArray::from_slice(key));
    for part in parts {
        mac.update(part);
    }
    let tag = mac.finalize().into_bytes();
    let mut mic = [0u8; MIC_SIZE];
    mic.copy_from_slice(&tag[..MIC_SIZE]);
    Mic::from_bytes(mic)
}

/// Constant-time comparison of the expected tag's leading 4 bytes.
fn cmac_verify(key: &[u8; SESSION_KEY_SIZE], parts: &[&[u8]], mic: &Mic) -> bool {
    let mut mac = Cmac::<Aes128>::new(GenericArray::from_slice(key));
    for part in parts {
        mac.update(part);
    }
    mac.verify_truncated_left(mic.as_bytes()).is_ok()
}

/// Compute the MIC of a data frame.
///
/// The full 32-bit counter is rebuilt from the frame's wire counter and
/// the caller's server-tracked counter.
pub fn compute_data_mic(frame: &DataFrame, key: &NwkSKey, server_fcnt: u32) -> Mic {
    let fcnt = infer_full_fcnt(frame.fcnt, server_fcnt);
    let message = frame.mic_message();
    let b0 = b0_block(frame, fcnt, message.len());
    cmac_tag(key.as_bytes(), &[&b0, &message])
}

/// Verify the MIC embedded in a data frame.
///
/// Returns `false` on any mismatch; the caller decides whether the drop
/// is silent or logged.
pub fn verify_data_mic(frame: &DataFrame, key: &NwkSKey, server_fcnt: u32) -> bool {
    let fcnt = infer_full_fcnt(frame.fcnt, server_fcnt);
    let message = frame.mic_message();
    let b0 = b0_block(frame, fcnt, message.len());
    cmac_verify(key.as_bytes(), &[&b0, &message], &frame.mic)
}

/// Compute and stamp the MIC of a data frame.
pub fn apply_data_mic(frame: &mut DataFrame, key: &NwkSKey, server_fcnt: u32) {
    frame.mic = compute_data_mic(frame, key, server_fcnt);
}

/// Compute the MIC of a join-request.
pub fn compute_join_request_mic(request: &JoinRequest, app_key: &AppKey) -> Mic {
    cmac_tag(app_key.as_bytes(), &[&request.mic_message()])
}

/// Verify the MIC embedded in a join-request.
pub fn verify_join_request_mic(request: &JoinRequest, app_key: &AppKey) -> bool {
    cmac_verify(app_key.as_bytes(), &[&request.mic_message()], &request.mic)
}

/// Compute and stamp the MIC of a join-request.
pub fn apply_join_request_mic(request: &mut JoinRequest, app_key: &AppKey) {
    request.mic = compute_join_request_mic(request, app_key);
}

/// Compute the MIC of a decrypted join-accept.
pub fn compute_join_accept_mic(accept: &JoinAccept, app_key: &AppKey) -> Mic {
    cmac_tag(app_key.as_bytes(), &[&accept.mic_message()])
}

/// Verify the MIC embedded in a decrypted join-accept.
pub fn verify_join_accept_mic(accept: &JoinAccept, app_key: &AppKey) -> bool {
    cmac_verify(app_key.as_bytes(), &[&accept.mic_message()], &accept.mic)
}

/// Compute and stamp the MIC of a join-accept before encryption.
pub fn apply_join_accept_mic(accept: &mut JoinAccept, app_key: &AppKey) {
    accept.mic = compute_join_accept_mic(accept, app_key);
}
