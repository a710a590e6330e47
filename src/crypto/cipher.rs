//! Payload encryption.
//!
//! FRMPayload confidentiality XORs the payload against an AES keystream
//! built from per-block counters, so encryption and decryption are the
//! same operation. Join-accept bodies use raw AES-ECB in the inverse
//! direction: the server *decrypts* the plaintext so that devices,
//! which only implement AES encryption, recover it by encrypting.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;

use crate::codec::{EncryptedJoinAccept, JoinAccept, Mhdr, MType};
use crate::core::{
    CryptoError, DevAddr, Direction, LnsError, AES_BLOCK_SIZE, CIPHER_BLOCK_PREFIX,
    JOIN_ACCEPT_BODY_CFLIST_SIZE, JOIN_ACCEPT_BODY_SIZE, SESSION_KEY_SIZE,
};

use super::keys::AppKey;

/// Encrypt a FRMPayload.
///
/// The key is the NwkSKey for port 0 (MAC commands) and the AppSKey for
/// application ports. `fcnt` is the full 32-bit counter; the block for
/// payload chunk `i` (1-based) is
///
/// ```text
/// 0x01 || 0x00*4 || dir || DevAddr(4 LE) || FCnt(4 LE) || 0x00 || i
/// ```
///
/// AES-encrypted under the session key and XORed into the chunk. The
/// last block is truncated to the payload length.
pub fn encrypt_frm_payload(
    payload: &[u8],
    key: &[u8; SESSION_KEY_SIZE],
    dev_addr: DevAddr,
    fcnt: u32,
    direction: Direction,
) -> Vec<u8> {
    let cipher = Aes128::new(GenericArray::from_slice(key));
    let mut out = Vec::with_capacity(payload.len());
    for (i, chunk) in payload.chunks(AES_BLOCK_SIZE).enumerate() {
        let mut block = [0u8; AES_BLOCK_SIZE];
        block[0] = CIPHER_BLOCK_PREFIX;
        block[5] = direction.as_byte();
        block[6..10].copy_from_slice(dev_addr.as_bytes());
        block[10..14].copy_from_slice(&fcnt.to_le_bytes());
        block[15] = (i + 1) as u8;

        let mut keystream = GenericArray::from(block);
        cipher.encrypt_block(&mut keystream);
        out.extend(chunk.iter().zip(keystream.iter()).map(|(p, k)| p ^ k));
    }
    out
}

/// Decrypt a FRMPayload. The XOR keystream is symmetric; this exists so
/// call sites read in the right direction.
pub fn decrypt_frm_payload(
    payload: &[u8],
    key: &[u8; SESSION_KEY_SIZE],
    dev_addr: DevAddr,
    fcnt: u32,
    direction: Direction,
) -> Vec<u8> {
    encrypt_frm_payload(payload, key, dev_addr, fcnt, direction)
}

fn check_join_accept_len(body: &[u8]) -> Result<(), CryptoError> {
    if body.len() != JOIN_ACCEPT_BODY_SIZE && body.len() != JOIN_ACCEPT_BODY_CFLIST_SIZE {
        return Err(CryptoError::JoinAcceptBody(body.len()));
    }
    Ok(())
}

/// Encrypt a join-accept body (fields plus MIC) for the wire.
///
/// # Errors
/// Returns [`CryptoError::JoinAcceptBody`] unless the body is exactly
/// 16 or 32 bytes.
pub fn encrypt_join_accept(body: &[u8], app_key: &AppKey) -> Result<Vec<u8>, CryptoError> {
    check_join_accept_len(body)?;
    let cipher = Aes128::new(GenericArray::from_slice(app_key.as_bytes()));
    let mut out = body.to_vec();
    for chunk in out.chunks_exact_mut(AES_BLOCK_SIZE) {
        cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
    }
    Ok(out)
}

/// Recover a join-accept body from its wire form.
///
/// # Errors
/// Returns [`CryptoError::JoinAcceptBody`] unless the body is exactly
/// 16 or 32 bytes.
pub fn decrypt_join_accept(body: &[u8], app_key: &AppKey) -> Result<Vec<u8>, CryptoError> {
    check_join_accept_len(body)?;
    let cipher = Aes128::new(GenericArray::from_slice(app_key.as_bytes()));
    let mut out = body.to_vec();
    for chunk in out.chunks_exact_mut(AES_BLOCK_SIZE) {
        cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
    }
    Ok(out)
}

/// Encrypt a join-accept into its wire frame.
///
/// The MIC must already be stamped (see
/// [`apply_join_accept_mic`](super::apply_join_accept_mic)); it is
/// encrypted along with the fields.
pub fn encrypt_join_accept_frame(
    accept: &JoinAccept,
    app_key: &AppKey,
) -> Result<EncryptedJoinAccept, CryptoError> {
    let body = encrypt_join_accept(&accept.plaintext(), app_key)?;
    Ok(EncryptedJoinAccept {
        mhdr: Mhdr::new(MType::JoinAccept),
        body,
    })
}

/// Decrypt a wire join-accept and parse its fields.
///
/// The embedded MIC is parsed but not checked; verify it separately.
pub fn decrypt_join_accept_frame(
    frame: &EncryptedJoinAccept,
    app_key: &AppKey,
) -> Result<JoinAccept, LnsError> {
    let body = decrypt_join_accept(&frame.body, app_key)?;
    Ok(JoinAccept::decode_plaintext(&body)?)
}
