//! Session key material and derivation.
//!
//! Keys are 16-byte AES-128 material, consumed as opaque buffers from
//! the identity store and zeroized on drop. The two session keys are
//! derived from the join handshake nonces with the AppKey.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes128;
use zeroize::Zeroize;

use crate::core::{
    CryptoError, DevNonce, APP_NONCE_SIZE, NET_ID_SIZE, SESSION_KEY_SIZE,
    SESSION_KEY_TYPE_APPLICATION, SESSION_KEY_TYPE_NETWORK,
};

macro_rules! key_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        ///
        /// Zeroized on drop.
        #[derive(Clone)]
        pub struct $name([u8; SESSION_KEY_SIZE]);

        impl $name {
            /// Create from exact-size key material.
            pub const fn from_bytes(bytes: [u8; SESSION_KEY_SIZE]) -> Self {
                Self(bytes)
            }

            /// Create from a byte slice.
            ///
            /// # Errors
            /// Returns [`CryptoError::KeyLength`] unless the slice is
            /// exactly 16 bytes.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
                let material: [u8; SESSION_KEY_SIZE] =
                    bytes.try_into().map_err(|_| CryptoError::KeyLength {
                        expected: SESSION_KEY_SIZE,
                        actual: bytes.len(),
                    })?;
                Ok(Self(material))
            }

            /// Get the raw key bytes.
            ///
            /// Handle with care - this exposes sensitive key material.
            pub const fn as_bytes(&self) -> &[u8; SESSION_KEY_SIZE] {
                &self.0
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                self.0.zeroize();
            }
        }
    };
}

key_type! {
    /// Root application key, shared with the join server.
    AppKey
}

key_type! {
    /// Network session key, authenticates data-frame MICs.
    NwkSKey
}

key_type! {
    /// Application session key, encrypts application payloads.
    AppSKey
}

/// Build and encrypt the key-derivation block:
/// `type || AppNonce(3) || NetID(3) || DevNonce(2 LE) || 0x00 * 7`.
fn derive_key(
    type_byte: u8,
    app_nonce: &[u8; APP_NONCE_SIZE],
    net_id: &[u8; NET_ID_SIZE],
    dev_nonce: DevNonce,
    app_key: &AppKey,
) -> [u8; SESSION_KEY_SIZE] {
    let mut block = [0u8; SESSION_KEY_SIZE];
    block[0] = type_byte;
    block[1..4].copy_from_slice(app_nonce);
    block[4..7].copy_from_slice(net_id);
    block[7..9].copy_from_slice(&dev_nonce.to_bytes());

    let cipher = Aes128::new(GenericArray::from_slice(app_key.as_bytes()));
    let mut out = GenericArray::clone_from_slice(&block);
    cipher.encrypt_block(&mut out);
    out.into()
}

impl NwkSKey {
    /// Derive the network session key from the join nonces.
    pub fn derive(
        app_nonce: &[u8; APP_NONCE_SIZE],
        net_id: &[u8; NET_ID_SIZE],
        dev_nonce: DevNonce,
        app_key: &AppKey,
    ) -> Self {
        Self(derive_key(
            SESSION_KEY_TYPE_NETWORK,
            app_nonce,
            net_id,
            dev_nonce,
            app_key,
        ))
    }
}

impl AppSKey {
    /// Derive the application session key from the join nonces.
    pub fn derive(
        app_nonce: &[u8; APP_NONCE_SIZE],
        net_id: &[u8; NET_ID_SIZE],
        dev_nonce: DevNonce,
        app_key: &AppKey,
    ) -> Self {
        Self(derive_key(
            SESSION_KEY_TYPE_APPLICATION,
            app_nonce,
            net_id,
            dev_nonce,
            app_key,
        ))
    }
}
