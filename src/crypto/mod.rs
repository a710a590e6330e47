//! LoRaWAN 1.0.x cryptography.
//!
//! Everything is built on AES-128:
//!
//! - **Keys**: [`AppKey`] root key, [`NwkSKey`]/[`AppSKey`] session keys
//!   derived per join
//! - **Integrity**: 4-byte AES-CMAC MICs over data and join frames
//! - **Confidentiality**: keystream XOR for FRMPayloads, inverse ECB for
//!   join-accept bodies
//!
//! Key material zeroizes on drop and never implements `Debug`.

mod cipher;
mod keys;
mod mic;

pub use cipher::*;
pub use keys::*;
pub use mic::*;
