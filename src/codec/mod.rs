//! LoRaWAN frame codec - structural (de)serialization.
//!
//! This module parses and serializes the MAC frame wire format:
//!
//! - **MAC header**: [`Mhdr`], [`MType`]
//! - **Data frames**: [`DataFrame`], [`FCtrl`]
//! - **Join frames**: [`JoinRequest`], [`JoinAccept`], [`EncryptedJoinAccept`]
//! - **Dispatch**: [`Frame`] decoded once from the message type
//! - **Counters**: 32-bit reconstruction of the 16-bit wire counter
//!
//! Everything here is pure byte manipulation; MIC computation, key
//! derivation, and payload encryption live in the crypto layer.

mod data;
mod fcnt;
mod frame;
mod join;
mod mhdr;

pub use data::*;
pub use fcnt::*;
pub use frame::*;
pub use join::*;
pub use mhdr::*;
