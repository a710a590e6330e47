//! # LNS Protocol
//!
//! Protocol core for a **L**oRaWAN **N**etwork **S**erver.
//!
//! This crate turns raw radio frames into validated, decrypted
//! application data and turns server decisions back into correctly
//! framed, encrypted, region-compliant downlinks. It provides:
//!
//! - **Codec**: bit-exact LoRaWAN 1.0.x frame (de)serialization
//! - **Crypto**: AES-CMAC integrity, session-key derivation, payload
//!   encryption, join-accept wrapping
//! - **Regions**: immutable per-region channel arithmetic, data-rate
//!   tables, and receive-window rules
//! - **Coordination**: duplicate-safe downlink frame counters across
//!   concurrent gateway reports
//!
//! ## Feature Flags
//!
//! - `crypto` (default): MIC, key derivation, payload ciphers
//! - `region` (default): regional frequency plans
//! - `coordinator` (default): async ADR / frame-counter coordination
//!   (pulls in tokio)
//!
//! ## Modules
//!
//! - [`core`]: Types, constants, errors, and the cache-store trait
//!   (always included)
//! - [`codec`]: Structural frame codec (always included)
//! - [`crypto`]: Crypto layer (requires `crypto` feature)
//! - [`region`]: Frequency plans (requires `region` feature)
//! - [`adr`]: Counter coordination (requires `coordinator` feature)
//!
//! ## Example Usage
//!
//! ```rust
//! use lns_protocol::codec::Frame;
//!
//! // Unconfirmed uplink: DevAddr 01020304, FCnt 5, FPort 1.
//! let raw = [
//!     0x40, 0x04, 0x03, 0x02, 0x01, 0x00, 0x05, 0x00, 0x01, 0xAA, 0xBB,
//!     0x11, 0x22, 0x33, 0x44,
//! ];
//!
//! match Frame::decode(&raw)? {
//!     Frame::Data(frame) => {
//!         assert_eq!(frame.dev_addr.to_u32(), 0x0102_0304);
//!         assert_eq!(frame.fcnt, 5);
//!         assert_eq!(frame.to_bytes(), raw);
//!     }
//!     other => panic!("expected a data frame, got {other:?}"),
//! }
//! # Ok::<(), lns_protocol::core::FrameError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core module (always included)
pub mod core;

// Frame codec (always included)
pub mod codec;

// Crypto layer (feature-gated)
#[cfg(feature = "crypto")]
#[cfg_attr(docsrs, doc(cfg(feature = "crypto")))]
pub mod crypto;

// Regional frequency plans (feature-gated)
#[cfg(feature = "region")]
#[cfg_attr(docsrs, doc(cfg(feature = "region")))]
pub mod region;

// ADR / frame-counter coordination (feature-gated)
#[cfg(feature = "coordinator")]
#[cfg_attr(docsrs, doc(cfg(feature = "coordinator")))]
pub mod adr;

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types, constants, errors, and the store trait
    pub use crate::core::*;

    // Frame codec
    pub use crate::codec::*;

    // Crypto layer (when enabled)
    #[cfg(feature = "crypto")]
    pub use crate::crypto::*;

    // Frequency plans (when enabled)
    #[cfg(feature = "region")]
    pub use crate::region::*;

    // Counter coordination (when enabled)
    #[cfg(feature = "coordinator")]
    pub use crate::adr::*;
}

// Re-export commonly used items at crate root
pub use crate::codec::{DataFrame, Frame, JoinAccept, JoinRequest};
pub use crate::core::{DevAddr, DeviceCacheStore, Eui64, FrameError, LnsError};

#[cfg(feature = "crypto")]
pub use crate::crypto::{AppKey, AppSKey, NwkSKey};

#[cfg(feature = "region")]
pub use crate::region::{RegionId, RegionPlan};

#[cfg(feature = "coordinator")]
pub use crate::adr::{AdrCoordinator, InMemoryDeviceStore};
