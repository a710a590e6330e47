//! Error types for the LNS protocol core.

use std::time::Duration;

use thiserror::Error;

use super::types::{Eui64, Hertz};

/// Errors from structural frame decoding.
///
/// Every variant is recoverable by dropping the offending frame; nothing
/// here is fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Frame shorter than the minimum for its shape.
    #[error("frame too short: need at least {expected} bytes, got {actual}")]
    TooShort {
        /// Minimum byte count for this frame shape.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// A fixed-size frame or field had the wrong length.
    #[error("{field} must be {expected} bytes, got {actual}")]
    BadLength {
        /// Which field or frame shape was malformed.
        field: &'static str,
        /// Required byte count.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },

    /// Declared frame-options length overruns the remaining payload.
    #[error("frame options declare {declared} bytes but only {available} remain")]
    FOptsOverrun {
        /// FOpts length declared in FCtrl.
        declared: usize,
        /// Bytes left between FCnt and the MIC.
        available: usize,
    },

    /// Frame options longer than the 4-bit FCtrl field can declare.
    #[error("frame options length {len} exceeds the 15-byte maximum")]
    FOptsTooLong {
        /// Requested FOpts length.
        len: usize,
    },

    /// A frame payload was supplied without the frame port that must
    /// precede it.
    #[error("FRMPayload present without an FPort")]
    MissingFPort,

    /// Join-accept body is not a whole number of cipher blocks.
    #[error("join-accept body must be 16 or 32 bytes, got {0}")]
    JoinAcceptBody(usize),

    /// Message type not handled by this server.
    #[error("unknown or unsupported message type byte {0:#04x}")]
    UnknownMType(u8),

    /// Major protocol version other than LoRaWAN R1.
    #[error("unsupported major version {0}")]
    UnsupportedMajor(u8),

    /// A 16-bit wire counter implies an implausible jump of the 32-bit
    /// counter.
    #[error("wire counter {wire} implies an implausible jump from server counter {server}")]
    CounterJump {
        /// Counter low bits as received on the wire.
        wire: u16,
        /// Server-tracked 32-bit counter at the last accepted frame.
        server: u32,
    },
}

/// Errors in the crypto layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key material had the wrong length.
    #[error("key must be {expected} bytes, got {actual}")]
    KeyLength {
        /// Required key size.
        expected: usize,
        /// Size actually supplied.
        actual: usize,
    },

    /// Join-accept body is not a whole number of cipher blocks.
    #[error("join-accept body must be 16 or 32 bytes, got {0}")]
    JoinAcceptBody(usize),
}

/// Errors from regional frequency-plan validation.
///
/// A failed validation always rejects the frame or downlink; values are
/// never coerced to a nearby legal one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    /// Frequency outside the region's band or off its channel grid.
    #[error("frequency {0} is not a valid upstream channel in this region")]
    InvalidFrequency(Hertz),

    /// Data-rate index not defined for this region.
    #[error("data rate DR{0} is not defined in this region")]
    InvalidDataRate(u8),

    /// TX-power index not defined for this region.
    #[error("TX power index {0} is not defined in this region")]
    InvalidTxPower(u8),

    /// Region name not recognized when parsing configuration.
    #[error("unknown region name {0:?}")]
    UnknownRegion(String),
}

/// Errors from the ADR / frame-counter coordinator.
#[derive(Debug, Error)]
pub enum CoordinationError {
    /// The per-device lock was not granted within the configured bound.
    ///
    /// The uplink itself should still be processed; only the downlink
    /// counter update is skipped for this cycle.
    #[error("coordination lock for {dev_eui} not acquired within {waited:?}")]
    LockTimeout {
        /// Device whose lock timed out.
        dev_eui: Eui64,
        /// How long the caller waited.
        waited: Duration,
    },

    /// The shared store failed to read or write an entry.
    #[error("device cache store: {0}")]
    Store(String),

    /// A cached entry could not be serialized or deserialized.
    #[error("cache entry codec: {0}")]
    Serialization(String),
}

/// Top-level protocol errors.
#[derive(Debug, Error)]
pub enum LnsError {
    /// Frame decode error.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Crypto error.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Region validation error.
    #[error("region error: {0}")]
    Region(#[from] RegionError),

    /// Coordination error.
    #[error("coordination error: {0}")]
    Coordination(#[from] CoordinationError),
}
