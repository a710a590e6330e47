//! Cached per-device counter state.

use serde::{Deserialize, Serialize};

use crate::core::CoordinationError;

/// Counter state shared across all server instances for one device.
///
/// Stored as opaque bytes in the [`DeviceCacheStore`]; JSON keeps the
/// entry readable from cache inspection tools.
///
/// [`DeviceCacheStore`]: crate::core::DeviceCacheStore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdrCacheEntry {
    /// Highest uplink counter accepted from the device.
    pub fcnt_up: u32,
    /// Last downlink counter handed out.
    pub fcnt_down: u32,
    /// Gateway whose report won the most recent update. Empty until the
    /// first accepted uplink.
    pub gateway_id: String,
}

impl AdrCacheEntry {
    /// Create an entry.
    pub fn new(fcnt_up: u32, fcnt_down: u32, gateway_id: impl Into<String>) -> Self {
        Self {
            fcnt_up,
            fcnt_down,
            gateway_id: gateway_id.into(),
        }
    }

    /// Serialize for the cache store.
    pub fn encode(&self) -> Result<Vec<u8>, CoordinationError> {
        serde_json::to_vec(self).map_err(|e| CoordinationError::Serialization(e.to_string()))
    }

    /// Deserialize from cache-store bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoordinationError> {
        serde_json::from_slice(bytes).map_err(|e| CoordinationError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_codec_roundtrip() {
        let entry = AdrCacheEntry::new(11, 101, "gateway-a");
        let bytes = entry.encode().unwrap();
        assert_eq!(AdrCacheEntry::decode(&bytes).unwrap(), entry);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = AdrCacheEntry::decode(b"not json").unwrap_err();
        assert!(matches!(err, CoordinationError::Serialization(_)));
    }
}
